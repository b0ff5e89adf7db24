//! Prompts for keeping a model on topic, using Handlebars for
//! templating. Handlebars can't do much out of the box without
//! registering helpers which keeps the templates dumb.
//!
//! User text is interpolated verbatim. Nothing stops a message from
//! containing instructions that override the framing around it.

use std::fmt;

use anyhow::{Error, Result};
use handlebars::Handlebars;
use serde_json::json;

use super::chat::{Domain, Tier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    MinimalExpert,
    ConstrainedExpert,
    FullExpert,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<Prompt> for String {
    fn from(item: Prompt) -> String {
        format!("{:?}", item)
    }
}

impl From<Tier> for Prompt {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Minimal => Prompt::MinimalExpert,
            Tier::Constrained => Prompt::ConstrainedExpert,
            Tier::Full => Prompt::FullExpert,
        }
    }
}

const MINIMAL_EXPERT_PROMPT: &str = r"
You are an expert in {{domain}}. Only answer questions related to this domain.
Be brief, accurate, and avoid speculation. If the question is off-topic, politely decline.

Question: {{user_text}}
Answer:
";

// Small models tend to ramble and print their reasoning so this one
// spells out the refusal and anchors it with examples.
const CONSTRAINED_EXPERT_PROMPT: &str = r#"
You are a professional assistant that only answers questions related to the domain: **{{domain}}**.
Your instructions:
- If the question is related to **{{domain}}**, give a short, factual, and clear answer.
- If the question is NOT related to **{{domain}}**, respond ONLY with:
  "Sorry, I can only answer questions related to {{domain}}."
- Do NOT add any extra thoughts, explanations, or guesses.
- Do NOT include '<think>' or internal thoughts.

Examples:
Q: What is the capital of France?
A: Sorry, I can only answer questions related to {{domain}}.

Q: Who painted the Mona Lisa?
A: Leonardo da Vinci.

Q: {{user_text}}
A:
"#;

const FULL_EXPERT_PROMPT: &str = r#"
System:
You are a domain-expert assistant specialized in **{{domain}}**, operating as a world-class professional with rigorous adherence to factual accuracy, domain compliance, and ethical safety.
You must:
1. **Accept only questions strictly within {{domain}}.** If the user asks something outside the domain, politely decline.
2. **Adhere to domain-specific guardrails**:
- Avoid speculation or unverified advice.
- Cite sources or state "I don't know" if data isn't available.
- Respect any legal, medical, or compliance boundaries in {{domain}}.
3. **Use a structured reasoning approach**:
- Step 1: Clarify ambiguous terms, if needed.
- Step 2: Apply domain knowledge with concise, accurate detail.
- Step 3: Summarize findings and suggest next steps or referrals.
4. **Format output clearly**: use headings, bullet points, and citations.

Example:
User: “What's the latest breakthrough in {{domain}}?”
Assistant:
- **Step 1 - Clarification**: “Do you mean recent peer-reviewed studies from the past year or industry developments?”
- **Step 2 - Answer**: “A 2025 study in Journal X showed… [citation].”
- **Step 3 - Summary & Next Steps**: “In summary… For deeper exploration, see article Y.”

User: {{user_text}}
Assistant:
"#;

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    // These are prompts, not HTML
    registry.register_escape_fn(handlebars::no_escape);
    registry
        .register_template_string(&Prompt::MinimalExpert.to_string(), MINIMAL_EXPERT_PROMPT)
        .expect("Failed to register template");
    registry
        .register_template_string(
            &Prompt::ConstrainedExpert.to_string(),
            CONSTRAINED_EXPERT_PROMPT,
        )
        .expect("Failed to register template");
    registry
        .register_template_string(&Prompt::FullExpert.to_string(), FULL_EXPERT_PROMPT)
        .expect("Failed to register template");
    registry
}

/// Builds the prompt sent to `model` for a question asked in
/// `domain`. The template is picked by the model's tier so any
/// unrecognized model gets the full prompt.
pub fn compose(model: &str, domain: Domain, user_text: &str) -> Result<String, Error> {
    let prompt = Prompt::from(Tier::for_model(model));
    let templates = templates();
    let content = templates.render(
        &prompt.to_string(),
        &json!({"domain": domain.label(), "user_text": user_text}),
    )?;

    Ok(content.trim().to_string())
}
