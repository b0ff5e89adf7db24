use anyhow::{Error, Result, anyhow};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::ai::chat::{Chat, ChatBuilder, Domain, Model, ResetPolicy, Session, SessionState};
use crate::core::AppConfig;

const BANNER: &str = "✧°. ⋆༺ Domain-Specific Chatbot ༻⋆. °✧";

/// Everything the user can do from the prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    SelectModel(Model),
    SelectDomain(Domain),
    Start,
    Send(String),
    Reset,
    ShowHistory,
    Quit,
}

/// What to show after handling an event and whether to keep going.
#[derive(Debug, Default, PartialEq)]
pub struct Outcome {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl Outcome {
    fn lines(lines: Vec<String>) -> Self {
        Self { lines, quit: false }
    }

    fn quit() -> Self {
        Self {
            lines: Vec::new(),
            quit: true,
        }
    }
}

/// Turns a line of input into an event. What a line means depends on
/// whether the user is still choosing a model and domain or already
/// chatting. Returns `None` for input that should be ignored.
pub fn parse_event(state: SessionState, line: &str) -> Result<Option<ChatEvent>, Error> {
    // Messages are sent as typed. Trimming is only for recognizing
    // commands and blank input.
    let raw = line;
    let line = line.trim();

    if line == "/quit" {
        return Ok(Some(ChatEvent::Quit));
    }

    match state {
        SessionState::Selecting => {
            let (cmd, arg) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
            match cmd {
                "" | "start" => Ok(Some(ChatEvent::Start)),
                "model" => Ok(Some(ChatEvent::SelectModel(arg.parse()?))),
                "domain" => Ok(Some(ChatEvent::SelectDomain(arg.parse()?))),
                _ => Err(anyhow!(
                    "Unknown command '{}'. Use `model <name|number>`, `domain <name|number>`, or `start`",
                    cmd
                )),
            }
        }
        SessionState::Chatting => match line {
            "" => Ok(None),
            "/reset" => Ok(Some(ChatEvent::Reset)),
            "/history" => Ok(Some(ChatEvent::ShowHistory)),
            _ => Ok(Some(ChatEvent::Send(raw.to_string()))),
        },
    }
}

pub fn selection_menu(session: &Session) -> Vec<String> {
    let mut lines = vec![String::from("Choose a Model:")];
    for (i, model) in Model::ALL.iter().enumerate() {
        let marker = if *model == session.model() { " *" } else { "" };
        lines.push(format!("  {}. {}{}", i + 1, model, marker));
    }
    lines.push(String::from("Choose a Domain:"));
    for (i, domain) in Domain::ALL.iter().enumerate() {
        let marker = if *domain == session.domain() { " *" } else { "" };
        lines.push(format!("  {}. {}{}", i + 1, domain, marker));
    }
    lines.push(String::from(
        "Type `model <name|number>` or `domain <name|number>`, then `start` (or press enter).",
    ));
    lines
}

fn header(session: &Session) -> String {
    format!("Model: {} | Domain: {}", session.model(), session.domain())
}

fn conversation(session: &Session) -> Vec<String> {
    let mut lines = vec![header(session), String::from("---")];
    lines.extend(session.transcript().iter().map(|t| t.to_string()));
    lines
}

/// Applies an event to the chat. Sending blocks until the endpoint
/// replies or gives up.
pub async fn handle_event(chat: &mut Chat, event: ChatEvent) -> Result<Outcome, Error> {
    let outcome = match event {
        ChatEvent::SelectModel(model) => {
            chat.session.select_model(model)?;
            Outcome::lines(vec![format!("Model set to {}", model)])
        }
        ChatEvent::SelectDomain(domain) => {
            chat.session.select_domain(domain)?;
            Outcome::lines(vec![format!("Domain set to {}", domain)])
        }
        ChatEvent::Start => {
            chat.session.lock();
            let mut lines = conversation(&chat.session);
            lines.push(String::from(
                "Type a message to chat, `/reset` to change model or domain, `/history` to show the conversation, `/quit` to exit.",
            ));
            Outcome::lines(lines)
        }
        ChatEvent::Send(text) => {
            if text.trim().is_empty() {
                return Ok(Outcome::default());
            }
            let mut lines = Vec::new();
            if let Some(caveat) = chat.session.model().caveat() {
                lines.push(format!("⚠️ {}", caveat));
            }
            let result = chat.next_msg(&text).await?;
            lines.push(format!("Bot: {}", result.text));
            Outcome::lines(lines)
        }
        ChatEvent::Reset => {
            chat.session.unlock();
            let note = match chat.session.reset_policy() {
                ResetPolicy::KeepTranscript => format!(
                    "Chat reset. Keeping {} messages from this conversation.",
                    chat.session.transcript().len()
                ),
                ResetPolicy::ClearTranscript => String::from("Chat reset. Conversation cleared."),
            };
            let mut lines = vec![note];
            lines.extend(selection_menu(&chat.session));
            Outcome::lines(lines)
        }
        ChatEvent::ShowHistory => Outcome::lines(conversation(&chat.session)),
        ChatEvent::Quit => Outcome::quit(),
    };

    Ok(outcome)
}

pub async fn run(
    config: AppConfig,
    model: Option<Model>,
    domain: Option<Domain>,
    start: bool,
) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    let mut chat = ChatBuilder::from_config(&config)
        .model(model.unwrap_or_default())
        .domain(domain.unwrap_or_default())
        .build();

    tracing::debug!(host = chat.api_hostname(), "Starting chat");

    println!("{}", BANNER);
    let first = if start {
        handle_event(&mut chat, ChatEvent::Start).await?
    } else {
        Outcome::lines(selection_menu(&chat.session))
    };
    for line in first.lines {
        println!("{}", line);
    }

    loop {
        let prompt = match chat.session.state() {
            SessionState::Selecting => "select> ",
            SessionState::Chatting => ">>> ",
        };
        let readline = rl.readline(prompt);
        match readline {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                let event = match parse_event(chat.session.state(), &line) {
                    Ok(Some(event)) => event,
                    Ok(None) => continue,
                    Err(err) => {
                        println!("Error: {}", err);
                        continue;
                    }
                };
                match handle_event(&mut chat, event).await {
                    Ok(outcome) => {
                        for line in outcome.lines {
                            println!("{}", line);
                        }
                        if outcome.quit {
                            break;
                        }
                    }
                    Err(err) => println!("Error: {}", err),
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
