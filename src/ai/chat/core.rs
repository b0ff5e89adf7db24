use std::time::Duration;

use anyhow::{Error, Result, bail};

use super::models::{Domain, Model};
use super::session::{ResetPolicy, Session};
use crate::ai::prompt::compose;
use crate::core::AppConfig;
use crate::ollama::{GenerationResult, dispatch};

/// A chat with a local model that is restricted to a single domain.
///
/// Owns the `Session` and knows how to reach the generation
/// endpoint. Each call to `next_msg` composes the prompt for the
/// locked model and domain, waits for the reply, and records both
/// sides of the exchange in the transcript. Failures talking to the
/// endpoint become the bot's reply rather than an error.
///
/// Use `Chat::builder()` to construct a valid `Chat`.
#[derive(Debug)]
pub struct Chat {
    api_hostname: String,
    timeout: Duration,
    pub session: Session,
}

impl Chat {
    pub fn builder(api_hostname: &str) -> ChatBuilder {
        ChatBuilder::new(api_hostname)
    }

    pub fn api_hostname(&self) -> &str {
        &self.api_hostname
    }

    /// Sends the user's message and returns the normalized result. The
    /// session must be locked first so the model and domain can't
    /// change mid-exchange.
    pub async fn next_msg(&mut self, user_text: &str) -> Result<GenerationResult, Error> {
        if !self.session.is_locked() {
            bail!("Start the chat before sending messages");
        }

        let model = self.session.model();
        let prompt = compose(model.id(), self.session.domain(), user_text)?;
        let result = dispatch(model.id(), &prompt, &self.api_hostname, self.timeout).await;

        self.session.append_exchange(user_text, &result.text);

        Ok(result)
    }
}

pub struct ChatBuilder {
    api_hostname: String,
    timeout: Duration,
    model: Model,
    domain: Domain,
    reset_policy: ResetPolicy,
}

impl ChatBuilder {
    pub fn new(api_hostname: &str) -> Self {
        Self {
            api_hostname: api_hostname.to_string(),
            timeout: Duration::from_secs(60 * 10),
            model: Model::default(),
            domain: Domain::default(),
            reset_policy: ResetPolicy::default(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.llm_api_hostname)
            .timeout(config.request_timeout)
            .reset_policy(config.reset_policy)
    }

    pub fn build(self) -> Chat {
        Chat {
            api_hostname: self.api_hostname,
            timeout: self.timeout,
            session: Session::new(self.model, self.domain).with_reset_policy(self.reset_policy),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn domain(mut self, domain: Domain) -> Self {
        self.domain = domain;
        self
    }

    pub fn reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }
}
