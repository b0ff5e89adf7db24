//! State for a single interactive chat. A session starts out
//! `Selecting` a model and domain, gets locked into `Chatting` when
//! the user starts talking, and can be unlocked again to pick
//! something else.
use anyhow::{Result, bail};

use super::models::{Domain, Model, Speaker, Transcript, Turn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Selecting,
    Chatting,
}

/// What happens to the transcript when the session is unlocked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResetPolicy {
    #[default]
    KeepTranscript,
    ClearTranscript,
}

#[derive(Debug, Default)]
pub struct Session {
    model: Model,
    domain: Domain,
    locked: bool,
    transcript: Transcript,
    reset_policy: ResetPolicy,
}

impl Session {
    pub fn new(model: Model, domain: Domain) -> Self {
        Self {
            model,
            domain,
            ..Default::default()
        }
    }

    pub fn with_reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn reset_policy(&self) -> ResetPolicy {
        self.reset_policy
    }

    pub fn state(&self) -> SessionState {
        if self.locked {
            SessionState::Chatting
        } else {
            SessionState::Selecting
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn select_model(&mut self, model: Model) -> Result<()> {
        if self.locked {
            bail!("Can't change the model while chatting. Reset the chat first.");
        }
        self.model = model;
        Ok(())
    }

    pub fn select_domain(&mut self, domain: Domain) -> Result<()> {
        if self.locked {
            bail!("Can't change the domain while chatting. Reset the chat first.");
        }
        self.domain = domain;
        Ok(())
    }

    /// Locks in the current model and domain. Locking an already
    /// locked session does nothing.
    pub fn lock(&mut self) {
        if self.locked {
            return;
        }
        self.locked = true;
        tracing::info!(model = %self.model, domain = %self.domain, "Session locked");
    }

    pub fn unlock(&mut self) {
        if !self.locked {
            return;
        }
        self.locked = false;
        if self.reset_policy == ResetPolicy::ClearTranscript {
            self.transcript.clear();
        }
        tracing::info!(
            policy = ?self.reset_policy,
            turns = self.transcript.len(),
            "Session unlocked"
        );
    }

    pub fn append_turn(&mut self, turn: Turn) {
        self.transcript.push(turn)
    }

    /// Records a user message and the reply to it as consecutive
    /// turns.
    pub fn append_exchange(&mut self, user_text: &str, bot_text: &str) {
        self.append_turn(Turn::new(Speaker::User, user_text));
        self.append_turn(Turn::new(Speaker::Bot, bot_text));
    }
}
