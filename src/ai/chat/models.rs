//! The core models for a domain restricted chat: which model and
//! domain were picked and the turns exchanged so far.
use std::fmt;
use std::str::FromStr;

use anyhow::{Error, Result, anyhow};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Models the local generation endpoint is expected to serve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum Model {
    #[default]
    #[value(name = "gemma3")]
    #[serde(rename = "gemma3")]
    Gemma3,
    #[value(name = "tinyllama")]
    #[serde(rename = "tinyllama")]
    TinyLlama,
    #[value(name = "qwen3:0.6b")]
    #[serde(rename = "qwen3:0.6b")]
    Qwen3,
}

impl Model {
    pub const ALL: [Model; 3] = [Model::Gemma3, Model::TinyLlama, Model::Qwen3];

    /// The identifier sent to the generation endpoint.
    pub fn id(&self) -> &'static str {
        match self {
            Model::Gemma3 => "gemma3",
            Model::TinyLlama => "tinyllama",
            Model::Qwen3 => "qwen3:0.6b",
        }
    }

    pub fn tier(&self) -> Tier {
        Tier::for_model(self.id())
    }

    /// A warning to show the user before each reply, if any.
    pub fn caveat(&self) -> Option<&'static str> {
        match self {
            Model::TinyLlama => Some(
                "tinyllama is a smaller model. Responses may be less structured or informative.",
            ),
            _ => None,
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.id())
    }
}

// Accepts either the model identifier or its 1-based position in
// `Model::ALL` since that's how the selection menu lists them.
impl FromStr for Model {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        select_from(&Model::ALL, s, |m| m.id()).ok_or_else(|| {
            anyhow!(
                "Unknown model '{}'. Choose one of: {}",
                s.trim(),
                Model::ALL.map(|m| m.id()).join(", ")
            )
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum Domain {
    #[default]
    #[value(name = "Science")]
    Science,
    #[value(name = "IT")]
    #[serde(rename = "IT")]
    It,
    #[value(name = "Medical")]
    Medical,
    #[value(name = "Arts")]
    Arts,
}

impl Domain {
    pub const ALL: [Domain; 4] = [Domain::Science, Domain::It, Domain::Medical, Domain::Arts];

    pub fn label(&self) -> &'static str {
        match self {
            Domain::Science => "Science",
            Domain::It => "IT",
            Domain::Medical => "Medical",
            Domain::Arts => "Arts",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Domain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        select_from(&Domain::ALL, s, |d| d.label()).ok_or_else(|| {
            anyhow!(
                "Unknown domain '{}'. Choose one of: {}",
                s.trim(),
                Domain::ALL.map(|d| d.label()).join(", ")
            )
        })
    }
}

fn select_from<T: Copy>(options: &[T], input: &str, name: impl Fn(&T) -> &str) -> Option<T> {
    let input = input.trim();
    if let Ok(idx) = input.parse::<usize>() {
        return idx.checked_sub(1).and_then(|i| options.get(i)).copied();
    }
    options
        .iter()
        .find(|o| name(o).eq_ignore_ascii_case(input))
        .copied()
}

/// Capability class of a model. Determines which prompt template is
/// used when talking to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Minimal,
    Constrained,
    Full,
}

impl Tier {
    /// Any identifier that isn't a known small model gets the full
    /// prompt.
    pub fn for_model(model: &str) -> Self {
        match model {
            "tinyllama" => Tier::Minimal,
            "qwen3:0.6b" => Tier::Constrained,
            _ => Tier::Full,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "bot")]
    Bot,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl Turn {
    pub fn new(speaker: Speaker, text: &str) -> Self {
        Self {
            speaker,
            text: text.to_string(),
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.speaker {
            Speaker::User => write!(f, "You: {}", self.text),
            Speaker::Bot => write!(f, "Bot: {}", self.text),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Transcript(Vec<Turn>);

impl Transcript {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, turn: Turn) {
        self.0.push(turn)
    }

    pub fn turns(&self) -> &[Turn] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.0.iter()
    }

    // Only the session's reset policy is allowed to drop turns
    pub(crate) fn clear(&mut self) {
        self.0.clear()
    }
}
