use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod ask;
pub mod chat;
pub mod prompt;

use crate::ai::chat::{Domain, Model, ResetPolicy};
use crate::core::AppConfig;

/// Overrides for settings that otherwise come from the environment
#[derive(Args, Debug, Default)]
pub struct EndpointArgs {
    /// Base URL of the generation endpoint
    #[arg(long)]
    host: Option<String>,

    /// Seconds to wait for a reply before giving up
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Clear the transcript when switching model or domain
    #[arg(long, action, default_value = "false")]
    clear_on_reset: bool,
}

impl EndpointArgs {
    pub fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(host) = self.host {
            config.llm_api_hostname = host;
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        if self.clear_on_reset {
            config.reset_policy = ResetPolicy::ClearTranscript;
        }
        config
    }
}

#[derive(Subcommand)]
enum Command {
    /// Start an interactive chat session
    Chat {
        #[arg(long, value_enum, ignore_case = true)]
        model: Option<Model>,
        #[arg(long, value_enum, ignore_case = true)]
        domain: Option<Domain>,
        /// Skip the selection menu and start chatting right away
        #[arg(long, action, default_value = "false")]
        start: bool,
        #[command(flatten)]
        endpoint: EndpointArgs,
    },
    /// Print the prompt that would be sent for a message
    Prompt {
        #[arg(long, value_enum, ignore_case = true)]
        model: Model,
        #[arg(long, value_enum, ignore_case = true)]
        domain: Domain,
        #[arg(long)]
        text: String,
    },
    /// Ask a single question and print the reply
    Ask {
        #[arg(long, value_enum, ignore_case = true)]
        model: Model,
        #[arg(long, value_enum, ignore_case = true)]
        domain: Domain,
        #[arg(long)]
        text: String,
        #[command(flatten)]
        endpoint: EndpointArgs,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

fn init_tracing() {
    // Logs go to stderr so they don't get mixed into the transcript
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    init_tracing();

    // Handle each sub command
    match args.command {
        Some(Command::Chat {
            model,
            domain,
            start,
            endpoint,
        }) => {
            let config = endpoint.apply(AppConfig::default());
            chat::run(config, model, domain, start).await?;
        }
        Some(Command::Prompt {
            model,
            domain,
            text,
        }) => {
            prompt::run(model, domain, &text)?;
        }
        Some(Command::Ask {
            model,
            domain,
            text,
            endpoint,
        }) => {
            let config = endpoint.apply(AppConfig::default());
            ask::run(config, model, domain, &text).await?;
        }
        None => {
            chat::run(AppConfig::default(), None, None, false).await?;
        }
    }

    Ok(())
}
