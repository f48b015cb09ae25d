//! Chat command - send one message through the gateway.

use anyhow::{bail, Result};
use clap::Args;
use gateway_client::GatewayOptions;
use gateway_core::{ChatMessage, GenerationOverrides};
use serde::Serialize;

use crate::cli::Context;
use crate::output::{self, CommandResult, OutputFormat};

/// Arguments for the chat command.
#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Message to send (if not provided, reads from stdin)
    #[arg(short, long)]
    pub message: Option<String>,

    /// System prompt
    #[arg(short, long)]
    pub system: Option<String>,

    /// Temperature (0.0 to 2.0)
    #[arg(short, long)]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    #[arg(long)]
    pub max_tokens: Option<u32>,
}

/// Chat response for output.
#[derive(Debug, Serialize)]
struct ChatOutput {
    provider: String,
    model: String,
    content: String,
}

/// Execute the chat command.
pub async fn execute(args: ChatArgs, ctx: &Context) -> Result<()> {
    let message = match args.message {
        Some(message) => message,
        None => super::read_input(None)?,
    };
    if message.trim().is_empty() {
        bail!("no message given; pass --message or pipe text on stdin");
    }

    let gateway = ctx.gateway(GatewayOptions::default())?;

    let mut turns = Vec::with_capacity(2);
    if let Some(system) = args.system {
        turns.push(ChatMessage::system(system));
    }
    turns.push(ChatMessage::user(message.trim()));

    let mut overrides = GenerationOverrides::none();
    if let Some(temperature) = args.temperature {
        overrides = overrides.temperature(temperature);
    }
    if let Some(max_tokens) = args.max_tokens {
        overrides = overrides.max_output_tokens(max_tokens);
    }

    let spinner = output::spinner("Waiting for reply...", ctx.format);
    let result = gateway.send(&turns, overrides).await;
    spinner.finish_and_clear();
    let content = result?;

    match ctx.format {
        OutputFormat::Json => CommandResult::success(ChatOutput {
            provider: gateway.provider().to_string(),
            model: gateway.model().to_string(),
            content,
        })
        .print(ctx.format),
        OutputFormat::Text => {
            println!("{content}");
            Ok(())
        }
    }
}
