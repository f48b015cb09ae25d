//! Shortform Studio CLI
//!
//! Generates scripts, thumbnail captions and search keywords for short-form
//! shopping videos through an OpenAI or Gemini backend.
//!
//! ```bash
//! # Provider and credentials come from the environment or a .env file
//! AI_PROVIDER=gemini GEMINI_API_KEY=... shortform-studio script \
//!     --product "무선 이어폰" --audience "20대 직장인" --tone 경쾌한 --style 리뷰
//!
//! # Check how a saved reply would be parsed
//! shortform-studio extract reply.txt
//! ```

use anyhow::Result;
use clap::Parser;
use gateway_telemetry::{init_logging, LogFormat, LoggingConfig};

mod cli;
mod commands;
mod output;

use cli::Cli;
use output::{CommandResult, OutputFormat};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let format = if cli.json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_logging(&LoggingConfig::from_verbosity(cli.verbose).with_format(format))?;

    let output_format = OutputFormat::from_json_flag(cli.json);
    if let Err(e) = cli.execute().await {
        match output_format {
            OutputFormat::Json => CommandResult::<()>::failure(format!("{e:#}")).print(output_format)?,
            OutputFormat::Text => output::error(&format!("{e:#}")),
        }
        std::process::exit(1);
    }

    Ok(())
}
