//! CLI argument definitions using clap.

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use gateway_client::{Gateway, GatewayOptions};
use gateway_config::GatewayConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::commands;
use crate::output::OutputFormat;

/// Shortform Studio - short-form shopping video copy from OpenAI or Gemini
#[derive(Parser, Debug)]
#[command(name = "shortform-studio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// TOML configuration file; environment variables override it
    #[arg(short, long, env = "SHORTFORM_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Provider to use (openai, gemini); overrides AI_PROVIDER
    #[arg(short, long, global = true)]
    pub provider: Option<String>,

    /// Model to use instead of the configured one
    #[arg(short = 'M', long, global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a script bundle (script, hook, CTA, thumbnail captions)
    Script(commands::script::ScriptArgs),

    /// Generate Korean/Chinese keywords and Douyin search queries
    Keywords(commands::keywords::KeywordsArgs),

    /// Send a single message and print the raw reply
    Chat(commands::chat::ChatArgs),

    /// Extract the JSON value from a saved model reply
    Extract(commands::extract::ExtractArgs),

    /// Generate shell completions
    Completions(commands::completions::CompletionsArgs),
}

/// Options shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    /// Output format
    pub format: OutputFormat,
    config: Option<PathBuf>,
    provider: Option<String>,
    model: Option<String>,
}

impl Context {
    /// Load configuration from the file (if any) and the environment
    pub fn load_config(&self) -> Result<GatewayConfig> {
        let mut config = match &self.config {
            Some(path) => GatewayConfig::load_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => GatewayConfig::from_env()?,
        };

        if let Some(provider) = &self.provider {
            config.provider = provider.parse()?;
        }

        debug!(provider = %config.provider, "Configuration loaded");

        Ok(config)
    }

    /// Build a gateway for this invocation
    pub fn gateway(&self, options: GatewayOptions) -> Result<Arc<Gateway>> {
        let config = self.load_config()?;
        let options = match &self.model {
            Some(model) => options.model(model.clone()),
            None => options,
        };
        Ok(Arc::new(Gateway::from_config(&config, options)?))
    }
}

impl Cli {
    /// Execute the CLI command.
    pub async fn execute(self) -> Result<()> {
        let ctx = Context {
            format: OutputFormat::from_json_flag(self.json),
            config: self.config,
            provider: self.provider,
            model: self.model,
        };

        match self.command {
            Commands::Script(args) => commands::script::execute(args, &ctx).await,
            Commands::Keywords(args) => commands::keywords::execute(args, &ctx).await,
            Commands::Chat(args) => commands::chat::execute(args, &ctx).await,
            Commands::Extract(args) => commands::extract::execute(args, &ctx),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
