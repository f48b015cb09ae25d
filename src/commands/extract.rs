//! Extract command - run the JSON normalizer over a saved reply.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::cli::Context;
use crate::output::{self, CommandResult, OutputFormat};

/// Arguments for the extract command.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// File holding the reply text (reads stdin if omitted or `-`)
    pub file: Option<PathBuf>,
}

/// Execute the extract command.
pub fn execute(args: ExtractArgs, ctx: &Context) -> Result<()> {
    let text = super::read_input(args.file.as_deref())?;
    let value = gateway_normalizer::extract(&text)?;

    match ctx.format {
        OutputFormat::Json => CommandResult::success(&value).print(ctx.format),
        OutputFormat::Text => {
            output::success(&format!(
                "Extracted JSON {}",
                gateway_normalizer::value_type(&value)
            ));
            output::json(&value)
        }
    }
}
