//! Keywords command - Korean/Chinese keywords for Douyin research.

use anyhow::Result;
use clap::Args;
use gateway_client::GatewayOptions;
use shortform_content::{KeywordRequest, KeywordTranslator};

use crate::cli::Context;
use crate::output::{self, CommandResult, OutputFormat};

/// Arguments for the keywords command.
#[derive(Args, Debug)]
pub struct KeywordsArgs {
    /// Product name
    #[arg(long)]
    pub product: String,

    /// Intended viewers
    #[arg(long)]
    pub audience: String,

    /// Tone of voice
    #[arg(long)]
    pub tone: String,

    /// Video style
    #[arg(long)]
    pub style: String,
}

/// Execute the keywords command.
pub async fn execute(args: KeywordsArgs, ctx: &Context) -> Result<()> {
    let translator = KeywordTranslator::new(ctx.gateway(GatewayOptions::default())?);
    let request = KeywordRequest::new(args.product, args.audience, args.tone, args.style);

    let spinner = output::spinner("Translating keywords...", ctx.format);
    let result = translator.translate(&request).await;
    spinner.finish_and_clear();
    let bundle = result?;

    match ctx.format {
        OutputFormat::Json => CommandResult::success(bundle).print(ctx.format),
        OutputFormat::Text => {
            output::section("Korean keywords");
            output::list(&bundle.korean_keywords);
            output::section("Chinese keywords");
            output::list(&bundle.chinese_keywords);
            output::section("Douyin search queries");
            output::list(&bundle.douyin_search_queries);
            Ok(())
        }
    }
}
