//! Script command - generate a script bundle for one product.

use anyhow::Result;
use clap::Args;
use gateway_client::GatewayOptions;
use serde::Serialize;
use shortform_content::{slugify, ScriptBundle, ScriptRequest, ScriptService};

use crate::cli::Context;
use crate::output::{self, CommandResult, OutputFormat};

/// Arguments for the script command.
#[derive(Args, Debug)]
pub struct ScriptArgs {
    /// Product name
    #[arg(long)]
    pub product: String,

    /// Intended viewers
    #[arg(long)]
    pub audience: String,

    /// Tone of voice
    #[arg(long)]
    pub tone: String,

    /// Video style (review, unboxing, ...)
    #[arg(long)]
    pub style: String,

    /// Output language
    #[arg(long, default_value = "ko")]
    pub language: String,

    /// Brand voice description
    #[arg(long)]
    pub brand_voice: Option<String>,
}

/// Script bundle plus a file-name slug for the product.
#[derive(Debug, Serialize)]
struct ScriptOutput {
    slug: String,
    #[serde(flatten)]
    bundle: ScriptBundle,
}

/// Execute the script command.
pub async fn execute(args: ScriptArgs, ctx: &Context) -> Result<()> {
    let gateway = ctx.gateway(GatewayOptions::default())?;
    let service = ScriptService::new(gateway);

    let request = ScriptRequest {
        product_name: args.product,
        target_audience: args.audience,
        tone: args.tone,
        language: args.language,
        style: args.style,
        brand_voice: args.brand_voice,
    };

    let spinner = output::spinner("Writing script...", ctx.format);
    let result = service.generate_bundle(&request).await;
    spinner.finish_and_clear();

    let out = ScriptOutput {
        slug: slugify(&request.product_name),
        bundle: result?,
    };

    match ctx.format {
        OutputFormat::Json => CommandResult::success(out).print(ctx.format),
        OutputFormat::Text => {
            print_bundle(&out);
            Ok(())
        }
    }
}

fn print_bundle(out: &ScriptOutput) {
    let bundle = &out.bundle;

    output::section("Script");
    output::key_value("Slug", &out.slug);
    output::key_value("Duration", &format!("{}s", bundle.duration_seconds));
    output::key_value("Hook", &bundle.hook);
    output::key_value("CTA", &bundle.cta);
    if !bundle.description.is_empty() {
        output::key_value("Description", &bundle.description);
    }
    println!("\n{}", bundle.script);

    output::section("Talking points");
    output::list(&bundle.talking_points);

    output::section("Thumbnail options");
    output::list(&bundle.thumbnail_options);
}
