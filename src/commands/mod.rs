//! CLI command implementations.

pub mod chat;
pub mod completions;
pub mod extract;
pub mod keywords;
pub mod script;

use anyhow::{Context as _, Result};
use std::io::{self, Read};
use std::path::Path;

/// Read `path`, or stdin when no path (or `-`) is given.
pub(crate) fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("reading stdin")?;
            Ok(input)
        }
    }
}
