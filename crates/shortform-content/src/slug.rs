//! Filesystem-friendly names for generated output folders.

use once_cell::sync::Lazy;
use regex::Regex;

const MAX_SLUG_CHARS: usize = 80;
const FALLBACK_SLUG: &str = "output";

#[allow(clippy::expect_used)]
static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").expect("valid regex"));

#[allow(clippy::expect_used)]
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\s]+").expect("valid regex"));

/// Turn product names (Korean, Chinese or English) into a folder-safe slug.
///
/// Punctuation is dropped, runs of whitespace and hyphens become a single
/// `_`, and the result is cut to 80 characters. Empty input yields `"output"`.
#[must_use]
pub fn slugify(value: &str) -> String {
    let value = value.trim();
    let value = DISALLOWED.replace_all(value, "");
    let value = SEPARATORS.replace_all(&value, "_");

    if value.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        value.chars().take(MAX_SLUG_CHARS).collect()
    }
}
