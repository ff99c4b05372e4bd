//! Post-processing of raw generator output.
//!
//! The generator is asked for plain text but tends to wrap documents in
//! markdown anyway. Four passes strip the usual artifacts before the text
//! reaches validation or the user: fenced code blocks, stray quote
//! characters at line edges, bold markers, and heading markers.

use std::sync::LazyLock;

use regex::Regex;

static CODE_FENCES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```\w*\n?").unwrap());
static LINE_EDGE_QUOTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^["'`]+|["'`]+$"#).unwrap());
static BOLD_MARKERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*").unwrap());
static HEADING_MARKERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"##\s").unwrap());

/// Strip markdown artifacts from a generated draft and trim surrounding
/// whitespace. Quotes inside a line survive; only line-edge quotes go.
pub fn clean_draft(raw: &str) -> String {
    let cleaned = CODE_FENCES.replace_all(raw, "");
    let cleaned = LINE_EDGE_QUOTES.replace_all(&cleaned, "");
    let cleaned = BOLD_MARKERS.replace_all(&cleaned, "");
    let cleaned = HEADING_MARKERS.replace_all(&cleaned, "");
    cleaned.trim().to_string()
}
