//! Candidate extraction from free text model output.
//!
//! The system prompt asks for a numbered list and this is the other half
//! of that contract: a line that starts with `<integer>.` starts a
//! candidate, anything else (preambles, notes, blank lines) is dropped.
//! Changing the requested output format means changing this file.

use std::sync::LazyLock;

use regex::Regex;

static NUMBERED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\.").expect("Invalid numbered line regex"));

static NUMBER_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\.\s*").expect("Invalid number marker regex"));

/// Numbered lines of `text` in order, markers kept. No numbered lines
/// means no suggestions, which is not an error.
pub fn parse_candidates(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| NUMBERED_LINE.is_match(line))
        .map(|line| line.trim().to_string())
        .collect()
}

/// Remove the leading `<integer>.` marker from a candidate.
pub fn strip_numbering(candidate: &str) -> String {
    NUMBER_MARKER.replace(candidate, "").trim().to_string()
}
