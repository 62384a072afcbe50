use once_cell::sync::Lazy;
use regex::Regex;

static NON_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z\s]").expect("valid regex"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Canonical form of a title or query before embedding.
///
/// Drops everything but ASCII letters and whitespace, lowercases, and
/// collapses whitespace runs to single spaces.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    let letters = NON_LETTER.replace_all(text, "");
    let lowered = letters.to_lowercase();
    WHITESPACE_RUN.replace_all(&lowered, " ").trim().to_string()
}
