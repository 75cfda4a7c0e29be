use anyhow::{Result, anyhow};
use isolang::Language;

use crate::script::Lexicon;

/// Language utilities for choosing a script lexicon
///
/// Configuration accepts ISO 639-1 (2-letter) and ISO 639-2 (3-letter) codes;
/// lexicons are keyed by ISO 639-1.

/// Map an ISO 639-2/B code to its ISO 639-2/T form when they differ
fn bibliographic_to_terminology(code: &str) -> &str {
    match code {
        "fre" => "fra",
        "ger" => "deu",
        "dut" => "nld",
        "gre" => "ell",
        "chi" => "zho",
        "cze" => "ces",
        "rum" => "ron",
        "slo" => "slk",
        "wel" => "cym",
        other => other,
    }
}

/// Resolve a language code to an isolang language
pub fn parse_language(code: &str) -> Result<Language> {
    let normalized_code = code.trim().to_lowercase();

    let language = match normalized_code.len() {
        2 => Language::from_639_1(&normalized_code),
        3 => Language::from_639_3(bibliographic_to_terminology(&normalized_code)),
        _ => None,
    };

    language.ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Normalize a language code to ISO 639-1 (2-letter) format
pub fn normalize_to_part1(code: &str) -> Result<String> {
    let language = parse_language(code)?;
    language
        .to_639_1()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("Language has no ISO 639-1 code: {}", code))
}

/// Find the bundled lexicon for a language code
pub fn lexicon_for(code: &str) -> Result<&'static Lexicon> {
    let part1 = normalize_to_part1(code)?;
    Lexicon::for_code(&part1).ok_or_else(|| {
        anyhow!(
            "No script lexicon for language '{}' (available: {})",
            code,
            Lexicon::available_codes().join(", ")
        )
    })
}
