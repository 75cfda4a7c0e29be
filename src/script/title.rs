/*!
 * Title inference from the opening lines of a script.
 */

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::script::is_all_uppercase;

/// A file-name-like token at the very end of the raw text, e.g. "romeo_e_giulietta.pdf".
static TRAILING_FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\p{L}\p{N}_\-]+)\.(?i:pdf|docx?|odt|rtf|txt|pages)\s*$")
        .expect("Invalid file name regex")
});

/// Configuration for title extraction.
#[derive(Debug, Clone)]
pub struct TitleConfig {
    /// Number of leading lines inspected
    pub scan_lines: usize,

    /// Candidates must be shorter than this (chars)
    pub max_len: usize,

    /// Number of candidates collected
    pub max_candidates: usize,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            scan_lines: 10,
            max_len: 60,
            max_candidates: 2,
        }
    }
}

/// Guesses a script title.
#[derive(Debug, Clone)]
pub struct TitleExtractor {
    config: TitleConfig,
    untitled: &'static str,
}

impl TitleExtractor {
    pub fn new(config: TitleConfig, untitled: &'static str) -> Self {
        Self { config, untitled }
    }

    /// Pick a title from the leading lines, falling back to a file name and
    /// finally to the placeholder title.
    pub fn extract(&self, lines: &[String], raw: &str, file_name_hint: Option<&str>) -> String {
        if let Some(title) = self.from_leading_lines(lines) {
            return title;
        }

        file_name_hint
            .and_then(title_from_file_name)
            .or_else(|| {
                TRAILING_FILE_NAME
                    .captures(raw)
                    .and_then(|caps| caps.get(1))
                    .and_then(|stem| title_from_stem(stem.as_str()))
            })
            .unwrap_or_else(|| self.untitled.to_string())
    }

    fn from_leading_lines(&self, lines: &[String]) -> Option<String> {
        let candidates: Vec<&String> = lines
            .iter()
            .take(self.config.scan_lines)
            .filter(|line| self.is_candidate(line))
            .take(self.config.max_candidates)
            .collect();

        let first = candidates.first()?;

        // An all-caps line right after a mixed-case one (author, subtitle) is the real title
        if let Some(second) = candidates.get(1) {
            if is_all_uppercase(second) && !is_all_uppercase(first) {
                return Some(second.to_string());
            }
        }

        Some(first.to_string())
    }

    fn is_candidate(&self, line: &str) -> bool {
        let trimmed = line.trim();
        !trimmed.is_empty() && trimmed.chars().count() < self.config.max_len && !trimmed.contains(':')
    }
}

/// Title from a file name such as "Romeo_e_Giulietta.pdf".
pub fn title_from_file_name(file_name: &str) -> Option<String> {
    let stem = Path::new(file_name.trim()).file_stem()?.to_string_lossy().into_owned();
    title_from_stem(&stem)
}

fn title_from_stem(stem: &str) -> Option<String> {
    let title = stem
        .split(['_', '-'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if title.is_empty() { None } else { Some(title) }
}
