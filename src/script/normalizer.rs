/*!
 * Text normalization ahead of structuring.
 *
 * Raw text arrives from clipboard pastes or from byte extraction of binary
 * documents, so it may carry control characters, page breaks, words split
 * across lines and whole pages glued into one line. The normalizer turns it
 * into trimmed, non-empty logical lines in original order.
 */

use std::sync::LazyLock;

use regex::Regex;

/// Runs of any Unicode whitespace, NBSP included.
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// An upper-case speaker cue glued after the end of a sentence, e.g. "... fine. ROMEO: ..."
static INLINE_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[.!?…]\s+(\p{Lu}[\p{Lu} ]*\p{Lu}\s*:)").expect("Invalid inline cue regex")
});

/// A line ending in a word broken by a soft or plain hyphen.
static BROKEN_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{L}([-\u{00AD}])$").expect("Invalid broken word regex"));

/// Configuration for text normalization.
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Split over-long lines before inline speaker cues
    pub rebuild_breaks: bool,

    /// Minimum line length (chars) before inline cues are split out
    pub rebuild_threshold: usize,

    /// Join words broken by a soft hyphen (U+00AD) at a line end
    pub join_soft_hyphens: bool,

    /// Also join words broken by a plain '-'. Off by default: a dash
    /// before a lower-case line is as often a stutter ("io-\nio") as a break.
    pub join_hard_hyphens: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            rebuild_breaks: true,
            rebuild_threshold: 200,
            join_soft_hyphens: true,
            join_hard_hyphens: false,
        }
    }
}

impl NormalizerConfig {
    /// Only clean characters and whitespace; never split or join lines.
    pub fn minimal() -> Self {
        Self {
            rebuild_breaks: false,
            rebuild_threshold: usize::MAX,
            join_soft_hyphens: false,
            join_hard_hyphens: false,
        }
    }
}

/// Turns raw text into logical lines.
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    config: NormalizerConfig,
}

impl TextNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Normalize raw text into trimmed, non-empty lines.
    pub fn normalize(&self, raw: &str) -> Vec<String> {
        let cleaned = clean_characters(raw);
        let mut lines: Vec<String> = Vec::new();

        for raw_line in cleaned.split('\n') {
            let line = collapse_whitespace(raw_line);
            if line.is_empty() {
                continue;
            }

            if self.config.join_soft_hyphens || self.config.join_hard_hyphens {
                if let Some(previous) = lines.last_mut() {
                    if self.joins_broken_word(previous, &line) {
                        previous.pop();
                        previous.push_str(&line);
                        continue;
                    }
                }
            }

            if self.config.rebuild_breaks && line.chars().count() > self.config.rebuild_threshold {
                lines.extend(split_inline_cues(&line));
            } else {
                lines.push(line);
            }
        }

        lines
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    fn joins_broken_word(&self, previous: &str, next: &str) -> bool {
        let Some(hyphen) = BROKEN_WORD.captures(previous).and_then(|caps| caps.get(1)) else {
            return false;
        };
        let enabled = if hyphen.as_str() == "\u{00AD}" {
            self.config.join_soft_hyphens
        } else {
            self.config.join_hard_hyphens
        };
        enabled && next.chars().next().is_some_and(char::is_lowercase)
    }
}

/// Map line separators to '\n', tabs to spaces and drop other control characters.
fn clean_characters(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                cleaned.push('\n');
            }
            '\n' | '\u{000B}' | '\u{000C}' | '\u{2028}' | '\u{2029}' => cleaned.push('\n'),
            '\t' => cleaned.push(' '),
            // BOM and zero-width characters left behind by extraction
            '\u{FEFF}' | '\u{200B}' | '\u{200C}' | '\u{200D}' => {}
            // Soft hyphens only matter at a line end
            '\u{00AD}' => {
                if matches!(chars.peek(), Some('\n' | '\r')) {
                    cleaned.push(c);
                }
            }
            c if c.is_control() => {}
            c => cleaned.push(c),
        }
    }

    cleaned
}

fn collapse_whitespace(line: &str) -> String {
    WHITESPACE_RUN.replace_all(line.trim(), " ").into_owned()
}

/// Split a long line before every inline upper-case speaker cue.
fn split_inline_cues(line: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut start = 0;

    for caps in INLINE_CUE.captures_iter(line) {
        if let Some(cue) = caps.get(1) {
            let piece = line[start..cue.start()].trim();
            if !piece.is_empty() {
                pieces.push(piece.to_string());
            }
            start = cue.start();
        }
    }

    let tail = line[start..].trim();
    if !tail.is_empty() {
        pieces.push(tail.to_string());
    }

    pieces
}
