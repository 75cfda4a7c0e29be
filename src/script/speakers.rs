/*!
 * Speaker catalog construction.
 *
 * This module finds the characters of a script:
 * - Pattern-based cue detection ("NAME:", "NAME (", bare "NAME" headings)
 * - Frequency tallying across the whole document
 * - Stop-word and low-frequency filtering
 * - Stable id assignment in descending frequency order
 */

use std::collections::HashMap;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::script::lexicon::Lexicon;
use crate::script::model::Character;

/// Family of speaker cue, in matching precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CueFamily {
    /// "NAME: dialogue"
    Colon,
    /// "NAME (whispering) dialogue"
    Parenthetical,
    /// A line holding only "NAME"
    Heading,
}

/// One entry of the ordered matcher list.
struct CueMatcher {
    family: CueFamily,
    pattern: Regex,
}

/// Matchers evaluated in fixed order; the first match wins for a line.
static CUE_MATCHERS: LazyLock<[CueMatcher; 3]> = LazyLock::new(|| {
    [
        CueMatcher {
            family: CueFamily::Colon,
            pattern: Regex::new(r"^(\p{Lu}[\p{L} ]*):(.*)$").expect("Invalid colon cue regex"),
        },
        CueMatcher {
            family: CueFamily::Parenthetical,
            pattern: Regex::new(r"^(\p{Lu}[\p{L} ]*?)\s+(\(.*)$")
                .expect("Invalid parenthetical cue regex"),
        },
        CueMatcher {
            family: CueFamily::Heading,
            pattern: Regex::new(r"^(\p{Lu}{2,})()$").expect("Invalid heading cue regex"),
        },
    ]
});

/// A speaker cue found at the start of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerCue<'a> {
    pub family: CueFamily,

    /// Captured name, trimmed
    pub name: &'a str,

    /// Text after the cue, trimmed (parenthetical cues keep the opening parenthesis)
    pub remainder: &'a str,
}

/// Match a line against the cue families in precedence order.
pub fn match_cue(line: &str) -> Option<SpeakerCue<'_>> {
    CUE_MATCHERS.iter().find_map(|matcher| {
        matcher.pattern.captures(line).and_then(|caps| {
            let name = caps.get(1)?.as_str().trim();
            let remainder = caps.get(2).map_or("", |m| m.as_str().trim());
            Some(SpeakerCue {
                family: matcher.family,
                name,
                remainder,
            })
        })
    })
}

/// Match only the primary "NAME:" family.
pub fn match_colon_cue(line: &str) -> Option<SpeakerCue<'_>> {
    match_cue(line).filter(|cue| cue.family == CueFamily::Colon)
}

/// Configuration for speaker cataloging.
#[derive(Debug, Clone)]
pub struct SpeakerConfig {
    /// Minimum times a name must appear to be considered a speaker
    pub min_occurrences: usize,

    /// Additional words that are never speaker names
    pub extra_stop_words: Vec<String>,
}

impl Default for SpeakerConfig {
    fn default() -> Self {
        Self {
            min_occurrences: 2,
            extra_stop_words: Vec::new(),
        }
    }
}

impl SpeakerConfig {
    /// Create a lenient config that accepts single mentions.
    pub fn lenient() -> Self {
        Self {
            min_occurrences: 1,
            ..Default::default()
        }
    }
}

/// A cataloged character with the evidence behind it.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub character: Character,

    /// Number of cue lines naming this character
    pub occurrences: usize,

    /// Family of the first cue that named this character
    pub first_family: CueFamily,
}

/// Speaker cataloging statistics.
#[derive(Debug, Clone, Default)]
pub struct SpeakerStats {
    /// Total lines analyzed
    pub lines_analyzed: usize,

    /// Lines matching any cue family
    pub cue_lines: usize,

    /// Cues discarded as too short or stop words
    pub rejected_cues: usize,

    /// Distinct names seen before frequency filtering
    pub unique_candidates: usize,

    /// Names kept in the catalog
    pub retained: usize,
}

/// Characters of one structuring run with name lookup.
#[derive(Debug, Clone, Default)]
pub struct SpeakerCatalog {
    entries: Vec<CatalogEntry>,
    by_name: HashMap<String, usize>,
    /// Entry indices, longest name first
    precedence: Vec<usize>,
}

impl SpeakerCatalog {
    fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let by_name = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (entry.character.name.clone(), index))
            .collect();

        let mut precedence: Vec<usize> = (0..entries.len()).collect();
        precedence.sort_by(|a, b| {
            let len_a = entries[*a].character.name.chars().count();
            let len_b = entries[*b].character.name.chars().count();
            len_b.cmp(&len_a)
        });

        Self {
            entries,
            by_name,
            precedence,
        }
    }

    /// Characters in catalog (frequency) order.
    pub fn characters(&self) -> Vec<Character> {
        self.entries.iter().map(|entry| entry.character.clone()).collect()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&Character> {
        self.by_name.get(name).map(|index| &self.entries[*index].character)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in prefix-matching precedence order.
    pub fn precedence(&self) -> impl Iterator<Item = &str> {
        self.precedence
            .iter()
            .map(|index| self.entries[*index].character.name.as_str())
    }

    /// Find the cataloged name opening the line and followed by a colon.
    ///
    /// Returns the character and the trimmed text after the colon. The longest
    /// matching name wins.
    pub fn match_colon_prefix<'l>(&self, line: &'l str) -> Option<(&Character, &'l str)> {
        self.precedence.iter().find_map(|index| {
            let character = &self.entries[*index].character;
            let rest = line.strip_prefix(character.name.as_str())?;
            let remainder = rest.trim_start().strip_prefix(':')?;
            Some((character, remainder.trim()))
        })
    }
}

/// Running tally for one candidate name.
struct Tally<'a> {
    name: &'a str,
    count: usize,
    first_family: CueFamily,
}

/// Builds a [`SpeakerCatalog`] from normalized lines.
#[derive(Debug)]
pub struct SpeakerCatalogBuilder {
    config: SpeakerConfig,
    lexicon: &'static Lexicon,
}

impl SpeakerCatalogBuilder {
    pub fn new(config: SpeakerConfig, lexicon: &'static Lexicon) -> Self {
        Self { config, lexicon }
    }

    /// Scan all lines, tally cue names and keep the frequent ones.
    pub fn build(&self, lines: &[String]) -> (SpeakerCatalog, SpeakerStats) {
        let mut stats = SpeakerStats {
            lines_analyzed: lines.len(),
            ..Default::default()
        };

        // Tallies kept in first-seen order so the stable sort below breaks ties by it
        let mut tallies: Vec<Tally> = Vec::new();
        let mut tally_index: HashMap<&str, usize> = HashMap::new();

        for line in lines {
            let Some(cue) = match_cue(line) else {
                continue;
            };
            stats.cue_lines += 1;

            if !self.is_acceptable_name(cue.name) {
                stats.rejected_cues += 1;
                continue;
            }

            match tally_index.get(cue.name) {
                Some(index) => tallies[*index].count += 1,
                None => {
                    tally_index.insert(cue.name, tallies.len());
                    tallies.push(Tally {
                        name: cue.name,
                        count: 1,
                        first_family: cue.family,
                    });
                }
            }
        }

        stats.unique_candidates = tallies.len();

        tallies.retain(|tally| tally.count >= self.config.min_occurrences);
        tallies.sort_by(|a, b| b.count.cmp(&a.count));

        let entries: Vec<CatalogEntry> = tallies
            .into_iter()
            .enumerate()
            .map(|(position, tally)| CatalogEntry {
                character: Character {
                    id: (position + 1).to_string(),
                    name: tally.name.to_string(),
                },
                occurrences: tally.count,
                first_family: tally.first_family,
            })
            .collect();

        stats.retained = entries.len();
        debug!(
            "Speaker catalog: {} cue lines, {} rejected, {} candidates, {} retained",
            stats.cue_lines, stats.rejected_cues, stats.unique_candidates, stats.retained
        );

        (SpeakerCatalog::from_entries(entries), stats)
    }

    fn is_acceptable_name(&self, name: &str) -> bool {
        if name.chars().count() <= 1 {
            return false;
        }
        if self.lexicon.is_stop_word(name) {
            return false;
        }
        let lower = name.to_lowercase();
        !self
            .config
            .extra_stop_words
            .iter()
            .any(|stop| stop.trim().to_lowercase() == lower)
    }

    /// Get configuration.
    pub fn config(&self) -> &SpeakerConfig {
        &self.config
    }
}
