/*!
 * Language-specific tables used by the structuring heuristics.
 *
 * The heuristics were tuned on Italian play scripts; the English tables are a
 * best-effort counterpart. Scene keywords for both languages are recognized
 * by either lexicon since translated scripts routinely mix them.
 */

/// Heuristic vocabulary for one script language.
#[derive(Debug)]
pub struct Lexicon {
    /// ISO 639-1 code
    pub code: &'static str,

    /// Words that look like speaker cues but never are (compared case-insensitively)
    pub stop_words: &'static [&'static str],

    /// Line openings that mark a stage action (compared case-insensitively)
    pub stage_verbs: &'static [&'static str],

    /// Act/scene keywords that open a new scene when followed by a numeral
    pub scene_keywords: &'static [&'static str],

    /// Title used when nothing better is found
    pub untitled: &'static str,

    /// Name of the implicit scene open before any marker
    pub first_scene_name: &'static str,
}

pub static ITALIAN: Lexicon = Lexicon {
    code: "it",
    stop_words: &[
        "e", "o", "ma", "se", "il", "lo", "la", "le", "gli", "un", "una", "di", "da", "in",
        "con", "su", "per", "tra", "fra", "che", "non", "si", "no", "ah", "oh", "eh", "poi",
        "atto", "scena", "quadro", "buio", "fine", "sipario", "pausa", "nota", "personaggi",
        "interpreti", "entra", "esce", "act", "scene", "end",
    ],
    stage_verbs: &[
        "entra", "entrano", "rientra", "esce", "escono", "si alza", "si alzano", "si siede",
        "si siedono", "siede", "enter", "exit", "exeunt",
    ],
    scene_keywords: &["atto", "scena", "quadro", "act", "scene"],
    untitled: "Copione senza titolo",
    first_scene_name: "Scena 1",
};

pub static ENGLISH: Lexicon = Lexicon {
    code: "en",
    stop_words: &[
        "a", "an", "the", "and", "but", "or", "of", "to", "in", "on", "at", "it", "is", "no",
        "oh", "ah", "so", "then", "act", "scene", "end", "curtain", "blackout", "pause",
        "note", "cast", "characters", "enter", "exit", "exeunt", "fade", "cut", "atto", "scena",
    ],
    stage_verbs: &[
        "enter", "enters", "exit", "exits", "exeunt", "stands", "stand", "sits", "sit",
        "rises",
    ],
    scene_keywords: &["act", "scene", "atto", "scena"],
    untitled: "Untitled script",
    first_scene_name: "Scene 1",
};

static LEXICONS: [&Lexicon; 2] = [&ITALIAN, &ENGLISH];

impl Lexicon {
    /// Find the lexicon for an ISO 639-1 code.
    pub fn for_code(code: &str) -> Option<&'static Lexicon> {
        let code = code.trim().to_lowercase();
        LEXICONS.iter().copied().find(|lexicon| lexicon.code == code)
    }

    /// Codes of every bundled lexicon.
    pub fn available_codes() -> Vec<&'static str> {
        LEXICONS.iter().map(|lexicon| lexicon.code).collect()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        let lower = word.trim().to_lowercase();
        self.stop_words.iter().any(|stop| *stop == lower)
    }

    /// Whether the line opens with one of the stage verbs as a whole word.
    pub fn starts_with_stage_verb(&self, line: &str) -> bool {
        let lower = line.trim_start().to_lowercase();
        self.stage_verbs.iter().any(|verb| {
            lower.strip_prefix(verb).is_some_and(|rest| {
                rest.chars().next().is_none_or(|c| !c.is_alphanumeric())
            })
        })
    }
}
