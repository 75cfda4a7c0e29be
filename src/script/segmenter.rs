/*!
 * Scene segmentation and line attribution.
 *
 * The segmenter walks normalized lines once, opening scenes on act/scene
 * markers and attributing each line to the current speaker, to a new speaker
 * cue, or to stage directions.
 */

use log::debug;
use regex::Regex;

use crate::script::is_all_uppercase;
use crate::script::lexicon::Lexicon;
use crate::script::model::{Line, NO_SPEAKER_ID, Scene};
use crate::script::speakers::{CueFamily, SpeakerCatalog, match_cue};

/// Which speaker cues switch the current speaker during segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueMode {
    /// Only "NAME:" lines
    #[default]
    Colon,
    /// "NAME:", "NAME (" and bare "NAME" heading lines
    All,
}

/// Segmentation statistics.
#[derive(Debug, Clone, Default)]
pub struct SegmentStats {
    pub scenes_opened: usize,
    pub speaker_lines: usize,
    pub merged_lines: usize,
    pub dialogue_lines: usize,
    pub direction_lines: usize,
}

/// Walks normalized lines and emits scenes.
#[derive(Debug)]
pub struct Segmenter<'c> {
    catalog: &'c SpeakerCatalog,
    lexicon: &'static Lexicon,
    scene_marker: Regex,
    cue_mode: CueMode,
}

/// Mutable state of one walk.
struct WalkState {
    scenes: Vec<Scene>,
    current_character: Option<String>,
    line_counter: usize,
    stats: SegmentStats,
}

impl WalkState {
    fn current_scene(&mut self) -> &mut Scene {
        // The implicit first scene is created before the walk and scenes are never removed
        let last = self.scenes.len() - 1;
        &mut self.scenes[last]
    }

    fn push_line(&mut self, character_id: &str, text: &str, is_direction: bool) {
        self.line_counter += 1;
        let id = self.line_counter.to_string();
        let scene = self.current_scene();
        let line = Line {
            id,
            character_id: character_id.to_string(),
            text: text.to_string(),
            scene_id: scene.id.clone(),
            is_direction,
        };
        scene.lines.push(line);

        if is_direction {
            self.stats.direction_lines += 1;
        }
    }

    fn push_direction(&mut self, text: &str) {
        self.push_line(NO_SPEAKER_ID, text, true);
    }
}

impl<'c> Segmenter<'c> {
    pub fn new(catalog: &'c SpeakerCatalog, lexicon: &'static Lexicon, cue_mode: CueMode) -> Self {
        Self {
            catalog,
            lexicon,
            scene_marker: scene_marker_regex(lexicon),
            cue_mode,
        }
    }

    /// Segment lines into scenes. Always returns at least one scene.
    pub fn segment(&self, lines: &[String]) -> (Vec<Scene>, SegmentStats) {
        let mut state = WalkState {
            scenes: vec![Scene::new(1, self.lexicon.first_scene_name)],
            current_character: None,
            line_counter: 0,
            stats: SegmentStats::default(),
        };

        for line in lines {
            if self.is_scene_marker(line) {
                let id = state.scenes.len() + 1;
                state.scenes.push(Scene::new(id, line.as_str()));
                state.stats.scenes_opened += 1;
                continue;
            }

            if self.handle_speaker_cue(&mut state, line) {
                continue;
            }

            self.handle_unprefixed(&mut state, line);
        }

        debug!(
            "Segmented {} lines into {} scenes ({} speaker, {} merged, {} dialogue, {} direction)",
            state.line_counter,
            state.scenes.len(),
            state.stats.speaker_lines,
            state.stats.merged_lines,
            state.stats.dialogue_lines,
            state.stats.direction_lines
        );

        (state.scenes, state.stats)
    }

    /// Whether the line opens a new act or scene.
    pub fn is_scene_marker(&self, line: &str) -> bool {
        self.scene_marker.is_match(line)
    }

    /// Switch speaker on a cataloged cue. Returns false when the line holds no cue.
    fn handle_speaker_cue(&self, state: &mut WalkState, line: &str) -> bool {
        if let Some((character, remainder)) = self.catalog.match_colon_prefix(line) {
            state.current_character = Some(character.id.clone());
            state.stats.speaker_lines += 1;
            if !remainder.is_empty() {
                state.push_line(&character.id, remainder, false);
            }
            return true;
        }

        if self.cue_mode == CueMode::Colon {
            return false;
        }

        let Some(cue) = match_cue(line) else {
            return false;
        };
        let Some(character) = self.catalog.get(cue.name) else {
            return false;
        };

        match cue.family {
            CueFamily::Heading => {
                state.current_character = Some(character.id.clone());
                state.stats.speaker_lines += 1;
                true
            }
            CueFamily::Parenthetical => {
                let (direction, speech) = split_parenthetical(cue.remainder);
                state.current_character = Some(character.id.clone());
                state.stats.speaker_lines += 1;
                if !direction.is_empty() {
                    state.push_direction(direction);
                }
                if !speech.is_empty() {
                    state.push_line(&character.id, speech, false);
                }
                true
            }
            // Colon cues of cataloged names were handled by the prefix match
            CueFamily::Colon => false,
        }
    }

    fn handle_unprefixed(&self, state: &mut WalkState, line: &str) {
        let Some(character_id) = state.current_character.clone() else {
            state.push_direction(line);
            return;
        };

        if self.is_scene_direction(line) {
            state.push_direction(line);
            return;
        }

        if let Some(last) = state.current_scene().lines.last_mut() {
            if last.character_id == character_id && !last.is_direction {
                last.append_text(line);
                state.stats.merged_lines += 1;
                return;
            }
        }

        if looks_like_dialogue(line) {
            state.push_line(&character_id, line, false);
            state.stats.dialogue_lines += 1;
        } else {
            state.push_direction(line);
        }
    }

    /// Whether the line reads as a stage direction.
    pub fn is_scene_direction(&self, line: &str) -> bool {
        is_wrapped(line) || self.lexicon.starts_with_stage_verb(line)
    }
}

/// Build the act/scene marker pattern from the lexicon keywords.
fn scene_marker_regex(lexicon: &Lexicon) -> Regex {
    let keywords = lexicon
        .scene_keywords
        .iter()
        .map(|keyword| regex::escape(keyword))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"(?i)^(?:{})\s+(?:[ivx]+|\d+)\b", keywords);
    Regex::new(&pattern).expect("Invalid scene marker regex")
}

/// Whether the line is fully wrapped in parentheses or square brackets.
fn is_wrapped(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.chars().count() >= 2
        && ((trimmed.starts_with('(') && trimmed.ends_with(')'))
            || (trimmed.starts_with('[') && trimmed.ends_with(']')))
}

/// Check if a line without speaker cue reads as spoken dialogue.
pub fn looks_like_dialogue(line: &str) -> bool {
    let trimmed = line.trim();

    if trimmed.chars().count() < 3 {
        return false;
    }

    if trimmed.ends_with(['.', '!', '?']) {
        return true;
    }

    if trimmed.starts_with('(') {
        return false;
    }

    // Long all-caps lines are headings or technical notes
    if is_all_uppercase(trimmed) && trimmed.chars().count() > 10 {
        return false;
    }

    true
}

/// Split "(aside) text" into the parenthetical and the spoken rest.
fn split_parenthetical(remainder: &str) -> (&str, &str) {
    match remainder.find(')') {
        Some(end) if remainder.starts_with('(') => {
            let (direction, rest) = remainder.split_at(end + 1);
            (direction.trim(), rest.trim())
        }
        _ => ("", remainder.trim()),
    }
}
