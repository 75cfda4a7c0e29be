/*!
 * Structured script model.
 *
 * These types are produced fresh by every structuring run and serialize to
 * camelCase JSON so they can be handed to a player or saved next to the source.
 */

use serde::{Deserialize, Serialize};

/// Character id used for stage directions and lines without a speaker.
///
/// Never present in [`Script::characters`].
pub const NO_SPEAKER_ID: &str = "0";

/// A speaking character recovered from the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Run-scoped identifier ("1", "2", ...)
    pub id: String,

    /// Name as captured from the speaker cue
    pub name: String,
}

/// One utterance or stage direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    /// Sequential id across the whole script, 1-based
    pub id: String,

    /// Speaking character, or [`NO_SPEAKER_ID`]
    pub character_id: String,

    /// Trimmed, whitespace-collapsed text
    pub text: String,

    /// Id of the scene holding this line
    pub scene_id: String,

    /// Whether this line is a stage direction
    #[serde(default)]
    pub is_direction: bool,
}

impl Line {
    /// Whether the line is attributed to a speaking character.
    pub fn has_speaker(&self) -> bool {
        self.character_id != NO_SPEAKER_ID
    }

    pub(crate) fn append_text(&mut self, text: &str) {
        if self.text.is_empty() {
            self.text.push_str(text);
        } else {
            self.text.push(' ');
            self.text.push_str(text);
        }
    }
}

/// An act or scene subdivision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Sequential id, 1-based
    pub id: String,

    /// Marker line that opened the scene, or the implicit scene name
    pub name: String,

    /// Lines in reading order
    #[serde(default)]
    pub lines: Vec<Line>,
}

impl Scene {
    pub fn new(id: usize, name: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            name: name.into(),
            lines: Vec::new(),
        }
    }
}

/// A fully structured script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub title: String,

    /// Characters in descending mention-frequency order
    #[serde(default)]
    pub characters: Vec<Character>,

    /// Scenes in document order; never empty for engine output
    pub scenes: Vec<Scene>,
}

impl Script {
    /// Look up a character by id.
    pub fn character_by_id(&self, id: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Look up a character by name, ignoring case.
    pub fn character_by_name(&self, name: &str) -> Option<&Character> {
        let wanted = name.trim();
        self.characters
            .iter()
            .find(|c| c.name == wanted)
            .or_else(|| {
                let wanted = wanted.to_lowercase();
                self.characters.iter().find(|c| c.name.to_lowercase() == wanted)
            })
    }

    /// Iterate over every line in reading order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.scenes.iter().flat_map(|scene| scene.lines.iter())
    }

    /// Total number of lines across all scenes.
    pub fn line_count(&self) -> usize {
        self.scenes.iter().map(|scene| scene.lines.len()).sum()
    }

    /// Lines spoken by the given character.
    pub fn lines_for<'a>(&'a self, character_id: &'a str) -> impl Iterator<Item = &'a Line> + 'a {
        self.lines().filter(move |line| line.character_id == character_id)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
