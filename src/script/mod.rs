/*!
 * Script structuring engine.
 *
 * Turns unstructured text into a speaker-annotated, scene-segmented script:
 * - `normalizer`: control character cleanup and logical line recovery
 * - `speakers`: speaker catalog from cue frequency
 * - `title`: title inference
 * - `segmenter`: scene and line attribution state machine
 * - `estimate`: quick "is this a script?" check
 *
 * Every call works on its own catalog and counters, so a `ScriptStructurer`
 * can be shared freely between threads.
 */

pub mod estimate;
pub mod lexicon;
pub mod model;
pub mod normalizer;
pub mod segmenter;
pub mod speakers;
pub mod title;

use log::debug;

use crate::errors::StructureError;

pub use estimate::{StructureEstimate, estimate_structure};
pub use lexicon::Lexicon;
pub use model::{Character, Line, NO_SPEAKER_ID, Scene, Script};
pub use normalizer::{NormalizerConfig, TextNormalizer};
pub use segmenter::{CueMode, Segmenter};
pub use speakers::{SpeakerCatalog, SpeakerCatalogBuilder, SpeakerConfig};
pub use title::{TitleConfig, TitleExtractor};

/// Default cap on input size accepted by [`ScriptStructurer::try_structure`].
pub const DEFAULT_MAX_INPUT_BYTES: usize = 3 * 1024 * 1024;

/// Configuration for a structuring engine.
#[derive(Debug, Clone)]
pub struct StructurerConfig {
    pub normalizer: NormalizerConfig,
    pub speakers: SpeakerConfig,
    pub titles: TitleConfig,
    pub cue_mode: CueMode,
    pub max_input_bytes: usize,
}

impl Default for StructurerConfig {
    fn default() -> Self {
        Self {
            normalizer: NormalizerConfig::default(),
            speakers: SpeakerConfig::default(),
            titles: TitleConfig::default(),
            cue_mode: CueMode::default(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

/// Configured structuring engine.
#[derive(Debug)]
pub struct ScriptStructurer {
    config: StructurerConfig,
    lexicon: &'static Lexicon,
}

impl ScriptStructurer {
    pub fn new(config: StructurerConfig, lexicon: &'static Lexicon) -> Self {
        Self { config, lexicon }
    }

    /// Engine with default configuration and the Italian lexicon.
    pub fn with_defaults() -> Self {
        Self::new(StructurerConfig::default(), &lexicon::ITALIAN)
    }

    /// Structure raw text. Never fails; degenerate input yields a degenerate script.
    pub fn structure(&self, raw: &str) -> Script {
        self.structure_with_hint(raw, None)
    }

    /// Structure raw text, using a source file name as title fallback.
    pub fn structure_with_hint(&self, raw: &str, file_name: Option<&str>) -> Script {
        let lines = TextNormalizer::new(self.config.normalizer.clone()).normalize(raw);
        self.structure_lines(&lines, raw, file_name)
    }

    /// Structure raw text, rejecting blank or oversized input.
    pub fn try_structure(&self, raw: &str) -> Result<Script, StructureError> {
        self.try_structure_with_hint(raw, None)
    }

    /// Checked variant of [`Self::structure_with_hint`].
    pub fn try_structure_with_hint(
        &self,
        raw: &str,
        file_name: Option<&str>,
    ) -> Result<Script, StructureError> {
        if raw.len() > self.config.max_input_bytes {
            return Err(StructureError::InputTooLarge {
                len: raw.len(),
                max: self.config.max_input_bytes,
            });
        }

        let lines = TextNormalizer::new(self.config.normalizer.clone()).normalize(raw);
        if lines.is_empty() {
            return Err(StructureError::BlankInput);
        }

        Ok(self.structure_lines(&lines, raw, file_name))
    }

    fn structure_lines(&self, lines: &[String], raw: &str, file_name: Option<&str>) -> Script {
        let builder = SpeakerCatalogBuilder::new(self.config.speakers.clone(), self.lexicon);
        let (catalog, _) = builder.build(lines);

        let title = TitleExtractor::new(self.config.titles.clone(), self.lexicon.untitled)
            .extract(lines, raw, file_name);

        let (scenes, _) = Segmenter::new(&catalog, self.lexicon, self.config.cue_mode).segment(lines);

        debug!(
            "Structured '{}': {} characters, {} scenes from {} lines",
            title,
            catalog.len(),
            scenes.len(),
            lines.len()
        );

        Script {
            title,
            characters: catalog.characters(),
            scenes,
        }
    }

    pub fn config(&self) -> &StructurerConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &'static Lexicon {
        self.lexicon
    }
}

impl Default for ScriptStructurer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Structure raw text with the default engine.
pub fn structure(raw: &str) -> Script {
    ScriptStructurer::with_defaults().structure(raw)
}

/// Structure raw text with the default engine, rejecting blank or oversized input.
pub fn try_structure(raw: &str) -> Result<Script, StructureError> {
    ScriptStructurer::with_defaults().try_structure(raw)
}

/// True when the text has letters and none of them is lower-case.
pub(crate) fn is_all_uppercase(text: &str) -> bool {
    text.chars().any(char::is_alphabetic) && !text.chars().any(char::is_lowercase)
}
