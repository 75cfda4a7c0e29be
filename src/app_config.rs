use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::script::{
    CueMode, NormalizerConfig, ScriptStructurer, SpeakerConfig, StructurerConfig, TitleConfig,
};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Script language code (ISO), selects the heuristic lexicon
    #[serde(default = "default_language")]
    pub language: String,

    /// Structuring engine settings
    #[serde(default)]
    pub structuring: StructuringConfig,

    /// Document import settings
    #[serde(default)]
    pub import: ImportConfig,

    /// Rehearsal playback settings
    #[serde(default)]
    pub rehearsal: RehearsalConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Structuring engine settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StructuringConfig {
    /// Minimum cue occurrences for a name to become a character
    #[serde(default = "default_min_occurrences")]
    pub min_occurrences: usize,

    /// Words never accepted as speaker names, on top of the lexicon stop-list
    #[serde(default)]
    pub extra_stop_words: Vec<String>,

    /// Leading lines inspected for a title
    #[serde(default = "default_title_scan_lines")]
    pub title_scan_lines: usize,

    /// Title candidates must be shorter than this
    #[serde(default = "default_max_title_len")]
    pub max_title_len: usize,

    /// Title candidates collected
    #[serde(default = "default_max_title_candidates")]
    pub max_title_candidates: usize,

    /// Cue families that switch speaker while segmenting
    #[serde(default)]
    pub cue_mode: CueMode,

    /// Largest text accepted for structuring, in bytes
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,
}

impl Default for StructuringConfig {
    fn default() -> Self {
        Self {
            min_occurrences: default_min_occurrences(),
            extra_stop_words: Vec::new(),
            title_scan_lines: default_title_scan_lines(),
            max_title_len: default_max_title_len(),
            max_title_candidates: default_max_title_candidates(),
            cue_mode: CueMode::default(),
            max_input_bytes: default_max_input_bytes(),
        }
    }
}

/// Document import settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ImportConfig {
    /// Largest file accepted, in bytes
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,

    /// Warn when imported text does not look like a script
    #[serde(default = "default_true")]
    pub likely_script_gate: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
            likely_script_gate: true,
        }
    }
}

/// Rehearsal playback settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RehearsalConfig {
    /// Speech rate multiplier
    #[serde(default = "default_speech_factor")]
    pub rate: f32,

    /// Speech pitch multiplier
    #[serde(default = "default_speech_factor")]
    pub pitch: f32,

    /// Preferred voice identifier
    #[serde(default)]
    pub voice: Option<String>,

    /// Whether stage directions are read aloud
    #[serde(default)]
    pub read_directions: bool,

    /// Whether scene names are announced
    #[serde(default = "default_true")]
    pub announce_scenes: bool,

    /// Pause per word of the user's own lines, in milliseconds
    #[serde(default = "default_pause_per_word_ms")]
    pub pause_per_word_ms: u64,

    /// Shortest pause for the user's own lines, in milliseconds
    #[serde(default = "default_min_pause_ms")]
    pub min_pause_ms: u64,
}

impl Default for RehearsalConfig {
    fn default() -> Self {
        Self {
            rate: default_speech_factor(),
            pitch: default_speech_factor(),
            voice: None,
            read_directions: false,
            announce_scenes: true,
            pause_per_word_ms: default_pause_per_word_ms(),
            min_pause_ms: default_min_pause_ms(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_language() -> String {
    "it".to_string()
}

fn default_min_occurrences() -> usize {
    2
}

fn default_title_scan_lines() -> usize {
    10
}

fn default_max_title_len() -> usize {
    60
}

fn default_max_title_candidates() -> usize {
    2
}

fn default_max_input_bytes() -> usize {
    crate::script::DEFAULT_MAX_INPUT_BYTES
}

fn default_max_file_bytes() -> u64 {
    3 * 1024 * 1024
}

fn default_speech_factor() -> f32 {
    1.0
}

fn default_pause_per_word_ms() -> u64 {
    350
}

fn default_min_pause_ms() -> u64 {
    800
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a JSON file, creating it with defaults if missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<(Self, bool)> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok((config, false));
        }

        let config = Config::default();
        config.save(path)?;
        Ok((config, true))
    }

    /// Save configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        crate::file_utils::FileManager::write_to_file(path, &config_json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::lexicon_for(&self.language)?;

        let structuring = &self.structuring;
        if structuring.min_occurrences == 0 {
            return Err(anyhow!("structuring.min_occurrences must be at least 1"));
        }
        if structuring.title_scan_lines == 0 {
            return Err(anyhow!("structuring.title_scan_lines must be at least 1"));
        }
        if structuring.max_title_len < 2 {
            return Err(anyhow!("structuring.max_title_len must be at least 2"));
        }
        if structuring.max_input_bytes == 0 {
            return Err(anyhow!("structuring.max_input_bytes must be positive"));
        }

        if self.import.max_file_bytes == 0 {
            return Err(anyhow!("import.max_file_bytes must be positive"));
        }

        let rehearsal = &self.rehearsal;
        if !(rehearsal.rate > 0.0 && rehearsal.rate <= 4.0) {
            return Err(anyhow!("rehearsal.rate must be in (0, 4], got {}", rehearsal.rate));
        }
        if !(rehearsal.pitch > 0.0 && rehearsal.pitch <= 4.0) {
            return Err(anyhow!("rehearsal.pitch must be in (0, 4], got {}", rehearsal.pitch));
        }

        Ok(())
    }

    /// Build the structuring engine described by this configuration
    pub fn structurer(&self) -> Result<ScriptStructurer> {
        let lexicon = crate::language_utils::lexicon_for(&self.language)?;
        let structuring = &self.structuring;

        let config = StructurerConfig {
            normalizer: NormalizerConfig::default(),
            speakers: SpeakerConfig {
                min_occurrences: structuring.min_occurrences,
                extra_stop_words: structuring.extra_stop_words.clone(),
            },
            titles: TitleConfig {
                scan_lines: structuring.title_scan_lines,
                max_len: structuring.max_title_len,
                max_candidates: structuring.max_title_candidates,
            },
            cue_mode: structuring.cue_mode,
            max_input_bytes: structuring.max_input_bytes,
        };

        Ok(ScriptStructurer::new(config, lexicon))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            language: default_language(),
            structuring: StructuringConfig::default(),
            import: ImportConfig::default(),
            rehearsal: RehearsalConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
