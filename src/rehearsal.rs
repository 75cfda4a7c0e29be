/*!
 * Rehearsal playback.
 *
 * A rehearsal reads every other character's lines through a speech engine
 * and leaves a silent pause for the lines of the character the user plays.
 */

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use log::{info, warn};

use crate::app_config::RehearsalConfig;
use crate::errors::{AppError, SpeechError};
use crate::script::{Character, Script};

/// Voice parameters passed with every utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechOptions {
    /// ISO 639-1 language code
    pub language: String,
    pub rate: f32,
    pub pitch: f32,
    pub voice: Option<String>,
}

impl SpeechOptions {
    pub fn from_config(language: &str, config: &RehearsalConfig) -> Self {
        Self {
            language: language.to_string(),
            rate: config.rate,
            pitch: config.pitch,
            voice: config.voice.clone(),
        }
    }
}

/// Text-to-speech backend.
///
/// The returned future completes once the utterance has finished.
#[async_trait]
pub trait SpeechEngine: Send + Sync + Debug {
    async fn speak(&self, text: &str, options: &SpeechOptions) -> Result<(), SpeechError>;
}

/// Speech engine that writes utterances to the log instead of audio.
#[derive(Debug, Default, Clone)]
pub struct LogSpeechEngine;

#[async_trait]
impl SpeechEngine for LogSpeechEngine {
    async fn speak(&self, text: &str, options: &SpeechOptions) -> Result<(), SpeechError> {
        info!("[{} x{:.1}] {}", options.language, options.rate, text);
        Ok(())
    }
}

/// One step of a rehearsal.
#[derive(Debug, Clone, PartialEq)]
pub enum Cue {
    /// Scene announcement
    Scene { name: String },
    /// A line read by the speech engine
    Speak {
        line_id: String,
        character: String,
        text: String,
    },
    /// A stage direction read by the speech engine
    Direction { line_id: String, text: String },
    /// The user's own line: stay silent for `pause`
    Await {
        line_id: String,
        text: String,
        pause: Duration,
    },
}

/// Ordered cues for one character's rehearsal.
#[derive(Debug, Clone)]
pub struct RehearsalPlan {
    character: Character,
    cues: Vec<Cue>,
}

impl RehearsalPlan {
    /// Build the cue list for the user playing `character_id`.
    pub fn build(
        script: &Script,
        character_id: &str,
        config: &RehearsalConfig,
    ) -> Result<Self, AppError> {
        let character = script
            .character_by_id(character_id)
            .cloned()
            .ok_or_else(|| AppError::UnknownCharacter(character_id.to_string()))?;

        let mut cues = Vec::new();
        for scene in &script.scenes {
            if config.announce_scenes {
                cues.push(Cue::Scene {
                    name: scene.name.clone(),
                });
            }

            for line in &scene.lines {
                if line.is_direction || !line.has_speaker() {
                    if config.read_directions {
                        cues.push(Cue::Direction {
                            line_id: line.id.clone(),
                            text: line.text.clone(),
                        });
                    }
                } else if line.character_id == character.id {
                    cues.push(Cue::Await {
                        line_id: line.id.clone(),
                        text: line.text.clone(),
                        pause: pause_for(&line.text, config),
                    });
                } else {
                    let speaker = script
                        .character_by_id(&line.character_id)
                        .map(|c| c.name.clone())
                        .unwrap_or_default();
                    cues.push(Cue::Speak {
                        line_id: line.id.clone(),
                        character: speaker,
                        text: line.text.clone(),
                    });
                }
            }
        }

        Ok(Self { character, cues })
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }
}

/// Silence left for a line of `text`.
pub fn pause_for(text: &str, config: &RehearsalConfig) -> Duration {
    let words = text.split_whitespace().count() as u64;
    Duration::from_millis(config.min_pause_ms.max(words.saturating_mul(config.pause_per_word_ms)))
}

/// Summary of a finished rehearsal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RehearsalReport {
    pub spoken: usize,
    pub awaited: usize,
    pub skipped_failures: usize,
}

/// Plays a [`RehearsalPlan`] through a speech engine.
#[derive(Debug)]
pub struct Rehearsal<'e> {
    engine: &'e dyn SpeechEngine,
    options: SpeechOptions,
}

impl<'e> Rehearsal<'e> {
    pub fn new(engine: &'e dyn SpeechEngine, options: SpeechOptions) -> Self {
        Self { engine, options }
    }

    /// Play every cue in order. A failed utterance is logged and skipped.
    pub async fn run(&self, plan: &RehearsalPlan) -> RehearsalReport {
        let mut report = RehearsalReport::default();

        for cue in plan.cues() {
            let text = match cue {
                Cue::Scene { name } => name,
                Cue::Speak { text, .. } | Cue::Direction { text, .. } => text,
                Cue::Await { pause, .. } => {
                    report.awaited += 1;
                    tokio::time::sleep(*pause).await;
                    continue;
                }
            };

            match self.engine.speak(text, &self.options).await {
                Ok(()) => report.spoken += 1,
                Err(e) => {
                    warn!("Skipping cue after speech failure: {}", e);
                    report.skipped_failures += 1;
                }
            }
        }

        report
    }
}
