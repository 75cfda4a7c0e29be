/*!
 * # Prova - script structuring and rehearsal
 *
 * A Rust library that turns the unstructured text of a theatre script into a
 * structured form: characters, scenes and speaker-attributed lines.
 *
 * ## Features
 *
 * - Text normalization (control characters, broken words, glued speaker cues)
 * - Character discovery from speaker cue frequency
 * - Title inference
 * - Scene segmentation and line attribution with stage direction detection
 * - Quick "is this a script?" estimation
 * - Document import and rehearsal playback through pluggable backends
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `script`: The structuring engine:
 *   - `script::normalizer`: Logical line recovery
 *   - `script::speakers`: Speaker catalog
 *   - `script::title`: Title inference
 *   - `script::segmenter`: Scene and line attribution
 *   - `script::estimate`: Script-likeness check
 *   - `script::lexicon`: Per-language word lists
 * - `import`: Document acquisition
 * - `rehearsal`: Speech playback of a structured script
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod import;
pub mod language_utils;
pub mod rehearsal;
pub mod script;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, ImportError, SpeechError, StructureError};
pub use script::{
    Character, Line, Scene, Script, ScriptStructurer, StructureEstimate, estimate_structure,
    structure, try_structure,
};
