use anyhow::{Context, Result, anyhow};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::import::{DocumentImporter, FileImporter};
use crate::rehearsal::{Rehearsal, RehearsalPlan, RehearsalReport, SpeechEngine, SpeechOptions};
use crate::script::{ScriptStructurer, Script, StructureEstimate, estimate_structure};

// @module: Application controller for script structuring

/// Suffix of structured script files written next to their source
pub const OUTPUT_SUFFIX: &str = "script.json";

/// Outcome of structuring a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Script written to the given path
    Written(PathBuf),
    /// Output already existed and overwrite was not forced
    Skipped(PathBuf),
}

/// Counts for a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Engine built from the configuration
    structurer: ScriptStructurer,

    // @field: Document source
    importer: Box<dyn DocumentImporter>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let importer = Box::new(FileImporter::new(config.import.max_file_bytes));
        Self::with_importer(config, importer)
    }

    /// Create a controller reading documents through a custom importer
    pub fn with_importer(config: Config, importer: Box<dyn DocumentImporter>) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let structurer = config.structurer()?;

        Ok(Self {
            config,
            structurer,
            importer,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Import a document and return its text and file name
    async fn import_text(&self, path: &Path) -> Result<(String, Option<String>), AppError> {
        let result = self.importer.import(path).await;
        Ok(result.into_text()?)
    }

    /// Import and structure one document
    pub async fn structure_file(&self, path: &Path) -> Result<Script> {
        let (text, file_name) = self.import_text(path).await?;

        if self.config.import.likely_script_gate {
            let estimate = estimate_structure(&text);
            if !estimate.is_likely_script {
                warn!(
                    "{} does not look like a script ({} cues, {} names), structuring anyway",
                    path.display(),
                    estimate.dialogue_line_count,
                    estimate.character_count
                );
            }
        }

        let script = self
            .structurer
            .try_structure_with_hint(&text, file_name.as_deref())
            .map_err(AppError::from)?;

        debug!(
            "{}: '{}' with {} characters and {} lines",
            path.display(),
            script.title,
            script.characters.len(),
            script.line_count()
        );

        Ok(script)
    }

    /// Structure a document and write `<stem>.script.json` into the output directory
    pub async fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<RunOutcome> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_path = FileManager::generate_output_path(&input_file, &output_dir, OUTPUT_SUFFIX);
        if output_path.exists() && !force_overwrite {
            warn!("Skipping {:?}, script already exists (use -f to force overwrite)", output_path);
            return Ok(RunOutcome::Skipped(output_path));
        }

        let script = self.structure_file(&input_file).await?;
        let json = script.to_json_pretty().context("Failed to serialize script")?;

        FileManager::ensure_dir(&output_dir)?;
        FileManager::write_to_file(&output_path, &json)?;

        info!(
            "Structured '{}' ({} characters, {} scenes) in {} -> {}",
            script.title,
            script.characters.len(),
            script.scenes.len(),
            Self::format_duration(start_time.elapsed()),
            output_path.display()
        );

        Ok(RunOutcome::Written(output_path))
    }

    /// Structure every supported document under a directory, writing next to each source
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let extensions = FileManager::supported_extensions();
        let documents = FileManager::find_files(&input_dir, &extensions)?;

        if documents.is_empty() {
            return Err(anyhow!("No supported documents found in directory: {:?}", input_dir));
        }

        let folder_pb = ProgressBar::new(documents.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));

        let mut summary = FolderSummary::default();

        for document in &documents {
            let file_name = document.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let output_dir = document.parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| input_dir.clone());

            match self.run(document.clone(), output_dir, force_overwrite).await {
                Ok(RunOutcome::Written(_)) => summary.processed += 1,
                Ok(RunOutcome::Skipped(_)) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    summary.errors += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        info!(
            "Folder processing completed in {}: {} processed, {} skipped, {} errors",
            Self::format_duration(start_time.elapsed()),
            summary.processed,
            summary.skipped,
            summary.errors
        );

        Ok(summary)
    }

    /// Quick script-likeness check of a document
    pub async fn estimate_file(&self, path: &Path) -> Result<StructureEstimate> {
        let (text, _) = self.import_text(path).await?;
        Ok(estimate_structure(&text))
    }

    /// Rehearse a document as the named character
    pub async fn rehearse(
        &self,
        path: &Path,
        character_name: &str,
        engine: &dyn SpeechEngine,
    ) -> Result<RehearsalReport> {
        let script = self.structure_file(path).await?;

        let character = script
            .character_by_name(character_name)
            .ok_or_else(|| AppError::UnknownCharacter(character_name.to_string()))?;
        let plan = RehearsalPlan::build(&script, &character.id, &self.config.rehearsal)?;

        info!(
            "Rehearsing '{}' as {} ({} cues)",
            script.title,
            plan.character().name,
            plan.cues().len()
        );

        let options = SpeechOptions::from_config(&self.config.language, &self.config.rehearsal);
        let report = Rehearsal::new(engine, options).run(&plan).await;

        if report.skipped_failures > 0 {
            warn!("{} cues skipped after speech failures", report.skipped_failures);
        }

        Ok(report)
    }

    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
