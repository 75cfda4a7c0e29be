/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use prova::app_config::Config;
use prova::app_controller::{Controller, RunOutcome};
use prova::script::Script;
use crate::common;

/// Test the controller initialization with default config
#[test]
fn test_controller_initialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    assert_eq!(controller.config().language, "it");
    Ok(())
}

/// Test that a single file run writes the structured script
#[tokio::test]
async fn test_controller_run_withTextFile_shouldWriteScriptJson() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_script(temp_dir.path(), "romeo.txt")?;
    let output_dir = temp_dir.path().join("out");
    let controller = Controller::with_config(Config::default())?;

    let outcome = controller.run(input, output_dir.clone(), false).await?;

    let expected_path = output_dir.join("romeo.script.json");
    assert_eq!(outcome, RunOutcome::Written(expected_path.clone()));

    let script: Script = serde_json::from_str(&std::fs::read_to_string(&expected_path)?)?;
    assert_eq!(script.title, "ROMEO E GIULIETTA");
    assert_eq!(script.characters.len(), 2);
    assert_eq!(script.scenes.len(), 3);
    Ok(())
}

/// Test that existing output is kept unless overwrite is forced
#[tokio::test]
async fn test_controller_run_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_script(temp_dir.path(), "romeo.txt")?;
    let existing = common::create_test_file(temp_dir.path(), "romeo.script.json", "{}")?;
    let controller = Controller::with_config(Config::default())?;

    let outcome = controller.run(input.clone(), temp_dir.path().to_path_buf(), false).await?;
    assert_eq!(outcome, RunOutcome::Skipped(existing.clone()));
    assert_eq!(std::fs::read_to_string(&existing)?, "{}");

    let outcome = controller.run(input, temp_dir.path().to_path_buf(), true).await?;
    assert_eq!(outcome, RunOutcome::Written(existing.clone()));
    assert_ne!(std::fs::read_to_string(&existing)?, "{}");
    Ok(())
}

/// Test that a missing input file is an error
#[tokio::test]
async fn test_controller_run_withMissingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(Config::default())?;

    let result = controller
        .run(temp_dir.path().join("assente.txt"), temp_dir.path().to_path_buf(), false)
        .await;

    assert!(result.is_err());
    Ok(())
}

/// Test folder processing with a good file, a blank file and an ignored file
#[tokio::test]
async fn test_controller_runFolder_shouldCountOutcomes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_sample_script(temp_dir.path(), "uno.txt")?;
    common::create_test_file(temp_dir.path(), "vuoto.txt", "   ")?;
    common::create_test_file(temp_dir.path(), "musica.mp3", "not a script")?;
    let controller = Controller::with_config(Config::default())?;
    common::init_test_logging();

    let summary = controller.run_folder(temp_dir.path().to_path_buf(), false).await?;

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.skipped, 0);
    assert!(temp_dir.path().join("uno.script.json").exists());

    let summary = controller.run_folder(temp_dir.path().to_path_buf(), false).await?;
    assert_eq!(summary.skipped, 1);
    Ok(())
}

/// Test that the file name becomes the title when no line qualifies
#[tokio::test]
async fn test_controller_structureFile_withNoTitleLine_shouldUseFileName() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let text = "ROMEO: Uno.\nGIULIETTA: Due.\nROMEO: Tre.\nGIULIETTA: Quattro.";
    let path = common::create_test_file(temp_dir.path(), "sogno_di_una_notte.txt", text)?;
    let controller = Controller::with_config(Config::default())?;

    let script = controller.structure_file(&path).await?;

    assert_eq!(script.title, "sogno di una notte");
    Ok(())
}

/// Test estimating a file
#[test]
fn test_controller_estimateFile_shouldReportCues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_sample_script(temp_dir.path(), "romeo.txt")?;
    let controller = Controller::with_config(Config::default())?;

    let estimate = tokio_test::block_on(controller.estimate_file(&path))?;

    assert_eq!(estimate.dialogue_line_count, 4);
    assert_eq!(estimate.character_names, vec!["ROMEO", "GIULIETTA"]);
    assert!(estimate.is_likely_script);
    Ok(())
}
