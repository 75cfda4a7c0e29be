/*!
 * Integration tests for rehearsal playback
 */

use anyhow::Result;
use prova::app_config::{Config, RehearsalConfig};
use prova::app_controller::Controller;
use prova::errors::AppError;
use prova::rehearsal::RehearsalReport;
use crate::common;
use crate::common::mock_speech::MockSpeechEngine;

/// Config with no waiting on the user's lines
fn quick_config(read_directions: bool, announce_scenes: bool) -> Config {
    Config {
        rehearsal: RehearsalConfig {
            read_directions,
            announce_scenes,
            pause_per_word_ms: 0,
            min_pause_ms: 0,
            ..RehearsalConfig::default()
        },
        ..Config::default()
    }
}

/// Test that only the other characters are spoken
#[tokio::test]
async fn test_rehearse_asGiulietta_shouldSpeakRomeoOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_sample_script(temp_dir.path(), "romeo.txt")?;
    let controller = Controller::with_config(quick_config(false, false))?;
    let engine = MockSpeechEngine::default();

    let report = controller.rehearse(&path, "giulietta", &engine).await?;

    assert_eq!(report, RehearsalReport { spoken: 2, awaited: 2, skipped_failures: 0 });
    assert_eq!(engine.spoken(), vec!["Ciao, amore mio. Come stai oggi?", "Eccomi di nuovo."]);
    Ok(())
}

/// Test that scenes and directions are read when enabled
#[tokio::test]
async fn test_rehearse_withDirectionsAndScenes_shouldReadThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_sample_script(temp_dir.path(), "romeo.txt")?;
    let controller = Controller::with_config(quick_config(true, true))?;
    let engine = MockSpeechEngine::default();

    let report = controller.rehearse(&path, "ROMEO", &engine).await?;

    let spoken = engine.spoken();
    assert_eq!(report.awaited, 2);
    assert_eq!(report.spoken, spoken.len());
    assert_eq!(spoken[0], "Scena 1");
    assert!(spoken.contains(&"ATTO II".to_string()));
    assert!(spoken.contains(&"(entra la balia)".to_string()));
    assert!(!spoken.iter().any(|text| text.contains("Ciao, amore mio")));
    Ok(())
}

/// Test that a failing utterance does not stop the rehearsal
#[tokio::test]
async fn test_rehearse_withFailingEngine_shouldContinue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_sample_script(temp_dir.path(), "romeo.txt")?;
    let controller = Controller::with_config(quick_config(false, false))?;
    let engine = MockSpeechEngine::failing_on("Bene, grazie.");
    common::init_test_logging();

    let report = controller.rehearse(&path, "ROMEO", &engine).await?;

    assert_eq!(report.skipped_failures, 1);
    assert_eq!(engine.spoken(), vec!["Finalmente sei qui."]);
    Ok(())
}

/// Test rehearsing as a character that is not in the script
#[tokio::test]
async fn test_rehearse_withUnknownCharacter_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_sample_script(temp_dir.path(), "romeo.txt")?;
    let controller = Controller::with_config(quick_config(false, false))?;
    let engine = MockSpeechEngine::default();

    let error = controller.rehearse(&path, "MERCUZIO", &engine).await.unwrap_err();

    assert!(matches!(
        error.downcast_ref::<AppError>(),
        Some(AppError::UnknownCharacter(name)) if name == "MERCUZIO"
    ));
    assert!(engine.spoken().is_empty());
    Ok(())
}
