/*!
 * Common test utilities for the prova test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// Re-export the mock speech engine module
pub mod mock_speech;

/// Two-act excerpt with a title, an author line and a stage direction
pub const SAMPLE_SCRIPT: &str = "ROMEO E GIULIETTA
di William Shakespeare

ATTO I
ROMEO: Ciao, amore mio.
Come stai oggi?
GIULIETTA: Bene, grazie.
(entra la balia)
ATTO II
ROMEO: Eccomi di nuovo.
GIULIETTA: Finalmente sei qui.
";

/// Text with no speaker cue at all
pub const PROSE: &str = "Era una notte buia e tempestosa.
Il vento soffiava forte sulle colline.
Nessuno parlava.";

/// Routes library logs to the test output; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates the sample script file for testing
pub fn create_sample_script(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_SCRIPT)
}
