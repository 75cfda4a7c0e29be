/*!
 * Document acquisition.
 *
 * Importers turn a source (file, clipboard, ...) into raw text for the
 * structuring engine and report failures through a uniform result shape.
 * Binary documents are handled by a best-effort printable-run extractor;
 * real format parsing is left to dedicated tools.
 */

use std::fmt::Debug;
use std::path::Path;

use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::ImportError;
use crate::file_utils::{FileManager, FileType};

/// Minimum length of a printable run kept by [`extract_text_from_bytes`].
const MIN_PRINTABLE_RUN: usize = 4;

/// Outcome of an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ImportResult {
    pub fn ok(text: String, file_name: Option<String>) -> Self {
        Self {
            success: true,
            text: Some(text),
            file_name,
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            text: None,
            file_name: None,
            message: Some(message.into()),
        }
    }

    /// Convert into the imported text, or an error carrying the failure message.
    pub fn into_text(self) -> Result<(String, Option<String>), ImportError> {
        match (self.success, self.text) {
            (true, Some(text)) => Ok((text, self.file_name)),
            _ => Err(ImportError::Unreadable(
                self.message.unwrap_or_else(|| "import failed".to_string()),
            )),
        }
    }
}

impl From<ImportError> for ImportResult {
    fn from(error: ImportError) -> Self {
        Self::failure(error.to_string())
    }
}

/// Source of raw script text.
#[async_trait]
pub trait DocumentImporter: Send + Sync + Debug {
    /// Import the document at `path`. Failures are reported in the result.
    async fn import(&self, path: &Path) -> ImportResult;
}

/// Imports plain text and binary documents from the file system.
#[derive(Debug, Clone)]
pub struct FileImporter {
    max_file_bytes: u64,
}

impl FileImporter {
    pub fn new(max_file_bytes: u64) -> Self {
        Self { max_file_bytes }
    }

    async fn read_text(&self, path: &Path) -> Result<String, ImportError> {
        let display = path.display().to_string();

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| ImportError::from_io(&e, &display))?;
        if !metadata.is_file() {
            return Err(ImportError::NotFound(display));
        }
        if metadata.len() > self.max_file_bytes {
            return Err(ImportError::TooLarge {
                size: metadata.len(),
                max: self.max_file_bytes,
            });
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ImportError::from_io(&e, &display))?;

        let text = match FileManager::detect_file_type(path) {
            FileType::Document => extract_text_from_bytes(&bytes),
            FileType::PlainText => String::from_utf8_lossy(&bytes).into_owned(),
            FileType::Unknown => {
                warn!("Unknown file type for {}, reading as text", display);
                String::from_utf8_lossy(&bytes).into_owned()
            }
        };

        if text.trim().is_empty() {
            return Err(ImportError::Empty);
        }

        debug!("Imported {} chars from {}", text.chars().count(), display);
        Ok(text)
    }
}

#[async_trait]
impl DocumentImporter for FileImporter {
    async fn import(&self, path: &Path) -> ImportResult {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());

        match self.read_text(path).await {
            Ok(text) => ImportResult::ok(text, file_name),
            Err(error) => error.into(),
        }
    }
}

/// Recover readable text from document bytes.
///
/// Keeps runs of at least four printable characters (after lossy UTF-8
/// decoding) and joins them with newlines. Output is noisy by nature and is
/// meant to be gated with the structure estimator.
pub fn extract_text_from_bytes(bytes: &[u8]) -> String {
    let decoded = String::from_utf8_lossy(bytes);
    let mut runs: Vec<String> = Vec::new();
    let mut current = String::new();

    for c in decoded.chars() {
        let printable = (!c.is_control() && c != char::REPLACEMENT_CHARACTER) || c == '\n';
        if printable {
            current.push(c);
            continue;
        }
        flush_run(&mut current, &mut runs);
    }
    flush_run(&mut current, &mut runs);

    runs.join("\n")
}

fn flush_run(current: &mut String, runs: &mut Vec<String>) {
    if current.trim().chars().count() >= MIN_PRINTABLE_RUN {
        runs.push(current.trim().to_string());
    }
    current.clear();
}
