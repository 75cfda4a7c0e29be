use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

/// Extensions read as plain text
pub const TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md", "fountain"];

/// Extensions of binary documents whose text must be extracted
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "odt", "rtf", "pages"];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: Output path for a structured script
    // @params: input_file, output_dir, suffix (e.g. "script.json")
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        suffix: &str,
    ) -> PathBuf {
        let stem = input_file.as_ref().file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(suffix);

        output_dir.as_ref().join(output_filename)
    }

    /// Find files with any of the given extensions in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extensions: &[&str]) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && has_extension(path, extensions) {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Classify a file by extension
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> FileType {
        let path = path.as_ref();

        if has_extension(path, TEXT_EXTENSIONS) {
            FileType::PlainText
        } else if has_extension(path, DOCUMENT_EXTENSIONS) {
            FileType::Document
        } else {
            FileType::Unknown
        }
    }

    /// All extensions the importer accepts
    pub fn supported_extensions() -> Vec<&'static str> {
        TEXT_EXTENSIONS.iter().chain(DOCUMENT_EXTENSIONS).copied().collect()
    }
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| extensions.contains(&ext.as_str()))
}

/// Enum representing different file types
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FileType {
    /// Plain text, decoded as UTF-8
    PlainText,
    /// Binary document, text recovered by extraction
    Document,
    /// Unknown file type
    Unknown,
}
