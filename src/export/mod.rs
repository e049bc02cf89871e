//! Export of generated markup as a named file.
//!
//! The core only describes *what* to save; a [`FileSink`] decides where it
//! goes (a directory on disk for the CLI, a browser download for the widget).

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Default name of the exported document.
pub const EXPORT_FILE_NAME: &str = "generated-table.html";

/// MIME type of the exported document.
pub const EXPORT_MIME: &str = "text/html";

/// A file ready to hand to the host's save mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportFile<'a> {
    pub name: &'a str,
    pub mime: &'a str,
    pub contents: &'a str,
}

impl<'a> ExportFile<'a> {
    pub fn html(name: &'a str, contents: &'a str) -> Self {
        Self {
            name,
            mime: EXPORT_MIME,
            contents,
        }
    }
}

/// Host capability that persists an [`ExportFile`].
pub trait FileSink {
    /// # Errors
    /// Returns an error if the host could not store the file.
    fn save(&mut self, file: &ExportFile<'_>) -> Result<()>;
}

/// Writes exported files into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    last_written: Option<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            last_written: None,
        }
    }

    /// Path of the most recent successful save.
    pub fn last_written(&self) -> Option<&Path> {
        self.last_written.as_deref()
    }
}

impl FileSink for DirectorySink {
    fn save(&mut self, file: &ExportFile<'_>) -> Result<()> {
        let path = self.dir.join(file.name);
        fs::write(&path, file.contents)?;
        tracing::info!(path = %path.display(), bytes = file.contents.len(), "exported");
        self.last_written = Some(path);
        Ok(())
    }
}

/// Collects exported files in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub files: Vec<(String, String, String)>,
}

impl FileSink for MemorySink {
    fn save(&mut self, file: &ExportFile<'_>) -> Result<()> {
        self.files.push((
            file.name.to_string(),
            file.mime.to_string(),
            file.contents.to_string(),
        ));
        Ok(())
    }
}
