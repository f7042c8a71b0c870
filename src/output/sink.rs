//! File-backed output sink
//!
//! The output file is a flat text file with one content block per line.
//! It is only ever opened in append mode.

use crate::output::traits::{ContentSink, OutputResult};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Creates the output file if it does not exist yet
///
/// Existing files are left untouched. Parent directories are not created.
///
/// # Returns
///
/// * `Ok(true)` - The file was created
/// * `Ok(false)` - The file already existed
/// * `Err(OutputError)` - The file could not be created
pub fn ensure_output_file(path: &Path) -> OutputResult<bool> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => {
            tracing::info!("File {} has been created", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            tracing::info!("File {} already exists", path.display());
            Ok(false)
        }
        Err(e) => {
            tracing::error!("Cannot create file {}: {}", path.display(), e);
            Err(e.into())
        }
    }
}

/// Sink that appends records to a file held open for the whole run
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: File,
}

impl FileSink {
    /// Opens `path` in append mode, creating it if needed
    pub fn open(path: impl AsRef<Path>) -> OutputResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().append(true).create(true).open(&path)?;
        Ok(Self { path, file })
    }

    /// Path of the output file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContentSink for FileSink {
    fn append_line(&mut self, text: &str) -> OutputResult<()> {
        let mut record = String::with_capacity(text.len() + 1);
        record.push_str(text);
        record.push('\n');
        self.file.write_all(record.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.file.flush()?;
        Ok(())
    }
}
