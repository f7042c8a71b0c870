//! Output sink trait and error types

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Append-only destination for harvested text blocks
///
/// Implementations must never truncate or reorder what was written before.
pub trait ContentSink {
    /// Appends one record followed by a line terminator
    fn append_line(&mut self, text: &str) -> OutputResult<()>;

    /// Flushes buffered records, if any
    fn flush(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

/// In-memory sink, one element per record
impl ContentSink for Vec<String> {
    fn append_line(&mut self, text: &str) -> OutputResult<()> {
        self.push(text.to_string());
        Ok(())
    }
}
