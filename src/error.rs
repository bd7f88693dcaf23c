use thiserror::Error;

/// Errors from the I/O collaborators (ingestion and report writing).
///
/// The index itself is infallible: misses and failed removals come back as
/// sentinel results, never as errors.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
