use thiserror::Error;

/// Errors surfaced by the collaborator seams and the CLI I/O path.
///
/// The decode engine itself is total: `MrzProcessor::process` always returns
/// a well-shaped `MrzResult` and never propagates one of these.
#[derive(Debug, Error)]
pub enum MrzError {
    #[error("Legacy codepage decode error: {0}")]
    CodepageDecode(String),
    #[error("Transliteration error: {0}")]
    Transliteration(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
