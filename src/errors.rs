use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuestbookError {
    /// The datagram body could not be parsed as a form submission.
    #[error("Malformed submission: {0}")]
    MalformedSubmission(String),

    /// The data file on disk is not a valid JSON document.
    #[error("Data file is not valid JSON: {0}")]
    StoreCorrupt(#[from] serde_json::Error),

    /// Reading or writing the data file failed.
    #[error("Storage I/O error: {0}")]
    StoreIo(#[from] std::io::Error),
}
