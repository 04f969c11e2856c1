use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required package part is absent.
    #[error("missing package part: {0}")]
    MissingPart(String),

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("part {part} is not valid UTF-8")]
    Encoding { part: String },
}
