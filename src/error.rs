use thiserror::Error;

#[derive(Error, Debug)]
pub enum FondantError {
    /// A response value reached the serializer without a wire mapping.
    /// Unreachable for the two built-in response kinds; a new `Response`
    /// variant must either receive a mapping or surface this.
    #[error("Unsupported response kind: {0}")]
    UnsupportedResponseKind(String),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FondantError>;
