use std::io;

use thiserror::Error;

/// Errors that can occur while converting a glTF document to GLB.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("input is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("failed to serialize rewritten document: {0}")]
    Serialize(serde_json::Error),

    #[error("data URI is missing a ';' content-type delimiter: {uri}")]
    MalformedDataUri { uri: String },

    #[error("data URI payload is not valid base64 ({uri}): {source}")]
    Base64 {
        uri: String,
        source: base64::DecodeError,
    },

    #[error("failed to read resource {uri}: {source}")]
    ResourceNotFound { uri: String, source: io::Error },

    #[error("bufferView references buffer {buffer}, which has no embedded or external data")]
    UnresolvedBuffer { buffer: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
