// Decode Errors
//
// Every failure aborts the whole decode; no partial map is returned.

use thiserror::Error;

use crate::vlq::VlqError;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed source map: {0}")]
    MalformedInput(String),
    #[error("unsupported source map version {0}, only version 3 is supported")]
    UnsupportedVersion(u64),
    #[error("unsupported source map feature: {0}")]
    UnsupportedFeature(&'static str),
}

impl DecodeError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        DecodeError::MalformedInput(reason.into())
    }
}

impl From<VlqError> for DecodeError {
    fn from(err: VlqError) -> Self {
        DecodeError::MalformedInput(format!("invalid mappings: {}", err))
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::MalformedInput(format!("invalid JSON: {}", err))
    }
}
