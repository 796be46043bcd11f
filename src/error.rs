//! Error types for module codec operations.

use thiserror::Error;

/// Errors that can occur while reading, writing, or addressing a SWORD module.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration record malformed: {0}")]
    ConfigMalformed(String),

    #[error("module is encrypted (CipherKey present): {0}")]
    EncryptedRefused(String),

    #[error("index corrupt in {file}: {detail}")]
    IndexCorrupt { file: String, detail: String },

    #[error("block decompression failed at offset {offset}: {detail}")]
    DecompressFailed { offset: u64, detail: String },

    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("reference invalid: {0}")]
    ReferenceInvalid(String),

    #[error("unknown versification tradition: {0}")]
    UnknownVersification(String),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
