// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NamesListError>;

/// Everything that can abort building a language's tables.
///
/// Malformed lines are not errors: the parser skips them and keeps going.
#[derive(Debug, Error)]
pub enum NamesListError {
    #[error("Cannot find {}. Please copy it from\n\t{hint}", file.display())]
    MissingInput {
        file: PathBuf,
        hint: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Out of memory while growing {what}")]
    OutOfMemory { what: &'static str },

    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to (de)serialize tables JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bad tables: {0}")]
    BadTables(String),

    #[error("invalid Unicode codepoint: U+{0:X}")]
    InvalidCodepoint(u32),
}

