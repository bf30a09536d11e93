//! Decode failures for stored snapshots.
//!
//! Serialization and comparison are total; decoding is the one place where
//! outside data enters (a snapshot file recorded by an earlier run, possibly
//! stale or corrupted), so it gets an explicit error channel instead of a
//! silent-success convention. A semantic mismatch is not an error and never
//! appears here; it is reported through `Strategy::compare`.

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Why previously stored snapshot bytes failed to decode.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("snapshot bytes are not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("snapshot bytes are not valid JSON")]
    Json(#[from] serde_json::Error),

    #[error("snapshot ends early: needed {needed} bytes, found {found}")]
    Truncated { needed: usize, found: usize },

    #[error("malformed snapshot: {0}")]
    Malformed(String),
}

impl Diagnostic for DecodeError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self {
            DecodeError::Utf8(_) => "keepsake::decode::utf8",
            DecodeError::Json(_) => "keepsake::decode::json",
            DecodeError::Truncated { .. } => "keepsake::decode::truncated",
            DecodeError::Malformed(_) => "keepsake::decode::malformed",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "the stored snapshot no longer decodes with this strategy; \
             delete the snapshot and re-record it",
        ))
    }
}
