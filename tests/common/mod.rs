//! Shared fixtures for integration tests.

use keepsake::{content_type, Artifact, DecodeError, Mismatch, Strategy};

/// The smallest useful text strategy: UTF-8 bytes, equality compare, one
/// inline diff artifact on mismatch. Built by hand here to exercise the
/// construction surface the way an external strategy author would.
pub fn plain_text() -> Strategy<String> {
    Strategy::new(
        |text: &String| text.clone().into_bytes(),
        |bytes| String::from_utf8(bytes.to_vec()).map_err(DecodeError::from),
        |recorded: &String, actual: &String| {
            if recorded == actual {
                return None;
            }
            Some(Mismatch::new("doesn't match").with_artifact(Artifact::named(
                "diff",
                content_type::TEXT,
                format!("-{recorded}\n+{actual}"),
            )))
        },
    )
}
