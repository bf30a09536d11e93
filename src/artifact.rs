//! Failure artifacts: named, content-typed byproducts of a failed
//! comparison, intended for human or tool inspection.
//!
//! Artifacts are pure description. Rendering, disk writing, and
//! test-framework attachment are entirely the responsibility of the
//! surrounding runner; this module stays free of those dependencies so the
//! core stays portable across runner implementations.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Content-type identifiers used by the built-in strategies. Runners match
/// on these to pick a rendering or attachment method; any MIME-like tag is
/// valid, these are merely the common ones.
pub mod content_type {
    pub const TEXT: &str = "text/plain";
    pub const PATCH: &str = "text/x-patch";
    pub const JSON: &str = "application/json";
    pub const BYTES: &str = "application/octet-stream";
    pub const PNG: &str = "image/png";
}

/// The payload of an artifact, deliberately decoupled from the value kind
/// of the strategy that produced it: an image strategy may attach textual
/// diffs, a record strategy may attach a rendered image, and so on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ArtifactPayload {
    Text(String),
    Bytes(Vec<u8>),
}

impl ArtifactPayload {
    /// Raw view of the payload, for attachment writers.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ArtifactPayload::Text(text) => text.as_bytes(),
            ArtifactPayload::Bytes(bytes) => bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl From<String> for ArtifactPayload {
    fn from(text: String) -> Self {
        ArtifactPayload::Text(text)
    }
}

impl From<&str> for ArtifactPayload {
    fn from(text: &str) -> Self {
        ArtifactPayload::Text(text.to_string())
    }
}

impl From<Vec<u8>> for ArtifactPayload {
    fn from(bytes: Vec<u8>) -> Self {
        ArtifactPayload::Bytes(bytes)
    }
}

impl From<&[u8]> for ArtifactPayload {
    fn from(bytes: &[u8]) -> Self {
        ArtifactPayload::Bytes(bytes.to_vec())
    }
}

/// One inspectable byproduct of a failed comparison.
///
/// Artifacts define no equality of their own; if a consumer needs identity
/// it must layer it externally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    /// Display name, e.g. `"reference"`, `"failure"`, `"diff"`. Absent is a
    /// valid, meaningful state; consumers fall back to [`Artifact::label`].
    pub name: Option<String>,
    /// MIME-like tag describing how to interpret the payload when rendered
    /// or attached. Mandatory.
    pub content_type: String,
    /// The payload itself.
    pub payload: ArtifactPayload,
}

impl Artifact {
    /// Creates an unnamed artifact.
    pub fn new(content_type: impl Into<String>, payload: impl Into<ArtifactPayload>) -> Self {
        Self {
            name: None,
            content_type: content_type.into(),
            payload: payload.into(),
        }
    }

    /// Creates a named artifact.
    pub fn named(
        name: impl Into<String>,
        content_type: impl Into<String>,
        payload: impl Into<ArtifactPayload>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            content_type: content_type.into(),
            payload: payload.into(),
        }
    }

    /// The consumer-visible label: the name when present, otherwise the
    /// positional form `artifact-{index}`, where `index` is the artifact's
    /// position in its mismatch report.
    pub fn label(&self, index: usize) -> Cow<'_, str> {
        match &self.name {
            Some(name) => Cow::Borrowed(name.as_str()),
            None => Cow::Owned(format!("artifact-{index}")),
        }
    }
}
