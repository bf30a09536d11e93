//! The strategy core: one value bundle holding the three behaviors a
//! snapshot comparison needs (serialize, deserialize, compare), plus the
//! mismatch report a failed comparison produces.
//!
//! A `Strategy` is constructed once per value kind and held for the lifetime
//! of a test-run configuration. It owns no external resources; all fields
//! are immutable shared function values, so a single instance is safe to
//! share across concurrently executing comparisons as long as the supplied
//! functions are themselves free of hidden shared mutable state.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::artifact::Artifact;
use crate::error::DecodeError;

type SerializeFn<V> = Arc<dyn Fn(&V) -> Vec<u8> + Send + Sync>;
type DeserializeFn<V> = Arc<dyn Fn(&[u8]) -> Result<V, DecodeError> + Send + Sync>;
type CompareFn<V> = Arc<dyn Fn(&V, &V) -> Option<Mismatch> + Send + Sync>;

/// The ability to persist, reload, and judge equivalence of values of one
/// kind, independent of how those values are produced.
///
/// Conforming strategies must be reflexive (`compare(x, x)` returns `None`)
/// and must round-trip (`compare(x, deserialize(serialize(x))?)` returns
/// `None` for any value `serialize` encodes without loss). Neither law is
/// enforced by this type; see [`crate::contract`] for reusable checks.
pub struct Strategy<V> {
    serialize: SerializeFn<V>,
    deserialize: DeserializeFn<V>,
    compare: CompareFn<V>,
}

impl<V> Strategy<V> {
    /// Creates a strategy from its three behaviors, in persistence order.
    /// All three are mandatory: a strategy that cannot serialize or
    /// deserialize cannot support snapshot storage, and one that cannot
    /// compare cannot detect regressions.
    pub fn new<S, D, C>(serialize: S, deserialize: D, compare: C) -> Self
    where
        S: Fn(&V) -> Vec<u8> + Send + Sync + 'static,
        D: Fn(&[u8]) -> Result<V, DecodeError> + Send + Sync + 'static,
        C: Fn(&V, &V) -> Option<Mismatch> + Send + Sync + 'static,
    {
        Self {
            serialize: Arc::new(serialize),
            deserialize: Arc::new(deserialize),
            compare: Arc::new(compare),
        }
    }

    /// Encodes a value for snapshot storage. Deterministic for a given
    /// input; the produced bytes are opaque to everything but
    /// [`Strategy::deserialize`] of the same instance.
    pub fn serialize(&self, value: &V) -> Vec<u8> {
        (self.serialize)(value)
    }

    /// Decodes previously stored bytes back into a value.
    ///
    /// Accepts any output of [`Strategy::serialize`] from the same instance.
    /// Bytes from any other source (a stale or corrupted snapshot file) may
    /// fail with a [`DecodeError`]; decoding never panics.
    pub fn deserialize(&self, bytes: &[u8]) -> Result<V, DecodeError> {
        (self.deserialize)(bytes)
    }

    /// Judges two values for equivalence. `None` means they match; `Some`
    /// carries a self-contained human-readable message and zero or more
    /// ordered artifacts describing the failure.
    pub fn compare(&self, recorded: &V, actual: &V) -> Option<Mismatch> {
        (self.compare)(recorded, actual)
    }

    /// Adapts this strategy to another value kind via a conversion pair.
    ///
    /// `into` maps the new kind onto this strategy's kind for encoding and
    /// comparison; `from` maps decoded values back. Both directions must be
    /// lossless with respect to `compare`, or the round-trip law breaks for
    /// the adapted strategy.
    pub fn invmap<U, I, F>(self, into: I, from: F) -> Strategy<U>
    where
        V: 'static,
        I: Fn(&U) -> V + Send + Sync + 'static,
        F: Fn(V) -> U + Send + Sync + 'static,
    {
        let into = Arc::new(into);
        let into_cmp = Arc::clone(&into);
        let Self {
            serialize,
            deserialize,
            compare,
        } = self;
        Strategy {
            serialize: Arc::new(move |value: &U| serialize(&into(value))),
            deserialize: Arc::new(move |bytes: &[u8]| deserialize(bytes).map(&from)),
            compare: Arc::new(move |recorded: &U, actual: &U| {
                compare(&into_cmp(recorded), &into_cmp(actual))
            }),
        }
    }
}

impl<V> Clone for Strategy<V> {
    fn clone(&self) -> Self {
        Self {
            serialize: Arc::clone(&self.serialize),
            deserialize: Arc::clone(&self.deserialize),
            compare: Arc::clone(&self.compare),
        }
    }
}

impl<V> fmt::Debug for Strategy<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategy").finish_non_exhaustive()
    }
}

/// The report a strategy returns when two values do not match: a
/// human-readable summary plus ordered supplementary artifacts.
///
/// Artifact order is meaningful (a reference payload before the failing one
/// before a diff, for example) and must be preserved by any consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mismatch {
    /// Self-contained summary of why the values differ. Conforming
    /// strategies never leave this empty.
    pub message: String,
    /// Supplementary byproducts for human or tool inspection, in order.
    pub artifacts: Vec<Artifact>,
}

impl Mismatch {
    /// Creates a mismatch with the given message and no artifacts.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            artifacts: Vec::new(),
        }
    }

    /// Appends one artifact, preserving insertion order.
    pub fn with_artifact(mut self, artifact: Artifact) -> Self {
        self.artifacts.push(artifact);
        self
    }

    /// Appends several artifacts, preserving their order.
    pub fn with_artifacts(mut self, artifacts: impl IntoIterator<Item = Artifact>) -> Self {
        self.artifacts.extend(artifacts);
        self
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
