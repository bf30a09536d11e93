//! Raw byte-blob strategy.

use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};

use crate::artifact::{content_type, Artifact};
use crate::strategy::{Mismatch, Strategy};

static RAW: Lazy<Strategy<Vec<u8>>> = Lazy::new(build);

/// How many bytes of hex context the diff artifact shows around the first
/// divergence.
const CONTEXT: usize = 16;

/// Strategy for opaque byte blobs: identity serialization, byte equality,
/// SHA-256 fingerprints in the mismatch message.
pub fn raw() -> Strategy<Vec<u8>> {
    RAW.clone()
}

fn build() -> Strategy<Vec<u8>> {
    Strategy::new(
        |bytes: &Vec<u8>| bytes.clone(),
        |bytes| Ok(bytes.to_vec()),
        compare,
    )
}

fn compare(recorded: &Vec<u8>, actual: &Vec<u8>) -> Option<Mismatch> {
    if recorded == actual {
        return None;
    }
    let offset = first_offset(recorded, actual);
    let message = format!(
        "bytes do not match the recorded snapshot \
         (recorded {} bytes, sha256 {}; got {} bytes, sha256 {}; \
         first difference at offset {offset})",
        recorded.len(),
        fingerprint(recorded),
        actual.len(),
        fingerprint(actual),
    );
    Some(
        Mismatch::new(message)
            .with_artifact(Artifact::named(
                "reference",
                content_type::BYTES,
                recorded.clone(),
            ))
            .with_artifact(Artifact::named(
                "failure",
                content_type::BYTES,
                actual.clone(),
            ))
            .with_artifact(Artifact::named(
                "diff",
                content_type::TEXT,
                hex_context(recorded, actual, offset),
            )),
    )
}

fn fingerprint(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

fn first_offset(recorded: &[u8], actual: &[u8]) -> usize {
    recorded
        .iter()
        .zip(actual)
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| recorded.len().min(actual.len()))
}

fn hex_context(recorded: &[u8], actual: &[u8], offset: usize) -> String {
    let start = offset.saturating_sub(CONTEXT / 2);
    format!(
        "-{}\n+{}",
        hex_window(recorded, start),
        hex_window(actual, start)
    )
}

fn hex_window(bytes: &[u8], start: usize) -> String {
    let start = start.min(bytes.len());
    let end = (start + CONTEXT).min(bytes.len());
    let hex: Vec<String> = bytes[start..end]
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect();
    format!("{start:08x}: {}", hex.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_blobs_match() {
        let blob = vec![0u8, 1, 2, 255];
        assert!(raw().compare(&blob, &blob).is_none());
    }

    #[test]
    fn mismatch_reports_offset_and_fingerprints() {
        let recorded = vec![0u8; 32];
        let mut actual = recorded.clone();
        actual[20] = 9;
        let mismatch = raw().compare(&recorded, &actual).expect("blobs differ");
        assert!(mismatch.message.contains("offset 20"));
        assert!(mismatch.message.contains("recorded 32 bytes"));
        // Two distinct 64-char hex fingerprints.
        let hashes: Vec<_> = mismatch
            .message
            .split("sha256 ")
            .skip(1)
            .map(|rest| &rest[..64])
            .collect();
        assert_eq!(hashes.len(), 2);
        assert_ne!(hashes[0], hashes[1]);
    }

    #[test]
    fn length_difference_points_past_the_common_prefix() {
        let recorded = vec![1u8, 2, 3];
        let actual = vec![1u8, 2, 3, 4];
        let mismatch = raw().compare(&recorded, &actual).unwrap();
        assert!(mismatch.message.contains("offset 3"));
    }

    #[test]
    fn diff_artifact_shows_hex_windows() {
        let recorded = vec![0xaau8, 0xbb, 0xcc];
        let actual = vec![0xaau8, 0xdd, 0xcc];
        let mismatch = raw().compare(&recorded, &actual).unwrap();
        let diff = std::str::from_utf8(mismatch.artifacts[2].payload.as_bytes()).unwrap();
        assert!(diff.contains("aa bb cc"));
        assert!(diff.contains("aa dd cc"));
    }

    #[test]
    fn round_trips_identically() {
        let strategy = raw();
        let blob = vec![7u8, 0, 255, 128];
        let decoded = strategy.deserialize(&strategy.serialize(&blob)).unwrap();
        assert_eq!(decoded, blob);
    }
}
