//! Compound strategies built from field strategies.
//!
//! A strategy for a two-field record is assembled from one strategy per
//! field: the serialized form frames the first field's blob with a
//! little-endian u64 length prefix, and a comparison mismatches exactly
//! when at least one field strategy mismatches. Field labels keep per-field
//! messages and artifacts distinguishable in the merged report.

use crate::artifact::Artifact;
use crate::error::DecodeError;
use crate::strategy::{Mismatch, Strategy};

const LEN_PREFIX: usize = 8;

/// [`fields`] with the default labels `"first"` and `"second"`.
pub fn pair<A, B>(first: Strategy<A>, second: Strategy<B>) -> Strategy<(A, B)>
where
    A: 'static,
    B: 'static,
{
    fields("first", first, "second", second)
}

/// Builds a strategy for `(A, B)` from one labeled strategy per field.
pub fn fields<A, B>(
    label_a: impl Into<String>,
    a: Strategy<A>,
    label_b: impl Into<String>,
    b: Strategy<B>,
) -> Strategy<(A, B)>
where
    A: 'static,
    B: 'static,
{
    let label_a = label_a.into();
    let label_b = label_b.into();

    let serialize = {
        let (a, b) = (a.clone(), b.clone());
        move |value: &(A, B)| {
            let head = a.serialize(&value.0);
            let tail = b.serialize(&value.1);
            let mut out = Vec::with_capacity(LEN_PREFIX + head.len() + tail.len());
            out.extend_from_slice(&(head.len() as u64).to_le_bytes());
            out.extend_from_slice(&head);
            out.extend_from_slice(&tail);
            out
        }
    };

    let deserialize = {
        let (a, b) = (a.clone(), b.clone());
        move |bytes: &[u8]| {
            let Some(prefix) = bytes.get(..LEN_PREFIX) else {
                return Err(DecodeError::Truncated {
                    needed: LEN_PREFIX,
                    found: bytes.len(),
                });
            };
            let mut len_bytes = [0u8; LEN_PREFIX];
            len_bytes.copy_from_slice(prefix);
            let head_len = u64::from_le_bytes(len_bytes) as usize;
            let rest = &bytes[LEN_PREFIX..];
            if rest.len() < head_len {
                return Err(DecodeError::Truncated {
                    needed: LEN_PREFIX + head_len,
                    found: bytes.len(),
                });
            }
            let first = a.deserialize(&rest[..head_len])?;
            let second = b.deserialize(&rest[head_len..])?;
            Ok((first, second))
        }
    };

    let compare = move |recorded: &(A, B), actual: &(A, B)| {
        merge(
            &label_a,
            a.compare(&recorded.0, &actual.0),
            &label_b,
            b.compare(&recorded.1, &actual.1),
        )
    };

    Strategy::new(serialize, deserialize, compare)
}

/// Merges per-field mismatches into one labeled report. Field A's artifacts
/// come before field B's, each keeping its own internal order.
fn merge(
    label_a: &str,
    a: Option<Mismatch>,
    label_b: &str,
    b: Option<Mismatch>,
) -> Option<Mismatch> {
    if a.is_none() && b.is_none() {
        return None;
    }
    let mut message = String::new();
    let mut artifacts = Vec::new();
    for (label, mismatch) in [(label_a, a), (label_b, b)] {
        let Some(mismatch) = mismatch else { continue };
        if !message.is_empty() {
            message.push('\n');
        }
        message.push_str(label);
        message.push_str(": ");
        message.push_str(&mismatch.message);
        artifacts.extend(mismatch.artifacts.into_iter().map(|art| relabel(label, art)));
    }
    Some(Mismatch::new(message).with_artifacts(artifacts))
}

fn relabel(label: &str, mut artifact: Artifact) -> Artifact {
    artifact.name = Some(match artifact.name.take() {
        Some(name) => format!("{label}.{name}"),
        None => label.to_string(),
    });
    artifact
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies;

    fn sample() -> Strategy<(String, Vec<u8>)> {
        pair(strategies::lines(), strategies::raw())
    }

    #[test]
    fn matching_fields_produce_no_mismatch() {
        let value = ("title".to_string(), vec![1, 2, 3]);
        assert!(sample().compare(&value, &value).is_none());
    }

    #[test]
    fn one_differing_field_is_enough() {
        let recorded = ("title".to_string(), vec![1, 2, 3]);
        let actual = ("title".to_string(), vec![1, 2, 4]);
        let mismatch = sample().compare(&recorded, &actual).expect("second field differs");
        assert!(mismatch.message.starts_with("second: "));
        assert!(!mismatch.message.contains("first: "));
    }

    #[test]
    fn both_fields_report_with_labels() {
        let recorded = ("a".to_string(), vec![1]);
        let actual = ("b".to_string(), vec![2]);
        let mismatch = sample().compare(&recorded, &actual).expect("both differ");
        let lines: Vec<_> = mismatch.message.lines().collect();
        assert!(lines[0].starts_with("first: "));
        assert!(lines[1].starts_with("second: "));
    }

    #[test]
    fn artifacts_are_relabeled_per_field() {
        let recorded = ("a".to_string(), vec![1]);
        let actual = ("b".to_string(), vec![2]);
        let mismatch = sample().compare(&recorded, &actual).unwrap();
        let names: Vec<_> = mismatch
            .artifacts
            .iter()
            .map(|artifact| artifact.name.as_deref().unwrap())
            .collect();
        assert_eq!(
            names,
            [
                "first.reference",
                "first.failure",
                "first.diff",
                "second.reference",
                "second.failure",
                "second.diff",
            ]
        );
    }

    #[test]
    fn framing_round_trips() {
        let strategy = sample();
        let value = ("line one\nline two".to_string(), vec![0, 255, 7]);
        let decoded = strategy.deserialize(&strategy.serialize(&value)).unwrap();
        assert!(strategy.compare(&value, &decoded).is_none());
    }

    #[test]
    fn truncated_framing_is_rejected() {
        let strategy = sample();
        let err = strategy.deserialize(&[1, 2, 3]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Truncated {
                needed: LEN_PREFIX,
                found: 3,
            }
        ));

        let mut bytes = strategy.serialize(&("abc".to_string(), vec![9]));
        bytes.truncate(LEN_PREFIX + 1);
        let err = strategy.deserialize(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { .. }));
    }
}
