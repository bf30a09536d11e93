//! Structural JSON strategy over `serde_json::Value`.
//!
//! Defined over `Value` rather than arbitrary `Serialize` types so that
//! encoding stays total: rendering a `Value` cannot fail, while encoding an
//! arbitrary type can. Adapt a typed strategy on top with
//! `Strategy::invmap` where the conversion is lossless.

use difference::Changeset;
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::artifact::{content_type, Artifact};
use crate::error::DecodeError;
use crate::strategies::render_line_diff;
use crate::strategy::{Mismatch, Strategy};

static JSON: Lazy<Strategy<Value>> = Lazy::new(build);

/// Strategy for JSON documents: pretty-printed bytes on disk, structural
/// equality on compare, mismatch messages naming the JSON pointer of the
/// first divergence.
pub fn json() -> Strategy<Value> {
    JSON.clone()
}

fn build() -> Strategy<Value> {
    Strategy::new(
        // The alternate flag selects serde_json's pretty printer.
        |value: &Value| format!("{value:#}").into_bytes(),
        |bytes| serde_json::from_slice(bytes).map_err(DecodeError::from),
        compare,
    )
}

fn compare(recorded: &Value, actual: &Value) -> Option<Mismatch> {
    if recorded == actual {
        return None;
    }
    let location = match divergence_pointer(recorded, actual, String::new()) {
        Some(pointer) if !pointer.is_empty() => format!("`{pointer}`"),
        _ => "the document root".to_string(),
    };
    let reference = format!("{recorded:#}");
    let failure = format!("{actual:#}");
    let changeset = Changeset::new(&reference, &failure, "\n");
    let diff = render_line_diff(&changeset.diffs);
    Some(
        Mismatch::new(format!(
            "JSON does not match the recorded snapshot (first difference at {location})"
        ))
        .with_artifact(Artifact::named("reference", content_type::JSON, reference))
        .with_artifact(Artifact::named("failure", content_type::JSON, failure))
        .with_artifact(Artifact::named("diff", content_type::PATCH, diff)),
    )
}

/// JSON pointer (RFC 6901) of the first structural divergence, in the
/// recorded document's key order. `Some("")` means the root values differ
/// in kind.
fn divergence_pointer(recorded: &Value, actual: &Value, path: String) -> Option<String> {
    match (recorded, actual) {
        (Value::Object(old), Value::Object(new)) => {
            for (key, old_value) in old {
                let child = format!("{path}/{}", escape_token(key));
                match new.get(key) {
                    Some(new_value) => {
                        if let Some(found) = divergence_pointer(old_value, new_value, child) {
                            return Some(found);
                        }
                    }
                    None => return Some(child),
                }
            }
            new.keys()
                .find(|key| !old.contains_key(*key))
                .map(|key| format!("{path}/{}", escape_token(key)))
        }
        (Value::Array(old), Value::Array(new)) => {
            for (index, (old_value, new_value)) in old.iter().zip(new).enumerate() {
                if let Some(found) =
                    divergence_pointer(old_value, new_value, format!("{path}/{index}"))
                {
                    return Some(found);
                }
            }
            (old.len() != new.len()).then(|| format!("{path}/{}", old.len().min(new.len())))
        }
        _ => (recorded != actual).then_some(path),
    }
}

fn escape_token(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}
