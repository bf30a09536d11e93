//! Line-oriented UTF-8 text strategy.

use difference::{Changeset, Difference};
use once_cell::sync::Lazy;
use unicode_segmentation::UnicodeSegmentation;

use crate::artifact::{content_type, Artifact};
use crate::error::DecodeError;
use crate::strategies::render_line_diff;
use crate::strategy::{Mismatch, Strategy};

static LINES: Lazy<Strategy<String>> = Lazy::new(build);

/// Strategy for plain text: UTF-8 bytes on disk, line-level diffs on
/// mismatch. Decoding rejects non-UTF-8 snapshot bytes.
pub fn lines() -> Strategy<String> {
    LINES.clone()
}

fn build() -> Strategy<String> {
    Strategy::new(
        |text: &String| text.clone().into_bytes(),
        |bytes| String::from_utf8(bytes.to_vec()).map_err(DecodeError::from),
        compare,
    )
}

fn compare(recorded: &String, actual: &String) -> Option<Mismatch> {
    if recorded == actual {
        return None;
    }
    let changeset = Changeset::new(recorded, actual, "\n");
    let (insertions, deletions) = edit_counts(&changeset.diffs);
    let (line, column) = first_divergence(recorded, actual);
    let message = format!(
        "text does not match the recorded snapshot \
         ({insertions} inserted line(s), {deletions} removed line(s), \
         first difference at line {line}, column {column})"
    );
    Some(
        Mismatch::new(message)
            .with_artifact(Artifact::named(
                "reference",
                content_type::TEXT,
                recorded.as_str(),
            ))
            .with_artifact(Artifact::named(
                "failure",
                content_type::TEXT,
                actual.as_str(),
            ))
            .with_artifact(Artifact::named(
                "diff",
                content_type::PATCH,
                render_line_diff(&changeset.diffs),
            )),
    )
}

fn edit_counts(diffs: &[Difference]) -> (usize, usize) {
    let mut insertions = 0;
    let mut deletions = 0;
    for diff in diffs {
        match diff {
            Difference::Add(block) => insertions += block.lines().count().max(1),
            Difference::Rem(block) => deletions += block.lines().count().max(1),
            Difference::Same(_) => {}
        }
    }
    (insertions, deletions)
}

/// First differing position as 1-based line and grapheme column. Byte
/// offsets misreport columns for multi-byte text, so columns count
/// extended grapheme clusters.
fn first_divergence(recorded: &str, actual: &str) -> (usize, usize) {
    let mut recorded_lines = recorded.lines();
    let mut actual_lines = actual.lines();
    let mut line = 1;
    loop {
        match (recorded_lines.next(), actual_lines.next()) {
            (Some(old), Some(new)) if old == new => line += 1,
            (Some(old), Some(new)) => return (line, first_column(old, new)),
            _ => return (line, 1),
        }
    }
}

fn first_column(old: &str, new: &str) -> usize {
    let mut column = 1;
    let mut old_graphemes = old.graphemes(true);
    let mut new_graphemes = new.graphemes(true);
    loop {
        match (old_graphemes.next(), new_graphemes.next()) {
            (Some(a), Some(b)) if a == b => column += 1,
            _ => return column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_text_matches() {
        let text = "one\ntwo\nthree".to_string();
        assert!(lines().compare(&text, &text).is_none());
    }

    #[test]
    fn mismatch_reports_position_and_counts() {
        let recorded = "one\ntwo\nthree".to_string();
        let actual = "one\ntwine\nthree".to_string();
        let mismatch = lines().compare(&recorded, &actual).expect("texts differ");
        assert!(mismatch.message.contains("line 2"));
        assert!(mismatch.message.contains("column 3"));
        assert!(mismatch.message.contains("1 inserted line(s)"));
        assert!(mismatch.message.contains("1 removed line(s)"));
    }

    #[test]
    fn artifacts_come_in_reference_failure_diff_order() {
        let mismatch = lines()
            .compare(&"a".to_string(), &"b".to_string())
            .unwrap();
        let names: Vec<_> = mismatch
            .artifacts
            .iter()
            .map(|artifact| artifact.name.as_deref().unwrap())
            .collect();
        assert_eq!(names, ["reference", "failure", "diff"]);
        assert_eq!(mismatch.artifacts[2].content_type, content_type::PATCH);
        assert_eq!(mismatch.artifacts[2].payload.as_bytes(), b"-a\n+b");
    }

    #[test]
    fn grapheme_columns_survive_multibyte_text() {
        let recorded = "héllo world".to_string();
        let actual = "héllo wörld".to_string();
        let mismatch = lines().compare(&recorded, &actual).unwrap();
        // 'ö' is the eighth grapheme even though 'é' is two bytes.
        assert!(mismatch.message.contains("column 8"));
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        let err = lines().deserialize(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, DecodeError::Utf8(_)));
    }

    #[test]
    fn round_trips_exactly() {
        let strategy = lines();
        let text = "αβγ\nsecond line\n".to_string();
        let decoded = strategy.deserialize(&strategy.serialize(&text)).unwrap();
        assert_eq!(decoded, text);
    }
}
