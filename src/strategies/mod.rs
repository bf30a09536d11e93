//! Built-in strategies for the common snapshot payloads: line-oriented
//! text, JSON documents, and raw byte blobs.
//!
//! Each strategy is a shared static built once and handed out by cheap
//! clone, since a strategy is typically constructed once per value kind and
//! held for a whole test-run configuration.

use difference::Difference;

mod bytes;
mod json;
mod text;

pub use bytes::raw;
pub use json::json;
pub use text::lines;

/// Renders a line changeset in ` `/`+`/`-` prefix form, one line per
/// changed or kept line.
pub(crate) fn render_line_diff(diffs: &[Difference]) -> String {
    let mut out = String::new();
    for diff in diffs {
        let (prefix, block) = match diff {
            Difference::Same(block) => (' ', block),
            Difference::Add(block) => ('+', block),
            Difference::Rem(block) => ('-', block),
        };
        if block.is_empty() {
            out.push(prefix);
            out.push('\n');
            continue;
        }
        for line in block.lines() {
            out.push(prefix);
            out.push_str(line);
            out.push('\n');
        }
    }
    out.pop();
    out
}
