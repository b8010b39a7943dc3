//! First pass: pick fields and `%define`s out of the spec text

use crate::patterns::{PatternTable, ReferenceMatcher};
use crate::store::PropertyStore;
use tracing::{debug, trace, warn};

const DEFINE: &str = "%define";

/// Output of a scan: raw (unexpanded) values plus a matcher per macro found.
#[derive(Debug, Default)]
pub struct Scan {
    pub store: PropertyStore,
    pub macros: Vec<ReferenceMatcher>,
}

/// A `%define name value...` line split into its name and value.
///
/// `None` for anything else, including a `%define` missing its name or value.
#[must_use]
pub fn macro_definition(line: &str) -> Option<(&str, String)> {
    let mut words = line.split_whitespace();
    if words.next()? != DEFINE {
        return None;
    }
    let name = words.next()?;
    let value = words.collect::<Vec<_>>().join(" ");
    if value.is_empty() {
        return None;
    }
    Some((name, value))
}

/// Line terminators besides `\n` and `\r\n`: lone CR, NEL, LINE and PARAGRAPH SEPARATOR.
const LINE_BREAKS: [char; 4] = ['\r', '\u{85}', '\u{2028}', '\u{2029}'];

/// Logical lines of `text`.
fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().flat_map(|l| l.split(LINE_BREAKS))
}

/// Scans every line of `text` against the field matchers in `table` and for macro
/// definitions.
///
/// Blank lines and `#` comments are skipped. A line can match several fields; each
/// match is kept.
#[must_use]
pub fn scan(text: &str, table: &PatternTable) -> Scan {
    let mut out = Scan::default();
    for (ln, line) in lines(text).enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        for re in table.field_matchers() {
            let Some(cap) = re.captures(line) else { continue };
            let (Some(field), Some(value)) = (cap.get(1), cap.get(2)) else { continue };
            let (field, value) = (field.as_str().to_lowercase(), value.as_str().trim());
            trace!(line = ln + 1, %field, value, "field");
            out.store.insert(field, value);
        }

        if let Some((name, value)) = macro_definition(line) {
            match ReferenceMatcher::for_macro(name) {
                Ok(m) => {
                    trace!(line = ln + 1, name, value, "macro");
                    out.macros.push(m);
                    out.store.insert(name, value);
                }
                Err(e) => warn!(line = ln + 1, len = name.len(), "ignoring %define: {e}"),
            }
        }
    }
    debug!(keys = out.store.len(), macros = out.macros.len(), "scanned spec");
    out
}
