//! Second pass: expand `%{name}` references between scanned values
//!
//! Expansion is a single pass. Every reference is looked up in the store as it was
//! scanned, and text that came from a substitution is never looked at again. So with
//!
//! ```text
//! %define a x
//! %define b %{a}
//! Summary: %{b}
//! ```
//!
//! `b` expands to `x` but `summary` expands to `%{a}`, the scanned value of `b`.

use crate::error::SpecError;
use crate::patterns::ReferenceMatcher;
use crate::store::PropertyStore;
use std::ops::Range;
use tracing::debug;

/// Expands the references in one value.
///
/// Matchers are tried in order. Where several cover the same `%{...}`, a key spelled
/// exactly as written inside the braces wins; otherwise the first matcher that finds a
/// value does. References to keys missing from `snapshot` are left as written.
///
/// # Errors
/// - [`SpecError::AmbiguousValue`] if a referenced key holds several values
pub fn expand(
    value: &str,
    snapshot: &PropertyStore,
    matchers: &[&ReferenceMatcher],
) -> Result<String, SpecError> {
    // (range, substitution, spelled exactly)
    let mut spans: Vec<(Range<usize>, &str, bool)> = Vec::new();
    for m in matchers.iter().filter(|m| m.is_referenced_in(value)) {
        for r in m.references(value) {
            let taken =
                spans.iter().position(|(s, _, _)| s.start < r.range.end && r.range.start < s.end);
            // an inexact pick gives way to an exact spelling, nothing else is replaced
            if taken.is_some_and(|i| !r.exact || spans.get(i).is_some_and(|s| s.2)) {
                continue;
            }
            let Some(sub) = snapshot.get(&r.key)? else {
                debug!(key = %r.key, value, "no value for reference, leaving it");
                continue;
            };
            match taken.and_then(|i| spans.get_mut(i)) {
                Some(span) => *span = (r.range, sub, true),
                None => spans.push((r.range, sub, r.exact)),
            }
        }
    }
    if spans.is_empty() {
        return Ok(value.to_owned());
    }

    spans.sort_by_key(|(r, _, _)| r.start);
    let mut out = String::with_capacity(value.len());
    let mut pos = 0;
    for (r, sub, _) in spans {
        out.push_str(value.get(pos..r.start).unwrap_or_default());
        out.push_str(sub);
        pos = r.end;
    }
    out.push_str(value.get(pos..).unwrap_or_default());
    Ok(out)
}

/// Builds a new store with every value of `snapshot` expanded.
///
/// # Errors
/// - [`SpecError::AmbiguousValue`] if any value references a multi-valued key
pub fn resolve(
    snapshot: &PropertyStore,
    matchers: &[&ReferenceMatcher],
) -> Result<PropertyStore, SpecError> {
    let mut resolved = PropertyStore::new();
    for (key, value) in snapshot.iter() {
        let expanded = expand(value, snapshot, matchers)?;
        if expanded != value {
            debug!(key, from = value, to = %expanded, "expanded");
        }
        resolved.insert(key, expanded);
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::PatternTable;
    use crate::scan::scan;

    fn run(text: &str) -> Result<PropertyStore, SpecError> {
        let table = PatternTable::builtin();
        let s = scan(text, table);
        let matchers: Vec<_> = table.reference_matchers().iter().chain(&s.macros).collect();
        resolve(&s.store, &matchers)
    }

    #[test]
    fn macro_in_field() {
        let props = run("%define ver 1.1\nVersion: %{ver}\n").unwrap();
        assert_eq!(props.get("version").unwrap(), Some("1.1"));
        assert_eq!(props.get("ver").unwrap(), Some("1.1"));
    }

    #[test]
    fn macro_defined_after_use() {
        let props = run("Version: %{ver}\n%define ver 2.0\n").unwrap();
        assert_eq!(props.get("version").unwrap(), Some("2.0"));
    }

    #[test]
    fn fields_reference_fields() {
        let props =
            run("Name: foo\nVersion: 1\nRelease: 3\nProvides: %{name}-%{VERSION}-%{Release}\n").unwrap();
        assert_eq!(props.get("provides").unwrap(), Some("foo-1-3"));
    }

    #[test]
    fn only_one_hop() {
        let props = run("%define a x\n%define b %{a}\nSummary: %{b}\n").unwrap();
        assert_eq!(props.get("b").unwrap(), Some("x"));
        assert_eq!(props.get("summary").unwrap(), Some("%{a}"));
    }

    #[test]
    fn unknown_reference_untouched() {
        let props = run("Name: foo\nBuildRoot: %{_tmppath}/%{name}\n").unwrap();
        assert_eq!(props.get("buildroot").unwrap(), Some("%{_tmppath}/foo"));
    }

    #[test]
    fn every_occurrence_replaced() {
        let props = run("Name: foo\nSummary: %{name} and %{NAME} and %{name}\n").unwrap();
        assert_eq!(props.get("summary").unwrap(), Some("foo and foo and foo"));
    }

    #[test]
    fn numbered_source_reference() {
        let props = run("Source1: b.tar.gz\nUrl: http://x/%{source1}\n").unwrap();
        assert_eq!(props.get("url").unwrap(), Some("http://x/b.tar.gz"));
    }

    #[test]
    fn self_reference_stays() {
        let props = run("Name: %{name}\n").unwrap();
        assert_eq!(props.get("name").unwrap(), Some("%{name}"));
    }

    #[test]
    fn substituted_text_not_rescanned() {
        let props = run("%define pct %{name}\nName: foo\nSummary: %{pct}\n").unwrap();
        assert_eq!(props.get("summary").unwrap(), Some("%{name}"));
        assert_eq!(props.get("pct").unwrap(), Some("foo"));
    }

    #[test]
    fn reference_to_multi_valued_key_fails() {
        let err = run("Requires: a\nRequires: b\nSummary: needs %{requires}\n").unwrap_err();
        assert!(matches!(err, SpecError::AmbiguousValue { ref key, count: 2 } if key == "requires"));
    }

    #[test]
    fn multi_valued_key_without_reference_is_fine() {
        let props = run("Requires: a\nRequires: b\n").unwrap();
        assert_eq!(props.get_all("requires"), ["a", "b"]);
    }

    #[test]
    fn exact_case_macro_preferred() {
        let props = run("%define Ver 1\n%define ver 2\nVersion: %{ver}\nRelease: %{Ver}\n").unwrap();
        assert_eq!(props.get("version").unwrap(), Some("2"));
        assert_eq!(props.get("release").unwrap(), Some("1"));
    }

    #[test]
    fn no_exact_case_macro_takes_first_defined() {
        let props = run("%define Ver 1\n%define ver 2\nVersion: %{VER}\n").unwrap();
        assert_eq!(props.get("version").unwrap(), Some("1"));
    }

    #[test]
    fn exact_case_macro_beats_field() {
        let props = run("Name: foo\n%define NAME bar\nSummary: %{NAME}\n").unwrap();
        assert_eq!(props.get("summary").unwrap(), Some("bar"));
    }

    #[test]
    fn field_matcher_wins_over_macro_of_same_name() {
        let props = run("Name: foo\n%define NAME bar\nSummary: %{name}\n").unwrap();
        assert_eq!(props.get("summary").unwrap(), Some("foo"));
        assert_eq!(props.get("NAME").unwrap(), Some("bar"));
    }
}
