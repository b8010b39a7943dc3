//! Case-insensitive matchers for preamble fields and `%{name}` references
//!
//! Case-insensitivity is spelled out in the patterns themselves (`name` becomes
//! `[nN][aA][mM][eE]`) instead of relying on the regex engine's `(?i)` case folding.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

/// Preamble fields picked out of a spec file.
///
/// Entries are regex fragments: `source[0-9]+` covers `Source0:`, `Source1:` and so on.
pub const FIELDS: &[&str] = &[
    "name",
    "version",
    "release",
    "buildrequires",
    "requires",
    "summary",
    "license",
    "vendor",
    "packager",
    "provides",
    "url",
    "source[0-9]+",
    "group",
    "buildroot",
    "buildarch",
    "autoreqprov",
    "prefix",
];

lazy_static! {
    static ref BUILTIN: PatternTable = PatternTable::new(FIELDS);
}

/// Appends `ch` to `out` as a character class accepting either case.
///
/// Returns `false` (and appends nothing) if `ch` has no single-char case pair.
fn push_either_case(out: &mut String, ch: char) -> bool {
    if !ch.is_alphabetic() {
        return false;
    }
    let (mut lower, mut upper) = (ch.to_lowercase(), ch.to_uppercase());
    let (Some(lo), None, Some(up), None) = (lower.next(), lower.next(), upper.next(), upper.next())
    else {
        return false;
    };
    out.push('[');
    out.push_str(&regex::escape(lo.encode_utf8(&mut [0; 4])));
    out.push_str(&regex::escape(up.encode_utf8(&mut [0; 4])));
    out.push(']');
    true
}

/// Turns a field pattern into one that ignores letter case.
///
/// Non-letters are copied as they are, so regex syntax in the field pattern survives.
#[must_use]
pub fn case_insensitive(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 4);
    for ch in pattern.chars() {
        if !push_either_case(&mut out, ch) {
            out.push(ch);
        }
    }
    out
}

/// Like [`case_insensitive`], but for a literal name: non-letters are escaped.
#[must_use]
pub fn case_insensitive_literal(name: &str) -> String {
    let mut out = String::with_capacity(name.len() * 4);
    for ch in name.chars() {
        if !push_either_case(&mut out, ch) {
            out.push_str(&regex::escape(ch.encode_utf8(&mut [0; 4])));
        }
    }
    out
}

fn compile_builtin(re: &str) -> Regex {
    // only ever fed letter classes and the fragments in FIELDS
    Regex::new(re).expect("builtin field pattern should compile")
}

/// Matches a whole `Field: value` line for one field.
///
/// Group 1 is the field name as written, group 2 the raw (untrimmed) value.
#[must_use]
pub fn field_matcher(field: &str) -> Regex {
    compile_builtin(&format!("^({}):(.*)$", case_insensitive(field)))
}

/// What a `%{...}` reference should be looked up as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefTarget {
    /// A preamble field, looked up by the referenced name in lower case.
    Field,
    /// A `%define` macro, looked up by its name as defined.
    Macro(String),
}

/// One `%{...}` occurrence found by a [`ReferenceMatcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Byte range of the whole `%{...}` in the searched value.
    pub range: std::ops::Range<usize>,
    /// Key to look the reference up as.
    pub key: String,
    /// The name inside the braces is spelled exactly like `key`.
    pub exact: bool,
}

/// Finds `%{name}` references to one field or macro.
#[derive(Debug, Clone)]
pub struct ReferenceMatcher {
    detect: Regex,
    extract: Regex,
    target: RefTarget,
}

impl ReferenceMatcher {
    fn build(name_re: &str, target: RefTarget) -> Result<Self, regex::Error> {
        Ok(Self {
            detect: Regex::new(&format!(r"%\{{{name_re}\}}"))?,
            extract: Regex::new(&format!(r"%\{{({name_re})\}}"))?,
            target,
        })
    }

    /// Matcher for references to a preamble field pattern from [`FIELDS`].
    ///
    /// # Panics
    /// - `field` is not a valid regex fragment
    #[must_use]
    pub fn for_field(field: &str) -> Self {
        Self::build(&case_insensitive(field), RefTarget::Field)
            .expect("builtin field pattern should compile")
    }

    /// Matcher for references to a `%define`d macro.
    ///
    /// # Errors
    /// - the name is too long for the regex engine's size limits
    pub fn for_macro(name: &str) -> Result<Self, regex::Error> {
        Self::build(&case_insensitive_literal(name), RefTarget::Macro(name.to_owned()))
    }

    /// Whether `value` contains a reference this matcher covers.
    #[must_use]
    pub fn is_referenced_in(&self, value: &str) -> bool {
        self.detect.is_match(value)
    }

    /// Every reference in `value`.
    pub fn references<'a>(&'a self, value: &'a str) -> impl Iterator<Item = Reference> + 'a {
        self.extract.captures_iter(value).filter_map(move |cap| {
            let (whole, written) = (cap.get(0)?, cap.get(1)?.as_str());
            let key = match &self.target {
                RefTarget::Field => written.to_lowercase(),
                RefTarget::Macro(name) => name.clone(),
            };
            Some(Reference { range: whole.range(), exact: key == written, key })
        })
    }

    #[must_use]
    pub const fn target(&self) -> &RefTarget {
        &self.target
    }
}

/// Field line matchers plus reference matchers for the same fields.
#[derive(Debug)]
pub struct PatternTable {
    fields: Vec<Regex>,
    references: Vec<ReferenceMatcher>,
}

impl PatternTable {
    /// Builds matchers for the given field patterns, in order.
    #[must_use]
    pub fn new(fields: &[&str]) -> Self {
        let table = Self {
            fields: fields.iter().map(|f| field_matcher(f)).collect(),
            references: fields.iter().map(|f| ReferenceMatcher::for_field(f)).collect(),
        };
        trace!(fields = fields.len(), "built spec pattern table");
        table
    }

    /// The table for [`FIELDS`], built on first use and shared afterwards.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    #[must_use]
    pub fn field_matchers(&self) -> &[Regex] {
        &self.fields
    }

    #[must_use]
    pub fn reference_matchers(&self) -> &[ReferenceMatcher] {
        &self.references
    }
}
