//! Entry point: parse a spec file into a [`PropertyStore`]

use crate::error::SpecError;
use crate::patterns::PatternTable;
use crate::resolve::resolve;
use crate::scan::scan;
use crate::store::PropertyStore;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Parser for one RPM spec file.
///
/// Creating a parser does not touch the file; [`SpecParser::parse`] reads it afresh on
/// every call, and macros found by one call are not carried into the next.
#[derive(Debug, Clone)]
pub struct SpecParser {
    path: PathBuf,
    table: &'static PatternTable,
}

impl SpecParser {
    #[must_use]
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into(), table: PatternTable::builtin() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the spec file and returns its fields and macros with references expanded.
    ///
    /// Non-UTF-8 bytes are replaced rather than rejected.
    ///
    /// # Errors
    /// - [`SpecError::FileNotFound`] if the file cannot be opened or read
    /// - [`SpecError::AmbiguousValue`] if a value references a key that holds several values
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn parse(&self) -> Result<PropertyStore, SpecError> {
        let bytes = std::fs::read(&self.path)
            .map_err(|source| SpecError::FileNotFound { path: self.path.clone(), source })?;
        debug!(bytes = bytes.len(), "read spec");
        self.parse_str(&String::from_utf8_lossy(&bytes))
    }

    /// Same as [`SpecParser::parse`], on spec text already in memory.
    ///
    /// # Errors
    /// - [`SpecError::AmbiguousValue`] if a value references a key that holds several values
    pub fn parse_str(&self, text: &str) -> Result<PropertyStore, SpecError> {
        let scanned = scan(text, self.table);
        let matchers: Vec<_> =
            self.table.reference_matchers().iter().chain(&scanned.macros).collect();
        resolve(&scanned.store, &matchers)
    }
}
