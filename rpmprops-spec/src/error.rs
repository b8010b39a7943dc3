//! Errors raised while reading a spec file or looking up its properties

use std::path::PathBuf;

#[derive(Debug)]
pub enum SpecError {
    /// The spec file could not be opened or read.
    FileNotFound { path: PathBuf, source: std::io::Error },
    /// A single value was asked for, but the key holds several.
    AmbiguousValue { key: String, count: usize },
}

impl std::fmt::Display for SpecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileNotFound { path, source } => {
                write!(f, "RPM spec file not found: {} ({source})", path.display())
            }
            Self::AmbiguousValue { key, count } => {
                write!(f, "Multiple values for key `{key}` ({count} values), expected one")
            }
        }
    }
}

impl std::error::Error for SpecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileNotFound { source, .. } => Some(source),
            Self::AmbiguousValue { .. } => None,
        }
    }
}
