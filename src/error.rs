//! Error definitions for loading and validating configuration.
//!
//! # Design Decisions
//! - Load failures are fatal to the load/reload call and never partially applied
//! - Typed reads never fail; they degrade to zero values instead (see `config::access`)
//! - Validation errors always carry the offending property key

use std::path::PathBuf;
use thiserror::Error;

/// Reason a configuration text was rejected by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number of the offending line.
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("property defined before any section header")]
    PropertyOutsideSection,

    #[error("section name is empty")]
    EmptySectionName,

    #[error("property name is empty")]
    EmptyPropertyName,
}

/// Errors that can occur while loading or reloading a configuration file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file does not exist.
    #[error("File {} does not exist", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but has zero bytes.
    #[error("File {} is empty", path.display())]
    Empty { path: PathBuf },

    /// The file exists but the current user can't read it.
    #[error("File {} is not readable", path.display())]
    Unreadable { path: PathBuf },

    /// The file was read but violates the section-before-property rule.
    #[error("Configuration file {} is malformed", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// Any other I/O failure while reading the file.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reload was requested on a Config that was never loaded from a file.
    #[error("Path to config file is empty (non initialized struct?)")]
    NotInitialized,

    /// The process-wide Config has not been set.
    #[error("Global config is not loaded")]
    NotLoaded,
}

impl LoadError {
    /// Path the error refers to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            LoadError::NotFound { path }
            | LoadError::Empty { path }
            | LoadError::Unreadable { path }
            | LoadError::Malformed { path, .. }
            | LoadError::Io { path, .. } => Some(path),
            LoadError::NotInitialized | LoadError::NotLoaded => None,
        }
    }

    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::NotFound { .. } => "not_found",
            LoadError::Empty { .. } => "empty",
            LoadError::Unreadable { .. } => "unreadable",
            LoadError::Malformed { .. } => "malformed",
            LoadError::Io { .. } => "io",
            LoadError::NotInitialized => "not_initialized",
            LoadError::NotLoaded => "not_loaded",
        }
    }
}

/// Errors reported by validators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Property {key} can't be empty")]
    PropertyEmpty { key: String },

    #[error("Property {key} can't be less than {bound}")]
    BelowMinimum { key: String, bound: String },

    #[error("Property {key} can't be greater than {bound}")]
    AboveMaximum { key: String, bound: String },

    #[error("Property {key} can't be equal {value}")]
    NotEqual { key: String, value: String },

    #[error("Property {key} doesn't contain any valid value")]
    NotInAllowedSet { key: String },

    #[error("Property {key} can't start with {prefix:?}")]
    ForbiddenPrefix { key: String, prefix: String },

    #[error("Property {key} can't end with {suffix:?}")]
    ForbiddenSuffix { key: String, suffix: String },

    #[error("Property {key} must be {expected} symbols long")]
    WrongLength { key: String, expected: i64 },

    #[error("Property {key} contains unsupported {expected} value {value:?}")]
    WrongType {
        key: String,
        expected: &'static str,
        value: String,
    },

    /// The constraint handed to a checker has the wrong shape, or the stored
    /// value can't be compared with it.
    #[error("Wrong validator for property {key} ({checker}: {reason})")]
    CheckerMisuse {
        key: String,
        checker: &'static str,
        reason: String,
    },

    #[error("Config is nil")]
    StoreNil,
}

impl ValidationError {
    /// Key of the property that failed, if the error is bound to one.
    pub fn key(&self) -> Option<&str> {
        match self {
            ValidationError::PropertyEmpty { key }
            | ValidationError::BelowMinimum { key, .. }
            | ValidationError::AboveMaximum { key, .. }
            | ValidationError::NotEqual { key, .. }
            | ValidationError::NotInAllowedSet { key }
            | ValidationError::ForbiddenPrefix { key, .. }
            | ValidationError::ForbiddenSuffix { key, .. }
            | ValidationError::WrongLength { key, .. }
            | ValidationError::WrongType { key, .. }
            | ValidationError::CheckerMisuse { key, .. } => Some(key),
            ValidationError::StoreNil => None,
        }
    }

    pub(crate) fn misuse(key: &str, checker: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::CheckerMisuse {
            key: key.to_string(),
            checker,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_display() {
        let err = LoadError::NotFound {
            path: PathBuf::from("/_not_exists_"),
        };
        assert_eq!(err.to_string(), "File /_not_exists_ does not exist");
        assert_eq!(err.kind(), "not_found");

        let err = LoadError::Malformed {
            path: PathBuf::from("/tmp/app.conf"),
            source: ParseError {
                line: 2,
                kind: ParseErrorKind::PropertyOutsideSection,
            },
        };
        assert_eq!(err.to_string(), "Configuration file /tmp/app.conf is malformed");
        assert_eq!(err.path(), Some(std::path::Path::new("/tmp/app.conf")));

        assert_eq!(
            LoadError::NotInitialized.to_string(),
            "Path to config file is empty (non initialized struct?)"
        );
        assert!(LoadError::NotLoaded.path().is_none());
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::BelowMinimum {
            key: "integer:test1".into(),
            bound: "10".into(),
        };
        assert_eq!(err.to_string(), "Property integer:test1 can't be less than 10");
        assert_eq!(err.key(), Some("integer:test1"));

        let err = ValidationError::misuse("integer:test1", "greater", "string constraint");
        assert!(err.to_string().starts_with("Wrong validator for property integer:test1"));

        assert_eq!(ValidationError::StoreNil.to_string(), "Config is nil");
        assert!(ValidationError::StoreNil.key().is_none());
    }
}
