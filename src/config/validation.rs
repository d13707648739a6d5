//! Declarative validation of loaded properties.
//!
//! # Responsibilities
//! - Pair a property key with a checker and a typed constraint
//! - Run every validator and collect all failures in input order
//! - Distinguish a bad value from a checker handed the wrong constraint
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - A missing store fails with a single `StoreNil` error
//! - Checkers are plain functions so callers can supply their own

use std::fmt;

use crate::config::access::{parse_float, parse_int, PropertySource};
use crate::config::store::Config;
use crate::error::ValidationError;
use crate::observability::metrics;

/// Signature shared by all checkers.
pub type Checker = fn(&dyn PropertySource, &str, &Constraint) -> Result<(), ValidationError>;

/// Comparison value handed to a checker.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    None,
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Set(Vec<String>),
}

impl Constraint {
    fn type_name(&self) -> &'static str {
        match self {
            Constraint::None => "none",
            Constraint::Int(_) => "integer",
            Constraint::Float(_) => "float",
            Constraint::Bool(_) => "boolean",
            Constraint::Str(_) => "string",
            Constraint::Set(_) => "string set",
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::None => write!(f, "none"),
            Constraint::Int(v) => write!(f, "{}", v),
            Constraint::Float(v) => write!(f, "{}", v),
            Constraint::Bool(v) => write!(f, "{}", v),
            Constraint::Str(v) => write!(f, "{}", v),
            Constraint::Set(v) => write!(f, "[{}]", v.join(", ")),
        }
    }
}

impl From<()> for Constraint {
    fn from(_: ()) -> Self {
        Constraint::None
    }
}

impl From<i64> for Constraint {
    fn from(v: i64) -> Self {
        Constraint::Int(v)
    }
}

impl From<i32> for Constraint {
    fn from(v: i32) -> Self {
        Constraint::Int(i64::from(v))
    }
}

impl From<u32> for Constraint {
    fn from(v: u32) -> Self {
        Constraint::Int(i64::from(v))
    }
}

impl From<f64> for Constraint {
    fn from(v: f64) -> Self {
        Constraint::Float(v)
    }
}

impl From<bool> for Constraint {
    fn from(v: bool) -> Self {
        Constraint::Bool(v)
    }
}

impl From<&str> for Constraint {
    fn from(v: &str) -> Self {
        Constraint::Str(v.to_string())
    }
}

impl From<String> for Constraint {
    fn from(v: String) -> Self {
        Constraint::Str(v)
    }
}

impl From<Vec<String>> for Constraint {
    fn from(v: Vec<String>) -> Self {
        Constraint::Set(v)
    }
}

impl From<&[&str]> for Constraint {
    fn from(v: &[&str]) -> Self {
        Constraint::Set(v.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Constraint {
    fn from(v: [&str; N]) -> Self {
        Constraint::Set(v.iter().map(|s| s.to_string()).collect())
    }
}

/// A property key, a checker and the constraint to check against.
#[derive(Clone)]
pub struct Validator {
    pub key: String,
    pub check: Checker,
    pub value: Constraint,
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl Validator {
    pub fn new(key: impl Into<String>, check: Checker, value: impl Into<Constraint>) -> Self {
        Self {
            key: key.into(),
            check,
            value: value.into(),
        }
    }

    /// Run this validator against `store`.
    pub fn run(&self, store: &dyn PropertySource) -> Result<(), ValidationError> {
        (self.check)(store, &self.key, &self.value)
    }
}

/// Run all validators against a possibly absent store.
pub fn validate<S: PropertySource>(store: Option<&S>, validators: &[Validator]) -> Vec<ValidationError> {
    let Some(store) = store else {
        metrics::record_validation_failures(1);
        return vec![ValidationError::StoreNil];
    };

    let errors: Vec<ValidationError> = validators
        .iter()
        .filter_map(|validator| validator.run(store).err())
        .collect();

    if !errors.is_empty() {
        tracing::debug!(failed = errors.len(), total = validators.len(), "Validation failed");
        metrics::record_validation_failures(errors.len());
    }

    errors
}

impl Config {
    /// Run all validators against this config.
    pub fn validate(&self, validators: &[Validator]) -> Vec<ValidationError> {
        validate(Some(self), validators)
    }
}

fn strict_int(store: &dyn PropertySource, key: &str, checker: &'static str) -> Result<i64, ValidationError> {
    let value = store.get_s(key);
    parse_int(&value).ok_or_else(|| {
        ValidationError::misuse(key, checker, format!("value {:?} is not an integer", value))
    })
}

fn strict_float(store: &dyn PropertySource, key: &str, checker: &'static str) -> Result<f64, ValidationError> {
    let value = store.get_s(key);
    parse_float(&value).ok_or_else(|| {
        ValidationError::misuse(key, checker, format!("value {:?} is not a number", value))
    })
}

fn unsupported(key: &str, checker: &'static str, value: &Constraint) -> ValidationError {
    ValidationError::misuse(
        key,
        checker,
        format!("unsupported {} constraint", value.type_name()),
    )
}

/// Fails if the property is empty or absent.
pub fn empty(store: &dyn PropertySource, key: &str, _value: &Constraint) -> Result<(), ValidationError> {
    if store.get_s(key).is_empty() {
        return Err(ValidationError::PropertyEmpty { key: key.to_string() });
    }
    Ok(())
}

/// Fails if the property is less than the constraint.
pub fn less(store: &dyn PropertySource, key: &str, value: &Constraint) -> Result<(), ValidationError> {
    let below = match value {
        Constraint::Int(min) => strict_int(store, key, "less")? < *min,
        Constraint::Float(min) => strict_float(store, key, "less")? < *min,
        other => return Err(unsupported(key, "less", other)),
    };

    if below {
        return Err(ValidationError::BelowMinimum {
            key: key.to_string(),
            bound: value.to_string(),
        });
    }
    Ok(())
}

/// Fails if the property is greater than the constraint.
pub fn greater(store: &dyn PropertySource, key: &str, value: &Constraint) -> Result<(), ValidationError> {
    let above = match value {
        Constraint::Int(max) => strict_int(store, key, "greater")? > *max,
        Constraint::Float(max) => strict_float(store, key, "greater")? > *max,
        other => return Err(unsupported(key, "greater", other)),
    };

    if above {
        return Err(ValidationError::AboveMaximum {
            key: key.to_string(),
            bound: value.to_string(),
        });
    }
    Ok(())
}

/// Fails if the property equals the constraint.
pub fn equals(store: &dyn PropertySource, key: &str, value: &Constraint) -> Result<(), ValidationError> {
    let equal = match value {
        Constraint::Int(v) => store.get_i(key) == *v,
        Constraint::Float(v) => store.get_f(key) == *v,
        Constraint::Bool(v) => store.get_b(key) == *v,
        Constraint::Str(v) => store.get_s(key) == *v,
        other => return Err(unsupported(key, "equals", other)),
    };

    if equal {
        return Err(ValidationError::NotEqual {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Fails if the property is not one of the allowed values.
pub fn not_contains(store: &dyn PropertySource, key: &str, value: &Constraint) -> Result<(), ValidationError> {
    let Constraint::Set(allowed) = value else {
        return Err(unsupported(key, "not_contains", value));
    };

    let current = store.get_s(key);
    if !allowed.iter().any(|item| *item == current) {
        return Err(ValidationError::NotInAllowedSet { key: key.to_string() });
    }
    Ok(())
}

/// Fails if the property starts with the constraint.
pub fn not_prefix(store: &dyn PropertySource, key: &str, value: &Constraint) -> Result<(), ValidationError> {
    let Constraint::Str(prefix) = value else {
        return Err(unsupported(key, "not_prefix", value));
    };

    if store.get_s(key).starts_with(prefix.as_str()) {
        return Err(ValidationError::ForbiddenPrefix {
            key: key.to_string(),
            prefix: prefix.clone(),
        });
    }
    Ok(())
}

/// Fails if the property ends with the constraint.
pub fn not_suffix(store: &dyn PropertySource, key: &str, value: &Constraint) -> Result<(), ValidationError> {
    let Constraint::Str(suffix) = value else {
        return Err(unsupported(key, "not_suffix", value));
    };

    if store.get_s(key).ends_with(suffix.as_str()) {
        return Err(ValidationError::ForbiddenSuffix {
            key: key.to_string(),
            suffix: suffix.clone(),
        });
    }
    Ok(())
}

/// Fails if the property length in characters differs from the constraint.
pub fn not_len(store: &dyn PropertySource, key: &str, value: &Constraint) -> Result<(), ValidationError> {
    let Constraint::Int(expected) = value else {
        return Err(unsupported(key, "not_len", value));
    };

    let len = store.get_s(key).chars().count();
    if i64::try_from(len).ok() != Some(*expected) {
        return Err(ValidationError::WrongLength {
            key: key.to_string(),
            expected: *expected,
        });
    }
    Ok(())
}

/// Fails unless the property is empty or a recognized boolean word.
pub fn type_bool(store: &dyn PropertySource, key: &str, _value: &Constraint) -> Result<(), ValidationError> {
    let current = store.get_s(key);
    match current.to_ascii_lowercase().as_str() {
        "" | "true" | "false" | "yes" | "no" | "1" | "0" => Ok(()),
        _ => Err(ValidationError::WrongType {
            key: key.to_string(),
            expected: "boolean",
            value: current,
        }),
    }
}

/// Fails unless the property is empty or an integer.
pub fn type_num(store: &dyn PropertySource, key: &str, _value: &Constraint) -> Result<(), ValidationError> {
    let current = store.get_s(key);
    if current.is_empty() || parse_int(&current).is_some() {
        return Ok(());
    }
    Err(ValidationError::WrongType {
        key: key.to_string(),
        expected: "numeric",
        value: current,
    })
}

/// Fails unless the property is empty or a floating point number.
pub fn type_float(store: &dyn PropertySource, key: &str, _value: &Constraint) -> Result<(), ValidationError> {
    let current = store.get_s(key);
    if current.is_empty() || parse_float(&current).is_some() {
        return Ok(());
    }
    Err(ValidationError::WrongType {
        key: key.to_string(),
        expected: "float",
        value: current,
    })
}
