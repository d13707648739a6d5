//! Typed, non-failing property accessors.
//!
//! # Degradation Rules
//! - Absent key (or key with an empty value): the supplied default, or the type's zero value
//! - Present but malformed value: the zero value, never the default
//! - Absent store (`None`): same as an absent key
//!
//! Callers that need strict checking use `config::validation` instead.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::store::{Config, PropertyMap};

/// Unix permission bits read from a property, e.g. `644` or `0644`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FileMode(pub u32);

impl From<u32> for FileMode {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

/// Parse a base-10 or `0x`-prefixed hexadecimal integer.
pub fn parse_int(value: &str) -> Option<i64> {
    match value.strip_prefix("0x") {
        Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
            i64::from_str_radix(hex, 16).ok()
        }
        Some(_) => None,
        None => value.parse().ok(),
    }
}

/// Parse a floating point number; anything `parse_int` accepts is accepted too.
pub fn parse_float(value: &str) -> Option<f64> {
    value
        .parse::<f64>()
        .ok()
        .or_else(|| parse_int(value).map(|v| v as f64))
}

/// Parse octal permission digits (`644`, `0644`).
pub fn parse_mode(value: &str) -> Option<FileMode> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    u32::from_str_radix(value, 8).ok().map(FileMode)
}

/// Only `false`, `0` and the empty string are false.
pub fn parse_bool(value: &str) -> bool {
    !matches!(value, "" | "false" | "0")
}

/// Read access to properties addressed by `section:property` keys.
///
/// Implementors provide resolution and section listing; every typed
/// accessor is derived from those.
pub trait PropertySource {
    /// Macro-resolved value of `key`, `None` if absent. An empty value
    /// comes back as `Some("")`, so this is the one accessor that tells
    /// empty and absent apart.
    fn resolved(&self, key: &str) -> Option<String>;

    fn has_section(&self, section: &str) -> bool;

    /// Section names in first-seen order.
    fn sections(&self) -> Vec<String>;

    /// Property names of `section` in first-seen order.
    fn props(&self, section: &str) -> Vec<String>;

    /// Resolved value if the key holds a non-empty one. Empty and absent
    /// both give `None`; the typed accessors build on this.
    fn lookup(&self, key: &str) -> Option<String> {
        self.resolved(key).filter(|value| !value.is_empty())
    }

    fn has_prop(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    fn get_s(&self, key: &str) -> String {
        self.get_s_or(key, "")
    }

    fn get_s_or(&self, key: &str, default: &str) -> String {
        self.lookup(key).unwrap_or_else(|| default.to_string())
    }

    fn get_i(&self, key: &str) -> i64 {
        self.get_i_or(key, 0)
    }

    fn get_i_or(&self, key: &str, default: i64) -> i64 {
        match self.lookup(key) {
            Some(value) => parse_int(&value).unwrap_or(0),
            None => default,
        }
    }

    /// Unsigned integer; negative values count as malformed.
    fn get_u(&self, key: &str) -> u64 {
        self.get_u_or(key, 0)
    }

    fn get_u_or(&self, key: &str, default: u64) -> u64 {
        match self.lookup(key) {
            Some(value) => parse_int(&value)
                .and_then(|v| u64::try_from(v).ok())
                .unwrap_or(0),
            None => default,
        }
    }

    fn get_f(&self, key: &str) -> f64 {
        self.get_f_or(key, 0.0)
    }

    fn get_f_or(&self, key: &str, default: f64) -> f64 {
        match self.lookup(key) {
            Some(value) => parse_float(&value).unwrap_or(0.0),
            None => default,
        }
    }

    fn get_b(&self, key: &str) -> bool {
        self.get_b_or(key, false)
    }

    fn get_b_or(&self, key: &str, default: bool) -> bool {
        match self.lookup(key) {
            Some(value) => parse_bool(&value),
            None => default,
        }
    }

    fn get_m(&self, key: &str) -> FileMode {
        self.get_m_or(key, FileMode(0))
    }

    fn get_m_or(&self, key: &str, default: FileMode) -> FileMode {
        match self.lookup(key) {
            Some(value) => parse_mode(&value).unwrap_or_default(),
            None => default,
        }
    }

    /// Duration given in whole seconds.
    fn get_d(&self, key: &str) -> Duration {
        self.get_d_or(key, Duration::ZERO)
    }

    fn get_d_or(&self, key: &str, default: Duration) -> Duration {
        match self.lookup(key) {
            Some(_) => Duration::from_secs(self.get_u(key)),
            None => default,
        }
    }

    /// Comma-separated list; items are trimmed and empty items dropped.
    fn get_l(&self, key: &str) -> Vec<String> {
        self.lookup(key)
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether the resolved value equals `value`.
    fn is(&self, key: &str, value: &str) -> bool {
        self.get_s(key) == value
    }
}

impl PropertySource for PropertyMap {
    fn resolved(&self, key: &str) -> Option<String> {
        self.resolve(key)
    }

    fn has_section(&self, section: &str) -> bool {
        PropertyMap::has_section(self, section)
    }

    fn sections(&self) -> Vec<String> {
        PropertyMap::sections(self).to_vec()
    }

    fn props(&self, section: &str) -> Vec<String> {
        PropertyMap::props(self, section).to_vec()
    }
}

impl PropertySource for Config {
    fn resolved(&self, key: &str) -> Option<String> {
        self.data().resolve(key)
    }

    fn has_section(&self, section: &str) -> bool {
        PropertyMap::has_section(&self.data(), section)
    }

    fn sections(&self) -> Vec<String> {
        PropertyMap::sections(&self.data()).to_vec()
    }

    fn props(&self, section: &str) -> Vec<String> {
        PropertyMap::props(&self.data(), section).to_vec()
    }
}

impl<T: PropertySource + ?Sized> PropertySource for &T {
    fn resolved(&self, key: &str) -> Option<String> {
        (**self).resolved(key)
    }

    fn has_section(&self, section: &str) -> bool {
        (**self).has_section(section)
    }

    fn sections(&self) -> Vec<String> {
        (**self).sections()
    }

    fn props(&self, section: &str) -> Vec<String> {
        (**self).props(section)
    }
}

impl<T: PropertySource + ?Sized> PropertySource for Arc<T> {
    fn resolved(&self, key: &str) -> Option<String> {
        (**self).resolved(key)
    }

    fn has_section(&self, section: &str) -> bool {
        (**self).has_section(section)
    }

    fn sections(&self) -> Vec<String> {
        (**self).sections()
    }

    fn props(&self, section: &str) -> Vec<String> {
        (**self).props(section)
    }
}

/// An absent store reads like an empty one.
impl<T: PropertySource> PropertySource for Option<T> {
    fn resolved(&self, key: &str) -> Option<String> {
        self.as_ref().and_then(|store| store.resolved(key))
    }

    fn has_section(&self, section: &str) -> bool {
        self.as_ref().is_some_and(|store| store.has_section(section))
    }

    fn sections(&self) -> Vec<String> {
        self.as_ref().map(|store| store.sections()).unwrap_or_default()
    }

    fn props(&self, section: &str) -> Vec<String> {
        self.as_ref().map(|store| store.props(section)).unwrap_or_default()
    }
}
