//! Process-wide default configuration.
//!
//! Applications that can pass a `Config` (or `Arc<Config>`) through their
//! own context should do so. This module is the convenience for code that
//! reads startup configuration from anywhere.
//!
//! # Design Decisions
//! - One writer is expected (startup, reconfiguration); readers are many
//! - The lock guards only the pointer swap, never a read of property data
//! - Readers get an `Arc<Config>` and keep it alive across a replacement
//! - Every accessor degrades to its default while nothing is loaded

use std::path::Path;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::config::access::{FileMode, PropertySource};
use crate::config::store::{Config, ReloadDiff};
use crate::config::validation::{self, Validator};
use crate::error::{LoadError, ValidationError};

static GLOBAL: RwLock<Option<Arc<Config>>> = RwLock::new(None);

/// Load `path` and make it the process-wide config, replacing any previous one.
///
/// On failure the previous config stays in place.
pub fn load(path: impl AsRef<Path>) -> Result<(), LoadError> {
    let config = Config::load(path)?;
    set(config);
    Ok(())
}

/// Make `config` the process-wide config.
pub fn set(config: Config) {
    let mut slot = GLOBAL.write().unwrap_or_else(|e| e.into_inner());
    *slot = Some(Arc::new(config));
}

/// Drop the process-wide config.
pub fn clear() {
    let mut slot = GLOBAL.write().unwrap_or_else(|e| e.into_inner());
    *slot = None;
}

/// Current process-wide config, if any.
pub fn get() -> Option<Arc<Config>> {
    GLOBAL.read().unwrap_or_else(|e| e.into_inner()).clone()
}

pub fn is_loaded() -> bool {
    get().is_some()
}

/// Reload the process-wide config from its file.
pub fn reload() -> Result<ReloadDiff, LoadError> {
    get().ok_or(LoadError::NotLoaded)?.reload()
}

/// Run validators against the process-wide config.
pub fn validate(validators: &[Validator]) -> Vec<ValidationError> {
    validation::validate(get().as_deref(), validators)
}

pub fn get_s(key: &str) -> String {
    get().get_s(key)
}

pub fn get_s_or(key: &str, default: &str) -> String {
    get().get_s_or(key, default)
}

pub fn get_i(key: &str) -> i64 {
    get().get_i(key)
}

pub fn get_i_or(key: &str, default: i64) -> i64 {
    get().get_i_or(key, default)
}

pub fn get_u(key: &str) -> u64 {
    get().get_u(key)
}

pub fn get_f(key: &str) -> f64 {
    get().get_f(key)
}

pub fn get_f_or(key: &str, default: f64) -> f64 {
    get().get_f_or(key, default)
}

pub fn get_b(key: &str) -> bool {
    get().get_b(key)
}

pub fn get_b_or(key: &str, default: bool) -> bool {
    get().get_b_or(key, default)
}

pub fn get_m(key: &str) -> FileMode {
    get().get_m(key)
}

pub fn get_m_or(key: &str, default: FileMode) -> FileMode {
    get().get_m_or(key, default)
}

pub fn get_d(key: &str) -> Duration {
    get().get_d(key)
}

pub fn get_l(key: &str) -> Vec<String> {
    get().get_l(key)
}

pub fn is(key: &str, value: &str) -> bool {
    get().is(key, value)
}

pub fn has_section(section: &str) -> bool {
    get().has_section(section)
}

pub fn has_prop(key: &str) -> bool {
    get().has_prop(key)
}

pub fn sections() -> Vec<String> {
    get().sections()
}

pub fn props(section: &str) -> Vec<String> {
    get().props(section)
}
