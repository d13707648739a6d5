//! Property storage and the reloadable `Config` handle.
//!
//! # Design Decisions
//! - `PropertyMap` is immutable once parsed; a reload builds a new one
//! - `Config` holds its map behind an `ArcSwap`, so a reload is a single
//!   pointer swap and readers never block
//! - A default `Config` is inert: no path, no data, every read degrades

use arc_swap::ArcSwap;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::loader::read_config;
use crate::config::macros;
use crate::config::parser::parse;
use crate::error::{LoadError, ParseError};
use crate::observability::metrics;

/// Flat mapping of composite `section:property` keys to raw values.
///
/// Section and property order is kept as first seen in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    values: HashMap<String, String>,
    sections: Vec<String>,
    props: HashMap<String, Vec<String>>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a section, keeping first-seen order.
    pub fn add_section(&mut self, section: &str) {
        if !self.props.contains_key(section) {
            self.sections.push(section.to_string());
            self.props.insert(section.to_string(), Vec::new());
        }
    }

    /// Store a property; a repeated property keeps its position and takes the new value.
    pub fn insert(&mut self, section: &str, prop: &str, value: &str) {
        self.add_section(section);

        let key = format!("{}:{}", section, prop);
        if self.values.insert(key, value.to_string()).is_none() {
            if let Some(props) = self.props.get_mut(section) {
                props.push(prop.to_string());
            }
        }
    }

    /// Raw (unresolved) value for a composite key.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Value for a composite key with all macro tokens expanded.
    pub fn resolve(&self, key: &str) -> Option<String> {
        macros::resolve(self, key)
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.props.contains_key(section)
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn props(&self, section: &str) -> &[String] {
        self.props.get(section).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All composite keys, grouped by section in source order.
    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.sections.iter().flat_map(move |section| {
            self.props(section)
                .iter()
                .map(move |prop| format!("{}:{}", section, prop))
        })
    }

    /// Number of stored properties.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::str::FromStr for PropertyMap {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse(text)
    }
}

/// Per-key result of a reload: `true` when the resolved value changed,
/// appeared or disappeared, `false` when it stayed the same.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReloadDiff(BTreeMap<String, bool>);

impl ReloadDiff {
    /// Compare two maps by resolved value over the union of their keys.
    pub fn between(old: &PropertyMap, new: &PropertyMap) -> Self {
        let keys: BTreeSet<String> = old.keys().chain(new.keys()).collect();

        let entries = keys
            .into_iter()
            .map(|key| {
                let changed = old.resolve(&key) != new.resolve(&key);
                (key, changed)
            })
            .collect();

        Self(entries)
    }

    /// Whether `key` changed. Keys absent from both loads report `false`.
    pub fn is_changed(&self, key: &str) -> bool {
        self.0.get(key).copied().unwrap_or(false)
    }

    /// Raw entry for `key`, `None` if the key was in neither load.
    pub fn get(&self, key: &str) -> Option<bool> {
        self.0.get(key).copied()
    }

    pub fn changed_keys(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, changed)| **changed)
            .map(|(key, _)| key.as_str())
    }

    pub fn changed_count(&self) -> usize {
        self.0.values().filter(|changed| **changed).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(key, changed)| (key.as_str(), *changed))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A loaded configuration file.
///
/// Readers go through the typed accessors (`config::access::PropertySource`).
/// `reload` replaces the whole map at once; a reader that needs several
/// values from the same load should take a `snapshot` first.
#[derive(Debug, Default)]
pub struct Config {
    file: Option<PathBuf>,
    data: ArcSwap<PropertyMap>,
}

impl Config {
    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let map = read_config(path);
        metrics::record_load(map.as_ref().err());
        let map = map?;

        tracing::debug!(
            path = %path.display(),
            sections = map.sections().len(),
            properties = map.len(),
            "Configuration loaded"
        );

        Ok(Self {
            file: Some(path.to_path_buf()),
            data: ArcSwap::from_pointee(map),
        })
    }

    /// Build a Config from text. It has no backing file, so it can't be reloaded.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Ok(Self::from_map(parse(text)?))
    }

    pub fn from_map(map: PropertyMap) -> Self {
        Self {
            file: None,
            data: ArcSwap::from_pointee(map),
        }
    }

    /// Path of the source file, if loaded from one.
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// The current map. Later reloads don't affect the returned snapshot.
    pub fn snapshot(&self) -> Arc<PropertyMap> {
        self.data.load_full()
    }

    /// Re-read the source file and swap in the new data.
    ///
    /// On failure the current data is kept untouched.
    pub fn reload(&self) -> Result<ReloadDiff, LoadError> {
        let path = self.file.as_deref().ok_or(LoadError::NotInitialized)?;

        let map = match read_config(path) {
            Ok(map) => map,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "Failed to reload config. Keeping current configuration."
                );
                metrics::record_reload(Some(&err), 0);
                return Err(err);
            }
        };

        let new = Arc::new(map);
        let old = self.data.swap(Arc::clone(&new));
        let diff = ReloadDiff::between(&old, &new);

        tracing::info!(
            path = %path.display(),
            changed = diff.changed_count(),
            "Configuration reloaded"
        );
        metrics::record_reload(None, diff.changed_count());

        Ok(diff)
    }

    pub(crate) fn data(&self) -> arc_swap::Guard<Arc<PropertyMap>> {
        self.data.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_map_insert() {
        let mut map = PropertyMap::new();
        map.insert("main", "a", "1");
        map.insert("main", "b", "2");
        map.insert("main", "a", "3");
        map.add_section("empty");

        assert_eq!(map.raw("main:a"), Some("3"));
        assert_eq!(map.props("main"), ["a", "b"]);
        assert_eq!(map.sections(), ["main", "empty"]);
        assert!(map.has_section("empty"));
        assert!(map.props("empty").is_empty());
        assert!(map.props("missing").is_empty());
        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().collect::<Vec<_>>(), ["main:a", "main:b"]);
    }

    #[test]
    fn test_from_str() {
        let map: PropertyMap = "[s]\nk: v\n".parse().unwrap();
        assert_eq!(map.raw("s:k"), Some("v"));
        assert!("k: v\n".parse::<PropertyMap>().is_err());
    }

    #[test]
    fn test_diff_compares_resolved_values() {
        let old: PropertyMap = "[s]\nbase: 1\nderived: {macro:base}0\nsame: x\ngone: y\n"
            .parse()
            .unwrap();
        let new: PropertyMap = "[s]\nbase: 2\nderived: {macro:base}0\nsame: x\nnew: z\n"
            .parse()
            .unwrap();

        let diff = ReloadDiff::between(&old, &new);

        assert_eq!(diff.get("s:base"), Some(true));
        assert_eq!(diff.get("s:derived"), Some(true));
        assert_eq!(diff.get("s:same"), Some(false));
        assert_eq!(diff.get("s:gone"), Some(true));
        assert_eq!(diff.get("s:new"), Some(true));
        assert_eq!(diff.get("s:unknown"), None);
        assert_eq!(diff.len(), 5);
        assert_eq!(diff.changed_count(), 4);
        assert_eq!(
            diff.changed_keys().collect::<Vec<_>>(),
            ["s:base", "s:derived", "s:gone", "s:new"]
        );
    }

    #[test]
    fn test_diff_serializes_as_map() {
        let old: PropertyMap = "[s]\na: 1\n".parse().unwrap();
        let new: PropertyMap = "[s]\na: 2\n".parse().unwrap();
        let json = serde_json::to_string(&ReloadDiff::between(&old, &new)).unwrap();
        assert_eq!(json, r#"{"s:a":true}"#);
    }

    #[test]
    fn test_default_config_is_inert() {
        let config = Config::default();

        assert!(config.file().is_none());
        assert!(config.snapshot().is_empty());
        assert!(matches!(config.reload(), Err(LoadError::NotInitialized)));
    }

    #[test]
    fn test_parsed_config_cannot_reload() {
        let config = Config::parse("[s]\nk: v\n").unwrap();

        assert_eq!(config.snapshot().raw("s:k"), Some("v"));
        assert!(matches!(config.reload(), Err(LoadError::NotInitialized)));
    }

    #[test]
    fn test_reload_missing_file() {
        let config = Config {
            file: Some(PathBuf::from("/_not_exists_")),
            data: ArcSwap::from_pointee(PropertyMap::new()),
        };

        let err = config.reload().unwrap_err();
        assert_eq!(err.to_string(), "File /_not_exists_ does not exist");
    }
}
