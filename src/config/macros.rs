//! Macro substitution in property values.
//!
//! A value may reference other properties with `{macro:name}` (same
//! section as the referencing property) or `{macro:section:name}`.
//! References are expanded depth-first on every read; nothing is cached.
//!
//! # Design Decisions
//! - Best effort: unknown references and malformed tokens (`{ABC}`, `{}`,
//!   `{macro:}`) stay in the output verbatim
//! - A reference back to a key already being expanded is a cycle; that
//!   token is left verbatim, so resolution always terminates

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::config::store::PropertyMap;

static MACRO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{macro:([^{}]+)\}").expect("macro pattern is valid")
});

/// Resolve the value stored under `key`, expanding all macro tokens.
///
/// Returns `None` only when `key` itself is absent.
pub fn resolve(map: &PropertyMap, key: &str) -> Option<String> {
    let raw = map.raw(key)?;
    let mut path = Vec::new();
    Some(expand(map, key, raw, &mut path))
}

fn expand(map: &PropertyMap, key: &str, raw: &str, path: &mut Vec<String>) -> String {
    if !raw.contains("{macro:") {
        return raw.to_string();
    }

    path.push(key.to_string());
    let section = section_of(key);

    let expanded = MACRO_RE.replace_all(raw, |caps: &Captures| {
        let target = qualify(section, &caps[1]);

        if path.iter().any(|k| *k == target) {
            tracing::debug!(key = %key, reference = %target, "Macro reference cycle, leaving token as is");
            return caps[0].to_string();
        }

        match map.raw(&target) {
            Some(value) => expand(map, &target, value, path),
            None => caps[0].to_string(),
        }
    });

    path.pop();
    expanded.into_owned()
}

fn section_of(key: &str) -> Option<&str> {
    key.split_once(':').map(|(section, _)| section)
}

fn qualify(section: Option<&str>, name: &str) -> String {
    match section {
        Some(section) if !name.contains(':') => format!("{}:{}", section, name),
        _ => name.to_string(),
    }
}
