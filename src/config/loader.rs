//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::parser::parse;
use crate::config::probe;
use crate::config::store::PropertyMap;
use crate::error::LoadError;

/// Read and parse a configuration file.
///
/// Each failure mode is reported separately: missing, empty, unreadable,
/// malformed, or any other I/O error.
pub fn read_config(path: &Path) -> Result<PropertyMap, LoadError> {
    if !probe::is_exist(path) {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    if !probe::is_readable(path) {
        return Err(LoadError::Unreadable {
            path: path.to_path_buf(),
        });
    }

    if probe::is_empty_file(path) {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse(&content).map_err(|source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;

    #[test]
    fn test_read_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.conf");
        fs::write(&path, "[main]\n  name: app\n").unwrap();

        let map = read_config(&path).unwrap();
        assert_eq!(map.raw("main:name"), Some("app"));
    }

    #[test]
    fn test_failure_modes() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.conf");
        assert!(matches!(read_config(&missing), Err(LoadError::NotFound { .. })));

        let empty = dir.path().join("empty.conf");
        fs::write(&empty, "").unwrap();
        assert!(matches!(read_config(&empty), Err(LoadError::Empty { .. })));

        let malformed = dir.path().join("malf.conf");
        fs::write(&malformed, "\n  test1: 123\n  test2: 111\n").unwrap();
        match read_config(&malformed) {
            Err(LoadError::Malformed { path, source }) => {
                assert_eq!(path, malformed);
                assert_eq!(source.kind, ParseErrorKind::PropertyOutsideSection);
            }
            other => panic!("expected malformed error, got {:?}", other),
        }
    }

    #[test]
    fn test_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(read_config(dir.path()), Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_byte_order_mark_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.conf");
        fs::write(&path, "\u{feff}[main]\n  name: app\n").unwrap();

        let map = read_config(&path).unwrap();
        assert_eq!(map.raw("main:name"), Some("app"));
    }
}
