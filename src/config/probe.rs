//! File and process probes used before loading a configuration file.

use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::Path;

/// Returns true if something exists at `path`.
pub fn is_exist(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Returns true if the current user can open `path` for reading.
pub fn is_readable(path: &Path) -> bool {
    match File::open(path) {
        Ok(_) => true,
        Err(e) => e.kind() != ErrorKind::PermissionDenied,
    }
}

/// Returns true if `path` is a regular file with zero bytes.
pub fn is_empty_file(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.len() == 0)
        .unwrap_or(false)
}

/// Returns true if the process runs with an effective uid of root.
pub fn is_privileged() -> bool {
    nix::unistd::geteuid().is_root()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_path() {
        let path = Path::new("/_not_exists_");
        assert!(!is_exist(path));
        assert!(!is_empty_file(path));
    }

    #[test]
    fn test_empty_and_non_empty_files() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.conf");
        let full = dir.path().join("full.conf");
        File::create(&empty).unwrap();
        File::create(&full).unwrap().write_all(b"[s]\n").unwrap();

        assert!(is_exist(&empty));
        assert!(is_readable(&empty));
        assert!(is_empty_file(&empty));
        assert!(!is_empty_file(&full));
        assert!(!is_empty_file(dir.path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file() {
        use std::os::unix::fs::PermissionsExt;

        if is_privileged() {
            return;
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secret.conf");
        File::create(&path).unwrap().write_all(b"[s]\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

        assert!(is_exist(&path));
        assert!(!is_readable(&path));
    }
}
