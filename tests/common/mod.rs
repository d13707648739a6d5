//! Shared fixtures for integration tests.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Configuration exercising every accessor, comments, odd indentation and macros.
pub const CONFIG_DATA: &str = "
    [formating]
test1:      1
            test2:2

\t\ttest3: 3

[string]
  test1: test
  test2: true
  test3: 4500
  test4: !$%^&
  test5: long long long long text for test
  test6: 

[boolean]
  test1: true
  test2: false
  test3: 0
  test4: 1
  test5:
  test6: example for test

[integer]
  test1: 1
  test2: -5
  test3: 10000000
  test4: A
  test5: 0xFF
  test6: 123.4
  test7: 123.456789
  test8: 0xZZYY
  test9: ABCD

[file-mode]
  test1: 644
  test2: 0644
  test3: 0
  test4: ABC
  test5: true

[comment]
  test1: 100
  # test2: 100

[macro]
  test1: 100
  test2: {macro:test1}.50
  test3: Value is {macro:test2}
  test4: \"{macro:test3}\"
  test5: {ABC}
  test6: {}

[k]
  t: 1
";

/// Properties before any section header.
pub const MALFORMED_DATA: &str = "
  test1: 123
  test2: 111
";

/// A temporary directory holding config files; removed on drop.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Write `content` to `name` inside the fixture directory.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }
}
