//! Validators over a loaded file.

use propconf::config::validation::{
    equals, greater, less, not_contains, not_len, not_prefix, type_bool, type_num, validate,
};
use propconf::{Config, ValidationError, Validator};

mod common;
use common::{Fixture, CONFIG_DATA};

#[test]
fn test_validate_loaded_file() {
    let fixture = Fixture::new();
    let config = Config::load(fixture.write("app.conf", CONFIG_DATA)).unwrap();

    let errs = config.validate(&[
        Validator::new("integer:test3", less, 1000),
        Validator::new("integer:test3", greater, 100_000_000),
        Validator::new("integer:test5", equals, 0),
        Validator::new("string:test1", not_contains, ["test", "prod"]),
        Validator::new("string:test1", not_len, 4),
        Validator::new("string:test1", not_prefix, "/"),
        Validator::new("boolean:test1", type_bool, ()),
        Validator::new("integer:test5", type_num, ()),
    ]);
    assert!(errs.is_empty(), "unexpected errors: {:?}", errs);

    let errs = config.validate(&[
        Validator::new("integer:test3", greater, 1000),
        Validator::new("integer:test4", less, 0),
        Validator::new("macro:test2", equals, 100.5),
        Validator::new("boolean:test6", type_bool, ()),
        Validator::new("string:test1", not_contains, 1),
    ]);

    assert_eq!(errs.len(), 5);
    assert!(matches!(errs[0], ValidationError::AboveMaximum { .. }));
    assert!(matches!(errs[1], ValidationError::CheckerMisuse { .. }));
    assert!(matches!(errs[2], ValidationError::NotEqual { .. }));
    assert!(matches!(errs[3], ValidationError::WrongType { .. }));
    assert!(matches!(errs[4], ValidationError::CheckerMisuse { .. }));
    assert_eq!(errs[1].key(), Some("integer:test4"));
}

#[test]
fn test_missing_store() {
    let errs = validate::<Config>(None, &[Validator::new("a:b", less, 1)]);
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].to_string(), "Config is nil");
}
