//! Section/property text parsing.
//!
//! # Format
//! ```text
//! # comment
//! [section]
//!     name: value
//!     empty:
//! ```
//!
//! # Design Decisions
//! - Leading indentation (spaces and tabs, mixed) is ignored
//! - Value is everything after the first colon, trimmed
//! - Lines that are neither headers nor contain a colon are ignored
//! - A property before the first section header rejects the whole text
//! - A leading UTF-8 byte order mark is dropped

use crate::config::store::PropertyMap;
use crate::error::{ParseError, ParseErrorKind};

const COMMENT_PREFIX: char = '#';
const BYTE_ORDER_MARK: char = '\u{feff}';

/// A single classified line of input.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Comment,
    Section(&'a str),
    Property(&'a str, &'a str),
    Other,
}

fn classify(raw: &str) -> Line<'_> {
    let line = raw.trim();

    if line.is_empty() {
        return Line::Blank;
    }

    if line.starts_with(COMMENT_PREFIX) {
        return Line::Comment;
    }

    if line.len() >= 2 && line.starts_with('[') && line.ends_with(']') {
        return Line::Section(line[1..line.len() - 1].trim());
    }

    match line.split_once(':') {
        Some((name, value)) => Line::Property(name.trim(), value.trim()),
        None => Line::Other,
    }
}

/// Parse configuration text into a flat property map.
pub fn parse(text: &str) -> Result<PropertyMap, ParseError> {
    let mut map = PropertyMap::new();
    let mut section: Option<&str> = None;
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;

        match classify(raw) {
            Line::Blank | Line::Comment => {}
            Line::Section(name) => {
                if name.is_empty() {
                    return Err(ParseError {
                        line,
                        kind: ParseErrorKind::EmptySectionName,
                    });
                }
                map.add_section(name);
                section = Some(name);
            }
            Line::Property(name, value) => {
                let Some(current) = section else {
                    return Err(ParseError {
                        line,
                        kind: ParseErrorKind::PropertyOutsideSection,
                    });
                };
                if name.is_empty() {
                    return Err(ParseError {
                        line,
                        kind: ParseErrorKind::EmptyPropertyName,
                    });
                }
                map.insert(current, name, value);
            }
            Line::Other => {
                tracing::trace!(line, "Skipping unrecognized line");
            }
        }
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("   \t "), Line::Blank);
        assert_eq!(classify("  # test2: 100"), Line::Comment);
        assert_eq!(classify("\t[ file-mode ]  "), Line::Section("file-mode"));
        assert_eq!(classify("  test1:      1"), Line::Property("test1", "1"));
        assert_eq!(classify("test6: "), Line::Property("test6", ""));
        assert_eq!(classify("url: http://host:80"), Line::Property("url", "http://host:80"));
        assert_eq!(classify("garbage"), Line::Other);
    }

    #[test]
    fn test_indentation_and_tabs() {
        let text = "    [formating]\ntest1:      1\n            test2:2\n\n\t\ttest3: 3\n";
        let map = parse(text).unwrap();

        assert_eq!(map.raw("formating:test1"), Some("1"));
        assert_eq!(map.raw("formating:test2"), Some("2"));
        assert_eq!(map.raw("formating:test3"), Some("3"));
    }

    #[test]
    fn test_sections_and_props_order() {
        let text = "[b]\nx: 1\n[a]\nz: 2\ny: 3\n[b]\nw: 4\n";
        let map = parse(text).unwrap();

        assert_eq!(map.sections(), ["b", "a"]);
        assert_eq!(map.props("a"), ["z", "y"]);
        assert_eq!(map.props("b"), ["x", "w"]);
    }

    #[test]
    fn test_comments_and_empty_values() {
        let map = parse("[comment]\n  test1: 100\n  # test2: 100\n  test3:\n").unwrap();

        assert_eq!(map.raw("comment:test1"), Some("100"));
        assert_eq!(map.raw("comment:test2"), None);
        assert_eq!(map.raw("comment:test3"), Some(""));
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let map = parse("[Main]\nName: x\n").unwrap();

        assert_eq!(map.raw("Main:Name"), Some("x"));
        assert_eq!(map.raw("main:name"), None);
    }

    #[test]
    fn test_property_before_section() {
        let err = parse("\n  test1: 123\n  test2: 111\n").unwrap_err();

        assert_eq!(err.line, 2);
        assert_eq!(err.kind, ParseErrorKind::PropertyOutsideSection);
    }

    #[test]
    fn test_comment_before_section_is_fine() {
        let map = parse("# header: comment\n[main]\nkey: value\n").unwrap();
        assert_eq!(map.raw("main:key"), Some("value"));
    }

    #[test]
    fn test_empty_names_rejected() {
        assert_eq!(parse("[ ]\n").unwrap_err().kind, ParseErrorKind::EmptySectionName);
        assert_eq!(
            parse("[main]\n: value\n").unwrap_err().kind,
            ParseErrorKind::EmptyPropertyName
        );
    }

    #[test]
    fn test_leading_byte_order_mark() {
        let map = parse("\u{feff}[main]\nname: app\n").unwrap();

        assert_eq!(map.sections(), ["main"]);
        assert_eq!(map.raw("main:name"), Some("app"));
    }
}
