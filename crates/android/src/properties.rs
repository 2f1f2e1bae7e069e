//! `.properties` file parsing
//!
//! Reads the subset of the `java.util.Properties` text format that Gradle
//! build scripts load with `Properties.load`:
//! - `#` and `!` comment lines, blank lines
//! - `key=value` or `key:value` entries, first unescaped separator wins
//! - backslash line continuations
//! - `\t`, `\n`, `\r`, `\f`, `\uXXXX` and literal-character escapes
//!
//! Keys are trimmed on both sides. Values lose leading whitespace only;
//! trailing whitespace is part of the value, as in Java.

use crate::error::{BuildConfigError, Result};
use std::path::{Path, PathBuf};

/// Ordered key/value pairs loaded from a single property file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySet {
    path: PathBuf,
    entries: Vec<(String, String)>,
}

impl PropertySet {
    /// Parse property text. `path` is only used for error reporting.
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self> {
        let path = path.into();
        let mut entries: Vec<(String, String)> = Vec::new();

        for (line_no, logical) in logical_lines(content) {
            let malformed = |reason: &str| BuildConfigError::MalformedSource {
                path: path.clone(),
                line: line_no,
                reason: reason.to_string(),
            };

            let (raw_key, raw_value) = split_entry(&logical)
                .ok_or_else(|| malformed("expected key=value or key:value"))?;

            let key = unescape(trim_end_unescaped(raw_key.trim_start()))
                .map_err(|r| malformed(&r))?;
            if key.is_empty() {
                return Err(malformed("empty key"));
            }
            let value =
                unescape(raw_value.trim_start_matches(is_blank)).map_err(|r| malformed(&r))?;

            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = value,
                None => entries.push((key, value)),
            }
        }

        Ok(Self { path, entries })
    }

    /// Decode raw file bytes as UTF-8 and parse them
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Result<Self> {
        let path = path.into();
        match String::from_utf8(bytes) {
            Ok(content) => Self::parse(path, &content),
            Err(e) => {
                let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
                let line = valid.iter().filter(|b| **b == b'\n').count() + 1;
                Err(BuildConfigError::MalformedSource {
                    path,
                    line,
                    reason: "invalid UTF-8".to_string(),
                })
            }
        }
    }

    /// File this set was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the key is present, even with an empty value
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in file order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the file held no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Join continued physical lines, dropping comments and blank lines.
/// Yields the 1-based number of the first physical line of each entry.
fn logical_lines(content: &str) -> Vec<(usize, String)> {
    let mut result = Vec::new();
    let mut current: Option<(usize, String)> = None;

    for (idx, physical) in content.lines().enumerate() {
        let line = match current {
            Some(_) => physical.trim_start_matches(is_blank),
            None => {
                let trimmed = physical.trim_start_matches(is_blank);
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                trimmed
            }
        };

        let continues = trailing_backslashes(line) % 2 == 1;
        let body = if continues { &line[..line.len() - 1] } else { line };

        let (start, mut text) = current.take().unwrap_or((idx + 1, String::new()));
        text.push_str(body);

        if continues {
            current = Some((start, text));
        } else {
            result.push((start, text));
        }
    }

    // A continuation on the last line ends the entry
    if let Some(entry) = current {
        result.push(entry);
    }

    result
}

fn trailing_backslashes(s: &str) -> usize {
    s.bytes().rev().take_while(|b| *b == b'\\').count()
}

fn split_entry(line: &str) -> Option<(&str, &str)> {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '=' | ':' => return Some((&line[..i], &line[i + 1..])),
            _ => {}
        }
    }
    None
}

/// Trim trailing blanks unless the last one is escaped
fn trim_end_unescaped(s: &str) -> &str {
    let trimmed = s.trim_end_matches(is_blank);
    if trimmed.len() < s.len() && trailing_backslashes(trimmed) % 2 == 1 {
        // blanks are single-byte
        &s[..=trimmed.len()]
    } else {
        trimmed
    }
}

fn unescape(raw: &str) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = (hex.len() == 4 && hex.chars().all(|c| c.is_ascii_hexdigit()))
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32)
                    .ok_or_else(|| format!("malformed \\u escape: \\u{}", hex))?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse(content: &str) -> PropertySet {
        PropertySet::parse("test.properties", content).unwrap()
    }

    fn malformed_line(content: &str) -> usize {
        match PropertySet::parse("test.properties", content) {
            Err(BuildConfigError::MalformedSource { line, .. }) => line,
            other => panic!("expected MalformedSource, got {:?}", other),
        }
    }

    #[test]
    fn test_basic_entries() {
        let set = parse("storePassword=hunter2\nkeyAlias = upload\nstoreFile:upload.jks\n");
        assert_eq!(set.get("storePassword"), Some("hunter2"));
        assert_eq!(set.get("keyAlias"), Some("upload"));
        assert_eq!(set.get("storeFile"), Some("upload.jks"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let set = parse("# generated by flutter\n\n! legacy comment\n   \nsdk.dir=/opt/android\n");
        assert_eq!(set.keys().collect::<Vec<_>>(), vec!["sdk.dir"]);
    }

    #[test]
    fn test_empty_content() {
        let set = parse("");
        assert!(set.is_empty());
        assert_eq!(set.path(), Path::new("test.properties"));
    }

    #[test]
    fn test_first_separator_wins() {
        let set = parse("url=https://example.com/a=b\n");
        assert_eq!(set.get("url"), Some("https://example.com/a=b"));
    }

    #[test]
    fn test_escaped_separator_in_key() {
        let set = parse("a\\=b=c\n");
        assert_eq!(set.get("a=b"), Some("c"));
    }

    #[test]
    fn test_value_keeps_trailing_whitespace() {
        let set = parse("keyPassword=  secret  \n");
        assert_eq!(set.get("keyPassword"), Some("secret  "));
    }

    #[test]
    fn test_empty_value_is_present() {
        let set = parse("keyPassword=\n");
        assert!(set.contains_key("keyPassword"));
        assert_eq!(set.get("keyPassword"), Some(""));
    }

    #[test]
    fn test_duplicate_key_overwrites_in_place() {
        let set = parse("a=1\nb=2\na=3\n");
        assert_eq!(set.get("a"), Some("3"));
        assert_eq!(set.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_line_continuation() {
        let set = parse("storeFile=/home/dev/\\\n    keys/upload.jks\nnext=1\n");
        assert_eq!(set.get("storeFile"), Some("/home/dev/keys/upload.jks"));
        assert_eq!(set.get("next"), Some("1"));
    }

    #[test]
    fn test_even_backslashes_do_not_continue() {
        let set = parse("path=C:\\\\\nnext=1\n");
        assert_eq!(set.get("path"), Some("C:\\"));
        assert_eq!(set.get("next"), Some("1"));
    }

    #[test]
    fn test_continuation_at_eof() {
        let set = parse("a=1\\");
        assert_eq!(set.get("a"), Some("1"));
    }

    #[test]
    fn test_unicode_and_control_escapes() {
        let set = parse("name=Caf\\u00e9\\tbar\n");
        assert_eq!(set.get("name"), Some("Café\tbar"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let set = parse("a=1\r\nb=2\r\n");
        assert_eq!(set.get("a"), Some("1"));
        assert_eq!(set.get("b"), Some("2"));
    }

    #[test]
    fn test_missing_separator_is_malformed() {
        assert_eq!(malformed_line("a=1\n# note\nkeyAlias upload\n"), 3);
    }

    #[test]
    fn test_empty_key_is_malformed() {
        assert_eq!(malformed_line("  =value\n"), 1);
    }

    #[test]
    fn test_bad_unicode_escape_is_malformed() {
        assert_eq!(malformed_line("a=1\nb=\\u12\n"), 2);
        assert_eq!(malformed_line("b=\\uZZZZ\n"), 1);
        assert_eq!(malformed_line("b=\\u+041\n"), 1);
        assert_eq!(malformed_line("b=\\u-041\n"), 1);
    }

    #[test]
    fn test_malformed_reports_first_line_of_continuation() {
        assert_eq!(malformed_line("a=1\nbroken\\\n  still-broken\n"), 2);
    }

    #[test]
    fn test_invalid_utf8_reports_line() {
        let bytes = b"a=1\nb=\xff\n".to_vec();
        match PropertySet::from_bytes("bin.properties", bytes) {
            Err(BuildConfigError::MalformedSource { line, reason, .. }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("UTF-8"));
            }
            other => panic!("expected MalformedSource, got {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn prop_plain_entries_parse_verbatim(
            key in "[A-Za-z][A-Za-z0-9_.]{0,20}",
            value in "[A-Za-z0-9_./-]{0,30}",
        ) {
            let set = PropertySet::parse("p.properties", &format!("{}={}\n", key, value)).unwrap();
            prop_assert_eq!(set.get(&key), Some(value.as_str()));
        }

        #[test]
        fn prop_parse_never_panics(content in "\\PC{0,200}") {
            let _ = PropertySet::parse("p.properties", &content);
        }
    }
}
