use std::fmt;

use crate::{CoreError, Result};

/// Separator between path segments (`Category.key`)
pub const PATH_SEPARATOR: char = '.';

/// Minimum number of segments accepted for a write
pub const MIN_WRITE_SEGMENTS: usize = 2;

/// A dotted settings path split into its segment keys.
///
/// The first segment names the category, the last one the leaf key, and
/// anything in between addresses nested mappings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SettingPath {
    raw: String,
    segments: Vec<String>,
}

impl SettingPath {
    /// Split a path for reading. The empty string has zero segments.
    pub fn parse(path: &str) -> Self {
        let segments = if path.is_empty() {
            Vec::new()
        } else {
            path.split(PATH_SEPARATOR).map(str::to_string).collect()
        };
        Self {
            raw: path.to_string(),
            segments,
        }
    }

    /// Split a path for writing, rejecting anything shorter than `category.key`.
    pub fn for_write(path: &str) -> Result<Self> {
        let parsed = Self::parse(path);
        if parsed.len() < MIN_WRITE_SEGMENTS {
            return Err(CoreError::InvalidPath {
                path: path.to_string(),
                segments: parsed.len(),
            });
        }
        Ok(parsed)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// First segment
    pub fn category(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// Last segment
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Every segment except the leaf
    pub fn parents(&self) -> &[String] {
        match self.segments.split_last() {
            Some((_, parents)) => parents,
            None => &[],
        }
    }
}

impl fmt::Display for SettingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_segments() {
        let path = SettingPath::parse("ExampleSettings.graphics");
        assert_eq!(path.len(), 2);
        assert_eq!(path.category(), Some("ExampleSettings"));
        assert_eq!(path.leaf(), Some("graphics"));
        assert_eq!(path.parents(), &["ExampleSettings".to_string()]);
    }

    #[test]
    fn test_parse_nested() {
        let path = SettingPath::parse("Audio.mixer.music.volume");
        assert_eq!(path.len(), 4);
        assert_eq!(path.parents().len(), 3);
        assert_eq!(path.leaf(), Some("volume"));
    }

    #[test]
    fn test_parse_empty_has_no_segments() {
        let path = SettingPath::parse("");
        assert!(path.is_empty());
        assert_eq!(path.category(), None);
        assert_eq!(path.leaf(), None);
        assert!(path.parents().is_empty());
    }

    #[test]
    fn test_parse_keeps_empty_segments() {
        let path = SettingPath::parse("A..b");
        assert_eq!(path.segments(), &["A".to_string(), String::new(), "b".to_string()]);
    }

    #[test]
    fn test_for_write_rejects_single_segment() {
        let err = SettingPath::for_write("onlyonesegment").unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidPath {
                path: "onlyonesegment".to_string(),
                segments: 1,
            }
        );
    }

    #[test]
    fn test_for_write_rejects_empty() {
        assert!(matches!(
            SettingPath::for_write(""),
            Err(CoreError::InvalidPath { segments: 0, .. })
        ));
    }

    #[test]
    fn test_for_write_accepts_category_key() {
        let path = SettingPath::for_write("A.b").unwrap();
        assert_eq!(path.to_string(), "A.b");
    }
}
