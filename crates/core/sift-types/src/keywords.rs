//! Keyword filter loaded once per search run.

use sift_error::{Result, SiftError, StorageError};
use std::path::Path;
use tracing::debug;

/// An ordered set of non-empty keywords.
///
/// A document matches when any keyword occurs in its raw bytes as a literal,
/// case-sensitive substring. An empty set never matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Build a set from candidate keywords, dropping empty ones.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(Into::into)
                .filter(|kw: &String| !kw.is_empty())
                .collect(),
        }
    }

    /// Parse newline-delimited keywords. Blank lines are ignored and a
    /// trailing `\r` is stripped from each line.
    pub fn parse(content: &str) -> Self {
        Self::new(content.split('\n').map(|line| line.trim_end_matches('\r')))
    }

    /// Load a newline-delimited keyword file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SiftError::from(StorageError::read(path, e)))?;

        let set = Self::parse(&content);
        debug!(path = %path.display(), keywords = set.len(), "Loaded keywords");

        Ok(set)
    }

    /// Return the first keyword contained in `haystack`, if any.
    pub fn first_match(&self, haystack: &[u8]) -> Option<&str> {
        self.keywords
            .iter()
            .find(|kw| contains(haystack, kw.as_bytes()))
            .map(String::as_str)
    }

    pub fn matches(&self, haystack: &[u8]) -> bool {
        self.first_match(haystack).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() || needle.len() > haystack.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_skips_blank_lines() {
        let set = KeywordSet::parse("password\n\nsecret\r\n\n");
        let keywords: Vec<_> = set.iter().collect();
        assert_eq!(keywords, vec!["password", "secret"]);
    }

    #[test]
    fn test_matches_substring() {
        let set = KeywordSet::new(["login", "token"]);

        assert!(set.matches(br#"{"meta":{"resource":"/api/auth/login"}}"#));
        assert_eq!(set.first_match(b"xx token login"), Some("login"));
        assert!(!set.matches(b"nothing to see"));
    }

    #[test]
    fn test_matches_case_sensitive() {
        let set = KeywordSet::new(["Login"]);
        assert!(!set.matches(b"login"));
        assert!(set.matches(b"Login"));
    }

    #[test]
    fn test_empty_set_never_matches() {
        let set = KeywordSet::new(Vec::<String>::new());
        assert!(set.is_empty());
        assert!(!set.matches(b"anything"));
        assert!(!set.matches(b""));
    }

    #[test]
    fn test_needle_longer_than_haystack() {
        let set = KeywordSet::new(["a-very-long-keyword"]);
        assert!(!set.matches(b"short"));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"alpha\nbeta\n").unwrap();

        let set = KeywordSet::load(file.path()).await.unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.matches(b"...beta..."));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = KeywordSet::load("/nonexistent/keywords.csv").await;
        assert!(matches!(result, Err(SiftError::Storage(StorageError::Read { .. }))));
    }
}
