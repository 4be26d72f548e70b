use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use include_dir::{include_dir, Dir};
use tracing::{debug, warn};

static DICT_DIR: Dir = include_dir!("src/dict");

const EMBEDDED_FILE: &str = "corrections.properties";

/// One dictionary entry: either a whole-word replacement or a marker that
/// the word must be left alone even when it matches a heuristic pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictEntry {
    Exception,
    Replace(String),
}

/// Case-sensitive map of known problem words, read-only after construction.
///
/// Entries come from a properties-style resource: `wrong=right` supplies a
/// substitution, `wrong=` (or a bare `wrong`) registers an exception case.
/// Replacements must have the same character count as their key; offending
/// entries are dropped at parse time so substitution can never change the
/// length of a line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: HashMap<String, DictEntry>,
}

impl Dictionary {
    /// Parses properties-format text. Lines starting with `#` or `!` are
    /// comments; blank lines are skipped; the first `=` splits key from value.
    pub fn parse(text: &str) -> Self {
        let mut entries = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let (word, replacement) = match line.split_once('=') {
                Some((w, r)) => (w.trim(), r.trim()),
                None => (line, ""),
            };
            if word.is_empty() {
                continue;
            }
            if replacement.is_empty() {
                entries.insert(word.to_string(), DictEntry::Exception);
            } else if replacement.chars().count() == word.chars().count() {
                entries.insert(word.to_string(), DictEntry::Replace(replacement.to_string()));
            } else {
                warn!("dropping dictionary entry with length mismatch: {line}");
            }
        }
        Self { entries }
    }

    /// The dictionary bundled with the binary.
    pub fn embedded() -> Self {
        match DICT_DIR
            .get_file(EMBEDDED_FILE)
            .and_then(|file| file.contents_utf8())
        {
            Some(text) => Self::parse(text),
            None => {
                warn!("embedded corrections resource missing, continuing without it");
                Self::default()
            }
        }
    }

    /// Reads and parses a user-supplied corrections file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("unable to read corrections file {}", path.display()))?;
        Ok(Self::parse(&text))
    }

    /// Layers `other` over this dictionary; entries in `other` win.
    pub fn extend(&mut self, other: Dictionary) {
        self.entries.extend(other.entries);
    }

    /// True iff `word` is registered as a heuristic false positive.
    pub fn is_exception(&self, word: &str) -> bool {
        let result = matches!(self.entries.get(word), Some(DictEntry::Exception));
        if result {
            debug!("encountered exception case: {word}");
        }
        result
    }

    /// The registered replacement for `word`, if any.
    pub fn lookup(&self, word: &str) -> Option<&str> {
        match self.entries.get(word) {
            Some(DictEntry::Replace(replacement)) => Some(replacement),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parse_splits_exceptions_and_replacements() {
        let dict = Dictionary::parse("All=\nwouid=would\n");

        assert!(dict.is_exception("All"));
        assert!(!dict.is_exception("wouid"));
        assert_eq!(dict.lookup("wouid"), Some("would"));
        assert_eq!(dict.lookup("All"), None);
    }

    #[test]
    fn parse_skips_comments_and_blanks() {
        let dict = Dictionary::parse("# comment\n\n! another\nIan=\n");

        assert_eq!(dict.len(), 1);
        assert!(dict.is_exception("Ian"));
    }

    #[test]
    fn bare_key_is_an_exception() {
        let dict = Dictionary::parse("lying\n");

        assert!(dict.is_exception("lying"));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let dict = Dictionary::parse("wouid=would\n");

        assert_eq!(dict.lookup("Wouid"), None);
        assert!(!dict.is_exception("WOUID"));
    }

    #[test]
    fn length_mismatch_entries_are_rejected() {
        let dict = Dictionary::parse("wiil=will\nIm=I'm\n");

        assert_eq!(dict.lookup("wiil"), Some("will"));
        assert_eq!(dict.lookup("Im"), None);
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn extend_prefers_the_overlay() {
        let mut dict = Dictionary::parse("waik=walk\ntaik=talk\n");
        dict.extend(Dictionary::parse("waik=\n"));

        assert!(dict.is_exception("waik"));
        assert_eq!(dict.lookup("taik"), Some("talk"));
    }

    #[test]
    fn embedded_resource_parses() {
        let dict = Dictionary::embedded();

        assert!(!dict.is_empty());
        assert!(dict.is_exception("All"));
        assert_matches!(dict.lookup("wouid"), Some("would"));
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Dictionary::load(&dir.path().join("nope.properties"));

        assert!(result.is_err());
    }

    #[test]
    fn load_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.properties");
        std::fs::write(&path, "HI=\n").unwrap();

        let dict = Dictionary::load(&path).unwrap();
        assert!(dict.is_exception("HI"));
    }
}
