//! Word lists, grouped by the part of speech a pattern token asks for.
//!
//! The order of every list is load-bearing: a word is picked by
//! `hash % list.len()`, so reordering or editing a list changes every hash
//! rendered from it.

use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, PatternError};

/// Semantic type of the word a token generates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordCategory {
    Adjective,
    Adverb,
    Noun,
    /// Present simple tense ("throw", "eat", "sing").
    Verb,
    VerbPast,
    /// Present participle ("throwing").
    VerbGerund,
}

impl WordCategory {
    pub const ALL: [WordCategory; 6] = [
        WordCategory::Adjective,
        WordCategory::Adverb,
        WordCategory::Noun,
        WordCategory::Verb,
        WordCategory::VerbPast,
        WordCategory::VerbGerund,
    ];

    /// File name used when loading this category from a word directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            WordCategory::Adjective => "adjectives.txt",
            WordCategory::Adverb => "adverbs.txt",
            WordCategory::Noun => "nouns.txt",
            WordCategory::Verb => "verbs.txt",
            WordCategory::VerbPast => "verbs_past.txt",
            WordCategory::VerbGerund => "verbs_gerund.txt",
        }
    }

    fn index(&self) -> usize {
        match self {
            WordCategory::Adjective => 0,
            WordCategory::Adverb => 1,
            WordCategory::Noun => 2,
            WordCategory::Verb => 3,
            WordCategory::VerbPast => 4,
            WordCategory::VerbGerund => 5,
        }
    }

    fn default_list(&self) -> &'static str {
        match self {
            WordCategory::Adjective => include_str!("../words/adjectives.txt"),
            WordCategory::Adverb => include_str!("../words/adverbs.txt"),
            WordCategory::Noun => include_str!("../words/nouns.txt"),
            WordCategory::Verb => include_str!("../words/verbs.txt"),
            WordCategory::VerbPast => include_str!("../words/verbs_past.txt"),
            WordCategory::VerbGerund => include_str!("../words/verbs_gerund.txt"),
        }
    }
}

impl fmt::Display for WordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WordCategory::Adjective => "adjective",
            WordCategory::Adverb => "adverb",
            WordCategory::Noun => "noun",
            WordCategory::Verb => "verb",
            WordCategory::VerbPast => "past-tense verb",
            WordCategory::VerbGerund => "gerund verb",
        };
        f.write_str(name)
    }
}

/// Parse a word list: one word per line, blank lines and `#` comments skipped.
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect()
}

/// Per-category word lists used for lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordBank {
    lists: [Vec<String>; 6],
}

impl WordBank {
    /// A bank with every list empty. Fill it with [`WordBank::with_words`].
    pub fn empty() -> Self {
        Self {
            lists: Default::default(),
        }
    }

    /// The compiled-in English lists, parsed once per process.
    pub fn english() -> &'static WordBank {
        static ENGLISH: OnceLock<WordBank> = OnceLock::new();
        ENGLISH.get_or_init(|| {
            let mut bank = WordBank::empty();
            for category in WordCategory::ALL {
                bank.set_words(category, parse_word_list(category.default_list()));
            }
            bank
        })
    }

    /// Load replacement lists from `dir`. Categories without a file in the
    /// directory keep the English defaults.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let mut bank = WordBank::english().clone();

        for category in WordCategory::ALL {
            let path = dir.join(category.file_name());
            if !path.exists() {
                continue;
            }
            let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::WordList {
                path: path.clone(),
                source,
            })?;
            let words = parse_word_list(&text);
            debug!("loaded {} {} words from {:?}", words.len(), category, path);
            bank.set_words(category, words);
        }

        Ok(bank)
    }

    pub fn with_words(mut self, category: WordCategory, words: &[&str]) -> Self {
        self.lists[category.index()].extend(words.iter().map(|w| w.to_string()));
        self
    }

    pub fn set_words(&mut self, category: WordCategory, words: Vec<String>) {
        self.lists[category.index()] = words;
    }

    pub fn words(&self, category: WordCategory) -> &[String] {
        &self.lists[category.index()]
    }

    pub fn len(&self, category: WordCategory) -> usize {
        self.words(category).len()
    }

    /// Fails on the first of `categories` whose list is empty.
    pub fn ensure_non_empty<I>(&self, categories: I) -> Result<(), PatternError>
    where
        I: IntoIterator<Item = WordCategory>,
    {
        for category in categories {
            if self.words(category).is_empty() {
                return Err(PatternError::EmptyWordList(category));
            }
        }
        Ok(())
    }
}

impl Default for WordBank {
    fn default() -> Self {
        WordBank::english().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_lists_are_populated() {
        let bank = WordBank::english();
        for category in WordCategory::ALL {
            assert!(bank.len(category) > 50, "{} list too short", category);
        }
    }

    #[test]
    fn test_verb_tenses_are_parallel() {
        let bank = WordBank::english();
        let present = bank.words(WordCategory::Verb);
        let past = bank.words(WordCategory::VerbPast);
        let gerund = bank.words(WordCategory::VerbGerund);
        assert_eq!(present.len(), past.len());
        assert_eq!(present.len(), gerund.len());

        let run = present.iter().position(|w| w == "run").unwrap();
        assert_eq!(past[run], "ran");
        assert_eq!(gerund[run], "running");
    }

    #[test]
    fn test_parse_word_list_skips_blanks_and_comments() {
        let words = parse_word_list("# animals\nfox\n\n  owl  \n#bird\nwren\n");
        assert_eq!(words, vec!["fox", "owl", "wren"]);
    }

    #[test]
    fn test_ensure_non_empty() {
        let bank = WordBank::empty().with_words(WordCategory::Noun, &["fox"]);
        assert!(bank.ensure_non_empty([WordCategory::Noun]).is_ok());
        assert_eq!(
            bank.ensure_non_empty([WordCategory::Noun, WordCategory::Adverb]),
            Err(PatternError::EmptyWordList(WordCategory::Adverb))
        );
    }

    #[test]
    fn test_from_dir_overrides_only_present_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("nouns.txt"), "fox\nowl\n").unwrap();

        let bank = WordBank::from_dir(dir.path()).unwrap();
        assert_eq!(bank.words(WordCategory::Noun), ["fox", "owl"]);
        assert_eq!(
            bank.words(WordCategory::Adjective),
            WordBank::english().words(WordCategory::Adjective)
        );
    }

    #[test]
    fn test_from_dir_keeps_empty_file_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("adverbs.txt"), "# nothing here\n").unwrap();

        let bank = WordBank::from_dir(dir.path()).unwrap();
        assert_eq!(bank.len(WordCategory::Adverb), 0);
    }
}
