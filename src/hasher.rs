use std::io::BufRead;
use std::path::Path;

use anyhow::Context;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::chain::{random_seed, seed_from_bytes, seed_from_str};
use crate::collision::CollisionReport;
use crate::error::{ConfigError, PatternError, Result};
use crate::pattern::{Pattern, DEFAULT_PATTERN};
use crate::render::{render, render_with_stats};
use crate::words::WordBank;

/// Settings for building a [`HumanHasher`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HasherOptions {
    pub pattern: String,
    /// Let consecutive tokens of the same category render the same word.
    pub allow_repeats: bool,
    /// Log the pattern's collision odds once, when the hasher is built.
    pub report_collision_rate: bool,
    /// Reject unknown tokens instead of rendering them literally.
    pub strict: bool,
}

impl Default for HasherOptions {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            allow_repeats: false,
            report_collision_rate: false,
            strict: false,
        }
    }
}

impl HasherOptions {
    /// Load options from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        let load = || -> anyhow::Result<Self> {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {:?}", path))?;
            Ok(serde_json::from_str(&content)?)
        };
        load().map_err(|source| ConfigError::Options {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Human-readable hashing engine: a compiled pattern, the word lists it draws
/// from and the repeat policy.
///
/// All configuration is fixed at construction, so a hasher can be shared
/// across threads and every `hash_*` call is a pure function of its input
/// (except [`HumanHasher::random`]).
#[derive(Debug, Clone)]
pub struct HumanHasher {
    pattern: Pattern,
    words: WordBank,
    allow_repeats: bool,
}

impl HumanHasher {
    /// English word lists with the default `%A%V{G}%N` pattern.
    pub fn new() -> Self {
        Self {
            pattern: Pattern::default(),
            words: WordBank::default(),
            allow_repeats: false,
        }
    }

    /// English word lists with a custom, leniently parsed pattern.
    pub fn with_pattern(pattern: &str) -> Self {
        Self {
            pattern: Pattern::parse(pattern),
            ..Self::new()
        }
    }

    pub fn from_options(options: &HasherOptions, words: WordBank) -> std::result::Result<Self, PatternError> {
        let pattern = if options.strict {
            Pattern::compile(&options.pattern)?
        } else {
            Pattern::parse(&options.pattern)
        };
        debug!("using pattern: {}", pattern.as_str());
        words.ensure_non_empty(pattern.categories())?;

        let hasher = Self {
            pattern,
            words,
            allow_repeats: options.allow_repeats,
        };
        if options.report_collision_rate {
            info!("{}", hasher.collision_report());
        }
        Ok(hasher)
    }

    pub fn allow_repeats(mut self, allow_repeats: bool) -> Self {
        self.allow_repeats = allow_repeats;
        self
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn words(&self) -> &WordBank {
        &self.words
    }

    /// Collision odds for the configured pattern and word lists.
    pub fn collision_report(&self) -> CollisionReport {
        let sizes = self
            .pattern
            .categories()
            .map(|category| self.words.len(category) as u64)
            .collect();
        CollisionReport::from_sizes(sizes)
    }

    pub fn hash_uint(&self, seed: u64) -> std::result::Result<String, PatternError> {
        render(&self.pattern, seed, &self.words, self.allow_repeats)
    }

    /// Hash `seed` and also report the collision odds of the lists it touched.
    pub fn hash_uint_with_stats(
        &self,
        seed: u64,
    ) -> std::result::Result<(String, CollisionReport), PatternError> {
        let (hashed, report) = render_with_stats(&self.pattern, seed, &self.words, self.allow_repeats, true)?;
        Ok((hashed, report.unwrap_or_default()))
    }

    pub fn hash_string(&self, s: &str) -> std::result::Result<String, PatternError> {
        self.hash_uint(seed_from_str(s))
    }

    pub fn hash_bytes(&self, bytes: &[u8]) -> std::result::Result<String, PatternError> {
        self.hash_uint(seed_from_bytes(bytes))
    }

    /// Hash a random v4 UUID.
    pub fn random(&self) -> std::result::Result<String, PatternError> {
        self.hash_uint(random_seed())
    }

    /// Chain-hash a sequence of lines: each line is hashed together with the
    /// output for the previous one, and the last output is returned. Lines
    /// are used as given, so keep their terminators to match
    /// [`HumanHasher::hash_reader`].
    pub fn hash_lines<I, S>(&self, lines: I) -> std::result::Result<String, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut last_hash = String::new();
        for line in lines {
            let chained = format!("{}{}", last_hash, line.as_ref());
            last_hash = self.hash_string(&chained)?;
        }
        Ok(last_hash)
    }

    /// Chain-hash every line of `reader`, line terminators included. Lines
    /// are raw bytes and need not be valid UTF-8.
    pub fn hash_reader<R: BufRead>(&self, mut reader: R) -> Result<String> {
        let mut last_hash = String::new();
        let mut line = Vec::new();
        let mut chained = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            chained.clear();
            chained.extend_from_slice(last_hash.as_bytes());
            chained.extend_from_slice(&line);
            last_hash = self.hash_bytes(&chained)?;
        }
        Ok(last_hash)
    }
}

impl Default for HumanHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::WordCategory;

    #[test]
    fn test_default_hasher_known_values() {
        let hasher = HumanHasher::new();
        assert_eq!(hasher.hash_string("abc").unwrap(), "WarmlyKickingCastle");
        assert_eq!(hasher.hash_string("pumba & mumble").unwrap(), "BrightlySprintingWombat");
        assert_eq!(hasher.hash_string("pumba + mumble").unwrap(), "DeftlyWhisperingCamel");
    }

    #[test]
    fn test_cli_default_pattern_known_value() {
        let hasher = HumanHasher::with_pattern("%j_%n");
        assert_eq!(hasher.hash_string("abc").unwrap(), "ancient_castle");
    }

    #[test]
    fn test_string_and_bytes_agree() {
        let hasher = HumanHasher::new();
        assert_eq!(
            hasher.hash_string("hello").unwrap(),
            hasher.hash_bytes(b"hello").unwrap()
        );
    }

    #[test]
    fn test_random_renders_pattern() {
        let hasher = HumanHasher::with_pattern("%n-%n");
        let hashed = hasher.random().unwrap();
        let parts: Vec<&str> = hashed.split('-').collect();
        assert_eq!(parts.len(), 2);
        assert!(parts.iter().all(|p| !p.is_empty()));
    }

    #[test]
    fn test_hash_lines_chains_previous_output() {
        let hasher = HumanHasher::new();
        let first = hasher.hash_string("one\n").unwrap();
        let second = hasher.hash_string(&format!("{}two\n", first)).unwrap();
        assert_eq!(hasher.hash_lines(["one\n", "two\n"]).unwrap(), second);
        assert_eq!(hasher.hash_lines(Vec::<String>::new()).unwrap(), "");
    }

    #[test]
    fn test_hash_reader_keeps_terminators() {
        let hasher = HumanHasher::new();
        let input = "one\ntwo\nthree";
        let expected = hasher.hash_lines(["one\n", "two\n", "three"]).unwrap();
        assert_eq!(hasher.hash_reader(input.as_bytes()).unwrap(), expected);
    }

    #[test]
    fn test_from_options_rejects_empty_list() {
        let words = WordBank::default();
        let mut empty = words.clone();
        empty.set_words(WordCategory::Noun, Vec::new());

        let options = HasherOptions::default();
        assert!(HumanHasher::from_options(&options, words).is_ok());
        assert_eq!(
            HumanHasher::from_options(&options, empty).unwrap_err(),
            PatternError::EmptyWordList(WordCategory::Noun)
        );
    }

    #[test]
    fn test_from_options_empty_list_unused_is_fine() {
        let words = WordBank::empty().with_words(WordCategory::Noun, &["fox", "owl"]);
        let options = HasherOptions {
            pattern: "%n".to_string(),
            ..HasherOptions::default()
        };
        assert!(HumanHasher::from_options(&options, words).is_ok());
    }

    #[test]
    fn test_from_options_strict() {
        let options = HasherOptions {
            pattern: "%n-%z".to_string(),
            strict: true,
            ..HasherOptions::default()
        };
        assert!(matches!(
            HumanHasher::from_options(&options, WordBank::default()),
            Err(PatternError::UnknownToken { .. })
        ));

        let lenient = HasherOptions {
            strict: false,
            ..options
        };
        let hasher = HumanHasher::from_options(&lenient, WordBank::default()).unwrap();
        assert!(hasher.hash_string("x").unwrap().ends_with("-%z"));
    }

    #[test]
    fn test_collision_report_matches_render_stats() {
        let hasher = HumanHasher::new();
        let (_, report) = hasher.hash_uint_with_stats(12345).unwrap();
        assert_eq!(report, hasher.collision_report());
        assert_eq!(report.list_sizes.len(), 3);
    }

    #[test]
    fn test_stats_for_pattern_without_tokens() {
        let hasher = HumanHasher::with_pattern("plain text");
        let (hashed, report) = hasher.hash_uint_with_stats(1).unwrap();
        assert_eq!(hashed, "plain text");
        assert!(report.list_sizes.is_empty());
        assert_eq!(report, CollisionReport::default());
    }

    #[test]
    fn test_options_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hhash.json");
        std::fs::write(&path, r#"{"pattern": "%j-%n", "allow_repeats": true}"#).unwrap();

        let options = HasherOptions::from_file(&path).unwrap();
        assert_eq!(options.pattern, "%j-%n");
        assert!(options.allow_repeats);
        assert!(!options.strict);

        assert!(HasherOptions::from_file(dir.path().join("missing.json")).is_err());
    }
}
