use clap::Parser;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::hasher::HasherOptions;
use crate::words::WordBank;

/// Pattern used by the command line when `--pattern` is not given.
pub const CLI_DEFAULT_PATTERN: &str = "%j_%n";

/// Command line configuration for the `hhash` binary
#[derive(Debug, Clone, Parser)]
#[command(name = "hhash")]
#[command(about = "Generate human-readable hashes from strings or piped input")]
pub struct Config {
    /// Hash pattern of static characters and word tokens (default: "%j_%n")
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// String to hash according to the pattern (default: random)
    #[arg(short = 's', long = "toHash")]
    pub to_hash: Option<String>,

    /// Enable verbose logging, including the collision rate of the pattern
    #[arg(short, long)]
    pub verbose: bool,

    /// Allow consecutive tokens of the same kind to generate the same word (e.g. "%N%N")
    #[arg(short = 'r', long = "repetition")]
    pub repetition: bool,

    /// Fail on unknown tokens instead of printing them as is
    #[arg(long)]
    pub strict: bool,

    /// Directory with replacement word lists (adjectives.txt, nouns.txt, ...)
    #[arg(long)]
    pub words: Option<PathBuf>,

    /// JSON file with hasher options; command line flags take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level used with --verbose (off, trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: log::LevelFilter,
}

/// What the binary hashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Lines read from standard input, chained.
    Stdin,
    Text(String),
    /// A random UUID.
    Random,
}

impl Config {
    /// Merge the options file (if any) with the command line flags.
    pub fn hasher_options(&self) -> Result<HasherOptions, ConfigError> {
        let mut options = match &self.config {
            Some(path) => HasherOptions::from_file(path)?,
            None => HasherOptions {
                pattern: CLI_DEFAULT_PATTERN.to_string(),
                ..HasherOptions::default()
            },
        };

        if let Some(pattern) = &self.pattern {
            options.pattern = pattern.clone();
        }
        options.allow_repeats |= self.repetition;
        options.strict |= self.strict;
        options.report_collision_rate |= self.verbose;
        Ok(options)
    }

    pub fn word_bank(&self) -> Result<WordBank, ConfigError> {
        match &self.words {
            Some(dir) => WordBank::from_dir(dir),
            None => Ok(WordBank::default()),
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            self.log_level
        } else {
            log::LevelFilter::Error
        }
    }

    /// Pick the input to hash. `stdin_redirected` is true when stdin is not a
    /// terminal. `stdin_has_data` must not block; it is only asked when `-s`
    /// is set, to reject hashing a string while data is also piped in.
    pub fn input<F>(&self, stdin_redirected: bool, stdin_has_data: F) -> Result<Input, ConfigError>
    where
        F: FnOnce() -> bool,
    {
        match &self.to_hash {
            Some(_) if stdin_redirected && stdin_has_data() => Err(ConfigError::ConflictingInput),
            Some(to_hash) => Ok(Input::Text(to_hash.clone())),
            None if stdin_redirected => Ok(Input::Stdin),
            None => Ok(Input::Random),
        }
    }
}
