//! Human-readable hashing.
//!
//! Hashes any input to a short, deterministic string of words, laid out by a
//! pattern such as `%A%V{G}%N` (`QuicklyRunningFox`). See [`pattern`] for the
//! token syntax.
//!
//! ```
//! use hhash::HumanHasher;
//!
//! let hasher = HumanHasher::with_pattern("%j_%n");
//! let hashed = hasher.hash_string("abc").unwrap();
//! assert_eq!(hashed, hasher.hash_string("abc").unwrap());
//! ```

pub mod chain;
pub mod collision;
pub mod config;
pub mod error;
pub mod hasher;
pub mod pattern;
pub mod render;
pub mod words;

// Re-export commonly used types
pub use collision::{CollisionAccumulator, CollisionReport};
pub use error::{ConfigError, Error, PatternError, Result};
pub use hasher::{HasherOptions, HumanHasher};
pub use pattern::{Case, Pattern, Segment, Token, DEFAULT_PATTERN};
pub use render::{render, render_with_stats};
pub use words::{WordBank, WordCategory};
