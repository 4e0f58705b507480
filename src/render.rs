//! Turns a compiled pattern and a seed into the final word hash.

use crate::chain::HashChain;
use crate::collision::{CollisionAccumulator, CollisionReport};
use crate::error::PatternError;
use crate::pattern::{Pattern, Segment};
use crate::words::WordBank;

/// Render `pattern` for `seed`.
///
/// The output depends only on the arguments, so the same pattern, seed, bank
/// and flag always produce the same string.
pub fn render(
    pattern: &Pattern,
    seed: u64,
    words: &WordBank,
    allow_repeats: bool,
) -> Result<String, PatternError> {
    render_inner(pattern, seed, words, allow_repeats, None)
}

/// Like [`render`], additionally returning the collision report for the
/// word lists this pass touched when `collect_stats` is set.
pub fn render_with_stats(
    pattern: &Pattern,
    seed: u64,
    words: &WordBank,
    allow_repeats: bool,
    collect_stats: bool,
) -> Result<(String, Option<CollisionReport>), PatternError> {
    if !collect_stats {
        return Ok((render_inner(pattern, seed, words, allow_repeats, None)?, None));
    }

    let mut stats = CollisionAccumulator::new();
    let hashed = render_inner(pattern, seed, words, allow_repeats, Some(&mut stats))?;
    Ok((hashed, Some(stats.finish())))
}

fn render_inner(
    pattern: &Pattern,
    seed: u64,
    words: &WordBank,
    allow_repeats: bool,
    mut stats: Option<&mut CollisionAccumulator>,
) -> Result<String, PatternError> {
    let mut chain = HashChain::new(seed, allow_repeats);
    let mut hashed = String::with_capacity(pattern.as_str().len() * 4);

    for segment in pattern.segments() {
        match segment {
            Segment::Literal(text) => hashed.push_str(text),
            Segment::Token(token) => {
                let list = words.words(token.category);
                let hash = chain.advance(token.category, list.len())?;
                let word = &list[(hash % list.len() as u64) as usize];
                hashed.push_str(&token.case.apply(word));

                if let Some(stats) = stats.as_deref_mut() {
                    stats.record(list.len());
                }
            }
        }
    }

    Ok(hashed)
}
