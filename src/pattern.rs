//! Pattern compilation.
//!
//! A pattern is literal text interleaved with word tokens:
//!
//! - `%<L>` or `%<L>{<P>}` where `<L>` is one of `a` (adverb), `j` (adjective),
//!   `n` (noun) or `v` (verb). An uppercase letter renders a title-cased word,
//!   a lowercase letter a lowercased one.
//! - `<P>` is one or more ASCII alphanumerics. It refines verbs only:
//!   `p` selects the past tense, `g` the gerund.
//!
//! `%A%V{G}%N` renders e.g. `QuicklyRunningFox`, `%j_%n` renders `lazy_otter`.

use std::str::FromStr;

use log::warn;

use crate::error::PatternError;
use crate::words::WordCategory;

/// Pattern used when none is configured.
pub const DEFAULT_PATTERN: &str = "%A%V{G}%N";

/// How a rendered word is cased.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Case {
    /// First letter uppercased, rest untouched.
    Title,
    Lower,
}

impl Case {
    pub fn apply(&self, word: &str) -> String {
        match self {
            Case::Lower => word.to_lowercase(),
            Case::Title => {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

/// A resolved word token.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub category: WordCategory,
    pub case: Case,
    pub parameter: Option<String>,
}

impl Token {
    /// Resolve a token letter and optional parameter. `None` if the letter
    /// names no word category.
    pub fn resolve(letter: char, parameter: Option<&str>) -> Option<Token> {
        let case = if letter.is_uppercase() {
            Case::Title
        } else {
            Case::Lower
        };
        let tense = parameter.map(|p| p.to_ascii_lowercase());

        let category = match letter.to_ascii_lowercase() {
            'a' => WordCategory::Adverb,
            'j' => WordCategory::Adjective,
            'n' => WordCategory::Noun,
            'v' => match tense.as_deref() {
                Some("p") => WordCategory::VerbPast,
                Some("g") => WordCategory::VerbGerund,
                _ => WordCategory::Verb,
            },
            _ => return None,
        };

        Some(Token {
            category,
            case,
            parameter: parameter.map(str::to_string),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    Literal(String),
    Token(Token),
}

/// A token-shaped span found by the scanner, before resolution.
struct RawToken<'a> {
    text: &'a str,
    letter: char,
    parameter: Option<&'a str>,
}

/// Find the token starting at byte `start` (which holds a `%`), if any.
fn scan_token(src: &str, start: usize) -> Option<RawToken<'_>> {
    let rest = &src[start + 1..];
    let letter = rest.chars().next()?;
    if !(letter.is_ascii_alphabetic() || letter == '%') {
        return None;
    }

    let mut end = start + 2;
    let mut parameter = None;
    if let Some(body) = src[end..].strip_prefix('{') {
        let len = body
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric())
            .count();
        if len > 0 && body[len..].starts_with('}') {
            parameter = Some(&body[..len]);
            end += len + 2;
        }
    }

    Some(RawToken {
        text: &src[start..end],
        letter,
        parameter,
    })
}

/// A compiled pattern: the source string split into literal and token segments.
///
/// Compiled patterns hold no per-render state and can be shared freely.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Lenient compilation: unknown tokens are kept as literal text.
    pub fn parse(src: &str) -> Pattern {
        let (pattern, unknown) = Self::build(src);
        for (token, offset) in unknown {
            warn!(
                "unable to determine word type for token [{}] at offset {}, leaving it as is",
                token, offset
            );
        }
        pattern
    }

    /// Strict compilation: the first unknown token is an error.
    pub fn compile(src: &str) -> Result<Pattern, PatternError> {
        let (pattern, unknown) = Self::build(src);
        match unknown.into_iter().next() {
            Some((token, offset)) => Err(PatternError::UnknownToken { token, offset }),
            None => Ok(pattern),
        }
    }

    /// Single left-to-right scan. Returns the pattern along with the text and
    /// offset of every token that resolved to no category.
    fn build(src: &str) -> (Pattern, Vec<(String, usize)>) {
        let mut segments = Vec::new();
        let mut unknown = Vec::new();
        let mut literal = String::new();
        let mut pos = 0;

        while let Some(found) = src[pos..].find('%') {
            let start = pos + found;
            literal.push_str(&src[pos..start]);

            let Some(raw) = scan_token(src, start) else {
                literal.push('%');
                pos = start + 1;
                continue;
            };
            pos = start + raw.text.len();

            match Token::resolve(raw.letter, raw.parameter) {
                Some(token) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Token(token));
                }
                None => {
                    unknown.push((raw.text.to_string(), start));
                    literal.push_str(raw.text);
                }
            }
        }

        literal.push_str(&src[pos..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        let pattern = Pattern {
            source: src.to_string(),
            segments,
        };
        (pattern, unknown)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Token(token) => Some(token),
            Segment::Literal(_) => None,
        })
    }

    /// Categories of every token, in pattern order (repeats included).
    pub fn categories(&self) -> impl Iterator<Item = WordCategory> + '_ {
        self.tokens().map(|token| token.category)
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Pattern::parse(DEFAULT_PATTERN)
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::compile(s)
    }
}
