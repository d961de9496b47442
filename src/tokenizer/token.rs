use nom::{
    bytes::complete::take_till1,
    character::complete::{char, one_of},
    combinator::all_consuming,
    sequence::{pair, preceded},
};

use super::{
    action::is_action,
    grammar::ParserResult,
    types::{Base, Category},
};

pub const COMMENT_PREFIX: char = '#';
pub const STRING_DELIMITERS: [char; 2] = ['"', '\''];

/// A token together with its position in the chunk it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan<'a> {
    pub text: &'a str,
    /// 1-based line within the chunk.
    pub line: usize,
    /// 1-based byte column within the line.
    pub column: usize,
}

/// Splits one chunk of text into tokens.
///
/// Blank lines and lines whose first non-blank character is `#` are dropped.
/// A line starting with a quote is a single string token, whitespace
/// included; every other line is split on whitespace.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    #[tracing::instrument(level = "debug", skip(self, input), fields(len = input.len()))]
    pub fn tokenize<'a>(&self, input: &'a str) -> Vec<TokenSpan<'a>> {
        let mut tokens = Vec::new();

        for (index, raw_line) in input.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
                tracing::trace!(line = index + 1, "ignore comment or blank line");
                continue;
            }

            let offset = |word: &str| word.as_ptr() as usize - raw_line.as_ptr() as usize;

            if line.starts_with(STRING_DELIMITERS) {
                tokens.push(TokenSpan {
                    text: line,
                    line: index + 1,
                    column: offset(line) + 1,
                });
            } else {
                tokens.extend(line.split_whitespace().map(|word| TokenSpan {
                    text: word,
                    line: index + 1,
                    column: offset(word) + 1,
                }));
            }
        }

        tokens
    }
}

fn parse_explicit_number(input: &str) -> ParserResult<(char, &str)> {
    pair(
        preceded(char('%'), one_of("dxobf")),
        take_till1(char::is_whitespace),
    )(input)
}

/// Determines the category of a token.
///
/// Only a malformed `%` prefix yields [`Category::Error`]; tokens that are
/// neither strings, explicit numbers nor actions are left
/// [`Category::Indeterminate`] for the caller to read in its default base.
#[tracing::instrument(level = "trace")]
pub fn classify(token: &str) -> Category {
    if token.starts_with('%') {
        return match all_consuming(parse_explicit_number)(token) {
            Ok((_, (letter, _))) => Base::from_prefix(letter)
                .map(Category::Number)
                .unwrap_or(Category::Error),
            Err(_) => Category::Error,
        };
    }

    if token.starts_with(STRING_DELIMITERS) {
        return Category::String;
    }

    if is_action(token) {
        return Category::Action;
    }

    Category::Indeterminate
}
