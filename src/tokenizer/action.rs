use std::str::FromStr;

use nom::{
    bytes::complete::tag,
    character::complete::{char, digit1},
    combinator::all_consuming,
    sequence::{delimited, preceded},
};

use super::{
    grammar::ParserResult,
    types::{Base, Endianness},
};

/// Default sizes accepted by a `size[n]` directive. Zero selects auto-sizing.
pub const VALID_DEFAULT_SIZES: [u64; 5] = [0, 1, 2, 4, 8];

/// A token that changes the stream mode rather than producing bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Endianness(Endianness),
    Base(Base),
    /// Requested default size, not yet checked against [`VALID_DEFAULT_SIZES`].
    Size(u64),
}

fn parse_size_directive(input: &str) -> ParserResult<&str> {
    preceded(tag("size"), delimited(char('['), digit1, char(']')))(input)
}

impl Action {
    #[tracing::instrument(level = "trace")]
    pub fn parse(token: &str) -> Option<Self> {
        if let Ok(endianness) = Endianness::from_str(token) {
            return Some(Action::Endianness(endianness));
        }
        if let Ok(base) = Base::from_str(token) {
            return Some(Action::Base(base));
        }
        let (_, digits) = all_consuming(parse_size_directive)(token).ok()?;
        // values too large for u64 are just another unsupported size
        Some(Action::Size(digits.parse().unwrap_or(u64::MAX)))
    }
}

pub fn is_action(token: &str) -> bool {
    Action::parse(token).is_some()
}
