use nom::{
    bytes::complete::take_while1,
    character::complete::{char, digit1, hex_digit1, one_of},
    combinator::{all_consuming, opt, recognize},
    error::{context, VerboseError},
    number::complete::recognize_float,
    sequence::{delimited, pair, preceded},
    IResult,
};

use super::{
    action::is_action,
    types::{Base, Category},
};
use crate::error::{TokenError, TokenResult};

pub type ParserResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// Pieces of a numeric token such as `%x0a42[4]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberParts<'a> {
    pub explicit: bool,
    /// Digits with their optional sign.
    pub body: &'a str,
    /// Digits between the size brackets, if present.
    pub size: Option<&'a str>,
}

#[tracing::instrument(level = "trace", skip(input))]
fn parse_prefix(base: Base, input: &str) -> ParserResult<char> {
    context("explicit prefix", preceded(char('%'), char(base.prefix())))(input)
}

#[tracing::instrument(level = "trace", skip(input))]
fn parse_body(base: Base, input: &str) -> ParserResult<&str> {
    match base {
        Base::Hex => context("hexadecimal digits", hex_digit1)(input),
        Base::Decimal => context(
            "decimal digits",
            recognize(pair(opt(one_of("+-")), digit1)),
        )(input),
        Base::Octal => context(
            "octal digits",
            take_while1(|c: char| ('0'..='7').contains(&c)),
        )(input),
        Base::Binary => context(
            "binary digits",
            take_while1(|c: char| c == '0' || c == '1'),
        )(input),
        Base::Float => context("float", recognize_float)(input),
    }
}

#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_size_suffix(input: &str) -> ParserResult<&str> {
    context("size suffix", delimited(char('['), digit1, char(']')))(input)
}

#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_number(base: Base, input: &str) -> ParserResult<NumberParts<'_>> {
    let (input, prefix) = opt(|i| parse_prefix(base, i))(input)?;
    let (input, body) = parse_body(base, input)?;
    let (input, size) = opt(parse_size_suffix)(input)?;
    Ok((
        input,
        NumberParts {
            explicit: prefix.is_some(),
            body,
            size,
        },
    ))
}

/// Splits a numeric token into its parts, requiring the whole token to match
/// the grammar of `base`.
pub fn split_number(token: &str, base: Base) -> TokenResult<NumberParts<'_>> {
    match all_consuming(|i| parse_number(base, i))(token) {
        Ok((_, parts)) => Ok(parts),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(TokenError::grammar(
            token,
            format!(
                "not a valid {} number: {}",
                base,
                nom::error::convert_error(token, e).trim()
            ),
        )),
        Err(nom::Err::Incomplete(needed)) => Err(TokenError::grammar(
            token,
            format!("incomplete {} number, {:?}", base, needed),
        )),
    }
}

/// Checks that `token` satisfies the syntax of `category`.
///
/// Size suffixes are only checked for shape here; `26[7]` passes and is
/// rejected later when the width is resolved.
pub fn validate(token: &str, category: Category) -> bool {
    match category {
        Category::String => true,
        Category::Number(base) => all_consuming(|i| parse_number(base, i))(token).is_ok(),
        Category::Action => is_action(token),
        Category::Indeterminate | Category::Error => false,
    }
}
