//! Conversion of numeric tokens into sized, endianness-tagged values.
//!
//! An explicit `[n]` suffix always wins. Otherwise a nonzero default size is
//! used, and failing that the width is picked automatically:
//!
//! * hexadecimal and binary by digit count (2 and 8 digits per byte),
//! * decimal and octal by value, as the smallest width whose range holds it,
//! * floats are never auto-sized and need a size of 4 or 8.

use crate::{
    error::{TokenError, TokenResult},
    tokenizer::{
        action::VALID_DEFAULT_SIZES,
        grammar::split_number,
        types::{Base, Endianness},
    },
};

/// Output width of an encoded number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Width {
    One = 1,
    Two = 2,
    Four = 4,
    Eight = 8,
}

impl Width {
    pub const ALL: [Width; 4] = [Width::One, Width::Two, Width::Four, Width::Eight];

    pub fn from_bytes(bytes: u64) -> Option<Self> {
        match bytes {
            1 => Some(Width::One),
            2 => Some(Width::Two),
            4 => Some(Width::Four),
            8 => Some(Width::Eight),
            _ => None,
        }
    }

    pub fn bytes(self) -> usize {
        self as usize
    }

    pub fn bits(self) -> u32 {
        self as u32 * 8
    }

    pub fn fits_unsigned(self, value: u64) -> bool {
        self == Width::Eight || value < (1u64 << self.bits())
    }

    pub fn fits_signed(self, value: i64) -> bool {
        if self == Width::Eight {
            return true;
        }
        let half = 1i64 << (self.bits() - 1);
        (-half..half).contains(&value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberValue {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodedNumber {
    pub value: NumberValue,
    pub size: Width,
    pub endianness: Endianness,
}

impl EncodedNumber {
    pub fn is_signed(&self) -> bool {
        matches!(self.value, NumberValue::Signed(_))
    }
}

fn parse_size(token: &str, digits: &str) -> TokenResult<u64> {
    digits
        .parse()
        .map_err(|e| TokenError::value(token, format!("bad size '{}': {}", digits, e)))
}

fn resolve_width(token: &str, requested: u64) -> TokenResult<Option<Width>> {
    match requested {
        0 => Ok(None),
        n => Width::from_bytes(n).map(Some).ok_or_else(|| {
            TokenError::value(
                token,
                format!("unsupported size {}, should be 1, 2, 4 or 8", n),
            )
        }),
    }
}

/// Width picked from the number of digits, for bases where each byte maps
/// to a fixed number of digits.
fn width_from_digits(digits: usize, per_byte: usize) -> Width {
    if digits > 4 * per_byte {
        Width::Eight
    } else if digits > 2 * per_byte {
        Width::Four
    } else if digits > per_byte {
        Width::Two
    } else {
        Width::One
    }
}

fn auto_width(base: Base, body: &str, value: NumberValue) -> Option<Width> {
    match (base, value) {
        (Base::Hex, _) => Some(width_from_digits(body.len(), 2)),
        (Base::Binary, _) => Some(width_from_digits(body.len(), 8)),
        (_, NumberValue::Unsigned(v)) => Width::ALL.into_iter().find(|w| w.fits_unsigned(v)),
        (_, NumberValue::Signed(v)) => Width::ALL.into_iter().find(|w| w.fits_signed(v)),
        (_, NumberValue::Float(_)) => None,
    }
}

fn parse_value(token: &str, base: Base, body: &str) -> TokenResult<NumberValue> {
    let Some(radix) = base.radix() else {
        return body
            .parse::<f64>()
            .map(NumberValue::Float)
            .map_err(|e| TokenError::value(token, format!("bad float '{}': {}", body, e)));
    };

    let value = if body.starts_with('-') {
        i64::from_str_radix(body, radix).map(NumberValue::Signed)
    } else {
        u64::from_str_radix(body, radix).map(NumberValue::Unsigned)
    };
    value.map_err(|e| TokenError::value(token, format!("bad {} number '{}': {}", base, body, e)))
}

/// Encodes a numeric token read in `base`.
///
/// `default_size` applies when the token carries no `[n]` suffix; 0 means
/// auto-size.
#[tracing::instrument(level = "debug")]
pub fn encode(
    token: &str,
    base: Base,
    endianness: Endianness,
    default_size: u64,
) -> TokenResult<EncodedNumber> {
    if !VALID_DEFAULT_SIZES.contains(&default_size) {
        return Err(TokenError::value(
            token,
            format!(
                "invalid default size {}, should be 0, 1, 2, 4 or 8",
                default_size
            ),
        ));
    }

    let parts = split_number(token, base)?;
    let requested = match parts.size {
        Some(digits) => parse_size(token, digits)?,
        None => default_size,
    };
    let value = parse_value(token, base, parts.body)?;

    let size = match resolve_width(token, requested)? {
        Some(width) => {
            if let NumberValue::Signed(v) = value {
                if !width.fits_signed(v) {
                    return Err(TokenError::value(
                        token,
                        format!("{} does not fit in {} signed bytes", v, width.bytes()),
                    ));
                }
            }
            width
        }
        None => auto_width(base, parts.body, value).ok_or_else(|| {
            TokenError::value(token, "no size could be determined, an explicit size is required")
        })?,
    };

    if matches!(value, NumberValue::Float(_)) && size < Width::Four {
        return Err(TokenError::value(
            token,
            format!("float cannot be {} bytes, should be 4 or 8", size.bytes()),
        ));
    }

    Ok(EncodedNumber {
        value,
        size,
        endianness,
    })
}
