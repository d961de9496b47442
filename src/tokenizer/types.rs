use serde::{Deserialize, Serialize};

/// Number base used to read a numeric token.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Base {
    #[default]
    #[strum(to_string = "hexadecimal", serialize = "hexa", serialize = "hex")]
    #[serde(alias = "hexadecimal", alias = "hexa")]
    Hex,
    #[strum(to_string = "decimal", serialize = "dec")]
    #[serde(alias = "dec")]
    Decimal,
    #[strum(to_string = "octal", serialize = "oct")]
    #[serde(alias = "oct")]
    Octal,
    #[strum(to_string = "binary", serialize = "bin")]
    #[serde(alias = "bin")]
    Binary,
    #[strum(to_string = "float")]
    Float,
}

impl Base {
    /// Letter following `%` in an explicit number, e.g. `x` in `%xff`.
    pub fn prefix(self) -> char {
        match self {
            Base::Hex => 'x',
            Base::Decimal => 'd',
            Base::Octal => 'o',
            Base::Binary => 'b',
            Base::Float => 'f',
        }
    }

    pub fn from_prefix(c: char) -> Option<Self> {
        match c {
            'x' => Some(Base::Hex),
            'd' => Some(Base::Decimal),
            'o' => Some(Base::Octal),
            'b' => Some(Base::Binary),
            'f' => Some(Base::Float),
            _ => None,
        }
    }

    /// Radix for integral bases, `None` for floats.
    pub fn radix(self) -> Option<u32> {
        match self {
            Base::Hex => Some(16),
            Base::Decimal => Some(10),
            Base::Octal => Some(8),
            Base::Binary => Some(2),
            Base::Float => None,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Endianness {
    #[default]
    #[strum(serialize = "little-endian")]
    #[serde(rename = "little-endian", alias = "little")]
    Little,
    #[strum(serialize = "big-endian")]
    #[serde(rename = "big-endian", alias = "big")]
    Big,
}

/// Semantic category of a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    String,
    Number(Base),
    /// Mutates the stream mode instead of producing bytes.
    Action,
    /// Bare token, read with the current default base.
    Indeterminate,
    Error,
}
