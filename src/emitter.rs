use crate::{
    encoder::{EncodedNumber, NumberValue, Width},
    error::{TokenError, TokenResult},
    tokenizer::types::Endianness,
};

impl EncodedNumber {
    /// Two's complement or IEEE-754 bits of the value, before truncation.
    fn raw_bits(&self) -> u64 {
        match self.value {
            NumberValue::Unsigned(v) => v,
            NumberValue::Signed(v) => v as u64,
            NumberValue::Float(v) if self.size == Width::Four => u64::from((v as f32).to_bits()),
            NumberValue::Float(v) => v.to_bits(),
        }
    }

    /// The `size` bytes of the value, in the number's byte order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let le = self.raw_bits().to_le_bytes();
        let bytes = &le[..self.size.bytes()];
        match self.endianness {
            Endianness::Little => bytes.to_vec(),
            Endianness::Big => bytes.iter().rev().copied().collect(),
        }
    }
}

pub fn emit_number(buffer: &mut Vec<u8>, number: &EncodedNumber) {
    buffer.extend_from_slice(&number.to_bytes());
}

pub fn emit_raw(buffer: &mut Vec<u8>, bytes: &[u8]) {
    buffer.extend_from_slice(bytes);
}

/// Interior of a quoted token: its first and last characters are dropped
/// whatever they are.
pub fn string_body(token: &str) -> TokenResult<&str> {
    let mut chars = token.chars();
    let (Some(_), Some(_)) = (chars.next(), chars.next_back()) else {
        return Err(TokenError::grammar(
            token,
            "string too short to hold its delimiters",
        ));
    };
    Ok(chars.as_str())
}

/// Appends the bytes of a quoted token, whatever the current byte order.
pub fn emit_string(buffer: &mut Vec<u8>, token: &str) -> TokenResult<()> {
    let body = string_body(token)?;
    emit_raw(buffer, body.as_bytes());
    Ok(())
}
