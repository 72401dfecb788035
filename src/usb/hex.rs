use super::error::{Error, Result};

/// Decode a hex string such as `"0e 01 00 00"` into bytes. Whitespace between
/// digits is ignored.
pub fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let digits: Vec<u8> = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| {
            c.to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| Error::InvalidHex(format!("'{}' is not a hex digit", c)))
        })
        .collect::<Result<_>>()?;

    if digits.len() % 2 != 0 {
        return Err(Error::InvalidHex(format!(
            "odd number of digits ({})",
            digits.len()
        )));
    }

    Ok(digits.chunks(2).map(|pair| pair[0] << 4 | pair[1]).collect())
}

pub fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

pub fn parse_number(text: &str) -> std::result::Result<u64, String> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse::<u64>(),
    };
    parsed.map_err(|e| format!("'{}': {}", text, e))
}

pub fn parse_u8(text: &str) -> std::result::Result<u8, String> {
    let n = parse_number(text)?;
    u8::try_from(n).map_err(|_| format!("{} does not fit in a byte", n))
}

pub fn parse_u16(text: &str) -> std::result::Result<u16, String> {
    let n = parse_number(text)?;
    u16::try_from(n).map_err(|_| format!("{} does not fit in 16 bits", n))
}
