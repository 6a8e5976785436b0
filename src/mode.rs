//! Encoding modes: mode indicators, character validity, bit-length
//! computation and payload encoding. Ported from `rmqrcode`'s
//! `encoder/numeric_encoder.py`, `alphanumeric_encoder.py`,
//! `byte_encoder.py` and `kanji_encoder.py`.

use crate::bitbuffer::BitBuffer;
use crate::error::{Result, RmqrError};

/// One of the four encoding modes defined by ISO/IEC 23941.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Numeric,
    Alphanumeric,
    Byte,
    Kanji,
}

/// Enumeration order used throughout the segmentation optimizer: ties in
/// the dynamic program are broken by this order.
pub const ALL_MODES: [Mode; 4] = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte, Mode::Kanji];

impl Mode {
    pub fn mode_indicator(self) -> u32 {
        match self {
            Mode::Numeric => 0b001,
            Mode::Alphanumeric => 0b010,
            Mode::Byte => 0b011,
            Mode::Kanji => 0b100,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Numeric => "Numeric",
            Mode::Alphanumeric => "Alphanumeric",
            Mode::Byte => "Byte",
            Mode::Kanji => "Kanji",
        }
    }

    /// Whether every character of `data` is valid in this mode.
    pub fn is_valid(self, data: &str) -> bool {
        data.chars().all(|c| self.is_valid_char(c))
    }

    pub fn is_valid_char(self, c: char) -> bool {
        match self {
            Mode::Numeric => c.is_ascii_digit(),
            Mode::Alphanumeric => alphanumeric_value(c).is_some(),
            Mode::Byte => true,
            Mode::Kanji => is_kanji_char(c),
        }
    }

    /// The character count placed into the character-count indicator:
    /// UTF-8 byte length for Byte mode, Shift-JIS double-byte character
    /// count for Kanji, plain `char` count otherwise.
    pub fn characters_num(self, data: &str) -> usize {
        match self {
            Mode::Byte => data.len(),
            _ => data.chars().count(),
        }
    }

    /// Bit length of a full segment (mode indicator + CCI + payload) for
    /// `data` given the character-count-indicator width for this mode in
    /// the selected version, without re-encoding the payload.
    pub fn length(self, data: &str, cci_width: u8) -> usize {
        3 + cci_width as usize + self.payload_bits(data)
    }

    fn payload_bits(self, data: &str) -> usize {
        match self {
            Mode::Numeric => {
                let n = data.chars().count();
                (n / 3) * 10 + match n % 3 {
                    0 => 0,
                    1 => 4,
                    _ => 7,
                }
            }
            Mode::Alphanumeric => {
                let n = data.chars().count();
                (n / 2) * 11 + if n % 2 == 1 { 6 } else { 0 }
            }
            Mode::Byte => data.len() * 8,
            Mode::Kanji => data.chars().count() * 13,
        }
    }

    /// Encodes `mode_indicator || cci(characters_num, cci_width) || payload`.
    pub fn encode(self, data: &str, cci_width: u8) -> Result<BitBuffer> {
        let mut bb = BitBuffer::new();
        bb.append_bits(self.mode_indicator(), 3);
        bb.append_bits(self.characters_num(data) as u32, cci_width);
        self.encode_payload(data, &mut bb)?;
        Ok(bb)
    }

    fn encode_payload(self, data: &str, bb: &mut BitBuffer) -> Result<()> {
        match self {
            Mode::Numeric => encode_numeric(data, bb)?,
            Mode::Alphanumeric => encode_alphanumeric(data, bb)?,
            Mode::Byte => encode_byte(data, bb),
            Mode::Kanji => encode_kanji(data, bb)?,
        }
        Ok(())
    }
}

fn encode_numeric(data: &str, bb: &mut BitBuffer) -> Result<()> {
    let digits: Result<Vec<u32>> = data
        .chars()
        .map(|c| c.to_digit(10).ok_or(RmqrError::IllegalCharacter { character: c, mode: "Numeric" }))
        .collect();
    let digits = digits?;
    for group in digits.chunks(3) {
        let value: u32 = group.iter().fold(0, |acc, &d| acc * 10 + d);
        let bits = match group.len() {
            3 => 10,
            2 => 7,
            _ => 4,
        };
        bb.append_bits(value, bits);
    }
    Ok(())
}

/// The 45-character alphanumeric table: digits, uppercase letters, space,
/// `$ % * + - . / :`.
pub const ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

fn alphanumeric_value(c: char) -> Option<u32> {
    ALPHANUMERIC_CHARSET.chars().position(|x| x == c).map(|p| p as u32)
}

fn encode_alphanumeric(data: &str, bb: &mut BitBuffer) -> Result<()> {
    let values: Result<Vec<u32>> = data
        .chars()
        .map(|c| {
            alphanumeric_value(c).ok_or(RmqrError::IllegalCharacter {
                character: c,
                mode: "Alphanumeric",
            })
        })
        .collect();
    let values = values?;
    for pair in values.chunks(2) {
        if pair.len() == 2 {
            bb.append_bits(45 * pair[0] + pair[1], 11);
        } else {
            bb.append_bits(pair[0], 6);
        }
    }
    Ok(())
}

fn encode_byte(data: &str, bb: &mut BitBuffer) {
    for byte in data.as_bytes() {
        bb.append_bits(*byte as u32, 8);
    }
}

#[cfg(feature = "kanji")]
fn is_kanji_char(c: char) -> bool {
    kanji_hex_value(c).is_some()
}

#[cfg(not(feature = "kanji"))]
fn is_kanji_char(_c: char) -> bool {
    false
}

#[cfg(feature = "kanji")]
fn kanji_hex_value(c: char) -> Option<u16> {
    let mut buf = [0u8; 2];
    let (encoded, _enc, had_errors) = encoding_rs::SHIFT_JIS.encode(&c.to_string());
    if had_errors || encoded.len() != 2 {
        return None;
    }
    buf.copy_from_slice(&encoded);
    let h = ((buf[0] as u16) << 8) | buf[1] as u16;
    if (0x8140..=0x9FFC).contains(&h) || (0xE040..=0xEBBF).contains(&h) {
        Some(h)
    } else {
        None
    }
}

#[cfg(feature = "kanji")]
fn encode_kanji(data: &str, bb: &mut BitBuffer) -> Result<()> {
    for c in data.chars() {
        let h = kanji_hex_value(c).ok_or(RmqrError::IllegalCharacter {
            character: c,
            mode: "Kanji",
        })?;
        let sub = if (0x8140..=0x9FFC).contains(&h) { 0x8140 } else { 0xC140 };
        let shifted = h - sub;
        let msb = (shifted >> 8) as u32;
        let lsb = (shifted & 0xFF) as u32;
        let value = msb * 0xC0 + lsb;
        bb.append_bits(value, 13);
    }
    Ok(())
}

#[cfg(not(feature = "kanji"))]
fn encode_kanji(data: &str, _bb: &mut BitBuffer) -> Result<()> {
    if let Some(c) = data.chars().next() {
        return Err(RmqrError::IllegalCharacter { character: c, mode: "Kanji" });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_groups_of_three() {
        let mut bb = BitBuffer::new();
        encode_numeric("123", &mut bb).unwrap();
        assert_eq!(bb.0.len(), 10);
    }

    #[test]
    fn alphanumeric_pair_value() {
        // "AC" -> 10*45+12 = 462 -> 11 bits: 00111001110
        let mut bb = BitBuffer::new();
        encode_alphanumeric("AC", &mut bb).unwrap();
        let mut expect = BitBuffer::new();
        expect.append_bits(462, 11);
        assert_eq!(bb.0, expect.0);
    }

    #[test]
    fn byte_length_is_utf8_bytes() {
        assert_eq!(Mode::Byte.characters_num("📌"), "📌".len());
        assert_eq!(Mode::Byte.characters_num("📌"), 4);
    }

    #[test]
    fn mode_indicators_match_spec() {
        assert_eq!(Mode::Numeric.mode_indicator(), 0b001);
        assert_eq!(Mode::Alphanumeric.mode_indicator(), 0b010);
        assert_eq!(Mode::Byte.mode_indicator(), 0b011);
        assert_eq!(Mode::Kanji.mode_indicator(), 0b100);
    }

    fn bitstring(bb: &BitBuffer) -> String {
        bb.0.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }

    #[test]
    fn alphanumeric_encode_matches_ac_42_scenario() {
        let bb = Mode::Alphanumeric.encode("AC-42", 5).unwrap();
        assert_eq!(bitstring(&bb), "010001010011100111011100111001000010");
        assert_eq!(bb.0.len(), 36);
    }

    #[test]
    fn numeric_encode_matches_sixteen_digit_scenario() {
        let bb = Mode::Numeric.encode("0123456789012345", 5).unwrap();
        assert_eq!(bb.0.len(), 62);
        assert_eq!(&bitstring(&bb)[..8], "00110000");
    }

    #[test]
    fn byte_encode_matches_pin_emoji_scenario() {
        let bb = Mode::Byte.encode("\u{1F4CC}", 5).unwrap();
        assert_eq!(bb.0.len(), 3 + 5 + 32);
        assert_eq!(&bitstring(&bb)[..8], "01100100");
    }
}
