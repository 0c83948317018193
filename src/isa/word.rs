//! Instruction word and opcode bit-field types.
//!
//! Southern Islands instructions are captured by the profiler as 32-bit
//! words. Bit positions here are MSB-first: position 0 is bit 31 of the
//! word. This matches the ISA documentation, which writes encodings with
//! the format prefix on the left.

use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// Errors from parsing textual instruction words.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WordError {
    /// Bit-string input with the wrong number of digits.
    #[error("expected 32 binary digits, got {length}")]
    BadBitLength {
        /// Number of digits supplied.
        length: usize,
    },

    /// Bit-string input containing a non-binary character.
    #[error("invalid binary digit {digit:?} at position {index}")]
    BadBitDigit {
        /// The offending character.
        digit: char,
        /// Character position in the input.
        index: usize,
    },

    /// Hex token that does not parse as a 32-bit value.
    #[error("invalid 32-bit hex word {token:?}")]
    BadHexToken {
        /// The offending token.
        token: String,
    },
}

/// One 32-bit instruction word.
///
/// Constructed either from a raw integer or from a 32-character binary
/// string; both forms normalize to the same value. Textual inputs are
/// validated, never truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstructionWord(u32);

impl InstructionWord {
    /// Wrap a raw 32-bit word.
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Parse a 32-character MSB-first binary string.
    pub fn from_bit_str(s: &str) -> Result<Self, WordError> {
        let mut raw = 0u32;
        let mut length = 0usize;

        for (index, digit) in s.chars().enumerate() {
            let bit = match digit {
                '0' => 0,
                '1' => 1,
                _ => return Err(WordError::BadBitDigit { digit, index }),
            };
            raw = (raw << 1) | bit;
            length += 1;
        }

        if length != 32 {
            return Err(WordError::BadBitLength { length });
        }

        Ok(Self(raw))
    }

    /// Parse a hexadecimal token, with or without a `0x` prefix.
    ///
    /// Values wider than 32 bits are rejected.
    pub fn from_hex_str(token: &str) -> Result<Self, WordError> {
        let digits = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);

        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| WordError::BadHexToken {
                token: token.to_string(),
            })
    }

    /// The raw word value.
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Single bit at an MSB-first position.
    #[inline]
    pub fn bit(self, position: u32) -> u32 {
        (self.0 >> (31 - position)) & 1
    }

    /// Bits in an MSB-first half-open range, right-aligned.
    ///
    /// `range` must lie within `0..32`.
    #[inline]
    pub fn bits(self, range: Range<u32>) -> u32 {
        let width = range.end - range.start;
        let shifted = self.0 >> (32 - range.end);
        if width == 32 {
            shifted
        } else {
            shifted & ((1 << width) - 1)
        }
    }

    /// Extract a bit range as a literal opcode field.
    ///
    /// `range` must be at most 16 bits wide.
    pub fn extract(self, range: Range<u32>) -> OpcodeBits {
        let width = (range.end - range.start) as u8;
        OpcodeBits::new(self.bits(range) as u16, width)
    }
}

impl fmt::Display for InstructionWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032b}", self.0)
    }
}

/// The literal opcode bit substring of an instruction word.
///
/// Identity is the bit pattern itself, width included: leading zeros are
/// significant, and fields of different widths are never equal. The
/// numeric value is available as a convenience. Opcode fields in the
/// encoding table are at most nine bits wide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OpcodeBits {
    bits: u16,
    width: u8,
}

impl OpcodeBits {
    /// Build a field from a right-aligned value and a width in bits.
    ///
    /// Bits above `width` are masked off. `width` must be at most 16.
    pub fn new(bits: u16, width: u8) -> Self {
        let mask = if width >= 16 {
            u16::MAX
        } else {
            (1u16 << width) - 1
        };
        Self {
            bits: bits & mask,
            width,
        }
    }

    /// The empty field, returned when no format matches.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True for the empty field.
    pub fn is_empty(self) -> bool {
        self.width == 0
    }

    /// Field width in bits.
    pub fn width(self) -> u8 {
        self.width
    }

    /// Numeric value of the field.
    pub fn value(self) -> u16 {
        self.bits
    }
}

impl fmt::Display for OpcodeBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width == 0 {
            return Ok(());
        }
        write!(f, "{:0width$b}", self.bits, width = self.width as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_positions_are_msb_first() {
        let word = InstructionWord::new(0x8000_0001);
        assert_eq!(word.bit(0), 1);
        assert_eq!(word.bit(1), 0);
        assert_eq!(word.bit(31), 1);
    }

    #[test]
    fn test_bits_range() {
        let word = InstructionWord::new(0xBF81_0000);
        assert_eq!(word.bits(0..2), 0b10);
        assert_eq!(word.bits(2..9), 0b1111111);
        assert_eq!(word.bits(9..16), 0b0000001);
        assert_eq!(word.bits(0..32), 0xBF81_0000);
    }

    #[test]
    fn test_bit_str_matches_integer() {
        let parsed = InstructionWord::from_bit_str("10111111100000010000000000000000").unwrap();
        assert_eq!(parsed, InstructionWord::new(0xBF81_0000));
    }

    #[test]
    fn test_bit_str_wrong_length() {
        let err = InstructionWord::from_bit_str("1011").unwrap_err();
        assert_eq!(err, WordError::BadBitLength { length: 4 });

        let err = InstructionWord::from_bit_str(&"1".repeat(33)).unwrap_err();
        assert_eq!(err, WordError::BadBitLength { length: 33 });
    }

    #[test]
    fn test_bit_str_bad_digit() {
        let err = InstructionWord::from_bit_str("1011111110000001000000000000002x").unwrap_err();
        assert_eq!(
            err,
            WordError::BadBitDigit {
                digit: '2',
                index: 30
            }
        );
    }

    #[test]
    fn test_hex_parse() {
        assert_eq!(
            InstructionWord::from_hex_str("BF810000").unwrap(),
            InstructionWord::new(0xBF81_0000)
        );
        assert_eq!(
            InstructionWord::from_hex_str("0xbf810000").unwrap(),
            InstructionWord::new(0xBF81_0000)
        );
        assert_eq!(
            InstructionWord::from_hex_str("0").unwrap(),
            InstructionWord::new(0)
        );
    }

    #[test]
    fn test_hex_rejects_wide_and_junk() {
        assert!(InstructionWord::from_hex_str("1FFFFFFFF").is_err());
        assert!(InstructionWord::from_hex_str("").is_err());
        assert!(InstructionWord::from_hex_str("0x").is_err());
        assert!(InstructionWord::from_hex_str("paddd").is_err());
    }

    #[test]
    fn test_display_is_32_binary_digits() {
        let word = InstructionWord::new(0xBF81_0000);
        assert_eq!(word.to_string(), "10111111100000010000000000000000");
        assert_eq!(InstructionWord::new(0).to_string().len(), 32);
    }

    #[test]
    fn test_extract_keeps_leading_zeros() {
        let word = InstructionWord::new(0xBF81_0000);
        let opcode = word.extract(9..16);
        assert_eq!(opcode.width(), 7);
        assert_eq!(opcode.value(), 1);
        assert_eq!(opcode.to_string(), "0000001");
    }

    #[test]
    fn test_opcode_bits_width_matters() {
        assert_ne!(OpcodeBits::new(1, 7), OpcodeBits::new(1, 8));
        assert_eq!(OpcodeBits::new(1, 7), OpcodeBits::new(1, 7));
    }

    #[test]
    fn test_opcode_bits_empty() {
        let empty = OpcodeBits::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.width(), 0);
        assert_eq!(empty.to_string(), "");
    }

    #[test]
    fn test_opcode_bits_masks_excess() {
        assert_eq!(OpcodeBits::new(0xFF, 3).value(), 0b111);
    }
}
