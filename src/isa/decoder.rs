//! Format classification for instruction words.
//!
//! The classifier walks increasingly specific bit prefixes in a fixed
//! order. The order is load-bearing: the table is not a prefix-free code.
//! The VOP2, SOPK and SOP2 prefixes are extended by other entries, so a
//! word like `10 1111111 ...` is SOPP and never SOPK or SOP2; each
//! fallback applies only once the longer prefixes are ruled out.

use super::format::EncodingFormat;
use super::word::{InstructionWord, OpcodeBits};

/// A classified instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedWord {
    /// The matched format family.
    pub format: EncodingFormat,
    /// The literal opcode field; empty when `format` is `Unknown`.
    pub opcode: OpcodeBits,
}

impl DecodedWord {
    /// True when no table prefix matched.
    pub fn is_unknown(&self) -> bool {
        self.format == EncodingFormat::Unknown
    }
}

/// Classify one instruction word into format family and opcode field.
///
/// Words outside the table come back as `Unknown` with an empty opcode
/// field. That is a normal outcome for encodings the table does not
/// cover, not an error; callers skip such words and keep going.
pub fn classify(word: InstructionWord) -> DecodedWord {
    // Vector encodings lead with a 0 bit.
    if word.bit(0) == 0 {
        return match word.bits(1..7) {
            0b111110 => decoded(word, EncodingFormat::Vopc),
            0b111111 => decoded(word, EncodingFormat::Vop1),
            _ => decoded(word, EncodingFormat::Vop2),
        };
    }

    // Scalar encodings lead with 10. Specific prefixes first: SOPP and
    // SOPC fix seven bits, SOP1 six, SOPK two, SOP2 takes the rest.
    if word.bits(0..2) == 0b10 {
        return if word.bits(2..9) == 0b111_1111 {
            decoded(word, EncodingFormat::Sopp)
        } else if word.bits(2..9) == 0b111_1110 {
            decoded(word, EncodingFormat::Sopc)
        } else if word.bits(2..8) == 0b11_1110 {
            decoded(word, EncodingFormat::Sop1)
        } else if word.bits(2..4) == 0b11 {
            decoded(word, EncodingFormat::Sopk)
        } else {
            decoded(word, EncodingFormat::Sop2)
        };
    }

    // Remaining encodings lead with 11 and are disjoint at their own
    // prefix length.
    if word.bits(0..5) == 0b1_1000 {
        return decoded(word, EncodingFormat::Smrd);
    }
    if word.bits(0..6) == 0b11_1010 {
        return decoded(word, EncodingFormat::Mtbuf);
    }
    if word.bits(0..6) == 0b11_0100 {
        return decoded(word, EncodingFormat::Vop3a);
    }

    decoded(word, EncodingFormat::Unknown)
}

/// Pair a format with the opcode field it locates in the word.
fn decoded(word: InstructionWord, format: EncodingFormat) -> DecodedWord {
    let opcode = match format.opcode_range() {
        Ok(range) => word.extract(range),
        Err(_) => OpcodeBits::empty(),
    };
    DecodedWord { format, opcode }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a word from a format's prefix, an opcode value at the
    /// format's opcode range, and `filler` everywhere else.
    fn synth_filled(format: EncodingFormat, opcode: u16, filler: char) -> InstructionWord {
        let mut bits = [filler; 32];
        for (i, c) in format.prefix_bits().unwrap().chars().enumerate() {
            bits[i] = c;
        }
        let range = format.opcode_range().unwrap();
        let width = (range.end - range.start) as usize;
        for k in 0..width {
            let bit = (opcode >> (width - 1 - k)) & 1;
            bits[range.start as usize + k] = if bit == 1 { '1' } else { '0' };
        }
        let s: String = bits.iter().collect();
        InstructionWord::from_bit_str(&s).expect("synthesized bit string should parse")
    }

    fn synth(format: EncodingFormat, opcode: u16) -> InstructionWord {
        synth_filled(format, opcode, '0')
    }

    fn check(raw: u32, format: EncodingFormat, opcode: &str) {
        let decoded = classify(InstructionWord::new(raw));
        assert_eq!(decoded.format, format, "word 0x{:08X}", raw);
        assert_eq!(decoded.opcode.to_string(), opcode, "word 0x{:08X}", raw);
    }

    #[test]
    fn test_real_scalar_words() {
        check(0xBF81_0000, EncodingFormat::Sopp, "0000001"); // s_endpgm
        check(0xBF8C_0000, EncodingFormat::Sopp, "0001100"); // s_waitcnt 0
        check(0xBF00_0100, EncodingFormat::Sopc, "0000000"); // s_cmp_eq_i32 s0, s1
        check(0xBE80_0301, EncodingFormat::Sop1, "00000001"); // s_mov_b32 s0, s1
        check(0xB000_1234, EncodingFormat::Sopk, "00000"); // s_movk_i32 s0, 0x1234
        check(0x8000_0201, EncodingFormat::Sop2, "0000000"); // s_add_u32 s0, s1, s2
        check(0xC080_0000, EncodingFormat::Smrd, "00010"); // s_load_dwordx4
    }

    #[test]
    fn test_real_vector_words() {
        check(0x7C02_0300, EncodingFormat::Vopc, "00000001"); // v_cmp_lt_f32 vcc, v0, v1
        check(0x7E00_0201, EncodingFormat::Vop1, "00000001"); // v_mov_b32 v0, s1
        check(0x0600_0300, EncodingFormat::Vop2, "000011"); // v_add_f32 v0, v0, v1
        check(0xD296_0000, EncodingFormat::Vop3a, "101001011"); // v_fma_f32
        check(0xE803_0000, EncodingFormat::Mtbuf, "011"); // tbuffer_load_format_xyzw
    }

    #[test]
    fn test_zero_word_is_vop2() {
        check(0x0000_0000, EncodingFormat::Vop2, "000000");
    }

    #[test]
    fn test_filler_bits_do_not_affect_the_match() {
        for format in EncodingFormat::ALL {
            for filler in ['0', '1'] {
                let word = synth_filled(format, 0, filler);
                let decoded = classify(word);
                assert_eq!(decoded.format, format, "format {} filler {}", format, filler);
                assert_eq!(decoded.opcode.value(), 0, "format {} filler {}", format, filler);
            }
        }
    }

    #[test]
    fn test_roundtrip_recovers_format_and_opcode() {
        // Opcode samples stay within each format: fallback formats skip
        // the values that would extend their prefix into a more specific
        // table entry.
        let cases: &[(EncodingFormat, &[u16])] = &[
            (EncodingFormat::Vopc, &[0, 1, 0xA5, 0xFF]),
            (EncodingFormat::Vop1, &[0, 1, 3, 0xFF]),
            (EncodingFormat::Vop2, &[0, 6, 25, 0b111101]),
            (EncodingFormat::Sopp, &[0, 1, 12, 0x7F]),
            (EncodingFormat::Sopc, &[0, 1, 4, 0x7F]),
            (EncodingFormat::Sop1, &[0, 3, 4, 0xFF]),
            (EncodingFormat::Sopk, &[0, 2, 15, 0b10111]),
            (EncodingFormat::Sop2, &[0, 36, 44, 0b1011111]),
            (EncodingFormat::Smrd, &[0, 2, 8, 0x1F]),
            (EncodingFormat::Mtbuf, &[0, 3, 7]),
            (EncodingFormat::Vop3a, &[0, 331, 0x1FF]),
        ];

        for &(format, opcodes) in cases {
            let width = {
                let range = format.opcode_range().unwrap();
                (range.end - range.start) as u8
            };
            for &opcode in opcodes {
                let word = synth(format, opcode);
                let decoded = classify(word);
                assert_eq!(decoded.format, format, "format {} opcode {}", format, opcode);
                assert_eq!(
                    decoded.opcode,
                    OpcodeBits::new(opcode, width),
                    "format {} opcode {}",
                    format,
                    opcode
                );
            }
        }
    }

    #[test]
    fn test_scalar_prefix_priority() {
        // All of these also carry the SOPK and SOP2 prefixes; the longer
        // prefix must win.
        check(0xBF80_0000, EncodingFormat::Sopp, "0000000"); // s_nop
        check(0xBFFF_FFFF, EncodingFormat::Sopp, "1111111");
        check(0xBF00_0000, EncodingFormat::Sopc, "0000000");
        check(0xBE00_0000, EncodingFormat::Sop1, "00000000");
        check(0xB800_0000, EncodingFormat::Sopk, "10000");
        check(0xBB80_0000, EncodingFormat::Sopk, "10111");
    }

    #[test]
    fn test_vector_prefix_priority() {
        check(0x7C00_0000, EncodingFormat::Vopc, "00000000");
        check(0x7DFF_FFFF, EncodingFormat::Vopc, "11111111");
        check(0x7E00_0000, EncodingFormat::Vop1, "00000000");
        check(0x7800_0000, EncodingFormat::Vop2, "111100");
    }

    #[test]
    fn test_fallback_opcodes_extend_into_specific_formats() {
        // A fallback-format word whose opcode bits complete a longer
        // prefix belongs to the longer prefix's format.
        assert_eq!(classify(synth(EncodingFormat::Sopk, 0b11111)).format, EncodingFormat::Sopp);
        assert_eq!(classify(synth(EncodingFormat::Sopk, 0b11110)).format, EncodingFormat::Sopc);
        assert_eq!(classify(synth(EncodingFormat::Sopk, 0b11100)).format, EncodingFormat::Sop1);
        assert_eq!(classify(synth(EncodingFormat::Sop2, 0b1100000)).format, EncodingFormat::Sopk);
        assert_eq!(classify(synth(EncodingFormat::Vop2, 0b111110)).format, EncodingFormat::Vopc);
        assert_eq!(classify(synth(EncodingFormat::Vop2, 0b111111)).format, EncodingFormat::Vop1);
    }

    #[test]
    fn test_unmatched_words_are_unknown() {
        for raw in [0xFFFF_FFFFu32, 0xF800_0000, 0xDEAD_BEEF, 0xCC00_0000, 0xE000_0000] {
            let decoded = classify(InstructionWord::new(raw));
            assert!(decoded.is_unknown(), "word 0x{:08X}", raw);
            assert!(decoded.opcode.is_empty(), "word 0x{:08X}", raw);
            assert_eq!(decoded.opcode.to_string(), "");
        }
    }

    #[test]
    fn test_classify_is_idempotent() {
        let word = InstructionWord::new(0xBF81_0000);
        assert_eq!(classify(word), classify(word));
    }

    #[test]
    fn test_bit_string_input_classifies_like_integer() {
        let from_bits =
            InstructionWord::from_bit_str("11010010100101100000000000000000").unwrap();
        let from_raw = InstructionWord::new(0xD296_0000);
        assert_eq!(from_bits, from_raw);
        assert_eq!(classify(from_bits), classify(from_raw));
    }
}
