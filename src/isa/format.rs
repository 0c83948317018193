//! Southern Islands instruction format families.
//!
//! Each format fixes an encoding layout: a distinguishing bit prefix and
//! the position of the opcode field within the 32-bit word. The table
//! queries here are the static side of the decoder; the match order that
//! disambiguates overlapping prefixes lives in [`super::decoder`].

use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// Errors from encoding-table queries.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// Query for a format with no table entry.
    ///
    /// This is a caller bug, not a data problem: the table covers every
    /// format except `Unknown`.
    #[error("format {format} has no encoding table entry")]
    NoTableEntry {
        /// The format that was queried.
        format: EncodingFormat,
    },
}

/// Instruction format family.
///
/// `Unknown` is a normal decode outcome for words outside the table, not
/// an error; callers drop such words and keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EncodingFormat {
    /// Vector compare.
    Vopc,
    /// Vector ALU, one operand.
    Vop1,
    /// Vector ALU, two operands.
    Vop2,
    /// Scalar program control.
    Sopp,
    /// Scalar compare.
    Sopc,
    /// Scalar ALU, one operand.
    Sop1,
    /// Scalar ALU with inline constant.
    Sopk,
    /// Scalar ALU, two operands.
    Sop2,
    /// Scalar memory read.
    Smrd,
    /// Typed buffer access.
    Mtbuf,
    /// Vector ALU, three operands (first word of a 64-bit encoding).
    Vop3a,
    /// No table prefix matched.
    Unknown,
}

impl EncodingFormat {
    /// Every format with a table entry, in table order.
    pub const ALL: [EncodingFormat; 11] = [
        EncodingFormat::Vopc,
        EncodingFormat::Vop1,
        EncodingFormat::Vop2,
        EncodingFormat::Sopp,
        EncodingFormat::Sopc,
        EncodingFormat::Sop1,
        EncodingFormat::Sopk,
        EncodingFormat::Sop2,
        EncodingFormat::Smrd,
        EncodingFormat::Mtbuf,
        EncodingFormat::Vop3a,
    ];

    /// Distinguishing prefix bits for this format, MSB-first.
    ///
    /// The fallback formats carry short prefixes (`0` for VOP2, `10` for
    /// SOP2, `1011` for SOPK) that other entries extend; they identify a
    /// word only after the longer prefixes have been ruled out.
    pub fn prefix_bits(self) -> Result<&'static str, FormatError> {
        match self {
            EncodingFormat::Vopc => Ok("0111110"),
            EncodingFormat::Vop1 => Ok("0111111"),
            EncodingFormat::Vop2 => Ok("0"),
            EncodingFormat::Sopp => Ok("101111111"),
            EncodingFormat::Sopc => Ok("101111110"),
            EncodingFormat::Sop1 => Ok("10111110"),
            EncodingFormat::Sopk => Ok("1011"),
            EncodingFormat::Sop2 => Ok("10"),
            EncodingFormat::Smrd => Ok("11000"),
            EncodingFormat::Mtbuf => Ok("111010"),
            EncodingFormat::Vop3a => Ok("110100"),
            EncodingFormat::Unknown => Err(FormatError::NoTableEntry { format: self }),
        }
    }

    /// Opcode field position, as an MSB-first half-open bit range.
    pub fn opcode_range(self) -> Result<Range<u32>, FormatError> {
        match self {
            EncodingFormat::Vopc => Ok(7..15),
            EncodingFormat::Vop1 => Ok(15..23),
            EncodingFormat::Vop2 => Ok(1..7),
            EncodingFormat::Sopp => Ok(9..16),
            EncodingFormat::Sopc => Ok(9..16),
            EncodingFormat::Sop1 => Ok(15..23),
            EncodingFormat::Sopk => Ok(4..9),
            EncodingFormat::Sop2 => Ok(2..9),
            EncodingFormat::Smrd => Ok(5..10),
            EncodingFormat::Mtbuf => Ok(13..16),
            EncodingFormat::Vop3a => Ok(6..15),
            EncodingFormat::Unknown => Err(FormatError::NoTableEntry { format: self }),
        }
    }
}

impl fmt::Display for EncodingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EncodingFormat::Vopc => "VOPC",
            EncodingFormat::Vop1 => "VOP1",
            EncodingFormat::Vop2 => "VOP2",
            EncodingFormat::Sopp => "SOPP",
            EncodingFormat::Sopc => "SOPC",
            EncodingFormat::Sop1 => "SOP1",
            EncodingFormat::Sopk => "SOPK",
            EncodingFormat::Sop2 => "SOP2",
            EncodingFormat::Smrd => "SMRD",
            EncodingFormat::Mtbuf => "MTBUF",
            EncodingFormat::Vop3a => "VOP3A",
            EncodingFormat::Unknown => "UNKNOWN",
        };
        write!(f, "{}", name)
    }
}
