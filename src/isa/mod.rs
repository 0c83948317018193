//! Southern Islands instruction classification.
//!
//! This module turns one 32-bit instruction word into its format family
//! and opcode field, and maps the instruction onto the hardware
//! functional unit that executes it.
//!
//! # Encoding Formats
//!
//! Formats are distinguished by a variable-length bit prefix, MSB-first:
//!
//! | Prefix | Format | Opcode bits |
//! |--------|--------|-------------|
//! | `0111110` | VOPC | [7,15) |
//! | `0111111` | VOP1 | [15,23) |
//! | `0` (other) | VOP2 | [1,7) |
//! | `101111111` | SOPP | [9,16) |
//! | `101111110` | SOPC | [9,16) |
//! | `10111110` | SOP1 | [15,23) |
//! | `1011` (other) | SOPK | [4,9) |
//! | `10` (other) | SOP2 | [2,9) |
//! | `11000` | SMRD | [5,10) |
//! | `111010` | MTBUF | [13,16) |
//! | `110100` | VOP3A | [6,15) |
//!
//! The short prefixes are fallbacks matched only after the longer ones
//! fail; see [`decoder::classify`] for the evaluation order.
//!
//! # Example
//!
//! ```ignore
//! use gcn_trim::isa::{self, InstructionWord};
//!
//! let decoded = isa::classify(InstructionWord::new(0xBF810000));
//! let unit = isa::classify_unit("s_endpgm", "Flow Control", decoded.format);
//! ```

pub mod decoder;
pub mod format;
pub mod unit;
pub mod word;

pub use decoder::{classify, DecodedWord};
pub use format::{EncodingFormat, FormatError};
pub use unit::{classify_unit, FunctionalUnit};
pub use word::{InstructionWord, OpcodeBits, WordError};
