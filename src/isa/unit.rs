//! Functional-unit assignment.
//!
//! The profiler's own unit label is coarse; the hardware has four
//! execution pipelines. Scalar and control instructions run on the
//! scalar ALU regardless of data width, except scalar memory reads,
//! which occupy the load/store unit. Vector instructions split between
//! the floating-point SIMD and the integer SIMD on the mnemonic's type
//! suffix.

use std::fmt;

use super::format::EncodingFormat;

/// Hardware execution pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FunctionalUnit {
    /// Scalar ALU.
    Salu,
    /// Load/store unit.
    Lsu,
    /// Floating-point vector SIMD.
    Simf,
    /// Integer and generic vector SIMD.
    Simd,
}

impl fmt::Display for FunctionalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FunctionalUnit::Salu => "SALU",
            FunctionalUnit::Lsu => "LSU",
            FunctionalUnit::Simf => "SIMF",
            FunctionalUnit::Simd => "SIMD",
        };
        write!(f, "{}", name)
    }
}

/// Mnemonic tokens that mark a floating-point vector instruction.
const FLOAT_TOKENS: [&str; 3] = ["f32", "f64", "f16"];

/// Assign the functional unit for one instruction.
///
/// Total over its inputs: every combination of mnemonic, profiler label
/// and format maps to a unit. Labels outside the known set fall through
/// to the vector rules.
pub fn classify_unit(
    mnemonic: &str,
    profiler_unit_label: &str,
    format: EncodingFormat,
) -> FunctionalUnit {
    match profiler_unit_label {
        "Scalar" | "Branch" | "Flow Control" => {
            if format == EncodingFormat::Smrd {
                FunctionalUnit::Lsu
            } else {
                FunctionalUnit::Salu
            }
        }
        "Vector Memory" => FunctionalUnit::Lsu,
        _ if has_float_token(mnemonic) => FunctionalUnit::Simf,
        _ => FunctionalUnit::Simd,
    }
}

/// True when the mnemonic carries a float type suffix as a whole
/// underscore-separated token. Profiler exports disagree on mnemonic
/// case, so the comparison ignores it.
fn has_float_token(mnemonic: &str) -> bool {
    mnemonic
        .split('_')
        .any(|token| FLOAT_TOKENS.iter().any(|f| token.eq_ignore_ascii_case(f)))
}
