//! Trace ingestion and analysis.
//!
//! This module turns a profiler trace into the deduplicated instruction
//! mix the trimming flow consumes. It handles:
//! - Reading CodeXL CSV exports (title line, quoted fields, skip rules)
//! - Classifying the leading instruction word of every accepted row
//! - Folding classified rows into a [`TraceSummary`](crate::summary::TraceSummary)
//!
//! # Example
//!
//! ```ignore
//! use gcn_trim::trace::{analyze, CodexlTrace};
//!
//! let trace = CodexlTrace::from_file("kernel.csv")?;
//! let analysis = analyze(&trace, true);
//! println!("{}", analysis.summary.report());
//! ```

pub mod codexl;

pub use codexl::{CodexlTrace, TraceRow};

use crate::isa::{classify, classify_unit};
use crate::summary::{InstructionRecord, TraceSummary};

/// Result of classifying a whole trace.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    /// Deduplicated instruction mix.
    pub summary: TraceSummary,
    /// Rows whose leading word matched a known format.
    pub classified: usize,
    /// Rows dropped because the leading word matched no format.
    pub unknown: usize,
}

/// Classify every accepted row of a trace and fold it into a summary.
///
/// Only the leading instruction word of a row carries format bits; trailing
/// words of 64-bit encodings are operand words and are left alone. Words
/// matching no format are excluded from the summary and counted, and each
/// one is logged when `warn_unknown` is set.
pub fn analyze(trace: &CodexlTrace, warn_unknown: bool) -> Analysis {
    let mut analysis = Analysis::default();

    for row in trace.rows() {
        let Some(&word) = row.words.first() else {
            continue;
        };

        let decoded = classify(word);
        if decoded.is_unknown() {
            analysis.unknown += 1;
            if warn_unknown {
                log::warn!(
                    "No format matches bit pattern {} ({}), instruction ignored",
                    word,
                    row.mnemonic
                );
            }
            continue;
        }

        let unit = classify_unit(&row.mnemonic, &row.unit_label, decoded.format);
        analysis.summary.record(
            unit,
            InstructionRecord::new(row.mnemonic.clone(), decoded.format, decoded.opcode),
        );
        analysis.classified += 1;
    }

    analysis
}
