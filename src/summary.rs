//! Deduplicated instruction-mix summary.
//!
//! The trimming flow needs the set of distinct instructions a trace
//! exercises, grouped by the functional unit that executes them. This
//! module accumulates classified rows into that set and renders the
//! plain-text report.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use crate::isa::{EncodingFormat, FunctionalUnit, OpcodeBits};

/// One distinct instruction signature observed in a trace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstructionRecord {
    /// Instruction mnemonic as reported by the profiler.
    pub mnemonic: String,
    /// Format family of the first instruction word.
    pub format: EncodingFormat,
    /// Literal opcode field of the first instruction word.
    pub opcode: OpcodeBits,
}

impl InstructionRecord {
    /// Build a record from its parts.
    pub fn new(mnemonic: impl Into<String>, format: EncodingFormat, opcode: OpcodeBits) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            format,
            opcode,
        }
    }
}

/// Distinct instructions per functional unit, plus the formats seen.
///
/// Insertion order is irrelevant; iteration is in key order, so reports
/// are deterministic. Single-writer: built by one accumulation pass.
#[derive(Debug, Clone, Default)]
pub struct TraceSummary {
    units: BTreeMap<FunctionalUnit, BTreeSet<InstructionRecord>>,
    formats: BTreeSet<EncodingFormat>,
}

impl TraceSummary {
    /// Create an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one classified instruction into the summary.
    ///
    /// Returns true if the record was new for its unit. Records with an
    /// unknown format never enter the summary.
    pub fn record(&mut self, unit: FunctionalUnit, record: InstructionRecord) -> bool {
        if record.format == EncodingFormat::Unknown {
            log::warn!(
                "not recording {:?}: unknown instruction format",
                record.mnemonic
            );
            return false;
        }

        let format = record.format;
        let inserted = self.units.entry(unit).or_default().insert(record);
        if inserted {
            self.formats.insert(format);
        }
        inserted
    }

    /// Units observed, each with its set of distinct instructions.
    pub fn units(&self) -> impl Iterator<Item = (FunctionalUnit, &BTreeSet<InstructionRecord>)> {
        self.units.iter().map(|(unit, records)| (*unit, records))
    }

    /// Distinct instructions recorded for one unit.
    pub fn instructions(&self, unit: FunctionalUnit) -> Option<&BTreeSet<InstructionRecord>> {
        self.units.get(&unit)
    }

    /// Format families observed across the whole trace.
    pub fn formats(&self) -> impl Iterator<Item = EncodingFormat> + '_ {
        self.formats.iter().copied()
    }

    /// Total number of distinct instructions across all units.
    pub fn instruction_count(&self) -> usize {
        self.units.values().map(|records| records.len()).sum()
    }

    /// Number of units with at least one instruction.
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Render the plain-text instruction-mix report.
    pub fn report(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Instruction Summary ===\n\n");
        let _ = writeln!(
            report,
            "Units: {}, distinct instructions: {}, formats: {}",
            self.unit_count(),
            self.instruction_count(),
            self.formats.len()
        );

        for (unit, records) in &self.units {
            report.push('\n');
            let _ = writeln!(report, "--- {} ({}) ---", unit, records.len());
            for record in records {
                let _ = writeln!(
                    report,
                    "{:<28} {:<6} {}",
                    record.mnemonic, record.format, record.opcode
                );
            }
        }

        if !self.formats.is_empty() {
            report.push('\n');
            report.push_str("Formats observed:");
            for format in &self.formats {
                let _ = write!(report, " {}", format);
            }
            report.push('\n');
        }

        report
    }
}
