//! CodeXL instruction-trace reader.
//!
//! CodeXL exports the ISA view of a profiled kernel as CSV: one title line,
//! then one row per executed instruction. Fields may be double-quoted with
//! `""` escapes. After dropping empty fields, the columns of interest are:
//!
//! | Index | Content                                        |
//! |-------|------------------------------------------------|
//! | 1     | instruction mnemonic (`s_waitcnt`, `v_add_f32`) |
//! | 4     | profiler functional-unit label (`Scalar`, ...) |
//! | 5     | space-separated hex instruction words          |
//!
//! Rows that do not carry all six columns (blank lines, section headers,
//! label rows) are skipped and counted. Rows whose hex column fails to parse
//! into 32-bit words are skipped and counted separately.

use std::path::Path;

use anyhow::Context;
use smallvec::SmallVec;

use crate::isa::InstructionWord;

/// One accepted trace row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRow {
    /// Instruction mnemonic as exported by the profiler.
    pub mnemonic: String,
    /// Functional-unit label assigned by the profiler.
    pub unit_label: String,
    /// Raw instruction words; 64-bit encodings carry two.
    pub words: SmallVec<[InstructionWord; 2]>,
}

/// A parsed trace: accepted rows plus per-rule skip counters.
#[derive(Debug, Clone, Default)]
pub struct CodexlTrace {
    rows: Vec<TraceRow>,
    short_rows: usize,
    bad_word_rows: usize,
}

impl CodexlTrace {
    /// Read and parse a trace file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let trace = Self::parse(&text);
        log::info!(
            "Loaded {}: {} instruction rows, {} short rows, {} rows with bad hex words",
            path.display(),
            trace.rows.len(),
            trace.short_rows,
            trace.bad_word_rows
        );
        Ok(trace)
    }

    /// Parse trace text. The first line is the title row and is skipped.
    pub fn parse(text: &str) -> Self {
        let mut trace = Self::default();
        for line in text.lines().skip(1) {
            trace.push_line(line);
        }
        trace
    }

    fn push_line(&mut self, line: &str) {
        let mut fields: Vec<String> = split_record(line)
            .into_iter()
            .filter(|field| !field.is_empty())
            .collect();

        if fields.len() < 6 {
            self.short_rows += 1;
            log::debug!("Skipping short trace row: {:?}", line);
            return;
        }

        let mut words: SmallVec<[InstructionWord; 2]> = SmallVec::new();
        for token in fields[5].split_whitespace() {
            match InstructionWord::from_hex_str(token) {
                Ok(word) => words.push(word),
                Err(err) => {
                    self.bad_word_rows += 1;
                    log::warn!("Skipping trace row for {:?}: {}", fields[1], err);
                    return;
                }
            }
        }
        if words.is_empty() {
            self.short_rows += 1;
            log::debug!("Skipping trace row without instruction words: {:?}", line);
            return;
        }

        log::debug!(
            "Accepted {} ({}) with {} words",
            fields[1],
            fields[4],
            words.len()
        );
        self.rows.push(TraceRow {
            mnemonic: std::mem::take(&mut fields[1]),
            unit_label: std::mem::take(&mut fields[4]),
            words,
        });
    }

    /// Accepted instruction rows, in file order.
    pub fn rows(&self) -> &[TraceRow] {
        &self.rows
    }

    /// Rows skipped for having fewer than six populated fields.
    pub fn short_rows(&self) -> usize {
        self.short_rows
    }

    /// Rows skipped for an unparsable hex word.
    pub fn bad_word_rows(&self) -> usize {
        self.bad_word_rows
    }

    /// Number of accepted rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if no rows were accepted.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Split one CSV record into fields, honoring `"..."` quoting and `""`
/// escapes. Lenient on malformed quoting: the record never fails to split.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(ch),
        }
    }
    fields.push(field);
    fields
}
