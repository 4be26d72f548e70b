use std::collections::BTreeMap;

use itertools::Itertools;

use crate::correct::{CorrectedLine, Correction};

/// Running totals for one processed file: lines and words scanned, words
/// corrected, and the distinct original -> corrected pairs seen. The map
/// keeps the first correction recorded for each original word and iterates
/// in the original word's natural order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub lines: u64,
    pub words: u64,
    pub corrected: u64,
    corrections: BTreeMap<String, String>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one corrected line into the totals.
    pub fn record_line(&mut self, line: &CorrectedLine) {
        self.lines += 1;
        self.words += line.words as u64;
        for correction in &line.corrections {
            self.record(correction);
        }
    }

    pub fn record(&mut self, correction: &Correction) {
        let Some(corrected) = correction.corrected.as_ref() else {
            return;
        };
        self.corrected += 1;
        self.corrections
            .entry(correction.original.clone())
            .or_insert_with(|| corrected.clone());
    }

    /// Distinct corrections, sorted by original word.
    pub fn corrections(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.corrections
            .iter()
            .map(|(original, corrected)| (original.as_str(), corrected.as_str()))
    }

    /// Renders the corrections log: one `original=corrected` line per
    /// distinct corrected word, sorted, with a trailing newline when
    /// non-empty.
    pub fn render_log(&self) -> String {
        let mut log = self
            .corrections()
            .map(|(original, corrected)| format!("{original}={corrected}"))
            .join("\n");
        if !log.is_empty() {
            log.push('\n');
        }
        log
    }
}
