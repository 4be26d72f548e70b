use crate::correct::{Correction, Dictionary, WordCorrector};

/// Result of correcting one line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectedLine {
    pub text: String,
    /// Number of word spans found in the line.
    pub words: usize,
    /// The words that were actually rewritten, in order of appearance.
    pub corrections: Vec<Correction>,
}

impl CorrectedLine {
    pub fn is_corrected(&self) -> bool {
        !self.corrections.is_empty()
    }
}

/// Scans a line for word spans and runs each one through the word
/// corrector. A word starts at any letter; apostrophes only continue a
/// word already in progress.
#[derive(Debug, Clone, Copy)]
pub struct LineCorrector<'a> {
    words: WordCorrector<'a>,
}

impl<'a> LineCorrector<'a> {
    pub fn new(dictionary: &'a Dictionary) -> Self {
        Self {
            words: WordCorrector::new(dictionary),
        }
    }

    pub fn correct(&self, line: &str) -> CorrectedLine {
        let mut buffer: Vec<char> = line.chars().collect();
        let mut corrections = Vec::new();
        let mut words = 0;

        let mut i = 0;
        while i < buffer.len() {
            if buffer[i].is_alphabetic() {
                let (after, correction) = self.words.process(&mut buffer, i);
                words += 1;
                if correction.is_corrected() {
                    corrections.push(correction);
                }
                i = after;
            } else {
                i += 1;
            }
        }

        CorrectedLine {
            text: buffer.into_iter().collect(),
            words,
            corrections,
        }
    }
}
