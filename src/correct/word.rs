use tracing::trace;

use crate::correct::Dictionary;

const UPPER_I: char = 'I';
const LOWER_L: char = 'l';
const APOSTROPHE: char = '\'';

const VOWELS: &str = "aeiouAEIOU";
const CONSONANTS: &str = "bcdfghjklmnpqrstvwxyzBCDFGHJKLMNPQRSTVWXYZ";

fn is_vowel(ch: char) -> bool {
    VOWELS.contains(ch)
}

fn is_consonant(ch: char) -> bool {
    CONSONANTS.contains(ch)
}

/// Character statistics for one word span, computed once by the initial
/// forward scan and immutable afterwards.
///
/// `upper_i` counts uppercase I strictly after the first character, so
/// sentence-initial "I" and contractions like "I'll" never flag a word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordStats {
    pub upper: usize,
    pub lower: usize,
    pub apostrophes: usize,
    pub lower_l: usize,
    pub upper_i: usize,
}

/// Before/after view of one processed word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub original: String,
    /// The rewritten word; `None` when no rule changed anything.
    pub corrected: Option<String>,
}

impl Correction {
    pub fn is_corrected(&self) -> bool {
        self.corrected.is_some()
    }
}

/// Word-level correction engine. Holds a shared reference to the exception
/// dictionary and applies the heuristic rule chain to one word span at a
/// time, editing the line buffer in place.
#[derive(Debug, Clone, Copy)]
pub struct WordCorrector<'a> {
    dictionary: &'a Dictionary,
}

impl<'a> WordCorrector<'a> {
    pub fn new(dictionary: &'a Dictionary) -> Self {
        Self { dictionary }
    }

    /// Processes the word starting at `first`, which must index a letter.
    /// Returns the index just past the word and the correction outcome.
    /// Only characters within the word span are ever touched, and the
    /// span's length never changes.
    pub fn process(&self, line: &mut [char], first: usize) -> (usize, Correction) {
        let mut word = WordContext::gather(line, first);
        let original = word.text();
        trace!("=> {original} {:?}", word.stats);

        if !self.dictionary.is_exception(&original) {
            word.fix_apostrophe_ii();
            word.fix_l_apostrophe();
            word.fix_mismatch();
            word.fix_initial_letter();
            if !word.corrected {
                if let Some(replacement) = self.dictionary.lookup(&original) {
                    word.overwrite(replacement);
                }
            }
        }

        let corrected = word.corrected.then(|| word.text());
        if let Some(ref fixed) = corrected {
            trace!("=> fixed: {fixed}");
        }
        (word.current, Correction { original, corrected })
    }
}

/// Mutable state threaded through the rule chain: the span bounds, the
/// statistics from the initial scan, and the corrected flag. Rules run in
/// order and each sees the buffer as mutated by the previous ones.
struct WordContext<'a> {
    line: &'a mut [char],
    first: usize,
    current: usize,
    stats: WordStats,
    corrected: bool,
}

impl<'a> WordContext<'a> {
    /// Scans forward from `first` over letters and apostrophes, gathering
    /// statistics. `current` ends on the first disqualifying character.
    fn gather(line: &'a mut [char], first: usize) -> Self {
        let mut stats = WordStats::default();
        let mut current = first;
        while current < line.len() {
            let ch = line[current];
            if !ch.is_alphabetic() && ch != APOSTROPHE {
                break;
            }
            if ch.is_uppercase() {
                stats.upper += 1;
                // An I at the first position is the pronoun or a sentence
                // start; only count the ones after it.
                if current != first && ch == UPPER_I {
                    stats.upper_i += 1;
                }
            } else if ch == APOSTROPHE {
                stats.apostrophes += 1;
            } else {
                stats.lower += 1;
                if ch == LOWER_L {
                    stats.lower_l += 1;
                }
            }
            current += 1;
        }
        Self {
            line,
            first,
            current,
            stats,
            corrected: false,
        }
    }

    fn len(&self) -> usize {
        self.current - self.first
    }

    fn text(&self) -> String {
        self.line[self.first..self.current].iter().collect()
    }

    fn set(&mut self, index: usize, after: char) {
        trace!("{}->{} @ {}", self.line[index], after, index);
        self.line[index] = after;
        self.corrected = true;
    }

    /// Words ending in 'II are contraction suffixes misread by the OCR;
    /// rewrite them to 'll.
    fn fix_apostrophe_ii(&mut self) {
        if self.len() > 2
            && self.line[self.current - 3] == APOSTROPHE
            && self.line[self.current - 2] == UPPER_I
            && self.line[self.current - 1] == UPPER_I
        {
            self.set(self.current - 2, LOWER_L);
            self.set(self.current - 1, LOWER_L);
        }
    }

    /// Words beginning with l' are pronoun contractions; rewrite to I'.
    fn fix_l_apostrophe(&mut self) {
        if self.len() > 2
            && self.line[self.first] == LOWER_L
            && self.line[self.first + 1] == APOSTROPHE
        {
            self.set(self.first, UPPER_I);
        }
    }

    /// Uses the scan statistics to decide whether the word as a whole has
    /// misplaced I's or l's, and rewrites them in bulk.
    fn fix_mismatch(&mut self) {
        let size = self.len();
        if self.stats.upper_i == 0 && self.stats.lower_l == 0 {
            return;
        }
        // Mostly lowercase with stray upper I's. The first letter is left
        // out of the comparison since it may legitimately be uppercase.
        if self.stats.upper_i > 0
            && self.stats.upper_i + self.stats.lower + self.stats.apostrophes >= size - 1
        {
            self.fix_upper_i();
        }
        // All caps plus stray lower l's, e.g. a bracketed cue.
        else if self.stats.lower_l > 0 && self.stats.lower_l + self.stats.upper == size {
            self.fix_lower_l();
        }
    }

    fn fix_upper_i(&mut self) {
        // The first letter could start a sentence or be the pronoun I.
        for i in self.first + 1..self.current {
            if self.line[i] == UPPER_I {
                self.set(i, LOWER_L);
            }
        }
    }

    fn fix_lower_l(&mut self) {
        for i in self.first..self.current {
            if self.line[i] == LOWER_L {
                self.set(i, UPPER_I);
            }
        }
    }

    /// Examines the first letter of words that are otherwise all lowercase:
    /// l<consonant> becomes I<consonant>, I<vowel> becomes l<vowel>. The
    /// remaining combinations are ambiguous and left alone. Must run after
    /// fix_mismatch so it sees the corrected interior.
    fn fix_initial_letter(&mut self) {
        let initial = self.line[self.first];
        if self.len() < 2 || (initial != LOWER_L && initial != UPPER_I) {
            return;
        }
        let has_upper_tail = self.line[self.first + 1..self.current]
            .iter()
            .any(|ch| ch.is_uppercase());
        if has_upper_tail {
            return;
        }
        let second = self.line[self.first + 1];
        if initial == LOWER_L && is_consonant(second) {
            self.set(self.first, UPPER_I);
        } else if initial == UPPER_I && is_vowel(second) {
            self.set(self.first, LOWER_L);
        }
    }

    /// Overwrites the span with a dictionary replacement. The dictionary
    /// guarantees at load time that lengths match.
    fn overwrite(&mut self, replacement: &str) {
        for (offset, ch) in replacement.chars().enumerate() {
            self.set(self.first + offset, ch);
        }
    }
}
