pub mod dictionary;
pub mod line;
pub mod word;

// Re-export the main types for convenience
pub use dictionary::{DictEntry, Dictionary};
pub use line::{CorrectedLine, LineCorrector};
pub use word::{Correction, WordCorrector, WordStats};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_works_end_to_end_with_an_injected_dictionary() {
        let dictionary = Dictionary::parse("All=\nwouid=would\n");
        let corrector = LineCorrector::new(&dictionary);

        let result = corrector.correct("All of it wouid go");

        assert_eq!(result.text, "All of it would go");
        assert_eq!(result.words, 5);
        assert_eq!(result.corrections.len(), 1);
        assert_eq!(result.corrections[0].original, "wouid");
    }

    #[test]
    fn empty_dictionary_still_runs_the_heuristics() {
        let dictionary = Dictionary::default();
        let corrector = LineCorrector::new(&dictionary);

        let result = corrector.correct("lt was a IoveIy day");

        assert_eq!(result.text, "It was a lovely day");
    }
}
