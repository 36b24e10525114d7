//! Option presentation
//!
//! Each time a question is shown its options are copied and, if enabled,
//! shuffled once. Options are identified by their text, so the label a
//! player presses is mapped back to text before it reaches the engine.

use crate::models::{Question, MAX_OPTIONS};
use rand::seq::SliceRandom;
use rand::Rng;

/// One option as displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedOption {
    /// Display label: 'A', 'B', ...
    pub label: char,
    /// Literal option text; this is the option's identity
    pub text: String,
}

/// The display order chosen for one presentation of a question
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentedOptions {
    options: Vec<PresentedOption>,
}

impl PresentedOptions {
    /// Copy the question's options, shuffling the copy when asked to
    pub fn present<R: Rng + ?Sized>(question: &Question, shuffle: bool, rng: &mut R) -> Self {
        let mut texts = question.options.clone();
        if shuffle {
            texts.shuffle(rng);
        }

        let options = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| PresentedOption {
                label: label_for(i).unwrap_or('?'),
                text,
            })
            .collect();

        Self { options }
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PresentedOption> {
        self.options.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PresentedOption> {
        self.options.iter()
    }
}

/// 'A' for 0, 'B' for 1, ... up to 'I' for the last allowed option.
/// Positions past `MAX_OPTIONS` have no label.
pub fn label_for(index: usize) -> Option<char> {
    u8::try_from(index)
        .ok()
        .filter(|i| usize::from(*i) < MAX_OPTIONS)
        .map(|i| (b'A' + i) as char)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn texts(presented: &PresentedOptions) -> Vec<&str> {
        presented.iter().map(|o| o.text.as_str()).collect()
    }

    fn question() -> Question {
        Question::new(
            "Which array method returns a new array with elements that pass a test?",
            ["map()", "reduce()", "filter()", "forEach()"],
            "filter()",
        )
    }

    #[test]
    fn test_unshuffled_keeps_canonical_order() {
        let q = question();
        let mut rng = SmallRng::seed_from_u64(7);
        let presented = PresentedOptions::present(&q, false, &mut rng);
        assert_eq!(texts(&presented), vec!["map()", "reduce()", "filter()", "forEach()"]);
        assert_eq!(presented.get(2).map(|o| o.label), Some('C'));
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let q = question();
        let canonical: HashSet<&str> = q.options.iter().map(String::as_str).collect();

        for seed in 0..64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let presented = PresentedOptions::present(&q, true, &mut rng);
            let shown: HashSet<&str> = texts(&presented).into_iter().collect();

            assert_eq!(presented.len(), q.options.len());
            assert_eq!(shown, canonical);
            assert!(presented.iter().any(|o| o.text == q.correct_answer));
        }
    }

    #[test]
    fn test_shuffle_does_not_touch_question() {
        let q = question();
        let before = q.options.clone();
        let mut rng = SmallRng::seed_from_u64(1);
        let _ = PresentedOptions::present(&q, true, &mut rng);
        assert_eq!(q.options, before);
    }

    #[test]
    fn test_shuffle_actually_reorders_sometimes() {
        let q = question();
        let reordered = (0..32).any(|seed| {
            let mut rng = SmallRng::seed_from_u64(seed);
            let presented = PresentedOptions::present(&q, true, &mut rng);
            texts(&presented) != vec!["map()", "reduce()", "filter()", "forEach()"]
        });
        assert!(reordered);
    }

    #[test]
    #[test]
    fn test_labels() {
        assert_eq!(label_for(0), Some('A'));
        assert_eq!(label_for(MAX_OPTIONS - 1), Some('I'));
        assert_eq!(label_for(MAX_OPTIONS), None);
    }
}
