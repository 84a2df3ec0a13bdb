//! Rule-based polarity scoring over a general news lexicon.
//!
//! The score is the mean polarity of the lexicon words found in the text:
//! 1. Look up each word's polarity
//! 2. A preceding negation flips the sign and halves the strength
//! 3. A preceding intensifier scales the strength
//!
//! Text with no lexicon words scores `0.0`.

use super::{PolarityScorer, SentimentError};
use std::collections::HashMap;

const POSITIVE: &[(&str, f64)] = &[
    ("good", 0.7),
    ("great", 0.8),
    ("best", 1.0),
    ("better", 0.5),
    ("excellent", 1.0),
    ("amazing", 0.6),
    ("win", 0.8),
    ("wins", 0.8),
    ("won", 0.7),
    ("victory", 0.7),
    ("success", 0.6),
    ("successful", 0.75),
    ("gain", 0.5),
    ("gains", 0.5),
    ("growth", 0.6),
    ("grow", 0.4),
    ("rise", 0.4),
    ("rises", 0.4),
    ("surge", 0.6),
    ("surges", 0.6),
    ("rally", 0.6),
    ("rallies", 0.6),
    ("record", 0.3),
    ("strong", 0.43),
    ("boost", 0.5),
    ("boosts", 0.5),
    ("improve", 0.5),
    ("improves", 0.5),
    ("recovery", 0.5),
    ("rebound", 0.5),
    ("hope", 0.5),
    ("hopes", 0.5),
    ("optimistic", 0.6),
    ("celebrate", 0.6),
    ("celebrates", 0.6),
    ("breakthrough", 0.7),
    ("safe", 0.5),
    ("happy", 0.8),
    ("love", 0.5),
    ("peace", 0.5),
    ("help", 0.3),
    ("helps", 0.3),
    ("new", 0.14),
    ("free", 0.4),
    ("positive", 0.23),
    ("benefit", 0.5),
    ("benefits", 0.5),
    ("praise", 0.6),
    ("approve", 0.4),
    ("approves", 0.4),
    ("agreement", 0.3),
    ("deal", 0.2),
];

const NEGATIVE: &[(&str, f64)] = &[
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("crisis", -0.6),
    ("war", -0.5),
    ("attack", -0.6),
    ("attacks", -0.6),
    ("kill", -0.8),
    ("kills", -0.8),
    ("killed", -0.8),
    ("dead", -0.6),
    ("death", -0.6),
    ("deaths", -0.6),
    ("crash", -0.7),
    ("crashes", -0.7),
    ("fall", -0.4),
    ("falls", -0.4),
    ("drop", -0.4),
    ("drops", -0.4),
    ("plunge", -0.7),
    ("plunges", -0.7),
    ("loss", -0.5),
    ("losses", -0.5),
    ("lose", -0.5),
    ("fail", -0.5),
    ("fails", -0.5),
    ("failed", -0.5),
    ("failure", -0.6),
    ("weak", -0.4),
    ("fear", -0.6),
    ("fears", -0.6),
    ("threat", -0.5),
    ("threatens", -0.5),
    ("warning", -0.4),
    ("warns", -0.4),
    ("risk", -0.3),
    ("concern", -0.3),
    ("concerns", -0.3),
    ("scandal", -0.6),
    ("fraud", -0.8),
    ("violence", -0.7),
    ("disaster", -0.8),
    ("collapse", -0.7),
    ("recession", -0.6),
    ("layoffs", -0.5),
    ("sad", -0.5),
    ("angry", -0.5),
    ("wrong", -0.5),
    ("problem", -0.4),
    ("problems", -0.4),
    ("negative", -0.3),
    ("injured", -0.6),
    ("shooting", -0.7),
    ("lawsuit", -0.3),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "none", "nothing", "cannot", "can't", "don't",
    "doesn't", "didn't", "won't", "wouldn't", "isn't", "aren't", "wasn't", "weren't", "hardly",
    "barely",
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("hugely", 1.4),
    ("deeply", 1.3),
    ("really", 1.2),
    ("most", 1.3),
    ("slightly", 0.5),
    ("somewhat", 0.7),
    ("mildly", 0.6),
];

/// Polarity scorer backed by a built-in word list.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    words: HashMap<String, f64>,
    negations: Vec<String>,
    intensifiers: HashMap<String, f64>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        let words = POSITIVE
            .iter()
            .chain(NEGATIVE)
            .map(|(w, s)| (w.to_string(), *s))
            .collect();
        let negations = NEGATIONS.iter().map(|w| w.to_string()).collect();
        let intensifiers = INTENSIFIERS.iter().map(|(w, m)| (w.to_string(), *m)).collect();
        Self {
            words,
            negations,
            intensifiers,
        }
    }

    fn score(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let mut scores = Vec::new();
        let mut negate = false;
        let mut intensity = 1.0;

        for token in tokens(&lowered) {
            if self.negations.iter().any(|n| n == token) {
                negate = true;
                continue;
            }
            if let Some(mult) = self.intensifiers.get(token) {
                intensity = *mult;
                continue;
            }
            if let Some(&polarity) = self.words.get(token) {
                let mut score = polarity * intensity;
                if negate {
                    score *= -0.5;
                }
                scores.push(score);
            }
            negate = false;
            intensity = 1.0;
        }

        if scores.is_empty() {
            return 0.0;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> Result<f64, SentimentError> {
        Ok(self.score(text))
    }
}

/// Split on anything that is not alphanumeric or an apostrophe.
fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '’'))
        .map(|t| t.trim_matches(|c: char| c == '\'' || c == '’'))
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> f64 {
        LexiconScorer::new().polarity(text).unwrap()
    }

    impl LexiconScorer {
        fn with_word(mut self, word: &str, polarity: f64) -> Self {
            self.words.insert(word.to_lowercase(), polarity);
            self
        }
    }

    #[test]
    fn test_no_lexicon_words_is_zero() {
        assert_eq!(score("Council publishes quarterly minutes"), 0.0);
        assert_eq!(score(""), 0.0);
    }

    #[test]
    fn test_positive_and_negative() {
        assert!(score("Stocks rally as economy shows strong growth") > 0.0);
        assert!(score("Markets crash amid recession fears") < 0.0);
    }

    #[test]
    fn test_mean_of_matched_words() {
        // (0.7 + -0.7) / 2
        assert_eq!(score("Good news and bad news"), 0.0);
    }

    #[test]
    fn test_negation_flips_and_halves() {
        assert!((score("A good result") - 0.7).abs() < 1e-9);
        assert!((score("A not good result") - (-0.35)).abs() < 1e-9);
    }

    #[test]
    fn test_negation_only_reaches_next_word() {
        assert!((score("Not a good result") - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_intensifier_scales() {
        assert!((score("very good") - 0.91).abs() < 1e-9);
        assert!((score("slightly bad") - (-0.35)).abs() < 1e-9);
    }

    #[test]
    fn test_clamped_to_unit_range() {
        let p = score("extremely excellent extremely best");
        assert_eq!(p, 1.0);
        let n = score("extremely worst");
        assert_eq!(n, -1.0);
    }

    #[test]
    fn test_punctuation_and_case() {
        assert!((score("GREAT!") - 0.8).abs() < 1e-9);
        assert!((score("doesn't fail") - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_custom_word() {
        let scorer = LexiconScorer::new().with_word("Bullish", 0.9);
        assert!((scorer.polarity("bullish outlook").unwrap() - 0.9).abs() < 1e-9);
    }
}
