//! Headline sentiment classification.
//!
//! A [`PolarityScorer`] turns text into a polarity in `[-1, 1]`; the
//! [`Classifier`] maps that number onto an [`Impact`] label, a confidence and
//! a fixed explanation. Classification never fails: scorer errors degrade to
//! a neutral verdict.

pub mod lexicon;

use crate::models::{Impact, SentimentResult};
use thiserror::Error;
use tracing::{error, instrument, trace};

pub use lexicon::LexiconScorer;

pub const POSITIVE_EXPLANATION: &str =
    "This headline shows positive sentiment due to its optimistic or favorable tone.";
pub const NEGATIVE_EXPLANATION: &str =
    "This headline shows negative sentiment due to its pessimistic or unfavorable tone.";
pub const NEUTRAL_EXPLANATION: &str = "This headline appears to be neutral in tone.";
pub const FAILURE_EXPLANATION: &str = "Unable to analyze";

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("polarity {0} is outside [-1, 1]")]
    OutOfRange(f64),
}

/// Source of polarity scores.
pub trait PolarityScorer {
    /// Polarity of `text` in `[-1, 1]`; negative is unfavorable.
    fn polarity(&self, text: &str) -> Result<f64, SentimentError>;
}

/// Maps polarity scores from a [`PolarityScorer`] to labeled results.
#[derive(Debug, Clone, Default)]
pub struct Classifier<S> {
    scorer: S,
}

impl<S: PolarityScorer> Classifier<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    /// Classify one headline. Scoring errors are logged and yield
    /// `Neutral` at 50 with [`FAILURE_EXPLANATION`].
    #[instrument(level = "debug", skip(self))]
    pub fn classify(&self, headline: &str) -> SentimentResult {
        match self.scorer.polarity(headline).and_then(checked) {
            Ok(polarity) => {
                let result = from_polarity(polarity);
                trace!(polarity, impact = %result.impact, "Scored headline");
                result
            }
            Err(e) => {
                error!(error = %e, "Error analyzing sentiment; defaulting to neutral");
                SentimentResult {
                    impact: Impact::Neutral,
                    confidence: 50.0,
                    explanation: FAILURE_EXPLANATION.to_string(),
                }
            }
        }
    }
}

fn checked(polarity: f64) -> Result<f64, SentimentError> {
    if polarity.is_finite() && (-1.0..=1.0).contains(&polarity) {
        Ok(polarity)
    } else {
        Err(SentimentError::OutOfRange(polarity))
    }
}

/// The threshold rule: the sign picks the label, the magnitude lifts the
/// confidence above 50, capped at 100.
pub fn from_polarity(polarity: f64) -> SentimentResult {
    let (impact, explanation) = if polarity > 0.0 {
        (Impact::Positive, POSITIVE_EXPLANATION)
    } else if polarity < 0.0 {
        (Impact::Negative, NEGATIVE_EXPLANATION)
    } else {
        return SentimentResult {
            impact: Impact::Neutral,
            confidence: 50.0,
            explanation: NEUTRAL_EXPLANATION.to_string(),
        };
    };

    SentimentResult {
        impact,
        confidence: (polarity.abs() * 100.0 + 50.0).min(100.0),
        explanation: explanation.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl PolarityScorer for Fixed {
        fn polarity(&self, _text: &str) -> Result<f64, SentimentError> {
            Ok(self.0)
        }
    }

    struct Broken;

    impl PolarityScorer for Broken {
        fn polarity(&self, _text: &str) -> Result<f64, SentimentError> {
            Err(SentimentError::OutOfRange(f64::NAN))
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_strong_positive_caps_at_100() {
        let result = Classifier::new(Fixed(0.6)).classify("anything");
        assert_eq!(result.impact, Impact::Positive);
        assert_eq!(result.confidence, 100.0);
        assert_eq!(result.explanation, POSITIVE_EXPLANATION);
    }

    #[test]
    fn test_mild_negative() {
        let result = Classifier::new(Fixed(-0.2)).classify("anything");
        assert_eq!(result.impact, Impact::Negative);
        assert!(approx(result.confidence, 70.0));
        assert_eq!(result.explanation, NEGATIVE_EXPLANATION);
    }

    #[test]
    fn test_zero_is_neutral() {
        let result = Classifier::new(Fixed(0.0)).classify("anything");
        assert_eq!(result.impact, Impact::Neutral);
        assert_eq!(result.confidence, 50.0);
        assert_eq!(result.explanation, NEUTRAL_EXPLANATION);
    }

    #[test]
    fn test_scorer_error_degrades_to_neutral() {
        let result = Classifier::new(Broken).classify("anything");
        assert_eq!(result.impact, Impact::Neutral);
        assert_eq!(result.confidence, 50.0);
        assert_eq!(result.explanation, "Unable to analyze");
    }

    #[test]
    fn test_invalid_polarity_degrades_to_neutral() {
        for bad in [f64::NAN, f64::INFINITY, 1.5, -3.0] {
            let result = Classifier::new(Fixed(bad)).classify("anything");
            assert_eq!(result.impact, Impact::Neutral);
            assert_eq!(result.explanation, FAILURE_EXPLANATION);
        }
    }

    #[test]
    fn test_confidence_bounds() {
        for p in [-1.0, -0.5, -0.01, 0.01, 0.49, 1.0] {
            let result = from_polarity(p);
            assert!(result.confidence >= 50.0 && result.confidence <= 100.0);
        }
        assert_eq!(from_polarity(-1.0).confidence, 100.0);
        assert!(approx(from_polarity(0.25).confidence, 75.0));
    }
}
