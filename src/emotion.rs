//! Emotion labels and per-frame classifier scores.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Closed set of emotions the overlay knows how to present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmotionLabel {
    Neutral,
    Angry,
    Disgust,
    Fear,
    Happy,
    Sad,
    Surprise,
}

impl EmotionLabel {
    /// All labels, in catalog order
    pub const ALL: [EmotionLabel; 7] = [
        EmotionLabel::Neutral,
        EmotionLabel::Angry,
        EmotionLabel::Disgust,
        EmotionLabel::Fear,
        EmotionLabel::Happy,
        EmotionLabel::Sad,
        EmotionLabel::Surprise,
    ];

    /// Lowercase name as reported by the classifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EmotionLabel::Neutral => "neutral",
            EmotionLabel::Angry => "angry",
            EmotionLabel::Disgust => "disgust",
            EmotionLabel::Fear => "fear",
            EmotionLabel::Happy => "happy",
            EmotionLabel::Sad => "sad",
            EmotionLabel::Surprise => "surprise",
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "neutral" => Ok(EmotionLabel::Neutral),
            "angry" => Ok(EmotionLabel::Angry),
            "disgust" => Ok(EmotionLabel::Disgust),
            "fear" => Ok(EmotionLabel::Fear),
            "happy" => Ok(EmotionLabel::Happy),
            "sad" => Ok(EmotionLabel::Sad),
            "surprise" => Ok(EmotionLabel::Surprise),
            _ => Err(Error::UnrecognizedLabel(s.to_string())),
        }
    }
}

/// Confidence scores of a single classification, in the classifier's order.
///
/// Labels are kept as the raw strings the classifier produced; they are only
/// normalised into [`EmotionLabel`] once the dominant entry has been chosen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmotionScores {
    entries: Vec<(String, f32)>,
}

impl EmotionScores {
    /// Create an empty score set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a score, keeping insertion order
    pub fn push(&mut self, label: impl Into<String>, score: f32) {
        self.entries.push((label.into(), score));
    }

    /// Entries in classifier order
    #[must_use]
    pub fn entries(&self) -> &[(String, f32)] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Score reported for `label`, matched case-insensitively
    #[must_use]
    pub fn get(&self, label: EmotionLabel) -> Option<f32> {
        self.entries
            .iter()
            .find(|(name, _)| name.trim().eq_ignore_ascii_case(label.as_str()))
            .map(|&(_, score)| score)
    }

    /// Select the highest-scoring label.
    ///
    /// Ties go to the entry seen first. The winner must be a known emotion.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The score set is empty
    /// - Any score is negative or not finite
    /// - The winning label is not a known emotion
    pub fn dominant(&self) -> Result<EmotionLabel> {
        let mut best: Option<&(String, f32)> = None;
        for entry in &self.entries {
            let score = entry.1;
            if !score.is_finite() || score < 0.0 {
                return Err(Error::Classification(format!(
                    "Invalid score {score} for label '{}'",
                    entry.0
                )));
            }
            if best.map_or(true, |b| score > b.1) {
                best = Some(entry);
            }
        }

        let (label, _) = best.ok_or_else(|| Error::Classification("Classifier returned no scores".to_string()))?;
        label.parse()
    }
}

impl<S: Into<String>> FromIterator<(S, f32)> for EmotionScores {
    fn from_iter<I: IntoIterator<Item = (S, f32)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(label, score)| (label.into(), score)).collect(),
        }
    }
}
