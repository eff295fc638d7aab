use std::fmt;
use std::str::FromStr;

/// Raw exercise outcome as reported by the exercise front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    TooEasy,
    /// Correct after asking for one to three translations.
    CorrectAfterTranslations(u8),
    CorrectAfterHint,
    Wrong,
    ShowSolution,
    Typo,
    Retry,
    AskedForHint,
    /// The learner flagged the word instead of answering.
    OtherFeedback,
    Unrecognized(String),
}

/// What an outcome means for scheduling purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correctness {
    Correct,
    Incorrect,
}

impl Outcome {
    pub fn parse(label: &str) -> Outcome {
        match label.trim() {
            "C" => Outcome::Correct,
            "Too easy" => Outcome::TooEasy,
            "TC" => Outcome::CorrectAfterTranslations(1),
            "TTC" => Outcome::CorrectAfterTranslations(2),
            "TTTC" => Outcome::CorrectAfterTranslations(3),
            "HC" => Outcome::CorrectAfterHint,
            "W" => Outcome::Wrong,
            "S" => Outcome::ShowSolution,
            "T" => Outcome::Typo,
            "R" => Outcome::Retry,
            "H" => Outcome::AskedForHint,
            "other_feedback" => Outcome::OtherFeedback,
            other => {
                log::warn!("unrecognized outcome {other:?}, counting it as incorrect");
                Outcome::Unrecognized(other.to_string())
            }
        }
    }

    pub fn label(&self) -> String {
        match self {
            Outcome::Correct => "C".to_string(),
            Outcome::TooEasy => "Too easy".to_string(),
            Outcome::CorrectAfterTranslations(n) => {
                format!("{}C", "T".repeat(usize::from(*n)))
            }
            Outcome::CorrectAfterHint => "HC".to_string(),
            Outcome::Wrong => "W".to_string(),
            Outcome::ShowSolution => "S".to_string(),
            Outcome::Typo => "T".to_string(),
            Outcome::Retry => "R".to_string(),
            Outcome::AskedForHint => "H".to_string(),
            Outcome::OtherFeedback => "other_feedback".to_string(),
            Outcome::Unrecognized(label) => label.clone(),
        }
    }

    /// Hinted and "too easy" answers count as correct. Everything else,
    /// including labels we don't know, counts as incorrect.
    pub fn correctness(&self) -> Correctness {
        match self {
            Outcome::Correct
            | Outcome::TooEasy
            | Outcome::CorrectAfterTranslations(1..=3)
            | Outcome::CorrectAfterHint => Correctness::Correct,
            _ => Correctness::Incorrect,
        }
    }

    pub fn is_dismissal(&self) -> bool {
        matches!(self, Outcome::OtherFeedback)
    }
}

impl FromStr for Outcome {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Outcome::parse(s))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
