//! Records the scheduler reads and writes.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_LEVEL: u8 = 4;

/// Receptive practice (recognising the word) precedes productive practice
/// (producing it). A word never moves back to an earlier cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningCycle {
    #[default]
    NotSet,
    Receptive,
    Productive,
}

impl LearningCycle {
    pub fn as_str(self) -> &'static str {
        match self {
            LearningCycle::NotSet => "",
            LearningCycle::Receptive => "receptive",
            LearningCycle::Productive => "productive",
        }
    }

    pub fn parse(s: &str) -> Option<LearningCycle> {
        match s.trim() {
            "" => Some(LearningCycle::NotSet),
            "receptive" => Some(LearningCycle::Receptive),
            "productive" => Some(LearningCycle::Productive),
            _ => None,
        }
    }
}

/// Explicit learner choice about a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StudyPreference {
    #[default]
    NoPreference,
    ExcludeFromExercises,
}

impl StudyPreference {
    pub fn as_str(self) -> &'static str {
        match self {
            StudyPreference::NoPreference => "",
            StudyPreference::ExcludeFromExercises => "exclude",
        }
    }

    pub fn parse(s: &str) -> Option<StudyPreference> {
        match s.trim() {
            "" => Some(StudyPreference::NoPreference),
            "exclude" => Some(StudyPreference::ExcludeFromExercises),
            _ => None,
        }
    }
}

/// A learner's progress on one word. Outlives the word's schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordProgress {
    pub id: u64,
    pub learner_id: u64,
    pub language_id: u32,
    /// The underlying word/meaning. Several records of one learner can share it.
    pub meaning_id: u64,
    /// Frequency rank of the word in its language, 1 being the most common.
    pub rank: Option<u32>,
    /// 0 means the level was never tracked for this word.
    pub level: u8,
    pub learning_cycle: LearningCycle,
    pub fit_for_study: bool,
    pub preference: StudyPreference,
    pub learned_time: Option<NaiveDateTime>,
}

impl WordProgress {
    pub fn new(id: u64, learner_id: u64, language_id: u32, meaning_id: u64) -> Self {
        WordProgress {
            id,
            learner_id,
            language_id,
            meaning_id,
            rank: None,
            level: 0,
            learning_cycle: LearningCycle::NotSet,
            fit_for_study: true,
            preference: StudyPreference::NoPreference,
            learned_time: None,
        }
    }

    pub fn is_learned(&self) -> bool {
        self.learned_time.is_some()
    }

    /// Still taking part in exercises: neither learned nor excluded.
    pub fn in_study(&self) -> bool {
        self.fit_for_study && !self.is_learned()
    }

    /// Takes the word out of study at the learner's request.
    pub fn exclude_from_study(&mut self) {
        self.fit_for_study = false;
        self.preference = StudyPreference::ExcludeFromExercises;
    }
}

/// When a word is next due, and how far along its interval chain it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: Uuid,
    pub word_progress_id: u64,
    /// Minutes; always a bucket of the owning policy's chain.
    pub cooling_interval: u32,
    pub consecutive_correct_answers: u32,
    pub next_practice_time: NaiveDateTime,
}

impl Schedule {
    pub fn new(word_progress_id: u64, now: NaiveDateTime) -> Self {
        Schedule {
            id: Uuid::new_v4(),
            word_progress_id,
            cooling_interval: 0,
            consecutive_correct_answers: 0,
            next_practice_time: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LearnerPreferences {
    #[serde(default)]
    pub productive_exercises: bool,
}
