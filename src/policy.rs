//! Scheduling policies.
//!
//! Every policy walks a word up a chain of cooling intervals on correct
//! answers and one bucket down on incorrect ones. They differ in what
//! happens once the top bucket is answered correctly again: learn the word
//! outright, climb a level, or switch from receptive to productive practice.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Duration, NaiveDateTime, NaiveTime};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::intervals::{BucketChain, IntervalTable, ONE_DAY};
use crate::models::{LearnerPreferences, LearningCycle, MAX_LEVEL, Schedule, WordProgress};
use crate::outcome::{Correctness, Outcome};

/// Keeps a word from resurfacing right after a level-up or a mistake.
pub const MINIMUM_FLOOR_MINUTES: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Policy {
    /// No secondary state; the top bucket is the last step before learned.
    SingleCycle(BucketChain),
    /// Levels 1-4 on the short chain, inferring levels for words that
    /// predate level tracking.
    Levels,
    /// Receptive then (optionally) productive pass over the long chain.
    #[default]
    TwoLearningCycles,
    /// Levels 1-4 on the short chain with a minimum delay between practices.
    FourLevelsPerWord,
}

/// What a single outcome did to a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "transition", rename_all = "kebab-case")]
pub enum Transition {
    /// Repeat within the current window; nothing changed.
    Stale,
    Rescheduled {
        cooling_interval: u32,
        next_practice_time: NaiveDateTime,
    },
    LevelUp {
        level: u8,
        next_practice_time: NaiveDateTime,
    },
    CycleSwitched {
        cycle: LearningCycle,
        next_practice_time: NaiveDateTime,
    },
    /// The schedule is finished and must be deleted.
    Learned,
    /// The learner excluded the word; the schedule must be deleted.
    Dismissed,
    /// The word is already learned or excluded. The outcome was ignored.
    OutOfStudy,
}

impl Transition {
    /// Whether the word's schedule should be removed after this transition.
    pub fn ends_schedule(&self) -> bool {
        matches!(self, Transition::Learned | Transition::Dismissed)
    }
}

enum StalenessGuard {
    /// Everything up to the coming midnight is one window.
    EndOfDay,
    /// Not due until `next_practice_time` itself.
    NextPracticeTime,
}

enum Step {
    Interval,
    Level(u8),
    Cycle(LearningCycle),
}

/// Midnight at the end of the day `at` falls on.
pub fn end_of_day(at: NaiveDateTime) -> NaiveDateTime {
    (at.date() + Days::new(1)).and_time(NaiveTime::MIN)
}

impl Policy {
    pub fn chain(self) -> BucketChain {
        match self {
            Policy::SingleCycle(chain) => chain,
            Policy::Levels | Policy::FourLevelsPerWord => BucketChain::Short,
            Policy::TwoLearningCycles => BucketChain::Long,
        }
    }

    pub fn intervals(self) -> &'static IntervalTable {
        self.chain().table()
    }

    pub fn supports_dismissal(self) -> bool {
        !matches!(self, Policy::SingleCycle(_))
    }

    fn guard(self) -> StalenessGuard {
        match self {
            Policy::SingleCycle(_) | Policy::TwoLearningCycles => StalenessGuard::EndOfDay,
            Policy::Levels | Policy::FourLevelsPerWord => StalenessGuard::NextPracticeTime,
        }
    }

    fn minimum_floor(self) -> u32 {
        match self {
            Policy::FourLevelsPerWord => MINIMUM_FLOOR_MINUTES,
            _ => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Policy::SingleCycle(BucketChain::Long) => "single-cycle",
            Policy::SingleCycle(BucketChain::Short) => "single-cycle-short",
            Policy::Levels => "levels",
            Policy::TwoLearningCycles => "two-learning-cycles",
            Policy::FourLevelsPerWord => "four-levels-per-word",
        }
    }

    /// Whether an outcome at `at` would be a repeat within the current window.
    pub fn is_stale(self, schedule: &Schedule, at: NaiveDateTime) -> bool {
        match self.guard() {
            StalenessGuard::EndOfDay => schedule.next_practice_time >= end_of_day(at),
            StalenessGuard::NextPracticeTime => at < schedule.next_practice_time,
        }
    }

    /// Applies one outcome to a word and its schedule.
    ///
    /// On `Learned` the word's `learned_time` is already set; on `Learned`
    /// and `Dismissed` the caller deletes the schedule.
    pub fn apply(
        self,
        schedule: &mut Schedule,
        word: &mut WordProgress,
        outcome: &Outcome,
        at: NaiveDateTime,
        prefs: LearnerPreferences,
    ) -> Result<Transition> {
        debug_assert_eq!(schedule.word_progress_id, word.id);

        if outcome.is_dismissal() && self.supports_dismissal() {
            word.exclude_from_study();
            info!("word {} excluded from study by learner {}", word.id, word.learner_id);
            return Ok(Transition::Dismissed);
        }

        self.prepare(schedule, word)?;

        let table = self.intervals();
        if !table.contains(schedule.cooling_interval) {
            return Err(Error::UnknownInterval {
                minutes: schedule.cooling_interval,
            });
        }

        if self.is_stale(schedule, at) {
            debug!(
                "word {} already practiced, next practice at {}",
                word.id, schedule.next_practice_time
            );
            return Ok(Transition::Stale);
        }

        let step = match outcome.correctness() {
            Correctness::Correct => {
                schedule.consecutive_correct_answers += 1;
                if schedule.cooling_interval == table.max() {
                    match self.advance(word, prefs) {
                        Some(step) => {
                            schedule.cooling_interval = 0;
                            step
                        }
                        None => {
                            word.learned_time = Some(at);
                            info!("word {} learned by learner {}", word.id, word.learner_id);
                            return Ok(Transition::Learned);
                        }
                    }
                } else {
                    schedule.cooling_interval =
                        table.next_interval_on_success(schedule.cooling_interval)?;
                    Step::Interval
                }
            }
            Correctness::Incorrect => {
                schedule.consecutive_correct_answers = 0;
                schedule.cooling_interval =
                    table.previous_interval_on_failure(schedule.cooling_interval)?;
                Step::Interval
            }
        };

        let delay = schedule.cooling_interval.max(self.minimum_floor());
        schedule.next_practice_time = at + Duration::minutes(i64::from(delay));
        let next_practice_time = schedule.next_practice_time;

        Ok(match step {
            Step::Interval => Transition::Rescheduled {
                cooling_interval: schedule.cooling_interval,
                next_practice_time,
            },
            Step::Level(level) => {
                info!("word {} reached level {}", word.id, level);
                Transition::LevelUp {
                    level,
                    next_practice_time,
                }
            }
            Step::Cycle(cycle) => {
                info!("word {} moved to the {} cycle", word.id, cycle.as_str());
                Transition::CycleSwitched {
                    cycle,
                    next_practice_time,
                }
            }
        })
    }

    /// Brings the word's secondary state in line with this policy before
    /// the first outcome it handles. A no-op once the state is set.
    fn prepare(self, schedule: &mut Schedule, word: &mut WordProgress) -> Result<()> {
        match self {
            Policy::Levels if word.level == 0 => migrate_level(schedule, word, self.intervals()),
            Policy::FourLevelsPerWord if word.level == 0 => {
                word.level = 1;
                Ok(())
            }
            Policy::TwoLearningCycles if word.learning_cycle == LearningCycle::NotSet => {
                word.learning_cycle = LearningCycle::Receptive;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Moves the secondary state one step on saturation. `None` means the
    /// word has nowhere left to go and is learned.
    fn advance(self, word: &mut WordProgress, prefs: LearnerPreferences) -> Option<Step> {
        match self {
            Policy::SingleCycle(_) => None,
            Policy::Levels | Policy::FourLevelsPerWord => {
                if word.level < MAX_LEVEL {
                    word.level += 1;
                    Some(Step::Level(word.level))
                } else {
                    None
                }
            }
            Policy::TwoLearningCycles => {
                if word.learning_cycle == LearningCycle::Receptive && prefs.productive_exercises {
                    word.learning_cycle = LearningCycle::Productive;
                    Some(Step::Cycle(LearningCycle::Productive))
                } else {
                    None
                }
            }
        }
    }
}

/// Level a word had reached under the old single long chain.
fn level_for_legacy_interval(minutes: u32) -> Result<u8> {
    match minutes {
        0 => Ok(1),
        m if m == ONE_DAY => Ok(1),
        m if m == 2 * ONE_DAY => Ok(2),
        m if m == 4 * ONE_DAY => Ok(3),
        m if m == 8 * ONE_DAY => Ok(4),
        _ => Err(Error::UnknownInterval { minutes }),
    }
}

// Only for words whose level was never set. Words inferred at the top
// level get one more pass through the chain.
fn migrate_level(schedule: &mut Schedule, word: &mut WordProgress, table: &IntervalTable) -> Result<()> {
    let level = level_for_legacy_interval(schedule.cooling_interval)?;
    word.level = level;
    schedule.cooling_interval = if level == MAX_LEVEL {
        0
    } else {
        table.clamp(schedule.cooling_interval)
    };
    debug!(
        "word {} mapped to level {} with cooling interval {}",
        word.id, level, schedule.cooling_interval
    );
    Ok(())
}

impl FromStr for Policy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "single-cycle" => Ok(Policy::SingleCycle(BucketChain::Long)),
            "single-cycle-short" => Ok(Policy::SingleCycle(BucketChain::Short)),
            "levels" => Ok(Policy::Levels),
            "two-learning-cycles" => Ok(Policy::TwoLearningCycles),
            "four-levels-per-word" => Ok(Policy::FourLevelsPerWord),
            other => Err(Error::UnknownPolicy(other.to_string())),
        }
    }
}

impl TryFrom<String> for Policy {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Policy> for String {
    fn from(policy: Policy) -> String {
        policy.as_str().to_string()
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u64, hour: u32) -> NaiveDateTime {
        (NaiveDate::from_ymd_opt(2025, 6, 1).unwrap() + Days::new(day))
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn fresh(day: u64) -> (Schedule, WordProgress) {
        (Schedule::new(1, at(day, 9)), WordProgress::new(1, 10, 2, 100))
    }

    fn correct() -> Outcome {
        Outcome::Correct
    }

    fn wrong() -> Outcome {
        Outcome::Wrong
    }

    const PRODUCTIVE: LearnerPreferences = LearnerPreferences {
        productive_exercises: true,
    };

    #[test]
    fn single_cycle_walks_the_long_chain_then_learns() {
        let policy = Policy::SingleCycle(BucketChain::Long);
        let (mut schedule, mut word) = fresh(0);
        let mut seen = Vec::new();
        for i in 0..4 {
            let t = policy
                .apply(&mut schedule, &mut word, &correct(), at(10 * i, 9), LearnerPreferences::default())
                .unwrap();
            assert!(matches!(t, Transition::Rescheduled { .. }));
            seen.push(schedule.cooling_interval);
        }
        assert_eq!(seen, vec![ONE_DAY, 2 * ONE_DAY, 4 * ONE_DAY, 8 * ONE_DAY]);
        assert_eq!(schedule.consecutive_correct_answers, 4);

        let t = policy
            .apply(&mut schedule, &mut word, &correct(), at(40, 9), LearnerPreferences::default())
            .unwrap();
        assert_eq!(t, Transition::Learned);
        assert!(t.ends_schedule());
        assert_eq!(word.learned_time, Some(at(40, 9)));
    }

    #[test]
    fn single_cycle_short_learns_after_three() {
        let policy = Policy::SingleCycle(BucketChain::Short);
        let (mut schedule, mut word) = fresh(0);
        let prefs = LearnerPreferences::default();
        policy.apply(&mut schedule, &mut word, &correct(), at(0, 9), prefs).unwrap();
        policy.apply(&mut schedule, &mut word, &correct(), at(5, 9), prefs).unwrap();
        assert_eq!(schedule.cooling_interval, 2 * ONE_DAY);
        let t = policy.apply(&mut schedule, &mut word, &correct(), at(10, 9), prefs).unwrap();
        assert_eq!(t, Transition::Learned);
    }

    #[test]
    fn next_practice_time_follows_interval() {
        let policy = Policy::SingleCycle(BucketChain::Long);
        let (mut schedule, mut word) = fresh(0);
        policy
            .apply(&mut schedule, &mut word, &correct(), at(0, 10), LearnerPreferences::default())
            .unwrap();
        assert_eq!(schedule.next_practice_time, at(1, 10));
    }

    #[test]
    fn same_day_repeat_is_ignored() {
        let policy = Policy::SingleCycle(BucketChain::Long);
        let (mut schedule, mut word) = fresh(0);
        let prefs = LearnerPreferences::default();
        policy.apply(&mut schedule, &mut word, &correct(), at(0, 10), prefs).unwrap();
        let before = schedule.clone();

        let t = policy.apply(&mut schedule, &mut word, &correct(), at(0, 15), prefs).unwrap();
        assert_eq!(t, Transition::Stale);
        assert_eq!(schedule, before);

        let t = policy.apply(&mut schedule, &mut word, &wrong(), at(0, 23), prefs).unwrap();
        assert_eq!(t, Transition::Stale);
        assert_eq!(schedule, before);
    }

    #[test]
    fn end_of_day_window_counts_early_practice_on_the_due_day() {
        let policy = Policy::TwoLearningCycles;
        let (mut schedule, mut word) = fresh(0);
        policy
            .apply(&mut schedule, &mut word, &correct(), at(0, 10), PRODUCTIVE)
            .unwrap();
        // due at 10:00 tomorrow, practiced at 08:00 tomorrow
        let t = policy
            .apply(&mut schedule, &mut word, &correct(), at(1, 8), PRODUCTIVE)
            .unwrap();
        assert!(matches!(t, Transition::Rescheduled { cooling_interval, .. } if cooling_interval == 2 * ONE_DAY));
    }

    #[test]
    fn next_practice_guard_waits_for_the_exact_time() {
        let policy = Policy::FourLevelsPerWord;
        let (mut schedule, mut word) = fresh(0);
        let prefs = LearnerPreferences::default();
        policy.apply(&mut schedule, &mut word, &correct(), at(0, 10), prefs).unwrap();
        let t = policy.apply(&mut schedule, &mut word, &correct(), at(1, 8), prefs).unwrap();
        assert_eq!(t, Transition::Stale);
        let t = policy.apply(&mut schedule, &mut word, &correct(), at(1, 10), prefs).unwrap();
        assert!(matches!(t, Transition::Rescheduled { cooling_interval, .. } if cooling_interval == 2 * ONE_DAY));
    }

    #[test]
    fn levels_infers_level_one_for_a_new_word() {
        let policy = Policy::Levels;
        let (mut schedule, mut word) = fresh(0);
        assert_eq!(word.level, 0);
        policy
            .apply(&mut schedule, &mut word, &correct(), at(0, 9), LearnerPreferences::default())
            .unwrap();
        assert_eq!(word.level, 1);
        assert_eq!(schedule.cooling_interval, ONE_DAY);
        assert_eq!(schedule.consecutive_correct_answers, 1);
    }

    #[test]
    fn levels_migration_from_top_of_old_chain_resets_interval() {
        let policy = Policy::Levels;
        let (mut schedule, mut word) = fresh(0);
        schedule.cooling_interval = 8 * ONE_DAY;
        let t = policy
            .apply(&mut schedule, &mut word, &correct(), at(0, 9), LearnerPreferences::default())
            .unwrap();
        assert_eq!(word.level, MAX_LEVEL);
        assert_eq!(schedule.cooling_interval, ONE_DAY);
        assert!(matches!(t, Transition::Rescheduled { .. }));
    }

    #[test]
    fn levels_migration_clamps_into_short_chain() {
        let policy = Policy::Levels;
        let (mut schedule, mut word) = fresh(0);
        schedule.cooling_interval = 4 * ONE_DAY;
        let t = policy
            .apply(&mut schedule, &mut word, &correct(), at(0, 9), LearnerPreferences::default())
            .unwrap();
        assert_eq!(t, Transition::LevelUp { level: 4, next_practice_time: at(0, 9) });
        assert_eq!(schedule.cooling_interval, 0);
    }

    #[test]
    fn levels_migration_runs_once() {
        let policy = Policy::Levels;
        let (mut schedule, mut word) = fresh(0);
        word.level = 2;
        schedule.cooling_interval = ONE_DAY;
        policy
            .apply(&mut schedule, &mut word, &wrong(), at(0, 9), LearnerPreferences::default())
            .unwrap();
        assert_eq!(word.level, 2);
        assert_eq!(schedule.cooling_interval, 0);
    }

    #[test]
    fn levels_failure_never_drops_a_level() {
        let policy = Policy::Levels;
        let (mut schedule, mut word) = fresh(0);
        word.level = 2;
        schedule.consecutive_correct_answers = 3;
        let t = policy
            .apply(&mut schedule, &mut word, &wrong(), at(0, 9), LearnerPreferences::default())
            .unwrap();
        assert_eq!(schedule.cooling_interval, 0);
        assert_eq!(schedule.consecutive_correct_answers, 0);
        assert_eq!(word.level, 2);
        assert_eq!(
            t,
            Transition::Rescheduled {
                cooling_interval: 0,
                next_practice_time: at(0, 9)
            }
        );
    }

    #[test]
    fn levels_saturation_climbs_then_learns() {
        let policy = Policy::Levels;
        let prefs = LearnerPreferences::default();
        let (mut schedule, mut word) = fresh(0);
        word.level = 1;
        schedule.cooling_interval = 2 * ONE_DAY;
        let t = policy.apply(&mut schedule, &mut word, &correct(), at(0, 9), prefs).unwrap();
        assert_eq!(t, Transition::LevelUp { level: 2, next_practice_time: at(0, 9) });
        assert_eq!(schedule.cooling_interval, 0);

        word.level = MAX_LEVEL;
        schedule.cooling_interval = 2 * ONE_DAY;
        let t = policy.apply(&mut schedule, &mut word, &correct(), at(1, 9), prefs).unwrap();
        assert_eq!(t, Transition::Learned);
        assert_eq!(word.learned_time, Some(at(1, 9)));
    }

    #[test]
    fn four_levels_applies_minimum_floor() {
        let policy = Policy::FourLevelsPerWord;
        let prefs = LearnerPreferences::default();
        let (mut schedule, mut word) = fresh(0);
        policy.apply(&mut schedule, &mut word, &wrong(), at(0, 9), prefs).unwrap();
        assert_eq!(word.level, 1);
        assert_eq!(schedule.cooling_interval, 0);
        assert_eq!(schedule.next_practice_time, at(0, 9) + Duration::minutes(30));

        // within the floor the repeat does not count
        let t = policy
            .apply(&mut schedule, &mut word, &correct(), at(0, 9) + Duration::minutes(10), prefs)
            .unwrap();
        assert_eq!(t, Transition::Stale);

        schedule.cooling_interval = 2 * ONE_DAY;
        let t = policy.apply(&mut schedule, &mut word, &correct(), at(0, 10), prefs).unwrap();
        assert_eq!(
            t,
            Transition::LevelUp {
                level: 2,
                next_practice_time: at(0, 10) + Duration::minutes(30)
            }
        );
    }

    #[test]
    fn four_levels_has_no_interval_inference() {
        let policy = Policy::FourLevelsPerWord;
        let (mut schedule, mut word) = fresh(0);
        schedule.cooling_interval = 8 * ONE_DAY;
        let err = policy
            .apply(&mut schedule, &mut word, &correct(), at(0, 9), LearnerPreferences::default())
            .unwrap_err();
        assert!(matches!(err, Error::UnknownInterval { .. }));
    }

    #[test]
    fn cycles_switch_to_productive_then_learn() {
        let policy = Policy::TwoLearningCycles;
        let (mut schedule, mut word) = fresh(0);
        let mut day = 0;
        for _ in 0..4 {
            policy.apply(&mut schedule, &mut word, &correct(), at(day, 9), PRODUCTIVE).unwrap();
            day += 10;
        }
        assert_eq!(word.learning_cycle, LearningCycle::Receptive);
        let t = policy.apply(&mut schedule, &mut word, &correct(), at(day, 9), PRODUCTIVE).unwrap();
        assert_eq!(
            t,
            Transition::CycleSwitched {
                cycle: LearningCycle::Productive,
                next_practice_time: at(day, 9)
            }
        );
        assert_eq!(schedule.cooling_interval, 0);
        assert!(word.learned_time.is_none());

        for _ in 0..4 {
            day += 10;
            policy.apply(&mut schedule, &mut word, &correct(), at(day, 9), PRODUCTIVE).unwrap();
        }
        day += 10;
        let t = policy.apply(&mut schedule, &mut word, &correct(), at(day, 9), PRODUCTIVE).unwrap();
        assert_eq!(t, Transition::Learned);
        assert_eq!(word.learning_cycle, LearningCycle::Productive);
    }

    #[test]
    fn cycles_without_productive_learn_after_receptive() {
        let policy = Policy::TwoLearningCycles;
        let (mut schedule, mut word) = fresh(0);
        let prefs = LearnerPreferences::default();
        let mut last = Transition::Stale;
        for i in 0..5 {
            last = policy.apply(&mut schedule, &mut word, &correct(), at(10 * i, 9), prefs).unwrap();
        }
        assert_eq!(last, Transition::Learned);
        assert_eq!(word.learning_cycle, LearningCycle::Receptive);
    }

    #[test]
    fn productive_cycle_survives_failures() {
        let policy = Policy::TwoLearningCycles;
        let (mut schedule, mut word) = fresh(0);
        let mut day = 0;
        for _ in 0..5 {
            policy.apply(&mut schedule, &mut word, &correct(), at(day, 9), PRODUCTIVE).unwrap();
            day += 10;
        }
        assert_eq!(word.learning_cycle, LearningCycle::Productive);
        for _ in 0..4 {
            policy.apply(&mut schedule, &mut word, &correct(), at(day, 9), PRODUCTIVE).unwrap();
            day += 10;
        }
        assert_eq!(schedule.cooling_interval, 8 * ONE_DAY);
        assert_eq!(schedule.consecutive_correct_answers, 9);

        let mut seen = Vec::new();
        for label in ["W", "S", "T", "W", "W"] {
            let t = policy
                .apply(&mut schedule, &mut word, &Outcome::parse(label), at(day, 9), PRODUCTIVE)
                .unwrap();
            assert!(matches!(t, Transition::Rescheduled { .. }));
            assert_eq!(word.learning_cycle, LearningCycle::Productive);
            assert_eq!(schedule.consecutive_correct_answers, 0);
            seen.push(schedule.cooling_interval);
            day += 10;
        }
        assert_eq!(seen, vec![4 * ONE_DAY, 2 * ONE_DAY, ONE_DAY, 0, 0]);
        assert!(word.learned_time.is_none());
    }

    #[test]
    fn dismissal_short_circuits() {
        for policy in [Policy::TwoLearningCycles, Policy::Levels, Policy::FourLevelsPerWord] {
            let (mut schedule, mut word) = fresh(0);
            schedule.cooling_interval = ONE_DAY;
            schedule.next_practice_time = at(5, 9);
            let t = policy
                .apply(&mut schedule, &mut word, &Outcome::OtherFeedback, at(0, 9), PRODUCTIVE)
                .unwrap();
            assert_eq!(t, Transition::Dismissed);
            assert!(!word.fit_for_study);
            assert!(word.learned_time.is_none());
        }
    }

    #[test]
    fn single_cycle_treats_feedback_as_incorrect() {
        let policy = Policy::SingleCycle(BucketChain::Long);
        let (mut schedule, mut word) = fresh(0);
        schedule.cooling_interval = 4 * ONE_DAY;
        let t = policy
            .apply(&mut schedule, &mut word, &Outcome::OtherFeedback, at(0, 9), PRODUCTIVE)
            .unwrap();
        assert!(matches!(t, Transition::Rescheduled { cooling_interval, .. } if cooling_interval == 2 * ONE_DAY));
        assert!(word.fit_for_study);
    }

    #[test]
    fn levels_never_regress() {
        let policy = Policy::Levels;
        let prefs = LearnerPreferences::default();
        let (mut schedule, mut word) = fresh(0);
        let pattern = [true, true, false, true, true, true, false, false, true, true, true, true];
        let mut highest = 0;
        for (i, &ok) in pattern.iter().cycle().take(40).enumerate() {
            let outcome = if ok { correct() } else { wrong() };
            let t = policy
                .apply(&mut schedule, &mut word, &outcome, at(3 * i as u64, 9), prefs)
                .unwrap();
            assert!(word.level >= highest);
            highest = word.level;
            if t == Transition::Learned {
                break;
            }
        }
        assert!(highest >= 2);
    }

    #[test]
    fn hinted_answers_advance_the_interval() {
        let policy = Policy::SingleCycle(BucketChain::Long);
        let (mut schedule, mut word) = fresh(0);
        policy
            .apply(&mut schedule, &mut word, &Outcome::parse("TTC"), at(0, 9), PRODUCTIVE)
            .unwrap();
        assert_eq!(schedule.cooling_interval, ONE_DAY);
    }

    #[test]
    fn policy_names_round_trip() {
        for policy in [
            Policy::SingleCycle(BucketChain::Long),
            Policy::SingleCycle(BucketChain::Short),
            Policy::Levels,
            Policy::TwoLearningCycles,
            Policy::FourLevelsPerWord,
        ] {
            assert_eq!(policy.as_str().parse::<Policy>().unwrap(), policy);
        }
        assert!(matches!("sm2".parse::<Policy>(), Err(Error::UnknownPolicy(_))));
    }

    #[test]
    fn end_of_day_is_next_midnight() {
        assert_eq!(end_of_day(at(0, 23)), at(1, 0));
        assert_eq!(end_of_day(at(0, 0)), at(1, 0));
    }
}
