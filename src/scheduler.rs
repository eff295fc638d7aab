//! Entry point for outcome reports.
//!
//! All access to the store goes through one lock, so two reports for the
//! same word are applied one after the other and never interleave.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDateTime;
use log::{debug, info};

use crate::error::{Error, Result};
use crate::models::LearnerPreferences;
use crate::outcome::Outcome;
use crate::policy::{Policy, Transition};
use crate::selection::{self, LanguageSummary};
use crate::store::Store;

#[derive(Debug, Clone)]
pub struct OutcomeReport {
    pub learner_id: u64,
    pub word_id: u64,
    pub outcome: Outcome,
    pub at: NaiveDateTime,
    pub preferences: LearnerPreferences,
}

pub struct Scheduler {
    policy: Policy,
    store: Mutex<Store>,
}

impl Scheduler {
    pub fn new(policy: Policy, store: Store) -> Self {
        Scheduler {
            policy,
            store: Mutex::new(store),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>> {
        self.store.lock().map_err(|_| Error::LockPoisoned)
    }

    /// Applies one outcome, creating the word's schedule on first contact
    /// and deleting it once the word is learned or dismissed. Outcomes for
    /// words already out of study are ignored.
    pub fn report(&self, report: &OutcomeReport) -> Result<Transition> {
        let mut store = self.lock()?;
        if !store.word(report.learner_id, report.word_id)?.in_study() {
            debug!(
                "ignoring outcome for word {} of learner {}, it is out of study",
                report.word_id, report.learner_id
            );
            return Ok(Transition::OutOfStudy);
        }
        let (schedule, word) = store.find_or_create(report.learner_id, report.word_id, report.at)?;
        let transition = self.policy.apply(
            schedule,
            word,
            &report.outcome,
            report.at,
            report.preferences,
        )?;
        if transition.ends_schedule() {
            store.remove_schedule(report.word_id);
        }
        Ok(transition)
    }

    /// The learner opted the word out of study outside of an exercise.
    pub fn exclude_word(&self, learner_id: u64, word_id: u64) -> Result<()> {
        let mut store = self.lock()?;
        store.word_mut(learner_id, word_id)?.exclude_from_study();
        store.remove_schedule(word_id);
        info!("word {word_id} excluded from study by learner {learner_id}");
        Ok(())
    }

    pub fn due_words(
        &self,
        learner_id: u64,
        language_id: u32,
        now: NaiveDateTime,
        max_count: usize,
        prioritized: bool,
    ) -> Result<Vec<u64>> {
        let store = self.lock()?;
        Ok(if prioritized {
            selection::priority_due_words(&store, learner_id, language_id, now, max_count)
        } else {
            selection::due_words(&store, learner_id, language_id, now, max_count)
        })
    }

    pub fn summaries(&self, learner_id: u64, now: NaiveDateTime) -> Result<Vec<LanguageSummary>> {
        let store = self.lock()?;
        Ok(selection::language_summaries(&store, learner_id, now))
    }

    pub fn with_store<R>(&self, f: impl FnOnce(&Store) -> R) -> Result<R> {
        let store = self.lock()?;
        Ok(f(&store))
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        self.lock()?.save(dir)
    }

    pub fn into_store(self) -> Result<Store> {
        self.store.into_inner().map_err(|_| Error::LockPoisoned)
    }
}
