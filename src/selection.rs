//! Read-only queries building a learner's practice set.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::{Schedule, WordProgress};
use crate::policy::end_of_day;
use crate::store::Store;

/// Stand-in rank for words without frequency data; sorts after every real rank.
pub const IMPOSSIBLE_RANK: u32 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageSummary {
    pub language_id: u32,
    pub total: usize,
    pub due: usize,
}

fn is_due(schedule: &Schedule, now: NaiveDateTime) -> bool {
    schedule.next_practice_time < end_of_day(now)
}

fn due_pairs(
    store: &Store,
    learner_id: u64,
    language_id: u32,
    now: NaiveDateTime,
) -> Vec<(&Schedule, &WordProgress)> {
    store
        .schedules()
        .filter(|s| is_due(s, now))
        .filter_map(|s| {
            store
                .word(learner_id, s.word_progress_id)
                .ok()
                .map(|w| (s, w))
        })
        .filter(|(_, w)| w.language_id == language_id && w.in_study())
        .collect()
}

/// Words due any time today, soonest first.
pub fn due_words(
    store: &Store,
    learner_id: u64,
    language_id: u32,
    now: NaiveDateTime,
    max_count: usize,
) -> Vec<u64> {
    let mut due = due_pairs(store, learner_id, language_id, now);
    due.sort_by_key(|(s, w)| (s.next_practice_time, w.id));
    due.into_iter()
        .take(max_count)
        .map(|(_, w)| w.id)
        .collect()
}

/// Words due today, closest to mastery first and then most common first,
/// with at most one record per underlying word.
pub fn priority_due_words(
    store: &Store,
    learner_id: u64,
    language_id: u32,
    now: NaiveDateTime,
    max_count: usize,
) -> Vec<u64> {
    let mut due = due_pairs(store, learner_id, language_id, now);
    due.sort_by_key(|(s, w)| {
        (
            Reverse(s.cooling_interval),
            w.rank.unwrap_or(IMPOSSIBLE_RANK),
            w.id,
        )
    });

    let mut seen = HashSet::new();
    due.into_iter()
        .filter(|(_, w)| seen.insert(w.meaning_id))
        .take(max_count)
        .map(|(_, w)| w.id)
        .collect()
}

/// Scheduled and due counts per language for one learner.
pub fn language_summaries(
    store: &Store,
    learner_id: u64,
    now: NaiveDateTime,
) -> Vec<LanguageSummary> {
    let mut languages: BTreeMap<u32, (usize, usize)> = BTreeMap::new();
    for schedule in store.schedules() {
        let Ok(word) = store.word(learner_id, schedule.word_progress_id) else {
            continue;
        };
        if !word.in_study() {
            continue;
        }
        let entry = languages.entry(word.language_id).or_insert((0, 0));
        entry.0 += 1;
        if is_due(schedule, now) {
            entry.1 += 1;
        }
    }
    languages
        .into_iter()
        .map(|(language_id, (total, due))| LanguageSummary {
            language_id,
            total,
            due,
        })
        .collect()
}
