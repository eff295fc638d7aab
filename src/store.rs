//! In-memory records with a CSV snapshot on disk.
//!
//! A data directory holds `words.csv` and `schedules.csv`. Missing files
//! load as an empty store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{LearningCycle, Schedule, StudyPreference, WordProgress};

pub const WORDS_FILE: &str = "words.csv";
pub const SCHEDULES_FILE: &str = "schedules.csv";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const WORD_HEADER: [&str; 10] = [
    "id",
    "learner_id",
    "language_id",
    "meaning_id",
    "rank",
    "level",
    "learning_cycle",
    "fit_for_study",
    "preference",
    "learned_time",
];

const SCHEDULE_HEADER: [&str; 5] = [
    "id",
    "owner_word_progress_id",
    "cooling_interval",
    "consecutive_correct_answers",
    "next_practice_time",
];

#[derive(Debug, Default, Clone)]
pub struct Store {
    words: BTreeMap<u64, WordProgress>,
    schedules: Vec<Schedule>,
}

impl Store {
    pub fn new() -> Self {
        Store::default()
    }

    /// Adds or replaces a word-progress record.
    pub fn upsert_word(&mut self, word: WordProgress) {
        self.words.insert(word.id, word);
    }

    pub fn words(&self) -> impl Iterator<Item = &WordProgress> {
        self.words.values()
    }

    pub fn schedules(&self) -> impl Iterator<Item = &Schedule> {
        self.schedules.iter()
    }

    pub fn word(&self, learner_id: u64, word_id: u64) -> Result<&WordProgress> {
        self.words
            .get(&word_id)
            .filter(|w| w.learner_id == learner_id)
            .ok_or(Error::UnknownWord {
                learner_id,
                word_id,
            })
    }

    pub fn word_mut(&mut self, learner_id: u64, word_id: u64) -> Result<&mut WordProgress> {
        self.words
            .get_mut(&word_id)
            .filter(|w| w.learner_id == learner_id)
            .ok_or(Error::UnknownWord {
                learner_id,
                word_id,
            })
    }

    /// Index of the word's schedule. More than one is a broken invariant.
    fn schedule_index(&self, learner_id: u64, word_id: u64) -> Result<Option<usize>> {
        let mut found = self
            .schedules
            .iter()
            .enumerate()
            .filter(|(_, s)| s.word_progress_id == word_id)
            .map(|(i, _)| i);
        let first = found.next();
        let extra = found.count();
        if extra > 0 {
            return Err(Error::DuplicateSchedule {
                learner_id,
                word_id,
                count: extra + 1,
            });
        }
        Ok(first)
    }

    pub fn find_schedule(&self, learner_id: u64, word_id: u64) -> Result<Option<&Schedule>> {
        self.word(learner_id, word_id)?;
        Ok(self
            .schedule_index(learner_id, word_id)?
            .map(|i| &self.schedules[i]))
    }

    pub fn create_schedule(
        &mut self,
        learner_id: u64,
        word_id: u64,
        now: NaiveDateTime,
    ) -> Result<&mut Schedule> {
        self.word(learner_id, word_id)?;
        if self.schedule_index(learner_id, word_id)?.is_some() {
            return Err(Error::ScheduleExists { word_id });
        }
        self.schedules.push(Schedule::new(word_id, now));
        let last = self.schedules.len() - 1;
        Ok(&mut self.schedules[last])
    }

    /// The word's schedule, created if the word has none yet, together with
    /// the word itself.
    pub fn find_or_create(
        &mut self,
        learner_id: u64,
        word_id: u64,
        now: NaiveDateTime,
    ) -> Result<(&mut Schedule, &mut WordProgress)> {
        self.word(learner_id, word_id)?;
        let index = match self.schedule_index(learner_id, word_id)? {
            Some(i) => i,
            None => {
                self.create_schedule(learner_id, word_id, now)?;
                self.schedules.len() - 1
            }
        };
        let word = self
            .words
            .get_mut(&word_id)
            .ok_or(Error::UnknownWord {
                learner_id,
                word_id,
            })?;
        Ok((&mut self.schedules[index], word))
    }

    pub fn remove_schedule(&mut self, word_id: u64) -> Option<Schedule> {
        let index = self
            .schedules
            .iter()
            .position(|s| s.word_progress_id == word_id)?;
        Some(self.schedules.remove(index))
    }

    pub fn load(dir: &Path) -> Result<Store> {
        let mut store = Store::new();

        let words_path = dir.join(WORDS_FILE);
        if words_path.exists() {
            let mut reader = csv::ReaderBuilder::new()
                .flexible(true)
                .from_path(&words_path)?;
            for result in reader.records() {
                let record = result?;
                let word = parse_word(&record)
                    .map_err(|reason| parse_error(&words_path, &record, reason))?;
                store.upsert_word(word);
            }
        }

        let schedules_path = dir.join(SCHEDULES_FILE);
        if schedules_path.exists() {
            let mut reader = csv::ReaderBuilder::new()
                .flexible(true)
                .from_path(&schedules_path)?;
            for result in reader.records() {
                let record = result?;
                let schedule = parse_schedule(&record)
                    .map_err(|reason| parse_error(&schedules_path, &record, reason))?;
                store.schedules.push(schedule);
            }
        }

        Ok(store)
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;

        let mut writer = csv::Writer::from_path(dir.join(WORDS_FILE))?;
        writer.write_record(WORD_HEADER)?;
        for word in self.words.values() {
            writer.write_record([
                word.id.to_string(),
                word.learner_id.to_string(),
                word.language_id.to_string(),
                word.meaning_id.to_string(),
                word.rank.map_or(String::new(), |r| r.to_string()),
                word.level.to_string(),
                word.learning_cycle.as_str().to_string(),
                word.fit_for_study.to_string(),
                word.preference.as_str().to_string(),
                word.learned_time.map_or(String::new(), format_time),
            ])?;
        }
        writer.flush()?;

        let mut writer = csv::Writer::from_path(dir.join(SCHEDULES_FILE))?;
        writer.write_record(SCHEDULE_HEADER)?;
        for schedule in &self.schedules {
            writer.write_record([
                schedule.id.to_string(),
                schedule.word_progress_id.to_string(),
                schedule.cooling_interval.to_string(),
                schedule.consecutive_correct_answers.to_string(),
                format_time(schedule.next_practice_time),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn format_time(t: NaiveDateTime) -> String {
    t.format(TIME_FORMAT).to_string()
}

fn parse_error(path: &Path, record: &csv::StringRecord, reason: String) -> Error {
    Error::Parse {
        path: PathBuf::from(path),
        line: record.position().map_or(0, |p| p.line()),
        reason,
    }
}

fn get_field<'a>(record: &'a csv::StringRecord, index: usize) -> &'a str {
    record.get(index).unwrap_or("").trim()
}

type FieldResult<T> = std::result::Result<T, String>;

fn parse_field<T: FromStr>(record: &csv::StringRecord, index: usize, name: &str) -> FieldResult<T> {
    let raw = get_field(record, index);
    raw.parse().map_err(|_| format!("invalid {name}: {raw:?}"))
}

fn parse_optional<T: FromStr>(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
) -> FieldResult<Option<T>> {
    if get_field(record, index).is_empty() {
        Ok(None)
    } else {
        parse_field(record, index, name).map(Some)
    }
}

fn parse_time(raw: &str, name: &str) -> FieldResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TIME_FORMAT)
        .map_err(|e| format!("invalid {name}: {raw:?} ({e})"))
}

fn parse_word(record: &csv::StringRecord) -> FieldResult<WordProgress> {
    let cycle_raw = get_field(record, 6);
    let preference_raw = get_field(record, 8);
    let learned_raw = get_field(record, 9);
    let fit_raw = get_field(record, 7);

    Ok(WordProgress {
        id: parse_field(record, 0, "id")?,
        learner_id: parse_field(record, 1, "learner_id")?,
        language_id: parse_field(record, 2, "language_id")?,
        meaning_id: parse_field(record, 3, "meaning_id")?,
        rank: parse_optional(record, 4, "rank")?,
        level: parse_optional(record, 5, "level")?.unwrap_or(0),
        learning_cycle: LearningCycle::parse(cycle_raw)
            .ok_or_else(|| format!("invalid learning_cycle: {cycle_raw:?}"))?,
        fit_for_study: if fit_raw.is_empty() {
            true
        } else {
            fit_raw
                .parse()
                .map_err(|_| format!("invalid fit_for_study: {fit_raw:?}"))?
        },
        preference: StudyPreference::parse(preference_raw)
            .ok_or_else(|| format!("invalid preference: {preference_raw:?}"))?,
        learned_time: if learned_raw.is_empty() {
            None
        } else {
            Some(parse_time(learned_raw, "learned_time")?)
        },
    })
}

fn parse_schedule(record: &csv::StringRecord) -> FieldResult<Schedule> {
    let id_raw = get_field(record, 0);
    let id = if id_raw.is_empty() {
        Uuid::new_v4()
    } else {
        Uuid::parse_str(id_raw).map_err(|e| format!("invalid id: {id_raw:?} ({e})"))?
    };

    Ok(Schedule {
        id,
        word_progress_id: parse_field(record, 1, "owner_word_progress_id")?,
        cooling_interval: parse_field(record, 2, "cooling_interval")?,
        consecutive_correct_answers: parse_optional(record, 3, "consecutive_correct_answers")?
            .unwrap_or(0),
        next_practice_time: parse_time(get_field(record, 4), "next_practice_time")?,
    })
}
