use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("found {count} schedules for word {word_id} of learner {learner_id}")]
    DuplicateSchedule {
        learner_id: u64,
        word_id: u64,
        count: usize,
    },

    #[error("a schedule already exists for word {word_id}")]
    ScheduleExists { word_id: u64 },

    #[error("cooling interval of {minutes} minutes is not a known bucket")]
    UnknownInterval { minutes: u32 },

    #[error("learner {learner_id} has no word {word_id}")]
    UnknownWord { learner_id: u64, word_id: u64 },

    #[error("unknown policy: {0}")]
    UnknownPolicy(String),

    #[error("{}:{line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("schedule store lock poisoned")]
    LockPoisoned,
}

pub type Result<T> = std::result::Result<T, Error>;
