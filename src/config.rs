use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use crate::models::LearnerPreferences;
use crate::policy::Policy;

pub const DEFAULT_CONFIG_FILE: &str = "srsched.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub policy: Policy,
    pub data_dir: PathBuf,
    pub learners: Vec<LearnerConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LearnerConfig {
    pub id: u64,
    #[serde(default)]
    pub productive_exercises: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            policy: Policy::default(),
            data_dir: PathBuf::from("."),
            learners: Vec::new(),
        }
    }
}

impl Config {
    pub fn parse(text: &str) -> Result<Config> {
        Ok(toml::from_str(text)?)
    }

    /// Reads the config file; a missing file means all defaults.
    pub fn load(path: &Path) -> Result<Config> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        let text = std::fs::read_to_string(path)?;
        Config::parse(&text)
    }

    /// Learners without an entry get the conservative defaults.
    pub fn preferences(&self, learner_id: u64) -> LearnerPreferences {
        self.learners
            .iter()
            .find(|l| l.id == learner_id)
            .map(|l| LearnerPreferences {
                productive_exercises: l.productive_exercises,
            })
            .unwrap_or_default()
    }
}
