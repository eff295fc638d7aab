use std::path::PathBuf;
use std::process;

use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};

use srsched::config::{Config, DEFAULT_CONFIG_FILE};
use srsched::outcome::Outcome;
use srsched::store::Store;
use srsched::{OutcomeReport, Scheduler};

#[derive(Parser)]
#[command(name = "srsched", about = "Spaced-repetition scheduling for vocabulary practice")]
struct Cli {
    /// Path to the TOML config
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report an exercise outcome for a word
    Review {
        #[arg(long)]
        learner: u64,
        #[arg(long)]
        word: u64,
        /// Outcome label, e.g. C, W, TTC, HC, "Too easy", other_feedback
        #[arg(long)]
        outcome: String,
        /// Time of the outcome (defaults to now)
        #[arg(long, value_parser = parse_time)]
        at: Option<NaiveDateTime>,
    },
    /// List words due for practice today
    Due {
        #[arg(long)]
        learner: u64,
        #[arg(long)]
        language: u32,
        #[arg(long, default_value_t = 20)]
        count: usize,
        /// Closest to mastery and most common words first, one per meaning
        #[arg(long)]
        priority: bool,
        #[arg(long, value_parser = parse_time)]
        at: Option<NaiveDateTime>,
    },
    /// Scheduled and due words per language
    Summary {
        #[arg(long)]
        learner: u64,
        #[arg(long, value_parser = parse_time)]
        at: Option<NaiveDateTime>,
    },
    /// Take a word out of study
    Exclude {
        #[arg(long)]
        learner: u64,
        #[arg(long)]
        word: u64,
    },
}

fn parse_time(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM:SS ({e})"))
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> srsched::Result<()> {
    let config = Config::load(&cli.config)?;
    let store = Store::load(&config.data_dir)?;
    let scheduler = Scheduler::new(config.policy, store);

    match cli.command {
        Command::Review {
            learner,
            word,
            outcome,
            at,
        } => {
            let report = OutcomeReport {
                learner_id: learner,
                word_id: word,
                outcome: Outcome::parse(&outcome),
                at: at.unwrap_or_else(now),
                preferences: config.preferences(learner),
            };
            let transition = scheduler.report(&report)?;
            scheduler.save(&config.data_dir)?;
            println!("{}", serde_json::to_string(&transition)?);
        }
        Command::Due {
            learner,
            language,
            count,
            priority,
            at,
        } => {
            let at = at.unwrap_or_else(now);
            for id in scheduler.due_words(learner, language, at, count, priority)? {
                println!("{id}");
            }
        }
        Command::Summary { learner, at } => {
            let summaries = scheduler.summaries(learner, at.unwrap_or_else(now))?;
            if summaries.is_empty() {
                println!("No words scheduled.");
            }
            for s in summaries {
                println!("  language {}: {} due / {} scheduled", s.language_id, s.due, s.total);
            }
        }
        Command::Exclude { learner, word } => {
            scheduler.exclude_word(learner, word)?;
            scheduler.save(&config.data_dir)?;
        }
    }
    Ok(())
}
