//! Spaced-repetition scheduling for vocabulary practice.
//!
//! Each word a learner studies carries a [`models::Schedule`] that walks a
//! short chain of cooling intervals. A [`policy::Policy`] decides how an
//! exercise outcome moves the word along the chain, when it climbs a level
//! or switches learning cycle, and when it is learned.

pub mod config;
pub mod error;
pub mod intervals;
pub mod models;
pub mod outcome;
pub mod policy;
pub mod scheduler;
pub mod selection;
pub mod store;

pub use error::{Error, Result};
pub use policy::{Policy, Transition};
pub use scheduler::{OutcomeReport, Scheduler};
