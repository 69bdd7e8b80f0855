//! Rule evaluation: match testing, truth writing and the per-record engine.

pub mod engine;
pub mod matcher;
pub mod truth;

pub use engine::RuleEngine;
pub use matcher::{evaluate, MatchOutcome};
pub use truth::{apply_write_truth, MATCH_TOKEN};
