//! # csvsift - rule-driven CSV transformation
//!
//! csvsift reads tabular files, evaluates each row against an ordered list
//! of regex rules, and emits zero, one or several derived rows per input
//! row depending on the rule actions (drop, replace in place, duplicate
//! with annotation, or tag in place).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV Files  │────▶│   Parser    │────▶│ Rule Engine │────▶│  CSV Output │
//! │ (ISO/UTF8)  │     │ (auto-enc)  │     │ (regex DSL) │     │ (one schema)│
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use csvsift::{pipeline, Config};
//! use std::path::Path;
//!
//! fn main() {
//!     let config = Config::load("rules.json").unwrap();
//!     let summary = pipeline::run(config, Path::new("data/"), Path::new("out.csv")).unwrap();
//!     println!("{}", summary.summary());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`config`] - Rule configuration and compilation
//! - [`record`] - Ordered row representation
//! - [`parser`] - CSV reading with auto-detection
//! - [`rules`] - Match evaluation, truth writing, the rule engine
//! - [`schema`] - Output schema resolution
//! - [`writer`] - Schema-aware CSV sink
//! - [`pipeline`] - File/directory driver
//! - [`logs`] - Verbosity-gated run logging

// Core modules
pub mod error;
pub mod record;

// Configuration
pub mod config;

// Parsing
pub mod parser;

// Rule evaluation
pub mod rules;

// Output schema
pub mod schema;

// Output writing
pub mod writer;

// Orchestration
pub mod pipeline;

// Logging
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConfigError, CsvError, PipelineError};

// =============================================================================
// Re-exports - Config
// =============================================================================

pub use config::{
    example_config, AddedField, Assertion, CompiledAssertion, CompiledRule, Config, OutputConfig,
    Rule, RuleAction, WriteTruth,
};

// =============================================================================
// Re-exports - Record & Schema
// =============================================================================

pub use record::Record;
pub use schema::OutputSchema;

// =============================================================================
// Re-exports - Rule evaluation
// =============================================================================

pub use rules::{evaluate, MatchOutcome, RuleEngine};

// =============================================================================
// Re-exports - Parsing & Writing
// =============================================================================

pub use parser::{detect_delimiter, detect_encoding, read_csv_file, ParsedFile};
pub use writer::CsvSink;

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use pipeline::{run, Pipeline, RunSummary};
