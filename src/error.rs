//! Error types for the csvsift transformation pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`ConfigError`] - config loading and rule compilation errors
//! - [`CsvError`] - CSV reading errors
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.
//!
//! The taxonomy maps the run policy: [`ConfigError`] and the
//! [`PipelineError`] variants are fatal for the whole run, while a
//! [`CsvError`] raised for one input file only skips that file.

use thiserror::Error;

// =============================================================================
// Config Errors
// =============================================================================

/// Errors while loading or compiling the rule configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid config JSON.
    #[error("Invalid config JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A rule's regex pattern failed to compile.
    #[error("Rule '{rule}': invalid regex '{pattern}': {source}")]
    BadRegex {
        rule: String,
        pattern: String,
        source: regex::Error,
    },
}

// =============================================================================
// CSV Reading Errors
// =============================================================================

/// Errors while reading one input CSV file.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the main error type returned by [`crate::pipeline::process_path`].
/// It wraps all lower-level errors and adds pipeline-specific variants.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Config error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// CSV reading error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Input file or directory does not exist.
    #[error("Input path '{0}' does not exist")]
    InputMissing(String),

    /// Output file could not be opened for writing.
    #[error("Unable to open output file '{path}': {source}")]
    OutputOpen {
        path: String,
        source: std::io::Error,
    },

    /// Output write failed.
    #[error("Failed to write output: {0}")]
    WriteError(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for CSV reading operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
