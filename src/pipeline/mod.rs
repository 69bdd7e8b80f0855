//! File/directory driver: the outer loop of a transformation run.
//!
//! Feeds records file-by-file through the rule engine and into the sink.
//! The output schema freezes on the first record of the run and the header
//! is written at that moment; every later record and file is projected
//! onto the same schema. A file that cannot be read or parsed is skipped
//! with a diagnostic and the run continues; a missing input path or an
//! unwritable output file aborts the run.

use once_cell::sync::OnceCell;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::config::Config;
use crate::error::{ConfigResult, CsvError, PipelineError, PipelineResult};
use crate::logs::{log_debug, log_error, log_info, log_warning};
use crate::parser;
use crate::record::Record;
use crate::rules::RuleEngine;
use crate::schema::OutputSchema;
use crate::writer::CsvSink;

/// Counters reported after a run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Files fully processed.
    pub files_processed: usize,
    /// Files skipped after a read or parse failure.
    pub files_skipped: usize,
    /// Records read from input files.
    pub rows_read: usize,
    /// Records written to the output.
    pub rows_emitted: usize,
    /// Input records whose rule pass produced no output.
    pub rows_dropped: usize,
}

impl RunSummary {
    /// One-line report for the CLI.
    pub fn summary(&self) -> String {
        format!(
            "Processed {} file(s) ({} skipped): {} rows in, {} rows out, {} dropped",
            self.files_processed,
            self.files_skipped,
            self.rows_read,
            self.rows_emitted,
            self.rows_dropped
        )
    }
}

/// One transformation run: the engine, the output directives and the
/// schema cell frozen by the first record.
pub struct Pipeline {
    config: Config,
    engine: RuleEngine,
    schema: OnceCell<OutputSchema>,
}

impl Pipeline {
    /// Build a pipeline from a config, compiling every rule.
    pub fn new(config: Config) -> ConfigResult<Self> {
        let engine = RuleEngine::from_config(&config)?;
        Ok(Self {
            config,
            engine,
            schema: OnceCell::new(),
        })
    }

    /// The resolved schema, once the first record has frozen it.
    pub fn schema(&self) -> Option<&OutputSchema> {
        self.schema.get()
    }

    /// Process an input file or directory into the sink.
    ///
    /// Directory mode takes the `*.csv` entries (case-insensitive) in
    /// directory-listing order, non-recursively.
    pub fn process_path<W: Write>(
        &self,
        input: &Path,
        sink: &mut CsvSink<W>,
    ) -> PipelineResult<RunSummary> {
        if !input.exists() {
            return Err(PipelineError::InputMissing(input.display().to_string()));
        }

        let mut summary = RunSummary::default();

        if input.is_dir() {
            let mut found_any = false;
            for entry in fs::read_dir(input)? {
                let path = entry?.path();
                let is_csv = path.is_file()
                    && path
                        .extension()
                        .map(|ext| ext.eq_ignore_ascii_case("csv"))
                        .unwrap_or(false);
                if !is_csv {
                    continue;
                }
                found_any = true;
                self.run_file(&path, sink, &mut summary);
            }
            if !found_any {
                log_warning(
                    format!("No CSV files found in directory '{}'", input.display()),
                    1,
                );
            }
        } else {
            self.run_file(input, sink, &mut summary);
        }

        sink.flush()?;
        Ok(summary)
    }

    /// Process one file, downgrading its errors to a skip.
    fn run_file<W: Write>(&self, path: &Path, sink: &mut CsvSink<W>, summary: &mut RunSummary) {
        match self.process_file(path, sink, summary) {
            Ok(()) => summary.files_processed += 1,
            Err(PipelineError::Csv(CsvError::NoHeaders)) => {
                log_warning(
                    format!("Skipping file '{}' - no headers found", path.display()),
                    1,
                );
                summary.files_skipped += 1;
            }
            Err(PipelineError::Csv(CsvError::EmptyFile)) => {
                log_warning(format!("Skipping file '{}' - empty", path.display()), 1);
                summary.files_skipped += 1;
            }
            Err(err) => {
                log_error(format!("Unable to process file '{}': {}", path.display(), err));
                summary.files_skipped += 1;
            }
        }
    }

    fn process_file<W: Write>(
        &self,
        path: &Path,
        sink: &mut CsvSink<W>,
        summary: &mut RunSummary,
    ) -> PipelineResult<()> {
        let parsed = parser::read_csv_file(path)?;

        log_info(format!("Processing file: {}", path.display()), 1);
        log_debug(
            format!(
                "Detected encoding {} and delimiter '{}'",
                parsed.encoding, parsed.delimiter
            ),
            2,
        );

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let file_field = self.config.output.file_processed_field.clone();

        for (index, record) in parsed.records.into_iter().enumerate() {
            let row_number = index + 1;
            summary.rows_read += 1;

            // The schema must freeze on a non-empty record.
            if record.is_blank() {
                log_warning(
                    format!("Skipping empty row {} in '{}'", row_number, path.display()),
                    3,
                );
                continue;
            }

            let schema = self.freeze_schema(&record, sink)?;

            log_debug(
                format!("Processing row {} in '{}'", row_number, path.display()),
                3,
            );
            let outputs = self.engine.process(record, schema, &file_name, row_number);
            if outputs.is_empty() {
                summary.rows_dropped += 1;
                continue;
            }

            for mut output in outputs {
                if schema.contains(&file_field) {
                    output.insert(file_field.as_str(), file_name.as_str());
                }
                sink.write_record(&output, schema)?;
                summary.rows_emitted += 1;
            }
        }

        Ok(())
    }

    /// Resolve the schema from the first record of the run and write the
    /// header; later calls return the frozen value.
    fn freeze_schema<W: Write>(
        &self,
        record: &Record,
        sink: &mut CsvSink<W>,
    ) -> PipelineResult<&OutputSchema> {
        match self.schema.get() {
            Some(schema) => Ok(schema),
            None => {
                let resolved = OutputSchema::resolve(&self.config, record);
                sink.write_header(&resolved)?;
                Ok(self.schema.get_or_init(|| resolved))
            }
        }
    }
}

/// Run a full transformation: open the output, then process the input
/// path with the given config.
pub fn run(config: Config, input: &Path, output: &Path) -> PipelineResult<RunSummary> {
    let pipeline = Pipeline::new(config)?;
    let mut sink = CsvSink::create(output).map_err(|source| PipelineError::OutputOpen {
        path: output.display().to_string(),
        source,
    })?;
    pipeline.process_path(input, &mut sink)
}
