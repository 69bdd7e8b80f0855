//! Schema-aware CSV output sink.
//!
//! Wraps a `csv::Writer`: the frozen schema is written once as the header,
//! then every record is projected onto it — schema fields missing from a
//! record come out empty, record fields outside the schema are dropped.
//! Quoting and escaping are the csv crate's.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::record::Record;
use crate::schema::OutputSchema;

/// CSV sink projecting records onto the frozen output schema.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows_written: usize,
}

impl CsvSink<File> {
    /// Open a sink writing to `path`, truncating any existing file.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> CsvSink<W> {
    /// Wrap a writer.
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
            rows_written: 0,
        }
    }

    /// Write the schema as the header row.
    pub fn write_header(&mut self, schema: &OutputSchema) -> csv::Result<()> {
        self.writer.write_record(schema.fields())
    }

    /// Write one record projected onto the schema.
    pub fn write_record(&mut self, record: &Record, schema: &OutputSchema) -> csv::Result<()> {
        self.writer.write_record(record.project(schema.fields()))?;
        self.rows_written += 1;
        Ok(())
    }

    /// Rows written so far, header excluded.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush buffered output.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn schema_for(sample: &Record) -> OutputSchema {
        OutputSchema::resolve(&Config::default(), sample)
    }

    fn sink_in(dir: &tempfile::TempDir) -> (CsvSink<File>, std::path::PathBuf) {
        let path = dir.path().join("out.csv");
        (CsvSink::create(&path).unwrap(), path)
    }

    fn written(mut sink: CsvSink<File>, path: &Path) -> String {
        sink.flush().unwrap();
        drop(sink);
        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_header_then_projected_rows() {
        let record = Record::from_pairs([("id", "1"), ("msg", "hello")]);
        let schema = schema_for(&record);

        let dir = tempfile::tempdir().unwrap();
        let (mut sink, path) = sink_in(&dir);
        sink.write_header(&schema).unwrap();
        sink.write_record(&record, &schema).unwrap();

        let output = written(sink, &path);
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("_rule,_file,id,msg"));
        assert_eq!(lines.next(), Some(",,1,hello"));
    }

    #[test]
    fn test_extra_fields_dropped_missing_empty() {
        let sample = Record::from_pairs([("id", "1"), ("msg", "x")]);
        let schema = schema_for(&sample);

        let record = Record::from_pairs([("id", "2"), ("unexpected", "y")]);
        let dir = tempfile::tempdir().unwrap();
        let (mut sink, path) = sink_in(&dir);
        sink.write_record(&record, &schema).unwrap();

        assert_eq!(written(sink, &path).trim_end(), ",,2,");
    }

    #[test]
    fn test_values_with_delimiter_are_quoted() {
        let sample = Record::from_pairs([("msg", "a")]);
        let schema = schema_for(&sample);

        let record = Record::from_pairs([("msg", "hello, world")]);
        let dir = tempfile::tempdir().unwrap();
        let (mut sink, path) = sink_in(&dir);
        sink.write_record(&record, &schema).unwrap();

        assert_eq!(written(sink, &path).trim_end(), ",,\"hello, world\"");
    }

    #[test]
    fn test_rows_written_counter() {
        let sample = Record::from_pairs([("msg", "a")]);
        let schema = schema_for(&sample);

        let dir = tempfile::tempdir().unwrap();
        let (mut sink, _path) = sink_in(&dir);
        sink.write_header(&schema).unwrap();
        assert_eq!(sink.rows_written(), 0);

        sink.write_record(&sample, &schema).unwrap();
        sink.write_record(&sample, &schema).unwrap();
        assert_eq!(sink.rows_written(), 2);
    }
}
