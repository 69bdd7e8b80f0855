//! CSV reading with encoding and delimiter auto-detection.
//!
//! Input files arrive from many tools with mixed encodings and separators,
//! so reading is forgiving: the encoding is detected with chardet and
//! decoded with encoding_rs, the delimiter is picked by counting candidates
//! in the header line, values are quote-trimmed and blank lines skipped.
//! Each data row becomes an ordered [`Record`] keyed by the header fields.

use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::record::Record;

/// One parsed input file with its detection metadata.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    /// Column headers, in file order.
    pub headers: Vec<String>,
    /// Data rows as ordered records.
    pub records: Vec<Record>,
    /// Detected encoding.
    pub encoding: String,
    /// Detected delimiter.
    pub delimiter: char,
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the detected encoding.
///
/// Unknown encodings fall back to lossy UTF-8 rather than failing the file.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::ISO_8859_15.decode(bytes).0.to_string(),
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.to_string(),
        _ => String::from_utf8_lossy(bytes).to_string(),
    }
}

/// Detect the delimiter by counting occurrences in the first line.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [';', ',', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse decoded CSV content into headers and ordered records.
///
/// The first line is the header row; a file without one is a typed error
/// so the driver can warn and skip. Rows shorter than the header are
/// padded with empty values, extra values beyond the header are ignored,
/// blank lines are skipped.
pub fn parse_records(content: &str, delimiter: char) -> CsvResult<(Vec<String>, Vec<Record>)> {
    let mut lines = content.lines();

    let header_line = lines.next().ok_or(CsvError::EmptyFile)?;
    if header_line.trim().is_empty() {
        return Err(CsvError::NoHeaders);
    }

    let headers: Vec<String> = header_line
        .split(delimiter)
        .map(|s| s.trim().trim_matches('"').to_string())
        .collect();

    let mut records = Vec::new();

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        let values: Vec<&str> = line.split(delimiter).collect();
        let mut record = Record::new();

        for (i, header) in headers.iter().enumerate() {
            let raw_value = values.get(i).map(|s| s.trim().trim_matches('"')).unwrap_or("");
            record.insert(header.as_str(), raw_value);
        }

        records.push(record);
    }

    Ok((headers, records))
}

/// Read and parse a CSV file with encoding and delimiter auto-detection.
pub fn read_csv_file<P: AsRef<Path>>(path: P) -> CsvResult<ParsedFile> {
    let bytes = std::fs::read(path.as_ref())?;

    let encoding = detect_encoding(&bytes);
    let content = decode_content(&bytes, &encoding);
    let delimiter = detect_delimiter(&content);
    let (headers, records) = parse_records(&content, delimiter)?;

    Ok(ParsedFile {
        headers,
        records,
        encoding,
        delimiter,
    })
}
