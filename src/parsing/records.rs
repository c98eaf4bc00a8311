use flate2::read::GzDecoder;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::core::position::Strand;
use crate::core::types::{Identifier, ModelError};
use crate::utils::validation::{
    check_record_limit, non_empty, parse_coordinate, require_identifier, split_multi,
};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid table format: {0}")]
    InvalidFormat(String),

    #[error("Too many records: {0} exceeds maximum allowed")]
    TooManyRecords(usize),
}

/// A row from a feature table:
/// `id, label, type, chrom, start, end, strand, taxon`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRecord {
    pub id: Identifier,
    pub label: Option<String>,
    /// Raw type term; may need translating
    pub feature_type: String,
    pub chrom: Option<String>,
    pub start: Option<u64>,
    pub end: Option<u64>,
    pub strand: Strand,
    pub taxon: Option<String>,
}

/// A row from an association table:
/// `subject, relation, object, evidence, sources, description`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationRecord {
    pub subject: Identifier,
    /// Raw relation term as written by the source
    pub relation: String,
    pub object: Identifier,
    pub evidence: Vec<Identifier>,
    pub sources: Vec<Identifier>,
    pub description: Option<String>,
}

/// Open a table, transparently decompressing `.gz` files
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened.
pub fn open_table(path: &Path) -> Result<Box<dyn BufRead>, ParseError> {
    let file = std::fs::File::open(path)?;
    let is_gzipped = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"));

    if is_gzipped {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Streams records from a table one line at a time.
///
/// Blank lines and `#` comments are skipped, as is a header row whose first
/// cell is one of the reader's header names. Each data line yields its own
/// `Result` so a malformed row never hides the others; line numbers in
/// errors are 1-based.
///
/// I/O failures and the row limit end iteration early. They are kept rather
/// than yielded, so call [`RecordReader::finish`] once done to surface them.
pub struct RecordReader<R, T> {
    lines: Lines<R>,
    delimiter: char,
    header_names: &'static [&'static str],
    parse_fields: fn(&[&str]) -> Result<T, ModelError>,
    line_number: usize,
    rows: usize,
    header_checked: bool,
    error: Option<ParseError>,
}

impl<R: BufRead, T> RecordReader<R, T> {
    pub(crate) fn new(
        reader: R,
        delimiter: char,
        header_names: &'static [&'static str],
        parse_fields: fn(&[&str]) -> Result<T, ModelError>,
    ) -> Self {
        Self {
            lines: reader.lines(),
            delimiter,
            header_names,
            parse_fields,
            line_number: 0,
            rows: 0,
            header_checked: false,
            error: None,
        }
    }

    /// Data rows yielded so far
    #[must_use]
    pub fn rows_read(&self) -> usize {
        self.rows
    }

    /// Line number of the last line read
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Consume the reader, returning the rows read or the error that
    /// stopped it.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if reading or decompression failed, or
    /// `ParseError::TooManyRecords` if the row limit was hit.
    pub fn finish(self) -> Result<usize, ParseError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.rows),
        }
    }

    fn is_header(&self, fields: &[&str]) -> bool {
        let first = fields
            .first()
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default();
        self.header_names.contains(&first.as_str())
    }
}

impl<R: BufRead, T> Iterator for RecordReader<R, T> {
    type Item = Result<T, ModelError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.error.is_some() {
            return None;
        }

        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.error = Some(ParseError::Io(e));
                    return None;
                }
            };
            self.line_number += 1;

            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split(self.delimiter).collect();

            if !self.header_checked {
                self.header_checked = true;
                if self.is_header(&fields) {
                    continue;
                }
            }

            if let Some(msg) = check_record_limit(self.rows) {
                warn!("{msg}");
                self.error = Some(ParseError::TooManyRecords(self.rows));
                return None;
            }
            self.rows += 1;

            let line_number = self.line_number;
            return Some((self.parse_fields)(&fields).map_err(|e| at_line(line_number, e)));
        }
    }
}

/// Stream feature records from any buffered reader
pub fn feature_reader<R: BufRead>(
    reader: R,
    delimiter: char,
) -> RecordReader<R, FeatureRecord> {
    RecordReader::new(reader, delimiter, &["id", "feature_id"], feature_from_fields)
}

/// Stream association records from any buffered reader
pub fn association_reader<R: BufRead>(
    reader: R,
    delimiter: char,
) -> RecordReader<R, AssociationRecord> {
    RecordReader::new(
        reader,
        delimiter,
        &["subject", "subject_id"],
        association_from_fields,
    )
}

fn field<'a>(fields: &[&'a str], index: usize) -> &'a str {
    fields.get(index).copied().unwrap_or("")
}

fn at_line(line: usize, e: ModelError) -> ModelError {
    match e {
        ModelError::InvalidInput(msg) => ModelError::InvalidInput(format!("line {line}: {msg}")),
        other => other,
    }
}

fn feature_from_fields(fields: &[&str]) -> Result<FeatureRecord, ModelError> {
    if fields.len() < 3 {
        return Err(ModelError::invalid(format!(
            "expected at least 3 fields, found {}",
            fields.len()
        )));
    }

    let id = require_identifier("feature id", fields[0])?;
    let Some(feature_type) = non_empty(fields[2]) else {
        return Err(ModelError::invalid(format!("feature {id} has no type")));
    };

    let start = non_empty(field(fields, 4)).map(parse_coordinate).transpose()?;
    let end = non_empty(field(fields, 5)).map(parse_coordinate).transpose()?;
    let strand = Strand::parse(Some(field(fields, 6)))?;

    Ok(FeatureRecord {
        id,
        label: non_empty(fields[1]).map(String::from),
        feature_type: feature_type.to_string(),
        chrom: non_empty(field(fields, 3)).map(String::from),
        start,
        end,
        strand,
        taxon: non_empty(field(fields, 7)).map(String::from),
    })
}

fn association_from_fields(fields: &[&str]) -> Result<AssociationRecord, ModelError> {
    if fields.len() < 3 {
        return Err(ModelError::invalid(format!(
            "expected at least 3 fields, found {}",
            fields.len()
        )));
    }

    let subject = require_identifier("subject", fields[0])?;
    let object = require_identifier("object", fields[2])?;

    let evidence = split_multi(field(fields, 3))
        .into_iter()
        .map(|e| require_identifier("evidence", e))
        .collect::<Result<Vec<_>, _>>()?;
    let sources = split_multi(field(fields, 4))
        .into_iter()
        .map(|s| require_identifier("source", s))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AssociationRecord {
        subject,
        relation: fields[1].trim().to_string(),
        object,
        evidence,
        sources,
        description: non_empty(field(fields, 5)).map(String::from),
    })
}

fn collect_all<R: BufRead, T>(
    mut reader: RecordReader<R, T>,
) -> Result<Vec<Result<T, ModelError>>, ParseError> {
    let records: Vec<_> = reader.by_ref().collect();
    reader.finish()?;
    Ok(records)
}

/// Parse feature-table text. Each row yields its own result so one
/// malformed row never hides the others.
///
/// # Errors
///
/// Returns `ParseError::TooManyRecords` if the row limit is exceeded.
pub fn parse_feature_text(
    text: &str,
    delimiter: char,
) -> Result<Vec<Result<FeatureRecord, ModelError>>, ParseError> {
    collect_all(feature_reader(text.as_bytes(), delimiter))
}

/// Parse association-table text
///
/// # Errors
///
/// Returns `ParseError::TooManyRecords` if the row limit is exceeded.
pub fn parse_association_text(
    text: &str,
    delimiter: char,
) -> Result<Vec<Result<AssociationRecord, ModelError>>, ParseError> {
    collect_all(association_reader(text.as_bytes(), delimiter))
}

/// Open a feature table (tab-delimited, optionally gzipped) for streaming
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened.
pub fn read_feature_file(
    path: &Path,
) -> Result<RecordReader<Box<dyn BufRead>, FeatureRecord>, ParseError> {
    Ok(feature_reader(open_table(path)?, '\t'))
}

/// Open an association table (tab-delimited, optionally gzipped) for streaming
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened.
pub fn read_association_file(
    path: &Path,
) -> Result<RecordReader<Box<dyn BufRead>, AssociationRecord>, ParseError> {
    Ok(association_reader(open_table(path)?, '\t'))
}
