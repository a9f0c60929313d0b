//! Shared CSV table reading.
//!
//! Every loader follows the same steps: read the header, resolve its
//! columns, then validate each row into a [`ParsedRow`]. This module owns
//! those steps so the individual loaders only describe their columns and
//! how a row becomes a value.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use log::{debug, info, warn};
use racereel_foundation::{Error, ErrorContext, MalformedReason, MalformedRecord, RaceTime, Result};

use crate::report::{LoadReport, Loaded, ParsedRow, RowWarning};
use crate::schema::ColumnSpec;

/// Cell values that mean "no value" in exported tables.
const MISSING_MARKERS: [&str; 4] = ["nan", "null", "none", "na"];

/// A resolved column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Column {
    index: usize,
    name: String,
}

impl Column {
    /// Returns the header name as it appears in the source.
    pub(crate) fn name(&self) -> &str {
        &self.name
    }
}

/// A CSV table with its header read.
pub(crate) struct Table<R> {
    reader: csv::Reader<R>,
    headers: Vec<String>,
    source: String,
}

impl<R: io::Read> Table<R> {
    /// Opens a table and reads its header row.
    pub(crate) fn open(reader: R, source: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers = reader
            .headers()
            .map_err(|e| csv_error(&e, source))?
            .iter()
            .map(str::to_string)
            .collect();
        Ok(Self {
            reader,
            headers,
            source: source.to_string(),
        })
    }

    /// Resolves an optional column.
    pub(crate) fn column(&self, spec: &ColumnSpec) -> Option<Column> {
        spec.resolve(self.headers.iter().map(String::as_str))
            .map(|index| Column {
                index,
                name: self.headers[index].trim().to_string(),
            })
    }

    /// Resolves a required column.
    pub(crate) fn require(&self, spec: &ColumnSpec) -> Result<Column> {
        self.column(spec).ok_or_else(|| {
            Error::missing_column(&spec.name).with_context(
                ErrorContext::new()
                    .with_source(&self.source)
                    .with_line(1),
            )
        })
    }

    /// Validates every row, collecting values and the load report.
    ///
    /// In strict mode the first malformed row aborts the load.
    pub(crate) fn collect<T>(
        mut self,
        strict: bool,
        mut parse: impl FnMut(&Row<'_>, &mut Vec<RowWarning>) -> ParsedRow<T>,
    ) -> Result<Loaded<T>> {
        let mut items = Vec::new();
        let mut report = LoadReport::new(&self.source);
        let mut record = csv::StringRecord::new();
        let mut fallback_line = 1;

        loop {
            match self.reader.read_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => return Err(csv_error(&e, &self.source)),
            }
            fallback_line += 1;
            let line = record
                .position()
                .and_then(|p| usize::try_from(p.line()).ok())
                .unwrap_or(fallback_line);

            report.input_rows += 1;
            let row = Row {
                line,
                record: &record,
            };
            match parse(&row, &mut report.warnings) {
                ParsedRow::Valid(value) => items.push(value),
                ParsedRow::Malformed(malformed) => {
                    if strict {
                        return Err(Error::malformed(malformed).with_context(
                            ErrorContext::new()
                                .with_source(&self.source)
                                .with_line(line),
                        ));
                    }
                    debug!("{}: excluded {malformed}", self.source);
                    report.excluded.push(malformed);
                }
            }
        }

        if report.excluded.is_empty() {
            info!("{}: loaded {} rows", self.source, report.loaded());
        } else {
            warn!(
                "{}: loaded {} rows, excluded {} malformed",
                self.source,
                report.loaded(),
                report.excluded_count()
            );
        }
        Ok(Loaded { items, report })
    }
}

/// One data row during validation.
pub(crate) struct Row<'a> {
    /// Source line.
    pub line: usize,
    record: &'a csv::StringRecord,
}

impl Row<'_> {
    /// Returns a non-empty cell, treating export markers like `NaN` as empty.
    pub(crate) fn cell(&self, column: Option<&Column>) -> Option<&str> {
        let text = self.record.get(column?.index)?.trim();
        if text.is_empty() || MISSING_MARKERS.iter().any(|m| text.eq_ignore_ascii_case(m)) {
            None
        } else {
            Some(text)
        }
    }

    /// Reads a finite number.
    pub(crate) fn number(&self, column: Option<&Column>) -> std::result::Result<Option<f64>, MalformedReason> {
        let Some(text) = self.cell(column) else {
            return Ok(None);
        };
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Some(value)),
            _ => Err(self.invalid_number(column, text)),
        }
    }

    /// Reads a non-negative whole number; `3.0` is accepted as 3.
    pub(crate) fn count(&self, column: Option<&Column>) -> std::result::Result<Option<u32>, MalformedReason> {
        let Some(text) = self.cell(column) else {
            return Ok(None);
        };
        if let Ok(value) = text.parse::<u32>() {
            return Ok(Some(value));
        }
        match text.parse::<f64>() {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Ok(value) if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) => {
                Ok(Some(value as u32))
            }
            _ => Err(self.invalid_number(column, text)),
        }
    }

    /// Reads a race time.
    pub(crate) fn time(&self, column: Option<&Column>) -> std::result::Result<Option<RaceTime>, MalformedReason> {
        let Some(text) = self.cell(column) else {
            return Ok(None);
        };
        RaceTime::parse(text)
            .map(Some)
            .ok_or_else(|| MalformedReason::InvalidTimestamp(text.to_string()))
    }

    /// Reads a boolean flag. Returns the raw text when it is not a flag.
    pub(crate) fn flag(&self, column: Option<&Column>) -> std::result::Result<Option<bool>, String> {
        let Some(text) = self.cell(column) else {
            return Ok(None);
        };
        match text.to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "1" | "1.0" => Ok(Some(true)),
            "false" | "f" | "no" | "n" | "0" | "0.0" => Ok(Some(false)),
            _ => Err(text.to_string()),
        }
    }

    /// Builds an excluded-row entry for this row.
    pub(crate) fn malformed(&self, reason: MalformedReason) -> MalformedRecord {
        MalformedRecord::new(self.line, reason)
    }

    pub(crate) fn invalid_number(&self, column: Option<&Column>, text: &str) -> MalformedReason {
        MalformedReason::InvalidNumber {
            column: column.map(|c| c.name.clone()).unwrap_or_default(),
            value: text.to_string(),
        }
    }
}

/// Opens a file for table reading.
pub(crate) fn open_file(path: &Path) -> Result<BufReader<File>> {
    File::open(path).map(BufReader::new).map_err(|e| {
        Error::io(format!("failed to open '{}': {e}", path.display()))
            .with_context(ErrorContext::new().with_source(path.display().to_string()))
    })
}

fn csv_error(err: &csv::Error, source: &str) -> Error {
    let mut context = ErrorContext::new().with_source(source);
    if let Some(line) = err.position().and_then(|p| usize::try_from(p.line()).ok()) {
        context = context.with_line(line);
    }
    let error = if err.is_io_error() {
        Error::io(err.to_string())
    } else {
        Error::csv(err.to_string())
    };
    error.with_context(context)
}
