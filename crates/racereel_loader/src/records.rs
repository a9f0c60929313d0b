//! Telemetry record loading.

use std::io;
use std::path::Path;

use racereel_foundation::{
    MalformedReason, Position, RaceProfile, RaceRecord, Result, Status, StatusVocabulary,
};

use crate::report::{Loaded, ParsedRow, RowWarning, WarningKind};
use crate::schema::RecordSchema;
use crate::table::{Column, Row, Table, open_file};

/// Loads telemetry tables into validated [`RaceRecord`]s.
#[derive(Clone, Debug)]
pub struct RecordLoader {
    schema: RecordSchema,
    statuses: StatusVocabulary,
    strict: bool,
}

impl RecordLoader {
    /// Creates a loader for a race profile.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the profile's dimensionality is
    /// unsupported.
    pub fn new(profile: &RaceProfile) -> Result<Self> {
        Ok(Self {
            schema: RecordSchema::for_profile(profile)?,
            statuses: profile.statuses.clone(),
            strict: false,
        })
    }

    /// Builder method to replace the column schema.
    #[must_use]
    pub fn with_schema(mut self, schema: RecordSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Builder method to fail on the first malformed row instead of
    /// excluding it.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Returns the column schema.
    #[must_use]
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Loads records from a reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not readable CSV, a required column
    /// is missing, or (in strict mode) a row is malformed. Malformed rows
    /// are otherwise excluded and listed in the report.
    pub fn load<R: io::Read>(&self, reader: R, source: &str) -> Result<Loaded<RaceRecord>> {
        let table = Table::open(reader, source)?;
        let columns = Columns {
            competitor: table.require(&self.schema.competitor)?,
            time: table.require(&self.schema.time)?,
            position: self
                .schema
                .position
                .iter()
                .map(|spec| table.require(spec))
                .collect::<Result<_>>()?,
            lap: table.column(&self.schema.lap),
            status: table.column(&self.schema.status),
            pit: table.column(&self.schema.pit),
        };

        table.collect(self.strict, |row, warnings| {
            self.parse_row(&columns, row, warnings)
        })
    }

    /// Loads records from a file.
    ///
    /// # Errors
    ///
    /// As [`load`](Self::load), plus failure to open the file.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<Loaded<RaceRecord>> {
        let path = path.as_ref();
        self.load(open_file(path)?, &path.display().to_string())
    }

    fn parse_row(
        &self,
        columns: &Columns,
        row: &Row<'_>,
        warnings: &mut Vec<RowWarning>,
    ) -> ParsedRow {
        let Some(competitor) = row.cell(Some(&columns.competitor)) else {
            return ParsedRow::Malformed(row.malformed(MalformedReason::MissingCompetitor));
        };
        let time = match row.time(Some(&columns.time)) {
            Ok(Some(time)) => time,
            Ok(None) => {
                return ParsedRow::Malformed(row.malformed(MalformedReason::MissingTimestamp));
            }
            Err(reason) => return ParsedRow::Malformed(row.malformed(reason)),
        };

        let mut record = RaceRecord::new(competitor, time).with_line(row.line);

        let mut components = Vec::with_capacity(columns.position.len());
        for column in &columns.position {
            match row.number(Some(column)) {
                Ok(Some(value)) => components.push(value),
                Ok(None) => {}
                Err(reason) => return ParsedRow::Malformed(row.malformed(reason)),
            }
        }
        if components.len() == columns.position.len() {
            if let Some(position) = Position::from_slice(&components) {
                record = record.with_position(position);
            }
        } else if !components.is_empty() {
            warnings.push(RowWarning {
                line: row.line,
                kind: WarningKind::PartialPosition,
            });
        }

        match row.count(columns.lap.as_ref()) {
            Ok(Some(lap)) => record = record.with_lap(lap),
            Ok(None) => {}
            Err(reason) => return ParsedRow::Malformed(row.malformed(reason)),
        }

        if let Some(raw) = row.cell(columns.status.as_ref()) {
            let status = self.statuses.lookup(raw).unwrap_or_else(|| {
                warnings.push(RowWarning {
                    line: row.line,
                    kind: WarningKind::UnrecognizedStatus(raw.to_string()),
                });
                Status::Unknown
            });
            record = record.with_status(status);
        }

        match row.flag(columns.pit.as_ref()) {
            Ok(flag) => record = record.with_in_pit(flag.unwrap_or(false)),
            Err(value) => warnings.push(RowWarning {
                line: row.line,
                kind: WarningKind::UnreadableFlag {
                    column: columns.pit.as_ref().map(Column::name).unwrap_or_default().to_string(),
                    value,
                },
            }),
        }

        ParsedRow::Valid(record)
    }
}

struct Columns {
    competitor: Column,
    time: Column,
    position: Vec<Column>,
    lap: Option<Column>,
    status: Option<Column>,
    pit: Option<Column>,
}
