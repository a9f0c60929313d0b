//! Loaders for the tables recorded alongside telemetry.

use std::collections::HashSet;
use std::io;

use racereel_foundation::{
    GridSlot, MalformedReason, Message, PitStop, Position, RaceTime, Result, Standing,
};

use crate::report::{Loaded, ParsedRow};
use crate::schema::{ColumnSpec, GridSchema, MessageSchema, PitSchema, StandingsSchema};
use crate::table::{Row, Table};

/// Loads race control messages, the starting grid, pit stops, recorded
/// standings, and the track outline.
#[derive(Clone, Debug, Default)]
pub struct SessionLoader {
    messages: MessageSchema,
    grid: GridSchema,
    pits: PitSchema,
    standings: StandingsSchema,
    strict: bool,
}

impl SessionLoader {
    /// Creates a loader with the default schemas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to fail on the first malformed row.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Builder method to replace the message schema.
    #[must_use]
    pub fn with_message_schema(mut self, schema: MessageSchema) -> Self {
        self.messages = schema;
        self
    }

    /// Loads race control messages, sorted by time.
    ///
    /// # Errors
    ///
    /// Returns an error for unreadable input or missing required columns.
    pub fn messages<R: io::Read>(&self, reader: R, source: &str) -> Result<Loaded<Message>> {
        let table = Table::open(reader, source)?;
        let time_col = table.require(&self.messages.time)?;
        let text_col = table.require(&self.messages.text)?;
        let lap_col = table.column(&self.messages.lap);

        let mut loaded = table.collect(self.strict, |row, _| {
            let time = match required_time(row, row.time(Some(&time_col))) {
                Ok(time) => time,
                Err(malformed) => return malformed,
            };
            let Some(text) = row.cell(Some(&text_col)) else {
                return ParsedRow::Malformed(
                    row.malformed(MalformedReason::MissingField("message".into())),
                );
            };
            let mut message = Message::new(time, text);
            match row.count(lap_col.as_ref()) {
                Ok(Some(lap)) => message = message.with_lap(lap),
                Ok(None) => {}
                Err(reason) => return ParsedRow::Malformed(row.malformed(reason)),
            }
            ParsedRow::Valid(message)
        })?;
        loaded.items.sort_by_key(Message::time);
        Ok(loaded)
    }

    /// Loads the starting grid, ordered by grid position.
    ///
    /// Competitors listed more than once keep their first row. Slots without
    /// a grid position sort after those with one, in file order.
    ///
    /// # Errors
    ///
    /// Returns an error for unreadable input or a missing competitor column.
    pub fn grid<R: io::Read>(&self, reader: R, source: &str) -> Result<Loaded<GridSlot>> {
        let table = Table::open(reader, source)?;
        let competitor = table.require(&self.grid.competitor)?;
        let grid_position = table.column(&self.grid.grid_position);
        let name = table.column(&self.grid.name);
        let team = table.column(&self.grid.team);

        let mut loaded = table.collect(self.strict, |row, _| {
            let Some(id) = row.cell(Some(&competitor)) else {
                return ParsedRow::Malformed(row.malformed(MalformedReason::MissingCompetitor));
            };
            let mut slot = GridSlot::new(id);
            match row.count(grid_position.as_ref()) {
                Ok(position) => slot.grid_position = position,
                Err(reason) => return ParsedRow::Malformed(row.malformed(reason)),
            }
            slot.name = row.cell(name.as_ref()).map(str::to_string);
            slot.team = row.cell(team.as_ref()).map(str::to_string);
            ParsedRow::Valid(slot)
        })?;

        let mut seen = HashSet::new();
        loaded.items.retain(|slot| seen.insert(slot.competitor.clone()));
        loaded
            .items
            .sort_by_key(|slot| (slot.grid_position.is_none(), slot.grid_position));
        Ok(loaded)
    }

    /// Loads pit stop windows.
    ///
    /// Entry is taken from the pit-in column, falling back to the row
    /// timestamp. Exit is taken from the pit-out column, falling back to
    /// entry plus the stop duration.
    ///
    /// # Errors
    ///
    /// Returns an error for unreadable input or a missing competitor column.
    pub fn pit_stops<R: io::Read>(&self, reader: R, source: &str) -> Result<Loaded<PitStop>> {
        let table = Table::open(reader, source)?;
        let competitor = table.require(&self.pits.competitor)?;
        let time_in = table.column(&self.pits.time_in);
        let time_out = table.column(&self.pits.time_out);
        let duration = table.column(&self.pits.duration);
        let time = table.column(&self.pits.time);

        table.collect(self.strict, |row, _| {
            let Some(id) = row.cell(Some(&competitor)) else {
                return ParsedRow::Malformed(row.malformed(MalformedReason::MissingCompetitor));
            };
            let entry = match (row.time(time_in.as_ref()), row.time(time.as_ref())) {
                (Ok(Some(t)), _) | (Ok(None), Ok(Some(t))) => t,
                (Err(reason), _) | (Ok(None), Err(reason)) => {
                    return ParsedRow::Malformed(row.malformed(reason));
                }
                (Ok(None), Ok(None)) => {
                    return ParsedRow::Malformed(row.malformed(MalformedReason::MissingTimestamp));
                }
            };
            let exit = match (row.time(time_out.as_ref()), row.number(duration.as_ref())) {
                (Ok(Some(t)), _) => t,
                (Ok(None), Ok(Some(secs))) => {
                    let Some(t) = entry.offset_by(secs) else {
                        let text = row.cell(duration.as_ref()).unwrap_or_default();
                        let reason = row.invalid_number(duration.as_ref(), text);
                        return ParsedRow::Malformed(row.malformed(reason));
                    };
                    t
                }
                (Err(reason), _) | (Ok(None), Err(reason)) => {
                    return ParsedRow::Malformed(row.malformed(reason));
                }
                (Ok(None), Ok(None)) => {
                    return ParsedRow::Malformed(
                        row.malformed(MalformedReason::MissingField("pit exit".into())),
                    );
                }
            };
            ParsedRow::Valid(PitStop::new(id, entry, exit.max(entry)))
        })
    }

    /// Loads recorded standings, sorted by time then rank.
    ///
    /// # Errors
    ///
    /// Returns an error for unreadable input or missing required columns.
    pub fn standings<R: io::Read>(&self, reader: R, source: &str) -> Result<Loaded<Standing>> {
        let table = Table::open(reader, source)?;
        let time_col = table.require(&self.standings.time)?;
        let competitor = table.require(&self.standings.competitor)?;
        let rank_col = table.require(&self.standings.rank)?;

        let mut loaded = table.collect(self.strict, |row, _| {
            let time = match required_time(row, row.time(Some(&time_col))) {
                Ok(time) => time,
                Err(malformed) => return malformed,
            };
            let Some(id) = row.cell(Some(&competitor)) else {
                return ParsedRow::Malformed(row.malformed(MalformedReason::MissingCompetitor));
            };
            match row.count(Some(&rank_col)) {
                Ok(Some(rank)) if rank > 0 => ParsedRow::Valid(Standing::new(time, id, rank)),
                Ok(_) => ParsedRow::Malformed(
                    row.malformed(MalformedReason::MissingField("rank".into())),
                ),
                Err(reason) => ParsedRow::Malformed(row.malformed(reason)),
            }
        })?;
        loaded.items.sort_by_key(|s| (s.time, s.rank));
        Ok(loaded)
    }

    /// Loads track outline points from `X`/`Y` (and optional `Z`) columns,
    /// in file order.
    ///
    /// # Errors
    ///
    /// Returns an error for unreadable input or missing `X`/`Y` columns.
    pub fn track_points<R: io::Read>(&self, reader: R, source: &str) -> Result<Loaded<Position>> {
        let table = Table::open(reader, source)?;
        let x = table.require(&ColumnSpec::new("x", &["X", "Xpos", "PosX", "Longitude", "Lon"]))?;
        let y = table.require(&ColumnSpec::new("y", &["Y", "Ypos", "PosY", "Latitude", "Lat"]))?;
        let z = table.column(&ColumnSpec::new("z", &["Z", "Zpos", "PosZ", "Altitude", "Alt"]));

        table.collect(self.strict, |row, _| {
            let coords = [row.number(Some(&x)), row.number(Some(&y)), row.number(z.as_ref())];
            let mut values = Vec::with_capacity(3);
            for (i, coord) in coords.into_iter().enumerate() {
                match coord {
                    Ok(Some(v)) => values.push(v),
                    Ok(None) if i == 2 => {}
                    Ok(None) => {
                        let axis = if i == 0 { "x" } else { "y" };
                        return ParsedRow::Malformed(
                            row.malformed(MalformedReason::MissingField(axis.into())),
                        );
                    }
                    Err(reason) => return ParsedRow::Malformed(row.malformed(reason)),
                }
            }
            match Position::from_slice(&values) {
                Some(point) => ParsedRow::Valid(point),
                None => ParsedRow::Malformed(
                    row.malformed(MalformedReason::MissingField("position".into())),
                ),
            }
        })
    }
}

fn required_time<T>(
    row: &Row<'_>,
    time: std::result::Result<Option<RaceTime>, MalformedReason>,
) -> std::result::Result<RaceTime, ParsedRow<T>> {
    match time {
        Ok(Some(time)) => Ok(time),
        Ok(None) => Err(ParsedRow::Malformed(
            row.malformed(MalformedReason::MissingTimestamp),
        )),
        Err(reason) => Err(ParsedRow::Malformed(row.malformed(reason))),
    }
}
