use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use std::fmt;

use crate::error::{BikeshareError, Result};
use crate::trips::{Schema, TripRow, BIRTH_YEAR, TRIP_DURATION};

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

/// Duration in seconds. Some cities publish fractional seconds.
pub type Seconds = f64;

#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub trip_duration: Seconds,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,

    pub month: u32,
    pub day_of_week: Weekday,
    pub hour: u32,
}

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Finite numbers only; `NaN` and infinities are rejected.
fn parse_number(row: usize, column: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| BikeshareError::InvalidNumber {
            row,
            column: column.to_owned(),
            value: value.to_owned(),
        })
}

/// Whole year that fits in an `i32`, written either as `1992` or `1992.0`.
fn parse_year(row: usize, value: &str) -> Result<i32> {
    let number = parse_number(row, BIRTH_YEAR, value)?;
    if number.fract() != 0.0 || number < i32::MIN as f64 || number > i32::MAX as f64 {
        return Err(BikeshareError::InvalidNumber {
            row,
            column: BIRTH_YEAR.to_owned(),
            value: value.to_owned(),
        });
    }
    Ok(number as i32)
}

impl TripRecord {
    /// Builds a record from raw row number `row` (1-based, header excluded).
    pub fn from_row(row: usize, raw: TripRow) -> Result<Self> {
        let start_time =
            parse_timestamp(&raw.start_time).ok_or_else(|| BikeshareError::InvalidTimestamp {
                row,
                value: raw.start_time.clone(),
            })?;

        let birth_year = match non_empty(raw.birth_year) {
            Some(value) => Some(parse_year(row, &value)?),
            None => None,
        };

        Ok(Self {
            end_time: parse_timestamp(&raw.end_time),
            trip_duration: parse_number(row, TRIP_DURATION, &raw.trip_duration)?,
            start_station: raw.start_station.trim().to_owned(),
            end_station: raw.end_station.trim().to_owned(),
            user_type: non_empty(raw.user_type),
            gender: non_empty(raw.gender),
            birth_year,

            month: start_time.month(),
            day_of_week: start_time.weekday(),
            hour: start_time.hour(),
            start_time,
        })
    }

    pub fn station_pair(&self) -> String {
        format!("{} & {}", self.start_station, self.end_station)
    }
}

impl fmt::Display for TripRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end_time = self
            .end_time
            .map(|time| time.to_string())
            .unwrap_or_else(|| "-".to_owned());

        write!(
            f,
            "{} | {} | {}s | {} -> {} | {}",
            self.start_time,
            end_time,
            self.trip_duration,
            self.start_station,
            self.end_station,
            self.user_type.as_deref().unwrap_or("-"),
        )?;

        if let Some(gender) = &self.gender {
            write!(f, " | {gender}")?;
        }
        if let Some(birth_year) = self.birth_year {
            write!(f, " | {birth_year}")?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TripTable {
    pub schema: Schema,
    pub records: Vec<TripRecord>,
}

impl TripTable {
    pub fn new(schema: Schema, records: Vec<TripRecord>) -> Self {
        Self { schema, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows `offset..offset + size`, clamped to the table.
    pub fn page(&self, offset: usize, size: usize) -> &[TripRecord] {
        let start = offset.min(self.records.len());
        let end = offset.saturating_add(size).min(self.records.len());
        &self.records[start..end]
    }
}
