use chrono::Weekday;
use itertools::Itertools;
use std::{cmp::Ordering, hash::Hash};

use crate::data::{Seconds, TripTable};
use crate::filter::WEEKDAYS;

/// Most frequent value. Ties go to the smallest value.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Ord + Hash,
    I: IntoIterator<Item = T>,
{
    values
        .into_iter()
        .counts()
        .into_iter()
        .max_by(|(a, a_count), (b, b_count)| a_count.cmp(b_count).then_with(|| b.cmp(a)))
        .map(|(value, _)| value)
}

/// Occurrences per value, most frequent first, ties in ascending value order.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Ord + Hash,
    I: IntoIterator<Item = T>,
{
    values
        .into_iter()
        .counts()
        .into_iter()
        .sorted_by(|(a, a_count), (b, b_count)| match b_count.cmp(a_count) {
            Ordering::Equal => a.cmp(b),
            other => other,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeStats {
    pub popular_month: u32,
    pub popular_day: Weekday,
    pub popular_hour: u32,
}

impl TimeStats {
    pub fn compute(table: &TripTable) -> Option<Self> {
        let trips = &table.records;

        // Weekdays rank in calendar order, Monday first.
        let popular_day = mode(trips.iter().map(|trip| trip.day_of_week.num_days_from_monday()))
            .and_then(|index| WEEKDAYS.get(index as usize))
            .map(|&(_, day)| day)?;

        Some(Self {
            popular_month: mode(trips.iter().map(|trip| trip.month))?,
            popular_day,
            popular_hour: mode(trips.iter().map(|trip| trip.hour))?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub popular_start: String,
    pub popular_end: String,
    pub popular_trip: String,
}

impl StationStats {
    pub fn compute(table: &TripTable) -> Option<Self> {
        let trips = &table.records;

        Some(Self {
            popular_start: mode(trips.iter().map(|trip| trip.start_station.as_str()))?.to_owned(),
            popular_end: mode(trips.iter().map(|trip| trip.end_station.as_str()))?.to_owned(),
            popular_trip: mode(trips.iter().map(|trip| trip.station_pair()))?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationStats {
    pub total_seconds: Seconds,
    pub mean_seconds: Seconds,
}

impl DurationStats {
    pub fn compute(table: &TripTable) -> Option<Self> {
        if table.is_empty() {
            return None;
        }

        let total_seconds: Seconds = table.records.iter().map(|trip| trip.trip_duration).sum();

        Some(Self {
            total_seconds,
            mean_seconds: total_seconds / table.len() as f64,
        })
    }

    pub fn total_minutes(&self) -> f64 {
        self.total_seconds / 60.0
    }

    pub fn total_hours(&self) -> f64 {
        self.total_seconds / 3600.0
    }

    pub fn mean_minutes(&self) -> f64 {
        self.mean_seconds / 60.0
    }
}

/// Outcome of an aggregation over an optional column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability<T> {
    /// The city's file has no such column.
    NotAvailable,
    /// The column exists but no selected trip has a value in it.
    NoData,
    Available(T),
}

impl<T> Availability<T> {
    fn compute(present: bool, value: impl FnOnce() -> Option<T>) -> Self {
        if !present {
            return Self::NotAvailable;
        }
        value().map_or(Self::NoData, Self::Available)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub latest: i32,
    pub most_common: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    pub genders: Availability<Vec<(String, usize)>>,
    pub birth_years: Availability<BirthYearStats>,
}

impl UserStats {
    pub fn compute(table: &TripTable) -> Self {
        let trips = &table.records;

        let user_types = value_counts(trips.iter().filter_map(|trip| trip.user_type.clone()));

        let genders = Availability::compute(table.schema.has_gender, || {
            let counts = value_counts(trips.iter().filter_map(|trip| trip.gender.clone()));
            (!counts.is_empty()).then_some(counts)
        });

        let birth_years = Availability::compute(table.schema.has_birth_year, || {
            let years = trips.iter().filter_map(|trip| trip.birth_year);
            let (earliest, latest) = years.clone().minmax().into_option()?;
            Some(BirthYearStats {
                earliest,
                latest,
                most_common: mode(years)?,
            })
        });

        Self {
            user_types,
            genders,
            birth_years,
        }
    }
}
