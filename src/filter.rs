use chrono::Weekday;
use std::fmt;

use crate::data::{TripRecord, TripTable};

pub const ALL: &str = "all";

pub const MONTHS: [&str; 6] = ["january", "february", "march", "april", "may", "june"];

pub const WEEKDAYS: [(&str, Weekday); 7] = [
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun),
];

pub fn month_name(month: u32) -> Option<&'static str> {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    NAMES.get(month.checked_sub(1)? as usize).copied()
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    /// Calendar month, 1 = January.
    Month(u32),
}

impl MonthFilter {
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim().to_lowercase();
        if input == ALL {
            return Some(Self::All);
        }
        MONTHS
            .iter()
            .position(|&month| month == input)
            .map(|index| Self::Month(index as u32 + 1))
    }

    pub fn matches(&self, trip: &TripRecord) -> bool {
        match self {
            Self::All => true,
            Self::Month(month) => trip.month == *month,
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all months"),
            Self::Month(month) => f.write_str(month_name(*month).unwrap_or("?")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Day(Weekday),
}

impl DayFilter {
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim().to_lowercase();
        if input == ALL {
            return Some(Self::All);
        }
        WEEKDAYS
            .iter()
            .find(|(name, _)| *name == input)
            .map(|&(_, day)| Self::Day(day))
    }

    pub fn matches(&self, trip: &TripRecord) -> bool {
        match self {
            Self::All => true,
            Self::Day(day) => trip.day_of_week == *day,
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("every day"),
            Self::Day(day) => f.write_str(weekday_name(*day)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub city: String,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl Selection {
    pub fn matches(&self, trip: &TripRecord) -> bool {
        self.month.matches(trip) && self.day.matches(trip)
    }
}

impl TripTable {
    /// Copy of the rows matching `selection`; `self` is left untouched.
    pub fn filter(&self, selection: &Selection) -> TripTable {
        let records: Vec<TripRecord> = self
            .records
            .iter()
            .filter(|trip| selection.matches(trip))
            .cloned()
            .collect();

        log::debug!(
            "Filter {} / {}: {} of {} trips kept",
            selection.month,
            selection.day,
            records.len(),
            self.len()
        );

        TripTable::new(self.schema, records)
    }
}
