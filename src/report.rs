use std::{
    io::{self, Write},
    time::Instant,
};

use crate::data::{TripRecord, TripTable};
use crate::filter::{month_name, weekday_name};
use crate::stats::{Availability, DurationStats, StationStats, TimeStats, UserStats};

pub const DELIMITER_WIDTH: usize = 40;

const NO_TRIPS: &str = "No trips match the selected filters.";

pub fn delimiter<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(DELIMITER_WIDTH))
}

fn section<W, F>(out: &mut W, heading: &str, body: F) -> io::Result<()>
where
    W: Write,
    F: FnOnce(&mut W) -> io::Result<()>,
{
    writeln!(out, "\n{heading}\n")?;
    let started = Instant::now();
    body(out)?;
    writeln!(out, "\nThis took {} seconds.", started.elapsed().as_secs_f64())?;
    delimiter(out)
}

pub fn time_stats<W: Write>(out: &mut W, table: &TripTable) -> io::Result<()> {
    section(out, "Calculating The Most Frequent Times of Travel...", |out| {
        let Some(stats) = TimeStats::compute(table) else {
            return writeln!(out, "{NO_TRIPS}");
        };
        writeln!(
            out,
            "Most common month: {}",
            month_name(stats.popular_month).unwrap_or("unknown")
        )?;
        writeln!(out, "Most common day of week: {}", weekday_name(stats.popular_day))?;
        writeln!(out, "Most popular start hour: {}", stats.popular_hour)
    })
}

pub fn station_stats<W: Write>(out: &mut W, table: &TripTable) -> io::Result<()> {
    section(out, "Calculating The Most Popular Stations and Trip...", |out| {
        let Some(stats) = StationStats::compute(table) else {
            return writeln!(out, "{NO_TRIPS}");
        };
        writeln!(out, "Most common start station: {}", stats.popular_start)?;
        writeln!(out, "Most common end station: {}", stats.popular_end)?;
        writeln!(
            out,
            "Most common combination of start station and end station trip: {}",
            stats.popular_trip
        )
    })
}

pub fn duration_stats<W: Write>(out: &mut W, table: &TripTable) -> io::Result<()> {
    section(out, "Calculating Trip Duration...", |out| {
        let Some(stats) = DurationStats::compute(table) else {
            return writeln!(out, "{NO_TRIPS}");
        };
        writeln!(out, "Total travel time (in seconds): {}", stats.total_seconds)?;
        writeln!(out, "Total travel time (in minutes): {}", stats.total_minutes())?;
        writeln!(out, "Total travel time (in hours): {}", stats.total_hours())?;
        writeln!(out, "Mean travel time (in seconds): {}", stats.mean_seconds)?;
        writeln!(out, "Mean travel time (in minutes): {}", stats.mean_minutes())
    })
}

fn counts<W: Write>(out: &mut W, label: &str, counts: &[(String, usize)]) -> io::Result<()> {
    writeln!(out, "Count of {label}:")?;
    for (value, count) in counts {
        writeln!(out, "  {value}: {count}")?;
    }
    Ok(())
}

pub fn user_stats<W: Write>(out: &mut W, table: &TripTable) -> io::Result<()> {
    section(out, "Calculating User Stats...", |out| {
        let stats = UserStats::compute(table);

        if stats.user_types.is_empty() {
            writeln!(out, "Count of user types: no data")?;
        } else {
            counts(out, "user types", &stats.user_types)?;
        }

        match &stats.genders {
            Availability::NotAvailable => {
                writeln!(out, "Gender data is not available for this city.")?
            }
            Availability::NoData => writeln!(out, "Count of gender: no data")?,
            Availability::Available(genders) => counts(out, "gender", genders)?,
        }

        match &stats.birth_years {
            Availability::NotAvailable => {
                writeln!(out, "Year of birth data is not available for this city.")
            }
            Availability::NoData => writeln!(out, "Year of birth: no data"),
            Availability::Available(years) => {
                writeln!(out, "Earliest year of birth: {}", years.earliest)?;
                writeln!(out, "Most recent year of birth: {}", years.latest)?;
                writeln!(out, "Most common year of birth: {}", years.most_common)
            }
        }
    })
}

pub fn all<W: Write>(out: &mut W, table: &TripTable) -> io::Result<()> {
    time_stats(out, table)?;
    station_stats(out, table)?;
    duration_stats(out, table)?;
    user_stats(out, table)
}

pub fn raw_rows<W: Write>(out: &mut W, offset: usize, rows: &[TripRecord]) -> io::Result<()> {
    for (index, trip) in rows.iter().enumerate() {
        writeln!(out, "{:>6}  {trip}", offset + index)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::tests::{table, CHICAGO, WASHINGTON};

    fn render(table: &TripTable) -> String {
        let mut out = Vec::new();
        all(&mut out, table).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn renders_every_section() {
        let text = render(&table("chicago", CHICAGO));
        assert!(text.contains("Most common month: January"));
        assert!(text.contains("Most common day of week: Monday"));
        assert!(text.contains("Most common start station: Christiana Ave & Lawrence Ave"));
        assert!(text.contains("Total travel time (in seconds): 3231"));
        assert!(text.contains("  Subscriber: 4"));
        assert!(text.contains("  Male: 3"));
        assert!(text.contains("Earliest year of birth: 1981"));
        assert_eq!(text.matches(&"-".repeat(DELIMITER_WIDTH)).count(), 4);
    }

    #[test]
    fn reports_missing_demographics() {
        let text = render(&table("washington", WASHINGTON));
        assert!(text.contains("Gender data is not available for this city."));
        assert!(text.contains("Year of birth data is not available for this city."));
    }

    #[test]
    fn empty_table_renders_without_values() {
        let text = render(&TripTable::default());
        assert_eq!(text.matches(NO_TRIPS).count(), 3);
        assert!(text.contains("Count of user types: no data"));
    }
}
