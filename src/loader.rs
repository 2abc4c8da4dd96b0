use std::io;

use crate::config::Config;
use crate::data::{TripRecord, TripTable};
use crate::error::{BikeshareError, Result};
use crate::trips::{Schema, TripRow};

/// Loads the trip file configured for `city`.
pub fn load_city(config: &Config, city: &str) -> Result<TripTable> {
    let path = config
        .city_path(city)
        .ok_or_else(|| BikeshareError::UnknownCity {
            city: city.to_owned(),
        })?;

    log::info!("Loading {city} trips from {}", path.display());
    let reader = csv::Reader::from_path(&path)?;
    read_table(city, reader)
}

/// Reads a whole trip table. Any unparseable row aborts the load.
pub fn read_table<R: io::Read>(city: &str, mut reader: csv::Reader<R>) -> Result<TripTable> {
    // Serde matches columns by exact name, so strip padding once up front.
    let headers: csv::StringRecord = reader.headers()?.iter().map(str::trim).collect();
    reader.set_headers(headers.clone());

    let schema = Schema::from_headers(&headers).map_err(|column| {
        BikeshareError::MissingColumn {
            city: city.to_owned(),
            column: column.to_owned(),
        }
    })?;

    let records = reader
        .deserialize::<TripRow>()
        .enumerate()
        .map(|(index, parse_result)| TripRecord::from_row(index + 1, parse_result?))
        .collect::<Result<Vec<_>>>()?;

    log::info!(
        "Loaded {} {city} trips (demographics: {})",
        records.len(),
        schema.has_demographics()
    );

    Ok(TripTable::new(schema, records))
}
