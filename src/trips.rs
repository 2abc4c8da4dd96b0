use serde::Deserialize;

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

pub const REQUIRED_COLUMNS: [&str; 6] = [
    START_TIME,
    END_TIME,
    TRIP_DURATION,
    START_STATION,
    END_STATION,
    USER_TYPE,
];

/// One line of a city file, exactly as it appears on disk.
#[derive(Deserialize, Debug)]
pub struct TripRow {
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "End Time")]
    pub end_time: String,
    #[serde(rename = "Trip Duration")]
    pub trip_duration: String,
    #[serde(rename = "Start Station")]
    pub start_station: String,
    #[serde(rename = "End Station")]
    pub end_station: String,
    #[serde(rename = "User Type", default)]
    pub user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    pub birth_year: Option<String>,
}

/// Column layout of a city file, read from its header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Schema {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

impl Schema {
    /// Checks the required columns and records which optional ones exist.
    /// Names must match exactly; the loader trims them beforehand.
    /// Returns the first missing required column on failure.
    pub fn from_headers(headers: &csv::StringRecord) -> Result<Self, &'static str> {
        let has = |name: &str| headers.iter().any(|header| header == name);

        if let Some(&missing) = REQUIRED_COLUMNS.iter().find(|&&column| !has(column)) {
            return Err(missing);
        }

        Ok(Self {
            has_gender: has(GENDER),
            has_birth_year: has(BIRTH_YEAR),
        })
    }

    pub fn has_demographics(&self) -> bool {
        self.has_gender && self.has_birth_year
    }
}
