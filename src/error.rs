use thiserror::Error;

#[derive(Error, Debug)]
pub enum BikeshareError {
    #[error("No data file configured for city {city:?}")]
    UnknownCity { city: String },

    #[error("Data file for {city:?} is missing the required column {column:?}")]
    MissingColumn { city: String, column: String },

    #[error("Row {row}: cannot parse start time {value:?}")]
    InvalidTimestamp { row: usize, value: String },

    #[error("Row {row}: cannot parse {column:?} value {value:?}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BikeshareError>;
