use clap::Parser;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Explore US bikeshare trip data interactively
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding the city CSV files
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Number of raw rows shown per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
}

/// Settings for one run of the program, shared by the loader and the shell.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub cities: BTreeMap<String, String>,
    pub page_size: usize,
}

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cities: BTreeMap::from([
                ("chicago".to_owned(), "chicago.csv".to_owned()),
                ("new york city".to_owned(), "new_york_city.csv".to_owned()),
                ("washington".to_owned(), "washington.csv".to_owned()),
            ]),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Canonical city key for user input, matched case-insensitively.
    pub fn city(&self, input: &str) -> Option<&str> {
        let input = input.trim().to_lowercase();
        self.cities
            .get_key_value(&input)
            .map(|(city, _)| city.as_str())
    }

    pub fn city_path(&self, city: &str) -> Option<PathBuf> {
        self.cities
            .get(city)
            .map(|file| self.data_dir.join(Path::new(file)))
    }

    pub fn city_names(&self) -> Vec<&str> {
        self.cities.keys().map(String::as_str).collect()
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config::new(args.data_dir).with_page_size(args.page_size)
    }
}
