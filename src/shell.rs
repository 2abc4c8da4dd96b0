use std::io::{self, BufRead, Write};

use crate::config::Config;
use crate::data::TripTable;
use crate::error::Result;
use crate::filter::{DayFilter, MonthFilter, Selection};
use crate::loader;
use crate::report;

const QUIT_WORDS: [&str; 2] = ["quit", "exit"];

/// What the user typed at a prompt.
#[derive(Debug, PartialEq, Eq)]
enum Answer {
    Line(String),
    /// `quit`, `exit` or end of input.
    Quit,
}

pub struct Shell<'a, R, W> {
    config: &'a Config,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(config: &'a Config, input: R, output: W) -> Self {
        Self {
            config,
            input,
            output,
        }
    }

    /// Runs against the city files named in the config.
    pub fn run(&mut self) -> Result<()> {
        self.run_with(loader::load_city)
    }

    /// Runs the prompt loop until the user quits or declines to restart.
    pub fn run_with<F>(&mut self, mut load: F) -> Result<()>
    where
        F: FnMut(&Config, &str) -> Result<TripTable>,
    {
        writeln!(self.output, "Hello! Let's explore some US bikeshare data!")?;
        writeln!(self.output, "Type 'quit' at any prompt to leave.")?;

        loop {
            let Some(selection) = self.selection()? else {
                break;
            };
            log::debug!("Selected {selection:?}");

            let table = load(self.config, &selection.city)?.filter(&selection);
            writeln!(
                self.output,
                "\n{} trips in {} for {}, {}.",
                table.len(),
                selection.city,
                selection.month,
                selection.day
            )?;
            report::all(&mut self.output, &table)?;

            if !self.page_raw_rows(&table)? {
                break;
            }

            match self.confirm("\nWould you like to restart? Enter yes or no.")? {
                Some(true) => continue,
                _ => break,
            }
        }

        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    fn read_answer(&mut self, prompt: &str) -> io::Result<Answer> {
        loop {
            writeln!(self.output, "{prompt}")?;
            self.output.flush()?;

            // `read_line` retries `Interrupted` reads itself. End of input
            // (Ctrl-D) is the aborted prompt and ends the session.
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => {
                    writeln!(self.output, "No input taken.")?;
                    return Ok(Answer::Quit);
                }
                Ok(_) => {
                    let line = line.trim().to_lowercase();
                    if QUIT_WORDS.contains(&line.as_str()) {
                        return Ok(Answer::Quit);
                    }
                    return Ok(Answer::Line(line));
                }
                Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                    log::warn!("Unreadable input: {err}");
                    writeln!(self.output, "That is not valid input.")?;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Re-prompts until `parse` accepts the answer. `None` means quit.
    fn ask<T>(&mut self, prompt: &str, parse: impl Fn(&str) -> Option<T>) -> io::Result<Option<T>> {
        loop {
            match self.read_answer(prompt)? {
                Answer::Quit => return Ok(None),
                Answer::Line(line) => match parse(&line) {
                    Some(value) => return Ok(Some(value)),
                    None => writeln!(self.output, "{line:?} is not one of the choices.")?,
                },
            }
        }
    }

    /// `Some(true)` only for an explicit yes.
    fn confirm(&mut self, prompt: &str) -> io::Result<Option<bool>> {
        Ok(match self.read_answer(prompt)? {
            Answer::Quit => None,
            Answer::Line(line) => Some(matches!(line.as_str(), "yes" | "y")),
        })
    }

    fn selection(&mut self) -> io::Result<Option<Selection>> {
        let config = self.config;
        let city_prompt = format!(
            "\nWhich city would you like to look at ({})?",
            config.city_names().join(", ")
        );

        let Some(city) = self.ask(&city_prompt, |input| config.city(input).map(str::to_owned))?
        else {
            return Ok(None);
        };
        let Some(month) = self.ask(
            "Which month: all, or one of january, february, ... , june?",
            MonthFilter::parse,
        )?
        else {
            return Ok(None);
        };
        let Some(day) = self.ask(
            "Which day: all, or one of monday, tuesday, ... , sunday?",
            DayFilter::parse,
        )?
        else {
            return Ok(None);
        };

        report::delimiter(&mut self.output)?;
        Ok(Some(Selection { city, month, day }))
    }

    /// Shows raw rows a page at a time. Returns `false` if the user quit.
    fn page_raw_rows(&mut self, table: &TripTable) -> io::Result<bool> {
        let page_size = self.config.page_size;
        let mut prompt =
            format!("\nWould you like to see {page_size} rows of the raw data? Enter yes or no.");
        let mut offset = 0;

        loop {
            match self.confirm(&prompt)? {
                None => return Ok(false),
                Some(false) => return Ok(true),
                Some(true) => {}
            }

            let page = table.page(offset, page_size);
            report::raw_rows(&mut self.output, offset, page)?;
            offset += page.len();

            if offset >= table.len() {
                writeln!(self.output, "No more rows to show.")?;
                return Ok(true);
            }
            prompt = "Do you wish to continue? Enter yes or no.".to_owned();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BikeshareError;
    use crate::loader::tests::{table, CHICAGO, WASHINGTON};
    use std::io::{BufReader, Cursor, Read};

    /// Fails its first read with `Interrupted`, then serves `rest`.
    struct InterruptedOnce<'a> {
        interrupted: bool,
        rest: &'a [u8],
    }

    impl Read for InterruptedOnce<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::ErrorKind::Interrupted.into());
            }
            self.rest.read(buf)
        }
    }

    fn run(input: &[u8]) -> (Result<()>, String, Vec<String>) {
        let config = Config::new(".").with_page_size(2);
        let mut loads = Vec::new();
        let mut output = Vec::new();

        let result = Shell::new(&config, Cursor::new(input), &mut output).run_with(|_, city| {
            loads.push(city.to_owned());
            Ok(match city {
                "washington" => table(city, WASHINGTON),
                _ => table(city, CHICAGO),
            })
        });

        (result, String::from_utf8(output).unwrap(), loads)
    }

    #[test]
    fn full_cycle_then_decline_restart() {
        let (result, text, loads) = run(b"Chicago\nall\nall\nno\nno\n");
        assert!(result.is_ok());
        assert_eq!(loads, ["chicago"]);
        assert!(text.contains("5 trips in chicago for all months, every day."));
        assert!(text.contains("Calculating User Stats..."));
        assert!(text.ends_with("Goodbye!\n"));
    }

    #[test]
    fn reprompts_until_valid_choices() {
        let (result, text, loads) = run(b"boston\nwashington\njuly\nJune\nfunday\nWednesday\nno\nno\n");
        assert!(result.is_ok());
        assert_eq!(loads, ["washington"]);
        assert!(text.contains("\"boston\" is not one of the choices."));
        assert!(text.contains("\"july\" is not one of the choices."));
        assert!(text.contains("\"funday\" is not one of the choices."));
        assert!(text.contains("1 trips in washington for June, Wednesday."));
        assert!(text.contains("Gender data is not available for this city."));
    }

    #[test]
    fn pages_raw_rows_until_exhausted() {
        let (result, text, _) = run(b"chicago\nall\nall\nyes\nyes\nyes\nno\n");
        assert!(result.is_ok());
        assert!(text.contains("     0  2017-06-23 15:09:32"));
        assert!(text.contains("     4  2017-01-17 14:53:07"));
        assert!(text.contains("No more rows to show."));
        assert_eq!(text.matches("Do you wish to continue?").count(), 2);
    }

    #[test]
    fn pagination_stops_when_declined() {
        let (_, text, _) = run(b"chicago\nall\nall\nyes\nno\nno\n");
        assert!(text.contains("     1  2017-05-25 18:19:03"));
        assert!(!text.contains("     2  2017-01-04"));
        assert!(!text.contains("No more rows to show."));
    }

    #[test]
    fn restart_loads_fresh_table() {
        let (result, _, loads) = run(b"chicago\nall\nall\nno\nyes\nwashington\nall\nall\nno\nno\n");
        assert!(result.is_ok());
        assert_eq!(loads, ["chicago", "washington"]);
    }

    #[test]
    fn quit_and_end_of_input_end_cleanly() {
        let (result, text, loads) = run(b"chicago\nQUIT\n");
        assert!(result.is_ok());
        assert!(loads.is_empty());
        assert!(text.ends_with("Goodbye!\n"));

        let (result, _, loads) = run(b"chicago\nall\n");
        assert!(result.is_ok());
        assert!(loads.is_empty());
    }

    #[test]
    fn end_of_input_reports_aborted_prompt() {
        let (result, text, _) = run(b"chicago\n");
        assert!(result.is_ok());
        assert!(text.ends_with("No input taken.\nGoodbye!\n"));
    }

    #[test]
    fn interrupted_read_is_retried() {
        let config = Config::new(".");
        let input = BufReader::new(InterruptedOnce {
            interrupted: false,
            rest: b"washington\nall\nall\nno\nno\n",
        });
        let mut output = Vec::new();
        let mut loads = Vec::new();

        let result = Shell::new(&config, input, &mut output).run_with(|_, city| {
            loads.push(city.to_owned());
            Ok(table(city, WASHINGTON))
        });

        assert!(result.is_ok());
        assert_eq!(loads, ["washington"]);
        let text = String::from_utf8(output).unwrap();
        assert!(!text.contains("No input taken."));
        assert!(text.contains("3 trips in washington for all months, every day."));
    }

    #[test]
    fn unreadable_input_is_reported_and_reprompted() {
        let (result, text, loads) = run(b"\xff\xfe\nwashington\nall\nall\nno\nno\n");
        assert!(result.is_ok());
        assert!(text.contains("That is not valid input."));
        assert_eq!(loads, ["washington"]);
    }

    #[test]
    fn load_failure_is_fatal() {
        let config = Config::new(".");
        let mut output = Vec::new();
        let result = Shell::new(&config, Cursor::new(b"chicago\nall\nall\n".as_slice()), &mut output)
            .run_with(|_, city| {
                Err(BikeshareError::MissingColumn {
                    city: city.to_owned(),
                    column: "Start Time".to_owned(),
                })
            });
        assert!(matches!(result, Err(BikeshareError::MissingColumn { .. })));
    }
}
