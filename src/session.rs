use std::io::{BufRead, Write};

use crate::error::BikeshareError;
use crate::filters::collect_filters;
use crate::model::DatasetLoader;
use crate::pager::page_raw_data;
use crate::prompt::Prompter;
use crate::report::report_all;

const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
const RESTART_QUESTION: &str = "\n\nWould you like to restart? Enter yes or no.\n";

/// The interactive loop: filters, load, reports, pager, restart?
pub struct Session<R, W> {
    prompter: Prompter<R, W>,
    loader: DatasetLoader,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(prompter: Prompter<R, W>, loader: DatasetLoader) -> Self {
        Self { prompter, loader }
    }

    /// Run passes until the user declines to restart or input ends.
    ///
    /// Data errors end the current pass only; the user is then asked
    /// whether to try again.
    pub fn run(&mut self) -> Result<(), BikeshareError> {
        loop {
            match self.run_once() {
                Ok(()) => {}
                Err(BikeshareError::InputClosed) => return Ok(()),
                Err(e) if e.is_data_error() => {
                    log::warn!("pass aborted: {e}");
                    self.prompter.say(&format!("\nError: {e}"))?;
                }
                Err(e) => return Err(e),
            }

            if !self.prompter.confirm(RESTART_QUESTION)? {
                return Ok(());
            }
        }
    }

    fn run_once(&mut self) -> Result<(), BikeshareError> {
        self.prompter.say(GREETING)?;
        let selection = collect_filters(&mut self.prompter)?;
        self.prompter.say(&"-".repeat(40))?;

        let trips = self.loader.load(&selection)?;
        report_all(&trips, &selection, self.prompter.output())?;
        page_raw_data(&trips, &mut self.prompter)
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::City;
    use crate::testing::{DataDir, CHICAGO_ROWS, WASHINGTON_ROWS};

    fn run(dir: &DataDir, input: &str) -> String {
        let prompter = Prompter::new(input.as_bytes(), Vec::new());
        let mut session = Session::new(prompter, DatasetLoader::new(dir.path()));
        session.run().unwrap();
        String::from_utf8(session.into_output()).unwrap()
    }

    #[test]
    fn single_pass_then_exit() {
        let dir = DataDir::with_city(City::Chicago, CHICAGO_ROWS);
        let out = run(&dir, "chicago\nmonth\nmarch\nno\nno\n");

        assert_eq!(out.matches(GREETING).count(), 1);
        assert!(!out.contains("Popular month(s)"));
        assert!(out.contains("Popular day(s) of week"));
        assert!(out.contains("Popular start hour(s)"));
        assert!(out.contains("Would you like to restart?"));
    }

    #[test]
    fn restart_runs_the_pipeline_again() {
        let dir = DataDir::with_city(City::Chicago, CHICAGO_ROWS);
        dir.write(City::Washington, WASHINGTON_ROWS);
        let out = run(&dir, "chicago\nno\nno\nyes\nwashington\nno\nno\nno\n");

        assert_eq!(out.matches(GREETING).count(), 2);
        assert_eq!(out.matches("Calculating User Stats...").count(), 2);
        assert_eq!(out.matches("The breakdown of gender").count(), 1);
    }

    #[test]
    fn data_errors_are_reported_and_retry_is_offered() {
        let dir = DataDir::with_city(City::Chicago, CHICAGO_ROWS);
        let out = run(&dir, "new york city\nno\nyes\nchicago\nno\nno\nno\n");

        assert!(out.contains("Error: Data for new york city is unavailable"));
        assert_eq!(out.matches(GREETING).count(), 2);
        assert_eq!(out.matches("Calculating User Stats...").count(), 1);
    }

    #[test]
    fn closed_input_ends_session_quietly() {
        let dir = DataDir::with_city(City::Chicago, CHICAGO_ROWS);
        let out = run(&dir, "chic");
        assert!(out.contains("valid city names"));
    }
}
