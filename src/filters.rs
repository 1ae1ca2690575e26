use std::io::{BufRead, Write};

use chrono::{Month, Weekday};

use crate::catalog::{self, City, FilterSelection};
use crate::error::BikeshareError;
use crate::prompt::Prompter;

const CITY_QUESTION: &str =
    "Which city do you want to analyze its bikeshare data: Chicago, New York City, or Washington?\n";
const MODE_QUESTION: &str = "Would you like to filter the data by month, day, both or not at all?\n\
                             Type month, day, both, or no.: ";
const MONTH_QUESTION: &str = "Which month do you want to filter by? Type \"all\" for no month filter.\n";
const DAY_QUESTION: &str =
    "Which day of week do you want to filter by? Type \"all\" for no day filter.\n";

/// Which dimensions the user wants to be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Month,
    Day,
    Both,
    None,
}

impl FilterMode {
    pub fn parse(input: &str) -> Option<FilterMode> {
        match input.trim().to_lowercase().as_str() {
            "month" => Some(FilterMode::Month),
            "day" => Some(FilterMode::Day),
            "both" => Some(FilterMode::Both),
            "no" => Some(FilterMode::None),
            _ => None,
        }
    }

    fn wants_month(self) -> bool {
        matches!(self, FilterMode::Month | FilterMode::Both)
    }

    fn wants_day(self) -> bool {
        matches!(self, FilterMode::Day | FilterMode::Both)
    }
}

/// Prompt until a complete, valid filter selection has been given.
///
/// Dimensions the chosen mode does not ask about default to "all".
pub fn collect_filters<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<FilterSelection, BikeshareError> {
    let city = prompter.ask_until(
        CITY_QUESTION,
        "You didn't select one of the three valid city names!",
        City::parse,
    )?;
    let mode = prompter.ask_until(
        MODE_QUESTION,
        "You didn't select a valid option!",
        FilterMode::parse,
    )?;

    let month = if mode.wants_month() {
        ask_month(prompter)?
    } else {
        None
    };
    let day = if mode.wants_day() {
        ask_day(prompter)?
    } else {
        None
    };

    let selection = FilterSelection::new(city).with_month(month).with_day(day);
    log::info!("filters selected: {selection}");
    Ok(selection)
}

fn ask_month<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<Option<Month>, BikeshareError> {
    prompter.ask_until(
        MONTH_QUESTION,
        "The month name is not recognized!",
        catalog::parse_month,
    )
}

fn ask_day<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<Option<Weekday>, BikeshareError> {
    prompter.ask_until(
        DAY_QUESTION,
        "The day name is not recognized!",
        catalog::parse_weekday,
    )
}
