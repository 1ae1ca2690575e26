//! Fixed vocabularies the session accepts: cities, months and weekdays.

use std::fmt;

use chrono::{Month, Weekday};

/// A city with a bikeshare dataset on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

/// City name → data file. Lives for the whole process.
pub const CITY_DATA: [(City, &str); 3] = [
    (City::Chicago, "chicago.csv"),
    (City::NewYorkCity, "new_york_city.csv"),
    (City::Washington, "washington.csv"),
];

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    pub fn file_name(self) -> &'static str {
        CITY_DATA
            .iter()
            .find(|(city, _)| *city == self)
            .map(|(_, file)| *file)
            .unwrap_or_default()
    }

    /// Whether this city's dataset is published with gender and birth year.
    pub fn expects_demographics(self) -> bool {
        !matches!(self, City::Washington)
    }

    /// Case-insensitive lookup of a catalog key.
    pub fn parse(input: &str) -> Option<City> {
        let wanted = input.trim().to_lowercase();
        City::ALL.into_iter().find(|city| city.name() == wanted)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Months ──────────────────────────────────────────────────────────────────

/// The datasets cover the first half of 2017.
pub const MONTHS: [Month; 6] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
];

pub const ALL: &str = "all";

/// Parses "all" (→ `Some(None)`) or one of the supported month names.
pub fn parse_month(input: &str) -> Option<Option<Month>> {
    let wanted = input.trim().to_lowercase();
    if wanted == ALL {
        return Some(None);
    }
    MONTHS
        .into_iter()
        .find(|m| m.name().to_lowercase() == wanted)
        .map(Some)
}

/// Display name for a month number (1 = January).
pub fn month_name(number: i32) -> Option<&'static str> {
    let number = u8::try_from(number).ok()?;
    Month::try_from(number).ok().map(|m| m.name())
}

// ── Weekdays ────────────────────────────────────────────────────────────────

const WEEKDAYS: [(Weekday, &str); 7] = [
    (Weekday::Mon, "Monday"),
    (Weekday::Tue, "Tuesday"),
    (Weekday::Wed, "Wednesday"),
    (Weekday::Thu, "Thursday"),
    (Weekday::Fri, "Friday"),
    (Weekday::Sat, "Saturday"),
    (Weekday::Sun, "Sunday"),
];

pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAYS[day.num_days_from_monday() as usize].1
}

/// Weekday name for an ISO day number (1 = Monday ... 7 = Sunday).
pub fn iso_weekday_name(number: i32) -> Option<&'static str> {
    let index = usize::try_from(number).ok()?.checked_sub(1)?;
    WEEKDAYS.get(index).map(|(_, name)| *name)
}

/// Parses "all" (→ `Some(None)`) or a full weekday name.
pub fn parse_weekday(input: &str) -> Option<Option<Weekday>> {
    let wanted = input.trim().to_lowercase();
    if wanted == ALL {
        return Some(None);
    }
    WEEKDAYS
        .into_iter()
        .find(|(_, name)| name.to_lowercase() == wanted)
        .map(|(day, _)| Some(day))
}

// ── Filter selection ────────────────────────────────────────────────────────

/// One analysis run's choice of city and optional month / weekday.
/// `None` on either dimension means "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: City,
    pub month: Option<Month>,
    pub day: Option<Weekday>,
}

impl FilterSelection {
    pub fn new(city: City) -> Self {
        Self {
            city,
            month: None,
            day: None,
        }
    }

    pub fn with_month(mut self, month: Option<Month>) -> Self {
        self.month = month;
        self
    }

    pub fn with_day(mut self, day: Option<Weekday>) -> Self {
        self.day = day;
        self
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = self.month.map_or(ALL, |m| m.name());
        let day = self.day.map_or(ALL, weekday_name);
        write!(f, "city={}, month={}, day={}", self.city, month, day)
    }
}
