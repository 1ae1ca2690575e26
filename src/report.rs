//! Descriptive statistics over a filtered trip set.
//!
//! Each reporter is split into a `compute` step that returns plain values
//! and a `render` step that writes the text block. `report_all` runs the
//! four of them in their fixed order with the heading and timing lines
//! around each block.

use std::fmt::Display;
use std::io::Write;
use std::time::Instant;

use crate::aggregation::{self, Mode};
use crate::catalog::{self, FilterSelection};
use crate::error::BikeshareError;
use crate::model::TripRecordSet;
use crate::schema::{demographics, derived, trip};

const NO_TRIPS: &str = "no trips match the selected filters";
const STATION_SEPARATOR: &str = " --> ";

// ── Time of travel ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct TimeStats {
    /// `None` when the month was pinned by the filter.
    pub popular_month: Option<Option<Mode<i32>>>,
    /// `None` when the weekday was pinned by the filter.
    pub popular_day: Option<Option<Mode<String>>>,
    pub popular_hour: Option<Mode<i32>>,
}

impl TimeStats {
    /// Month and weekday modes are only computed for dimensions left at "all".
    pub fn compute(
        trips: &TripRecordSet,
        selection: &FilterSelection,
    ) -> Result<Self, BikeshareError> {
        let df = trips.frame();
        let popular_month = match selection.month {
            None => Some(aggregation::int_mode(df, derived::MONTH)?),
            Some(_) => None,
        };
        let popular_day = match selection.day {
            None => Some(aggregation::str_mode(df, derived::DAY_OF_WEEK)?),
            Some(_) => None,
        };
        let popular_hour = aggregation::int_mode(df, derived::HOUR)?;

        Ok(Self {
            popular_month,
            popular_day,
            popular_hour,
        })
    }

    pub fn render<W: Write>(&self, out: &mut W) -> Result<(), BikeshareError> {
        if let Some(month) = &self.popular_month {
            let names = month.as_ref().map(|m| Mode {
                values: m
                    .values
                    .iter()
                    .map(|n| catalog::month_name(*n).map_or_else(|| n.to_string(), str::to_string))
                    .collect(),
                count: m.count,
            });
            mode_line(out, "Popular month(s)", &names)?;
        }
        if let Some(day) = &self.popular_day {
            mode_line(out, "Popular day(s) of week", day)?;
        }
        mode_line(out, "Popular start hour(s)", &self.popular_hour)
    }
}

// ── Stations ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct StationStats {
    pub popular_start: Option<Mode<String>>,
    pub popular_end: Option<Mode<String>>,
    pub popular_trip: Option<Mode<String>>,
}

impl StationStats {
    pub fn compute(trips: &TripRecordSet) -> Result<Self, BikeshareError> {
        let df = trips.frame();
        let starts = df.column(trip::START_STATION)?.str()?;
        let ends = df.column(trip::END_STATION)?.str()?;

        // The "Start --> End" label only lives for this pass.
        let pairs = starts
            .into_iter()
            .zip(ends)
            .map(|(start, end)| Some(format!("{}{STATION_SEPARATOR}{}", start?, end?)));

        Ok(Self {
            popular_start: aggregation::str_mode(df, trip::START_STATION)?,
            popular_end: aggregation::str_mode(df, trip::END_STATION)?,
            popular_trip: aggregation::mode(pairs),
        })
    }

    pub fn render<W: Write>(&self, out: &mut W) -> Result<(), BikeshareError> {
        mode_line(out, "Popular start station(s)", &self.popular_start)?;
        mode_line(out, "Popular end station(s)", &self.popular_end)?;
        mode_line(out, "Popular trip(s)", &self.popular_trip)
    }
}

// ── Trip duration ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationStats {
    pub total: f64,
    /// Number of trips, independent of their durations.
    pub count: usize,
    pub mean: Option<f64>,
}

impl DurationStats {
    pub fn compute(trips: &TripRecordSet) -> Result<Self, BikeshareError> {
        let summary = aggregation::summarize(trips.frame(), trip::TRIP_DURATION)?;
        Ok(Self {
            total: summary.sum,
            count: trips.len(),
            mean: summary.mean,
        })
    }

    pub fn render<W: Write>(&self, out: &mut W) -> Result<(), BikeshareError> {
        writeln!(
            out,
            "\nThe total travel time: {} ({} counts)",
            self.total, self.count
        )?;
        writeln!(out, "\nThe mean travel time: {}", or_na(self.mean))?;
        Ok(())
    }
}

// ── Users ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    pub demographics: Option<Demographics>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Demographics {
    pub genders: Vec<(String, usize)>,
    pub earliest_birth_year: Option<i64>,
    pub latest_birth_year: Option<i64>,
    pub common_birth_year: Option<Mode<i64>>,
}

impl UserStats {
    /// Demographics are read only when the trip set is flagged as carrying
    /// them. A city that should have them but does not is a data error.
    pub fn compute(trips: &TripRecordSet) -> Result<Self, BikeshareError> {
        let df = trips.frame();
        let user_types = aggregation::str_value_counts(df, trip::USER_TYPE)?;

        let demographics = if trips.has_demographics() {
            // Modal years are found on the exact values, then truncated.
            let common_birth_year =
                aggregation::float_mode(df, demographics::BIRTH_YEAR)?.map(|m| Mode {
                    values: m.values.iter().map(|y| y.trunc() as i64).collect(),
                    count: m.count,
                });
            let summary = aggregation::summarize(df, demographics::BIRTH_YEAR)?;
            Some(Demographics {
                genders: aggregation::str_value_counts(df, demographics::GENDER)?,
                earliest_birth_year: summary.min.map(|y| y.trunc() as i64),
                latest_birth_year: summary.max.map(|y| y.trunc() as i64),
                common_birth_year,
            })
        } else if trips.city().expects_demographics() {
            return Err(BikeshareError::MissingField(format!(
                "{} / {} (expected for {})",
                demographics::GENDER,
                demographics::BIRTH_YEAR,
                trips.city()
            )));
        } else {
            None
        };

        Ok(Self {
            user_types,
            demographics,
        })
    }

    pub fn render<W: Write>(&self, out: &mut W) -> Result<(), BikeshareError> {
        breakdown(out, "users", &self.user_types)?;

        if let Some(d) = &self.demographics {
            breakdown(out, "gender", &d.genders)?;
            writeln!(out, "\nThe earliest year of birth: {}", or_na(d.earliest_birth_year))?;
            writeln!(out, "\nThe most recent year of birth: {}", or_na(d.latest_birth_year))?;
            match &d.common_birth_year {
                Some(m) => writeln!(
                    out,
                    "\nThe most common year(s) of birth: {}",
                    join(&m.values)
                )?,
                None => writeln!(out, "\nThe most common year(s) of birth: n/a")?,
            }
        }
        Ok(())
    }
}

// ── Driver ──────────────────────────────────────────────────────────────────

/// Run the time, station, duration and user reporters in order.
pub fn report_all<W: Write>(
    trips: &TripRecordSet,
    selection: &FilterSelection,
    out: &mut W,
) -> Result<(), BikeshareError> {
    timed(out, "Calculating The Most Frequent Times of Travel...", |out| {
        TimeStats::compute(trips, selection)?.render(out)
    })?;
    timed(out, "Calculating The Most Popular Stations and Trip...", |out| {
        StationStats::compute(trips)?.render(out)
    })?;
    timed(out, "Calculating Trip Duration...", |out| {
        DurationStats::compute(trips)?.render(out)
    })?;
    timed(out, "Calculating User Stats...", |out| {
        UserStats::compute(trips)?.render(out)
    })
}

fn timed<W: Write>(
    out: &mut W,
    heading: &str,
    body: impl FnOnce(&mut W) -> Result<(), BikeshareError>,
) -> Result<(), BikeshareError> {
    writeln!(out, "\n{heading}\n")?;
    let start = Instant::now();
    body(out)?;
    writeln!(
        out,
        "\nThis took {} seconds.",
        start.elapsed().as_secs_f64()
    )?;
    writeln!(out, "{}", "-".repeat(40))?;
    Ok(())
}

// ── Formatting helpers ──────────────────────────────────────────────────────

fn mode_line<W: Write, T: Display>(
    out: &mut W,
    label: &str,
    mode: &Option<Mode<T>>,
) -> Result<(), BikeshareError> {
    match mode {
        Some(m) => writeln!(out, "\n{label}: {} ({} counts)", join(&m.values), m.count)?,
        None => writeln!(out, "\n{label}: {NO_TRIPS}")?,
    }
    Ok(())
}

fn breakdown<W: Write>(
    out: &mut W,
    what: &str,
    counts: &[(String, usize)],
) -> Result<(), BikeshareError> {
    writeln!(out, "\nThe breakdown of {what}:")?;
    if counts.is_empty() {
        writeln!(out, "{NO_TRIPS}")?;
    }
    let width = counts.iter().map(|(v, _)| v.len()).max().unwrap_or(0);
    for (value, count) in counts {
        writeln!(out, "{value:<width$}    {count}")?;
    }
    Ok(())
}

fn join<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn or_na<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}
