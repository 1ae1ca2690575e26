use std::path::{Path, PathBuf};

use polars::datatypes::TimeUnit;
use polars::prelude::StrptimeOptions;
use polars::prelude::*;

use crate::catalog::{self, City, FilterSelection};
use crate::error::BikeshareError;
use crate::schema::*;

/// Scratch column holding the ISO weekday number while names are derived.
const WEEKDAY_NUMBER: &str = "_weekday_number";

/// Trips for one city after month/day filtering.
///
/// Holds the raw file columns plus the derived `month`, `day_of_week` and
/// `hour` columns, in file order.
#[derive(Debug, Clone)]
pub struct TripRecordSet {
    city: City,
    frame: DataFrame,
    raw_columns: Vec<String>,
    has_demographics: bool,
}

impl TripRecordSet {
    pub fn city(&self) -> City {
        self.city
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// True when the data carries both gender and birth year columns and the
    /// city publishes them. Washington's are never read.
    pub fn has_demographics(&self) -> bool {
        self.has_demographics
    }

    /// The trips with derived columns removed, as they appear in the file.
    pub fn raw_frame(&self) -> Result<DataFrame, BikeshareError> {
        let df = self
            .frame
            .select(self.raw_columns.iter().map(|c| c.as_str()))?;
        Ok(df)
    }
}

/// Reads the per-city trip files from a data directory.
pub struct DatasetLoader {
    base_path: PathBuf,
}

impl DatasetLoader {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn path_for(&self, city: City) -> PathBuf {
        self.base_path.join(city.file_name())
    }

    /// Load a city's trips and keep those matching the month/day filters.
    ///
    /// Every call reads the file afresh; nothing is cached between runs.
    pub fn load(&self, selection: &FilterSelection) -> Result<TripRecordSet, BikeshareError> {
        let city = selection.city;
        let path = self.path_for(city);
        log::debug!("loading {} trips from {}", city, path.display());

        let raw = read_csv_as_strings(&path).map_err(|source| {
            log::warn!("could not read {}: {source}", path.display());
            BikeshareError::DataUnavailable {
                city: city.to_string(),
                path: path.clone(),
                source,
            }
        })?;

        require_columns(&raw, &trip::REQUIRED)?;

        let raw_columns: Vec<String> = raw
            .get_column_names_str()
            .iter()
            .map(|c| c.to_string())
            .collect();
        let schema = raw.schema();
        let has_demographics = city.expects_demographics()
            && demographics::ALL.iter().all(|c| schema.contains(c));
        let has_birth_year =
            city.expects_demographics() && schema.contains(demographics::BIRTH_YEAR);

        let df = parse_datetime_column(raw, trip::START_TIME, TIMESTAMP_FORMAT)?;
        let df = parse_numeric_columns(df, has_birth_year)?;
        let df = derive_calendar_fields(df)?;
        let total = df.height();
        let frame = apply_filters(df, selection)?;

        log::debug!(
            "{} of {} {} trips match {}",
            frame.height(),
            total,
            city,
            selection
        );

        Ok(TripRecordSet {
            city,
            frame,
            raw_columns,
            has_demographics,
        })
    }
}

// ── Private helpers ─────────────────────────────────────────────────────────

/// Read a CSV file with all columns as String dtype.
/// Trims whitespace from column names.
fn read_csv_as_strings(path: &Path) -> PolarsResult<DataFrame> {
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0)) // all columns as String
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let trimmed: Vec<String> = df
        .get_column_names_str()
        .iter()
        .map(|c| c.trim().to_string())
        .collect();
    df.set_column_names(trimmed.as_slice())?;

    Ok(df)
}

fn require_columns(df: &DataFrame, required: &[&str]) -> Result<(), BikeshareError> {
    for &col_name in required {
        if df.column(col_name).is_err() {
            return Err(BikeshareError::MissingField(col_name.to_string()));
        }
    }
    Ok(())
}

/// Parse a string column to Datetime. Any non-null value that does not
/// match `format` fails the whole load.
fn parse_datetime_column(
    df: DataFrame,
    column: &str,
    format: &str,
) -> Result<DataFrame, BikeshareError> {
    df.lazy()
        .with_columns([col(column)
            .str()
            .strip_chars(lit(" \t\r\n"))
            .str()
            .to_datetime(
                Some(TimeUnit::Microseconds),
                None,
                StrptimeOptions {
                    format: Some(format.into()),
                    strict: true,
                    ..Default::default()
                },
                lit("raise"),
            )])
        .collect()
        .map_err(|e| BikeshareError::Parse(format!("'{column}' values: {e}")))
}

/// Trip duration must be numeric; birth year is lenient (blank or junk → null).
fn parse_numeric_columns(df: DataFrame, has_birth_year: bool) -> Result<DataFrame, BikeshareError> {
    let mut exprs = vec![col(trip::TRIP_DURATION)
        .str()
        .strip_chars(lit(" \t\r\n"))
        .strict_cast(DataType::Float64)];
    if has_birth_year {
        exprs.push(
            col(demographics::BIRTH_YEAR)
                .str()
                .strip_chars(lit(" \t\r\n"))
                .cast(DataType::Float64),
        );
    }

    df.lazy()
        .with_columns(exprs)
        .collect()
        .map_err(|e| BikeshareError::Parse(format!("'{}' values: {e}", trip::TRIP_DURATION)))
}

/// Add month number, weekday name and hour columns from the start time.
fn derive_calendar_fields(df: DataFrame) -> Result<DataFrame, BikeshareError> {
    let start = || col(trip::START_TIME).dt();
    let mut df = df
        .lazy()
        .with_columns([
            start().month().cast(DataType::Int32).alias(derived::MONTH),
            start().weekday().cast(DataType::Int32).alias(WEEKDAY_NUMBER),
            start().hour().cast(DataType::Int32).alias(derived::HOUR),
        ])
        .collect()?;

    let names: Vec<Option<&str>> = df
        .column(WEEKDAY_NUMBER)?
        .i32()?
        .into_iter()
        .map(|n| n.and_then(catalog::iso_weekday_name))
        .collect();
    df.with_column(Series::new(derived::DAY_OF_WEEK.into(), names))?;

    Ok(df.drop(WEEKDAY_NUMBER)?)
}

fn apply_filters(df: DataFrame, selection: &FilterSelection) -> Result<DataFrame, BikeshareError> {
    let mut lazy = df.lazy();

    if let Some(month) = selection.month {
        let number = month.number_from_month() as i32;
        lazy = lazy.filter(col(derived::MONTH).eq(lit(number)));
    }
    if let Some(day) = selection.day {
        lazy = lazy.filter(col(derived::DAY_OF_WEEK).eq(lit(catalog::weekday_name(day))));
    }

    Ok(lazy.collect()?)
}
