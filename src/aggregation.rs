use std::collections::BTreeMap;

use polars::prelude::*;

use crate::error::BikeshareError;

/// Most frequent value(s) of a column and how often they occur.
///
/// Ties keep every tied value, in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct Mode<T> {
    pub values: Vec<T>,
    pub count: usize,
}

/// Reductions over a Float64 column. Nulls are skipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSummary {
    pub sum: f64,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Mode of the non-null values, or `None` when there are none.
pub fn mode<T: Ord>(values: impl IntoIterator<Item = Option<T>>) -> Option<Mode<T>> {
    let counts = tally(values);
    let count = *counts.values().max()?;
    let values = counts
        .into_iter()
        .filter(|(_, c)| *c == count)
        .map(|(v, _)| v)
        .collect();
    Some(Mode { values, count })
}

/// Every distinct non-null value with its frequency, most frequent first.
pub fn value_counts<T: Ord>(values: impl IntoIterator<Item = Option<T>>) -> Vec<(T, usize)> {
    let mut counts: Vec<(T, usize)> = tally(values).into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn tally<T: Ord>(values: impl IntoIterator<Item = Option<T>>) -> BTreeMap<T, usize> {
    let mut counts = BTreeMap::new();
    for value in values.into_iter().flatten() {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

// ── Column helpers ──────────────────────────────────────────────────────────

pub fn str_mode(df: &DataFrame, column: &str) -> Result<Option<Mode<String>>, BikeshareError> {
    let s = df.column(column)?.str()?;
    Ok(mode(s.into_iter().map(|v| v.map(str::to_string))))
}

pub fn int_mode(df: &DataFrame, column: &str) -> Result<Option<Mode<i32>>, BikeshareError> {
    let s = df.column(column)?.i32()?;
    Ok(mode(s.into_iter()))
}

pub fn str_value_counts(
    df: &DataFrame,
    column: &str,
) -> Result<Vec<(String, usize)>, BikeshareError> {
    let s = df.column(column)?.str()?;
    Ok(value_counts(s.into_iter().map(|v| v.map(str::to_string))))
}

/// Mode of a Float64 column over the exact values. Nulls are skipped.
pub fn float_mode(df: &DataFrame, column: &str) -> Result<Option<Mode<f64>>, BikeshareError> {
    let s = df.column(column)?.f64()?;
    let m = mode(s.into_iter().map(|v| v.map(TotalF64)));
    Ok(m.map(|m| Mode {
        values: m.values.into_iter().map(|v| v.0).collect(),
        count: m.count,
    }))
}

/// `f64` ordered by `total_cmp` so it can be tallied.
#[derive(Debug, Clone, Copy)]
struct TotalF64(f64);

impl PartialEq for TotalF64 {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0).is_eq()
    }
}

impl Eq for TotalF64 {}

impl PartialOrd for TotalF64 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TotalF64 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

pub fn summarize(df: &DataFrame, column: &str) -> Result<NumericSummary, BikeshareError> {
    let s = df.column(column)?.as_materialized_series();

    let sum = s
        .sum_reduce()?
        .value()
        .try_extract::<f64>()
        .unwrap_or(0.0);
    let mean = s.mean_reduce().value().try_extract::<f64>().ok();
    let min = s.min_reduce()?.value().try_extract::<f64>().ok();
    let max = s.max_reduce()?.value().try_extract::<f64>().ok();

    Ok(NumericSummary {
        sum,
        mean,
        min,
        max,
    })
}
