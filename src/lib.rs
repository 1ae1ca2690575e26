//! Interactive explorer for US bikeshare trip data.
//!
//! Loads one city's trips, filters them by month and weekday, prints
//! descriptive statistics and pages through the raw rows on request.

pub mod aggregation;
pub mod catalog;
pub mod error;
pub mod filters;
pub mod model;
pub mod pager;
pub mod prompt;
pub mod records;
pub mod report;
pub mod schema;
pub mod session;

#[cfg(test)]
mod testing;

pub use catalog::{City, FilterSelection};
pub use error::BikeshareError;
pub use model::{DatasetLoader, TripRecordSet};
pub use prompt::Prompter;
pub use session::Session;
