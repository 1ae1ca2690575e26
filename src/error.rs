use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BikeshareError {
    #[error("Data for {city} is unavailable ({}): {source}", .path.display())]
    DataUnavailable {
        city: String,
        path: PathBuf,
        #[source]
        source: polars::error::PolarsError,
    },

    #[error("Could not parse {0}")]
    Parse(String),

    #[error("Missing column: {0}")]
    MissingField(String),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input closed")]
    InputClosed,
}

impl BikeshareError {
    /// Errors that abort one pass of the pipeline but leave the session usable.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::DataUnavailable { .. } | Self::Parse(_) | Self::MissingField(_) | Self::Polars(_)
        )
    }
}
