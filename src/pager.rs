use std::io::{BufRead, Write};

use polars::prelude::DataFrame;

use crate::error::BikeshareError;
use crate::model::TripRecordSet;
use crate::prompt::Prompter;
use crate::records;

pub const PAGE_SIZE: usize = 5;

const PAGE_QUESTION: &str = "\nWould you like to view the data for the next five trips? Enter yes or no.\n";

/// Cursor over raw trip rows, five at a time.
pub struct RawPager {
    rows: DataFrame,
    cursor: usize,
}

impl RawPager {
    pub fn new(rows: DataFrame) -> Self {
        Self { rows, cursor: 0 }
    }

    /// The next page. Past the end this is an empty frame, not an error.
    pub fn next_page(&mut self) -> DataFrame {
        let page = self.rows.slice(self.cursor as i64, PAGE_SIZE);
        self.cursor += PAGE_SIZE;
        page
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

/// Reveal pages for as long as the user answers "yes".
pub fn page_raw_data<R: BufRead, W: Write>(
    trips: &TripRecordSet,
    prompter: &mut Prompter<R, W>,
) -> Result<(), BikeshareError> {
    let mut pager = RawPager::new(trips.raw_frame()?);

    while prompter.confirm(PAGE_QUESTION)? {
        let page = pager.next_page();
        prompter.say(&records::records_to_json(&page)?)?;
    }
    prompter.say(&"=".repeat(40))
}
