//! Fixture data directories for unit tests.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::catalog::{City, FilterSelection};
use crate::model::{DatasetLoader, TripRecordSet};

/// Seven Chicago trips, January to June 2017, no Tuesdays.
///
/// Engineered aggregates: March and Friday are modal (3 each), 17h is the
/// modal hour (4), birth years 1985 and 1992 tie (2 each), one rider has
/// no gender or birth year.
pub(crate) const CHICAGO_ROWS: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
2017-01-01 09:07:57,2017-01-01 09:20:53,776,Clark St & Lake St,Wells St & Elm St,Subscriber,Male,1992.0
2017-01-06 17:30:00,2017-01-06 17:35:00,300,Clark St & Lake St,Canal St & Adams St,Subscriber,Female,1985.0
2017-03-03 17:05:00,2017-03-03 17:15:00,600,Streeter Dr & Grand Ave,Wells St & Elm St,Customer,,
2017-03-10 17:45:00,2017-03-10 17:52:30,450,Clark St & Lake St,Wells St & Elm St,Subscriber,Male,1992.0
2017-03-05 08:15:00,2017-03-05 08:35:00,1200,Streeter Dr & Grand Ave,Streeter Dr & Grand Ave,Customer,Female,1970.0
2017-06-07 17:10:00,2017-06-07 17:25:00,900,Canal St & Adams St,Clark St & Lake St,Subscriber,Male,1985.0
2017-05-01 07:55:00,2017-05-01 08:01:00,360,Canal St & Adams St,Wells St & Elm St,Subscriber,Male,2001.0
";

/// Washington publishes no demographic columns.
pub(crate) const WASHINGTON_ROWS: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-02-01 08:00:00,2017-02-01 08:10:00,10,Union Station,Lincoln Memorial,Subscriber
2017-02-02 08:00:00,2017-02-02 08:10:00,20,Union Station,Lincoln Memorial,Subscriber
2017-02-03 18:00:00,2017-02-03 18:10:00,30,Lincoln Memorial,Union Station,Customer
";

pub(crate) struct DataDir {
    dir: TempDir,
}

impl DataDir {
    pub(crate) fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub(crate) fn with_city(city: City, csv: &str) -> Self {
        let dir = Self::empty();
        dir.write(city, csv);
        dir
    }

    pub(crate) fn write(&self, city: City, csv: &str) {
        fs::write(self.dir.path().join(city.file_name()), csv).expect("Failed to write file");
    }

    pub(crate) fn path(&self) -> &Path {
        self.dir.path()
    }

    pub(crate) fn load(&self, selection: FilterSelection) -> TripRecordSet {
        DatasetLoader::new(self.path())
            .load(&selection)
            .expect("fixture should load")
    }
}
