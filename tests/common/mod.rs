#![allow(dead_code)]

use std::fmt::Write;
use std::fs;
use std::path::Path;

use bikeshare::City;
use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the bikeshare binary.
#[macro_export]
macro_rules! bikeshare {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("bikeshare"))
    };
}

const HEADER: &str = "Start Time,End Time,Trip Duration,Start Station,End Station,User Type";
const DEMOGRAPHIC_HEADER: &str = ",Gender,Birth Year";

const STATIONS: [&str; 4] = [
    "Clark St & Lake St",
    "Wells St & Elm St",
    "Canal St & Adams St",
    "Streeter Dr & Grand Ave",
];

/// A temp directory holding synthetic trip files for every city.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Fixture with a generated file for each of the three cities.
    pub fn with_all_cities() -> Self {
        let fixture = Self::new();
        for city in City::ALL {
            fixture.create_file(city.file_name(), &generated_trips(city));
        }
        fixture
    }

    pub fn create_file(&self, relative_path: &str, content: &str) {
        fs::write(self.dir.path().join(relative_path), content).expect("Failed to write file");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// One trip every 29 hours from New Year 2017 through June, so every
/// month, weekday and most hours are represented.
pub fn generated_trips(city: City) -> String {
    let mut csv = String::from(HEADER);
    if city.expects_demographics() {
        csv.push_str(DEMOGRAPHIC_HEADER);
    }
    csv.push('\n');

    let start = chrono::NaiveDate::from_ymd_opt(2017, 1, 1)
        .unwrap()
        .and_hms_opt(0, 30, 0)
        .unwrap();
    let end_of_june = chrono::NaiveDate::from_ymd_opt(2017, 7, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let mut i = 0usize;
    loop {
        let started = start + chrono::Duration::hours(29 * i as i64);
        if started >= end_of_june {
            break;
        }
        let duration = 60 + (i % 17) * 45;
        let ended = started + chrono::Duration::seconds(duration as i64);
        let _ = write!(
            csv,
            "{},{},{},{},{},{}",
            started.format("%Y-%m-%d %H:%M:%S"),
            ended.format("%Y-%m-%d %H:%M:%S"),
            duration,
            STATIONS[i % 4],
            STATIONS[(i / 4) % 4],
            if i % 3 == 0 { "Customer" } else { "Subscriber" },
        );
        if city.expects_demographics() {
            let gender = match i % 5 {
                0 => "",
                1 | 2 => "Female",
                _ => "Male",
            };
            let birth_year = if i % 5 == 0 {
                String::new()
            } else {
                format!("{}.0", 1950 + (i % 50))
            };
            let _ = write!(csv, ",{gender},{birth_year}");
        }
        csv.push('\n');
        i += 1;
    }
    csv
}
