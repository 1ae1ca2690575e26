/// Column-name constants for the bikeshare trip files.
/// Single source of truth for the loader, reporters and pager.

// ── Raw trip columns ────────────────────────────────────────────────────────
pub mod trip {
    pub const START_TIME: &str = "Start Time";
    pub const TRIP_DURATION: &str = "Trip Duration";
    pub const START_STATION: &str = "Start Station";
    pub const END_STATION: &str = "End Station";
    pub const USER_TYPE: &str = "User Type";

    pub const REQUIRED: [&str; 5] = [
        START_TIME,
        TRIP_DURATION,
        START_STATION,
        END_STATION,
        USER_TYPE,
    ];
}

// ── Demographic columns (not in every city) ─────────────────────────────────
pub mod demographics {
    pub const GENDER: &str = "Gender";
    pub const BIRTH_YEAR: &str = "Birth Year";

    pub const ALL: [&str; 2] = [GENDER, BIRTH_YEAR];
}

// ── Columns derived from Start Time ─────────────────────────────────────────
pub mod derived {
    pub const MONTH: &str = "month";
    pub const DAY_OF_WEEK: &str = "day_of_week";
    pub const HOUR: &str = "hour";

    pub const ALL: [&str; 3] = [MONTH, DAY_OF_WEEK, HOUR];
}

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
