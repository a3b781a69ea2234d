use chrono::{Datelike, NaiveDateTime};

/// Calendar-month bucket. Two timestamps land in the same period iff they
/// share year and month, independent of day and time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn from_datetime(timestamp: NaiveDateTime) -> Self {
        Self {
            year: timestamp.year(),
            month: timestamp.month(),
        }
    }

    /// Whole months elapsed since `earlier`. Negative when `self` is the
    /// earlier of the two.
    pub fn months_since(self, earlier: Period) -> i64 {
        i64::from(self.year - earlier.year) * 12 + i64::from(self.month)
            - i64::from(earlier.month)
    }

    pub fn label(self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}
