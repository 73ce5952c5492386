//! Calendar month bucket key.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SHORT_MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// (year, month) pair. Ordering is chronological.
///
/// The month is always 1-12; deserialization goes through [`MonthKey::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "MonthKeyRepr")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct MonthKeyRepr {
    year: i32,
    month: u32,
}

impl TryFrom<MonthKeyRepr> for MonthKey {
    type Error = String;

    fn try_from(r: MonthKeyRepr) -> Result<Self, Self::Error> {
        MonthKey::new(r.year, r.month).ok_or_else(|| format!("month {} is not in 1..=12", r.month))
    }
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Inverse of [`MonthKey::label`]: `"Jan 2024"` back into a key.
    pub fn from_label(label: &str) -> Option<Self> {
        let (name, year) = label.trim().split_once(' ')?;
        let idx = SHORT_MONTHS_EN.iter().position(|m| *m == name)?;
        let year = year.trim().parse().ok()?;
        Self::new(year, idx as u32 + 1)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1-12
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Zero-based index into a twelve-entry month name table.
    pub(crate) fn index0(&self) -> usize {
        (self.month - 1) as usize
    }

    /// First day of the month.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Display label, e.g. "Jan 2024".
    pub fn label(&self) -> String {
        format!("{} {}", SHORT_MONTHS_EN[self.index0()], self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
