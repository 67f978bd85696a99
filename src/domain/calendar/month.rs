// SPDX-License-Identifier: MPL-2.0
//! Visible month and day selection.

use chrono::{Datelike, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// A calendar month, `month` is zero-based (0 = January, 11 = December).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

impl CalendarMonth {
    /// Returns `None` when `month` is not in `0..=11` or the year is outside
    /// what `chrono` can represent.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if month > 11 {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month + 1, 1).map(|_| Self { year, month })
    }

    /// Month containing `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.year
    }

    /// Zero-based month index.
    #[must_use]
    pub fn month(self) -> u32 {
        self.month
    }

    /// The month before, wrapping January to December of the previous year.
    #[must_use]
    pub fn previous(self) -> Self {
        if self.month == 0 {
            Self {
                year: self.year - 1,
                month: 11,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The month after, wrapping December to January of the next year.
    #[must_use]
    pub fn next(self) -> Self {
        if self.month == 11 {
            Self {
                year: self.year + 1,
                month: 0,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// First day of the month.
    ///
    /// Falls back to the epoch date for years `chrono` cannot represent,
    /// which only paging far past year 262143 can reach.
    #[must_use]
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1).unwrap_or_default()
    }

    /// Number of days in the month.
    #[must_use]
    pub fn days_in_month(self) -> u32 {
        let first = self.first_day();
        first
            .checked_add_months(Months::new(1))
            .map_or(31, |next| {
                u32::try_from(next.signed_duration_since(first).num_days()).unwrap_or(31)
            })
    }

    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_day().format("%B %Y"))
    }
}

/// Error for a `YYYY-MM` string that does not name a month.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected YYYY-MM, got '{0}'")]
pub struct ParseMonthError(String);

impl FromStr for CalendarMonth {
    type Err = ParseMonthError;

    /// Parses `YYYY-MM` with a one-based month.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMonthError(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(err)?;
        let year: i32 = year.parse().map_err(|_| err())?;
        let month: u32 = month.parse().map_err(|_| err())?;
        month
            .checked_sub(1)
            .and_then(|month0| Self::new(year, month0))
            .ok_or_else(err)
    }
}

/// Visible month plus the selected day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarState {
    visible: CalendarMonth,
    selected: NaiveDate,
}

impl CalendarState {
    /// Opens on the month containing `today` with `today` selected.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            visible: CalendarMonth::from_date(today),
            selected: today,
        }
    }

    /// Opens on `month`, selecting `today` if it falls inside, else the 1st.
    #[must_use]
    pub fn starting_at(month: CalendarMonth, today: NaiveDate) -> Self {
        let selected = if month.contains(today) {
            today
        } else {
            month.first_day()
        };
        Self {
            visible: month,
            selected,
        }
    }

    #[must_use]
    pub fn visible(&self) -> CalendarMonth {
        self.visible
    }

    #[must_use]
    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    /// Shows the previous month and selects its 1st.
    pub fn go_previous(&mut self) {
        self.show(self.visible.previous());
    }

    /// Shows the next month and selects its 1st.
    pub fn go_next(&mut self) {
        self.show(self.visible.next());
    }

    /// Jumps back to the month of `today` with `today` selected.
    pub fn go_to_today(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }

    /// Selects `date`, following it into its month if it lies outside the
    /// visible one.
    pub fn select(&mut self, date: NaiveDate) {
        if !self.visible.contains(date) {
            self.visible = CalendarMonth::from_date(date);
        }
        self.selected = date;
    }

    fn show(&mut self, month: CalendarMonth) {
        self.visible = month;
        self.selected = month.first_day();
    }
}
