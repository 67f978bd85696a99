// SPDX-License-Identifier: MPL-2.0
//! Shared test helpers.
//!
//! Float assertions come from `approx`; zoom heights and multipliers are
//! `f32`, so exact `assert_eq!` only holds at the piecewise endpoints.

pub use approx::assert_abs_diff_eq;

use chrono::NaiveDate;

/// Builds a date, panicking on an invalid triple.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}
