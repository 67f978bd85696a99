// SPDX-License-Identifier: MPL-2.0
//! Calendar domain: months, selection and the day grid.

pub mod grid;
pub mod month;

pub use grid::{demo_items, weekday_labels, CalendarItem, DayCell, DayGrid, DayItems, ItemKind};
pub use month::{CalendarMonth, CalendarState, ParseMonthError};
