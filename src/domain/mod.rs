// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core calendar logic with no UI dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! Besides `std` it only relies on `chrono` for date arithmetic, so it stays
//! testable without the UI stack.
//!
//! # Modules
//!
//! - [`calendar`]: Month navigation ([`CalendarMonth`](calendar::CalendarMonth),
//!   [`CalendarState`](calendar::CalendarState)) and the day grid
//!   ([`DayGrid`](calendar::DayGrid), [`CalendarItem`](calendar::CalendarItem))

pub mod calendar;
