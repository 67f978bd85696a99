// SPDX-License-Identifier: MPL-2.0
//! `iced_calendar` is a month calendar built with the Iced GUI framework.
//!
//! The grid zooms continuously under a pinch (or Ctrl + wheel) across three
//! display modes, and dragging past either edge of the grid pages to the
//! previous or next month.

#![doc(html_root_url = "https://docs.rs/iced_calendar/0.1.0")]

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
