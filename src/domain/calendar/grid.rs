// SPDX-License-Identifier: MPL-2.0
//! Month day grid and the items shown inside it.
//!
//! Items arrive pre-fetched; this module only lays them out per day.

use super::month::CalendarMonth;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::collections::BTreeMap;

/// Category of a calendar entry, which decides its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Event,
    Birthday,
    WorkShift,
}

/// One pre-fetched entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarItem {
    pub date: NaiveDate,
    pub title: String,
    pub kind: ItemKind,
}

impl CalendarItem {
    pub fn new(date: NaiveDate, title: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            date,
            title: title.into(),
            kind,
        }
    }
}

/// Items grouped by day, in insertion order within a day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayItems(BTreeMap<NaiveDate, Vec<CalendarItem>>);

impl DayItems {
    #[must_use]
    pub fn group(items: impl IntoIterator<Item = CalendarItem>) -> Self {
        let mut by_day: BTreeMap<NaiveDate, Vec<CalendarItem>> = BTreeMap::new();
        for item in items {
            by_day.entry(item.date).or_default().push(item);
        }
        Self(by_day)
    }

    /// Items on `date`, empty if none.
    #[must_use]
    pub fn on(&self, date: NaiveDate) -> &[CalendarItem] {
        self.0.get(&date).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A single day slot in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for leading/trailing days borrowed from adjacent months.
    pub in_month: bool,
    pub is_today: bool,
}

/// Whole weeks covering a month, seven cells per row.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGrid {
    month: CalendarMonth,
    weeks: Vec<[DayCell; 7]>,
}

impl DayGrid {
    /// Lays out `month` in rows starting on `week_start`.
    #[must_use]
    pub fn build(month: CalendarMonth, week_start: Weekday, today: NaiveDate) -> Self {
        let first = month.first_day();
        let lead = u64::from(first.weekday().days_since(week_start));
        let total = lead + u64::from(month.days_in_month());
        let week_count = total.div_ceil(7);

        let origin = first.checked_sub_days(Days::new(lead)).unwrap_or(first);
        let weeks = (0..week_count)
            .map(|week| {
                std::array::from_fn(|weekday| {
                    let offset = week * 7 + weekday as u64;
                    let date = origin
                        .checked_add_days(Days::new(offset))
                        .unwrap_or(origin);
                    DayCell {
                        date,
                        in_month: month.contains(date),
                        is_today: date == today,
                    }
                })
            })
            .collect();

        Self { month, weeks }
    }

    #[must_use]
    pub fn month(&self) -> CalendarMonth {
        self.month
    }

    #[must_use]
    pub fn weeks(&self) -> &[[DayCell; 7]] {
        &self.weeks
    }

    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flatten()
    }
}

/// Column headers for a week starting on `week_start`.
#[must_use]
pub fn weekday_labels(week_start: Weekday) -> [&'static str; 7] {
    let mut day = week_start;
    std::array::from_fn(|_| {
        let label = match day {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        };
        day = day.succ();
        label
    })
}

/// Sample entries for `month`, used while no data source is wired in.
#[must_use]
pub fn demo_items(month: CalendarMonth) -> Vec<CalendarItem> {
    const SAMPLES: [(u32, &str, ItemKind); 12] = [
        (2, "Team sync", ItemKind::Event),
        (2, "Early shift", ItemKind::WorkShift),
        (5, "Dentist", ItemKind::Event),
        (8, "Sam's birthday", ItemKind::Birthday),
        (8, "Dinner with Sam", ItemKind::Event),
        (8, "Late shift", ItemKind::WorkShift),
        (8, "Gift pickup", ItemKind::Event),
        (14, "Night shift", ItemKind::WorkShift),
        (17, "Planning review", ItemKind::Event),
        (21, "Alex's birthday", ItemKind::Birthday),
        (24, "Early shift", ItemKind::WorkShift),
        (28, "Book club", ItemKind::Event),
    ];

    let first = month.first_day();
    SAMPLES
        .iter()
        .filter_map(|&(day, title, kind)| {
            first
                .with_day(day)
                .map(|date| CalendarItem::new(date, title, kind))
        })
        .collect()
}
