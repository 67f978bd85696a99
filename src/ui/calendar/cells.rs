// SPDX-License-Identifier: MPL-2.0
//! Per-mode cell rendering strategies.
//!
//! Each display mode has a strategy that turns the current
//! [`DisplaySnapshot`] into concrete cell measurements and decides which of
//! a day's items fit. The grid view picks one strategy per frame through
//! [`strategy_for`] and never looks at the raw zoom value itself.

use crate::domain::calendar::CalendarItem;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::state::zoom::{DisplayMode, DisplaySnapshot};

/// Line height relative to font size.
const LINE_HEIGHT: f32 = 1.3;

/// Dots shown side by side in a compact cell.
const COMPACT_MAX_DOTS: usize = 3;

/// How a cell draws each visible item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemMarker {
    /// Round colored dot in a row.
    Dot,
    /// Full-width colored bar.
    Bar,
    /// Accent stripe followed by the item title.
    TitledRow,
}

/// Concrete measurements of one day cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellLayout {
    /// Height of a grid row (the displayed unified height).
    pub row_height: f32,
    pub day_font_size: f32,
    /// Height of one item marker (dot, bar or titled row).
    pub item_height: f32,
    pub title_font_size: f32,
    /// How many items fit before the rest collapse into an overflow count.
    pub max_items: usize,
    pub marker: ItemMarker,
}

/// Items a cell shows plus how many were left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellContent<'a> {
    pub visible: &'a [CalendarItem],
    pub overflow: usize,
}

pub trait CellStrategy: Sync {
    fn mode(&self) -> DisplayMode;

    fn layout(&self, snapshot: &DisplaySnapshot) -> CellLayout;

    fn content<'a>(&self, layout: &CellLayout, items: &'a [CalendarItem]) -> CellContent<'a> {
        let shown = items.len().min(layout.max_items);
        CellContent {
            visible: &items[..shown],
            overflow: items.len() - shown,
        }
    }
}

/// Rows of height `item_height` fitting under the day number.
fn rows_that_fit(row_height: f32, day_font_size: f32, item_height: f32) -> usize {
    let available = row_height - day_font_size * LINE_HEIGHT - spacing::XS * 2.0;
    let pitch = item_height + spacing::XXS;
    let rows = ((available + spacing::XXS) / pitch).floor();
    if rows.is_finite() && rows >= 1.0 {
        // Bounded by row height / item height, far below usize::MAX.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rows = rows as usize;
        rows
    } else {
        1
    }
}

/// Day number with up to three colored dots.
#[derive(Debug, Clone, Copy)]
pub struct CompactCell;

impl CellStrategy for CompactCell {
    fn mode(&self) -> DisplayMode {
        DisplayMode::Compact
    }

    fn layout(&self, snapshot: &DisplaySnapshot) -> CellLayout {
        let m = snapshot.multiplier;
        CellLayout {
            row_height: snapshot.height.value(),
            day_font_size: typography::DAY_NUMBER * m,
            item_height: sizing::ITEM_DOT * m,
            title_font_size: 0.0,
            max_items: COMPACT_MAX_DOTS,
            marker: ItemMarker::Dot,
        }
    }
}

/// Day number with stacked colored bars.
#[derive(Debug, Clone, Copy)]
pub struct StackedCell;

impl CellStrategy for StackedCell {
    fn mode(&self) -> DisplayMode {
        DisplayMode::Stacked
    }

    fn layout(&self, snapshot: &DisplaySnapshot) -> CellLayout {
        let m = snapshot.multiplier;
        let row_height = snapshot.height.value();
        let day_font_size = typography::DAY_NUMBER * m;
        let item_height = sizing::ITEM_BAR * m;
        CellLayout {
            row_height,
            day_font_size,
            item_height,
            title_font_size: 0.0,
            max_items: rows_that_fit(row_height, day_font_size, item_height),
            marker: ItemMarker::Bar,
        }
    }
}

/// Day number with one titled row per item.
#[derive(Debug, Clone, Copy)]
pub struct DetailedCell;

impl CellStrategy for DetailedCell {
    fn mode(&self) -> DisplayMode {
        DisplayMode::Detailed
    }

    fn layout(&self, snapshot: &DisplaySnapshot) -> CellLayout {
        let m = snapshot.multiplier;
        let row_height = snapshot.height.value();
        let day_font_size = typography::DAY_NUMBER * m;
        let item_height = sizing::ITEM_ROW * m;
        CellLayout {
            row_height,
            day_font_size,
            item_height,
            title_font_size: typography::ITEM_TITLE * m,
            max_items: rows_that_fit(row_height, day_font_size, item_height),
            marker: ItemMarker::TitledRow,
        }
    }
}

/// Strategy rendering cells in `mode`.
#[must_use]
pub fn strategy_for(mode: DisplayMode) -> &'static dyn CellStrategy {
    match mode {
        DisplayMode::Compact => &CompactCell,
        DisplayMode::Stacked => &StackedCell,
        DisplayMode::Detailed => &DetailedCell,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::ItemKind;
    use crate::test_utils::{assert_abs_diff_eq, date};
    use crate::ui::state::zoom::UnifiedHeight;

    fn snapshot(height: f32) -> DisplaySnapshot {
        DisplaySnapshot::of(UnifiedHeight::new(height))
    }

    fn items(count: usize) -> Vec<CalendarItem> {
        (0..count)
            .map(|i| CalendarItem::new(date(2024, 6, 8), format!("Item {i}"), ItemKind::Event))
            .collect()
    }

    #[test]
    fn dispatch_matches_mode() {
        for mode in DisplayMode::ALL {
            assert_eq!(strategy_for(mode).mode(), mode);
        }
    }

    #[test]
    fn row_height_follows_displayed_height() {
        for height in [40.0, 64.0, 72.0, 80.0, 160.0] {
            let snapshot = snapshot(height);
            let layout = strategy_for(snapshot.mode).layout(&snapshot);
            assert_eq!(layout.row_height, height);
        }
    }

    #[test]
    fn marker_follows_display_mode() {
        for (height, marker) in [
            (50.0, ItemMarker::Dot),
            (64.0, ItemMarker::Bar),
            (79.9, ItemMarker::Bar),
            (80.0, ItemMarker::TitledRow),
        ] {
            let snapshot = snapshot(height);
            assert_eq!(strategy_for(snapshot.mode).layout(&snapshot).marker, marker);
        }
    }

    #[test]
    fn text_scales_with_multiplier() {
        let small = DetailedCell.layout(&snapshot(80.0));
        let large = DetailedCell.layout(&snapshot(160.0));
        assert_abs_diff_eq!(small.day_font_size, 9.0, epsilon = 1e-4);
        assert_abs_diff_eq!(large.day_font_size, 24.0, epsilon = 1e-4);
        assert!(large.item_height > small.item_height);
    }

    #[test]
    fn compact_shows_three_dots_then_overflow() {
        let layout = CompactCell.layout(&snapshot(48.0));
        let items = items(5);
        let content = CompactCell.content(&layout, &items);
        assert_eq!(content.visible.len(), 3);
        assert_eq!(content.overflow, 2);
    }

    #[test]
    fn detailed_fits_at_least_one_row() {
        for height in [80.0, 100.0, 130.0, 160.0] {
            let layout = DetailedCell.layout(&snapshot(height));
            assert!(layout.max_items >= 1, "no rows at {height}");
        }
    }

    #[test]
    fn few_items_have_no_overflow() {
        let layout = StackedCell.layout(&snapshot(72.0));
        let items = items(1);
        let content = StackedCell.content(&layout, &items);
        assert_eq!(content.visible.len(), 1);
        assert_eq!(content.overflow, 0);
    }

    #[test]
    fn empty_day_is_empty() {
        let layout = DetailedCell.layout(&snapshot(100.0));
        let content = DetailedCell.content(&layout, &[]);
        assert!(content.visible.is_empty());
        assert_eq!(content.overflow, 0);
    }
}
