// SPDX-License-Identifier: MPL-2.0
//! Drag state management
//!
//! Tracks a vertical grab-and-drag over the month list. The offset it
//! computes is virtual: it is not clamped to the scrollable range, so
//! pulling past the top yields negative values and pulling past the bottom
//! yields values beyond the maximum scroll. The overscroll detector needs
//! exactly that; the real scrollable only receives the clamped part.

use iced::Point;

/// Manages grab-and-drag state
#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Whether a drag operation is currently active
    pub is_dragging: bool,

    /// Position where the drag started
    pub start_position: Option<Point>,

    /// Vertical scroll offset when the drag started
    pub start_offset: Option<f32>,
}

impl DragState {
    /// Starts a drag operation
    pub fn start(&mut self, position: Point, offset_y: f32) {
        self.is_dragging = true;
        self.start_position = Some(position);
        self.start_offset = Some(offset_y);
    }

    /// Stops the drag operation
    pub fn stop(&mut self) {
        self.is_dragging = false;
        self.start_position = None;
        self.start_offset = None;
    }

    /// Unclamped offset for the cursor at `current_position`.
    ///
    /// Dragging the cursor down pulls the content down, so the offset
    /// decreases (and goes negative past the top).
    #[must_use]
    pub fn virtual_offset(&self, current_position: Point) -> Option<f32> {
        if !self.is_dragging {
            return None;
        }

        let start_pos = self.start_position?;
        let start_offset = self.start_offset?;

        Some(start_offset - (current_position.y - start_pos.y))
    }

    /// Offset to actually scroll the list to, clamped to `[0, max_scroll]`.
    #[must_use]
    pub fn scroll_offset(&self, current_position: Point, max_scroll: f32) -> Option<f32> {
        self.virtual_offset(current_position)
            .map(|offset| offset.clamp(0.0, max_scroll.max(0.0)))
    }
}
