// SPDX-License-Identifier: MPL-2.0
//! Design tokens for the calendar screen.
//!
//! - **Palette**: Base colors, including one hue per item kind
//! - **Opacity**: Standardized opacity levels
//! - **Spacing**: Spacing scale (4px grid)
//! - **Typography**: Font size scale; cell text scales from these bases
//! - **Radius**: Border radii

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    // Grayscale
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_900: Color = Color::from_rgb(0.1, 0.1, 0.1);
    pub const GRAY_700: Color = Color::from_rgb(0.3, 0.3, 0.3);
    pub const GRAY_400: Color = Color::from_rgb(0.4, 0.4, 0.4);
    pub const GRAY_200: Color = Color::from_rgb(0.75, 0.75, 0.75);
    pub const GRAY_100: Color = Color::from_rgb(0.85, 0.85, 0.85);

    // Brand colors (blue scale)
    pub const PRIMARY_400: Color = Color::from_rgb(0.4, 0.7, 1.0);
    pub const PRIMARY_500: Color = Color::from_rgb(0.3, 0.6, 0.9);
    pub const PRIMARY_600: Color = Color::from_rgb(0.2, 0.5, 0.8);

    // Item kinds
    pub const EVENT: Color = Color::from_rgb(0.392, 0.588, 1.0);
    pub const BIRTHDAY: Color = Color::from_rgb(0.945, 0.651, 0.125);
    pub const WORK_SHIFT: Color = Color::from_rgb(0.263, 0.702, 0.404);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OPAQUE: f32 = 1.0;
}

// ============================================================================
// Spacing Scale
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 2.0;
    pub const XS: f32 = 4.0;
    pub const SM: f32 = 8.0;
    pub const MD: f32 = 12.0;
    pub const LG: f32 = 16.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    /// Month title in the header
    pub const TITLE_MD: f32 = 20.0;

    /// Buttons, weekday headers
    pub const BODY: f32 = 14.0;

    /// Day number at multiplier 1.0
    pub const DAY_NUMBER: f32 = 12.0;

    /// Item title at multiplier 1.0
    pub const ITEM_TITLE: f32 = 10.0;
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    /// Diameter of a compact item dot at multiplier 1.0
    pub const ITEM_DOT: f32 = 5.0;

    /// Height of a stacked item bar at multiplier 1.0
    pub const ITEM_BAR: f32 = 4.0;

    /// Height of a detailed item row at multiplier 1.0
    pub const ITEM_ROW: f32 = 13.0;

    /// Height of the pull indicator strips above and below the grid
    pub const PULL_INDICATOR: f32 = 28.0;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const SM: f32 = 2.0;
    pub const MD: f32 = 4.0;
    pub const FULL: f32 = 9999.0; // Pill shape
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);
    assert!(opacity::OVERLAY_MEDIUM > 0.0 && opacity::OVERLAY_MEDIUM < 1.0);

    assert!(typography::TITLE_MD > typography::BODY);
    assert!(typography::DAY_NUMBER > typography::ITEM_TITLE);

    assert!(sizing::ITEM_ROW > sizing::ITEM_DOT);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_scale_is_consistent() {
        assert_eq!(spacing::SM, spacing::XS * 2.0);
        assert_eq!(spacing::LG, spacing::SM * 2.0);
    }
}
