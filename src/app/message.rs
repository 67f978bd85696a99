// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::domain::calendar::CalendarMonth;
use crate::ui::calendar::component;

/// Top-level messages consumed by `App::update`. The calendar forwards its
/// own messages through [`Message::Calendar`].
#[derive(Debug, Clone)]
pub enum Message {
    Calendar(component::Message),
    /// A zoom write job finished (errors are already logged).
    ZoomSaved,
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Month shown on startup instead of the current one.
    pub month: Option<CalendarMonth>,
    /// Optional data directory override (for the zoom state file).
    /// Takes precedence over `ICED_CALENDAR_DATA_DIR` environment variable.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `ICED_CALENDAR_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
