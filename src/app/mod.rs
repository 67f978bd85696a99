// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration around the calendar component.
//!
//! The `App` struct wires the calendar to its collaborators (zoom
//! persistence, haptics, preferences) and translates the component's
//! [`Effect`](component::Effect)s into side effects.

mod message;
pub mod paths;
pub mod persisted_state;
pub mod persistence;
mod subscription;
mod view;

pub use message::{Flags, Message};

use crate::config::{self, Config};
use crate::domain::calendar::{demo_items, CalendarMonth};
use crate::ui::calendar::component::{self, Effect};
use crate::ui::haptics::{Haptics, LogHaptics, NoHaptics};
use crate::ui::theming::{ColorScheme, ThemeMode};
use chrono::NaiveDate;
use iced::{window, Element, Subscription, Task, Theme};
use persisted_state::{FileStore, KeyValueStore, MemoryStore};
use persistence::ZoomPersistence;
use std::fmt;
use std::sync::Arc;

/// Root Iced application state.
pub struct App {
    calendar: component::State,
    persistence: ZoomPersistence,
    haptics: Arc<dyn Haptics>,
    theme_mode: ThemeMode,
    colors: ColorScheme,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("month", &self.calendar.calendar().visible())
            .field("display", &self.calendar.display())
            .field("theme_mode", &self.theme_mode)
            .finish_non_exhaustive()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 760;
pub const WINDOW_DEFAULT_WIDTH: u32 = 900;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 560;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a `Fn` boot closure; flags are consumed only once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Opens the zoom store, falling back to an in-memory one when no data
/// directory is available.
fn open_store() -> Arc<dyn KeyValueStore> {
    match FileStore::open(None) {
        Some(store) => {
            tracing::debug!(path = %store.path().display(), "using state file");
            Arc::new(store)
        }
        None => {
            tracing::warn!("no data directory available; zoom level will not persist");
            Arc::new(MemoryStore::new())
        }
    }
}

impl App {
    /// Initializes application state and starts reading the stored zoom
    /// level.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        if let Some(warning) = config_warning {
            tracing::warn!(%warning, "using default settings");
        }

        let haptics: Arc<dyn Haptics> = if config.gestures.haptics {
            Arc::new(LogHaptics)
        } else {
            Arc::new(NoHaptics)
        };
        let today = chrono::Local::now().date_naive();

        App::with_parts(&config, open_store(), haptics, today, flags.month)
    }

    /// Builds the app from explicit collaborators.
    ///
    /// The returned task resolves the stored zoom level into
    /// [`component::Message::ZoomLoaded`].
    pub fn with_parts(
        config: &Config,
        store: Arc<dyn KeyValueStore>,
        haptics: Arc<dyn Haptics>,
        today: NaiveDate,
        initial_month: Option<CalendarMonth>,
    ) -> (Self, Task<Message>) {
        let persistence = ZoomPersistence::new(store);
        let load = persistence.load();
        let theme_mode = config.general.theme_mode;

        let mut calendar = component::State::new(
            today,
            initial_month,
            config.calendar.week_start,
            config.gestures.animations,
        );
        calendar.set_items(demo_items(calendar.calendar().visible()));

        let app = App {
            calendar,
            persistence,
            haptics,
            theme_mode,
            colors: theme_mode.colors(),
        };

        let task = Task::perform(load, |height| {
            Message::Calendar(component::Message::ZoomLoaded(height))
        });
        (app, task)
    }

    #[must_use]
    pub fn calendar(&self) -> &component::State {
        &self.calendar
    }

    #[must_use]
    pub fn persistence(&self) -> &ZoomPersistence {
        &self.persistence
    }

    fn title(&self) -> String {
        format!("{} - Iced Calendar", self.calendar.calendar().visible())
    }

    fn theme(&self) -> Theme {
        self.theme_mode.iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription();
        let tick_sub = subscription::create_tick_subscription(self.calendar.needs_ticks());
        Subscription::batch([event_sub, tick_sub])
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Calendar(message) => {
                if let component::Message::ZoomLoaded(height) = &message {
                    if !self.calendar.is_zoom_loaded() {
                        self.persistence.mark_loaded(*height);
                    }
                }
                let (effect, task) = self.calendar.handle_message(message);
                let effect_task = self.apply_effect(effect);
                Task::batch([task.map(Message::Calendar), effect_task])
            }
            Message::ZoomSaved => Task::none(),
        }
    }

    fn apply_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::None => Task::none(),
            Effect::ZoomReleased {
                mode_changed,
                settled,
            } => {
                self.haptics.light_impact();
                if mode_changed {
                    self.haptics.selection_changed();
                }
                settled.map_or_else(Task::none, |height| self.persist_zoom(height))
            }
            Effect::PersistZoom(height) => self.persist_zoom(height),
            Effect::MonthChanged(month) => {
                tracing::debug!(%month, "visible month changed");
                // Sample data stands in for a fetch of the new month.
                self.calendar.set_items(demo_items(month));
                Task::none()
            }
        }
    }

    fn persist_zoom(&mut self, height: crate::ui::state::zoom::UnifiedHeight) -> Task<Message> {
        match self.persistence.save(height) {
            Some(job) => {
                tracing::debug!(height = height.value(), "saving zoom level");
                Task::perform(job, |()| Message::ZoomSaved)
            }
            None => Task::none(),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            calendar: &self.calendar,
            colors: &self.colors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;
    use crate::ui::haptics::CountingHaptics;
    use crate::ui::state::zoom::{DisplayMode, UnifiedHeight};

    fn app_with(haptics: Arc<CountingHaptics>) -> App {
        let (mut app, _task) = App::with_parts(
            &Config::default(),
            Arc::new(MemoryStore::new()),
            haptics,
            date(2024, 6, 9),
            None,
        );
        let _ = app.update(Message::Calendar(component::Message::ZoomLoaded(None)));
        app
    }

    #[test]
    fn boot_waits_for_stored_zoom() {
        let (app, _task) = App::with_parts(
            &Config::default(),
            Arc::new(MemoryStore::new()),
            Arc::new(NoHaptics),
            date(2024, 6, 9),
            CalendarMonth::new(2025, 0),
        );
        assert!(!app.calendar().is_zoom_loaded());
        assert_eq!(
            app.calendar().calendar().visible(),
            CalendarMonth::new(2025, 0).expect("month")
        );
    }

    #[test]
    fn loaded_value_is_not_written_back() {
        let haptics = Arc::new(CountingHaptics::default());
        let (mut app, _task) = App::with_parts(
            &Config::default(),
            Arc::new(MemoryStore::new()),
            haptics,
            date(2024, 6, 9),
            None,
        );
        let stored = UnifiedHeight::new(90.0);
        let _ = app.update(Message::Calendar(component::Message::ZoomLoaded(Some(stored))));
        assert_eq!(app.persistence().last_saved(), Some(stored));
    }

    #[test]
    fn mode_button_pulses_and_saves() {
        let haptics = Arc::new(CountingHaptics::default());
        let mut app = app_with(Arc::clone(&haptics));

        let _ = app.update(Message::Calendar(component::Message::SelectMode(
            DisplayMode::Detailed,
        )));

        assert_eq!(haptics.light_count(), 1);
        assert_eq!(haptics.selection_count(), 1);
        assert_eq!(app.persistence().last_saved(), Some(UnifiedHeight::new(80.0)));

        let _ = app.update(Message::Calendar(component::Message::SelectMode(
            DisplayMode::Detailed,
        )));
        assert_eq!(haptics.light_count(), 2);
        assert_eq!(haptics.selection_count(), 1);
    }

    #[test]
    fn pinch_within_mode_pulses_without_selection_tick() {
        let haptics = Arc::new(CountingHaptics::default());
        let mut app = app_with(Arc::clone(&haptics));

        for message in [
            component::Message::PinchStarted,
            component::Message::PinchChanged(1.1),
            component::Message::PinchEnded,
        ] {
            let _ = app.update(Message::Calendar(message));
        }

        assert_eq!(haptics.light_count(), 1);
        assert_eq!(haptics.selection_count(), 0);
    }

    #[test]
    fn cancelled_pinch_saves_silently() {
        let haptics = Arc::new(CountingHaptics::default());
        let mut app = app_with(Arc::clone(&haptics));

        for message in [
            component::Message::PinchStarted,
            component::Message::PinchChanged(1.5),
            component::Message::PinchCancelled,
        ] {
            let _ = app.update(Message::Calendar(message));
        }

        assert_eq!(haptics.light_count(), 0);
        assert_eq!(app.persistence().last_saved(), Some(UnifiedHeight::new(96.0)));
    }

    #[test]
    fn sample_items_follow_visible_month() {
        let mut app = app_with(Arc::new(CountingHaptics::default()));
        let june = demo_items(CalendarMonth::new(2024, 5).expect("month"));
        assert!(june
            .iter()
            .all(|item| app.calendar().items().on(item.date).contains(item)));

        let _ = app.update(Message::Calendar(component::Message::NextMonth));
        let july = demo_items(CalendarMonth::new(2024, 6).expect("month"));
        assert!(!july.is_empty());
        assert!(july
            .iter()
            .all(|item| app.calendar().items().on(item.date).contains(item)));
        assert!(june
            .iter()
            .all(|item| app.calendar().items().on(item.date).is_empty()));
    }

    #[test]
    fn title_names_visible_month() {
        let app = app_with(Arc::new(CountingHaptics::default()));
        assert_eq!(app.title(), "June 2024 - Iced Calendar");
    }
}
