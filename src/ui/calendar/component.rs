// SPDX-License-Identifier: MPL-2.0
//! Calendar component encapsulating state and update logic.
//!
//! Owns the zoom model, the pinch/overscroll/transition state machines and
//! the visible month. The render layer only ever sees the last forwarded
//! [`DisplaySnapshot`] and the [`CalendarState`]; the live zoom value moves
//! at gesture rate and reaches the grid through the pinch throttle.

use super::cells;
use super::gestures::{GestureInput, GestureTracker};
use super::view::{self as calendar_view, ViewContext, ViewModel};
use crate::config::WeekStart;
use crate::domain::calendar::{
    CalendarItem, CalendarMonth, CalendarState, DayGrid, DayItems,
};
use crate::ui::state::overscroll::{OverscrollDetector, ScrollSample};
use crate::ui::state::pinch::{PinchController, SettleStep};
use crate::ui::state::transition::{MonthTransitionController, TransitionOutcome};
use crate::ui::state::zoom::{DisplayMode, DisplaySnapshot, UnifiedHeight, ZoomModel};
use crate::ui::state::DragState;
use crate::ui::theming::ColorScheme;
use chrono::NaiveDate;
use iced::widget::scrollable::{RelativeOffset, Viewport};
use iced::widget::{operation, Id};
use iced::{event, keyboard, mouse, touch, window, Element, Point, Rectangle, Task};
use std::time::Instant;

/// Identifier used for the month grid scrollable widget.
pub const SCROLLABLE_ID: &str = "calendar-grid-scrollable";

/// Messages emitted by calendar widgets and gesture sources.
#[derive(Debug, Clone)]
pub enum Message {
    /// Stored zoom level finished loading (`None` when absent or invalid).
    ZoomLoaded(Option<UnifiedHeight>),
    PinchStarted,
    /// Scale relative to the pinch start.
    PinchChanged(f32),
    PinchEnded,
    PinchCancelled,
    DragStarted,
    ScrollSampled(ScrollSample),
    DragEnded,
    DragCancelled,
    MomentumEnded,
    ViewportChanged {
        bounds: Rectangle,
        content_height: f32,
        offset_y: f32,
    },
    Tick(Instant),
    PreviousMonth,
    NextMonth,
    Today,
    SelectMode(DisplayMode),
    SelectDay(NaiveDate),
    RawEvent {
        window: window::Id,
        event: event::Event,
    },
}

impl Message {
    pub fn viewport_changed(viewport: Viewport) -> Self {
        Message::ViewportChanged {
            bounds: viewport.bounds(),
            content_height: viewport.content_bounds().height,
            offset_y: viewport.absolute_offset().y,
        }
    }
}

/// Side effects the application should perform after handling a message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    None,
    /// Zoom was released or a mode picked directly: play a light impact,
    /// plus a selection tick when the mode changed. `settled` is set when
    /// the value is already at rest and should be persisted.
    ZoomReleased {
        mode_changed: bool,
        settled: Option<UnifiedHeight>,
    },
    /// A zoom value came to rest without feedback (settle end, cancel).
    PersistZoom(UnifiedHeight),
    /// The visible month moved.
    MonthChanged(CalendarMonth),
}

/// Last known geometry of the grid scrollable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct ScrollMetrics {
    bounds: Option<Rectangle>,
    content_height: f32,
    offset_y: f32,
}

impl ScrollMetrics {
    fn viewport_height(&self) -> f32 {
        self.bounds.map_or(self.content_height, |b| b.height)
    }

    fn max_scroll(&self) -> f32 {
        (self.content_height - self.viewport_height()).max(0.0)
    }

    fn sample(&self, offset_y: f32) -> ScrollSample {
        ScrollSample::new(offset_y, self.content_height, self.viewport_height())
    }
}

/// Complete calendar component state.
pub struct State {
    zoom: ZoomModel,
    display: DisplaySnapshot,
    zoom_loaded: bool,
    pinch: PinchController,
    overscroll: OverscrollDetector,
    transition: MonthTransitionController,
    drag: DragState,
    gestures: GestureTracker,
    calendar: CalendarState,
    items: DayItems,
    week_start: WeekStart,
    today: NaiveDate,
    metrics: ScrollMetrics,
    cursor_position: Option<Point>,
    ctrl_pressed: bool,
}

impl State {
    /// Creates the component on `initial` month (or today's), with zoom
    /// still unloaded.
    #[must_use]
    pub fn new(
        today: NaiveDate,
        initial: Option<CalendarMonth>,
        week_start: WeekStart,
        animations: bool,
    ) -> Self {
        let calendar = initial.map_or_else(
            || CalendarState::new(today),
            |month| CalendarState::starting_at(month, today),
        );
        Self {
            zoom: ZoomModel::default(),
            display: DisplaySnapshot::default(),
            zoom_loaded: false,
            pinch: PinchController::new(animations),
            overscroll: OverscrollDetector::new(),
            transition: MonthTransitionController::new(),
            drag: DragState::default(),
            gestures: GestureTracker::new(),
            items: DayItems::default(),
            calendar,
            week_start,
            today,
            metrics: ScrollMetrics::default(),
            cursor_position: None,
            ctrl_pressed: false,
        }
    }

    #[must_use]
    pub fn display(&self) -> DisplaySnapshot {
        self.display
    }

    /// Live zoom value, ahead of [`display`](Self::display) during a pinch.
    #[must_use]
    pub fn live_height(&self) -> UnifiedHeight {
        self.zoom.height()
    }

    #[must_use]
    pub fn calendar(&self) -> &CalendarState {
        &self.calendar
    }

    #[must_use]
    pub fn is_zoom_loaded(&self) -> bool {
        self.zoom_loaded
    }

    #[must_use]
    pub fn overscroll(&self) -> &OverscrollDetector {
        &self.overscroll
    }

    #[must_use]
    pub fn is_transition_locked(&self, now: Instant) -> bool {
        self.transition.is_locked(now)
    }

    /// Whether a settle animation or transition timer needs frame ticks.
    #[must_use]
    pub fn needs_ticks(&self) -> bool {
        self.pinch.is_settling() || self.transition.has_pending_timers()
    }

    /// Replaces the items shown in the grid.
    ///
    /// Items are kept across month changes; the caller supplies whatever
    /// range it has fetched.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = CalendarItem>) {
        self.items = DayItems::group(items);
    }

    #[must_use]
    pub fn items(&self) -> &DayItems {
        &self.items
    }

    pub fn handle_message(&mut self, message: Message) -> (Effect, Task<Message>) {
        self.handle_message_at(message, Instant::now())
    }

    /// Handles `message` as if it arrived at `now`.
    pub fn handle_message_at(&mut self, message: Message, now: Instant) -> (Effect, Task<Message>) {
        match message {
            Message::ZoomLoaded(stored) => {
                if !self.zoom_loaded {
                    let height = stored.unwrap_or_default();
                    self.zoom.seed(height);
                    self.display = DisplaySnapshot::of(height);
                    self.zoom_loaded = true;
                    tracing::debug!(height = height.value(), restored = stored.is_some(), "zoom loaded");
                }
                (Effect::None, Task::none())
            }
            Message::PinchStarted => (self.pinch_started(), Task::none()),
            Message::PinchChanged(scale) => (self.pinch_changed(scale, now), Task::none()),
            Message::PinchEnded => (self.pinch_ended(now), Task::none()),
            Message::PinchCancelled => (self.pinch_cancelled(), Task::none()),
            Message::DragStarted => {
                self.overscroll.drag_start();
                (Effect::None, Task::none())
            }
            Message::ScrollSampled(sample) => {
                self.overscroll.sample(&sample);
                (Effect::None, Task::none())
            }
            Message::DragEnded => self.drag_ended(now),
            Message::DragCancelled => {
                self.drag.stop();
                self.overscroll.cancel();
                (Effect::None, Task::none())
            }
            Message::MomentumEnded => {
                self.overscroll.momentum_end();
                (Effect::None, Task::none())
            }
            Message::ViewportChanged {
                bounds,
                content_height,
                offset_y,
            } => {
                self.metrics = ScrollMetrics {
                    bounds: Some(bounds),
                    content_height,
                    offset_y,
                };
                (Effect::None, Task::none())
            }
            Message::Tick(at) => self.tick(at),
            Message::PreviousMonth => self.navigate(CalendarState::go_previous),
            Message::NextMonth => self.navigate(CalendarState::go_next),
            Message::Today => {
                let today = self.today;
                self.navigate(|calendar| calendar.go_to_today(today))
            }
            Message::SelectMode(mode) => (self.select_mode(mode), Task::none()),
            Message::SelectDay(date) => {
                let before = self.calendar.visible();
                self.calendar.select(date);
                (self.month_effect(before), Task::none())
            }
            Message::RawEvent { event, .. } => self.handle_raw_event(event, now),
        }
    }

    // =========================================================================
    // Zoom
    // =========================================================================

    fn pinch_started(&mut self) -> Effect {
        if !self.zoom_loaded {
            return Effect::None;
        }
        // A pinch supersedes a drag in progress.
        if self.drag.is_dragging || self.overscroll.is_dragging() {
            self.drag.stop();
            self.overscroll.cancel();
        }
        self.pinch.begin(&self.zoom);
        Effect::None
    }

    fn pinch_changed(&mut self, scale: f32, now: Instant) -> Effect {
        if let Some(snapshot) = self.pinch.update(&mut self.zoom, scale, now) {
            self.display = snapshot;
        }
        Effect::None
    }

    fn pinch_ended(&mut self, now: Instant) -> Effect {
        let Some(release) = self.pinch.end(&mut self.zoom, now) else {
            return Effect::None;
        };
        self.display = release.forward;
        Effect::ZoomReleased {
            mode_changed: release.mode_changed,
            settled: release.settled.then_some(release.target),
        }
    }

    fn pinch_cancelled(&mut self) -> Effect {
        match self.pinch.cancel(&mut self.zoom) {
            Some(snapshot) => {
                self.display = snapshot;
                Effect::PersistZoom(snapshot.height)
            }
            None => Effect::None,
        }
    }

    fn select_mode(&mut self, mode: DisplayMode) -> Effect {
        if !self.zoom_loaded {
            return Effect::None;
        }
        self.pinch.interrupt();
        let mode_changed = self.zoom.set_direct(mode);
        let height = self.zoom.height();
        self.display = DisplaySnapshot::of(height);
        Effect::ZoomReleased {
            mode_changed,
            settled: Some(height),
        }
    }

    // =========================================================================
    // Paging
    // =========================================================================

    fn drag_ended(&mut self, now: Instant) -> (Effect, Task<Message>) {
        self.drag.stop();
        let direction = self.overscroll.drag_end();
        let before = self.calendar.visible();
        match self.transition.on_drag_end(direction, &mut self.calendar, now) {
            TransitionOutcome::Transitioned { .. } => (self.month_effect(before), Task::none()),
            TransitionOutcome::Ignored | TransitionOutcome::NoLatch => (Effect::None, Task::none()),
        }
    }

    fn navigate(&mut self, step: impl FnOnce(&mut CalendarState)) -> (Effect, Task<Message>) {
        let before = self.calendar.visible();
        step(&mut self.calendar);
        let effect = self.month_effect(before);
        let task = if matches!(effect, Effect::MonthChanged(_)) {
            scroll_to_top()
        } else {
            Task::none()
        };
        (effect, task)
    }

    fn month_effect(&self, before: CalendarMonth) -> Effect {
        let after = self.calendar.visible();
        if after == before {
            return Effect::None;
        }
        Effect::MonthChanged(after)
    }

    fn tick(&mut self, now: Instant) -> (Effect, Task<Message>) {
        let effect = match self.pinch.tick(&mut self.zoom, now) {
            Some(SettleStep::Moving(snapshot)) => {
                self.display = snapshot;
                Effect::None
            }
            Some(SettleStep::Settled(snapshot)) => {
                self.display = snapshot;
                Effect::PersistZoom(snapshot.height)
            }
            None => Effect::None,
        };

        let due = self.transition.poll(now);
        let task = if due.scroll_reset {
            scroll_to_top()
        } else {
            Task::none()
        };
        (effect, task)
    }

    // =========================================================================
    // Raw input
    // =========================================================================

    fn is_over_grid(&self, position: Point) -> bool {
        self.metrics
            .bounds
            .is_some_and(|bounds| bounds.contains(position))
    }

    fn apply_gesture(&mut self, input: GestureInput, now: Instant) -> (Effect, Task<Message>) {
        match input {
            GestureInput::PinchStarted => (self.pinch_started(), Task::none()),
            GestureInput::PinchChanged(scale) => (self.pinch_changed(scale, now), Task::none()),
            GestureInput::PinchEnded => (self.pinch_ended(now), Task::none()),
            GestureInput::PinchCancelled => (self.pinch_cancelled(), Task::none()),
            GestureInput::DragStarted(position) => {
                if self.is_over_grid(position) {
                    self.drag.start(position, self.metrics.offset_y);
                    self.overscroll.drag_start();
                }
                (Effect::None, Task::none())
            }
            GestureInput::DragMoved(position) => (Effect::None, self.drag_moved(position)),
            GestureInput::DragEnded => {
                if self.drag.is_dragging {
                    self.drag_ended(now)
                } else {
                    (Effect::None, Task::none())
                }
            }
            GestureInput::DragCancelled => {
                self.drag.stop();
                self.overscroll.cancel();
                (Effect::None, Task::none())
            }
        }
    }

    fn drag_moved(&mut self, position: Point) -> Task<Message> {
        let Some(virtual_offset) = self.drag.virtual_offset(position) else {
            return Task::none();
        };
        self.overscroll.sample(&self.metrics.sample(virtual_offset));

        let max_scroll = self.metrics.max_scroll();
        match self.drag.scroll_offset(position, max_scroll) {
            Some(offset) if max_scroll > 0.0 => operation::snap_to(
                Id::new(SCROLLABLE_ID),
                RelativeOffset {
                    x: 0.0,
                    y: offset / max_scroll,
                },
            ),
            _ => Task::none(),
        }
    }

    fn handle_raw_event(&mut self, event: event::Event, now: Instant) -> (Effect, Task<Message>) {
        match event {
            event::Event::Mouse(mouse_event) => match mouse_event {
                mouse::Event::WheelScrolled { delta } => {
                    let mut effect = Effect::None;
                    for input in self.gestures.wheel(scroll_steps(&delta), self.ctrl_pressed) {
                        let (next, _) = self.apply_gesture(input, now);
                        if next != Effect::None {
                            effect = next;
                        }
                    }
                    (effect, Task::none())
                }
                mouse::Event::ButtonPressed(mouse::Button::Left) => match self.cursor_position {
                    Some(position) if !self.gestures.is_pinching() => {
                        self.apply_gesture(GestureInput::DragStarted(position), now)
                    }
                    _ => (Effect::None, Task::none()),
                },
                mouse::Event::ButtonReleased(mouse::Button::Left) => {
                    self.apply_gesture(GestureInput::DragEnded, now)
                }
                mouse::Event::CursorMoved { position } => {
                    self.cursor_position = Some(position);
                    if self.drag.is_dragging {
                        self.apply_gesture(GestureInput::DragMoved(position), now)
                    } else {
                        (Effect::None, Task::none())
                    }
                }
                mouse::Event::CursorLeft => {
                    self.cursor_position = None;
                    if self.drag.is_dragging {
                        self.apply_gesture(GestureInput::DragCancelled, now)
                    } else {
                        (Effect::None, Task::none())
                    }
                }
                _ => (Effect::None, Task::none()),
            },
            event::Event::Touch(touch_event) => {
                let input = match touch_event {
                    touch::Event::FingerPressed { id, position } => {
                        self.gestures.finger_pressed(id.0, position)
                    }
                    touch::Event::FingerMoved { id, position } => {
                        self.gestures.finger_moved(id.0, position)
                    }
                    touch::Event::FingerLifted { id, .. } => self.gestures.finger_lifted(id.0),
                    touch::Event::FingerLost { id, .. } => self.gestures.finger_lost(id.0),
                };
                match input {
                    Some(input) => self.apply_gesture(input, now),
                    None => (Effect::None, Task::none()),
                }
            }
            event::Event::Keyboard(keyboard_event) => match keyboard_event {
                keyboard::Event::ModifiersChanged(modifiers) => {
                    self.ctrl_pressed = modifiers.control();
                    match self.gestures.modifiers_changed(self.ctrl_pressed) {
                        Some(input) => self.apply_gesture(input, now),
                        None => (Effect::None, Task::none()),
                    }
                }
                keyboard::Event::KeyPressed {
                    key: keyboard::Key::Named(keyboard::key::Named::ArrowLeft),
                    ..
                } => self.handle_message_at(Message::PreviousMonth, now),
                keyboard::Event::KeyPressed {
                    key: keyboard::Key::Named(keyboard::key::Named::ArrowRight),
                    ..
                } => self.handle_message_at(Message::NextMonth, now),
                keyboard::Event::KeyPressed {
                    key: keyboard::Key::Character(ref c),
                    modifiers,
                    ..
                } if c.eq_ignore_ascii_case("t") && !modifiers.command() => {
                    self.handle_message_at(Message::Today, now)
                }
                _ => (Effect::None, Task::none()),
            },
            _ => (Effect::None, Task::none()),
        }
    }

    pub fn view<'a>(&'a self, colors: &'a ColorScheme) -> Element<'a, Message> {
        let ctx = ViewContext {
            colors,
            scrollable_id: SCROLLABLE_ID,
        };

        if !self.zoom_loaded {
            return calendar_view::loading(ctx);
        }

        let grid = DayGrid::build(self.calendar.visible(), self.week_start.weekday(), self.today);
        let strategy = cells::strategy_for(self.display.mode);
        let model = ViewModel {
            grid,
            items: &self.items,
            selected: self.calendar.selected(),
            display: self.display,
            strategy,
            layout: strategy.layout(&self.display),
            week_start: self.week_start.weekday(),
            indicators: self.overscroll.indicators(),
        };
        calendar_view::view(ctx, model)
    }
}

fn scroll_to_top() -> Task<Message> {
    operation::snap_to(Id::new(SCROLLABLE_ID), RelativeOffset { x: 0.0, y: 0.0 })
}

fn scroll_steps(delta: &mouse::ScrollDelta) -> f32 {
    match delta {
        mouse::ScrollDelta::Lines { y, .. } => *y,
        mouse::ScrollDelta::Pixels { y, .. } => *y / 120.0,
    }
}
