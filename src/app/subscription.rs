// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Native input is routed to the calendar as raw events. Pointer, touch and
//! wheel events are forwarded even when a widget captured them: the grid is
//! made of day buttons, and a drag or Ctrl+wheel pinch starting on a cell
//! still has to reach the gesture tracker.

use super::Message;
use crate::config::FRAME_INTERVAL;
use crate::ui::calendar::component;
use iced::{event, keyboard, mouse, time, Subscription};

/// Routes native events to the calendar component.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, window_id| {
        let forward = match &event {
            event::Event::Mouse(
                mouse::Event::WheelScrolled { .. }
                | mouse::Event::CursorMoved { .. }
                | mouse::Event::CursorLeft
                | mouse::Event::ButtonPressed(mouse::Button::Left)
                | mouse::Event::ButtonReleased(mouse::Button::Left),
            )
            | event::Event::Touch(_)
            | event::Event::Keyboard(keyboard::Event::ModifiersChanged(_)) => true,
            // Keys typed into a focused widget stay there.
            event::Event::Keyboard(_) => status == event::Status::Ignored,
            _ => false,
        };

        forward.then(|| {
            Message::Calendar(component::Message::RawEvent {
                window: window_id,
                event,
            })
        })
    })
}

/// Frame ticks for the settle spring and the paging timers.
///
/// Only active while something is animating or a timer is pending.
pub fn create_tick_subscription(needs_ticks: bool) -> Subscription<Message> {
    if needs_ticks {
        time::every(FRAME_INTERVAL).map(|at| Message::Calendar(component::Message::Tick(at)))
    } else {
        Subscription::none()
    }
}
