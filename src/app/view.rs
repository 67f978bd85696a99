// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::Message;
use crate::ui::calendar::component;
use crate::ui::theming::ColorScheme;
use iced::widget::Container;
use iced::{Background, Element, Length, Theme};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub calendar: &'a component::State,
    pub colors: &'a ColorScheme,
}

/// Renders the calendar on the themed window surface.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let surface = ctx.colors.surface_primary;
    let calendar = ctx.calendar.view(ctx.colors).map(Message::Calendar);

    Container::new(calendar)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_theme: &Theme| iced::widget::container::Style {
            background: Some(Background::Color(surface)),
            ..iced::widget::container::Style::default()
        })
        .into()
}
