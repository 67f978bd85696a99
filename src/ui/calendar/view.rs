// SPDX-License-Identifier: MPL-2.0
//! Month grid rendering: header, weekday labels, pull indicators and the
//! scrollable rows of day cells.
//!
//! Everything here reads the forwarded display snapshot through the cell
//! layout; nothing looks at the live zoom value.

use super::cells::{CellLayout, CellStrategy, ItemMarker};
use super::component::Message;
use crate::domain::calendar::{weekday_labels, CalendarItem, DayCell, DayGrid, DayItems};
use crate::ui::design_tokens::{radius, spacing, typography};
use crate::ui::state::overscroll::Overscroll;
use crate::ui::state::zoom::{DisplayMode, DisplaySnapshot};
use crate::ui::theming::ColorScheme;
use chrono::{Datelike, NaiveDate, Weekday};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, container, Button, Column, Container, Id, Row, Scrollable, Text};
use iced::{Background, Border, Color, Element, Length, Theme};

pub struct ViewContext<'a> {
    pub colors: &'a ColorScheme,
    pub scrollable_id: &'static str,
}

pub struct ViewModel<'a> {
    pub grid: DayGrid,
    pub items: &'a DayItems,
    pub selected: NaiveDate,
    pub display: DisplaySnapshot,
    pub strategy: &'static dyn CellStrategy,
    pub layout: CellLayout,
    pub week_start: Weekday,
    pub indicators: Overscroll,
}

/// Placeholder shown until the stored zoom level has been read.
pub fn loading<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let color = ctx.colors.text_secondary;
    Container::new(Text::new("Loading calendar…").size(typography::BODY).color(color))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
}

pub fn view<'a>(ctx: ViewContext<'a>, model: ViewModel<'a>) -> Element<'a, Message> {
    let colors = ctx.colors;

    let rows = model
        .grid
        .weeks()
        .iter()
        .fold(Column::new().spacing(spacing::XXS), |column, week| {
            column.push(week_row(colors, &model, week))
        });

    let scrollable = Scrollable::new(Container::new(rows).padding(spacing::XS))
        .id(Id::new(ctx.scrollable_id))
        .width(Length::Fill)
        .height(Length::Fill)
        .on_scroll(Message::viewport_changed);

    Column::new()
        .push(header(colors, &model))
        .push(weekday_header(colors, model.week_start))
        .push(pull_indicator(
            colors,
            model.indicators.over_top,
            "Release to show the previous month",
        ))
        .push(scrollable)
        .push(pull_indicator(
            colors,
            model.indicators.over_bottom,
            "Release to show the next month",
        ))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn header<'a>(colors: &'a ColorScheme, model: &ViewModel<'a>) -> Element<'a, Message> {
    let title = Text::new(model.grid.month().to_string())
        .size(typography::TITLE_MD)
        .color(colors.text_primary);

    let mode_buttons = DisplayMode::ALL.iter().fold(
        Row::new().spacing(spacing::XS),
        |row, &mode| {
            row.push(pill_button(
                colors,
                mode.label(),
                mode == model.display.mode,
                Message::SelectMode(mode),
            ))
        },
    );

    Row::new()
        .push(pill_button(colors, "‹", false, Message::PreviousMonth))
        .push(
            Container::new(title)
                .width(Length::Fill)
                .align_x(Horizontal::Center),
        )
        .push(pill_button(colors, "›", false, Message::NextMonth))
        .push(pill_button(colors, "Today", false, Message::Today))
        .push(mode_buttons)
        .spacing(spacing::SM)
        .padding(spacing::SM)
        .align_y(Vertical::Center)
        .into()
}

fn pill_button<'a>(
    colors: &ColorScheme,
    label: &'a str,
    active: bool,
    message: Message,
) -> Element<'a, Message> {
    let (background, text_color) = if active {
        (colors.brand_primary, Color::WHITE)
    } else {
        (colors.surface_secondary, colors.text_primary)
    };
    let hover = colors.brand_secondary;

    Button::new(Text::new(label).size(typography::BODY))
        .on_press(message)
        .padding([spacing::XS, spacing::SM])
        .style(move |_theme: &Theme, status: button::Status| {
            let background = match status {
                button::Status::Hovered if !active => Color { a: 0.3, ..hover },
                _ => background,
            };
            button::Style {
                background: Some(Background::Color(background)),
                text_color,
                border: Border {
                    radius: radius::FULL.into(),
                    ..Border::default()
                },
                ..button::Style::default()
            }
        })
        .into()
}

fn weekday_header<'a>(colors: &ColorScheme, week_start: Weekday) -> Element<'a, Message> {
    let color = colors.text_secondary;
    weekday_labels(week_start)
        .into_iter()
        .fold(Row::new().padding([0.0, spacing::XS]), |row, label| {
            row.push(
                Container::new(Text::new(label).size(typography::BODY).color(color))
                    .width(Length::FillPortion(1))
                    .align_x(Horizontal::Center),
            )
        })
        .into()
}

fn pull_indicator<'a>(colors: &ColorScheme, armed: bool, label: &'a str) -> Element<'a, Message> {
    if !armed {
        return Column::new().into();
    }
    let background = colors.pull_indicator;
    let text_color = colors.text_primary;
    Container::new(Text::new(label).size(typography::BODY))
        .width(Length::Fill)
        .padding(spacing::XS)
        .align_x(Horizontal::Center)
        .style(move |_theme: &Theme| container::Style {
            background: Some(Background::Color(background)),
            text_color: Some(text_color),
            ..container::Style::default()
        })
        .into()
}

fn week_row<'a>(
    colors: &'a ColorScheme,
    model: &ViewModel<'a>,
    week: &[DayCell; 7],
) -> Element<'a, Message> {
    week.iter()
        .fold(Row::new().spacing(spacing::XXS), |row, cell| {
            row.push(day_cell(colors, model, cell))
        })
        .height(Length::Fixed(model.layout.row_height))
        .into()
}

fn day_cell<'a>(
    colors: &'a ColorScheme,
    model: &ViewModel<'a>,
    cell: &DayCell,
) -> Element<'a, Message> {
    let layout = model.layout;
    let content = model.strategy.content(&layout, model.items.on(cell.date));

    let day_color = if cell.is_today {
        colors.brand_primary
    } else if cell.in_month {
        colors.text_primary
    } else {
        colors.text_tertiary
    };
    let day_number = Text::new(cell.date.day().to_string())
        .size(layout.day_font_size)
        .color(day_color);

    let markers = match layout.marker {
        ItemMarker::Dot => compact_markers(colors, &layout, content.visible),
        ItemMarker::Bar => stacked_markers(colors, &layout, content.visible),
        ItemMarker::TitledRow => detailed_markers(colors, &layout, content.visible),
    };

    let mut body = Column::new()
        .push(day_number)
        .push(markers)
        .spacing(spacing::XXS);
    if content.overflow > 0 {
        body = body.push(
            Text::new(format!("+{}", content.overflow))
                .size(typography::ITEM_TITLE)
                .color(colors.text_secondary),
        );
    }

    let selected = cell.date == model.selected;
    let surface = if selected {
        colors.surface_secondary
    } else {
        Color::TRANSPARENT
    };
    let border_color = colors.brand_primary;

    Button::new(body)
        .on_press(Message::SelectDay(cell.date))
        .width(Length::FillPortion(1))
        .height(Length::Fill)
        .padding(spacing::XS)
        .style(move |_theme: &Theme, _status: button::Status| button::Style {
            background: Some(Background::Color(surface)),
            border: Border {
                color: border_color,
                width: if selected { 1.0 } else { 0.0 },
                radius: radius::MD.into(),
            },
            ..button::Style::default()
        })
        .into()
}

fn swatch<'a>(color: Color, width: Length, height: f32, corner: f32) -> Element<'a, Message> {
    Container::new(Column::new())
        .width(width)
        .height(Length::Fixed(height))
        .style(move |_theme: &Theme| container::Style {
            background: Some(Background::Color(color)),
            border: Border {
                radius: corner.into(),
                ..Border::default()
            },
            ..container::Style::default()
        })
        .into()
}

fn compact_markers<'a>(
    colors: &ColorScheme,
    layout: &CellLayout,
    items: &'a [CalendarItem],
) -> Element<'a, Message> {
    items
        .iter()
        .fold(Row::new().spacing(spacing::XXS), |row, item| {
            row.push(swatch(
                colors.item(item.kind),
                Length::Fixed(layout.item_height),
                layout.item_height,
                radius::FULL,
            ))
        })
        .into()
}

fn stacked_markers<'a>(
    colors: &ColorScheme,
    layout: &CellLayout,
    items: &'a [CalendarItem],
) -> Element<'a, Message> {
    items
        .iter()
        .fold(Column::new().spacing(spacing::XXS), |column, item| {
            column.push(swatch(
                colors.item(item.kind),
                Length::Fill,
                layout.item_height,
                radius::SM,
            ))
        })
        .into()
}

fn detailed_markers<'a>(
    colors: &ColorScheme,
    layout: &CellLayout,
    items: &'a [CalendarItem],
) -> Element<'a, Message> {
    let text_color = colors.text_primary;
    items
        .iter()
        .fold(Column::new().spacing(spacing::XXS), |column, item| {
            let accent = colors.item(item.kind);
            column.push(
                Row::new()
                    .push(swatch(accent, Length::Fixed(3.0), layout.item_height, radius::SM))
                    .push(
                        Text::new(item.title.as_str())
                            .size(layout.title_font_size)
                            .color(text_color),
                    )
                    .spacing(spacing::XS)
                    .height(Length::Fixed(layout.item_height))
                    .align_y(Vertical::Center),
            )
        })
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::{demo_items, CalendarMonth};
    use crate::test_utils::date;
    use crate::ui::calendar::cells::strategy_for;
    use crate::ui::state::zoom::UnifiedHeight;

    fn model(items: &DayItems, height: f32) -> ViewModel<'_> {
        let display = DisplaySnapshot::of(UnifiedHeight::new(height));
        let strategy = strategy_for(display.mode);
        let month = CalendarMonth::new(2024, 5).expect("month");
        ViewModel {
            grid: DayGrid::build(month, Weekday::Sun, date(2024, 6, 9)),
            items,
            selected: date(2024, 6, 9),
            display,
            strategy,
            layout: strategy.layout(&display),
            week_start: Weekday::Sun,
            indicators: Overscroll::default(),
        }
    }

    #[test]
    fn view_builds_for_every_mode() {
        let items = DayItems::group(demo_items(CalendarMonth::new(2024, 5).expect("month")));
        let colors = ColorScheme::light();
        for height in [40.0, 64.0, 80.0, 160.0] {
            let ctx = ViewContext {
                colors: &colors,
                scrollable_id: "test",
            };
            let _element = view(ctx, model(&items, height));
        }
    }

    #[test]
    fn loading_placeholder_builds() {
        let colors = ColorScheme::dark();
        let _element = loading(ViewContext {
            colors: &colors,
            scrollable_id: "test",
        });
    }
}
