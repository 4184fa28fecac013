use super::messages::Message;
use super::state::{
    ABOUT_HEIGHT_PX, App, CARD_HEIGHT_PX, GRID_COLUMNS, GRID_SPACING_PX, MAX_VOLUME, MIN_VOLUME,
    PAGE_SCROLL_ID, SectionId,
};
use crate::catalog::Etude;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{
    Column, Row, button, column, container, horizontal_space, row, scrollable, slider, text,
    text_input,
};
use iced::{Element, Length};
use std::time::Duration;

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let page = scrollable(
            column![
                self.hero_section(),
                self.etudes_section(),
                self.about_section()
            ]
            .width(Length::Fill),
        )
        .on_scroll(|viewport| Message::Scrolled {
            offset_y: viewport.absolute_offset().y,
        })
        .id(PAGE_SCROLL_ID.clone())
        .height(Length::Fill);

        column![self.nav_bar(), page].into()
    }

    /// Sticky bar above the page; compacts once scrolled past the threshold
    /// and highlights the active section's link.
    fn nav_bar(&self) -> Element<'_, Message> {
        let padding = if self.nav.scrolled_past_threshold {
            6.0
        } else {
            12.0
        };

        let mut links = Row::new().spacing(8).align_y(Vertical::Center);
        for section in SectionId::ALL {
            let link = if section == self.nav.active_section {
                button(text(section.label()))
                    .style(button::primary)
                    .on_press(Message::NavLinkClicked(section))
            } else {
                button(text(section.label()))
                    .style(button::text)
                    .on_press(Message::NavLinkClicked(section))
            };
            links = links.push(link);
        }

        let theme_label = if matches!(self.config.theme, crate::config::ThemeMode::Night) {
            "Day Mode"
        } else {
            "Night Mode"
        };

        container(
            row![
                links,
                horizontal_space(),
                button(theme_label)
                    .style(button::secondary)
                    .on_press(Message::ToggleTheme)
            ]
            .align_y(Vertical::Center)
            .width(Length::Fill),
        )
        .padding(padding)
        .width(Length::Fill)
        .into()
    }

    fn hero_section(&self) -> Element<'_, Message> {
        container(
            column![
                text("Etude Deck").size(44.0),
                text("A catalog of numbered audio exercises").size(20.0),
                text("Scroll down or use the navigation bar to browse").size(14.0),
            ]
            .spacing(12)
            .align_x(Horizontal::Center),
        )
        .center_x(Length::Fill)
        .center_y(Length::Fixed(self.hero_height()))
        .into()
    }

    fn etudes_section(&self) -> Element<'_, Message> {
        let search = text_input("Search by etude number (e.g. 1, 15, 100)", &self.search.query)
            .on_input(Message::SearchQueryChanged)
            .padding(10.0)
            .width(Length::Fixed(420.0));

        let header = column![
            text("Etudes").size(32.0),
            text("Search by exercise number").size(16.0),
            search,
        ]
        .spacing(10)
        .align_x(Horizontal::Center);

        let results = self.filtered_etudes();
        let body: Element<'_, Message> = if results.is_empty() {
            let query = self.search.query.trim();
            let notice = if query.is_empty() {
                "The catalog is empty.".to_string()
            } else {
                format!("No etude matching \"{query}\".")
            };
            text(notice).size(16.0).into()
        } else {
            let mut grid = Column::new().spacing(GRID_SPACING_PX);
            for chunk in results.chunks(GRID_COLUMNS) {
                let mut cards = Row::new().spacing(GRID_SPACING_PX).width(Length::Fill);
                for &etude in chunk {
                    cards = cards.push(self.etude_card(etude));
                }
                // Keep card widths stable on a partially filled last row.
                for _ in chunk.len()..GRID_COLUMNS {
                    cards = cards.push(horizontal_space().width(Length::FillPortion(1)));
                }
                grid = grid.push(cards);
            }
            grid.into()
        };

        container(
            column![header, body]
                .spacing(24)
                .align_x(Horizontal::Center)
                .width(Length::Fill),
        )
        .padding([24.0, 32.0])
        .width(Length::Fill)
        .into()
    }

    fn etude_card<'a>(&'a self, etude: &'a Etude) -> Element<'a, Message> {
        let id = etude.id;
        let (is_playing, volume, current_time, duration, percent) = self.card_snapshot(id);

        let mut header = Row::new()
            .spacing(8)
            .align_y(Vertical::Center)
            .push(text(format!("No. {}", etude.display_number)).size(22.0));
        if let Some(pdf_ref) = &etude.pdf_ref {
            header = header
                .push(horizontal_space())
                .push(text(pdf_ref.as_str()).size(12.0));
        }

        let mut body = Column::new().spacing(6).push(header);
        if let Some(title) = etude.title.as_deref().filter(|t| !t.trim().is_empty()) {
            body = body.push(text(title).size(16.0));
        }
        if let Some(desc) = etude.desc.as_deref().filter(|d| !d.trim().is_empty()) {
            body = body.push(text(desc).size(13.0));
        }
        if let Some(notation) = etude.notation.as_deref().filter(|n| !n.trim().is_empty()) {
            body = body.push(
                text(notation)
                    .size(13.0)
                    .font(iced::Font::MONOSPACE),
            );
        }

        let progress = row![
            text(format_time(current_time)).size(12.0),
            slider(0.0..=100.0, percent, move |value| Message::SeekTo(
                id, value
            ))
            .step(0.5),
            text(format_time(duration.unwrap_or(Duration::ZERO))).size(12.0),
        ]
        .spacing(8)
        .align_y(Vertical::Center);

        let transport = row![
            button(text(if is_playing { "Pause" } else { "Play" }))
                .style(button::primary)
                .on_press(Message::TogglePlayPause(id)),
            button(text("Stop"))
                .style(button::danger)
                .on_press(Message::Stop(id)),
            horizontal_space(),
            text("Vol").size(12.0),
            slider(MIN_VOLUME..=MAX_VOLUME, volume, move |value| {
                Message::VolumeChanged(id, value)
            })
            .step(0.01)
            .width(Length::Fixed(110.0)),
        ]
        .spacing(8)
        .align_y(Vertical::Center);

        container(
            body.push(column![progress, transport].spacing(8))
                .width(Length::Fill),
        )
        .style(container::rounded_box)
        .padding(16.0)
        .width(Length::FillPortion(1))
        .height(Length::Fixed(CARD_HEIGHT_PX))
        .into()
    }

    fn about_section(&self) -> Element<'_, Message> {
        container(
            column![
                text("About").size(32.0),
                text(
                    "Each etude streams from a published release asset and is \
                     cached locally after the first play. Only one etude is \
                     audible at a time; starting a card silences the others.",
                )
                .size(15.0),
            ]
            .spacing(12)
            .align_x(Horizontal::Center)
            .width(Length::Fixed(560.0)),
        )
        .center_x(Length::Fill)
        .center_y(Length::Fixed(ABOUT_HEIGHT_PX))
        .into()
    }

    fn card_snapshot(&self, id: crate::catalog::EtudeId) -> (bool, f32, Duration, Option<Duration>, f32) {
        match self.deck.card(id) {
            Some(card) => (
                card.is_playing(),
                card.volume,
                card.current_time,
                card.duration,
                card.progress_percent(),
            ),
            None => (false, self.deck.default_volume(), Duration::ZERO, None, 0.0),
        }
    }
}

/// Seconds to MM:SS for the card's time labels.
fn format_time(time: Duration) -> String {
    let total = time.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::format_time;
    use std::time::Duration;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(Duration::ZERO), "00:00");
        assert_eq!(format_time(Duration::from_secs(65)), "01:05");
        assert_eq!(format_time(Duration::from_secs(600)), "10:00");
    }
}
