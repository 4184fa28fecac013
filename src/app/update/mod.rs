use super::messages::Message;
use super::state::{App, SectionId, TICK_INTERVAL_MS};
use crate::catalog::EtudeId;
use iced::event;
use iced::time;
use iced::{Subscription, Task};
use std::time::Duration;

mod navigation;
mod playback;
mod reducer;
mod runtime;

/// Describes work that must be performed outside the pure reducer.
pub(super) enum Effect {
    SaveConfig,
    FetchAudio {
        id: EtudeId,
        request_id: u64,
        url: String,
    },
    ScrollToSection(SectionId),
}

impl App {
    pub fn subscription(app: &App) -> Subscription<Message> {
        let mut subscriptions: Vec<Subscription<Message>> =
            vec![event::listen_with(runtime::runtime_event_to_message)];

        if app.deck.any_playing() {
            subscriptions
                .push(time::every(Duration::from_millis(TICK_INTERVAL_MS)).map(Message::Tick));
        }

        Subscription::batch(subscriptions)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = self.reduce(message);
        if effects.is_empty() {
            Task::none()
        } else {
            Task::batch(effects.into_iter().map(|effect| self.run_effect(effect)))
        }
    }
}
