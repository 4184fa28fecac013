use super::super::messages::Message;
use super::super::state::{App, PAGE_SCROLL_ID, SectionId};
use super::Effect;
use crate::assets;
use iced::Event;
use iced::Task;
use iced::event;
use iced::widget::scrollable::{self, AbsoluteOffset};
use iced::window;

impl App {
    pub(super) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::SaveConfig => {
                self.save_config();
                Task::none()
            }
            Effect::FetchAudio {
                id,
                request_id,
                url,
            } => Task::perform(
                async move {
                    match assets::fetch_audio(&url).await {
                        Ok(path) => Message::AudioFetched {
                            id,
                            request_id,
                            path: Some(path),
                            error: None,
                        },
                        Err(err) => Message::AudioFetched {
                            id,
                            request_id,
                            path: None,
                            error: Some(format!("{err:#}")),
                        },
                    }
                },
                |message| message,
            ),
            Effect::ScrollToSection(section) => {
                let y = if section == SectionId::Home {
                    0.0
                } else {
                    self.nav.offset_top(section).unwrap_or(0.0)
                };
                scrollable::scroll_to(PAGE_SCROLL_ID.clone(), AbsoluteOffset { x: 0.0, y })
            }
        }
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized {
            width: size.width,
            height: size.height,
        }),
        Event::Window(window::Event::Moved(position)) => Some(Message::WindowMoved {
            x: position.x,
            y: position.y,
        }),
        _ => None,
    }
}
