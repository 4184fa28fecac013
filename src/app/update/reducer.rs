use super::super::messages::Message;
use super::super::state::App;
use super::Effect;
use crate::config::ThemeMode;
use tracing::{debug, info};

impl App {
    pub(super) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::SearchQueryChanged(query) => self.handle_search_query_changed(query),
            Message::ToggleTheme => self.handle_toggle_theme(&mut effects),
            Message::TogglePlayPause(id) => self.handle_toggle_play_pause(id, &mut effects),
            Message::Stop(id) => self.handle_stop(id),
            Message::VolumeChanged(id, volume) => self.handle_volume_changed(id, volume),
            Message::SeekTo(id, percent) => self.handle_seek_to(id, percent),
            Message::AudioFetched {
                id,
                request_id,
                path,
                error,
            } => self.handle_audio_fetched(id, request_id, path, error),
            Message::NavLinkClicked(section) => self.handle_nav_link_clicked(section, &mut effects),
            Message::Scrolled { offset_y } => self.handle_scrolled(offset_y),
            Message::WindowResized { width, height } => {
                self.handle_window_resized(width, height, &mut effects)
            }
            Message::WindowMoved { x, y } => self.handle_window_moved(x, y, &mut effects),
            Message::Tick(now) => self.handle_tick(now),
        }

        effects
    }

    fn handle_search_query_changed(&mut self, query: String) {
        debug!(query = %query, "Search query changed");
        self.search.query = query;
    }

    fn handle_toggle_theme(&mut self, effects: &mut Vec<Effect>) {
        self.config.theme = match self.config.theme {
            ThemeMode::Day => ThemeMode::Night,
            ThemeMode::Night => ThemeMode::Day,
        };
        info!(theme = %self.config.theme, "Toggled theme");
        effects.push(Effect::SaveConfig);
    }
}
