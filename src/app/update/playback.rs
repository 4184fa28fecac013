//! Card transport handlers: the playback state machine and its side effects.

use super::super::state::{App, CardLifecycle};
use super::Effect;
use crate::assets;
use crate::catalog::EtudeId;
use crate::player::AudioPlayback;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

impl App {
    /// Toggle one card. Before anything starts playing, every sibling is
    /// paused synchronously so at most one card is audible.
    pub(super) fn handle_toggle_play_pause(&mut self, id: EtudeId, effects: &mut Vec<Effect>) {
        let Some(etude) = self.catalog.get(id) else {
            warn!(id, "Toggle for unknown etude");
            return;
        };
        let url = assets::audio_url(&self.config.asset_base_url, &etude.display_number);
        let number = etude.display_number.clone();

        match self.deck.card_mut(id).lifecycle {
            CardLifecycle::Playing => {
                info!(id, number = %number, "Pausing etude");
                self.deck.card_mut(id).pause();
            }
            CardLifecycle::Paused => {
                self.deck.pause_all_except(id);
                info!(id, number = %number, "Resuming etude");
                self.deck.card_mut(id).resume();
            }
            CardLifecycle::Idle => {
                if self.deck.card_mut(id).fetch_in_flight {
                    debug!(id, "Fetch already in flight, ignoring toggle");
                    return;
                }
                self.deck.pause_all_except(id);
                let request_id = self.deck.next_request_id();
                let card = self.deck.card_mut(id);
                card.fetch_in_flight = true;
                card.pending_request = Some(request_id);
                info!(id, number = %number, url = %url, "Fetching etude audio");
                effects.push(Effect::FetchAudio {
                    id,
                    request_id,
                    url,
                });
            }
        }
    }

    pub(super) fn handle_stop(&mut self, id: EtudeId) {
        info!(id, "Stopping etude");
        self.deck.card_mut(id).reset();
    }

    pub(super) fn handle_volume_changed(&mut self, id: EtudeId, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        let card = self.deck.card_mut(id);
        card.volume = volume;
        if let Some(handle) = &card.handle {
            handle.set_volume(volume);
        }
        debug!(id, volume, "Volume changed");
    }

    /// Relocate playback to a percent of the known duration. Without a known
    /// positive duration this is a silent no-op.
    pub(super) fn handle_seek_to(&mut self, id: EtudeId, percent: f32) {
        let card = self.deck.card_mut(id);
        let Some(total) = card.duration.filter(|total| !total.is_zero()) else {
            debug!(id, "Seek ignored, duration unknown");
            return;
        };
        let Some(handle) = &mut card.handle else {
            return;
        };
        let percent = if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
        let target = Duration::from_secs_f64(total.as_secs_f64() * f64::from(percent) / 100.0);
        handle.seek(target);
        card.current_time = handle.position(Instant::now());
        debug!(id, percent, ?target, "Seeked etude");
    }

    pub(super) fn handle_audio_fetched(
        &mut self,
        id: EtudeId,
        request_id: u64,
        path: Option<PathBuf>,
        error: Option<String>,
    ) {
        if self.deck.card_mut(id).pending_request != Some(request_id) {
            debug!(id, request_id, "Ignoring stale audio fetch");
            return;
        }

        let card = self.deck.card_mut(id);
        card.fetch_in_flight = false;
        card.pending_request = None;

        let Some(path) = path else {
            // Degrade quietly: the card stays idle with placeholder times.
            warn!(
                id,
                error = %error.unwrap_or_else(|| "unknown".to_string()),
                "Audio fetch failed"
            );
            return;
        };

        let volume = card.volume;
        match AudioPlayback::start(&path, volume) {
            Ok(handle) => {
                // Exclusion again at the actual start boundary; the fetch ran
                // asynchronously and another card may have started meanwhile.
                self.deck.pause_all_except(id);
                let card = self.deck.card_mut(id);
                card.duration = handle.duration();
                card.current_time = Duration::ZERO;
                card.handle = Some(handle);
                card.lifecycle = CardLifecycle::Playing;
                info!(id, duration = ?card.duration, "Started etude playback");
            }
            Err(err) => {
                warn!(id, path = %path.display(), "Could not start playback: {err:#}");
            }
        }
    }

    /// Mirror each live stream's observed state back into the cards. The
    /// stream, not the last user action, is the source of truth; this is what
    /// keeps a card honest after a sibling silenced it.
    pub(super) fn handle_tick(&mut self, now: Instant) {
        let mut finished: Vec<EtudeId> = Vec::new();
        for (&id, card) in self.deck.cards_mut() {
            let Some(handle) = &card.handle else {
                continue;
            };
            if handle.is_finished() {
                finished.push(id);
                continue;
            }
            card.lifecycle = if handle.is_paused() {
                CardLifecycle::Paused
            } else {
                CardLifecycle::Playing
            };
            if card.is_playing() {
                card.current_time = handle.position(now);
            }
        }
        for id in finished {
            debug!(id, "Etude finished");
            self.deck.card_mut(id).reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::state::tests::test_app;
    use super::super::super::state::CardLifecycle;
    use crate::catalog::Etude;
    use std::time::Duration;

    fn etude(id: u64, number: &str) -> Etude {
        Etude {
            id,
            display_number: number.to_string(),
            title: None,
            desc: None,
            notation: None,
            pdf_ref: None,
            hidden: false,
        }
    }

    #[test]
    fn toggling_idle_card_requests_a_fetch_and_pauses_siblings() {
        let mut app = test_app(vec![etude(1, "1"), etude(2, "2")]);
        app.deck.card_mut(1).resume();

        let mut effects = Vec::new();
        app.handle_toggle_play_pause(2, &mut effects);

        assert_eq!(effects.len(), 1);
        assert_eq!(app.deck.card(1).unwrap().lifecycle, CardLifecycle::Paused);
        assert!(app.deck.card(2).unwrap().fetch_in_flight);
        assert_eq!(app.deck.playing_count(), 0);
    }

    #[test]
    fn toggle_pauses_then_resumes_with_exclusion() {
        let mut app = test_app(vec![etude(1, "1"), etude(2, "2")]);
        app.deck.card_mut(1).resume();

        let mut effects = Vec::new();
        app.handle_toggle_play_pause(1, &mut effects);
        assert!(effects.is_empty());
        assert_eq!(app.deck.card(1).unwrap().lifecycle, CardLifecycle::Paused);

        app.deck.card_mut(2).resume();
        app.handle_toggle_play_pause(1, &mut effects);
        assert_eq!(app.deck.card(1).unwrap().lifecycle, CardLifecycle::Playing);
        assert_eq!(app.deck.card(2).unwrap().lifecycle, CardLifecycle::Paused);
        assert_eq!(app.deck.playing_count(), 1);
    }

    #[test]
    fn toggling_an_unknown_etude_is_ignored() {
        let mut app = test_app(vec![etude(1, "1")]);
        let mut effects = Vec::new();
        app.handle_toggle_play_pause(99, &mut effects);
        assert!(effects.is_empty());
    }

    #[test]
    fn stop_resets_position_from_any_state() {
        let mut app = test_app(vec![etude(1, "1")]);
        app.deck.card_mut(1).resume();
        app.deck.card_mut(1).current_time = Duration::from_secs(30);

        app.handle_stop(1);
        let card = app.deck.card(1).unwrap();
        assert_eq!(card.lifecycle, CardLifecycle::Idle);
        assert_eq!(card.current_time, Duration::ZERO);
    }

    #[test]
    fn volume_is_clamped_and_stored() {
        let mut app = test_app(vec![etude(1, "1")]);
        app.handle_volume_changed(1, 4.2);
        assert_eq!(app.deck.card(1).unwrap().volume, 1.0);
        app.handle_volume_changed(1, -1.0);
        assert_eq!(app.deck.card(1).unwrap().volume, 0.0);
    }

    #[test]
    fn seek_without_duration_is_a_no_op() {
        let mut app = test_app(vec![etude(1, "1")]);
        app.deck.card_mut(1).current_time = Duration::from_secs(5);
        app.handle_seek_to(1, 50.0);
        assert_eq!(
            app.deck.card(1).unwrap().current_time,
            Duration::from_secs(5)
        );
    }

    #[test]
    fn stale_fetch_results_are_dropped() {
        let mut app = test_app(vec![etude(1, "1")]);
        let mut effects = Vec::new();
        app.handle_toggle_play_pause(1, &mut effects);
        assert!(app.deck.card(1).unwrap().fetch_in_flight);

        app.handle_audio_fetched(1, 999, None, Some("late".to_string()));
        assert!(app.deck.card(1).unwrap().fetch_in_flight);
    }

    #[test]
    fn stop_cancels_a_pending_fetch() {
        let mut app = test_app(vec![etude(1, "1")]);
        let mut effects = Vec::new();
        app.handle_toggle_play_pause(1, &mut effects);
        let request_id = app.deck.card(1).unwrap().pending_request.unwrap();

        app.handle_stop(1);
        let card = app.deck.card(1).unwrap();
        assert!(!card.fetch_in_flight);
        assert!(card.pending_request.is_none());

        // The fetch the user abandoned resolves later; it must not start
        // playback, and the card must accept a fresh toggle.
        app.handle_audio_fetched(1, request_id, Some("etude.mp3".into()), None);
        assert_eq!(app.deck.card(1).unwrap().lifecycle, CardLifecycle::Idle);

        app.handle_toggle_play_pause(1, &mut effects);
        assert_eq!(effects.len(), 2);
        assert!(app.deck.card(1).unwrap().fetch_in_flight);
    }

    #[test]
    fn failed_fetch_returns_the_card_to_idle() {
        let mut app = test_app(vec![etude(1, "1")]);
        let mut effects = Vec::new();
        app.handle_toggle_play_pause(1, &mut effects);
        let request_id = app.deck.card(1).unwrap().pending_request.unwrap();

        app.handle_audio_fetched(1, request_id, None, Some("404".to_string()));
        let card = app.deck.card(1).unwrap();
        assert!(!card.fetch_in_flight);
        assert_eq!(card.lifecycle, CardLifecycle::Idle);
        assert_eq!(card.current_time, Duration::ZERO);
    }
}
