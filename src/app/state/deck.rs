//! Per-card playback state and the shared registry enforcing that at most
//! one etude is audible at a time.
//!
//! The registry is the single owner of every card's transport state; cards
//! never discover each other. Lifecycle transitions are valid without a live
//! audio handle so the state machine stays testable off an audio device; the
//! handle operations are side effects layered on top.

use crate::catalog::EtudeId;
use crate::player::AudioPlayback;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardLifecycle {
    Idle,
    Playing,
    Paused,
}

/// Transport state for one rendered card.
pub struct CardPlayback {
    pub lifecycle: CardLifecycle,
    pub volume: f32,
    pub current_time: Duration,
    pub duration: Option<Duration>,
    pub handle: Option<AudioPlayback>,
    pub fetch_in_flight: bool,
    pub pending_request: Option<u64>,
}

impl CardPlayback {
    fn new(volume: f32) -> CardPlayback {
        CardPlayback {
            lifecycle: CardLifecycle::Idle,
            volume,
            current_time: Duration::ZERO,
            duration: None,
            handle: None,
            fetch_in_flight: false,
            pending_request: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.lifecycle == CardLifecycle::Playing
    }

    pub fn pause(&mut self) {
        if let Some(handle) = &mut self.handle {
            handle.pause();
            self.current_time = handle.position(Instant::now());
        }
        if self.lifecycle == CardLifecycle::Playing {
            self.lifecycle = CardLifecycle::Paused;
        }
    }

    pub fn resume(&mut self) {
        if let Some(handle) = &mut self.handle {
            handle.resume();
        }
        self.lifecycle = CardLifecycle::Playing;
    }

    /// Stop semantics: any state back to idle with the position reset.
    /// Clearing the request bookkeeping makes an in-flight fetch stale, so
    /// its eventual result cannot start a card the user already stopped.
    pub fn reset(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.stop();
        }
        self.lifecycle = CardLifecycle::Idle;
        self.current_time = Duration::ZERO;
        self.fetch_in_flight = false;
        self.pending_request = None;
    }

    pub fn progress_percent(&self) -> f32 {
        progress_percent(self.current_time, self.duration)
    }
}

/// Derived 0-100 progress for the card's slider. Unknown, zero, or broken
/// durations all yield 0 so the view never sees a NaN.
pub fn progress_percent(current: Duration, duration: Option<Duration>) -> f32 {
    let Some(total) = duration.filter(|total| !total.is_zero()) else {
        return 0.0;
    };
    let percent = (current.as_secs_f64() / total.as_secs_f64() * 100.0) as f32;
    if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Registry of every card's playback state, owned by the app.
pub struct Deck {
    cards: BTreeMap<EtudeId, CardPlayback>,
    default_volume: f32,
    next_request_id: u64,
}

impl Deck {
    pub fn new(default_volume: f32) -> Deck {
        Deck {
            cards: BTreeMap::new(),
            default_volume: default_volume.clamp(0.0, 1.0),
            next_request_id: 0,
        }
    }

    pub fn card(&self, id: EtudeId) -> Option<&CardPlayback> {
        self.cards.get(&id)
    }

    pub fn card_mut(&mut self, id: EtudeId) -> &mut CardPlayback {
        let volume = self.default_volume;
        self.cards.entry(id).or_insert_with(|| CardPlayback::new(volume))
    }

    /// Silence every other card before `id` starts. Synchronous, so at most
    /// one card is playing at the transition boundary.
    pub fn pause_all_except(&mut self, id: EtudeId) {
        let mut paused = 0usize;
        for (&card_id, card) in self.cards.iter_mut() {
            if card_id != id && card.is_playing() {
                card.pause();
                paused += 1;
            }
        }
        if paused > 0 {
            debug!(starting = id, paused, "Paused sibling cards");
        }
    }

    pub fn any_playing(&self) -> bool {
        self.cards.values().any(CardPlayback::is_playing)
    }

    pub fn playing_count(&self) -> usize {
        self.cards.values().filter(|card| card.is_playing()).count()
    }

    pub fn cards_mut(&mut self) -> impl Iterator<Item = (&EtudeId, &mut CardPlayback)> {
        self.cards.iter_mut()
    }

    pub fn next_request_id(&mut self) -> u64 {
        self.next_request_id = self.next_request_id.wrapping_add(1);
        self.next_request_id
    }

    pub fn default_volume(&self) -> f32 {
        self.default_volume
    }
}

#[cfg(test)]
mod tests {
    use super::{CardLifecycle, Deck, progress_percent};
    use std::time::Duration;

    #[test]
    fn progress_is_zero_without_a_usable_duration() {
        assert_eq!(progress_percent(Duration::from_secs(10), None), 0.0);
        assert_eq!(
            progress_percent(Duration::from_secs(10), Some(Duration::ZERO)),
            0.0
        );
    }

    #[test]
    fn progress_is_clamped_to_one_hundred() {
        let total = Some(Duration::from_secs(100));
        assert_eq!(progress_percent(Duration::from_secs(25), total), 25.0);
        assert_eq!(progress_percent(Duration::from_secs(500), total), 100.0);
    }

    #[test]
    fn starting_one_card_pauses_the_rest() {
        let mut deck = Deck::new(1.0);
        deck.card_mut(1).resume();
        assert!(deck.card(1).is_some_and(|card| card.is_playing()));

        deck.pause_all_except(2);
        deck.card_mut(2).resume();

        assert_eq!(deck.card(1).unwrap().lifecycle, CardLifecycle::Paused);
        assert_eq!(deck.card(2).unwrap().lifecycle, CardLifecycle::Playing);
        assert_eq!(deck.playing_count(), 1);
    }

    #[test]
    fn reset_returns_to_idle_with_zero_position_from_any_state() {
        let mut deck = Deck::new(1.0);

        let card = deck.card_mut(7);
        card.reset();
        assert_eq!(card.lifecycle, CardLifecycle::Idle);

        card.resume();
        card.current_time = Duration::from_secs(42);
        card.reset();
        assert_eq!(card.lifecycle, CardLifecycle::Idle);
        assert_eq!(card.current_time, Duration::ZERO);

        card.resume();
        card.pause();
        card.reset();
        assert_eq!(card.lifecycle, CardLifecycle::Idle);
        assert_eq!(card.current_time, Duration::ZERO);
    }

    #[test]
    fn pausing_an_idle_card_keeps_it_idle() {
        let mut deck = Deck::new(1.0);
        deck.card_mut(3).pause();
        assert_eq!(deck.card(3).unwrap().lifecycle, CardLifecycle::Idle);
    }

    #[test]
    fn new_cards_inherit_the_default_volume() {
        let mut deck = Deck::new(0.4);
        assert_eq!(deck.card_mut(9).volume, 0.4);
    }
}
