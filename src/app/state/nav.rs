//! Scroll-driven tracking of the active page section.
//!
//! Section geometry is cached and only recomputed on bootstrap and window
//! resize; between recomputations the cache may be stale, which is an
//! accepted trade-off inherited from the page design. Every scroll update is
//! a linear scan over the handful of cached entries.

use super::constants::{NAV_BAR_OFFSET_PX, SCROLL_THRESHOLD_PX};
use tracing::debug;

/// Labeled page sections, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionId {
    Home,
    Etudes,
    About,
}

impl SectionId {
    pub const ALL: [SectionId; 3] = [SectionId::Home, SectionId::Etudes, SectionId::About];

    pub fn label(self) -> &'static str {
        match self {
            SectionId::Home => "Home",
            SectionId::Etudes => "Etudes",
            SectionId::About => "About",
        }
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Cached geometry snapshot of one section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionOffset {
    pub id: SectionId,
    pub offset_top: f32,
    pub offset_height: f32,
}

/// Derived navigation state consumed by the nav bar for styling.
#[derive(Debug, Clone)]
pub struct NavState {
    pub scrolled_past_threshold: bool,
    pub active_section: SectionId,
    offsets: Vec<SectionOffset>,
}

impl NavState {
    pub fn new() -> NavState {
        NavState {
            scrolled_past_threshold: false,
            active_section: SectionId::Home,
            offsets: Vec::new(),
        }
    }

    /// Replace the cached geometry. Called on bootstrap and resize only.
    pub fn set_offsets(&mut self, offsets: Vec<SectionOffset>) {
        debug!(sections = offsets.len(), "Recalculated section offsets");
        self.offsets = offsets;
    }

    /// Fold one scroll position into the derived state.
    pub fn handle_scroll(&mut self, scroll_y: f32) {
        let scroll_y = if scroll_y.is_finite() {
            scroll_y.max(0.0)
        } else {
            0.0
        };
        self.scrolled_past_threshold = scroll_y > SCROLL_THRESHOLD_PX;
        self.active_section = self.section_for(scroll_y);
    }

    /// First section whose pre-offset range contains the scroll position;
    /// document order breaks ties, home when nothing matches.
    fn section_for(&self, scroll_y: f32) -> SectionId {
        for section in &self.offsets {
            let top = section.offset_top - NAV_BAR_OFFSET_PX;
            let bottom = top + section.offset_height;
            if scroll_y >= top && scroll_y < bottom {
                return section.id;
            }
        }
        SectionId::Home
    }

    /// Explicit link activation overrides the derived highlight.
    pub fn activate(&mut self, target: SectionId) {
        self.active_section = target;
    }

    pub fn offset_top(&self, id: SectionId) -> Option<f32> {
        self.offsets
            .iter()
            .find(|section| section.id == id)
            .map(|section| section.offset_top)
    }
}

#[cfg(test)]
mod tests {
    use super::{NavState, SectionId, SectionOffset};

    fn tracker() -> NavState {
        let mut nav = NavState::new();
        nav.set_offsets(vec![
            SectionOffset {
                id: SectionId::Home,
                offset_top: 0.0,
                offset_height: 500.0,
            },
            SectionOffset {
                id: SectionId::About,
                offset_top: 500.0,
                offset_height: 400.0,
            },
        ]);
        nav
    }

    #[test]
    fn selects_section_with_nav_bar_pre_offset() {
        let mut nav = tracker();
        // 450 >= 500 - 100, so the second section already wins.
        nav.handle_scroll(450.0);
        assert_eq!(nav.active_section, SectionId::About);
        nav.handle_scroll(399.0);
        assert_eq!(nav.active_section, SectionId::Home);
    }

    #[test]
    fn threshold_is_strictly_greater_than_fifty() {
        let mut nav = tracker();
        nav.handle_scroll(50.0);
        assert!(!nav.scrolled_past_threshold);
        nav.handle_scroll(51.0);
        assert!(nav.scrolled_past_threshold);
    }

    #[test]
    fn falls_back_to_home_when_nothing_matches() {
        let mut nav = tracker();
        nav.handle_scroll(2_000.0);
        assert_eq!(nav.active_section, SectionId::Home);
    }

    #[test]
    fn non_finite_scroll_degrades_to_top() {
        let mut nav = tracker();
        nav.handle_scroll(f32::NAN);
        assert!(!nav.scrolled_past_threshold);
        assert_eq!(nav.active_section, SectionId::Home);
    }

    #[test]
    fn activation_overrides_derived_highlight() {
        let mut nav = tracker();
        nav.handle_scroll(450.0);
        nav.activate(SectionId::Home);
        assert_eq!(nav.active_section, SectionId::Home);
    }
}
