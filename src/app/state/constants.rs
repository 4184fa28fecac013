use iced::widget::scrollable::Id as ScrollId;
use once_cell::sync::Lazy;

/// Scroll offset past which the nav bar switches to its compact style.
pub(crate) const SCROLL_THRESHOLD_PX: f32 = 50.0;
/// Pre-offset subtracted from section tops so the fixed nav bar does not
/// obscure a section boundary before its link activates.
pub(crate) const NAV_BAR_OFFSET_PX: f32 = 100.0;

pub(crate) const GRID_COLUMNS: usize = 3;
pub(crate) const CARD_HEIGHT_PX: f32 = 280.0;
pub(crate) const GRID_SPACING_PX: f32 = 16.0;
pub(crate) const ETUDES_HEADER_PX: f32 = 190.0;
pub(crate) const ABOUT_HEIGHT_PX: f32 = 420.0;
pub(crate) const MIN_HERO_HEIGHT_PX: f32 = 360.0;

pub(crate) const MIN_VOLUME: f32 = 0.0;
pub(crate) const MAX_VOLUME: f32 = 1.0;
pub(crate) const TICK_INTERVAL_MS: u64 = 100;

pub(crate) static PAGE_SCROLL_ID: Lazy<ScrollId> = Lazy::new(|| ScrollId::new("page-scroll"));
