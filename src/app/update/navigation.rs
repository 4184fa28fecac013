//! Nav bar and scroll handlers.

use super::super::state::{App, SectionId};
use super::Effect;
use tracing::{debug, info};

impl App {
    /// Explicit link activation wins over the scroll-derived highlight, then
    /// the target section is scrolled into view (top of page for home).
    pub(super) fn handle_nav_link_clicked(
        &mut self,
        section: SectionId,
        effects: &mut Vec<Effect>,
    ) {
        info!(section = %section, "Nav link activated");
        self.nav.activate(section);
        effects.push(Effect::ScrollToSection(section));
    }

    pub(super) fn handle_scrolled(&mut self, offset_y: f32) {
        self.nav.handle_scroll(offset_y);
    }

    pub(super) fn handle_window_resized(
        &mut self,
        width: f32,
        height: f32,
        effects: &mut Vec<Effect>,
    ) {
        if width.is_finite() && height.is_finite() {
            self.config.window_width = width.max(1.0);
            self.config.window_height = height.max(1.0);
        }
        // Resize is the only event besides bootstrap that remeasures sections.
        self.recalculate_section_offsets();
        debug!(width, height, "Window resized");
        effects.push(Effect::SaveConfig);
    }

    pub(super) fn handle_window_moved(&mut self, x: f32, y: f32, effects: &mut Vec<Effect>) {
        if x.is_finite() && y.is_finite() {
            self.config.window_pos_x = Some(x);
            self.config.window_pos_y = Some(y);
            effects.push(Effect::SaveConfig);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::state::tests::test_app;
    use super::super::super::state::SectionId;
    use super::super::Effect;

    #[test]
    fn activating_home_requests_a_scroll_to_top() {
        let mut app = test_app(Vec::new());
        app.handle_scrolled(5_000.0);

        let mut effects = Vec::new();
        app.handle_nav_link_clicked(SectionId::Home, &mut effects);

        assert_eq!(app.nav.active_section, SectionId::Home);
        assert!(matches!(
            effects.as_slice(),
            [Effect::ScrollToSection(SectionId::Home)]
        ));
    }

    #[test]
    fn resize_remeasures_sections() {
        let mut app = test_app(Vec::new());
        let before = app.nav.offset_top(SectionId::Etudes).unwrap();

        let mut effects = Vec::new();
        app.handle_window_resized(1280.0, 2_000.0, &mut effects);

        let after = app.nav.offset_top(SectionId::Etudes).unwrap();
        assert!(after > before);
        assert!(matches!(effects.as_slice(), [Effect::SaveConfig]));
    }
}
