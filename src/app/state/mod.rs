mod constants;
mod deck;
mod nav;
mod ui;

use crate::catalog::{Catalog, Etude};
use crate::config::AppConfig;
use iced::Task;

use super::messages::Message;

pub(crate) use constants::*;
pub(in crate::app) use deck::{CardLifecycle, Deck};
pub(crate) use nav::{NavState, SectionId, SectionOffset};
pub(in crate::app) use ui::SearchState;

/// Core application state composed of sub-models.
pub struct App {
    pub(super) config: AppConfig,
    pub(super) catalog: Catalog,
    pub(super) search: SearchState,
    pub(super) deck: Deck,
    pub(super) nav: NavState,
}

impl App {
    pub(super) fn bootstrap(catalog: Catalog, config: AppConfig) -> (App, Task<Message>) {
        let mut app = App {
            deck: Deck::new(config.default_volume),
            catalog,
            search: SearchState::default(),
            nav: NavState::new(),
            config,
        };
        app.recalculate_section_offsets();
        tracing::info!(
            etudes = app.catalog.search("").len(),
            night_mode = matches!(app.config.theme, crate::config::ThemeMode::Night),
            "Initialized app state"
        );
        (app, Task::none())
    }

    /// Visible etudes for the current query, in catalog order.
    pub(super) fn filtered_etudes(&self) -> Vec<&Etude> {
        self.catalog.search(&self.search.query)
    }

    /// Rebuild the cached section geometry from the estimated page layout.
    ///
    /// Runs on bootstrap and window resize only; scrolling never remeasures.
    /// The estimate mirrors the view: a viewport-high hero, the grid section
    /// sized by its row count, then a fixed-height about block.
    pub(super) fn recalculate_section_offsets(&mut self) {
        let hero_height = self.hero_height();

        let card_count = self.filtered_etudes().len();
        let rows = card_count.div_ceil(GRID_COLUMNS).max(1);
        let grid_height = ETUDES_HEADER_PX + rows as f32 * (CARD_HEIGHT_PX + GRID_SPACING_PX);

        self.nav.set_offsets(vec![
            SectionOffset {
                id: SectionId::Home,
                offset_top: 0.0,
                offset_height: hero_height,
            },
            SectionOffset {
                id: SectionId::Etudes,
                offset_top: hero_height,
                offset_height: grid_height,
            },
            SectionOffset {
                id: SectionId::About,
                offset_top: hero_height + grid_height,
                offset_height: ABOUT_HEIGHT_PX,
            },
        ]);
    }

    pub(super) fn hero_height(&self) -> f32 {
        self.config.window_height.max(MIN_HERO_HEIGHT_PX)
    }

    pub(super) fn save_config(&self) {
        crate::cache::save_cached_config(&self.config);
    }
}

#[cfg(test)]
pub(in crate::app) mod tests {
    use super::App;
    use crate::catalog::{Catalog, Etude};
    use crate::config::AppConfig;

    pub(in crate::app) fn test_app(etudes: Vec<Etude>) -> App {
        let (app, _) = App::bootstrap(Catalog::from_etudes(etudes), AppConfig::default());
        app
    }

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
    fn section_offsets_are_contiguous_in_document_order() {
        let app = test_app(vec![etude(1, "1"), etude(2, "2")]);
        let etudes_top = app.nav.offset_top(super::SectionId::Etudes).unwrap();
        let about_top = app.nav.offset_top(super::SectionId::About).unwrap();
        assert_eq!(etudes_top, app.hero_height());
        assert!(about_top > etudes_top);
    }
}
