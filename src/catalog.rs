//! The etude catalog: a TOML-described list of numbered exercises.
//!
//! Every card on the page comes from here. Entries keep their file order,
//! which is also the order sections and search results render in.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub type EtudeId = u64;

static DISPLAY_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid literal regex"));

/// One catalog entry. Only the id and display number are required; the rest
/// is presentation detail the card renders when present.
#[derive(Debug, Clone, Deserialize)]
pub struct Etude {
    pub id: EtudeId,
    pub display_number: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub notation: Option<String>,
    #[serde(default)]
    pub pdf_ref: Option<String>,
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "etude")]
    etudes: Vec<Etude>,
}

pub struct Catalog {
    etudes: Vec<Etude>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Catalog> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let file: CatalogFile = toml::from_str(&data)
            .with_context(|| format!("Failed to parse catalog {}", path.display()))?;

        for etude in &file.etudes {
            if !DISPLAY_NUMBER.is_match(&etude.display_number) {
                // Non-numeric numbers still render, but their asset URL will
                // not match any published file.
                warn!(
                    id = etude.id,
                    number = %etude.display_number,
                    "Display number is not numeric"
                );
            }
        }
        for id in duplicate_ids(&file.etudes) {
            // Ids key all per-card playback state; duplicates would make two
            // cards share one transport.
            warn!(id, "Duplicate etude id");
        }
        info!(path = %path.display(), etudes = file.etudes.len(), "Loaded catalog");
        Ok(Catalog::from_etudes(file.etudes))
    }

    pub fn from_etudes(etudes: Vec<Etude>) -> Catalog {
        Catalog { etudes }
    }

    pub fn get(&self, id: EtudeId) -> Option<&Etude> {
        self.etudes.iter().find(|etude| etude.id == id)
    }

    fn visible(&self) -> impl Iterator<Item = &Etude> {
        self.etudes.iter().filter(|etude| !etude.hidden)
    }

    /// Substring match against display numbers. A blank query returns the
    /// whole visible catalog, in file order.
    pub fn search(&self, query: &str) -> Vec<&Etude> {
        let needle = query.trim();
        if needle.is_empty() {
            return self.visible().collect();
        }
        self.visible()
            .filter(|etude| etude.display_number.contains(needle))
            .collect()
    }
}

/// Ids seen more than once, in first-repeat order.
fn duplicate_ids(etudes: &[Etude]) -> Vec<EtudeId> {
    let mut seen = std::collections::HashSet::new();
    let mut duplicates = Vec::new();
    for etude in etudes {
        if !seen.insert(etude.id) && !duplicates.contains(&etude.id) {
            duplicates.push(etude.id);
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::{Catalog, Etude, duplicate_ids};

    fn etude(id: u64, number: &str, hidden: bool) -> Etude {
        Etude {
            id,
            display_number: number.to_string(),
            title: None,
            desc: None,
            notation: None,
            pdf_ref: None,
            hidden,
        }
    }

    #[test]
    fn parses_entries_with_defaults() {
        let file: super::CatalogFile = toml::from_str(
            r#"
            [[etude]]
            id = 1
            display_number = "1"
            title = "Broken thirds"

            [[etude]]
            id = 2
            display_number = "15"
            "#,
        )
        .unwrap();
        assert_eq!(file.etudes.len(), 2);
        assert_eq!(file.etudes[0].title.as_deref(), Some("Broken thirds"));
        assert!(file.etudes[1].title.is_none());
        assert!(!file.etudes[1].hidden);
    }

    #[test]
    fn hidden_etudes_never_match() {
        let catalog = Catalog::from_etudes(vec![
            etude(1, "1", false),
            etude(2, "15", true),
            etude(3, "150", false),
        ]);
        let hits = catalog.search("15");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 3);
    }

    #[test]
    fn blank_query_returns_everything_in_file_order() {
        let catalog = Catalog::from_etudes(vec![
            etude(3, "3", false),
            etude(1, "1", false),
            etude(2, "2", false),
        ]);
        let ids: Vec<u64> = catalog.search("  ").iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn repeated_ids_are_reported_once() {
        let etudes = vec![
            etude(1, "1", false),
            etude(2, "2", false),
            etude(1, "3", false),
            etude(1, "4", false),
            etude(2, "5", false),
        ];
        assert_eq!(duplicate_ids(&etudes), vec![1, 2]);
        assert!(duplicate_ids(&etudes[..2]).is_empty());
    }

    #[test]
    fn substring_match_covers_multi_digit_numbers() {
        let catalog = Catalog::from_etudes(vec![
            etude(1, "1", false),
            etude(10, "10", false),
            etude(100, "100", false),
        ]);
        assert_eq!(catalog.search("1").len(), 3);
        assert_eq!(catalog.search("10").len(), 2);
        assert_eq!(catalog.search("100").len(), 1);
        assert!(catalog.search("7").is_empty());
    }
}
