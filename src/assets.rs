//! Remote audio assets and the naming scheme tying them to etude numbers.
//!
//! Every etude's recording is published as `NNN.mp3` where `NNN` is the
//! display number left-padded to three digits. Numbers wider than three
//! digits keep their full width.

use crate::cache;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

pub const ASSET_NUMBER_WIDTH: usize = 3;

/// Build the published URL for one etude's recording.
pub fn audio_url(base_url: &str, display_number: &str) -> String {
    format!(
        "{}/{}.mp3",
        base_url.trim_end_matches('/'),
        zero_pad(display_number, ASSET_NUMBER_WIDTH)
    )
}

/// Left-pad with zeros to `width`; longer inputs pass through untouched.
fn zero_pad(number: &str, width: usize) -> String {
    if number.len() >= width {
        number.to_string()
    } else {
        format!("{}{}", "0".repeat(width - number.len()), number)
    }
}

/// Resolve a remote asset to a local file, downloading on first use.
pub async fn fetch_audio(url: &str) -> Result<PathBuf> {
    let path = cache::audio_cache_path(url);
    if path.exists() {
        debug!(url, path = %path.display(), "Audio cache hit");
        return Ok(path);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create cache dir {}", parent.display()))?;
    }

    info!(url, "Downloading audio asset");
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("Failed to request {url}"))?
        .error_for_status()
        .with_context(|| format!("Server rejected {url}"))?;
    let bytes = response
        .bytes()
        .await
        .with_context(|| format!("Failed to read body of {url}"))?;
    fs::write(&path, &bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(url, bytes = bytes.len(), path = %path.display(), "Cached audio asset");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::{audio_url, zero_pad};

    #[test]
    fn pads_short_numbers_to_three_digits() {
        assert_eq!(zero_pad("1", 3), "001");
        assert_eq!(zero_pad("15", 3), "015");
        assert_eq!(zero_pad("100", 3), "100");
    }

    #[test]
    fn never_truncates_wide_numbers() {
        assert_eq!(zero_pad("1234", 3), "1234");
    }

    #[test]
    fn url_joins_base_and_padded_number() {
        assert_eq!(
            audio_url("https://host/releases/", "7"),
            "https://host/releases/007.mp3"
        );
        assert_eq!(
            audio_url("https://host/releases", "450"),
            "https://host/releases/450.mp3"
        );
    }
}
