//! Local cache layout under `.cache/`.
//!
//! Two things live here: downloaded MP3 assets named by a hash of their URL,
//! and the user's last-saved configuration overlay. Write errors are ignored
//! to keep the UI responsive.

use crate::config::AppConfig;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

pub const CACHE_DIR: &str = ".cache";

/// Cached location for one remote audio asset.
pub fn audio_cache_path(url: &str) -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let hash = format!("{:x}", hasher.finalize());
    Path::new(CACHE_DIR).join("audio").join(format!("{hash}.mp3"))
}

fn config_path() -> PathBuf {
    Path::new(CACHE_DIR).join("config.toml")
}

/// Load the saved configuration overlay, if one exists.
pub fn load_cached_config() -> Option<AppConfig> {
    let data = fs::read_to_string(config_path()).ok()?;
    toml::from_str(&data).ok()
}

/// Persist the current configuration for the next run.
pub fn save_cached_config(config: &AppConfig) {
    let path = config_path();
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(contents) = toml::to_string(config) {
        let _ = fs::write(path, contents);
    }
}

#[cfg(test)]
mod tests {
    use super::audio_cache_path;

    #[test]
    fn cache_paths_are_stable_and_distinct() {
        let a = audio_cache_path("https://example.com/001.mp3");
        let b = audio_cache_path("https://example.com/002.mp3");
        assert_eq!(a, audio_cache_path("https://example.com/001.mp3"));
        assert_ne!(a, b);
        assert!(a.extension().is_some_and(|ext| ext == "mp3"));
    }
}
