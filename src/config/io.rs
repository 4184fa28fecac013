use super::models::AppConfig;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from a TOML file, falling back to defaults when the
/// file is missing or malformed.
pub fn load_config(path: &Path) -> AppConfig {
    match fs::read_to_string(path) {
        Ok(data) => match toml::from_str::<AppConfig>(&data) {
            Ok(mut config) => {
                clamp_config(&mut config);
                info!(path = %path.display(), "Loaded configuration");
                config
            }
            Err(err) => {
                warn!(path = %path.display(), "Invalid config, using defaults: {err}");
                AppConfig::default()
            }
        },
        Err(err) => {
            debug!(path = %path.display(), "No config file, using defaults: {err}");
            AppConfig::default()
        }
    }
}

fn clamp_config(config: &mut AppConfig) {
    config.window_width = config.window_width.clamp(480.0, 7680.0);
    config.window_height = config.window_height.clamp(360.0, 4320.0);
    config.window_pos_x = config.window_pos_x.filter(|v| v.is_finite());
    config.window_pos_y = config.window_pos_y.filter(|v| v.is_finite());
    config.default_volume = config.default_volume.clamp(0.0, 1.0);
    if config.asset_base_url.trim().is_empty() {
        config.asset_base_url = super::defaults::default_asset_base_url();
    }
}

#[cfg(test)]
mod tests {
    use super::clamp_config;
    use crate::config::AppConfig;

    #[test]
    fn clamps_out_of_range_values() {
        let mut config = AppConfig {
            window_width: 10.0,
            window_height: 100_000.0,
            window_pos_x: Some(f32::NAN),
            default_volume: 3.0,
            asset_base_url: "   ".to_string(),
            ..AppConfig::default()
        };
        clamp_config(&mut config);
        assert_eq!(config.window_width, 480.0);
        assert_eq!(config.window_height, 4320.0);
        assert!(config.window_pos_x.is_none());
        assert_eq!(config.default_volume, 1.0);
        assert!(!config.asset_base_url.trim().is_empty());
    }
}
