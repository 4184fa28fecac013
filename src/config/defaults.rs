pub(crate) fn default_window_width() -> f32 {
    1280.0
}

pub(crate) fn default_window_height() -> f32 {
    860.0
}

pub(crate) fn default_asset_base_url() -> String {
    "https://github.com/DDDDrew8/kiryushin/releases/download/Kyryushin".to_string()
}

pub(crate) fn default_catalog_path() -> String {
    "conf/etudes.toml".to_string()
}

pub(crate) fn default_volume() -> f32 {
    1.0
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Info
}
