use super::state::SectionId;
use crate::catalog::EtudeId;
use std::path::PathBuf;
use std::time::Instant;

/// Messages emitted by the UI.
#[derive(Debug, Clone)]
pub enum Message {
    SearchQueryChanged(String),
    ToggleTheme,
    TogglePlayPause(EtudeId),
    Stop(EtudeId),
    VolumeChanged(EtudeId, f32),
    SeekTo(EtudeId, f32),
    AudioFetched {
        id: EtudeId,
        request_id: u64,
        path: Option<PathBuf>,
        error: Option<String>,
    },
    NavLinkClicked(SectionId),
    Scrolled {
        offset_y: f32,
    },
    WindowResized {
        width: f32,
        height: f32,
    },
    WindowMoved {
        x: f32,
        y: f32,
    },
    Tick(Instant),
}
