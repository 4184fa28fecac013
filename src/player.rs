//! Audio playback for one etude card, backed by `rodio`.
//!
//! Each card that starts playing owns one output stream and sink. The sink is
//! not trusted as a clock; playback position is derived from `Instant`
//! accounting in [`PlaybackClock`] so that pause, resume, and seek keep the
//! displayed time consistent even while the sink buffers.

use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Wall-clock accounting for the current playback position.
///
/// `origin` is the stream position the clock was last anchored to (zero at
/// start, the target after a seek); `accumulated` is audible time collected
/// across pause/resume cycles since that anchor.
#[derive(Debug, Clone, Copy)]
pub struct PlaybackClock {
    origin: Duration,
    accumulated: Duration,
    started_at: Option<Instant>,
}

impl PlaybackClock {
    pub fn running(origin: Duration, now: Instant) -> PlaybackClock {
        PlaybackClock {
            origin,
            accumulated: Duration::ZERO,
            started_at: Some(now),
        }
    }

    pub fn pause(&mut self, now: Instant) {
        if let Some(started) = self.started_at.take() {
            self.accumulated += now.saturating_duration_since(started);
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// Re-anchor the clock at a new stream position, keeping the run state.
    pub fn seek(&mut self, position: Duration, now: Instant) {
        self.origin = position;
        self.accumulated = Duration::ZERO;
        if self.started_at.is_some() {
            self.started_at = Some(now);
        }
    }

    pub fn position(&self, now: Instant) -> Duration {
        let running = self
            .started_at
            .map(|started| now.saturating_duration_since(started))
            .unwrap_or(Duration::ZERO);
        self.origin + self.accumulated + running
    }
}

/// One live audio stream with transport controls.
pub struct AudioPlayback {
    _stream: OutputStream,
    sink: Sink,
    duration: Option<Duration>,
    clock: PlaybackClock,
}

impl AudioPlayback {
    /// Decode a cached file and start playing it immediately.
    pub fn start(path: &Path, volume: f32) -> Result<AudioPlayback> {
        let (_stream, handle) = OutputStream::try_default().context("Opening audio output")?;
        let sink = Sink::try_new(&handle).context("Creating sink")?;

        let file = File::open(path).with_context(|| format!("Opening {}", path.display()))?;
        let source = Decoder::new(BufReader::new(file))
            .with_context(|| format!("Decoding {}", path.display()))?;
        let duration = source.total_duration();

        sink.set_volume(volume.clamp(0.0, 1.0));
        sink.append(source);
        sink.play();
        debug!(path = %path.display(), duration = ?duration, "Started audio stream");

        Ok(AudioPlayback {
            _stream,
            sink,
            duration,
            clock: PlaybackClock::running(Duration::ZERO, Instant::now()),
        })
    }

    pub fn pause(&mut self) {
        self.sink.pause();
        self.clock.pause(Instant::now());
    }

    pub fn resume(&mut self) {
        self.sink.play();
        self.clock.resume(Instant::now());
    }

    pub fn is_paused(&self) -> bool {
        self.sink.is_paused()
    }

    /// The sink has drained every queued source.
    pub fn is_finished(&self) -> bool {
        self.sink.empty()
    }

    pub fn set_volume(&self, volume: f32) {
        self.sink.set_volume(volume.clamp(0.0, 1.0));
    }

    /// Relocate the stream. Failures leave position untouched; the caller
    /// treats them as a no-op.
    pub fn seek(&mut self, position: Duration) {
        match self.sink.try_seek(position) {
            Ok(()) => self.clock.seek(position, Instant::now()),
            Err(err) => warn!(?position, "Seek not supported by source: {err}"),
        }
    }

    pub fn position(&self, now: Instant) -> Duration {
        let raw = self.clock.position(now);
        match self.duration {
            Some(total) => raw.min(total),
            None => raw,
        }
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn stop(self) {
        self.sink.stop();
        // stream dropped automatically
    }
}
