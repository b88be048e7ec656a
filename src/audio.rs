//! Background music
//!
//! The game only decides *which* track should be playing; a backend does the
//! actual playback. Every backend call is best-effort and a missing asset
//! degrades to silence.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default music volume
pub const DEFAULT_VOLUME: f32 = 0.3;

/// Volume change per key press
pub const VOLUME_STEP: f32 = 0.1;

/// Music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MusicTrack {
    /// Idle/menu loop
    Menu,
    /// In-round loop
    Gameplay,
    /// Played once when a round ends
    GameOver,
}

impl MusicTrack {
    pub fn as_str(&self) -> &'static str {
        match self {
            MusicTrack::Menu => "menu",
            MusicTrack::Gameplay => "gameplay",
            MusicTrack::GameOver => "gameover",
        }
    }

    /// Whether the track repeats until replaced
    pub fn looped(&self) -> bool {
        !matches!(self, MusicTrack::GameOver)
    }

    /// Candidate asset files, in lookup order
    pub fn asset_candidates(&self, dir: &Path) -> [PathBuf; 2] {
        let stem = format!("{}_theme", self.as_str());
        [
            dir.join(format!("{}.ogg", stem)),
            dir.join(format!("{}.mp3", stem)),
        ]
    }
}

/// Playback service the game calls into
pub trait AudioBackend {
    fn play_track(&mut self, track: MusicTrack, looped: bool);
    fn stop_track(&mut self);
    /// Volume in 0.0 - 1.0
    fn set_volume(&mut self, volume: f32);
}

/// Silent backend
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioBackend for NullAudio {
    fn play_track(&mut self, _track: MusicTrack, _looped: bool) {}
    fn stop_track(&mut self) {}
    fn set_volume(&mut self, _volume: f32) {}
}

/// Headless backend: resolves assets on disk and logs what it would play
#[derive(Debug, Clone)]
pub struct LoggingAudio {
    asset_dir: PathBuf,
    warned: HashSet<MusicTrack>,
    playing: Option<MusicTrack>,
}

impl LoggingAudio {
    pub fn new(asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            warned: HashSet::new(),
            playing: None,
        }
    }

    /// First existing asset for a track
    pub fn resolve(&self, track: MusicTrack) -> Option<PathBuf> {
        track
            .asset_candidates(&self.asset_dir)
            .into_iter()
            .find(|p| p.is_file())
    }

    pub fn playing(&self) -> Option<MusicTrack> {
        self.playing
    }
}

impl Default for LoggingAudio {
    fn default() -> Self {
        Self::new("music")
    }
}

impl AudioBackend for LoggingAudio {
    fn play_track(&mut self, track: MusicTrack, looped: bool) {
        match self.resolve(track) {
            Some(path) => {
                log::info!(
                    "Playing {} ({}){}",
                    track.as_str(),
                    path.display(),
                    if looped { " on loop" } else { "" }
                );
                self.playing = Some(track);
            }
            None => {
                if self.warned.insert(track) {
                    log::warn!(
                        "No asset for {} track in {}",
                        track.as_str(),
                        self.asset_dir.display()
                    );
                }
                self.playing = None;
            }
        }
    }

    fn stop_track(&mut self) {
        if self.playing.take().is_some() {
            log::info!("Music stopped");
        }
    }

    fn set_volume(&mut self, volume: f32) {
        log::debug!("Music volume {:.1}", volume);
    }
}

/// One backend call, as seen by [`RecordingAudio`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCall {
    Play(MusicTrack, bool),
    Stop,
    Volume(f32),
}

/// Test double that records every call
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    pub calls: Vec<AudioCall>,
}

impl RecordingAudio {
    /// Tracks started, in order
    pub fn played(&self) -> Vec<MusicTrack> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                AudioCall::Play(track, _) => Some(*track),
                _ => None,
            })
            .collect()
    }
}

impl AudioBackend for RecordingAudio {
    fn play_track(&mut self, track: MusicTrack, looped: bool) {
        self.calls.push(AudioCall::Play(track, looped));
    }

    fn stop_track(&mut self) {
        self.calls.push(AudioCall::Stop);
    }

    fn set_volume(&mut self, volume: f32) {
        self.calls.push(AudioCall::Volume(volume));
    }
}

/// Music state machine: which track, enabled flag and volume
#[derive(Debug, Clone)]
pub struct MusicPlayer {
    enabled: bool,
    volume: f32,
    current: Option<MusicTrack>,
}

impl Default for MusicPlayer {
    fn default() -> Self {
        Self::new(true, DEFAULT_VOLUME)
    }
}

impl MusicPlayer {
    pub fn new(enabled: bool, volume: f32) -> Self {
        Self {
            enabled,
            volume: volume.clamp(0.0, 1.0),
            current: None,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn current(&self) -> Option<MusicTrack> {
        self.current
    }

    /// Switch to `track`; asking for the track already playing is a no-op
    pub fn play(&mut self, track: MusicTrack, backend: &mut dyn AudioBackend) {
        if !self.enabled || self.current == Some(track) {
            return;
        }
        backend.set_volume(self.volume);
        backend.play_track(track, track.looped());
        self.current = Some(track);
    }

    pub fn stop(&mut self, backend: &mut dyn AudioBackend) {
        if self.current.take().is_some() {
            backend.stop_track();
        }
    }

    /// Off stops playback; on starts `resume`, the track for the current state
    pub fn toggle(&mut self, resume: MusicTrack, backend: &mut dyn AudioBackend) {
        self.enabled = !self.enabled;
        log::info!("Music {}", if self.enabled { "on" } else { "off" });
        if self.enabled {
            self.play(resume, backend);
        } else if self.current.take().is_some() {
            backend.stop_track();
        }
    }

    pub fn set_volume(&mut self, volume: f32, backend: &mut dyn AudioBackend) {
        self.volume = volume.clamp(0.0, 1.0);
        backend.set_volume(self.volume);
    }

    pub fn volume_up(&mut self, backend: &mut dyn AudioBackend) {
        self.set_volume(self.volume + VOLUME_STEP, backend);
    }

    pub fn volume_down(&mut self, backend: &mut dyn AudioBackend) {
        self.set_volume(self.volume - VOLUME_STEP, backend);
    }
}
