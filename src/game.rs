//! Frame loop orchestrator
//!
//! Owns the session plus everything around it (settings, music, best time,
//! pause clock) and drives one frame at a time against the platform seams.

use crate::audio::{AudioBackend, MusicPlayer, MusicTrack};
use crate::highscores::HighScore;
use crate::persistence::HighScoreStore;
use crate::platform::{Clock, FramePacer, InputSource, KeyPress, RenderSurface, SessionClock};
use crate::renderer::SceneRenderer;
use crate::settings::Settings;
use crate::sim::{AbilityReadiness, GameEvent, GameSession, TickInput, tick};

/// Frames in the FPS averaging window
const FPS_WINDOW: usize = 60;

/// Everything the game needs from the outside world for one frame
pub struct Platform<'a> {
    pub input: &'a mut dyn InputSource,
    pub clock: &'a dyn Clock,
    pub surface: &'a mut dyn RenderSurface,
    pub audio: &'a mut dyn AudioBackend,
    pub scores: &'a mut dyn HighScoreStore,
}

/// Game instance holding all state
pub struct Game {
    pub session: GameSession,
    pub settings: Settings,
    high_score: HighScore,
    music: MusicPlayer,
    scene: SceneRenderer,
    session_clock: SessionClock,
    running: bool,
    quit_after_round: bool,
    frames: u64,
    // FPS tracking
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Game {
    /// Load the best time, apply music settings and start the menu track
    pub fn new(seed: u64, settings: Settings, platform: &mut Platform<'_>) -> Self {
        let high_score = HighScore::load(&mut *platform.scores);
        let mut music = MusicPlayer::new(settings.music_enabled, settings.music_volume);
        music.play(MusicTrack::Menu, &mut *platform.audio);
        log::info!(
            "Game ready (seed {}, best {:.1}s, music {})",
            seed,
            high_score.best(),
            if music.enabled() { "on" } else { "off" }
        );

        Self {
            session: GameSession::new(seed, high_score.best()),
            settings,
            high_score,
            music,
            scene: SceneRenderer::new(seed.rotate_left(32) ^ 0x5eed),
            session_clock: SessionClock::default(),
            running: true,
            quit_after_round: false,
            frames: 0,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn high_score(&self) -> f64 {
        self.high_score.best()
    }

    pub fn music(&self) -> &MusicPlayer {
        &self.music
    }

    /// Poll input, advance the simulation one tick, present the frame.
    /// Returns false once the player asked to quit.
    pub fn frame(&mut self, platform: &mut Platform<'_>) -> bool {
        let raw_ms = platform.clock.now_ms();
        let polled = platform.input.poll();

        let mut input = TickInput {
            up: polled.held.up,
            down: polled.held.down,
            left: polled.held.left,
            right: polled.held.right,
            dash: polled.held.dash,
            idle_mode: polled.autopilot,
            ..Default::default()
        };
        for &press in &polled.presses {
            if press.is_ability() && (!self.session.active || self.session.paused) {
                continue;
            }
            self.handle_press(press, raw_ms, &mut input, platform);
        }

        self.session.particles_enabled = self.settings.particles;
        let now_ms = self.session_clock.session_time(raw_ms);
        tick(&mut self.session, &input, now_ms);
        self.handle_events(platform);

        let primitives = self.scene.render(&self.session, &self.settings);
        platform.surface.present(&primitives);

        self.track_fps(raw_ms);
        self.frames += 1;
        self.running
    }

    /// Run frames until quit or until `max_frames` is reached
    pub fn run(
        &mut self,
        platform: &mut Platform<'_>,
        pacer: &mut FramePacer,
        max_frames: Option<u64>,
    ) {
        while self.running {
            if max_frames.is_some_and(|max| self.frames >= max) {
                log::info!("Frame limit reached ({} frames)", self.frames);
                break;
            }
            self.frame(platform);
            pacer.wait();
        }
    }

    /// Treat the end of the next round as a quit (headless demo runs)
    pub fn quit_after_round(&mut self) {
        self.quit_after_round = true;
    }

    fn handle_press(
        &mut self,
        press: KeyPress,
        raw_ms: f64,
        input: &mut TickInput,
        platform: &mut Platform<'_>,
    ) {
        match press {
            KeyPress::Quit => {
                log::info!("Quit requested");
                self.running = false;
                self.music.stop(&mut *platform.audio);
            }
            KeyPress::Start => {
                if !self.session.active {
                    let now_ms = self.session_clock.session_time(raw_ms);
                    self.session.start_round(now_ms);
                    self.music.play(MusicTrack::Gameplay, &mut *platform.audio);
                }
            }
            KeyPress::Pause => {
                if self.session.active {
                    self.session.paused = !self.session.paused;
                    if self.session.paused {
                        self.session_clock.pause(raw_ms);
                    } else {
                        self.session_clock.resume(raw_ms);
                    }
                    log::info!("{}", if self.session.paused { "Paused" } else { "Resumed" });
                }
            }
            KeyPress::ToggleMusic => {
                let resume = if self.session.active {
                    MusicTrack::Gameplay
                } else {
                    MusicTrack::Menu
                };
                self.music.toggle(resume, &mut *platform.audio);
            }
            KeyPress::VolumeUp => self.music.volume_up(&mut *platform.audio),
            KeyPress::VolumeDown => self.music.volume_down(&mut *platform.audio),
            KeyPress::Focus => input.focus = true,
            KeyPress::Pulse => input.pulse = true,
            KeyPress::Shrink => input.shrink = true,
        }
    }

    fn handle_events(&mut self, platform: &mut Platform<'_>) {
        for event in self.session.drain_events() {
            match event {
                GameEvent::RoundEnded { score, .. } => {
                    if self.high_score.submit_and_save(score, &mut *platform.scores) {
                        log::info!("New best time saved: {:.1}s", score);
                    }
                    self.music.play(MusicTrack::GameOver, &mut *platform.audio);
                    if self.quit_after_round {
                        log::info!("Round over, stopping");
                        self.running = false;
                    }
                }
                other => log::debug!("{:?}", other),
            }
        }
    }

    /// Average over the last window of frames
    fn track_fps(&mut self, raw_ms: f64) {
        let oldest = self.frame_times[self.frame_index];
        self.frame_times[self.frame_index] = raw_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        if self.frames >= FPS_WINDOW as u64 {
            let elapsed = raw_ms - oldest;
            if elapsed > 0.0 {
                self.fps = (FPS_WINDOW as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    /// Values for the text layer
    pub fn hud(&self, now_ms: f64) -> HudSnapshot {
        HudSnapshot::capture(self, now_ms)
    }
}

/// What the HUD shows this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudSnapshot {
    pub score: f64,
    pub best: f64,
    pub difficulty: f64,
    pub readiness: AbilityReadiness,
    pub music_enabled: bool,
    pub music_volume: f32,
    pub paused: bool,
    pub active: bool,
    /// Only when `show_fps` is on
    pub fps: Option<u32>,
}

impl HudSnapshot {
    /// `raw_ms` is the platform clock; paused time is taken out here
    pub fn capture(game: &Game, raw_ms: f64) -> Self {
        let session = &game.session;
        let now_ms = game.session_clock.session_time(raw_ms);
        Self {
            score: session.score,
            best: game.high_score.best().max(session.high_score),
            difficulty: session.difficulty,
            readiness: session.abilities.readiness(now_ms),
            music_enabled: game.music.enabled(),
            music_volume: game.music.volume(),
            paused: session.paused,
            active: session.active,
            fps: game.settings.show_fps.then_some(game.fps),
        }
    }
}
