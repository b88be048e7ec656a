//! Input sampling
//!
//! The game polls an [`InputSource`] once per frame for held keys plus the
//! discrete presses since the last poll. Key names are resolved here, so the
//! rest of the crate only sees [`HeldKeys`] and [`KeyPress`].

use std::collections::VecDeque;

/// Discrete key events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPress {
    /// Enter: start a round when none is running
    Start,
    /// P: pause/resume the running round
    Pause,
    /// Escape or window close
    Quit,
    /// M
    ToggleMusic,
    /// + / =
    VolumeUp,
    /// -
    VolumeDown,
    /// Space
    Focus,
    /// E
    Pulse,
    /// Q
    Shrink,
}

impl KeyPress {
    /// Map a key name to its event; unknown keys are ignored
    pub fn from_key(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "enter" | "return" => Some(KeyPress::Start),
            "p" => Some(KeyPress::Pause),
            "escape" | "esc" | "close" => Some(KeyPress::Quit),
            "m" => Some(KeyPress::ToggleMusic),
            "+" | "=" | "kp_plus" => Some(KeyPress::VolumeUp),
            "-" | "kp_minus" => Some(KeyPress::VolumeDown),
            "space" | " " => Some(KeyPress::Focus),
            "e" => Some(KeyPress::Pulse),
            "q" => Some(KeyPress::Shrink),
            _ => None,
        }
    }

    /// Ability triggers only count while a round runs unpaused
    pub fn is_ability(&self) -> bool {
        matches!(self, KeyPress::Focus | KeyPress::Pulse | KeyPress::Shrink)
    }
}

/// Keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Either shift key
    pub dash: bool,
}

impl HeldKeys {
    /// Mark a key as held (arrow keys and WASD are aliases)
    pub fn hold(&mut self, name: &str) {
        match name.to_ascii_lowercase().as_str() {
            "up" | "w" => self.up = true,
            "down" | "s" => self.down = true,
            "left" | "a" => self.left = true,
            "right" | "d" => self.right = true,
            "shift" | "lshift" | "rshift" => self.dash = true,
            _ => {}
        }
    }

    pub fn from_keys(names: &[&str]) -> Self {
        let mut held = Self::default();
        for name in names {
            held.hold(name);
        }
        held
    }
}

/// One poll's worth of input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputFrame {
    pub held: HeldKeys,
    pub presses: Vec<KeyPress>,
    /// Let the autopilot play this frame
    pub autopilot: bool,
}

impl InputFrame {
    pub fn pressed(presses: &[KeyPress]) -> Self {
        Self {
            presses: presses.to_vec(),
            ..Default::default()
        }
    }

    pub fn holding(held: HeldKeys) -> Self {
        Self {
            held,
            ..Default::default()
        }
    }
}

pub trait InputSource {
    fn poll(&mut self) -> InputFrame;
}

/// Replays a fixed list of frames, then reports no input
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputFrame>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn push(&mut self, frame: InputFrame) {
        self.frames.push_back(frame);
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputFrame {
        self.frames.pop_front().unwrap_or_default()
    }
}

/// Attract mode: starts one round and hands control to the autopilot
#[derive(Debug, Clone, Default)]
pub struct DemoInput {
    started: bool,
}

impl InputSource for DemoInput {
    fn poll(&mut self) -> InputFrame {
        let mut frame = InputFrame {
            autopilot: true,
            ..Default::default()
        };
        if !self.started {
            self.started = true;
            frame.presses.push(KeyPress::Start);
        }
        frame
    }
}
