//! Platform abstraction layer
//!
//! The core only talks to the outside world through these seams:
//! - Time ([`time::Clock`])
//! - Input events ([`input::InputSource`])
//! - A render surface that accepts primitive lists ([`RenderSurface`])
//!
//! Audio and high-score storage seams live in `audio` and `persistence`.

pub mod input;
pub mod time;

pub use input::{DemoInput, HeldKeys, InputFrame, InputSource, KeyPress, ScriptedInput};
pub use time::{Clock, FramePacer, ManualClock, SessionClock, SystemClock};

use crate::renderer::primitive::DrawPrimitive;
use crate::renderer::vertex::tessellate;

/// Receives one primitive list per frame
pub trait RenderSurface {
    fn present(&mut self, frame: &[DrawPrimitive]);
}

/// No window: tessellates every frame and logs the load now and then
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    frames: u64,
    last_vertex_count: usize,
    /// Log every this many frames (0 = never)
    pub log_every: u64,
}

impl HeadlessSurface {
    pub fn new(log_every: u64) -> Self {
        Self {
            log_every,
            ..Default::default()
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_vertex_count(&self) -> usize {
        self.last_vertex_count
    }
}

impl RenderSurface for HeadlessSurface {
    fn present(&mut self, frame: &[DrawPrimitive]) {
        self.last_vertex_count = tessellate(frame).len();
        self.frames += 1;
        if self.log_every > 0 && self.frames % self.log_every == 0 {
            log::debug!(
                "Frame {}: {} primitives, {} vertices",
                self.frames,
                frame.len(),
                self.last_vertex_count
            );
        }
    }
}

/// Keeps every presented frame for inspection
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub frames: Vec<Vec<DrawPrimitive>>,
}

impl RecordingSurface {
    pub fn last(&self) -> Option<&[DrawPrimitive]> {
        self.frames.last().map(|f| f.as_slice())
    }
}

impl RenderSurface for RecordingSurface {
    fn present(&mut self, frame: &[DrawPrimitive]) {
        self.frames.push(frame.to_vec());
    }
}
