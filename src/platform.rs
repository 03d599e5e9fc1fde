/// The seams between game logic and whatever draws, reads input and keeps time.
///
/// The terminal backend implements all three; tests drive the game through
/// scripted inputs and [`ManualClock`].
use std::time::{Duration, Instant};

use crate::entities::{Directions, Point, Rect};

// ── Drawing ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    /// `pos` is the left end of the text.
    Left,
    /// `pos` is the centre of the text.
    Center,
}

pub trait Renderer {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color);
    fn draw_text(&mut self, text: &str, pos: Point, color: Color, align: TextAlign);
    /// Show everything drawn since the last `clear`.
    fn present(&mut self) -> anyhow::Result<()>;
}

// ── Input ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    PointerDown { pos: Point, button: MouseButton },
}

/// Everything the input source reported for one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputFrame {
    pub held: Directions,
    pub pointer: Point,
    pub events: Vec<InputEvent>,
}

pub trait InputSource {
    fn poll(&mut self) -> InputFrame;
}

// ── Time ──────────────────────────────────────────────────────────────────────

pub trait Clock {
    /// Monotonic milliseconds since the clock was created.
    fn now_ms(&self) -> u64;
    /// Wait out the rest of the current tick.
    fn pace(&mut self);
}

/// Wall clock that sleeps to hold a fixed tick rate.
pub struct SystemClock {
    start: Instant,
    frame: Duration,
    frame_start: Instant,
}

impl SystemClock {
    pub fn new(tick_rate: u32) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            frame: Duration::from_secs(1) / tick_rate.max(1),
            frame_start: now,
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn pace(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame {
            std::thread::sleep(self.frame - elapsed);
        }
        self.frame_start = Instant::now();
    }
}

/// Clock that only moves when paced, by a fixed step.
#[derive(Clone, Debug)]
pub struct ManualClock {
    pub now: u64,
    pub step: u64,
}

impl ManualClock {
    pub fn new(step: u64) -> Self {
        Self { now: 0, step }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn pace(&mut self) {
        self.now += self.step;
    }
}
