//! Windowless renderer that records draw calls.
//!
//! Pointer position and per-frame input are scripted by the caller, which makes
//! it suitable for driving the interaction model in tests and smoke runs.

use std::collections::VecDeque;
use std::time::Duration;

use uuid::Uuid;

use super::{Color, InputEvent, Platform, PointerButton, Renderer, TextSize};
use crate::geometry::{Point, Rect};
use crate::sprite::Sprite;

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Sprite { sprite: Uuid, at: Point },
    FillRect { rect: Rect, color: Color },
    Text { text: String, at: Point },
    Polygon { points: Vec<Point>, color: Color },
}

struct ScriptedFrame {
    pointer: Option<Point>,
    events: Vec<InputEvent>,
}

pub struct HeadlessRenderer {
    size: (f32, f32),
    font_size: f32,
    pointer: Point,
    script: VecDeque<ScriptedFrame>,
    ops: Vec<DrawOp>,
    presents: usize,
    frames: usize,
    waited: Duration,
}

impl HeadlessRenderer {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: (width, height),
            font_size: 24.0,
            pointer: Point::default(),
            script: VecDeque::new(),
            ops: Vec::new(),
            presents: 0,
            frames: 0,
            waited: Duration::ZERO,
        }
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn set_pointer(&mut self, point: Point) {
        self.pointer = point;
    }

    /// Resize the fake screen. A `Resized` event is not queued automatically.
    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        self.size = (width, height);
    }

    /// Queue the input for one future frame.
    pub fn queue_frame(&mut self, events: Vec<InputEvent>) {
        self.script.push_back(ScriptedFrame { pointer: None, events });
    }

    /// Queue a frame that first moves the pointer to `pointer`.
    pub fn queue_frame_at(&mut self, pointer: Point, events: Vec<InputEvent>) {
        self.script.push_back(ScriptedFrame {
            pointer: Some(pointer),
            events,
        });
    }

    /// Queue a left click at `pointer`.
    pub fn queue_click(&mut self, pointer: Point) {
        self.queue_frame_at(
            pointer,
            vec![InputEvent::ButtonDown {
                button: PointerButton::Left,
            }],
        );
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Text of every `Text` op recorded so far, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn presents(&self) -> usize {
        self.presents
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Total pacing time requested through [`Platform::end_frame`].
    pub fn waited(&self) -> Duration {
        self.waited
    }
}

impl Renderer for HeadlessRenderer {
    fn screen_size(&self) -> (f32, f32) {
        self.size
    }

    fn font_size(&self) -> f32 {
        self.font_size
    }

    fn pointer_position(&self) -> Point {
        self.pointer
    }

    fn draw_sprite(&mut self, sprite: &Sprite, at: Point) {
        self.ops.push(DrawOp::Sprite { sprite: sprite.id(), at });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    /// Fixed-pitch metrics: half the font size per character, one font size tall.
    #[allow(clippy::cast_precision_loss)]
    fn measure_text(&self, text: &str) -> TextSize {
        TextSize {
            width: text.chars().count() as f32 * self.font_size / 2.0,
            height: self.font_size,
        }
    }

    fn draw_text(&mut self, text: &str, at: Point, _color: Color) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            at,
        });
    }

    fn draw_polygon(&mut self, points: &[Point], color: Color) {
        self.ops.push(DrawOp::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn present(&mut self) {
        self.presents += 1;
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        match self.script.pop_front() {
            Some(frame) => {
                if let Some(pointer) = frame.pointer {
                    self.pointer = pointer;
                }
                frame.events
            },
            None => Vec::new(),
        }
    }
}

impl Platform for HeadlessRenderer {
    async fn end_frame(&mut self, remaining: Duration) {
        self.frames += 1;
        self.waited += remaining;
    }
}
