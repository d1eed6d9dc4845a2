//! Renderer facade.
//!
//! The engine never talks to a window, GPU or audio device directly. Everything
//! it needs from the platform goes through [`Renderer`] (drawing, text metrics,
//! pointer and input) and [`Platform`] (frame pacing). The macroquad backend
//! and [`HeadlessRenderer`] are the two implementations.

pub mod headless;

pub use headless::{DrawOp, HeadlessRenderer};

use std::time::Duration;

use crate::geometry::{Point, Rect};
use crate::sprite::Sprite;

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    /// Translucent white used behind labels, menus and the status/inventory bars.
    pub const BACKDROP: Color = Color::rgba(255, 255, 255, 200);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }
}

/// Measured extent of a rendered line of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSize {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

/// Input gathered by the platform since the previous frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Quit,
    ButtonDown { button: PointerButton },
    Resized { width: f32, height: f32 },
}

/// Drawing, text and input capabilities the engine consumes.
///
/// Draw calls may go to an off-screen surface; [`Renderer::present`] makes
/// everything drawn so far visible.
pub trait Renderer {
    fn screen_size(&self) -> (f32, f32);
    fn font_size(&self) -> f32;
    fn pointer_position(&self) -> Point;
    fn draw_sprite(&mut self, sprite: &Sprite, at: Point);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn measure_text(&self, text: &str) -> TextSize;
    /// Draw a single line of text with its top-left corner at `at`.
    fn draw_text(&mut self, text: &str, at: Point, color: Color);
    fn draw_polygon(&mut self, points: &[Point], color: Color);
    fn present(&mut self);
    fn poll_events(&mut self) -> Vec<InputEvent>;
}

/// A renderer that also owns the frame boundary.
#[allow(async_fn_in_trait)]
pub trait Platform: Renderer {
    /// Finish the current frame, waiting out `remaining` of the frame budget.
    async fn end_frame(&mut self, remaining: Duration);
}
