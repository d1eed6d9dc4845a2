//! macroquad window, audio and input backend.
//!
//! The engine draws into an off-screen render target that survives between
//! frames, which is what lets the main loop repaint only when a room is
//! dirty. Every frame the target is blitted to the window.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use image::imageops::{self, FilterType};
use log::{debug, info, trace, warn};
use macroquad::audio::{PlaySoundParams, Sound, load_sound, play_sound, stop_sound};
use macroquad::camera::{Camera2D, set_camera, set_default_camera};
use macroquad::color::{Color as MqColor, WHITE};
use macroquad::input::{MouseButton, is_mouse_button_pressed, is_quit_requested, mouse_position, prevent_quit};
use macroquad::math::{Rect as MqRect, vec2};
use macroquad::miniquad::conf::{Conf, Icon};
use macroquad::shapes::{draw_rectangle, draw_triangle};
use macroquad::text::{Font, TextParams, draw_text_ex, load_ttf_font, measure_text};
use macroquad::texture::{DrawTextureParams, FilterMode, RenderTarget, Texture2D, draw_texture, draw_texture_ex, render_target};
use macroquad::window::{clear_background, next_frame, screen_height, screen_width};
use uuid::Uuid;

use crate::Id;
use crate::config::EngineConfig;
use crate::geometry::{Point, Rect};
use crate::main_loop::MainLoop;
use crate::render::{Color, InputEvent, Platform, PointerButton, Renderer, TextSize};
use crate::sprite::{AssetError, Sprite};
use crate::world::World;

const MOUSE_BUTTONS: [(MouseButton, PointerButton); 3] = [
    (MouseButton::Left, PointerButton::Left),
    (MouseButton::Right, PointerButton::Right),
    (MouseButton::Middle, PointerButton::Middle),
];

/// The live window: canvas, texture cache, font and music.
pub struct MacroquadPlatform {
    canvas: RenderTarget,
    camera: Camera2D,
    size: (f32, f32),
    textures: HashMap<Uuid, Texture2D>,
    font: Option<Font>,
    font_size: u16,
    music: Option<Sound>,
}

impl MacroquadPlatform {
    /// Set up the canvas and load the optional font and music.
    ///
    /// Must run inside the macroquad window future.
    ///
    /// # Errors
    /// - if the configured font or music can't be loaded
    pub async fn new(config: &EngineConfig, root: &Path) -> Result<MacroquadPlatform> {
        prevent_quit();
        let size = (screen_width(), screen_height());
        let (canvas, camera) = canvas(size);

        let font = match &config.font {
            Some(relative) => Some(load_font(&root.join(relative)).await?),
            None => None,
        };

        let music = match &config.background_music {
            Some(relative) => {
                let sound = load_music(&root.join(relative)).await?;
                play_sound(
                    &sound,
                    PlaySoundParams {
                        looped: true,
                        volume: 1.0,
                    },
                );
                info!("background music '{}' started", relative.display());
                Some(sound)
            },
            None => None,
        };

        set_camera(&camera);
        Ok(MacroquadPlatform {
            canvas,
            camera,
            size,
            textures: HashMap::new(),
            font,
            font_size: config.font_size,
            music,
        })
    }

    /// Stop the music and release the canvas.
    pub fn shutdown(&mut self) {
        if let Some(music) = self.music.take() {
            stop_sound(&music);
        }
        self.textures.clear();
        set_default_camera();
        info!("backend shut down");
    }

    #[allow(clippy::cast_possible_truncation)]
    fn texture(&mut self, sprite: &Sprite) -> Texture2D {
        self.textures
            .entry(sprite.id())
            .or_insert_with(|| {
                trace!("uploading texture for sprite {}", sprite.id());
                let texture = Texture2D::from_rgba8(sprite.width() as u16, sprite.height() as u16, sprite.pixels().as_raw());
                texture.set_filter(FilterMode::Nearest);
                texture
            })
            .clone()
    }
}

impl Renderer for MacroquadPlatform {
    fn screen_size(&self) -> (f32, f32) {
        self.size
    }

    fn font_size(&self) -> f32 {
        f32::from(self.font_size)
    }

    fn pointer_position(&self) -> Point {
        Point::from(mouse_position())
    }

    fn draw_sprite(&mut self, sprite: &Sprite, at: Point) {
        let texture = self.texture(sprite);
        draw_texture(&texture, at.x, at.y, WHITE);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, mq_color(color));
    }

    /// Line height is the font size for every string, so menus get even rows.
    fn measure_text(&self, text: &str) -> TextSize {
        let dimensions = measure_text(text, self.font.as_ref(), self.font_size, 1.0);
        TextSize {
            width: dimensions.width,
            height: f32::from(self.font_size),
        }
    }

    fn draw_text(&mut self, text: &str, at: Point, color: Color) {
        let dimensions = measure_text(text, self.font.as_ref(), self.font_size, 1.0);
        draw_text_ex(
            text,
            at.x,
            at.y + dimensions.offset_y,
            TextParams {
                font: self.font.as_ref(),
                font_size: self.font_size,
                color: mq_color(color),
                ..Default::default()
            },
        );
    }

    /// Convex polygons only (fan triangulation).
    fn draw_polygon(&mut self, points: &[Point], color: Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let color = mq_color(color);
        for pair in rest.windows(2) {
            draw_triangle(
                vec2(first.x, first.y),
                vec2(pair[0].x, pair[0].y),
                vec2(pair[1].x, pair[1].y),
                color,
            );
        }
    }

    /// The canvas reaches the window at the end of every frame anyway.
    fn present(&mut self) {
        trace!("present");
    }

    #[allow(clippy::float_cmp)]
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if is_quit_requested() {
            events.push(InputEvent::Quit);
        }
        for (source, button) in MOUSE_BUTTONS {
            if is_mouse_button_pressed(source) {
                events.push(InputEvent::ButtonDown { button });
            }
        }

        let size = (screen_width(), screen_height());
        if size != self.size {
            debug!("window resized to {}x{}", size.0, size.1);
            let (canvas, camera) = canvas(size);
            self.canvas = canvas;
            self.camera = camera;
            self.size = size;
            set_camera(&self.camera);
            events.push(InputEvent::Resized {
                width: size.0,
                height: size.1,
            });
        }
        events
    }
}

impl Platform for MacroquadPlatform {
    async fn end_frame(&mut self, remaining: Duration) {
        set_default_camera();
        clear_background(MqColor::from_rgba(0, 0, 0, 255));
        draw_texture_ex(
            &self.canvas.texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(self.size.0, self.size.1)),
                flip_y: true,
                ..Default::default()
            },
        );

        #[cfg(not(target_arch = "wasm32"))]
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }

        next_frame().await;
        set_camera(&self.camera);
    }
}

/// A fresh canvas of the given size and the camera that draws into it.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn canvas((width, height): (f32, f32)) -> (RenderTarget, Camera2D) {
    let target = render_target(width.max(1.0) as u32, height.max(1.0) as u32);
    target.texture.set_filter(FilterMode::Nearest);
    let mut camera = Camera2D::from_display_rect(MqRect::new(0.0, 0.0, width, height));
    camera.render_target = Some(target.clone());
    (target, camera)
}

fn mq_color(color: Color) -> MqColor {
    MqColor::from_rgba(color.r, color.g, color.b, color.a)
}

async fn load_font(path: &Path) -> Result<Font, AssetError> {
    load_ttf_font(&path.to_string_lossy()).await.map_err(|err| AssetError::Font {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

async fn load_music(path: &Path) -> Result<Sound, AssetError> {
    load_sound(&path.to_string_lossy()).await.map_err(|err| AssetError::Audio {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

/// Window settings for the given config. The icon, if any, is loaded and
/// resampled to the three sizes the window system wants.
///
/// # Errors
/// - if the icon image can't be loaded
#[allow(clippy::cast_possible_wrap)]
pub fn window_conf(config: &EngineConfig, root: &Path) -> Result<Conf> {
    let icon = match &config.icon {
        Some(relative) => Some(load_icon(&root.join(relative)).context("while loading window icon")?),
        None => None,
    };
    Ok(Conf {
        window_title: config.caption.clone(),
        window_width: config.resolution.0 as i32,
        window_height: config.resolution.1 as i32,
        window_resizable: config.resizable,
        icon,
        ..Default::default()
    })
}

fn load_icon(path: &Path) -> Result<Icon> {
    let source = Sprite::load(path)?;
    let resample = |edge: u32| imageops::resize(source.pixels(), edge, edge, FilterType::Lanczos3).into_raw();
    Ok(Icon {
        small: resample(16)
            .try_into()
            .map_err(|_| anyhow!("16px icon has the wrong size"))?,
        medium: resample(32)
            .try_into()
            .map_err(|_| anyhow!("32px icon has the wrong size"))?,
        big: resample(64)
            .try_into()
            .map_err(|_| anyhow!("64px icon has the wrong size"))?,
    })
}

/// Open the window and play `world` from `start_room` until the player quits.
///
/// Blocks until the window closes.
///
/// # Errors
/// - if the start room doesn't exist
/// - if the icon, font or music can't be loaded
pub fn run(config: EngineConfig, root: &Path, world: World, start_room: impl Into<Id>) -> Result<()> {
    let mut main_loop = MainLoop::new(world, start_room)?.with_tick_rate(config.tick_rate);
    let conf = window_conf(&config, root)?;
    let root = root.to_path_buf();

    let failure: Rc<RefCell<Option<anyhow::Error>>> = Rc::default();
    let slot = Rc::clone(&failure);
    info!("opening window '{}'", config.caption);
    macroquad::Window::from_config(conf, async move {
        match MacroquadPlatform::new(&config, &root).await {
            Ok(mut platform) => {
                main_loop.run(&mut platform).await;
                platform.shutdown();
            },
            Err(err) => {
                warn!("backend failed to start: {err:#}");
                *slot.borrow_mut() = Some(err);
            },
        }
    });

    match failure.take() {
        Some(err) => Err(err.context("while starting the backend")),
        None => Ok(()),
    }
}
