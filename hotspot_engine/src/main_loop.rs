//! The frame cycle: input, interaction, room switching, repaint, pacing.

use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use log::{debug, info, warn};

use crate::Id;
use crate::interaction::ActiveRoom;
use crate::render::{InputEvent, Platform, Renderer};
use crate::world::World;

/// Frames per second of the main loop unless configured otherwise.
pub const DEFAULT_TICK_RATE: u32 = 10;

/// Whether the loop should keep going after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Drives one [`World`] from a start room until the player quits.
#[derive(Debug)]
pub struct MainLoop {
    world: World,
    room: Id,
    tick_rate: u32,
}

impl MainLoop {
    /// # Errors
    /// Fails if `start_room` is not a room of `world`.
    pub fn new(world: World, start_room: impl Into<Id>) -> Result<MainLoop> {
        let room = start_room.into();
        if world.room(&room).is_none() {
            bail!("start room '{room}' does not exist");
        }
        Ok(MainLoop {
            world,
            room,
            tick_rate: DEFAULT_TICK_RATE,
        })
    }

    /// Change the loop frequency. Zero is treated as one tick per second.
    #[must_use]
    pub fn with_tick_rate(mut self, ticks_per_second: u32) -> MainLoop {
        self.tick_rate = ticks_per_second.max(1);
        self
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Id of the room the player is in.
    pub fn active_room(&self) -> &str {
        &self.room
    }

    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate
    }

    /// Run one frame against `renderer`.
    ///
    /// Clicks are resolved in arrival order, then the hover state is refreshed
    /// even if the pointer didn't move. A room switch queued during this frame
    /// is applied only after all input has been handled.
    pub fn tick(&mut self, renderer: &mut dyn Renderer) -> Flow {
        for event in renderer.poll_events() {
            match event {
                InputEvent::Quit => {
                    info!("quit requested");
                    return Flow::Quit;
                },
                InputEvent::ButtonDown { button } => {
                    debug!("{button:?} button pressed at {:?}", renderer.pointer_position());
                    self.dispatch(|room| room.handle_click(renderer));
                },
                InputEvent::Resized { width, height } => {
                    debug!("screen resized to {width}x{height}");
                    self.world.set_screen_height(height);
                    self.dispatch(|room| room.room_mut().mark_dirty());
                },
            }
        }
        self.dispatch(|room| room.handle_pointer_move(renderer));
        self.apply_pending_switch();
        self.redraw(renderer);
        Flow::Continue
    }

    /// Repaint the active room if it is dirty.
    pub fn redraw(&mut self, renderer: &mut dyn Renderer) {
        self.dispatch(|room| room.redraw(renderer));
    }

    /// Make a queued room switch take effect.
    ///
    /// The room being left forgets its hover, menu and use-item state; the
    /// room entered is repainted in full. Unknown destinations are dropped
    /// with a warning. Returns whether the active room changed.
    pub fn apply_pending_switch(&mut self) -> bool {
        let Some(destination) = self.world.room_mut(&self.room).and_then(|room| room.switch_to.take()) else {
            return false;
        };
        if self.world.room(&destination).is_none() {
            warn!("cannot switch to unknown room '{destination}'");
            return false;
        }
        if let Some(departed) = self.world.room_mut(&self.room) {
            departed.reset_interaction();
        }
        self.room = destination;
        if let Some(entered) = self.world.room_mut(&self.room) {
            entered.mark_dirty();
            info!("entering '{}' ({})", entered.name, entered.id);
        }
        true
    }

    /// Paint the start room, then tick at the configured rate until a quit
    /// event arrives.
    pub async fn run<P: Platform>(&mut self, platform: &mut P) {
        info!("entering main loop in room '{}' at {} Hz", self.room, self.tick_rate);
        self.redraw(platform);
        loop {
            let started = Instant::now();
            if self.tick(platform) == Flow::Quit {
                break;
            }
            let remaining = self.frame_budget().saturating_sub(started.elapsed());
            platform.end_frame(remaining).await;
        }
        info!("main loop finished");
    }

    fn dispatch(&mut self, f: impl FnOnce(&mut ActiveRoom<'_>)) {
        if self.world.with_room(&self.room, f).is_none() {
            warn!("active room '{}' is missing from the world", self.room);
        }
    }
}
