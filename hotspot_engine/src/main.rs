#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Hotspot **
//! Demo point-and-click game: a village, a door and a house with an empty frame.

use anyhow::{Context, Result};
use log::{error, info};

use hotspot_engine::data_paths::{data_path, data_root};
use hotspot_engine::{World, backend, load_config, load_world};

fn main() -> Result<()> {
    env_logger::init();
    start().inspect_err(|err| error!("fatal: {err:#}"))
}

fn start() -> Result<()> {
    info!("Start: loading Hotspot world (v{})...", hotspot_engine::HOTSPOT_VERSION);

    let root = data_root();
    let config = load_config(&data_path("engine.toml")).context("while loading engine config")?;
    let (mut world, start_room) = load_world(root, &config).context("while loading World")?;
    bind_hooks(&mut world);
    info!("World loaded successfully.");

    info!("Starting the game!");
    backend::run(config, root, world, start_room)?;
    info!("Goodbye.");
    Ok(())
}

/// Behaviors the world file can't express.
fn bind_hooks(world: &mut World) {
    if let Some(door) = world.item_mut("door_closed") {
        door.on_manipulate(|room| {
            room.remove_item("door_closed");
            room.set_status("The door opens easily.");
            room.add_item("door_open");
        });
    }

    if let Some(circle) = world.item_mut("red_circle") {
        circle.add_use_pair("frame_empty", |room, this, other| {
            room.remove_from_inventory(this);
            room.remove_item(other);
            room.add_item("frame_with_circle");
            room.set_status("The circle looks very pretty inside the frame!");
        });
    }
}
