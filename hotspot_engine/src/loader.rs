//! Loader utilities for building a `World` from serialized data.
//!
//! World content comes from a `WorldDef` (RON) whose image paths are relative
//! to the data root. Behavior hooks are not data; game code binds them to the
//! built items afterwards.

pub mod placement;
pub mod worlddef;

use std::path::Path;

use anyhow::{Context, Result, bail};
use log::info;

use hotspot_data::WorldDef;

use crate::Id;
use crate::config::EngineConfig;
use crate::loader::placement::place_items;
use crate::loader::worlddef::{build_world_from_def, load_worlddef};
use crate::world::World;

/// Load the world named by `config` from the data root.
///
/// Returns the world and the id of the room the game starts in.
///
/// # Errors
/// Errors bubble up from file IO, deserialization, image decoding, or missing references.
pub fn load_world(root: &Path, config: &EngineConfig) -> Result<(World, Id)> {
    let world_ron_path = root.join(&config.world);
    let worlddef = load_worlddef(&world_ron_path).context("while loading worlddef from file")?;
    let (_, screen_height) = config.screen_size();
    let world = build_world(&worlddef, root, screen_height)?;
    Ok((world, worlddef.start_room))
}

/// Validate a `WorldDef`, build its rooms and items, and place the items.
///
/// # Errors
/// - on validation failures (all of them reported together)
/// - if an image can't be loaded
pub fn build_world(def: &WorldDef, root: &Path, screen_height: f32) -> Result<World> {
    validate_worlddef(def)?;
    let mut world = build_world_from_def(def, root, screen_height).context("while building world from worlddef")?;
    info!("{} rooms added to World", world.rooms.len());
    info!("{} items added to World", world.items.len());

    place_items(&mut world, def)?;
    Ok(world)
}

/// Validate the WorldDef and return a single aggregated error.
fn validate_worlddef(def: &WorldDef) -> Result<()> {
    let errors = hotspot_data::validate_world(def);
    if errors.is_empty() {
        return Ok(());
    }
    let details = errors
        .into_iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("worlddef validation failed:\n{details}");
}
