//! WorldDef loader and conversion helpers.
//!
//! Converts the serialized `WorldDef` data model into runtime engine structs,
//! decoding every referenced image on the way.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use hotspot_data::{ItemDef, RoomDef, WorldDef};

use crate::arrow::ArrowSide;
use crate::geometry::Point;
use crate::item::{Item, ItemConfig};
use crate::room::Room;
use crate::sprite::Sprite;
use crate::world::World;

/// Load a `WorldDef` from a RON file.
///
/// # Errors
/// - on file IO error or RON parsing error
pub fn load_worlddef(path: &Path) -> Result<WorldDef> {
    let text = fs::read_to_string(path).with_context(|| format!("reading worlddef from '{}'", path.display()))?;
    ron::from_str(&text).with_context(|| format!("parsing worlddef RON from '{}'", path.display()))
}

/// Convert a `WorldDef` into a `World` with every item still unplaced.
///
/// Image paths are resolved against `root`.
///
/// # Errors
/// - if any background or item image can't be loaded
pub fn build_world_from_def(def: &WorldDef, root: &Path, screen_height: f32) -> Result<World> {
    let mut world = World::new(screen_height);

    for room_def in &def.rooms {
        let room = room_from_def(room_def, root)?;
        world.add_room(room);
    }

    for item_def in &def.items {
        let item = item_from_def(item_def, root)?;
        world.add_item(item);
    }

    Ok(world)
}

fn room_from_def(def: &RoomDef, root: &Path) -> Result<Room> {
    let background = Sprite::load(root.join(&def.background))
        .with_context(|| format!("loading background of room '{}'", def.id))?;
    let name = if def.name.is_empty() { def.id.clone() } else { def.name.clone() };

    let mut room = Room::new(def.id.clone(), name, background);
    if let Some(exit) = &def.exit_left {
        room = room.with_exit(ArrowSide::Left, exit.to.clone(), exit.label.clone());
    }
    if let Some(exit) = &def.exit_right {
        room = room.with_exit(ArrowSide::Right, exit.to.clone(), exit.label.clone());
    }
    debug!("room '{}' built with {} exits", room.id, room.exits.len());
    Ok(room)
}

fn item_from_def(def: &ItemDef, root: &Path) -> Result<Item> {
    let image = Sprite::load(root.join(&def.image)).with_context(|| format!("loading image of item '{}'", def.id))?;
    let config = ItemConfig {
        description: def.description.clone(),
        take_allowed: def.take_allow,
        take_refusal: def.take_attempt.clone(),
        manipulate_allowed: def.manipulate_allow,
        manipulate_refusal: def.manipulate_attempt.clone(),
        enter: def.enter.clone(),
        ..ItemConfig::default()
    };
    Ok(Item::new(def.id.clone(), def.name.clone(), image, Point::from(def.topleft), config))
}
