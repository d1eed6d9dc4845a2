//! Placement of items at their starting locations.
//!
//! Items are placed in definition order, so each room's contents (and the
//! inventory) keep the order the author wrote them in.

use anyhow::{Result, bail};
use log::info;

use hotspot_data::{LocationDef, WorldDef};

use crate::world::World;

/// Put every defined item where its definition says it starts.
///
/// # Errors
/// - on an item or room id that isn't part of `world`
pub fn place_items(world: &mut World, def: &WorldDef) -> Result<()> {
    let mut in_rooms = 0;
    let mut in_inventory = 0;
    let mut unspawned = 0;

    for item in &def.items {
        match &item.location {
            LocationDef::Room(room_id) => {
                if !world.place_in_room(&item.id, room_id) {
                    bail!("cannot place item '{}' in room '{room_id}'", item.id);
                }
                in_rooms += 1;
            },
            LocationDef::Inventory => {
                if !world.stow_in_inventory(&item.id) {
                    bail!("cannot stow item '{}' in the inventory", item.id);
                }
                in_inventory += 1;
            },
            LocationDef::Nowhere => unspawned += 1,
        }
    }

    info!("placed {in_rooms} items into rooms");
    info!("placed {in_inventory} items into the inventory");
    info!("{unspawned} items remain unspawned (Location::Nowhere)");
    Ok(())
}
