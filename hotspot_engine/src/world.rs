//! Data structures representing the game world.
//!
//! [`World`] owns every room and item for the whole run. Rooms and the
//! inventory only hold item ids; each item also records its own
//! [`Location`], and the move operations here keep both views in sync so an
//! item is never in two places at once.

use std::collections::HashMap;

use log::{info, warn};
use variantly::Variantly;

use crate::Id;
use crate::interaction::ActiveRoom;
use crate::inventory::Inventory;
use crate::item::{Item, ItemHolder};
use crate::room::Room;

/// Where an item currently is.
#[derive(Debug, Default, Clone, PartialEq, Eq, Variantly)]
pub enum Location {
    /// Not placed anywhere: never spawned, or removed by a hook.
    #[default]
    Nowhere,
    Room(Id),
    Inventory,
}

impl Location {
    /// Id of the room holding the item, if it lies in one.
    pub fn room_id(&self) -> Option<&str> {
        match self {
            Location::Room(room_id) => Some(room_id),
            _ => None,
        }
    }
}

/// Complete state of the running game.
#[derive(Debug)]
pub struct World {
    pub rooms: HashMap<Id, Room>,
    pub items: HashMap<Id, Item>,
    pub inventory: Inventory,
}

impl World {
    /// Create an empty world for a screen of the given height (used to anchor
    /// the inventory strip).
    pub fn new(screen_height: f32) -> World {
        let world = Self {
            rooms: HashMap::new(),
            items: HashMap::new(),
            inventory: Inventory::new(screen_height),
        };
        info!("new, empty 'World' created");
        world
    }

    pub fn add_room(&mut self, room: Room) {
        self.rooms.insert(room.id.clone(), room);
    }

    /// Register an item. It starts out `Nowhere` whatever its location says;
    /// use [`World::place_in_room`] or [`World::stow_in_inventory`] to put it somewhere.
    pub fn add_item(&mut self, mut item: Item) {
        item.location = Location::Nowhere;
        self.items.insert(item.id.clone(), item);
    }

    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn room_mut(&mut self, room_id: &str) -> Option<&mut Room> {
        self.rooms.get_mut(room_id)
    }

    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.items.get(item_id)
    }

    /// Get mutable reference to a world item.
    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut Item> {
        self.items.get_mut(item_id)
    }

    /// Move an item into a room, taking it out of wherever it was.
    ///
    /// Returns false (and changes nothing) if the item or room is unknown. A
    /// room lent out by [`World::with_room`] is unknown here; hooks move items
    /// through [`ActiveRoom::place_in_room`] instead.
    pub fn place_in_room(&mut self, item_id: &str, room_id: &str) -> bool {
        if !self.items.contains_key(item_id) || !self.rooms.contains_key(room_id) {
            warn!("cannot place item '{item_id}' in room '{room_id}': unknown id");
            return false;
        }
        self.detach(item_id, None);
        self.attach_to_room(item_id, room_id);
        true
    }

    /// Move an item into the inventory, taking it out of wherever it was.
    pub fn stow_in_inventory(&mut self, item_id: &str) -> bool {
        if !self.items.contains_key(item_id) {
            warn!("cannot stow unknown item '{item_id}'");
            return false;
        }
        self.detach(item_id, None);
        self.attach_to_inventory(item_id);
        true
    }

    /// Take an item out of play.
    pub fn unplace(&mut self, item_id: &str) -> bool {
        self.detach(item_id, None).is_some()
    }

    /// Re-anchor the inventory strip after the screen changed height.
    pub fn set_screen_height(&mut self, screen_height: f32) {
        self.inventory.set_screen_height(screen_height, &mut self.items);
    }

    /// Lend out a room together with the rest of the world.
    ///
    /// The room is taken out of `rooms` for the duration of `f`, so hooks can
    /// freely touch other rooms and items. Returns `None` for an unknown room.
    pub fn with_room<T>(&mut self, room_id: &str, f: impl FnOnce(&mut ActiveRoom<'_>) -> T) -> Option<T> {
        let mut room = self.rooms.remove(room_id)?;
        let result = f(&mut ActiveRoom::new(&mut room, self));
        self.rooms.insert(room.id.clone(), room);
        Some(result)
    }

    /// Take an item out of its current container and mark it `Nowhere`.
    ///
    /// `active` is the room currently lent out by [`World::with_room`], which
    /// isn't in `rooms`. Items leaving the inventory get their original look
    /// back. Returns the previous location, or `None` for an unknown item.
    pub(crate) fn detach(&mut self, item_id: &str, active: Option<&mut Room>) -> Option<Location> {
        let previous = self.items.get(item_id)?.location.clone();
        match &previous {
            Location::Room(room_id) => {
                let holder = match active {
                    Some(room) if room.id == *room_id => Some(room),
                    _ => self.rooms.get_mut(room_id),
                };
                if let Some(room) = holder {
                    room.remove_item(item_id);
                    room.mark_dirty();
                }
            },
            Location::Inventory => {
                self.inventory.remove(item_id, &mut self.items);
                if let Some(item) = self.items.get_mut(item_id) {
                    item.restore_appearance();
                }
            },
            Location::Nowhere => {},
        }
        if let Some(item) = self.items.get_mut(item_id) {
            item.location = Location::Nowhere;
        }
        Some(previous)
    }

    /// Put an already detached item into a room that isn't lent out.
    pub(crate) fn attach_to_room(&mut self, item_id: &str, room_id: &str) {
        if let Some(room) = self.rooms.get_mut(room_id) {
            room.add_item(item_id.to_string());
            room.mark_dirty();
        }
        if let Some(item) = self.items.get_mut(item_id) {
            item.location = Location::Room(room_id.to_string());
        }
    }

    pub(crate) fn attach_to_inventory(&mut self, item_id: &str) {
        if let Some(item) = self.items.get_mut(item_id) {
            self.inventory.stow(item);
            item.location = Location::Inventory;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Rect};
    use crate::item::ItemConfig;
    use crate::sprite::Sprite;
    use image::{Rgba, RgbaImage};

    fn sprite(width: u32, height: u32) -> Sprite {
        Sprite::from_image(RgbaImage::from_pixel(width, height, Rgba([1, 2, 3, 255])))
    }

    fn test_world() -> World {
        let mut world = World::new(576.0);
        world.add_room(Room::new("village", "Village", sprite(4, 4)));
        world.add_room(Room::new("house", "House", sprite(4, 4)));
        world.add_item(Item::new(
            "circle",
            "Red circle",
            sprite(20, 30),
            Point::new(400.0, 450.0),
            ItemConfig::default(),
        ));
        world.add_item(Item::new("bird", "Bird", sprite(8, 8), Point::new(300.0, 100.0), ItemConfig::default()));
        world
    }

    /// Every item is in the container its location names, and in no other.
    fn assert_consistent(world: &World) {
        for item in world.items.values() {
            let in_rooms: Vec<&str> = world
                .rooms
                .values()
                .filter(|room| room.contains_item(&item.id))
                .map(|room| room.id.as_str())
                .collect();
            let in_inventory = world.inventory.contains_item(&item.id);
            match &item.location {
                Location::Room(room_id) => {
                    assert_eq!(in_rooms, vec![room_id.as_str()]);
                    assert!(!in_inventory);
                },
                Location::Inventory => {
                    assert!(in_rooms.is_empty());
                    assert!(in_inventory);
                },
                Location::Nowhere => {
                    assert!(in_rooms.is_empty());
                    assert!(!in_inventory);
                },
            }
        }
    }

    #[test]
    fn location_default_is_nowhere() {
        assert_eq!(Location::default(), Location::Nowhere);
        assert!(Location::Inventory.is_inventory());
        assert_eq!(Location::Room("x".into()).room_id(), Some("x"));
        assert_eq!(Location::Inventory.room_id(), None);
    }

    #[test]
    fn placing_moves_between_rooms() {
        let mut world = test_world();
        assert!(world.place_in_room("circle", "village"));
        assert!(world.place_in_room("circle", "house"));

        assert!(!world.rooms["village"].contains_item("circle"));
        assert!(world.rooms["house"].contains_item("circle"));
        assert_consistent(&world);
    }

    #[test]
    fn stowing_takes_item_out_of_room_and_shrinks_it() {
        let mut world = test_world();
        world.place_in_room("circle", "village");
        assert!(world.stow_in_inventory("circle"));

        let circle = &world.items["circle"];
        assert_eq!(circle.location, Location::Inventory);
        assert_eq!(circle.rect, Rect::new(5.0, 521.0, 50.0, 50.0));
        assert!(world.rooms["village"].contents.is_empty());
        assert_consistent(&world);
    }

    #[test]
    fn leaving_inventory_restores_original_look() {
        let mut world = test_world();
        world.stow_in_inventory("circle");
        world.place_in_room("circle", "house");

        let circle = &world.items["circle"];
        assert_eq!(circle.rect, Rect::new(400.0, 450.0, 20.0, 30.0));
        assert!(world.inventory.is_empty());
        assert_consistent(&world);
    }

    #[test]
    fn carrying_an_item_again_reuses_its_thumbnail() {
        let mut world = test_world();
        world.stow_in_inventory("circle");
        let first = world.items["circle"].image.id();

        world.place_in_room("circle", "village");
        assert_eq!(world.items["circle"].image.id(), world.items["circle"].original_image.id());
        world.stow_in_inventory("circle");
        assert_eq!(world.items["circle"].image.id(), first);

        // a swapped image gets a fresh thumbnail
        world.place_in_room("circle", "village");
        let circle = world.item_mut("circle").unwrap();
        circle.set_image(sprite(10, 10));
        world.stow_in_inventory("circle");
        assert_ne!(world.items["circle"].image.id(), first);
        assert_eq!(world.items["circle"].rect.w, 50.0);
    }

    #[test]
    fn unknown_ids_change_nothing() {
        let mut world = test_world();
        assert!(!world.place_in_room("ghost", "village"));
        assert!(!world.place_in_room("circle", "attic"));
        assert!(!world.stow_in_inventory("ghost"));
        assert!(!world.unplace("ghost"));
        assert_consistent(&world);
    }

    #[test]
    fn with_room_lends_and_returns_the_room() {
        let mut world = test_world();
        let seen = world.with_room("village", |room| {
            assert!(room.world().room("village").is_none());
            room.id().to_string()
        });
        assert_eq!(seen.as_deref(), Some("village"));
        assert!(world.room("village").is_some());
        assert!(world.with_room("attic", |_| ()).is_none());
    }

    #[test]
    fn moves_made_while_a_room_is_lent_reach_that_room() {
        let mut world = test_world();
        world.place_in_room("circle", "village");
        world.place_in_room("bird", "village");

        world.with_room("village", |room| {
            room.place_in_room("circle", "house");
            assert!(!room.room().contains_item("circle"));

            room.place_in_room("circle", "village");
            assert!(room.room().contains_item("circle"));
            assert!(!room.world().rooms["house"].contains_item("circle"));

            room.take_item("circle");
            room.place_in_room("circle", "house");
            assert!(room.world().inventory.is_empty());

            room.unplace("bird");
            assert!(!room.room().contains_item("bird"));
            room.place_in_room("bird", "attic");
        });

        assert_eq!(world.items["circle"].location, Location::Room("house".into()));
        assert_eq!(world.items["circle"].rect, Rect::new(400.0, 450.0, 20.0, 30.0));
        assert!(world.items["bird"].location.is_nowhere());
        assert!(world.rooms["village"].contents.is_empty());
        assert_consistent(&world);
    }

    #[test]
    fn unplace_removes_from_everything() {
        let mut world = test_world();
        world.place_in_room("bird", "village");
        world.stow_in_inventory("circle");
        assert!(world.unplace("bird"));
        assert!(world.unplace("circle"));
        assert!(world.items.values().all(|item| item.location.is_nowhere()));
        assert_consistent(&world);
    }
}
