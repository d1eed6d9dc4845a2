//! Resolving pointer input against the active room.
//!
//! [`ActiveRoom`] is the room the player is standing in, lent out together
//! with the rest of the [`World`] by [`World::with_room`]. It is what the
//! main loop dispatches clicks and pointer moves to, and what author hooks
//! receive to change the game.
//!
//! Click resolution, first match wins:
//! 1. an exit arrow under the pointer queues a room switch, nothing else happens;
//! 2. hover label and status line are cleared and the room repainted if needed;
//! 3. a pending use-item is applied to the room item under the pointer, if any
//!    (the pending state is dropped either way);
//! 4. an open menu runs the entry under the pointer and closes;
//! 5. otherwise a menu opens for the first room item, then inventory item,
//!    under the pointer that has something to offer.

use log::{debug, info, trace, warn};

use crate::Id;
use crate::geometry::Point;
use crate::hover::Hoverable;
use crate::item::{self, Item, ItemHolder};
use crate::menu::ItemMenu;
use crate::render::Renderer;
use crate::room::{HoverTarget, Mode, Room};
use crate::world::{Location, World};

/// The room currently in play, plus mutable access to everything else.
pub struct ActiveRoom<'w> {
    room: &'w mut Room,
    world: &'w mut World,
}

impl<'w> ActiveRoom<'w> {
    pub(crate) fn new(room: &'w mut Room, world: &'w mut World) -> ActiveRoom<'w> {
        ActiveRoom { room, world }
    }

    pub fn id(&self) -> &str {
        &self.room.id
    }

    pub fn room(&self) -> &Room {
        self.room
    }

    pub fn room_mut(&mut self) -> &mut Room {
        self.room
    }

    /// The rest of the world. The active room itself is not in `world().rooms`.
    pub fn world(&self) -> &World {
        self.world
    }

    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.world.items.get(item_id)
    }

    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut Item> {
        self.world.items.get_mut(item_id)
    }

    pub fn status(&self) -> Option<&str> {
        self.room.status_message.as_deref()
    }

    /// Show a line of text in the status bar from the next repaint on.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.room.status_message = Some(message.into());
        self.room.dirty = true;
    }

    pub fn clear_status(&mut self) {
        if self.room.status_message.take().is_some() {
            self.room.dirty = true;
        }
    }

    /// Put an item into this room, taking it out of wherever it was.
    pub fn add_item(&mut self, item_id: &str) {
        if !self.world.items.contains_key(item_id) {
            warn!("hook tried to add unknown item '{item_id}' to room '{}'", self.room.id);
            return;
        }
        self.world.detach(item_id, Some(&mut *self.room));
        self.room.add_item(item_id.to_string());
        if let Some(item) = self.world.items.get_mut(item_id) {
            item.location = Location::Room(self.room.id.clone());
        }
        self.room.dirty = true;
        debug!("'{item_id}' added to room '{}'", self.room.id);
    }

    /// Take an item out of this room. Items lying elsewhere are left alone.
    pub fn remove_item(&mut self, item_id: &str) {
        if !self.room.contains_item(item_id) {
            warn!("item '{item_id}' is not in room '{}', nothing removed", self.room.id);
            return;
        }
        self.world.detach(item_id, Some(&mut *self.room));
        self.room.dirty = true;
        debug!("'{item_id}' removed from room '{}'", self.room.id);
    }

    /// Move an item into the inventory.
    pub fn take_item(&mut self, item_id: &str) {
        if !self.world.items.contains_key(item_id) {
            warn!("cannot take unknown item '{item_id}'");
            return;
        }
        self.world.detach(item_id, Some(&mut *self.room));
        self.world.attach_to_inventory(item_id);
        self.room.dirty = true;
        info!("'{item_id}' taken into inventory");
    }

    /// Move an item into any room, wherever it is now.
    pub fn place_in_room(&mut self, item_id: &str, room_id: &str) {
        if room_id == self.room.id {
            self.add_item(item_id);
            return;
        }
        if !self.world.items.contains_key(item_id) || !self.world.rooms.contains_key(room_id) {
            warn!("cannot place item '{item_id}' in room '{room_id}': unknown id");
            return;
        }
        self.world.detach(item_id, Some(&mut *self.room));
        self.world.attach_to_room(item_id, room_id);
        self.room.dirty = true;
        debug!("'{item_id}' moved to room '{room_id}'");
    }

    /// Take an item out of play, wherever it is.
    pub fn unplace(&mut self, item_id: &str) {
        if self.world.detach(item_id, Some(&mut *self.room)).is_none() {
            warn!("cannot unplace unknown item '{item_id}'");
            return;
        }
        self.room.dirty = true;
    }

    /// Take an item out of the inventory (and out of play).
    pub fn remove_from_inventory(&mut self, item_id: &str) {
        if !self.world.inventory.contains_item(item_id) {
            warn!("item '{item_id}' is not in the inventory, nothing removed");
            return;
        }
        self.world.detach(item_id, None);
        self.room.dirty = true;
        debug!("'{item_id}' removed from inventory");
    }

    /// Ask for a room switch. It takes effect at the next frame boundary.
    pub fn request_switch(&mut self, destination: impl Into<Id>) {
        let destination = destination.into();
        debug!("switch from '{}' to '{destination}' requested", self.room.id);
        self.room.switch_to = Some(destination);
    }

    /// Wait for the player to pick the item `item_id` should be used on.
    pub fn begin_use_item(&mut self, item_id: &str) {
        self.room.mode = Mode::UseItem(item_id.to_string());
    }

    /// Resolve a click at the current pointer position.
    pub fn handle_click(&mut self, renderer: &mut dyn Renderer) {
        let pointer = renderer.pointer_position();

        if let Some(arrow) = self.room.exits.iter().find(|arrow| arrow.is_under_pointer(pointer)) {
            info!("exit '{}' clicked", arrow.label);
            self.room.switch_to = Some(arrow.destination.clone());
            return;
        }

        if self.room.hover.take().is_some() {
            self.room.dirty = true;
        }
        self.clear_status();
        self.redraw(renderer);

        if let Some(source) = self.room.take_pending_use_item() {
            if let Some(target) = self.room_item_under(pointer) {
                item::use_with(self, &source, &target);
                self.room.dirty = true;
                return;
            }
            debug!("nothing under the pointer to use '{source}' with");
        }

        if let Mode::Menu(menu) = std::mem::take(&mut self.room.mode) {
            if let Some(action) = menu.entry_at(pointer) {
                item::perform(self, &menu.item, action);
            }
            self.room.dirty = true;
            return;
        }

        self.open_menu(renderer, pointer);
    }

    /// Refresh the hover label. Does nothing while a menu is open.
    pub fn handle_pointer_move(&mut self, renderer: &mut dyn Renderer) {
        if self.room.mode.is_menu() {
            return;
        }
        let pointer = renderer.pointer_position();

        let hit = self
            .hover_candidates()
            .into_iter()
            .find(|(_, target)| target.is_under_pointer(pointer))
            .map(|(key, target)| {
                if self.room.hover.as_ref() != Some(&key) {
                    trace!("hovering {key:?}");
                    target.draw_hover_label(renderer);
                }
                key
            });

        match hit {
            Some(key) => self.room.hover = Some(key),
            None => {
                if self.room.hover.take().is_some() {
                    self.room.dirty = true;
                }
            },
        }
    }

    /// Repaint the whole room if it is dirty, then mark it clean.
    ///
    /// Layers, bottom to top: background, room items, status bar, inventory,
    /// exit arrows.
    pub fn redraw(&mut self, renderer: &mut dyn Renderer) {
        if !self.room.dirty {
            return;
        }
        renderer.draw_sprite(&self.room.background, Point::default());
        for item in self.room.contents.iter().filter_map(|id| self.world.items.get(id)) {
            renderer.draw_sprite(&item.image, item.rect.top_left());
        }
        self.room.draw_status_message(renderer);
        self.world.inventory.draw(&self.world.items, renderer);
        for arrow in &mut self.room.exits {
            arrow.draw(renderer);
        }
        renderer.present();
        self.room.dirty = false;
        trace!("room '{}' repainted", self.room.id);
    }

    fn room_item_under(&self, pointer: Point) -> Option<Id> {
        self.room
            .contents
            .iter()
            .filter_map(|id| self.world.items.get(id))
            .find(|item| item.is_under_pointer(pointer))
            .map(|item| item.id.clone())
    }

    fn open_menu(&mut self, renderer: &mut dyn Renderer, pointer: Point) {
        let room_id = self.room.id.as_str();
        let candidate = self
            .room
            .contents
            .iter()
            .chain(self.world.inventory.items())
            .filter_map(|id| self.world.items.get(id))
            .filter(|item| item.is_under_pointer(pointer))
            .map(|item| (item.id.clone(), item.menu_entries(room_id)))
            .find(|(_, entries)| !entries.is_empty());

        let Some((item_id, entries)) = candidate else {
            return;
        };
        debug!("opening menu for '{item_id}' with {} entries", entries.len());
        let menu = ItemMenu::open(item_id, entries, &*renderer);
        menu.draw(renderer);
        self.room.mode = Mode::Menu(menu);
    }

    /// Everything that can show a hover label, in scan order: room items,
    /// inventory items, exit arrows.
    fn hover_candidates(&self) -> Vec<(HoverTarget, &dyn Hoverable)> {
        let items = self
            .room
            .contents
            .iter()
            .chain(self.world.inventory.items())
            .filter_map(|id| self.world.items.get(id))
            .map(|item| (HoverTarget::Item(item.id.clone()), item as &dyn Hoverable));
        let arrows = self
            .room
            .exits
            .iter()
            .enumerate()
            .map(|(index, arrow)| (HoverTarget::Arrow(index), arrow as &dyn Hoverable));
        items.chain(arrows).collect()
    }
}
