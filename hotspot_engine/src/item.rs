//! Item types and the actions a player can perform on them.
//!
//! Items are the interactive objects of the game: things lying in a room or
//! carried in the inventory. What the context menu offers for an item is
//! derived from its permissions, its location and the active room; the menu
//! actions themselves are carried out by [`perform`] and [`use_with`].

use std::fmt;
use std::rc::Rc;

use log::{debug, info, trace, warn};
use uuid::Uuid;

use crate::geometry::{Point, Rect};
use crate::hover::Hoverable;
use crate::interaction::ActiveRoom;
use crate::sprite::Sprite;
use crate::world::Location;
use crate::Id;

pub const VIEW_LABEL: &str = "View";
pub const TAKE_LABEL: &str = "Take";
pub const MANIPULATE_LABEL: &str = "Manipulate";
pub const ENTER_LABEL: &str = "Enter";
pub const USE_ITEM_LABEL: &str = "Use item with...";
pub const USE_ITEM_HELP_MESSAGE: &str = "Select an item from the screen.";
pub const USE_ITEM_NOSUCCESS_MESSAGE: &str = "I don't know how to do this.";

/// Author callback run against the active room (manipulate, view, enter).
pub type RoomHook = Rc<dyn Fn(&mut ActiveRoom<'_>)>;

/// Author callback for "use this item with that one": `(room, this, other)`.
pub type UseHook = Rc<dyn Fn(&mut ActiveRoom<'_>, &str, &str)>;

/// One "use with" rule: when this item is used on `target`, run `effect`.
#[derive(Clone)]
pub struct UsePair {
    pub target: Id,
    pub effect: UseHook,
}

impl fmt::Debug for UsePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UsePair").field("target", &self.target).finish_non_exhaustive()
    }
}

/// Everything about an item's behavior, apart from its looks.
///
/// Defaults mirror the authoring convention: items can be taken, but not
/// manipulated.
#[derive(Clone)]
pub struct ItemConfig {
    pub description: Option<String>,
    pub take_allowed: bool,
    pub take_refusal: Option<String>,
    pub manipulate_allowed: bool,
    pub manipulate_refusal: Option<String>,
    pub on_manipulate: Option<RoomHook>,
    pub enter: Option<Id>,
    pub use_with: Vec<UsePair>,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            description: None,
            take_allowed: true,
            take_refusal: None,
            manipulate_allowed: false,
            manipulate_refusal: None,
            on_manipulate: None,
            enter: None,
            use_with: Vec::new(),
        }
    }
}

/// The entries an item's context menu can hold, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    View,
    Manipulate,
    Take,
    Enter,
    UseWith,
}

impl MenuAction {
    pub fn label(self) -> &'static str {
        match self {
            MenuAction::View => VIEW_LABEL,
            MenuAction::Manipulate => MANIPULATE_LABEL,
            MenuAction::Take => TAKE_LABEL,
            MenuAction::Enter => ENTER_LABEL,
            MenuAction::UseWith => USE_ITEM_LABEL,
        }
    }
}

/// An interactive object with a sprite and optional behaviors.
///
/// `rect` always matches the current image; `origin` and `original_image`
/// remember how the author placed it so it can be put back after a stay in
/// the inventory.
#[derive(Clone)]
pub struct Item {
    pub id: Id,
    pub name: String,
    pub description: Option<String>,
    pub image: Sprite,
    pub original_image: Sprite,
    pub rect: Rect,
    pub origin: Point,
    pub location: Location,
    pub take_allowed: bool,
    pub take_refusal: Option<String>,
    pub manipulate_allowed: bool,
    pub manipulate_refusal: Option<String>,
    pub on_manipulate: Option<RoomHook>,
    pub on_view: Option<RoomHook>,
    pub on_enter: Option<RoomHook>,
    pub enter: Option<Id>,
    pub use_with: Vec<UsePair>,
    /// Last inventory thumbnail and the id of the image it was scaled from.
    thumbnail: Option<(Uuid, Sprite)>,
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("rect", &self.rect)
            .field("location", &self.location)
            .field("take_allowed", &self.take_allowed)
            .field("manipulate_allowed", &self.manipulate_allowed)
            .field("enter", &self.enter)
            .field("use_with", &self.use_with)
            .finish_non_exhaustive()
    }
}

impl Hoverable for Item {
    fn name(&self) -> &str {
        &self.name
    }

    /// Pixel-precise: the pointer must be inside the bounding rectangle *and*
    /// over a pixel of the current image that isn't fully transparent.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn is_under_pointer(&self, pointer: Point) -> bool {
        if !self.rect.contains(pointer) {
            return false;
        }
        let x = (pointer.x - self.rect.x).floor() as u32;
        let y = (pointer.y - self.rect.y).floor() as u32;
        self.image.alpha_at(x, y).is_some_and(|alpha| alpha != 0)
    }
}

impl Item {
    /// Create an item whose image is placed with its top-left corner at `topleft`.
    #[allow(clippy::cast_precision_loss)]
    pub fn new(id: impl Into<Id>, name: impl Into<String>, image: Sprite, topleft: Point, config: ItemConfig) -> Item {
        let rect = Rect::new(topleft.x, topleft.y, image.width() as f32, image.height() as f32);
        Item {
            id: id.into(),
            name: name.into(),
            description: config.description,
            original_image: image.clone(),
            image,
            rect,
            origin: topleft,
            location: Location::Nowhere,
            take_allowed: config.take_allowed,
            take_refusal: config.take_refusal,
            manipulate_allowed: config.manipulate_allowed,
            manipulate_refusal: config.manipulate_refusal,
            on_manipulate: config.on_manipulate,
            on_view: None,
            on_enter: None,
            enter: config.enter,
            use_with: config.use_with,
            thumbnail: None,
        }
    }

    /// Set the hook run when the player manipulates this item (if allowed).
    pub fn on_manipulate(&mut self, hook: impl Fn(&mut ActiveRoom<'_>) + 'static) -> &mut Self {
        self.on_manipulate = Some(Rc::new(hook));
        self
    }

    /// Set a hook run after the description has been shown.
    pub fn on_view(&mut self, hook: impl Fn(&mut ActiveRoom<'_>) + 'static) -> &mut Self {
        self.on_view = Some(Rc::new(hook));
        self
    }

    /// Set a hook run after an enter request has been queued.
    pub fn on_enter(&mut self, hook: impl Fn(&mut ActiveRoom<'_>) + 'static) -> &mut Self {
        self.on_enter = Some(Rc::new(hook));
        self
    }

    /// Register what happens when this item is used on `target`.
    pub fn add_use_pair(
        &mut self,
        target: impl Into<Id>,
        effect: impl Fn(&mut ActiveRoom<'_>, &str, &str) + 'static,
    ) -> &mut Self {
        self.use_with.push(UsePair {
            target: target.into(),
            effect: Rc::new(effect),
        });
        self
    }

    /// Swap the displayed image, keeping the top-left corner in place.
    #[allow(clippy::cast_precision_loss)]
    pub fn set_image(&mut self, image: Sprite) {
        self.rect = Rect::new(self.rect.x, self.rect.y, image.width() as f32, image.height() as f32);
        self.image = image;
    }

    /// A square thumbnail of the current image.
    ///
    /// Scaled once per source image and reused, so an item carried back and
    /// forth keeps one sprite (and one backend texture).
    pub fn thumbnail(&mut self, edge: u32) -> Sprite {
        if let Some((source, thumbnail)) = &self.thumbnail
            && *source == self.image.id()
            && thumbnail.width() == edge
            && thumbnail.height() == edge
        {
            return thumbnail.clone();
        }
        trace!("scaling '{}' to a {edge}px thumbnail", self.id);
        let thumbnail = self.image.scaled(edge, edge);
        self.thumbnail = Some((self.image.id(), thumbnail.clone()));
        thumbnail
    }

    /// Put the author's image back at the author's position.
    pub fn restore_appearance(&mut self) {
        self.set_image(self.original_image.clone());
        self.rect = self.rect.moved_to(self.origin);
    }

    pub fn description_text(&self) -> Option<&str> {
        non_empty(self.description.as_ref())
    }

    pub fn take_refusal_text(&self) -> Option<&str> {
        non_empty(self.take_refusal.as_ref())
    }

    pub fn manipulate_refusal_text(&self) -> Option<&str> {
        non_empty(self.manipulate_refusal.as_ref())
    }

    /// Menu entries available for this item while `room` is active.
    ///
    /// Order is fixed: View, Manipulate, Take, Enter, Use item with. Take and
    /// Enter need the item to be lying in `room`; Use needs it in the inventory.
    pub fn menu_entries(&self, room: &str) -> Vec<MenuAction> {
        let mut entries = Vec::new();
        if self.description_text().is_some() {
            entries.push(MenuAction::View);
        }
        if self.manipulate_allowed || self.manipulate_refusal_text().is_some() {
            entries.push(MenuAction::Manipulate);
        }
        if self.location.room_id() == Some(room) {
            if self.take_allowed || self.take_refusal_text().is_some() {
                entries.push(MenuAction::Take);
            }
            if self.enter.is_some() {
                entries.push(MenuAction::Enter);
            }
        }
        if self.location.is_inventory() {
            entries.push(MenuAction::UseWith);
        }
        entries
    }
}

/// Anything that keeps an ordered list of item ids (rooms, the inventory).
pub trait ItemHolder {
    /// Append an item to the holder's contents. Adding an item twice is a no-op.
    fn add_item(&mut self, item_id: Id);
    /// Remove an item from the holder's contents.
    fn remove_item(&mut self, item_id: &str);
    /// Return `true` when the holder already contains the given item.
    fn contains_item(&self, item_id: &str) -> bool;
}

fn non_empty(text: Option<&String>) -> Option<&str> {
    text.map(String::as_str).filter(|text| !text.is_empty())
}

/// Carry out a menu action chosen for `item_id`.
///
/// Unknown ids are logged and ignored.
pub fn perform(room: &mut ActiveRoom<'_>, item_id: &str, action: MenuAction) {
    let Some(item) = room.item(item_id) else {
        warn!("menu action {action:?} on unknown item '{item_id}' ignored");
        return;
    };
    info!("{} on '{}' ({item_id})", action.label(), item.name);

    match action {
        MenuAction::View => {
            let description = item.description_text().map(str::to_string);
            let hook = item.on_view.clone();
            if let Some(description) = description {
                room.set_status(description);
            }
            if let Some(hook) = hook {
                hook(room);
            }
        },
        MenuAction::Take => {
            if item.take_allowed {
                room.take_item(item_id);
            } else if let Some(refusal) = item.take_refusal_text().map(str::to_string) {
                room.set_status(refusal);
            }
        },
        MenuAction::Manipulate => {
            if item.manipulate_allowed {
                if let Some(hook) = item.on_manipulate.clone() {
                    hook(room);
                } else {
                    debug!("'{item_id}' may be manipulated but has no hook");
                }
            } else if let Some(refusal) = item.manipulate_refusal_text().map(str::to_string) {
                room.set_status(refusal);
            }
        },
        MenuAction::Enter => {
            let destination = item.enter.clone();
            let hook = item.on_enter.clone();
            if let Some(destination) = destination {
                room.request_switch(destination);
            }
            if let Some(hook) = hook {
                hook(room);
            }
        },
        MenuAction::UseWith => {
            room.begin_use_item(item_id);
            room.set_status(USE_ITEM_HELP_MESSAGE);
        },
    }
}

/// Use `this` on `other`: the first registered pair targeting `other` wins.
///
/// Without a matching pair the room's status shows the standard failure line.
pub fn use_with(room: &mut ActiveRoom<'_>, this: &str, other: &str) {
    let effect = room.item(this).and_then(|item| {
        item.use_with
            .iter()
            .find(|pair| pair.target == other)
            .map(|pair| Rc::clone(&pair.effect))
    });
    match effect {
        Some(effect) => {
            info!("using '{this}' with '{other}'");
            effect(room, this, other);
        },
        None => {
            debug!("no use pair for '{this}' with '{other}'");
            room.set_status(USE_ITEM_NOSUCCESS_MESSAGE);
        },
    }
}
