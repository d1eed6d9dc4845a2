//! Rooms and their transient interaction state.
//!
//! A room is a background, the ids of the items lying in it and up to two
//! exit arrows. It also carries everything the interaction model needs
//! between frames: the dirty flag, what the pointer is hovering, whether a
//! menu is open or a use-item selection is pending, the status line and a
//! pending room switch.

use log::debug;
use variantly::Variantly;

use crate::Id;
use crate::arrow::{Arrow, ArrowSide};
use crate::geometry::{Point, Rect};
use crate::item::ItemHolder;
use crate::menu::ItemMenu;
use crate::render::{Color, Renderer};
use crate::sprite::Sprite;

/// Padding of the status bar text.
pub const STATUS_PADDING: f32 = 10.0;

/// What the pointer is resting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverTarget {
    Item(Id),
    /// Index into the room's exits.
    Arrow(usize),
}

/// Modal interaction state. A menu and a pending use-item never coexist.
#[derive(Debug, Default, Clone, PartialEq, Variantly)]
pub enum Mode {
    #[default]
    Idle,
    Menu(ItemMenu),
    /// Waiting for the player to pick the item this one should be used on.
    UseItem(Id),
}

#[derive(Debug, Clone)]
pub struct Room {
    pub id: Id,
    pub name: String,
    pub background: Sprite,
    pub contents: Vec<Id>,
    pub exits: Vec<Arrow>,
    pub status_message: Option<String>,
    pub(crate) dirty: bool,
    pub(crate) hover: Option<HoverTarget>,
    pub(crate) mode: Mode,
    pub(crate) switch_to: Option<Id>,
}

impl ItemHolder for Room {
    fn add_item(&mut self, item_id: Id) {
        if !self.contains_item(&item_id) {
            self.contents.push(item_id);
        }
    }

    fn remove_item(&mut self, item_id: &str) {
        self.contents.retain(|id| id != item_id);
    }

    fn contains_item(&self, item_id: &str) -> bool {
        self.contents.iter().any(|id| id == item_id)
    }
}

impl Room {
    /// An empty room. New rooms start dirty so their first frame is painted.
    pub fn new(id: impl Into<Id>, name: impl Into<String>, background: Sprite) -> Room {
        Room {
            id: id.into(),
            name: name.into(),
            background,
            contents: Vec::new(),
            exits: Vec::new(),
            status_message: None,
            dirty: true,
            hover: None,
            mode: Mode::Idle,
            switch_to: None,
        }
    }

    /// Add an exit arrow, replacing any existing arrow on the same side.
    #[must_use]
    pub fn with_exit(mut self, side: ArrowSide, destination: impl Into<Id>, label: impl Into<String>) -> Room {
        self.exits.retain(|arrow| arrow.side != side);
        self.exits.push(Arrow::new(side, destination, label));
        self
    }

    pub fn exit(&self, side: ArrowSide) -> Option<&Arrow> {
        self.exits.iter().find(|arrow| arrow.side == side)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn hover(&self) -> Option<&HoverTarget> {
        self.hover.as_ref()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn open_menu(&self) -> Option<&ItemMenu> {
        match &self.mode {
            Mode::Menu(menu) => Some(menu),
            _ => None,
        }
    }

    /// Item waiting to be used on something, if any.
    pub fn pending_use_item(&self) -> Option<&str> {
        match &self.mode {
            Mode::UseItem(item_id) => Some(item_id.as_str()),
            _ => None,
        }
    }

    pub fn pending_switch(&self) -> Option<&str> {
        self.switch_to.as_deref()
    }

    /// Take the pending use-item out, leaving an open menu untouched.
    pub(crate) fn take_pending_use_item(&mut self) -> Option<Id> {
        match std::mem::take(&mut self.mode) {
            Mode::UseItem(item_id) => Some(item_id),
            other => {
                self.mode = other;
                None
            },
        }
    }

    /// Forget hover, menu and use-item state when the player walks away.
    pub(crate) fn reset_interaction(&mut self) {
        if self.hover.is_some() || !self.mode.is_idle() {
            debug!("clearing interaction state of room '{}'", self.id);
        }
        self.hover = None;
        self.mode = Mode::Idle;
    }

    /// The translucent band behind the status line.
    pub fn status_bar(screen_width: f32, font_size: f32) -> Rect {
        Rect::new(0.0, 0.0, screen_width, font_size + 2.0 * STATUS_PADDING)
    }

    /// Draw the status line at the top of the screen, if there is one.
    pub fn draw_status_message(&self, renderer: &mut dyn Renderer) {
        let Some(message) = self.status_message.as_deref().filter(|msg| !msg.is_empty()) else {
            return;
        };
        let (screen_width, _) = renderer.screen_size();
        renderer.fill_rect(Self::status_bar(screen_width, renderer.font_size()), Color::BACKDROP);
        renderer.draw_text(message, Point::new(STATUS_PADDING, STATUS_PADDING), Color::BLACK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::MenuAction;
    use crate::render::{DrawOp, HeadlessRenderer};
    use image::{Rgba, RgbaImage};

    fn room() -> Room {
        Room::new("village", "Village", Sprite::from_image(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]))))
    }

    #[test]
    fn new_rooms_start_dirty_and_idle() {
        let room = room();
        assert!(room.is_dirty());
        assert!(room.mode().is_idle());
        assert!(room.hover().is_none());
        assert!(room.pending_switch().is_none());
    }

    #[test]
    fn one_arrow_per_side() {
        let room = room()
            .with_exit(ArrowSide::Left, "house", "House")
            .with_exit(ArrowSide::Right, "forest", "Forest")
            .with_exit(ArrowSide::Left, "barn", "Barn");
        assert_eq!(room.exits.len(), 2);
        assert_eq!(room.exit(ArrowSide::Left).map(|a| a.destination.as_str()), Some("barn"));
        assert_eq!(room.exit(ArrowSide::Right).map(|a| a.destination.as_str()), Some("forest"));
    }

    #[test]
    fn contents_keep_insertion_order_without_duplicates() {
        let mut room = room();
        room.add_item("bird".into());
        room.add_item("door".into());
        room.add_item("bird".into());
        assert_eq!(room.contents, vec!["bird".to_string(), "door".to_string()]);
        room.remove_item("bird");
        assert!(!room.contains_item("bird"));
    }

    #[test]
    fn taking_use_item_leaves_menu_alone() {
        let mut room = room();
        let renderer = HeadlessRenderer::new(720.0, 576.0);
        room.mode = Mode::Menu(ItemMenu::open("door", vec![MenuAction::View], &renderer));
        assert_eq!(room.take_pending_use_item(), None);
        assert!(room.open_menu().is_some());

        room.mode = Mode::UseItem("circle".into());
        assert_eq!(room.pending_use_item(), Some("circle"));
        assert_eq!(room.take_pending_use_item().as_deref(), Some("circle"));
        assert!(room.mode().is_idle());
    }

    #[test]
    fn status_bar_only_drawn_with_a_message() {
        let mut room = room();
        let mut renderer = HeadlessRenderer::new(720.0, 576.0);
        room.draw_status_message(&mut renderer);
        assert!(renderer.ops().is_empty());

        room.status_message = Some("The door opens easily.".into());
        room.draw_status_message(&mut renderer);
        assert_eq!(
            renderer.ops(),
            [
                DrawOp::FillRect {
                    rect: Rect::new(0.0, 0.0, 720.0, 44.0),
                    color: Color::BACKDROP,
                },
                DrawOp::Text {
                    text: "The door opens easily.".into(),
                    at: Point::new(10.0, 10.0),
                },
            ]
        );
    }
}
