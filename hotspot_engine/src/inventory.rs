//! The player's inventory strip along the bottom of the screen.

use std::collections::HashMap;

use log::debug;

use crate::Id;
use crate::geometry::{Point, Rect};
use crate::item::{Item, ItemHolder};
use crate::render::{Color, Renderer};

/// Gap between slots and around the strip.
pub const PADDING: f32 = 5.0;
/// Edge length of the square thumbnail each carried item is shrunk to.
pub const SLOT_SIZE: f32 = 50.0;

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const THUMBNAIL_PIXELS: u32 = SLOT_SIZE as u32;

/// Items carried by the player, in pickup order.
///
/// Slot `i` sits at `x = i * (SLOT_SIZE + PADDING) + PADDING`, so the strip is
/// always packed from the left with no gaps.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: Vec<Id>,
    screen_height: f32,
}

impl ItemHolder for Inventory {
    fn add_item(&mut self, item_id: Id) {
        if !self.contains_item(&item_id) {
            self.items.push(item_id);
        }
    }

    fn remove_item(&mut self, item_id: &str) {
        self.items.retain(|id| id != item_id);
    }

    fn contains_item(&self, item_id: &str) -> bool {
        self.items.iter().any(|id| id == item_id)
    }
}

impl Inventory {
    pub fn new(screen_height: f32) -> Inventory {
        Inventory {
            items: Vec::new(),
            screen_height,
        }
    }

    pub fn items(&self) -> &[Id] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn slot_position(&self, index: usize) -> Point {
        Point::new(
            index as f32 * (SLOT_SIZE + PADDING) + PADDING,
            self.screen_height - SLOT_SIZE - PADDING,
        )
    }

    /// The translucent band behind the slots.
    pub fn backdrop(&self, screen_width: f32) -> Rect {
        let height = SLOT_SIZE + 2.0 * PADDING;
        Rect::new(0.0, self.screen_height - height, screen_width, height)
    }

    /// Append an item to the next free slot, shrinking it to a thumbnail.
    ///
    /// The caller is responsible for taking the item out of its previous holder.
    pub fn stow(&mut self, item: &mut Item) {
        if self.contains_item(&item.id) {
            return;
        }
        let thumbnail = item.thumbnail(THUMBNAIL_PIXELS);
        item.set_image(thumbnail);
        item.rect = item.rect.moved_to(self.slot_position(self.items.len()));
        debug!("'{}' stowed in inventory slot {}", item.id, self.items.len());
        self.items.push(item.id.clone());
    }

    /// Drop an item from the strip and close the gap it leaves.
    pub fn remove(&mut self, item_id: &str, items: &mut HashMap<Id, Item>) {
        self.remove_item(item_id);
        self.relayout(items);
    }

    /// Move every carried item to the slot matching its index.
    pub fn relayout(&self, items: &mut HashMap<Id, Item>) {
        for (index, item_id) in self.items.iter().enumerate() {
            if let Some(item) = items.get_mut(item_id) {
                item.rect = item.rect.moved_to(self.slot_position(index));
            }
        }
    }

    pub fn set_screen_height(&mut self, screen_height: f32, items: &mut HashMap<Id, Item>) {
        self.screen_height = screen_height;
        self.relayout(items);
    }

    /// Draw the backdrop band, then each thumbnail in slot order.
    pub fn draw(&self, items: &HashMap<Id, Item>, renderer: &mut dyn Renderer) {
        let (screen_width, _) = renderer.screen_size();
        renderer.fill_rect(self.backdrop(screen_width), Color::BACKDROP);
        for item in self.items.iter().filter_map(|id| items.get(id)) {
            renderer.draw_sprite(&item.image, item.rect.top_left());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemConfig;
    use crate::render::{DrawOp, HeadlessRenderer};
    use crate::sprite::Sprite;
    use image::{Rgba, RgbaImage};

    fn items(ids: &[&str]) -> HashMap<Id, Item> {
        ids.iter()
            .map(|id| {
                let sprite = Sprite::from_image(RgbaImage::from_pixel(80, 40, Rgba([9, 9, 9, 255])));
                let item = Item::new(*id, *id, sprite, Point::new(300.0, 300.0), ItemConfig::default());
                (id.to_string(), item)
            })
            .collect()
    }

    fn stow_all(inventory: &mut Inventory, items: &mut HashMap<Id, Item>, ids: &[&str]) {
        for id in ids {
            inventory.stow(items.get_mut(*id).unwrap());
        }
    }

    #[test]
    fn slots_are_packed_from_the_left() {
        let inventory = Inventory::new(576.0);
        assert_eq!(inventory.slot_position(0), Point::new(5.0, 521.0));
        assert_eq!(inventory.slot_position(1), Point::new(60.0, 521.0));
        assert_eq!(inventory.slot_position(2), Point::new(115.0, 521.0));
        assert_eq!(inventory.backdrop(720.0), Rect::new(0.0, 516.0, 720.0, 60.0));
    }

    #[test]
    fn stowed_items_become_thumbnails() {
        let mut items = items(&["a"]);
        let mut inventory = Inventory::new(576.0);
        stow_all(&mut inventory, &mut items, &["a"]);
        assert_eq!(items["a"].rect, Rect::new(5.0, 521.0, 50.0, 50.0));
        assert_eq!(items["a"].image.width(), 50);
        assert_eq!(items["a"].original_image.width(), 80);
    }

    #[test]
    fn removal_closes_the_gap() {
        let mut items = items(&["a", "b", "c"]);
        let mut inventory = Inventory::new(576.0);
        stow_all(&mut inventory, &mut items, &["a", "b", "c"]);

        inventory.remove("a", &mut items);
        assert_eq!(inventory.items(), ["b".to_string(), "c".to_string()]);
        assert_eq!(items["b"].rect.top_left(), Point::new(5.0, 521.0));
        assert_eq!(items["c"].rect.top_left(), Point::new(60.0, 521.0));
    }

    #[test]
    fn stowing_twice_keeps_one_slot() {
        let mut items = items(&["a"]);
        let mut inventory = Inventory::new(576.0);
        stow_all(&mut inventory, &mut items, &["a", "a"]);
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn resize_reanchors_slots() {
        let mut items = items(&["a", "b"]);
        let mut inventory = Inventory::new(576.0);
        stow_all(&mut inventory, &mut items, &["a", "b"]);
        inventory.set_screen_height(400.0, &mut items);
        assert_eq!(items["b"].rect.top_left(), Point::new(60.0, 345.0));
    }

    #[test]
    fn draws_backdrop_then_thumbnails() {
        let mut items = items(&["a", "b"]);
        let mut inventory = Inventory::new(576.0);
        stow_all(&mut inventory, &mut items, &["a", "b"]);
        let mut renderer = HeadlessRenderer::new(720.0, 576.0);
        inventory.draw(&items, &mut renderer);

        let ops = renderer.ops();
        assert_eq!(ops.len(), 3);
        assert!(matches!(ops[0], DrawOp::FillRect { color: Color::BACKDROP, .. }));
        assert_eq!(
            ops[2],
            DrawOp::Sprite {
                sprite: items["b"].image.id(),
                at: Point::new(60.0, 521.0),
            }
        );
    }
}
