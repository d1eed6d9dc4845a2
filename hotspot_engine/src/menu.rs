//! Context menu listing the actions available for one item.

use crate::Id;
use crate::geometry::{Point, Rect};
use crate::item::MenuAction;
use crate::render::{Color, Renderer};

/// Padding around the menu's text block.
pub const PADDING: f32 = 3.0;

/// An open context menu. Its geometry is fixed when it opens.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemMenu {
    pub item: Id,
    pub entries: Vec<MenuAction>,
    /// Top-left corner of the first entry's text.
    pub origin: Point,
    pub width: f32,
    pub line_height: f32,
}

impl ItemMenu {
    /// Lay out a menu at the pointer, shifted up if it would run off the bottom
    /// of the screen.
    pub fn open(item: impl Into<Id>, entries: Vec<MenuAction>, renderer: &dyn Renderer) -> ItemMenu {
        let (width, line_height) = entries
            .iter()
            .map(|action| renderer.measure_text(action.label()))
            .fold((0.0_f32, 0.0_f32), |(w, h), size| (w.max(size.width), h.max(size.height)));

        let mut menu = ItemMenu {
            item: item.into(),
            entries,
            origin: renderer.pointer_position(),
            width,
            line_height,
        };
        let (_, screen_height) = renderer.screen_size();
        let overflow = menu.origin.y + menu.height() - screen_height;
        if overflow > 0.0 {
            menu.origin.y -= overflow;
        }
        menu
    }

    /// Height of the text block plus padding on both sides.
    #[allow(clippy::cast_precision_loss)]
    pub fn height(&self) -> f32 {
        self.entries.len() as f32 * self.line_height + 2.0 * PADDING
    }

    pub fn backdrop(&self) -> Rect {
        Rect::new(
            self.origin.x - PADDING,
            self.origin.y - PADDING,
            self.width + 2.0 * PADDING,
            self.height(),
        )
    }

    /// Draw the backdrop and one label per line, then present.
    #[allow(clippy::cast_precision_loss)]
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.fill_rect(self.backdrop(), Color::BACKDROP);
        for (row, action) in self.entries.iter().enumerate() {
            let at = Point::new(self.origin.x, self.origin.y + row as f32 * self.line_height);
            renderer.draw_text(action.label(), at, Color::BLACK);
        }
        renderer.present();
    }

    /// The entry on the line under `pointer`, if any.
    ///
    /// Rows are measured from the top of the first label; anything left or
    /// right of the text block, above the first row or below the last hits
    /// nothing.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn entry_at(&self, pointer: Point) -> Option<MenuAction> {
        if pointer.x < self.origin.x || pointer.x > self.origin.x + self.width || self.line_height <= 0.0 {
            return None;
        }
        let row = ((pointer.y - self.origin.y) / self.line_height).floor();
        if row < 0.0 {
            return None;
        }
        self.entries.get(row as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawOp, HeadlessRenderer};

    fn door_menu(pointer: Point) -> ItemMenu {
        let mut renderer = HeadlessRenderer::new(720.0, 576.0);
        renderer.set_pointer(pointer);
        ItemMenu::open("door", vec![MenuAction::View, MenuAction::Manipulate], &renderer)
    }

    #[test]
    fn geometry_follows_the_widest_label() {
        let menu = door_menu(Point::new(100.0, 100.0));
        // "Manipulate" is 10 chars at 12px
        assert_eq!(menu.width, 120.0);
        assert_eq!(menu.line_height, 24.0);
        assert_eq!(menu.height(), 54.0);
        assert_eq!(menu.backdrop(), Rect::new(97.0, 97.0, 126.0, 54.0));
    }

    #[test]
    fn menu_near_the_bottom_is_shifted_up() {
        let menu = door_menu(Point::new(100.0, 560.0));
        assert_eq!(menu.origin, Point::new(100.0, 522.0));
        assert_eq!(menu.origin.y + menu.height(), 576.0);
    }

    #[test]
    fn entry_hit_testing() {
        let menu = door_menu(Point::new(100.0, 100.0));
        assert_eq!(menu.entry_at(Point::new(110.0, 105.0)), Some(MenuAction::View));
        assert_eq!(menu.entry_at(Point::new(219.0, 130.0)), Some(MenuAction::Manipulate));
        assert_eq!(menu.entry_at(Point::new(99.0, 105.0)), None);
        assert_eq!(menu.entry_at(Point::new(221.0, 105.0)), None);
        // padding strip above the first row
        assert_eq!(menu.entry_at(Point::new(110.0, 98.0)), None);
        // padding strip below the last row
        assert_eq!(menu.entry_at(Point::new(110.0, 149.0)), None);
    }

    #[test]
    fn draw_lays_out_one_label_per_line() {
        let menu = door_menu(Point::new(100.0, 100.0));
        let mut renderer = HeadlessRenderer::new(720.0, 576.0);
        menu.draw(&mut renderer);

        assert_eq!(renderer.texts(), vec!["View", "Manipulate"]);
        assert_eq!(
            renderer.ops()[2],
            DrawOp::Text {
                text: "Manipulate".into(),
                at: Point::new(100.0, 124.0),
            }
        );
        assert_eq!(renderer.presents(), 1);
    }
}
