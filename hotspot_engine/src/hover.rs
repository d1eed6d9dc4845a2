//! Name labels shown under the pointer.

use crate::geometry::{Point, Rect};
use crate::render::{Color, Renderer};

/// Padding around the text of a hover label.
pub const LABEL_PADDING: f32 = 3.0;

/// Anything that shows its name when the pointer rests on it (items and arrows).
pub trait Hoverable {
    fn name(&self) -> &str;

    fn is_under_pointer(&self, pointer: Point) -> bool;

    /// Draw the name label next to the pointer and present it immediately.
    ///
    /// The label sits one font size above the pointer in the lower half of the
    /// screen and one font size below it in the upper half.
    fn draw_hover_label(&self, renderer: &mut dyn Renderer) {
        let pointer = renderer.pointer_position();
        let (_, screen_height) = renderer.screen_size();
        let font_size = renderer.font_size();
        let y = if pointer.y > screen_height / 2.0 {
            pointer.y - font_size
        } else {
            pointer.y + font_size
        };

        let text = renderer.measure_text(self.name());
        renderer.fill_rect(
            Rect::new(
                pointer.x - LABEL_PADDING,
                y - LABEL_PADDING,
                text.width + 2.0 * LABEL_PADDING,
                text.height + 2.0 * LABEL_PADDING,
            ),
            Color::BACKDROP,
        );
        renderer.draw_text(self.name(), Point::new(pointer.x, y), Color::BLACK);
        renderer.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawOp, HeadlessRenderer};

    struct Marker;

    impl Hoverable for Marker {
        fn name(&self) -> &str {
            "Bird"
        }

        fn is_under_pointer(&self, _pointer: Point) -> bool {
            true
        }
    }

    #[test]
    fn label_goes_below_pointer_in_upper_half() {
        let mut renderer = HeadlessRenderer::new(720.0, 576.0);
        renderer.set_pointer(Point::new(100.0, 50.0));
        Marker.draw_hover_label(&mut renderer);

        assert_eq!(
            renderer.ops().last(),
            Some(&DrawOp::Text {
                text: "Bird".into(),
                at: Point::new(100.0, 74.0),
            })
        );
        assert_eq!(renderer.presents(), 1);
    }

    #[test]
    fn label_goes_above_pointer_in_lower_half() {
        let mut renderer = HeadlessRenderer::new(720.0, 576.0);
        renderer.set_pointer(Point::new(100.0, 400.0));
        Marker.draw_hover_label(&mut renderer);

        match renderer.ops() {
            [DrawOp::FillRect { rect, color }, DrawOp::Text { at, .. }] => {
                assert_eq!(*at, Point::new(100.0, 376.0));
                assert_eq!(*rect, Rect::new(97.0, 373.0, 54.0, 30.0));
                assert_eq!(*color, Color::BACKDROP);
            },
            other => panic!("unexpected ops: {other:?}"),
        }
    }
}
