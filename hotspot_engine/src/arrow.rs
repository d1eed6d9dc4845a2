//! Edge-of-screen arrows that lead to neighbouring rooms.

use log::trace;

use crate::Id;
use crate::geometry::{Point, polygon_contains};
use crate::hover::Hoverable;
use crate::render::{Color, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowSide {
    Left,
    Right,
}

/// A clickable triangle pointing off screen.
///
/// The hit area is the outer triangle from the most recent draw, so an arrow
/// that has never been drawn can't be hovered or clicked.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub side: ArrowSide,
    pub destination: Id,
    pub label: String,
    hit_area: Option<[Point; 3]>,
}

impl Arrow {
    pub fn new(side: ArrowSide, destination: impl Into<Id>, label: impl Into<String>) -> Arrow {
        Arrow {
            side,
            destination: destination.into(),
            label: label.into(),
            hit_area: None,
        }
    }

    /// Outer (white) and inner (black) triangles for a screen of the given size.
    pub fn triangles(side: ArrowSide, (width, height): (f32, f32)) -> ([Point; 3], [Point; 3]) {
        let mid = height / 2.0;
        // x offsets measured from the arrow's own screen edge
        let x = |offset: f32| match side {
            ArrowSide::Left => offset,
            ArrowSide::Right => width - offset,
        };
        let outer = [
            Point::new(x(8.0), mid),
            Point::new(x(32.0), mid - 24.0),
            Point::new(x(32.0), mid + 24.0),
        ];
        let inner = [
            Point::new(x(10.0), mid),
            Point::new(x(30.0), mid - 20.0),
            Point::new(x(30.0), mid + 20.0),
        ];
        (outer, inner)
    }

    /// Draw the arrow and remember its outline for hit testing.
    pub fn draw(&mut self, renderer: &mut dyn Renderer) {
        let (outer, inner) = Self::triangles(self.side, renderer.screen_size());
        renderer.draw_polygon(&outer, Color::WHITE);
        renderer.draw_polygon(&inner, Color::BLACK);
        trace!("{:?} arrow to '{}' drawn", self.side, self.destination);
        self.hit_area = Some(outer);
    }

    pub fn hit_area(&self) -> Option<&[Point; 3]> {
        self.hit_area.as_ref()
    }
}

impl Hoverable for Arrow {
    fn name(&self) -> &str {
        &self.label
    }

    fn is_under_pointer(&self, pointer: Point) -> bool {
        self.hit_area.is_some_and(|outline| polygon_contains(&outline, pointer))
    }
}
