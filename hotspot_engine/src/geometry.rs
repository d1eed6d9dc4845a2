//! Screen-space primitives used for layout and hit testing.

/// A position in screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// A rectangle defined by position and size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Check if point is inside (right and bottom edges excluded)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Same size, moved so its top-left corner sits at `point`.
    pub fn moved_to(&self, point: Point) -> Self {
        Self::new(point.x, point.y, self.w, self.h)
    }
}

/// Even-odd point-in-polygon test.
///
/// Degenerate polygons (fewer than three vertices) contain nothing.
pub fn polygon_contains(vertices: &[Point], point: Point) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for (i, a) in vertices.iter().enumerate() {
        let b = vertices[j];
        if (a.y > point.y) != (b.y > point.y) {
            let cross_x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::new(10.0, 20.0, 5.0, 5.0);
        assert!(rect.contains(Point::new(10.0, 20.0)));
        assert!(rect.contains(Point::new(14.9, 24.9)));
        assert!(!rect.contains(Point::new(15.0, 22.0)));
        assert!(!rect.contains(Point::new(12.0, 25.0)));
        assert!(!rect.contains(Point::new(9.9, 22.0)));
    }

    #[test]
    fn triangle_contains_interior_but_not_bounding_box_corners() {
        let triangle = [Point::new(8.0, 100.0), Point::new(32.0, 76.0), Point::new(32.0, 124.0)];
        assert!(polygon_contains(&triangle, Point::new(25.0, 100.0)));
        assert!(polygon_contains(&triangle, Point::new(30.0, 80.0)));
        // inside the bounding box, outside the triangle
        assert!(!polygon_contains(&triangle, Point::new(10.0, 78.0)));
        assert!(!polygon_contains(&triangle, Point::new(10.0, 122.0)));
        assert!(!polygon_contains(&triangle, Point::new(40.0, 100.0)));
    }

    #[test]
    fn degenerate_polygon_contains_nothing() {
        let line = [Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
        assert!(!polygon_contains(&line, Point::new(5.0, 5.0)));
        assert!(!polygon_contains(&[], Point::default()));
    }

    #[test]
    fn moved_to_keeps_size() {
        let rect = Rect::new(1.0, 2.0, 30.0, 40.0).moved_to(Point::new(5.0, 6.0));
        assert_eq!(rect, Rect::new(5.0, 6.0, 30.0, 40.0));
        assert_eq!(rect.bottom(), 46.0);
        assert_eq!(rect.right(), 35.0);
    }
}
