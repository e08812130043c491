use crate::drawing::Shape;

/// Returns the topmost shape whose bounding box contains the point.
///
/// Later shapes are drawn on top, so the collection is scanned back to front.
/// Bounds are inclusive on every edge. Vectors are tested against the box
/// spanned by their endpoints, not against the line itself.
pub fn find_shape_at(shapes: &[Shape], x: f32, y: f32) -> Option<&Shape> {
    shapes.iter().rev().find(|shape| shape.contains(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::ShapeKind;

    fn shape(id: u64, kind: ShapeKind, from: [f32; 2], to: [f32; 2]) -> Shape {
        let mut shape = Shape::new(id, kind, from, "#ff0000");
        shape.drag_to(from, to);
        shape
    }

    #[test]
    fn test_topmost_shape_wins() {
        let shapes = vec![
            shape(1, ShapeKind::Box, [0.0, 0.0], [100.0, 100.0]),
            shape(2, ShapeKind::Box, [50.0, 50.0], [150.0, 150.0]),
        ];

        assert_eq!(find_shape_at(&shapes, 75.0, 75.0).map(|s| s.id), Some(2));
        assert_eq!(find_shape_at(&shapes, 25.0, 25.0).map(|s| s.id), Some(1));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let shapes = vec![shape(1, ShapeKind::Arrow, [10.0, 10.0], [60.0, 40.0])];

        assert!(find_shape_at(&shapes, 10.0, 10.0).is_some());
        assert!(find_shape_at(&shapes, 60.0, 40.0).is_some());
        assert!(find_shape_at(&shapes, 60.1, 40.0).is_none());
    }

    #[test]
    fn test_miss_returns_none() {
        let shapes = vec![shape(1, ShapeKind::Box, [0.0, 0.0], [10.0, 10.0])];
        assert!(find_shape_at(&shapes, 200.0, 200.0).is_none());
        assert!(find_shape_at(&[], 0.0, 0.0).is_none());
    }

    #[test]
    fn test_vector_uses_bounding_box() {
        let shapes = vec![shape(1, ShapeKind::Vector, [50.0, 50.0], [20.0, 90.0])];

        // Far from the line itself but inside the endpoints' bounding box.
        assert!(find_shape_at(&shapes, 21.0, 51.0).is_some());
        assert!(find_shape_at(&shapes, 55.0, 60.0).is_none());
    }
}
