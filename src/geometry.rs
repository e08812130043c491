use crate::drawing::{Shape, ShapeKind};
use crate::vertex::Vertex;

/// Share of the smaller extent given to an arrow's head.
const ARROW_HEAD_RATIO: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Triangles,
    Lines,
}

/// Vertex data for one shape, in canvas pixels.
///
/// `indices` is empty for line geometry, which is drawn as consecutive
/// vertex pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
    pub mode: DrawMode,
}

impl Geometry {
    pub fn for_shape(shape: &Shape) -> Self {
        build_geometry(shape.kind, shape.x, shape.y, shape.width, shape.height)
    }
}

pub fn build_geometry(kind: ShapeKind, x: f32, y: f32, width: f32, height: f32) -> Geometry {
    match kind {
        ShapeKind::Box => Geometry {
            vertices: vec![
                Vertex::new(x, y),
                Vertex::new(x + width, y),
                Vertex::new(x + width, y + height),
                Vertex::new(x, y + height),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
            mode: DrawMode::Triangles,
        },
        ShapeKind::Arrow => {
            // Zero-sized arrows collapse the head to a zero-area triangle.
            let head = width.min(height) * ARROW_HEAD_RATIO;
            let neck = x + width - head;

            Geometry {
                vertices: vec![
                    // shaft
                    Vertex::new(x, y),
                    Vertex::new(neck, y),
                    Vertex::new(neck, y + height),
                    Vertex::new(x, y + height),
                    // head
                    Vertex::new(x + width, y + height / 2.0),
                    Vertex::new(neck, y),
                    Vertex::new(neck, y + height),
                ],
                indices: vec![0, 1, 2, 0, 2, 3, 4, 5, 6],
                mode: DrawMode::Triangles,
            }
        }
        ShapeKind::Vector => Geometry {
            vertices: vec![Vertex::new(x, y), Vertex::new(x + width, y + height)],
            indices: Vec::new(),
            mode: DrawMode::Lines,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(geometry: &Geometry) -> Vec<[f32; 2]> {
        geometry.vertices.iter().map(|v| v.position).collect()
    }

    #[test]
    fn test_box_corners_and_winding() {
        let geometry = build_geometry(ShapeKind::Box, 10.0, 20.0, 100.0, 50.0);

        assert_eq!(geometry.mode, DrawMode::Triangles);
        assert_eq!(geometry.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(
            positions(&geometry),
            vec![[10.0, 20.0], [110.0, 20.0], [110.0, 70.0], [10.0, 70.0]]
        );
    }

    #[test]
    fn test_arrow_shaft_and_head() {
        let geometry = build_geometry(ShapeKind::Arrow, 0.0, 0.0, 100.0, 50.0);

        assert_eq!(geometry.mode, DrawMode::Triangles);
        assert_eq!(geometry.vertices.len(), 7);
        assert_eq!(geometry.indices, vec![0, 1, 2, 0, 2, 3, 4, 5, 6]);

        // head = min(100, 50) * 0.4 = 20
        let p = positions(&geometry);
        assert_eq!(p[1], [80.0, 0.0]);
        assert_eq!(p[2], [80.0, 50.0]);
        assert_eq!(p[4], [100.0, 25.0]);
        assert_eq!(p[5], [80.0, 0.0]);
        assert_eq!(p[6], [80.0, 50.0]);
    }

    #[test]
    fn test_zero_sized_arrow_has_degenerate_head() {
        let geometry = build_geometry(ShapeKind::Arrow, 30.0, 40.0, 0.0, 25.0);
        let p = positions(&geometry);

        assert_eq!(p.len(), 7);
        assert!(p.iter().all(|v| v[0] == 30.0));
        assert!(p.iter().flatten().all(|c| c.is_finite()));
    }

    #[test]
    fn test_vector_is_single_line() {
        let geometry = build_geometry(ShapeKind::Vector, 50.0, 50.0, -30.0, 40.0);

        assert_eq!(geometry.mode, DrawMode::Lines);
        assert!(geometry.indices.is_empty());
        assert_eq!(positions(&geometry), vec![[50.0, 50.0], [20.0, 90.0]]);
    }

    #[test]
    fn test_geometry_stays_in_pixel_space() {
        let geometry = build_geometry(ShapeKind::Box, 900.0, 1100.0, 200.0, 50.0);
        assert_eq!(geometry.vertices[2].position, [1100.0, 1150.0]);
    }
}
