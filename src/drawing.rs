use std::fmt;
use std::str::FromStr;

pub type ShapeId = u64;

/// Shapes narrower or shorter than this (in pixels) are discarded on release.
pub const MIN_SHAPE_EXTENT: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Select,
    Box,
    Arrow,
    Vector,
}

impl Tool {
    /// The kind of shape this tool creates, `None` for the selection tool.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Tool::Select => None,
            Tool::Box => Some(ShapeKind::Box),
            Tool::Arrow => Some(ShapeKind::Arrow),
            Tool::Vector => Some(ShapeKind::Vector),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::Box => "box",
            Tool::Arrow => "arrow",
            Tool::Vector => "vector",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool: {0:?}")]
pub struct ParseToolError(pub String);

impl FromStr for Tool {
    type Err = ParseToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "select" => Ok(Tool::Select),
            "box" => Ok(Tool::Box),
            "arrow" => Ok(Tool::Arrow),
            "vector" => Ok(Tool::Vector),
            _ => Err(ParseToolError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Box,
    Arrow,
    Vector,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Box => "box",
            ShapeKind::Arrow => "arrow",
            ShapeKind::Vector => "vector",
        }
    }
}

/// A shape on the canvas, in pixel space with the origin at the top-left.
///
/// Boxes and arrows are anchored at their top-left corner and always carry
/// non-negative extents. Vectors are anchored at their start point and carry
/// the signed displacement to their end point in `width`/`height`.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: String,
}

impl Shape {
    pub fn new(id: ShapeId, kind: ShapeKind, origin: [f32; 2], color: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            x: origin[0],
            y: origin[1],
            width: 0.0,
            height: 0.0,
            color: color.into(),
        }
    }

    /// Re-derives position and extents from a drag running from `start` to `pointer`.
    pub fn drag_to(&mut self, start: [f32; 2], pointer: [f32; 2]) {
        let dx = pointer[0] - start[0];
        let dy = pointer[1] - start[1];

        match self.kind {
            ShapeKind::Box | ShapeKind::Arrow => {
                self.x = start[0].min(pointer[0]);
                self.y = start[1].min(pointer[1]);
                self.width = dx.abs();
                self.height = dy.abs();
            }
            ShapeKind::Vector => {
                self.x = start[0];
                self.y = start[1];
                self.width = dx;
                self.height = dy;
            }
        }
    }

    /// Absolute extents, regardless of drag direction.
    pub fn extent(&self) -> [f32; 2] {
        [self.width.abs(), self.height.abs()]
    }

    pub fn meets_min_extent(&self) -> bool {
        let [w, h] = self.extent();
        w > MIN_SHAPE_EXTENT && h > MIN_SHAPE_EXTENT
    }

    /// Axis-aligned bounding box as `(min, max)` corners.
    pub fn bounds(&self) -> ([f32; 2], [f32; 2]) {
        let end = self.end_point();
        (
            [self.x.min(end[0]), self.y.min(end[1])],
            [self.x.max(end[0]), self.y.max(end[1])],
        )
    }

    /// Opposite corner for boxes and arrows, the end point for vectors.
    pub fn end_point(&self) -> [f32; 2] {
        [self.x + self.width, self.y + self.height]
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        let (min, max) = self.bounds();
        x >= min[0] && x <= max[0] && y >= min[1] && y <= max[1]
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [w, h] = self.extent();
        write!(
            f,
            "{} at ({}, {}) {} x {} px",
            self.kind.name(),
            self.x.round(),
            self.y.round(),
            w.round(),
            h.round()
        )
    }
}
