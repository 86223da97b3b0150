//! Collision shapes.

use glam::Vec2;

/// Geometry of a shape, in the shape's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Circle {
        radius: f32,
    },
    Rect {
        width: f32,
        height: f32,
    },
    /// Isosceles triangle with its apex pointing towards local -Y.
    Triangle {
        width: f32,
        height: f32,
    },
    /// Thick line segment. Endpoints are offsets from the shape position.
    Segment {
        start: Vec2,
        end: Vec2,
        thickness: f32,
    },
}

/// Discriminant of [`Geometry`], used by collision filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Rect,
    Triangle,
    Segment,
}

impl ShapeKind {
    #[inline]
    const fn bit(self) -> u8 {
        match self {
            ShapeKind::Circle => 1 << 0,
            ShapeKind::Rect => 1 << 1,
            ShapeKind::Triangle => 1 << 2,
            ShapeKind::Segment => 1 << 3,
        }
    }

    /// Rectangles and triangles share the polygon code paths.
    #[inline]
    pub fn is_polygon(self) -> bool {
        matches!(self, ShapeKind::Rect | ShapeKind::Triangle)
    }
}

/// Set of shape kinds a body is willing to collide with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeKindSet(u8);

impl ShapeKindSet {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(0b1111);

    pub const fn from_kinds(kinds: &[ShapeKind]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < kinds.len() {
            bits |= kinds[i].bit();
            i += 1;
        }
        Self(bits)
    }

    #[inline]
    pub fn contains(self, kind: ShapeKind) -> bool {
        self.0 & kind.bit() != 0
    }

    #[must_use]
    pub fn with(self, kind: ShapeKind) -> Self {
        Self(self.0 | kind.bit())
    }

    #[must_use]
    pub fn without(self, kind: ShapeKind) -> Self {
        Self(self.0 & !kind.bit())
    }
}

impl Default for ShapeKindSet {
    fn default() -> Self {
        Self::ALL
    }
}

impl FromIterator<ShapeKind> for ShapeKindSet {
    fn from_iter<I: IntoIterator<Item = ShapeKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

/// A collision shape: geometry placed in the world.
///
/// The kind of a shape never changes after creation; `position` and
/// `rotation` are updated by integration and contact resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub geometry: Geometry,
    /// Center of the shape in world space.
    pub position: Vec2,
    /// Rotation in radians. Only meaningful for rectangles and triangles.
    pub rotation: f32,
    /// Outline width. Inflates collision bounds by half its value.
    pub stroke_width: f32,
}

impl Shape {
    pub fn circle(position: Vec2, radius: f32) -> Self {
        Self::new(Geometry::Circle { radius }, position)
    }

    pub fn rect(position: Vec2, width: f32, height: f32) -> Self {
        Self::new(Geometry::Rect { width, height }, position)
    }

    pub fn triangle(position: Vec2, width: f32, height: f32) -> Self {
        Self::new(Geometry::Triangle { width, height }, position)
    }

    /// Create a segment from world-space endpoints. The shape position is
    /// placed at the midpoint.
    pub fn segment(start: Vec2, end: Vec2, thickness: f32) -> Self {
        let mid = (start + end) * 0.5;
        Self::new(
            Geometry::Segment {
                start: start - mid,
                end: end - mid,
                thickness,
            },
            mid,
        )
    }

    fn new(geometry: Geometry, position: Vec2) -> Self {
        Self {
            geometry,
            position,
            rotation: 0.0,
            stroke_width: 0.0,
        }
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub fn with_stroke_width(mut self, stroke_width: f32) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        match self.geometry {
            Geometry::Circle { .. } => ShapeKind::Circle,
            Geometry::Rect { .. } => ShapeKind::Rect,
            Geometry::Triangle { .. } => ShapeKind::Triangle,
            Geometry::Segment { .. } => ShapeKind::Segment,
        }
    }

    #[inline]
    pub fn half_stroke(&self) -> f32 {
        self.stroke_width * 0.5
    }

    /// Circle radius including half the stroke width. `None` for other kinds.
    #[inline]
    pub fn effective_radius(&self) -> Option<f32> {
        match self.geometry {
            Geometry::Circle { radius } => Some(radius + self.half_stroke()),
            _ => None,
        }
    }

    /// World-space endpoints of a segment. `None` for other kinds.
    #[inline]
    pub fn segment_endpoints(&self) -> Option<(Vec2, Vec2)> {
        match self.geometry {
            Geometry::Segment { start, end, .. } => {
                Some((self.position + start, self.position + end))
            }
            _ => None,
        }
    }
}
