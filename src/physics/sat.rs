//! Separating Axis Theorem kernel.
//!
//! Two convex shapes are disjoint iff some axis exists onto which their
//! projections do not overlap. These helpers compute the candidate axes and
//! the projected intervals; the colliders in `narrowphase` pick the axis of
//! minimum overlap as the contact normal.

use glam::Vec2;

/// Projection of a shape onto an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    #[inline]
    fn midpoint_twice(self) -> f32 {
        self.min + self.max
    }
}

/// Positive overlap between two intervals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    pub depth: f32,
    /// `-1.0` when the first interval lies before the second along the axis,
    /// `1.0` otherwise.
    pub sign: f32,
}

/// Outward unit normals of each polygon edge. Edges of zero length have no
/// direction and contribute no axis.
pub fn edge_normals(points: &[Vec2]) -> Vec<Vec2> {
    let n = points.len();
    (0..n)
        .filter_map(|i| {
            let edge = points[(i + 1) % n] - points[i];
            let axis = Vec2::new(edge.y, -edge.x).normalize_or_zero();
            (axis != Vec2::ZERO).then_some(axis)
        })
        .collect()
}

/// Project a point set onto an axis.
pub fn project_points(points: &[Vec2], axis: Vec2) -> Interval {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for p in points {
        let d = p.dot(axis);
        min = min.min(d);
        max = max.max(d);
    }
    Interval { min, max }
}

/// Project a circle onto a unit axis.
#[inline]
pub fn project_circle(center: Vec2, radius: f32, axis: Vec2) -> Interval {
    let c = center.dot(axis);
    Interval {
        min: c - radius,
        max: c + radius,
    }
}

/// Overlap of two intervals. Returns `None` when they are separated or only
/// touching.
#[inline]
pub fn interval_overlap(a: Interval, b: Interval) -> Option<Overlap> {
    let depth = a.max.min(b.max) - a.min.max(b.min);
    if depth <= 0.0 {
        return None;
    }
    let sign = if a.midpoint_twice() < b.midpoint_twice() {
        -1.0
    } else {
        1.0
    };
    Some(Overlap { depth, sign })
}
