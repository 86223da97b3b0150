//! Narrowphase collision detection: analytic circle tests and SAT.

use glam::Vec2;

use super::collider::centroid;
use super::contact::Manifold;
use super::sat::{edge_normals, interval_overlap, project_circle, project_points};
use super::shape::{Geometry, Shape, ShapeKind};

/// Penetration subtracted from polygon-polygon contacts to keep shallow
/// resting contacts from jittering.
pub const POLYGON_SLOP: f32 = 0.3;

/// Analytic circle-circle test. Coincident centers report no collision.
pub fn circle_circle(a: &Shape, b: &Shape) -> Option<Manifold> {
    let ra = a.effective_radius()?;
    let rb = b.effective_radius()?;

    let diff = b.position - a.position;
    let dist = diff.length();
    let radius_sum = ra + rb;

    if dist >= radius_sum || dist == 0.0 {
        return None;
    }

    let normal = diff / dist;
    Some(Manifold {
        normal,
        penetration: radius_sum - dist,
        point: a.position + normal * ra,
    })
}

/// SAT test between a circle and a rectangle or triangle.
///
/// Candidate axes are the polygon edge normals plus the axis from the
/// polygon vertex nearest the circle towards the circle center. The normal
/// points from the circle towards the polygon.
pub fn circle_polygon(circle: &Shape, polygon: &Shape) -> Option<Manifold> {
    let radius = circle.effective_radius()?;
    let points = polygon.polygon_vertices()?;
    let center = circle.position;

    let mut axes = edge_normals(&points);

    let mut closest = points[0];
    let mut min_dist_sq = f32::INFINITY;
    for p in &points {
        let d = center.distance_squared(*p);
        if d < min_dist_sq {
            min_dist_sq = d;
            closest = *p;
        }
    }
    let vertex_axis = (center - closest).normalize_or_zero();
    if vertex_axis != Vec2::ZERO {
        axes.push(vertex_axis);
    }

    let mut min_overlap = f32::INFINITY;
    let mut best_axis = None;

    for axis in axes {
        let proj_poly = project_points(&points, axis);
        let proj_circle = project_circle(center, radius, axis);
        let overlap = interval_overlap(proj_poly, proj_circle)?;
        if overlap.depth < min_overlap {
            min_overlap = overlap.depth;
            best_axis = Some(axis * overlap.sign);
        }
    }

    let normal = best_axis?;
    Some(Manifold {
        normal,
        penetration: min_overlap,
        point: center - normal * radius,
    })
}

/// SAT test between two rectangles or triangles.
///
/// The normal points from A's centroid towards B's centroid. The contact
/// point is approximated as A's centroid.
pub fn polygon_polygon(a: &Shape, b: &Shape) -> Option<Manifold> {
    let points_a = a.polygon_vertices()?;
    let points_b = b.polygon_vertices()?;

    let mut axes = edge_normals(&points_a);
    axes.extend(edge_normals(&points_b));

    let mut min_overlap = f32::INFINITY;
    let mut best_axis = None;

    for axis in axes {
        let proj_a = project_points(&points_a, axis);
        let proj_b = project_points(&points_b, axis);
        let overlap = interval_overlap(proj_a, proj_b)?;
        if overlap.depth < min_overlap {
            min_overlap = overlap.depth;
            best_axis = Some(axis);
        }
    }

    let centroid_a = centroid(&points_a);
    let centroid_b = centroid(&points_b);

    let mut normal = best_axis?;
    if normal.dot(centroid_b - centroid_a) < 0.0 {
        normal = -normal;
    }

    Some(Manifold {
        normal,
        penetration: (min_overlap - POLYGON_SLOP).max(0.0),
        point: centroid_a,
    })
}

/// Closest point to `p` on the segment `a`-`b`.
fn closest_point_on_segment(a: Vec2, b: Vec2, p: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < 1e-12 {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Circle against a thick segment, treated as a capsule. The normal points
/// from the circle towards the segment.
pub fn circle_segment(circle: &Shape, segment: &Shape) -> Option<Manifold> {
    let radius = circle.effective_radius()?;
    let (start, end) = segment.segment_endpoints()?;
    let Geometry::Segment { thickness, .. } = segment.geometry else {
        return None;
    };

    let center = circle.position;
    let closest = closest_point_on_segment(start, end, center);
    let diff = closest - center;
    let dist = diff.length();
    let reach = radius + thickness * 0.5 + segment.half_stroke();

    if dist >= reach {
        return None;
    }

    let normal = if dist > 1e-6 {
        diff / dist
    } else {
        // Center lies on the segment: push across it.
        let edge = end - start;
        let axis = Vec2::new(edge.y, -edge.x).normalize_or_zero();
        if axis == Vec2::ZERO {
            return None;
        }
        axis
    };

    Some(Manifold {
        normal,
        penetration: reach - dist,
        point: closest,
    })
}

/// Detect collision between two shapes, dispatching on the shape kinds.
///
/// Segments only collide with circles. Segment-segment and segment-polygon
/// pairs report no collision.
pub fn detect_collision(a: &Shape, b: &Shape) -> Option<Manifold> {
    use ShapeKind::*;

    match (a.kind(), b.kind()) {
        (Circle, Circle) => circle_circle(a, b),
        (Circle, Rect | Triangle) => circle_polygon(a, b),
        (Rect | Triangle, Circle) => circle_polygon(b, a).map(Manifold::flipped),
        (Rect | Triangle, Rect | Triangle) => polygon_polygon(a, b),
        (Circle, Segment) => circle_segment(a, b),
        (Segment, Circle) => circle_segment(b, a).map(Manifold::flipped),
        (Segment, Rect | Triangle | Segment) | (Rect | Triangle, Segment) => None,
    }
}
