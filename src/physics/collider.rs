//! Shape bounds and polygon vertices for collision detection.

use glam::Vec2;

use super::shape::{Geometry, Shape};

/// Axis-aligned bounding box for broadphase collision detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsAabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl PhysicsAabb {
    /// Test whether two AABBs overlap. Touching boxes count as overlapping.
    #[inline]
    pub fn overlaps(&self, other: &PhysicsAabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    #[inline]
    fn inflate(self, amount: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(amount),
            max: self.max + Vec2::splat(amount),
        }
    }

    fn from_points(points: &[Vec2], fallback: Vec2) -> Self {
        let Some((first, rest)) = points.split_first() else {
            return Self {
                min: fallback,
                max: fallback,
            };
        };
        rest.iter().fold(
            Self {
                min: *first,
                max: *first,
            },
            |aabb, p| Self {
                min: aabb.min.min(*p),
                max: aabb.max.max(*p),
            },
        )
    }
}

impl Shape {
    /// Compute the world-space AABB, inflated by half the stroke width.
    pub fn compute_aabb(&self) -> PhysicsAabb {
        let half_stroke = self.half_stroke();
        match self.geometry {
            Geometry::Circle { radius } => {
                let r = radius + half_stroke;
                PhysicsAabb {
                    min: self.position - Vec2::splat(r),
                    max: self.position + Vec2::splat(r),
                }
            }
            Geometry::Rect { .. } | Geometry::Triangle { .. } => {
                let points = self.transformed_vertices(0.0);
                PhysicsAabb::from_points(&points, self.position).inflate(half_stroke)
            }
            Geometry::Segment {
                start,
                end,
                thickness,
            } => {
                let endpoints = [self.position + start, self.position + end];
                PhysicsAabb::from_points(&endpoints, self.position)
                    .inflate(thickness * 0.5 + half_stroke)
            }
        }
    }

    /// World-space polygon vertices used by SAT, inflated by half the stroke
    /// width. Returns `None` for circles and segments.
    pub fn polygon_vertices(&self) -> Option<Vec<Vec2>> {
        if self.kind().is_polygon() {
            Some(self.transformed_vertices(self.half_stroke()))
        } else {
            None
        }
    }

    fn transformed_vertices(&self, inflate: f32) -> Vec<Vec2> {
        let rot = Vec2::from_angle(self.rotation);
        let local = match self.geometry {
            Geometry::Rect { width, height } => {
                let hw = width * 0.5 + inflate;
                let hh = height * 0.5 + inflate;
                vec![
                    Vec2::new(-hw, -hh),
                    Vec2::new(hw, -hh),
                    Vec2::new(hw, hh),
                    Vec2::new(-hw, hh),
                ]
            }
            Geometry::Triangle { width, height } => {
                let hw = width * 0.5 + inflate;
                let hh = height * 0.5 + inflate;
                vec![Vec2::new(0.0, -hh), Vec2::new(-hw, hh), Vec2::new(hw, hh)]
            }
            Geometry::Circle { .. } | Geometry::Segment { .. } => Vec::new(),
        };
        local
            .into_iter()
            .map(|p| self.position + rot.rotate(p))
            .collect()
    }
}

/// Average of a polygon's vertices.
pub fn centroid(points: &[Vec2]) -> Vec2 {
    if points.is_empty() {
        return Vec2::ZERO;
    }
    points.iter().fold(Vec2::ZERO, |acc, p| acc + *p) / points.len() as f32
}
