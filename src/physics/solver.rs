//! Contact resolution: positional correction followed by a single normal impulse.

use glam::Vec2;

use super::body::RigidBody;
use super::contact::Manifold;
use super::shape::ShapeKind;

/// Penetration allowed before positional correction kicks in.
pub const PENETRATION_SLOP: f32 = 0.5;
/// Fraction of the remaining penetration corrected per step.
pub const CORRECTION_PERCENT: f32 = 0.8;
/// Upper bound on the correction magnitude per step.
pub const MAX_CORRECTION: f32 = 10.0;
/// Extra distance a circle is pushed out of a segment.
pub const SEGMENT_PUSH_EPSILON: f32 = 0.1;
/// Relative speed below which restitution is damped.
pub const LOW_SPEED_THRESHOLD: f32 = 30.0;
/// Restitution multiplier applied under [`LOW_SPEED_THRESHOLD`].
pub const LOW_SPEED_RESTITUTION_SCALE: f32 = 0.2;

/// Resolve one contact between `a` and `b`.
///
/// The manifold normal points from `a` to `b`. Bodies with physics disabled
/// are never moved.
pub fn resolve_collision(a: &mut RigidBody, b: &mut RigidBody, manifold: &Manifold) {
    if !a.has_physics() && !b.has_physics() {
        return;
    }

    let segment_pair = a.kind() == ShapeKind::Segment || b.kind() == ShapeKind::Segment;

    let mut normal = manifold.normal;
    if !segment_pair && normal.dot(b.position() - a.position()) < 0.0 {
        normal = -normal;
    }

    let total_inv_mass = a.inv_mass() + b.inv_mass();
    if total_inv_mass == 0.0 {
        return;
    }

    if segment_pair {
        push_circle_out_of_segment(a, b, normal, manifold.penetration);
    } else {
        let penetration = (manifold.penetration - PENETRATION_SLOP).max(0.0);
        let magnitude =
            (penetration * CORRECTION_PERCENT / total_inv_mass).min(MAX_CORRECTION);
        let correction = normal * magnitude;

        if a.has_physics() {
            a.shape.position -= correction * a.inv_mass();
        }
        if b.has_physics() {
            b.shape.position += correction * b.inv_mass();
        }
    }

    apply_normal_impulse(a, b, normal);
}

/// Moves the circle side of a circle-segment pair straight out of the
/// segment, ignoring mass ratios.
fn push_circle_out_of_segment(a: &mut RigidBody, b: &mut RigidBody, normal: Vec2, depth: f32) {
    let push = depth + SEGMENT_PUSH_EPSILON;
    if a.kind() == ShapeKind::Circle {
        if a.has_physics() {
            a.shape.position -= normal * push;
        }
    } else if b.kind() == ShapeKind::Circle && b.has_physics() {
        b.shape.position += normal * push;
    }
}

fn apply_normal_impulse(a: &mut RigidBody, b: &mut RigidBody, normal: Vec2) {
    let relative_velocity = b.velocity - a.velocity;
    let vel_along_normal = relative_velocity.dot(normal);
    if vel_along_normal > 0.0 {
        return;
    }

    let base = a.restitution.min(b.restitution);
    let e = if relative_velocity.length() < LOW_SPEED_THRESHOLD {
        base * LOW_SPEED_RESTITUTION_SCALE
    } else {
        base
    };

    let j = -(1.0 + e) * vel_along_normal / (a.inv_mass() + b.inv_mass());
    let impulse = normal * j;

    if a.has_physics() {
        a.velocity -= impulse * a.inv_mass();
    }
    if b.has_physics() {
        b.velocity += impulse * b.inv_mass();
    }
}
