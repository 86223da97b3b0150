//! Rigid body integration functions.

use super::body::{BodySet, RigidBody};

/// Linear speed limit in units per second.
pub const MAX_SPEED: f32 = 1200.0;
/// Angular speed limit in radians per second.
pub const MAX_ANGULAR_SPEED: f32 = 10.0;
/// Per-step angular velocity multiplier. Not scaled by the timestep.
pub const ANGULAR_DAMPING: f32 = 0.96;

/// Advance one body by `dt` seconds using semi-implicit Euler.
///
/// Bodies with physics disabled are left untouched. The accumulated force is
/// consumed and reset to zero.
pub fn integrate(body: &mut RigidBody, dt: f32) {
    if !body.has_physics() {
        return;
    }

    body.prev_position = body.shape.position;

    // v += (F/m) * dt
    body.velocity += body.force * body.inv_mass() * dt;

    let damping = body.friction.clamp(0.0, 1.0);
    body.velocity *= 1.0 - damping * dt;

    body.shape.position += body.velocity * dt;

    if body.can_rotate && body.angular_velocity != 0.0 {
        body.shape.rotation += body.angular_velocity * dt;
        body.angular_velocity = (body.angular_velocity * ANGULAR_DAMPING)
            .clamp(-MAX_ANGULAR_SPEED, MAX_ANGULAR_SPEED);
    }

    let speed = body.velocity.length();
    if speed > MAX_SPEED {
        body.velocity *= MAX_SPEED / speed;
    }

    body.force = glam::Vec2::ZERO;
}

/// Integrate every body in the set.
pub fn integrate_bodies(bodies: &mut BodySet, dt: f32) {
    for (_, body) in bodies.iter_mut() {
        integrate(body, dt);
    }
}
