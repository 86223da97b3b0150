//! Contact data structures for collision response.

use glam::Vec2;

use super::body::{BodyHandle, RigidBody};

/// Result of a narrowphase test for one overlapping pair in one step.
///
/// Manifolds are never persisted across steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Manifold {
    /// Unit contact normal (from body A to body B).
    pub normal: Vec2,
    /// Penetration depth. Never negative.
    pub penetration: f32,
    /// Contact point in world space.
    pub point: Vec2,
}

impl Manifold {
    /// The same contact seen from the other body.
    #[must_use]
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }
}

/// An overlap involving at least one sensor, reported to the sensor callback.
///
/// The bodies are snapshots taken before any resolution of this pair.
#[derive(Debug, Clone, Copy)]
pub struct SensorContact<'a> {
    pub handle_a: BodyHandle,
    pub body_a: &'a RigidBody,
    pub handle_b: BodyHandle,
    pub body_b: &'a RigidBody,
    pub manifold: Manifold,
}

impl SensorContact<'_> {
    /// Handle of the sensor side. Body A when both are sensors.
    pub fn sensor(&self) -> BodyHandle {
        if self.body_a.is_sensor {
            self.handle_a
        } else {
            self.handle_b
        }
    }

    /// Handle of the body opposite [`Self::sensor`].
    pub fn other(&self) -> BodyHandle {
        if self.body_a.is_sensor {
            self.handle_b
        } else {
            self.handle_a
        }
    }
}

/// Body set mutations requested from inside a sensor callback.
///
/// Commands are queued while the collision step iterates candidate pairs and
/// applied once the step has finished.
pub struct ContactCommands {
    buffer: hecs::CommandBuffer,
    pending: usize,
}

impl Default for ContactCommands {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactCommands {
    pub fn new() -> Self {
        Self {
            buffer: hecs::CommandBuffer::new(),
            pending: 0,
        }
    }

    /// Queue a new body for insertion.
    pub fn insert(&mut self, body: RigidBody) {
        self.buffer.spawn((body,));
        self.pending += 1;
    }

    /// Queue a body for removal. Unknown handles are ignored when applied.
    pub fn remove(&mut self, handle: BodyHandle) {
        self.buffer.despawn(handle.entity());
        self.pending += 1;
    }

    /// Number of queued commands.
    pub fn len(&self) -> usize {
        self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending == 0
    }

    pub(crate) fn apply(&mut self, world: &mut hecs::World) {
        if self.pending == 0 {
            return;
        }
        tracing::debug!(commands = self.pending, "applying deferred body commands");
        self.buffer.run_on(world);
        self.pending = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flipped_manifold() {
        let m = Manifold {
            normal: Vec2::X,
            penetration: 2.0,
            point: Vec2::new(1.0, 1.0),
        };
        let f = m.flipped();
        assert_eq!(f.normal, -Vec2::X);
        assert_eq!(f.penetration, 2.0);
        assert_eq!(f.point, m.point);
    }
}
