//! Collision filtering by group and shape-kind masks.
//!
//! A body's participation in a pair is a pure function of both bodies'
//! flags, recomputed every step.

use super::body::RigidBody;

/// How a candidate pair is handled once the broadphase reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairKind {
    /// Masks reject the pair; no narrowphase test.
    Ignored,
    /// At least one side is a sensor: notify, and resolve only if
    /// [`sensor_resolves`] allows it.
    Sensor,
    /// Both sides accept each other: resolve.
    Solid,
}

/// Classify a candidate pair.
///
/// Solid pairs need mutual acceptance of both group and shape kind. Sensor
/// pairs skip the group check and need only one side to accept the other's
/// shape kind.
pub fn classify(a: &RigidBody, b: &RigidBody) -> PairKind {
    if a.is_sensor || b.is_sensor {
        if a.accepts_kind(b) || b.accepts_kind(a) {
            PairKind::Sensor
        } else {
            PairKind::Ignored
        }
    } else if a.accepts_group(b) && b.accepts_group(a) && a.accepts_kind(b) && b.accepts_kind(a)
    {
        PairKind::Solid
    } else {
        PairKind::Ignored
    }
}

/// Whether an overlapping sensor pair is also resolved physically: the
/// non-sensor side must have physics and accept the sensor's group.
pub fn sensor_resolves(a: &RigidBody, b: &RigidBody) -> bool {
    let solid_accepts = |solid: &RigidBody, sensor: &RigidBody| {
        !solid.is_sensor && sensor.is_sensor && solid.has_physics() && solid.accepts_group(sensor)
    };
    solid_accepts(a, b) || solid_accepts(b, a)
}
