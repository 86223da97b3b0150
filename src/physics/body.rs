//! Rigid bodies and the arena that stores them.

use glam::Vec2;

use super::error::PhysicsError;
use super::shape::{Geometry, Shape, ShapeKind, ShapeKindSet};

/// Smallest mass a physics-enabled body may have.
pub const MIN_MASS: f32 = 0.0001;
/// Rotational inertia for shapes without a closed-form value.
pub const FALLBACK_INERTIA: f32 = 1.0;

/// Bitmask of collision groups.
///
/// A body belongs to the groups in [`RigidBody::group`] and accepts contacts
/// from bodies whose group intersects [`RigidBody::collides_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionGroups(u32);

impl CollisionGroups {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);
    pub const DEFAULT: Self = Self(1);

    /// The single group with the given index (0..32).
    pub const fn group(index: u32) -> Self {
        assert!(index < 32, "collision group index out of range");
        Self(1 << index)
    }

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for CollisionGroups {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::ops::BitOr for CollisionGroups {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Construction parameters for a [`RigidBody`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    /// Mass. Default: 1.0. Clamped to [`MIN_MASS`] for physics-enabled bodies.
    pub mass: f32,
    /// Coefficient of restitution (0.0 - 1.0). Default: 0.6.
    pub restitution: f32,
    /// Linear damping coefficient, clamped to 0.0 - 1.0 on use. Default: 0.01.
    pub friction: f32,
    /// Initial linear velocity. Default: zero.
    pub velocity: Vec2,
    /// Initial angular velocity in rad/s. Default: 0.0.
    pub angular_velocity: f32,
    /// Whether integration and contact resolution may move the body. Default: true.
    pub has_physics: bool,
    /// Detect-only body that fires the sensor callback. Default: false.
    pub is_sensor: bool,
    /// Whether angular velocity changes the rotation. Default: false.
    pub can_rotate: bool,
    /// Default: true.
    pub visible: bool,
    /// Groups this body belongs to. Default: [`CollisionGroups::DEFAULT`].
    pub group: CollisionGroups,
    /// Groups this body accepts contacts from. Default: [`CollisionGroups::ALL`].
    pub collides_with: CollisionGroups,
    /// Shape kinds this body accepts contacts from. Default: [`ShapeKindSet::ALL`].
    pub collides_with_kinds: ShapeKindSet,
}

impl Default for BodyDesc {
    fn default() -> Self {
        Self {
            mass: 1.0,
            restitution: 0.6,
            friction: 0.01,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            has_physics: true,
            is_sensor: false,
            can_rotate: false,
            visible: true,
            group: CollisionGroups::DEFAULT,
            collides_with: CollisionGroups::ALL,
            collides_with_kinds: ShapeKindSet::ALL,
        }
    }
}

/// A simulated body owning exactly one [`Shape`].
///
/// Inverse mass and inverse inertia are always either the reciprocal of a
/// positive quantity or exactly zero when physics is disabled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBody {
    pub shape: Shape,
    pub velocity: Vec2,
    pub angular_velocity: f32,
    /// Accumulated force, consumed and zeroed by the next integration.
    pub force: Vec2,
    pub restitution: f32,
    pub friction: f32,
    pub is_sensor: bool,
    pub can_rotate: bool,
    pub visible: bool,
    pub group: CollisionGroups,
    pub collides_with: CollisionGroups,
    pub collides_with_kinds: ShapeKindSet,
    /// Position before the last integration. Only read by render interpolation.
    pub prev_position: Vec2,
    mass: f32,
    inertia: f32,
    inv_mass: f32,
    inv_inertia: f32,
    has_physics: bool,
}

impl RigidBody {
    pub fn new(shape: Shape, desc: BodyDesc) -> Self {
        let mass = if desc.mass > 0.0 && desc.mass.is_finite() {
            desc.mass.max(MIN_MASS)
        } else if desc.has_physics {
            tracing::warn!(mass = desc.mass, "non-positive body mass clamped to floor");
            MIN_MASS
        } else {
            1.0
        };

        let mut body = Self {
            shape,
            velocity: desc.velocity,
            angular_velocity: desc.angular_velocity,
            force: Vec2::ZERO,
            restitution: desc.restitution,
            friction: desc.friction,
            is_sensor: desc.is_sensor,
            can_rotate: desc.can_rotate,
            visible: desc.visible,
            group: desc.group,
            collides_with: desc.collides_with,
            collides_with_kinds: desc.collides_with_kinds,
            prev_position: shape.position,
            mass,
            inertia: 0.0,
            inv_mass: 0.0,
            inv_inertia: 0.0,
            has_physics: desc.has_physics,
        };
        body.update_mass_properties();
        body
    }

    /// Create a dynamic body with the given mass and default parameters.
    pub fn new_dynamic(shape: Shape, mass: f32) -> Self {
        Self::new(
            shape,
            BodyDesc {
                mass,
                ..Default::default()
            },
        )
    }

    /// Create an immovable body.
    pub fn new_static(shape: Shape) -> Self {
        Self::new(
            shape,
            BodyDesc {
                has_physics: false,
                ..Default::default()
            },
        )
    }

    fn update_mass_properties(&mut self) {
        let m = self.mass;
        self.inertia = match self.shape.geometry {
            Geometry::Circle { radius } => 0.5 * m * radius * radius,
            Geometry::Rect { width, height } => m * (width * width + height * height) / 12.0,
            Geometry::Triangle { .. } | Geometry::Segment { .. } => FALLBACK_INERTIA,
        };

        if self.has_physics {
            self.inv_mass = 1.0 / m;
            self.inv_inertia = if self.inertia > 0.0 {
                1.0 / self.inertia
            } else {
                0.0
            };
        } else {
            self.inv_mass = 0.0;
            self.inv_inertia = 0.0;
        }
    }

    /// Mass, or zero when physics is disabled.
    #[inline]
    pub fn mass(&self) -> f32 {
        if self.has_physics {
            self.mass
        } else {
            0.0
        }
    }

    #[inline]
    pub fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    /// Rotational inertia derived from the shape, or zero when physics is disabled.
    #[inline]
    pub fn inertia(&self) -> f32 {
        if self.has_physics {
            self.inertia
        } else {
            0.0
        }
    }

    #[inline]
    pub fn inv_inertia(&self) -> f32 {
        self.inv_inertia
    }

    #[inline]
    pub fn has_physics(&self) -> bool {
        self.has_physics
    }

    pub fn set_mass(&mut self, mass: f32) {
        self.mass = if mass > 0.0 && mass.is_finite() {
            mass.max(MIN_MASS)
        } else {
            tracing::warn!(mass, "non-positive body mass clamped to floor");
            MIN_MASS
        };
        self.update_mass_properties();
    }

    /// Enable or disable physics. Disabling makes the body immovable;
    /// re-enabling restores the configured mass.
    pub fn set_physics_enabled(&mut self, enabled: bool) {
        if self.has_physics != enabled {
            tracing::debug!(enabled, "body physics toggled");
        }
        self.has_physics = enabled;
        self.update_mass_properties();
    }

    pub fn set_sensor(&mut self, sensor: bool) {
        self.is_sensor = sensor;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Add a force for the next integration step.
    #[inline]
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.shape.position
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.shape.rotation
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Position blended between the previous and current step, for rendering.
    #[inline]
    pub fn interpolated_position(&self, alpha: f32) -> Vec2 {
        self.prev_position.lerp(self.shape.position, alpha)
    }

    /// Whether this body's group mask accepts `other`'s group.
    #[inline]
    pub fn accepts_group(&self, other: &RigidBody) -> bool {
        self.collides_with.intersects(other.group)
    }

    /// Whether this body's shape mask accepts `other`'s shape kind.
    #[inline]
    pub fn accepts_kind(&self, other: &RigidBody) -> bool {
        self.collides_with_kinds.contains(other.kind())
    }

    /// Bodies that are invisible, physics-disabled and not sensors are
    /// skipped by the broadphase.
    #[inline]
    pub fn participates(&self) -> bool {
        self.visible || self.has_physics || self.is_sensor
    }
}

/// Stable handle to a body in a [`BodySet`].
///
/// Handles are generational: a handle to a removed body never aliases a body
/// inserted later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(hecs::Entity);

impl BodyHandle {
    #[inline]
    pub(crate) fn entity(self) -> hecs::Entity {
        self.0
    }

    /// Opaque bit representation, stable for the lifetime of the body.
    pub fn to_bits(self) -> u64 {
        self.0.to_bits().get()
    }
}

/// Generational arena of rigid bodies.
#[derive(Default)]
pub struct BodySet {
    world: hecs::World,
}

impl BodySet {
    pub fn new() -> Self {
        Self {
            world: hecs::World::new(),
        }
    }

    /// Register a body and return its handle.
    pub fn insert(&mut self, body: RigidBody) -> BodyHandle {
        let handle = BodyHandle(self.world.spawn((body,)));
        tracing::debug!(?handle, kind = ?body.kind(), "body inserted");
        handle
    }

    /// Remove a body. Unknown handles are a no-op and return `None`.
    pub fn remove(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        let body = self.get(handle).ok()?;
        self.world.despawn(handle.0).ok()?;
        tracing::debug!(?handle, "body removed");
        Some(body)
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.world.contains(handle.0)
    }

    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.world.len() == 0
    }

    /// Snapshot of a body.
    pub fn get(&self, handle: BodyHandle) -> Result<RigidBody, PhysicsError> {
        self.world
            .get::<&RigidBody>(handle.0)
            .map(|rb| *rb)
            .map_err(|_| PhysicsError::UnknownBody(handle))
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Result<&mut RigidBody, PhysicsError> {
        self.world
            .query_one_mut::<&mut RigidBody>(handle.0)
            .map_err(|_| PhysicsError::UnknownBody(handle))
    }

    /// Add a force to a body for its next integration step.
    pub fn apply_force(&mut self, handle: BodyHandle, force: Vec2) -> Result<(), PhysicsError> {
        self.get_mut(handle)?.apply_force(force);
        Ok(())
    }

    /// Visit every body.
    pub fn for_each(&self, mut f: impl FnMut(BodyHandle, &RigidBody)) {
        for (entity, rb) in self.world.query::<&RigidBody>().iter() {
            f(BodyHandle(entity), rb);
        }
    }

    /// Iterate mutably over every body.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyHandle, &mut RigidBody)> + '_ {
        self.world
            .query_mut::<&mut RigidBody>()
            .into_iter()
            .map(|(entity, rb)| (BodyHandle(entity), rb))
    }

    /// Handles of all registered bodies, in ascending order.
    pub fn handles(&self) -> Vec<BodyHandle> {
        let mut handles = Vec::with_capacity(self.len());
        self.for_each(|handle, _| handles.push(handle));
        handles.sort_unstable();
        handles
    }

    pub(crate) fn world_mut(&mut self) -> &mut hecs::World {
        &mut self.world
    }
}
