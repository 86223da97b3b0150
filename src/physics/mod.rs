//! 2D rigid body physics with a uniform-grid broadphase and SAT narrowphase.
//!
//! # Architecture
//!
//! The physics pipeline runs in a fixed timestep loop:
//!
//! 1. Apply external forces (caller supplied)
//! 2. Integrate every dynamic body (semi-implicit Euler)
//! 3. Broadphase collision detection (uniform grid, AABB overlap)
//! 4. Pair filtering (collision groups and shape kinds)
//! 5. Narrowphase collision detection (analytic circles, SAT polygons)
//! 6. Resolve solid contacts and notify sensor contacts
//! 7. Apply body insertions and removals queued by sensor handlers

pub mod body;
pub mod broadphase;
pub mod collider;
pub mod contact;
pub mod error;
pub mod filter;
pub mod manager;
pub mod narrowphase;
pub mod rigid_body;
pub mod sat;
pub mod shape;
pub mod solver;

use glam::Vec2;

use self::body::{BodyHandle, BodySet, RigidBody};
use self::broadphase::DEFAULT_CELL_SIZE;
use self::contact::{ContactCommands, SensorContact};
use self::error::PhysicsError;
use self::manager::{CollisionManager, StepStats};

/// Configuration for the physics simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    /// Fixed timestep for physics updates in seconds. Default: 1/60.
    pub fixed_timestep: f64,
    /// Upper bound on the frame time fed to the accumulator in seconds.
    /// Default: 0.25.
    pub max_frame_time: f64,
    /// Broadphase grid cell size in world units. Default: 64.
    pub cell_size: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 60.0,
            max_frame_time: 0.25,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !self.fixed_timestep.is_finite() || self.fixed_timestep <= 0.0 {
            return Err(PhysicsError::InvalidTimestep(self.fixed_timestep));
        }
        if !self.max_frame_time.is_finite() || self.max_frame_time < self.fixed_timestep {
            return Err(PhysicsError::InvalidFrameClamp(self.max_frame_time));
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(PhysicsError::InvalidCellSize(self.cell_size));
        }
        Ok(())
    }
}

/// The main physics world managing simulation state.
pub struct PhysicsWorld {
    config: PhysicsConfig,
    accumulator: f64,
    bodies: BodySet,
    collisions: CollisionManager,
}

impl PhysicsWorld {
    /// Create a new physics world with the given configuration and sensor
    /// callback.
    pub fn new(
        config: PhysicsConfig,
        on_sensor: impl FnMut(&SensorContact<'_>, &mut ContactCommands) + 'static,
    ) -> Result<Self, PhysicsError> {
        config.validate()?;
        tracing::debug!(?config, "physics world created");
        Ok(Self {
            collisions: CollisionManager::new(config.cell_size, on_sensor),
            config,
            accumulator: 0.0,
            bodies: BodySet::new(),
        })
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn insert(&mut self, body: RigidBody) -> BodyHandle {
        self.bodies.insert(body)
    }

    /// Remove a body. Unknown handles are a no-op.
    pub fn remove(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        self.bodies.remove(handle)
    }

    pub fn get(&self, handle: BodyHandle) -> Result<RigidBody, PhysicsError> {
        self.bodies.get(handle)
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Result<&mut RigidBody, PhysicsError> {
        self.bodies.get_mut(handle)
    }

    /// Add a force consumed by the next integration step.
    pub fn apply_force(&mut self, handle: BodyHandle, force: Vec2) -> Result<(), PhysicsError> {
        self.bodies.apply_force(handle, force)
    }

    pub fn bodies(&self) -> &BodySet {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut BodySet {
        &mut self.bodies
    }

    pub fn collisions_mut(&mut self) -> &mut CollisionManager {
        &mut self.collisions
    }

    /// Fraction of a fixed step left in the accumulator, for render
    /// interpolation between `prev_position` and the current position.
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.config.fixed_timestep) as f32
    }

    /// Run exactly one fixed step.
    ///
    /// `apply_forces` is called first with the body set and the step length.
    pub fn step(&mut self, mut apply_forces: impl FnMut(&mut BodySet, f32)) -> StepStats {
        let dt = self.config.fixed_timestep as f32;
        apply_forces(&mut self.bodies, dt);
        rigid_body::integrate_bodies(&mut self.bodies, dt);
        self.collisions.step(&mut self.bodies)
    }

    /// Advance the simulation by `frame_time` seconds of real time.
    ///
    /// Uses a fixed timestep accumulator; zero, one or several fixed steps
    /// may run. Returns the number of steps taken.
    pub fn advance(
        &mut self,
        frame_time: f64,
        mut apply_forces: impl FnMut(&mut BodySet, f32),
    ) -> u32 {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > self.config.max_frame_time {
            tracing::warn!(
                frame_time,
                max = self.config.max_frame_time,
                "frame time clamped after stall"
            );
            frame_time = self.config.max_frame_time;
        }
        self.accumulator += frame_time;

        let mut steps = 0u32;
        while self.accumulator >= self.config.fixed_timestep {
            self.step(&mut apply_forces);
            self.accumulator -= self.config.fixed_timestep;
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::body::{BodyDesc, CollisionGroups};
    use crate::physics::shape::{Shape, ShapeKind, ShapeKindSet};
    use std::cell::Cell;
    use std::rc::Rc;

    const PLAYERS: CollisionGroups = CollisionGroups::group(1);
    const WALLS: CollisionGroups = CollisionGroups::group(2);
    const GOALS: CollisionGroups = CollisionGroups::group(3);

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(PhysicsConfig::default(), |_, _| {}).unwrap()
    }

    fn no_forces(_: &mut BodySet, _: f32) {}

    #[test]
    fn test_config_validation() {
        assert!(PhysicsConfig::default().validate().is_ok());

        let bad_dt = PhysicsConfig {
            fixed_timestep: 0.0,
            ..Default::default()
        };
        assert_eq!(bad_dt.validate(), Err(PhysicsError::InvalidTimestep(0.0)));

        let bad_clamp = PhysicsConfig {
            max_frame_time: 0.001,
            ..Default::default()
        };
        assert_eq!(
            bad_clamp.validate(),
            Err(PhysicsError::InvalidFrameClamp(0.001))
        );

        let bad_cell = PhysicsConfig {
            cell_size: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            bad_cell.validate(),
            Err(PhysicsError::InvalidCellSize(_))
        ));
        assert!(PhysicsWorld::new(bad_cell, |_, _| {}).is_err());
    }

    #[test]
    fn test_accumulator_step_counts() {
        let mut world = world();
        assert_eq!(world.advance(0.01, no_forces), 0);
        assert!((world.alpha() - 0.6).abs() < 1e-4);

        // 0.01 + 0.03 = 0.04 -> two steps, 0.00667 left over.
        assert_eq!(world.advance(0.03, no_forces), 2);
        assert!((world.alpha() - 0.4).abs() < 1e-3);

        // A one second stall is clamped to 0.25 s.
        assert_eq!(world.advance(1.0, no_forces), 15);
        assert!(world.alpha() < 1.0);

        assert_eq!(world.advance(-3.0, no_forces), 0);
    }

    #[test]
    fn test_forces_reapplied_every_step() {
        let mut world = world();
        let ball = world.insert(RigidBody::new(
            Shape::circle(Vec2::ZERO, 5.0),
            BodyDesc {
                friction: 0.0,
                ..Default::default()
            },
        ));

        let calls = world.advance(0.11, |bodies, _| {
            bodies.apply_force(ball, Vec2::new(60.0, 0.0)).unwrap();
        });
        assert_eq!(calls, 6);
        // Constant acceleration of 60 for six steps.
        assert!((world.get(ball).unwrap().velocity.x - 6.0).abs() < 1e-3);
    }

    #[test]
    fn test_goal_sensor_scenario() {
        let goals = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&goals);
        let mut world = PhysicsWorld::new(PhysicsConfig::default(), move |contact, _| {
            if contact.body_a.group == GOALS || contact.body_b.group == GOALS {
                counter.set(counter.get() + 1);
            }
        })
        .unwrap();

        world.insert(RigidBody::new(
            Shape::rect(Vec2::new(400.0, 0.0), 0.0, 120.0),
            BodyDesc {
                has_physics: false,
                is_sensor: true,
                group: GOALS,
                collides_with: CollisionGroups::NONE,
                collides_with_kinds: ShapeKindSet::from_kinds(&[ShapeKind::Circle]),
                ..Default::default()
            },
        ));
        let ball = world.insert(RigidBody::new(
            Shape::circle(Vec2::new(300.0, 0.0), 10.0),
            BodyDesc {
                velocity: Vec2::new(600.0, 0.0),
                friction: 0.0,
                group: PLAYERS,
                collides_with: PLAYERS | WALLS,
                ..Default::default()
            },
        ));

        for _ in 0..30 {
            world.step(no_forces);
        }

        // The ball passes straight through the goal line.
        let ball = world.get(ball).unwrap();
        assert!((ball.velocity.x - 600.0).abs() < 1e-3);
        assert!(ball.position().x > 450.0);
        assert!(goals.get() >= 1);
    }

    #[test]
    fn test_wall_bounce_scenario() {
        let mut world = world();
        world.insert(RigidBody::new(
            Shape::rect(Vec2::new(100.0, 0.0), 20.0, 400.0),
            BodyDesc {
                has_physics: false,
                group: WALLS,
                ..Default::default()
            },
        ));
        let ball = world.insert(RigidBody::new(
            Shape::circle(Vec2::ZERO, 10.0),
            BodyDesc {
                velocity: Vec2::new(300.0, 0.0),
                group: PLAYERS,
                collides_with: PLAYERS | WALLS,
                ..Default::default()
            },
        ));

        for _ in 0..60 {
            world.step(no_forces);
        }

        let ball = world.get(ball).unwrap();
        assert!(ball.velocity.x < 0.0);
        assert!(ball.position().x < 80.0);
    }

    #[test]
    fn test_steps_are_deterministic() {
        fn run() -> Vec<RigidBody> {
            let mut world = world();
            for i in 0..8 {
                let pos = Vec2::new(i as f32 * 18.0, (i % 3) as f32 * 7.0);
                world.insert(RigidBody::new(
                    Shape::circle(pos, 10.0),
                    BodyDesc {
                        velocity: Vec2::new(40.0 - i as f32 * 10.0, 5.0),
                        ..Default::default()
                    },
                ));
            }
            for _ in 0..120 {
                world.step(no_forces);
            }
            let handles = world.bodies().handles();
            handles.iter().map(|h| world.get(*h).unwrap()).collect()
        }

        assert_eq!(run(), run());
    }

    #[test]
    fn test_unknown_handle_errors() {
        let mut world = world();
        let ball = world.insert(RigidBody::new_dynamic(Shape::circle(Vec2::ZERO, 1.0), 1.0));
        assert!(world.remove(ball).is_some());
        assert!(world.remove(ball).is_none());
        assert_eq!(
            world.apply_force(ball, Vec2::X),
            Err(PhysicsError::UnknownBody(ball))
        );
    }
}
