//! Rein 2D
//!
//! Rigid body physics for 2D scenes: circles, rotated rectangles, triangles
//! and thick line segments.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **shape / collider / sat** - Geometry, bounding boxes, separating axis kernel
//! 2. **narrowphase** - Pairwise shape tests producing contact manifolds
//! 3. **body** - Rigid body records stored in a generational arena
//! 4. **broadphase** - Uniform grid rebuilt every step
//! 5. **solver** - Positional correction and impulse response
//! 6. **rigid_body** - Semi-implicit Euler integration
//! 7. **manager** - Per-step orchestration and sensor notification
//! 8. **PhysicsWorld** - Fixed timestep driver tying it all together

pub mod physics;

// Re-export commonly used types
pub use physics::body::{BodyDesc, BodyHandle, BodySet, CollisionGroups, RigidBody};
pub use physics::contact::{ContactCommands, Manifold, SensorContact};
pub use physics::error::PhysicsError;
pub use physics::manager::{CollisionManager, StepStats};
pub use physics::shape::{Geometry, Shape, ShapeKind, ShapeKindSet};
pub use physics::{PhysicsConfig, PhysicsWorld};

// Re-export glam for convenience
pub use glam;
