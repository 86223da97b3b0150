//! Scene builders shared by the physics benchmarks.

use glam::Vec2;
use rein2d::physics::body::{BodyDesc, BodySet, RigidBody};
use rein2d::physics::shape::Shape;
use rein2d::{PhysicsConfig, PhysicsWorld};

/// Small deterministic generator so every run builds the same scene.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 40) as f32 / (1u64 << 24) as f32
    }

    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_f32()
    }
}

fn dynamic(shape: Shape, rng: &mut Lcg) -> RigidBody {
    RigidBody::new(
        shape,
        BodyDesc {
            velocity: Vec2::new(rng.range(-200.0, 200.0), rng.range(-200.0, 200.0)),
            ..Default::default()
        },
    )
}

/// `n` circles packed into a square so that neighbours overlap.
pub fn setup_circle_bodies(n: usize) -> BodySet {
    let mut bodies = BodySet::new();
    let mut rng = Lcg::new(7);
    let side = (n as f32).sqrt().ceil() as usize;
    for i in 0..n {
        let pos = Vec2::new((i % side) as f32 * 18.0, (i / side) as f32 * 18.0);
        bodies.insert(dynamic(Shape::circle(pos, 10.0), &mut rng));
    }
    bodies
}

/// Mixed circles, rotated rectangles, triangles and segments.
pub fn setup_mixed_bodies(n: usize) -> BodySet {
    let mut bodies = BodySet::new();
    let mut rng = Lcg::new(11);
    let extent = (n as f32).sqrt() * 25.0;
    for i in 0..n {
        let pos = Vec2::new(rng.range(0.0, extent), rng.range(0.0, extent));
        let shape = match i % 4 {
            0 => Shape::circle(pos, rng.range(5.0, 15.0)),
            1 => Shape::rect(pos, rng.range(10.0, 30.0), rng.range(10.0, 30.0))
                .with_rotation(rng.range(0.0, std::f32::consts::TAU)),
            2 => Shape::triangle(pos, rng.range(10.0, 30.0), rng.range(10.0, 30.0))
                .with_rotation(rng.range(0.0, std::f32::consts::TAU)),
            _ => Shape::segment(pos, pos + Vec2::new(rng.range(-40.0, 40.0), 20.0), 4.0),
        };
        bodies.insert(dynamic(shape, &mut rng));
    }
    bodies
}

/// Circles spread far apart: almost every cell holds one body.
pub fn setup_sparse_bodies(n: usize) -> BodySet {
    let mut bodies = BodySet::new();
    let mut rng = Lcg::new(13);
    let side = (n as f32).sqrt().ceil() as usize;
    for i in 0..n {
        let pos = Vec2::new((i % side) as f32 * 200.0, (i / side) as f32 * 200.0);
        bodies.insert(dynamic(Shape::circle(pos, 8.0), &mut rng));
    }
    bodies
}

/// A walled box filled with `n` mixed bodies.
pub fn setup_scene(n: usize) -> PhysicsWorld {
    let mut world = PhysicsWorld::new(PhysicsConfig::default(), |_, _| {})
        .unwrap_or_else(|e| panic!("default physics config rejected: {e}"));

    let extent = (n as f32).sqrt() * 30.0 + 100.0;
    let walls = [
        (Vec2::new(extent / 2.0, -10.0), extent, 20.0),
        (Vec2::new(extent / 2.0, extent + 10.0), extent, 20.0),
        (Vec2::new(-10.0, extent / 2.0), 20.0, extent),
        (Vec2::new(extent + 10.0, extent / 2.0), 20.0, extent),
    ];
    for (pos, w, h) in walls {
        world.insert(RigidBody::new_static(Shape::rect(pos, w, h)));
    }

    let mut rng = Lcg::new(17);
    for i in 0..n {
        let pos = Vec2::new(rng.range(20.0, extent - 20.0), rng.range(20.0, extent - 20.0));
        let shape = if i % 3 == 0 {
            Shape::rect(pos, 16.0, 16.0)
        } else {
            Shape::circle(pos, 8.0)
        };
        world.insert(dynamic(shape, &mut rng));
    }
    world
}
