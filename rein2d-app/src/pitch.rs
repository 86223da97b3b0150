//! Soccer pitch scene: walls, goal sensors, two players, a ball and a
//! thick mid line.

use glam::Vec2;
use rein2d::{
    BodyDesc, BodyHandle, BodySet, CollisionGroups, PhysicsWorld, RigidBody, Shape, ShapeKind,
    ShapeKindSet,
};

pub const PLAYERS: CollisionGroups = CollisionGroups::group(1);
pub const BALL: CollisionGroups = CollisionGroups::group(2);
pub const WALLS: CollisionGroups = CollisionGroups::group(3);
pub const GOALS: CollisionGroups = CollisionGroups::group(4);

const MARGIN: f32 = 12.0;
const WALL_THICKNESS: f32 = 12.0;
const GOAL_INSET: f32 = 20.0;
const GOAL_HEIGHT: f32 = 120.0;
const KICK_RANGE: f32 = 40.0;
const KICK_STRENGTH: f32 = 2.8e4;
const KICK_COOLDOWN: f32 = 0.5;
const PLAYER_ACCEL: f32 = 1.2e3;
const PLAYER_DECEL: f32 = 0.88;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

pub struct Pitch {
    pub width: f32,
    pub height: f32,
    pub player: BodyHandle,
    pub opponent: BodyHandle,
    pub ball: BodyHandle,
    pub goal_left: BodyHandle,
    pub goal_right: BodyHandle,
    pub mid_line: BodyHandle,
}

impl Pitch {
    pub fn build(world: &mut PhysicsWorld, width: f32, height: f32) -> Self {
        let field_w = width - MARGIN * 2.0;
        let field_h = height - MARGIN * 2.0;
        let center = Vec2::new(width / 2.0, height / 2.0);

        let wall = |position: Vec2, w: f32, h: f32| {
            RigidBody::new(
                Shape::rect(position, w, h),
                BodyDesc {
                    has_physics: false,
                    group: WALLS,
                    collides_with: PLAYERS | BALL | WALLS,
                    ..Default::default()
                },
            )
        };
        world.insert(wall(Vec2::new(center.x, MARGIN), field_w, WALL_THICKNESS));
        world.insert(wall(Vec2::new(center.x, height - MARGIN), field_w, WALL_THICKNESS));
        world.insert(wall(Vec2::new(MARGIN, center.y), WALL_THICKNESS, field_h));
        world.insert(wall(Vec2::new(width - MARGIN, center.y), WALL_THICKNESS, field_h));

        let goal = |x: f32| {
            RigidBody::new(
                Shape::rect(Vec2::new(x, center.y), 0.0, GOAL_HEIGHT),
                BodyDesc {
                    has_physics: false,
                    is_sensor: true,
                    group: GOALS,
                    collides_with: CollisionGroups::NONE,
                    collides_with_kinds: ShapeKindSet::from_kinds(&[ShapeKind::Circle]),
                    ..Default::default()
                },
            )
        };
        let goal_left = world.insert(goal(MARGIN + GOAL_INSET));
        let goal_right = world.insert(goal(width - MARGIN - GOAL_INSET));

        let player = world.insert(RigidBody::new(
            Shape::circle(center - Vec2::new(120.0, 0.0), 20.0).with_stroke_width(3.0),
            BodyDesc {
                mass: 5.0,
                restitution: 0.1,
                friction: 1.0,
                group: PLAYERS,
                collides_with: PLAYERS | BALL | WALLS | GOALS,
                ..Default::default()
            },
        ));

        let opponent = world.insert(RigidBody::new(
            Shape::rect(center + Vec2::new(120.0, 0.0), 40.0, 40.0),
            BodyDesc {
                mass: 1.0,
                restitution: 0.3,
                friction: 1.0,
                group: PLAYERS,
                collides_with: PLAYERS | BALL | WALLS | GOALS,
                ..Default::default()
            },
        ));

        let ball = world.insert(RigidBody::new(
            Shape::circle(center, 12.0),
            BodyDesc {
                mass: 1.0,
                restitution: 0.9,
                friction: 0.9,
                group: BALL,
                collides_with: PLAYERS | BALL | WALLS | GOALS,
                ..Default::default()
            },
        ));

        let line_y = height / 2.3;
        let mid_line = world.insert(RigidBody::new(
            Shape::segment(
                Vec2::new(width - 850.0, line_y),
                Vec2::new(width - 120.0, line_y),
                6.0,
            ),
            BodyDesc {
                mass: 2.0,
                restitution: 0.3,
                friction: 0.99,
                group: WALLS,
                collides_with: PLAYERS | BALL | WALLS,
                ..Default::default()
            },
        ));

        log::info!(
            "pitch built: {width}x{height}, {} bodies",
            world.bodies().len()
        );

        Self {
            width,
            height,
            player,
            opponent,
            ball,
            goal_left,
            goal_right,
            mid_line,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Goal guarded by the given side, if `handle` is a goal sensor.
    pub fn goal_side(&self, handle: BodyHandle) -> Option<Side> {
        if handle == self.goal_left {
            Some(Side::Left)
        } else if handle == self.goal_right {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub fn name(&self, handle: BodyHandle) -> &'static str {
        match handle {
            h if h == self.player => "player",
            h if h == self.opponent => "opponent",
            h if h == self.ball => "ball",
            h if h == self.goal_left => "goal-left",
            h if h == self.goal_right => "goal-right",
            h if h == self.mid_line => "mid-line",
            _ => "wall",
        }
    }

    /// Put the ball back on the centre spot and the player beside it.
    pub fn kick_off(&self, bodies: &mut BodySet) -> anyhow::Result<()> {
        let center = self.center();

        let ball = bodies.get_mut(self.ball)?;
        ball.shape.position = center;
        ball.prev_position = center;
        ball.velocity = Vec2::ZERO;

        let player = bodies.get_mut(self.player)?;
        player.shape.position = center - Vec2::new(120.0, 0.0);
        player.prev_position = player.shape.position;
        player.velocity = Vec2::ZERO;

        Ok(())
    }
}

/// Scripted stand-in for keyboard input: the player chases the ball and
/// kicks it towards the right goal whenever it is in range.
#[derive(Debug, Default)]
pub struct Autopilot {
    cooldown: f32,
    pub kicks: u32,
}

impl Autopilot {
    pub fn drive(&mut self, pitch: &Pitch, bodies: &mut BodySet, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);

        let (Ok(ball), Ok(player)) = (bodies.get(pitch.ball), bodies.get(pitch.player)) else {
            return;
        };

        // Aim slightly behind the ball so kicks travel towards the right goal.
        let behind = ball.shape.effective_radius().unwrap_or(0.0);
        let target = ball.position() - Vec2::new(behind, 0.0);
        let dir = (target - player.position()).normalize_or_zero();

        if let Ok(player) = bodies.get_mut(pitch.player) {
            player.velocity *= PLAYER_DECEL;
            if dir != Vec2::ZERO {
                let mass = player.mass();
                player.apply_force(dir * PLAYER_ACCEL * mass);
            }
        }

        let to_ball = ball.position() - player.position();
        if self.cooldown == 0.0 && to_ball.length() < KICK_RANGE {
            let kick = to_ball.normalize_or(Vec2::X) * KICK_STRENGTH;
            if bodies.apply_force(pitch.ball, kick).is_ok() {
                self.cooldown = KICK_COOLDOWN;
                self.kicks += 1;
                log::debug!("kick #{} towards {:?}", self.kicks, kick.normalize_or_zero());
            }
        }
    }
}
