mod pitch;

use std::cell::RefCell;
use std::rc::Rc;

use clap::Parser;
use rein2d::{BodyHandle, PhysicsConfig, PhysicsWorld};

use pitch::{Autopilot, Pitch, Side};

/// Simulated seconds between a goal and the following kick-off.
const KICK_OFF_DELAY: f64 = 2.0;

#[derive(Parser)]
#[command(name = "rein2d-app", about = "Headless rein2d soccer pitch")]
struct Args {
    /// Simulated duration in seconds
    #[arg(long, default_value_t = 20.0)]
    seconds: f64,
    /// Real frame time fed to the fixed-step accumulator
    #[arg(long, default_value_t = 1.0 / 60.0)]
    frame_time: f64,
    /// Pitch width in world units
    #[arg(long, default_value_t = 1280.0)]
    width: f32,
    /// Pitch height in world units
    #[arg(long, default_value_t = 720.0)]
    height: f32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    anyhow::ensure!(
        args.frame_time > 0.0 && args.seconds >= 0.0,
        "frame time must be positive and duration non-negative"
    );

    let contacts: Rc<RefCell<Vec<(BodyHandle, BodyHandle)>>> = Rc::default();
    let sink = Rc::clone(&contacts);
    let mut world = PhysicsWorld::new(PhysicsConfig::default(), move |contact, _| {
        sink.borrow_mut().push((contact.sensor(), contact.other()));
    })?;

    let pitch = Pitch::build(&mut world, args.width, args.height);
    let mut autopilot = Autopilot::default();
    let mut score = (0u32, 0u32);
    let mut kick_off_at: Option<f64> = None;

    let mut time = 0.0;
    let mut steps = 0u64;
    while time < args.seconds {
        steps += u64::from(world.advance(args.frame_time, |bodies, dt| {
            autopilot.drive(&pitch, bodies, dt)
        }));
        time += args.frame_time;

        for (sensor, other) in contacts.borrow_mut().drain(..) {
            let Some(side) = pitch.goal_side(sensor) else {
                continue;
            };
            if other != pitch.ball {
                log::debug!("{} crossed {}", pitch.name(other), pitch.name(sensor));
                continue;
            }
            if kick_off_at.is_some() {
                continue;
            }
            match side {
                Side::Left => score.1 += 1,
                Side::Right => score.0 += 1,
            }
            log::info!(
                "goal in {} at {time:.2}s, score {}-{}",
                pitch.name(sensor),
                score.0,
                score.1
            );
            kick_off_at = Some(time + KICK_OFF_DELAY);
        }

        if kick_off_at.is_some_and(|at| time >= at) {
            pitch.kick_off(world.bodies_mut())?;
            kick_off_at = None;
            log::info!("kick-off at {time:.2}s");
        }
    }

    let ball = world.get(pitch.ball)?;
    let alpha = world.alpha();
    log::info!(
        "finished after {steps} steps ({} kicks), ball at {:?}, render alpha {alpha:.2}",
        autopilot.kicks,
        ball.interpolated_position(alpha),
    );
    println!("final score {}-{}", score.0, score.1);
    Ok(())
}
