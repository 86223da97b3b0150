//! Collision orchestration: broadphase, filtering, narrowphase, then
//! resolution or sensor notification for every candidate pair.

use super::body::{BodyHandle, BodySet, RigidBody};
use super::broadphase::{SpatialHashGrid, DEFAULT_CELL_SIZE};
use super::contact::{ContactCommands, SensorContact};
use super::filter::{classify, sensor_resolves, PairKind};
use super::narrowphase::detect_collision;
use super::solver::resolve_collision;

/// Callback invoked once per overlapping sensor pair per step.
pub type SensorHandler = Box<dyn FnMut(&SensorContact<'_>, &mut ContactCommands)>;

/// Counters for a single collision step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Pairs reported by the broadphase.
    pub candidates: usize,
    /// Solid pairs that overlapped and were resolved.
    pub solid_contacts: usize,
    /// Sensor notifications fired.
    pub sensor_contacts: usize,
}

pub struct CollisionManager {
    grid: SpatialHashGrid,
    on_sensor: SensorHandler,
    commands: ContactCommands,
}

impl Default for CollisionManager {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE, |_, _| {})
    }
}

impl CollisionManager {
    pub fn new(
        cell_size: f32,
        on_sensor: impl FnMut(&SensorContact<'_>, &mut ContactCommands) + 'static,
    ) -> Self {
        Self {
            grid: SpatialHashGrid::new(cell_size),
            on_sensor: Box::new(on_sensor),
            commands: ContactCommands::new(),
        }
    }

    /// Replace the sensor callback.
    pub fn set_sensor_handler(
        &mut self,
        on_sensor: impl FnMut(&SensorContact<'_>, &mut ContactCommands) + 'static,
    ) {
        self.on_sensor = Box::new(on_sensor);
    }

    pub fn cell_size(&self) -> f32 {
        self.grid.cell_size()
    }

    /// Run one collision step over every body.
    ///
    /// Body insertions and removals requested by the sensor callback are
    /// applied after all candidate pairs have been processed.
    pub fn step(&mut self, bodies: &mut BodySet) -> StepStats {
        let pairs = self.grid.find_pairs(bodies);
        let mut stats = StepStats {
            candidates: pairs.len(),
            ..Default::default()
        };

        for (handle_a, handle_b) in pairs {
            let (Ok(mut a), Ok(mut b)) = (bodies.get(handle_a), bodies.get(handle_b)) else {
                continue;
            };

            let kind = classify(&a, &b);
            let resolve = match kind {
                PairKind::Ignored => continue,
                // Two immovable solids can never be resolved.
                PairKind::Solid if !a.has_physics() && !b.has_physics() => continue,
                PairKind::Solid => true,
                PairKind::Sensor => sensor_resolves(&a, &b),
            };

            let Some(manifold) = detect_collision(&a.shape, &b.shape) else {
                continue;
            };
            tracing::trace!(?handle_a, ?handle_b, ?kind, ?manifold, "contact");

            if kind == PairKind::Sensor {
                let contact = SensorContact {
                    handle_a,
                    body_a: &a,
                    handle_b,
                    body_b: &b,
                    manifold,
                };
                (self.on_sensor)(&contact, &mut self.commands);
                stats.sensor_contacts += 1;
            } else {
                stats.solid_contacts += 1;
            }

            if resolve {
                resolve_collision(&mut a, &mut b, &manifold);
                write_back(bodies, handle_a, a);
                write_back(bodies, handle_b, b);
            }
        }

        self.commands.apply(bodies.world_mut());
        stats
    }
}

fn write_back(bodies: &mut BodySet, handle: BodyHandle, body: RigidBody) {
    if let Ok(slot) = bodies.get_mut(handle) {
        *slot = body;
    }
}
