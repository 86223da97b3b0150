//! Broadphase collision detection using a uniform spatial hash grid.

use std::collections::{HashMap, HashSet};

use glam::Vec2;

use super::body::{BodyHandle, BodySet};
use super::collider::PhysicsAabb;

/// Default grid cell edge length in world units.
pub const DEFAULT_CELL_SIZE: f32 = 64.0;

type CellKey = (i32, i32);
type CellEntry = (BodyHandle, PhysicsAabb);

/// Uniform grid broadphase, rebuilt from scratch on every query.
pub struct SpatialHashGrid {
    cell_size: f32,
    cells: HashMap<CellKey, Vec<CellEntry>>,
}

impl Default for SpatialHashGrid {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}

impl SpatialHashGrid {
    /// `cell_size` must be finite and positive; [`super::PhysicsConfig::validate`]
    /// checks this before a grid is built.
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of occupied cells after the last query.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    fn cell_coords(&self, point: Vec2) -> CellKey {
        let inv = 1.0 / self.cell_size;
        ((point.x * inv).floor() as i32, (point.y * inv).floor() as i32)
    }

    /// Find all distinct pairs of bodies whose AABBs overlap.
    ///
    /// Bodies that are invisible, physics-disabled and not sensors are
    /// skipped. Each pair is reported once with the lower handle first, and
    /// the result is sorted.
    pub fn find_pairs(&mut self, bodies: &BodySet) -> Vec<(BodyHandle, BodyHandle)> {
        self.cells.clear();

        let mut entries: Vec<CellEntry> = Vec::with_capacity(bodies.len());
        bodies.for_each(|handle, body| {
            if body.participates() {
                entries.push((handle, body.shape.compute_aabb()));
            }
        });

        for &(handle, aabb) in &entries {
            let min_cell = self.cell_coords(aabb.min);
            let max_cell = self.cell_coords(aabb.max);

            for cx in min_cell.0..=max_cell.0 {
                for cy in min_cell.1..=max_cell.1 {
                    self.cells.entry((cx, cy)).or_default().push((handle, aabb));
                }
            }
        }

        let mut pairs = Vec::with_capacity(entries.len() * 2);
        let mut seen = HashSet::new();

        for cell in self.cells.values() {
            for i in 0..cell.len() {
                for j in (i + 1)..cell.len() {
                    let (handle_a, ref aabb_a) = cell[i];
                    let (handle_b, ref aabb_b) = cell[j];

                    let pair = if handle_a < handle_b {
                        (handle_a, handle_b)
                    } else {
                        (handle_b, handle_a)
                    };

                    if seen.contains(&pair) {
                        continue;
                    }

                    if aabb_a.overlaps(aabb_b) {
                        seen.insert(pair);
                        pairs.push(pair);
                    }
                }
            }
        }

        pairs.sort_unstable();
        tracing::trace!(
            bodies = entries.len(),
            cells = self.cells.len(),
            pairs = pairs.len(),
            "broadphase"
        );
        pairs
    }
}
