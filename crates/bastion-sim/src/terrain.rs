//! Terrain-safe position search.
//!
//! The real world backend decides what "safe" means; the engine only needs
//! a candidate point near a site or `None`.

use glam::DVec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bastion_core::types::Position;

/// Sampling attempts before a search gives up.
const SEARCH_ATTEMPTS: u32 = 12;

pub trait TerrainQuery {
    /// A safe ground position between `min_radius` and `max_radius` of `center`.
    fn find_safe_position(
        &self,
        center: Position,
        min_radius: f64,
        max_radius: f64,
        rng: &mut ChaCha8Rng,
    ) -> Option<Position>;
}

/// A circular area no spawn may land in (water, buildings, cliffs).
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub center: Position,
    pub radius: f64,
}

/// Flat ground with optional obstacles.
#[derive(Debug, Clone, Default)]
pub struct OpenTerrain {
    pub obstacles: Vec<Obstacle>,
}

impl OpenTerrain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_obstacles(obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles }
    }

    fn is_blocked(&self, pos: &Position) -> bool {
        self.obstacles
            .iter()
            .any(|o| o.center.horizontal_range_to(pos) <= o.radius)
    }
}

impl TerrainQuery for OpenTerrain {
    fn find_safe_position(
        &self,
        center: Position,
        min_radius: f64,
        max_radius: f64,
        rng: &mut ChaCha8Rng,
    ) -> Option<Position> {
        let min_radius = min_radius.max(0.0);
        let max_radius = max_radius.max(min_radius);

        for _ in 0..SEARCH_ATTEMPTS {
            let bearing: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
            let range = if max_radius > min_radius {
                rng.gen_range(min_radius..max_radius)
            } else {
                min_radius
            };
            // Bearing is measured from North (y-axis) clockwise to East (x-axis).
            let offset = DVec2::new(bearing.sin(), bearing.cos()) * range;
            let candidate = Position::new(center.x + offset.x, center.y + offset.y, center.z);
            if !self.is_blocked(&candidate) {
                return Some(candidate);
            }
        }
        None
    }
}
