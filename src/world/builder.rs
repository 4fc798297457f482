/*
 * World Builder
 *
 * Chainable construction of a World: bounds, boid and predator counts,
 * parameters or a named preset, neighbor strategy, parallelism and the RNG
 * seed. Initial boids are spawned here from a seeded SmallRng unless the
 * caller supplies them.
 */

use log::warn;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::boid::{Boid, Role};
use crate::params::{ParamError, SimulationParams};
use crate::spatial_grid::NeighborStrategy;

use super::World;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// The stock coefficients.
    Classic,
    /// Strong centering and weak avoidance: dense, ball-like flocks.
    Tight,
    /// Wide personal space and little centering: loose, drifting flocks.
    Loose,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Classic, Preset::Tight, Preset::Loose];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Classic => "Classic",
            Preset::Tight => "Tight",
            Preset::Loose => "Loose",
        }
    }

    pub fn params(self) -> SimulationParams {
        let classic = SimulationParams::default();
        match self {
            Preset::Classic => classic,
            Preset::Tight => SimulationParams {
                avoid_factor: 0.03,
                centering_factor: 0.005,
                matching_factor: 0.08,
                protected_range: 6.0,
                ..classic
            },
            Preset::Loose => SimulationParams {
                avoid_factor: 0.08,
                centering_factor: 0.0002,
                matching_factor: 0.02,
                protected_range: 20.0,
                visible_range: 60.0,
                ..classic
            },
        }
    }
}

pub struct WorldBuilder {
    width: u32,
    height: u32,
    boid_count: usize,
    predator_count: usize,
    params: SimulationParams,
    seed: Option<u64>,
    strategy: NeighborStrategy,
    parallel: bool,
    boids: Option<Vec<Boid>>,
}

impl Default for WorldBuilder {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            boid_count: 200,
            predator_count: 0,
            params: SimulationParams::default(),
            seed: None,
            strategy: NeighborStrategy::Auto,
            parallel: false,
            boids: None,
        }
    }
}

impl WorldBuilder {
    pub fn from_preset(preset: Preset) -> Self {
        Self::default().params(preset.params())
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// Total number of boids, predators included.
    pub fn boid_count(mut self, count: usize) -> Self {
        self.boid_count = count;
        self
    }

    /// How many of the boids are predators. They are placed after the normal
    /// boids, and never exceed `boid_count`.
    pub fn predator_count(mut self, count: usize) -> Self {
        self.predator_count = count;
        self
    }

    pub fn params(mut self, params: SimulationParams) -> Self {
        self.params = params;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn neighbor_strategy(mut self, strategy: NeighborStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Start from these exact boids instead of random ones. Overrides
    /// `boid_count` and `predator_count`.
    pub fn boids(mut self, boids: Vec<Boid>) -> Self {
        self.boids = Some(boids);
        self
    }

    /// Build without checking the parameters.
    pub fn build(self) -> World {
        let seed = self.seed.unwrap_or_else(clock_seed);
        let (width, height) = (self.width as f32, self.height as f32);

        let boids = match self.boids {
            Some(boids) => boids,
            None => {
                let mut rng = SmallRng::seed_from_u64(seed);
                let predators = self.predator_count.min(self.boid_count);
                if predators < self.predator_count {
                    warn!(
                        "predator_count {} exceeds boid_count {}, using {}",
                        self.predator_count, self.boid_count, predators
                    );
                }
                let normal = self.boid_count - predators;

                (0..self.boid_count)
                    .map(|index| {
                        let role = if index < normal { Role::Normal } else { Role::Predator };
                        Boid::random(&mut rng, width, height, self.params.min_speed, self.params.max_speed, role)
                    })
                    .collect()
            }
        };

        let neighbors = self.strategy.build(width, height, boids.len());
        World::from_parts(self.width, self.height, boids, self.params, neighbors, self.parallel, seed)
    }

    /// Build only if the parameters pass [`SimulationParams::validate`].
    pub fn try_build(self) -> Result<World, ParamError> {
        self.params.validate()?;
        Ok(self.build())
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0x5EED_B01D)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_expected_number_of_boids() {
        for count in [0, 1, 100] {
            let world = WorldBuilder::default().boid_count(count).seed(5).build();
            assert_eq!(count, world.boid_count());
            assert_eq!(count * 2, world.render_xy_len());
        }
    }

    #[test]
    fn predators_come_last() {
        let world = WorldBuilder::default()
            .boid_count(10)
            .predator_count(3)
            .seed(8)
            .build();
        let roles: Vec<Role> = world.boids().iter().map(|b| b.role).collect();
        assert!(roles[..7].iter().all(|&r| r == Role::Normal));
        assert!(roles[7..].iter().all(|&r| r == Role::Predator));
    }

    #[test]
    fn predator_count_is_capped_by_boid_count() {
        let world = WorldBuilder::default()
            .boid_count(2)
            .predator_count(5)
            .seed(8)
            .build();
        assert_eq!(2, world.boid_count());
        assert!(world.boids().iter().all(Boid::is_predator));
    }

    #[test]
    fn explicit_boids_override_the_count() {
        let world = WorldBuilder::default()
            .boid_count(50)
            .boids(vec![Boid::new(1.0, 1.0, 1.0, 0.0), Boid::predator(2.0, 2.0, 0.0, 1.0)])
            .build();
        assert_eq!(2, world.boid_count());
        assert_eq!(&[1.0f32, 1.0, 2.0, 2.0][..], world.render_xy());
        assert_eq!(&[0u8, 1][..], world.render_roles());
    }

    #[test]
    fn try_build_rejects_invalid_parameters() {
        let params = SimulationParams {
            min_speed: 4.0,
            max_speed: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            WorldBuilder::default().params(params).try_build(),
            Err(ParamError::InvertedSpeedBounds { .. })
        ));
        assert!(WorldBuilder::from_preset(Preset::Loose).try_build().is_ok());
    }

    #[test]
    fn presets_are_valid() {
        for preset in Preset::ALL {
            assert_eq!(Ok(()), preset.params().validate(), "{}", preset.name());
        }
    }

    #[test]
    fn seed_is_recorded() {
        let world = WorldBuilder::default().seed(1234).boid_count(1).build();
        assert_eq!(1234, world.seed());
    }
}
