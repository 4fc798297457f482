/*
 * Influence Module
 *
 * Predators reach the steering rules through a single concept: an influence
 * source with a position, a range and a signed weight. The host-driven
 * predator point is a source with no boid behind it; every predator-role
 * boid contributes one more. Positive weights repel, negative weights attract.
 */

use nannou::prelude::*;

use crate::boid::Boid;
use crate::params::ParamSnapshot;
use crate::vector::SteeringExt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InfluenceSource {
    pub position: Point2,
    pub range: f32,
    pub weight: f32,
    // Index of the boid this source stands for, so it does not act on itself
    pub boid: Option<usize>,
}

impl InfluenceSource {
    pub fn repeller(position: Point2, range: f32, strength: f32) -> Self {
        Self {
            position,
            range,
            weight: strength,
            boid: None,
        }
    }

    pub fn attractor(position: Point2, range: f32, strength: f32) -> Self {
        Self {
            position,
            range,
            weight: -strength,
            boid: None,
        }
    }

    pub fn from_boid(mut self, index: usize) -> Self {
        self.boid = Some(index);
        self
    }

    /// Force this source exerts on a boid at `position`.
    ///
    /// Zero outside the range; inside it, a unit vector away from the source
    /// scaled by the weight.
    pub fn force_on(&self, position: Point2) -> Vec2 {
        if position.distance_squared(self.position) < self.range * self.range {
            position.away_from(self.position) * self.weight
        } else {
            Vec2::ZERO
        }
    }
}

// Rebuild the per-tick source list from the host point and the predator boids
pub fn collect_sources(
    predator_location: Option<Point2>,
    boids: &[Boid],
    params: &ParamSnapshot,
    sources: &mut Vec<InfluenceSource>,
) {
    sources.clear();

    if let Some(location) = predator_location {
        sources.push(InfluenceSource::repeller(
            location,
            params.predator_range,
            params.predator_turn_factor,
        ));
    }

    sources.extend(boids.iter().enumerate().filter(|(_, boid)| boid.is_predator()).map(
        |(index, boid)| {
            InfluenceSource::repeller(boid.position, params.predator_range, params.predator_turn_factor)
                .from_boid(index)
        },
    ));
}
