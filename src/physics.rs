/*
 * Physics Module
 *
 * This module holds the steering rule set. Each boid's velocity change for a
 * tick is the plain sum of independent terms:
 *
 * 1. Separation: push away from boids inside the protected range
 * 2. Alignment: match the average velocity of visible flockmates
 * 3. Cohesion: drift towards the centroid of visible flockmates
 * 4. Predator avoidance: flee every influence source in range
 * 5. Hunting: predators chase the nearest normal boid in range
 * 6. Boundary turning: steer back in near the world edges
 *
 * Every term reads only the pre-tick state held in StepContext, so the terms
 * commute and every boid can be computed independently, in parallel if the
 * caller wants. The resulting velocity is then speed-clamped.
 *
 * Optimized for performance by:
 * - Gathering separation, alignment and cohesion sums in one neighbor pass
 * - Using squared distances for every range check
 */

use nannou::prelude::*;
use rayon::prelude::*;

use crate::boid::Boid;
use crate::influence::InfluenceSource;
use crate::params::ParamSnapshot;
use crate::spatial_grid::NeighborQuery;
use crate::vector::{mean, SteeringExt};

// Read-only view of one tick's starting state
pub struct StepContext<'a> {
    pub boids: &'a [Boid],
    pub neighbors: &'a dyn NeighborQuery,
    pub sources: &'a [InfluenceSource],
    pub params: &'a ParamSnapshot,
    pub bounds: Vec2,
}

/// Accumulated neighbor data for one boid.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NeighborSums {
    // Sum of (self - other) over boids strictly inside the protected range
    pub close_offset: Vec2,
    pub velocity_sum: Vec2,
    pub position_sum: Vec2,
    pub flockmates: usize,
}

pub fn gather_neighbors(ctx: &StepContext, index: usize) -> NeighborSums {
    let mut sums = NeighborSums::default();
    let Some(boid) = ctx.boids.get(index) else {
        return sums;
    };

    let protected_sq = ctx.params.protected_range_sq();
    let visible_sq = ctx.params.visible_range_sq();
    let flocks = !boid.is_predator();

    ctx.neighbors.for_each_within(index, ctx.params.flock_reach(), &mut |other, distance_sq| {
        // Coincident boids have no direction to act along
        if distance_sq == 0.0 {
            return;
        }
        let Some(neighbor) = ctx.boids.get(other) else {
            return;
        };

        if distance_sq < protected_sq {
            sums.close_offset += boid.position - neighbor.position;
        }

        if flocks && !neighbor.is_predator() && distance_sq < visible_sq {
            sums.velocity_sum += neighbor.velocity;
            sums.position_sum += neighbor.position;
            sums.flockmates += 1;
        }
    });

    sums
}

#[inline]
pub fn separation(sums: &NeighborSums, params: &ParamSnapshot) -> Vec2 {
    sums.close_offset * params.avoid_factor
}

pub fn alignment(boid: &Boid, sums: &NeighborSums, params: &ParamSnapshot) -> Vec2 {
    if sums.flockmates == 0 {
        return Vec2::ZERO;
    }
    (mean(sums.velocity_sum, sums.flockmates) - boid.velocity) * params.matching_factor
}

pub fn cohesion(boid: &Boid, sums: &NeighborSums, params: &ParamSnapshot) -> Vec2 {
    if sums.flockmates == 0 {
        return Vec2::ZERO;
    }
    (mean(sums.position_sum, sums.flockmates) - boid.position) * params.centering_factor
}

// Predators are exempt; a predator boid's own source never acts on it
pub fn predator_avoidance(boid: &Boid, index: usize, sources: &[InfluenceSource]) -> Vec2 {
    if boid.is_predator() {
        return Vec2::ZERO;
    }

    sources
        .iter()
        .filter(|source| source.boid != Some(index))
        .fold(Vec2::ZERO, |total, source| total + source.force_on(boid.position))
}

/// Inverted avoidance for predator boids: steer towards the nearest normal
/// boid strictly inside `predator_range`, the same reach the pull itself
/// uses. Ties go to the lower index.
pub fn hunting(ctx: &StepContext, index: usize) -> Vec2 {
    let Some(boid) = ctx.boids.get(index) else {
        return Vec2::ZERO;
    };
    if !boid.is_predator() {
        return Vec2::ZERO;
    }

    let range_sq = ctx.params.predator_range_sq();
    let mut nearest: Option<(f32, usize)> = None;
    ctx.neighbors.for_each_within(index, ctx.params.predator_range, &mut |other, distance_sq| {
        let is_prey = ctx.boids.get(other).is_some_and(|b| !b.is_predator());
        if !is_prey || distance_sq >= range_sq {
            return;
        }
        let closer = match nearest {
            None => true,
            Some((best_sq, best)) => distance_sq < best_sq || (distance_sq == best_sq && other < best),
        };
        if closer {
            nearest = Some((distance_sq, other));
        }
    });

    match nearest {
        Some((_, prey)) => InfluenceSource::attractor(
            ctx.boids[prey].position,
            ctx.params.predator_range,
            ctx.params.predator_turn_factor,
        )
        .force_on(boid.position),
        None => Vec2::ZERO,
    }
}

pub fn boundary_turning(position: Point2, bounds: Vec2, params: &ParamSnapshot) -> Vec2 {
    let margin = params.edge_margin;
    let turn = params.turn_factor;
    let mut steer = Vec2::ZERO;

    if position.x < margin {
        steer.x += turn;
    }
    if position.x > bounds.x - margin {
        steer.x -= turn;
    }
    if position.y < margin {
        steer.y += turn;
    }
    if position.y > bounds.y - margin {
        steer.y -= turn;
    }

    steer
}

// Sum of every steering term for one boid
pub fn steering(ctx: &StepContext, index: usize) -> Vec2 {
    let Some(boid) = ctx.boids.get(index) else {
        return Vec2::ZERO;
    };
    let sums = gather_neighbors(ctx, index);

    separation(&sums, ctx.params)
        + alignment(boid, &sums, ctx.params)
        + cohesion(boid, &sums, ctx.params)
        + predator_avoidance(boid, index, ctx.sources)
        + hunting(ctx, index)
        + boundary_turning(boid.position, ctx.bounds, ctx.params)
}

pub fn next_velocity(ctx: &StepContext, index: usize) -> Vec2 {
    let Some(boid) = ctx.boids.get(index) else {
        return Vec2::ZERO;
    };
    (boid.velocity + steering(ctx, index)).clamp_speed(ctx.params.min_speed, ctx.params.max_speed)
}

/// Compute every boid's next velocity into `out`, indexed like `ctx.boids`.
///
/// Nothing is written back to the boids here; the caller applies `out` once
/// all of it is known. The parallel and sequential paths run the same
/// per-boid function and produce identical results.
pub fn compute_velocities(ctx: &StepContext, out: &mut Vec<Vec2>, parallel: bool) {
    if parallel {
        (0..ctx.boids.len())
            .into_par_iter()
            .map(|index| next_velocity(ctx, index))
            .collect_into_vec(out);
    } else {
        out.clear();
        out.extend((0..ctx.boids.len()).map(|index| next_velocity(ctx, index)));
    }
}
