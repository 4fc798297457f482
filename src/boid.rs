/*
 * Boid Module
 *
 * This module defines the Boid struct: one flocking agent with a position,
 * a per-tick velocity and a role. Normal boids flock with each other and
 * flee predators; predator boids ignore the flock rules and hunt.
 *
 * Steering itself lives in the physics module so that every boid of a tick
 * can be computed against the same read-only snapshot.
 */

use nannou::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Normal,
    Predator,
}

impl Role {
    // Compact code written into the render buffer's role array
    pub fn code(self) -> u8 {
        match self {
            Role::Normal => 0,
            Role::Predator => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Boid {
    pub position: Point2,
    pub velocity: Vec2,
    pub role: Role,
}

impl Boid {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32) -> Self {
        Self {
            position: pt2(x, y),
            velocity: vec2(vx, vy),
            role: Role::Normal,
        }
    }

    pub fn predator(x: f32, y: f32, vx: f32, vy: f32) -> Self {
        Self::new(x, y, vx, vy).with_role(Role::Predator)
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Random boid somewhere inside `[0, width] x [0, height]`, heading in a
    /// random direction at a speed drawn from `[min_speed, max_speed]`.
    ///
    /// Zero-extent axes place the boid at 0 and inverted speed bounds are
    /// reordered, so any input produces a boid.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        width: f32,
        height: f32,
        min_speed: f32,
        max_speed: f32,
        role: Role,
    ) -> Self {
        let x = random_coordinate(rng, width);
        let y = random_coordinate(rng, height);

        let slow = f32::min(min_speed, max_speed).max(0.0);
        let fast = f32::max(min_speed, max_speed).max(0.0);
        let speed = if slow < fast {
            rng.gen_range(slow..=fast)
        } else {
            slow
        };

        let heading = rng.gen_range(0.0..TAU);
        let velocity = vec2(heading.cos(), heading.sin()) * speed;

        Self {
            position: pt2(x, y),
            velocity,
            role,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    #[inline]
    pub fn is_predator(&self) -> bool {
        self.role == Role::Predator
    }

    // Take the velocity computed for this tick and move one unit of time along it
    #[inline]
    pub fn integrate(&mut self, velocity: Vec2) {
        self.velocity = velocity;
        self.position += velocity;
    }
}

fn random_coordinate<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> f32 {
    if extent > 0.0 {
        rng.gen_range(0.0..extent)
    } else {
        0.0
    }
}
