/*
 * World Module
 *
 * The World owns every boid, the parameters, the host-set predator point and
 * the render buffer. It is the only surface the host talks to:
 *
 * - construction (`new`, `with_config`, or the builder)
 * - `tick()` to advance one step
 * - read-back of the render buffer and dimensions
 * - one setter per parameter, effective from the next tick
 *
 * A tick computes every boid's next velocity against the pre-tick state
 * before applying any of them, then rewrites the render buffer in place.
 */

pub mod builder;

use log::{debug, trace};
use nannou::prelude::*;

use crate::boid::Boid;
use crate::influence::{self, InfluenceSource};
use crate::params::SimulationParams;
use crate::physics::{self, StepContext};
use crate::render_buffer::RenderBuffer;
use crate::spatial_grid::NeighborQuery;

pub use builder::{Preset, WorldBuilder};

// Below this many boids rayon's scheduling costs more than it saves
pub const PARALLEL_THRESHOLD: usize = 256;

pub struct World {
    width: u32,
    height: u32,
    boids: Vec<Boid>,
    params: SimulationParams,
    predator_location: Option<Point2>,
    neighbors: Box<dyn NeighborQuery>,
    render: RenderBuffer,
    parallel: bool,
    tick_count: u64,
    seed: u64,
    // Scratch reused across ticks
    positions: Vec<Point2>,
    sources: Vec<InfluenceSource>,
    next_velocities: Vec<Vec2>,
}

impl World {
    pub fn builder() -> WorldBuilder {
        WorldBuilder::default()
    }

    /// World with default parameters and a clock-derived seed.
    pub fn new(width: u32, height: u32, boid_count: usize) -> Self {
        Self::builder()
            .width(width)
            .height(height)
            .boid_count(boid_count)
            .build()
    }

    /// Fully parameterized construction. Values are taken as given; see
    /// [`SimulationParams::validate`] for the invariants they should satisfy.
    #[allow(clippy::too_many_arguments)]
    pub fn with_config(
        width: u32,
        height: u32,
        boid_count: usize,
        avoid_factor: f32,
        visible_range: f32,
        matching_factor: f32,
        turn_factor: f32,
        min_speed: f32,
        max_speed: f32,
        centering_factor: f32,
        protected_range: f32,
        predator_turn_factor: f32,
        predator_range: f32,
    ) -> Self {
        let params = SimulationParams {
            avoid_factor,
            visible_range,
            matching_factor,
            turn_factor,
            min_speed,
            max_speed,
            centering_factor,
            protected_range,
            predator_turn_factor,
            predator_range,
            ..SimulationParams::default()
        };

        Self::builder()
            .width(width)
            .height(height)
            .boid_count(boid_count)
            .params(params)
            .build()
    }

    pub(crate) fn from_parts(
        width: u32,
        height: u32,
        boids: Vec<Boid>,
        params: SimulationParams,
        neighbors: Box<dyn NeighborQuery>,
        parallel: bool,
        seed: u64,
    ) -> Self {
        debug!(
            "world created: {}x{}, {} boids ({} predators), seed {}",
            width,
            height,
            boids.len(),
            boids.iter().filter(|b| b.is_predator()).count(),
            seed
        );

        let render = RenderBuffer::new(&boids);
        let count = boids.len();

        Self {
            width,
            height,
            boids,
            params,
            predator_location: None,
            neighbors,
            render,
            parallel,
            tick_count: 0,
            seed,
            positions: Vec::with_capacity(count),
            sources: Vec::new(),
            next_velocities: Vec::with_capacity(count),
        }
    }

    /// Advance the simulation by one step.
    pub fn tick(&mut self) {
        let params = self.params.snapshot();

        self.positions.clear();
        self.positions.extend(self.boids.iter().map(|boid| boid.position));
        self.neighbors.rebuild(&self.positions, params.flock_reach());
        influence::collect_sources(self.predator_location, &self.boids, &params, &mut self.sources);

        let ctx = StepContext {
            boids: &self.boids,
            neighbors: self.neighbors.as_ref(),
            sources: &self.sources,
            params: &params,
            bounds: vec2(self.width as f32, self.height as f32),
        };
        let parallel = self.parallel && self.boids.len() >= PARALLEL_THRESHOLD;
        physics::compute_velocities(&ctx, &mut self.next_velocities, parallel);

        for (boid, &velocity) in self.boids.iter_mut().zip(&self.next_velocities) {
            boid.integrate(velocity);
        }

        self.render.write(&self.boids);
        self.tick_count += 1;
        trace!("tick {} done ({} boids, parallel: {})", self.tick_count, self.boids.len(), parallel);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn boid_count(&self) -> usize {
        self.boids.len()
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn predator_loc(&self) -> Option<Point2> {
        self.predator_location
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Packed `x0, y0, x1, y1, ...` positions as of the last tick.
    pub fn render_xy(&self) -> &[f32] {
        self.render.as_slice()
    }

    /// Raw pointer to the render buffer. Valid for the lifetime of the world;
    /// the buffer is never reallocated.
    pub fn render_xy_ptr(&self) -> *const f32 {
        self.render.as_ptr()
    }

    /// Always `2 * boid_count()`.
    pub fn render_xy_len(&self) -> usize {
        self.render.len()
    }

    // One role code per boid, same order as render_xy
    pub fn render_roles(&self) -> &[u8] {
        self.render.roles()
    }

    pub fn set_predator_loc(&mut self, x: f32, y: f32) {
        trace!("predator location set to ({x}, {y})");
        self.predator_location = Some(pt2(x, y));
    }

    pub fn clear_predator_loc(&mut self) {
        trace!("predator location cleared");
        self.predator_location = None;
    }

    /// Replace every parameter at once.
    pub fn set_params(&mut self, params: SimulationParams) {
        debug!("parameters replaced: {params:?}");
        self.params = params;
    }

    pub fn update_avoid_factor(&mut self, value: f32) {
        self.update("avoid_factor", value, |p| &mut p.avoid_factor);
    }

    pub fn update_visible_range(&mut self, value: f32) {
        self.update("visible_range", value, |p| &mut p.visible_range);
    }

    pub fn update_matching_factor(&mut self, value: f32) {
        self.update("matching_factor", value, |p| &mut p.matching_factor);
    }

    pub fn update_turn_factor(&mut self, value: f32) {
        self.update("turn_factor", value, |p| &mut p.turn_factor);
    }

    pub fn update_min_speed(&mut self, value: f32) {
        self.update("min_speed", value, |p| &mut p.min_speed);
    }

    pub fn update_max_speed(&mut self, value: f32) {
        self.update("max_speed", value, |p| &mut p.max_speed);
    }

    pub fn update_centering_factor(&mut self, value: f32) {
        self.update("centering_factor", value, |p| &mut p.centering_factor);
    }

    pub fn update_protected_range(&mut self, value: f32) {
        self.update("protected_range", value, |p| &mut p.protected_range);
    }

    pub fn update_predator_turn_factor(&mut self, value: f32) {
        self.update("predator_turn_factor", value, |p| &mut p.predator_turn_factor);
    }

    pub fn update_predator_range(&mut self, value: f32) {
        self.update("predator_range", value, |p| &mut p.predator_range);
    }

    pub fn update_edge_margin(&mut self, value: f32) {
        self.update("edge_margin", value, |p| &mut p.edge_margin);
    }

    fn update(&mut self, name: &str, value: f32, field: impl FnOnce(&mut SimulationParams) -> &mut f32) {
        let slot = field(&mut self.params);
        if *slot != value {
            debug!("{name}: {} -> {value}", *slot);
        }
        *slot = value;
    }
}
