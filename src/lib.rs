/*
 * Boid Flocking Engine - Module Definitions
 *
 * This file defines the module structure of the crate. The engine modules
 * (vector, boid, params, spatial_grid, influence, physics, render_buffer,
 * world) have no windowing code in them; the viewer modules (app, camera,
 * ui, input, renderer, debug) are a thin nannou host on top of World.
 */

// Re-export key components for easier access
pub use boid::{Boid, Role};
pub use influence::InfluenceSource;
pub use params::{ParamError, ParamSnapshot, SimulationParams};
pub use render_buffer::RenderBuffer;
pub use spatial_grid::{BruteForce, NeighborQuery, NeighborStrategy, SpatialGrid};
pub use world::{Preset, World, WorldBuilder};
pub use app::Model;

// Engine
pub mod vector;
pub mod boid;
pub mod params;
pub mod spatial_grid;
pub mod influence;
pub mod physics;
pub mod render_buffer;
pub mod world;

// Viewer
pub mod app;
pub mod camera;
pub mod debug;
pub mod input;
pub mod renderer;
pub mod ui;

// Constants
pub const BOID_SIZE: f32 = 3.0;
pub const WORLD_WIDTH: u32 = 1000;
pub const WORLD_HEIGHT: u32 = 700;
pub const DEFAULT_BOID_COUNT: usize = 600;
