/*
 * Application Module
 *
 * This module defines the viewer's model and its per-frame update. The
 * viewer is a host for World and nothing more: it forwards slider edits and
 * the pointer position through World's setters, calls tick() once per frame
 * and draws whatever the render buffer holds afterwards.
 */

use nannou::prelude::*;
use nannou_egui::Egui;
use std::time::Instant;

use crate::camera::Camera;
use crate::debug::DebugInfo;
use crate::input;
use crate::renderer;
use crate::ui::{self, ControlPanel};
use crate::world::World;
use crate::{DEFAULT_BOID_COUNT, WORLD_HEIGHT, WORLD_WIDTH};

// Main model for the application
pub struct Model {
    pub world: World,
    pub egui: Egui,
    pub camera: Camera,
    pub panel: ControlPanel,
    pub debug_info: DebugInfo,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let world = World::builder()
        .width(WORLD_WIDTH)
        .height(WORLD_HEIGHT)
        .boid_count(DEFAULT_BOID_COUNT)
        .predator_count(2)
        .parallel(true)
        .build();
    log::info!(
        "starting viewer: {}x{} world, {} boids, seed {}",
        world.width(),
        world.height(),
        world.boid_count(),
        world.seed()
    );

    // The drawing surface is one pixel larger than the world on each axis
    let window_id = app
        .new_window()
        .title("Boid Flocking Simulation")
        .size(world.width() + 1, world.height() + 1)
        .view(renderer::view)
        .mouse_moved(input::mouse_moved)
        .mouse_exited(input::mouse_exited)
        .resized(input::resized)
        .raw_event(input::raw_window_event)
        .build()
        .expect("failed to create the main window");

    let window = app.window(window_id).expect("main window closed during setup");
    let egui = Egui::from_window(&window);

    let mut camera = Camera::new(world.width(), world.height());
    camera.fit(window.rect());

    let panel = ControlPanel::from_params(world.params());

    Model {
        world,
        egui,
        camera,
        panel,
        debug_info: DebugInfo::default(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;
    model.egui.set_elapsed_time(update.since_start);

    let actions = ui::update_ui(&mut model.egui, &mut model.panel, &model.debug_info);

    if let Some(preset) = actions.preset {
        log::info!("loading preset {}", preset.name());
        model.world.set_params(preset.params());
        model.panel.load(model.world.params());
    }
    ui::sync_world(&model.panel, &mut model.world);

    model.debug_info.ticks_this_frame = 0;
    if !model.panel.paused || actions.step {
        let started = Instant::now();
        model.world.tick();
        model.debug_info.tick_time = started.elapsed();
        model.debug_info.ticks_this_frame = 1;
    }
}
