/*
 * Renderer Module
 *
 * This module draws the simulation from the World's render buffer: the world
 * boundary, one dot per boid (predators in red), the pointer predator's
 * range, and the debug panel when enabled. It never reads boid state
 * directly.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::boid::Role;
use crate::ui;
use crate::BOID_SIZE;

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let camera = &model.camera;
    let world = &model.world;

    // Draw world boundary to show the simulation limits
    let top_left = camera.world_to_screen(vec2(0.0, 0.0), window_rect);
    let bottom_right = camera.world_to_screen(vec2(world.width() as f32, world.height() as f32), window_rect);
    let world_rect = Rect::from_corners(top_left, bottom_right);
    draw.rect()
        .xy(world_rect.xy())
        .wh(world_rect.wh())
        .no_fill()
        .stroke_weight(1.0)
        .stroke(rgba(0.3, 0.3, 0.3, 1.0));

    let radius = BOID_SIZE * camera.zoom;
    let predator_code = Role::Predator.code();
    for (xy, &role) in world.render_xy().chunks_exact(2).zip(world.render_roles()) {
        let screen = camera.world_to_screen(vec2(xy[0], xy[1]), window_rect);
        let color = if role == predator_code {
            rgb(0.9, 0.2, 0.2)
        } else {
            rgb(0.86, 0.86, 0.86)
        };
        draw.ellipse().xy(screen).radius(radius).color(color);
    }

    if let Some(predator) = world.predator_loc() {
        let screen = camera.world_to_screen(predator, window_rect);
        draw.ellipse()
            .xy(screen)
            .radius(world.params().predator_range * camera.zoom)
            .no_fill()
            .stroke_weight(1.0)
            .stroke(rgba(0.9, 0.2, 0.2, 0.6));
    }

    if model.panel.show_debug {
        let lines = model.debug_info.lines(world.boid_count(), world.tick_count());
        ui::draw_debug_info(&draw, &lines, window_rect);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        log::warn!("failed to draw frame: {err:?}");
    }

    if let Err(err) = model.egui.draw_to_frame(&frame) {
        log::warn!("failed to draw ui: {err:?}");
    }
}
