/*
 * Input Module
 *
 * This module handles window events for the viewer. The pointer is the
 * predator: while it is over the world (and not over the control panel) its
 * world-space position is handed to World::set_predator_loc; when it leaves
 * the window the predator point is cleared.
 */

use nannou::prelude::*;

use crate::app::Model;

// Mouse moved event handler
pub fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    if model.egui.ctx().is_pointer_over_area() {
        model.world.clear_predator_loc();
        return;
    }

    let world_pos = model.camera.screen_to_world(pos, app.window_rect());
    model.world.set_predator_loc(world_pos.x, world_pos.y);
}

// Mouse left the window
pub fn mouse_exited(_app: &App, model: &mut Model) {
    model.world.clear_predator_loc();
}

// Window resized: refit the world to the new window
pub fn resized(app: &App, model: &mut Model, _size: Vec2) {
    model.camera.fit(app.window_rect());
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
