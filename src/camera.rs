/*
 * Camera Module
 *
 * Maps between world space (origin top-left, y down, as the engine sees it)
 * and nannou's window space (origin at the window centre, y up). The whole
 * world is always in view; the camera only scales it to fit the window.
 */

use nannou::prelude::*;

pub struct Camera {
    pub world_size: Vec2,
    pub zoom: f32,
}

impl Camera {
    pub fn new(world_width: u32, world_height: u32) -> Self {
        Self {
            world_size: vec2(world_width as f32, world_height as f32),
            zoom: 1.0,
        }
    }

    // Scale so the (width + 1) x (height + 1) drawing surface fills the window
    pub fn fit(&mut self, window_rect: Rect) {
        let surface = self.world_size + Vec2::ONE;
        let zoom = f32::min(window_rect.w() / surface.x, window_rect.h() / surface.y);
        if zoom.is_finite() && zoom > 0.0 {
            self.zoom = zoom;
        }
    }

    // Convert a point from world space to screen space
    pub fn world_to_screen(&self, point: Vec2, window_rect: Rect) -> Vec2 {
        let half = self.world_size / 2.0;
        vec2(point.x - half.x, half.y - point.y) * self.zoom + window_rect.xy()
    }

    // Convert a point from screen space to world space
    pub fn screen_to_world(&self, point: Vec2, window_rect: Rect) -> Vec2 {
        let half = self.world_size / 2.0;
        let centered = (point - window_rect.xy()) / self.zoom;
        vec2(centered.x + half.x, half.y - centered.y)
    }
}
