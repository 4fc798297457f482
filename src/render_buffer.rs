/*
 * Render Buffer Module
 *
 * A packed x0, y0, x1, y1, ... array of boid positions that the host reads
 * after every tick. It is allocated once for the lifetime of the world and
 * overwritten in place, so the host can keep a pointer to it between frames.
 * A parallel role array lets the host tell predators apart without touching
 * boid state.
 */

use crate::boid::Boid;

#[derive(Debug, Clone)]
pub struct RenderBuffer {
    xy: Vec<f32>,
    roles: Vec<u8>,
}

impl RenderBuffer {
    pub fn new(boids: &[Boid]) -> Self {
        let mut buffer = Self {
            xy: vec![0.0; boids.len() * 2],
            roles: vec![0; boids.len()],
        };
        buffer.write(boids);
        buffer
    }

    // Overwrite in place from the boids' current state
    pub fn write(&mut self, boids: &[Boid]) {
        for (slot, boid) in self.xy.chunks_exact_mut(2).zip(boids) {
            slot[0] = boid.position.x;
            slot[1] = boid.position.y;
        }
        for (slot, boid) in self.roles.iter_mut().zip(boids) {
            *slot = boid.role.code();
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.xy
    }

    pub fn as_ptr(&self) -> *const f32 {
        self.xy.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.xy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xy.is_empty()
    }

    pub fn roles(&self) -> &[u8] {
        &self.roles
    }
}
