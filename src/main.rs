/*
 * Boid Flocking Simulation
 *
 * Opens a window onto a flocking World. Boids follow separation, alignment
 * and cohesion, turn back at the world edges and flee the pointer, which acts
 * as a predator. Every coefficient can be tuned live from the control panel.
 *
 * Set RUST_LOG=debug to log parameter changes.
 */

use flocking::app;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    nannou::app(app::model).update(app::update).run();
}
