/*
 * Debug Information Module
 *
 * Frame and tick metrics shown in the viewer's debug panel.
 */

use std::time::Duration;

#[derive(Debug, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    // Wall time of the last World::tick call
    pub tick_time: Duration,
    pub ticks_this_frame: usize,
}

impl DebugInfo {
    pub fn lines(&self, boid_count: usize, tick_count: u64) -> [String; 5] {
        [
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Tick time: {:.3} ms", self.tick_time.as_secs_f64() * 1000.0),
            format!("Boids: {boid_count}"),
            format!("Ticks: {tick_count} (+{})", self.ticks_this_frame),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_format_the_metrics() {
        let info = DebugInfo {
            fps: 59.94,
            frame_time: Duration::from_micros(16_700),
            tick_time: Duration::from_micros(250),
            ticks_this_frame: 1,
        };
        let lines = info.lines(600, 42);
        assert_eq!("FPS: 59.9", lines[0]);
        assert_eq!("Frame time: 16.70 ms", lines[1]);
        assert_eq!("Tick time: 0.250 ms", lines[2]);
        assert_eq!("Boids: 600", lines[3]);
        assert_eq!("Ticks: 42 (+1)", lines[4]);
    }
}
