use bevy_ecs::prelude::Resource;

/// Simulation clock advanced once per tick by
/// [`update_world_time`](crate::systems::time::update_world_time).
///
/// Tower cooldowns and status effects read `elapsed`/`delta` from here
/// instead of wall time so the host controls pacing.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Scaled seconds since the world started.
    pub elapsed: f32,
    /// Scaled seconds covered by the current tick.
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Elapsed time in whole milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        (self.elapsed.max(0.0) * 1000.0) as u64
    }
}
