use bevy_ecs::prelude::Resource;

/// Bookkeeping for [`spawn_wave_system`](crate::systems::waves::spawn_wave_system).
#[derive(Resource, Debug, Clone, Default)]
pub struct WaveState {
    /// World time, in seconds, of the next spawn.
    pub next_spawn: f32,
    /// Entrance the next enemy comes through.
    pub next_entrance: usize,
    pub spawned: u32,
}
