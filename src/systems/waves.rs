//! Enemy waves.
//!
//! While the field is active, one enemy is spawned every
//! `spawn_interval` seconds, cycling through the entrances in order.
//! Register with `.run_if(field_is_active)` so nothing spawns before the
//! player activates the field.

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::resources::defenceconfig::{DefenceConfig, MIN_SPAWN_INTERVAL};
use crate::resources::defencefield::DefenceField;
use crate::resources::wavestate::WaveState;
use crate::resources::worldtime::WorldTime;
use crate::systems::enemies::enemy_bundle;

/// Most enemies a single tick may spawn, however far behind the clock is.
pub const MAX_SPAWNS_PER_TICK: u32 = 8;

pub fn spawn_wave_system(
    world_time: Res<WorldTime>,
    config: Res<DefenceConfig>,
    field: Res<DefenceField>,
    mut wave: ResMut<WaveState>,
    mut commands: Commands,
) {
    let count = field.entrance_count();
    if count == 0 {
        warn!("Field has no entrances, nothing to spawn");
        return;
    }
    let interval = config.spawn_interval.max(MIN_SPAWN_INTERVAL);
    // Don't catch up on time spent before activation.
    if wave.next_spawn + interval < world_time.elapsed {
        wave.next_spawn = world_time.elapsed;
    }
    for _ in 0..MAX_SPAWNS_PER_TICK {
        if world_time.elapsed < wave.next_spawn {
            return;
        }
        let entrance = wave.next_entrance % count;
        let enemy = commands
            .spawn(enemy_bundle(
                &field,
                entrance as i32,
                config.enemy_health,
                config.enemy_speed,
            ))
            .id();
        debug!("Spawned enemy {:?} at entrance {}", enemy, entrance);

        wave.next_entrance = (entrance + 1) % count;
        wave.spawned += 1;
        wave.next_spawn += interval;
    }
    if world_time.elapsed >= wave.next_spawn {
        warn!(
            "Spawned {} enemies this tick and still behind, skipping ahead",
            MAX_SPAWNS_PER_TICK
        );
        wave.next_spawn = world_time.elapsed + interval;
    }
}
