//! Status effect ticking.
//!
//! [`OnFire`] deals its damage per second through
//! [`DamageEntityEvent`] and goes out once every fire on the enemy has run
//! its course. [`Slowed`] entries are refreshed by the ice shots that keep
//! hitting and fall off one by one once their effector stops.
//!
//! Both count down with the already scaled
//! [`WorldTime::delta`](crate::resources::worldtime::WorldTime).

use bevy_ecs::prelude::*;

use crate::components::status::{OnFire, Slowed};
use crate::events::health::DamageEntityEvent;
use crate::resources::worldtime::WorldTime;

pub fn burn_system(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut OnFire)>,
    mut commands: Commands,
) {
    for (entity, mut fire) in query.iter_mut() {
        let damage = fire.burn(world_time.delta);
        if damage > 0 {
            commands.trigger(DamageEntityEvent {
                entity,
                damage,
                source: None,
            });
        }
        if fire.is_out() {
            commands.entity(entity).try_remove::<OnFire>();
        }
    }
}

pub fn slow_expiry_system(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Slowed)>,
    mut commands: Commands,
) {
    for (entity, mut slowed) in query.iter_mut() {
        slowed.tick(world_time.delta);
        if slowed.is_expired() {
            commands.entity(entity).try_remove::<Slowed>();
        }
    }
}
