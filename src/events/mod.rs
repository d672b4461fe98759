//! Event types and observers used by the module.
//!
//! Submodules:
//! - [`combat`] – effect application requests and the per-effector observers
//! - [`field`] – activation of the defence field
//! - [`health`] – damage delivery and death notifications
//!
//! [`register_observers`] installs every observer in this module on a world.
use bevy_ecs::prelude::*;

pub mod combat;
pub mod field;
pub mod health;

/// Add all gameplay observers to `world`.
pub fn register_observers(world: &mut World) {
    world.add_observer(combat::observe_damage_effector);
    world.add_observer(combat::observe_ice_effector);
    world.add_observer(combat::observe_fire_effector);
    world.add_observer(health::observe_damage);
    world.add_observer(field::observe_activate_field);
}
