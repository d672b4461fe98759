//! Field activation.
//!
//! The field starts dormant. The host triggers [`ActivateFieldEvent`] when
//! the player starts the game (typically by interacting with the shrine);
//! [`observe_activate_field`] latches
//! [`DefenceField::set_field_activated`]. Wave spawning is gated on that
//! flag through [`crate::systems::field::field_is_active`].

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::resources::defencefield::DefenceField;

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ActivateFieldEvent {}

pub fn observe_activate_field(_trigger: On<ActivateFieldEvent>, mut field: ResMut<DefenceField>) {
    if field.is_field_activated() {
        debug!("Field already active");
        return;
    }
    field.set_field_activated();
    info!(
        "Defence field activated: {} entrances, radius {}",
        field.entrance_count(),
        field.outer_ring_size()
    );
}
