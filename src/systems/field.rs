//! Field setup and run conditions.

use bevy_ecs::prelude::*;
use glam::IVec3;
use log::info;

use crate::components::health::Health;
use crate::components::location::Location;
use crate::components::shrine::Shrine;
use crate::resources::blockentities::BlockEntities;
use crate::resources::defencefield::DefenceField;

/// Hit points of a freshly placed shrine.
pub const SHRINE_HEALTH: i32 = 20;

/// Run condition: true once the field has been activated.
pub fn field_is_active(field: Option<Res<DefenceField>>) -> bool {
    field.is_some_and(|f| f.is_field_activated())
}

/// Spawn the shrine entity and register it under every shrine block.
pub fn setup_shrine(
    mut commands: Commands,
    field: Res<DefenceField>,
    mut registry: ResMut<BlockEntities>,
) {
    let anchor = field.field_centre() + field.shrine_block().unwrap_or(IVec3::ZERO);
    let shrine = commands
        .spawn((Shrine, Location::of_block(anchor), Health::new(SHRINE_HEALTH)))
        .id();
    for block in field.shrine() {
        registry.insert(field.field_centre() + *block, shrine);
    }
    info!("Placed shrine {:?} over {} blocks", shrine, field.shrine().len());
}
