use bevy_ecs::prelude::Component;

/// Marker for the shrine block entity at the centre of the field.
///
/// Enemies that reach the end of their path hurt the entity carrying this.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Shrine;
