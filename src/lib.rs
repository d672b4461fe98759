//! Gooey Defence library.
//!
//! Tower defence gameplay for a voxel sandbox: a domed field with a central
//! shrine and evenly spaced entrances, enemies walking in from the
//! entrances, and towers made of targeter and effector blocks. Everything is
//! exposed as `bevy_ecs` components, resources, systems and observers for a
//! host to register; [`game`] wires them into a ready-made world and
//! schedule.

pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
pub mod worldgen;
