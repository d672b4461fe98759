//! Gameplay systems.
//!
//! Submodules overview
//! - [`effects`] – tick fire and slow statuses
//! - [`enemies`] – enemy paths, spawning bundles and movement
//! - [`field`] – shrine placement and the "field is active" run condition
//! - [`targeting`] – target selection and the tower firing system
//! - [`time`] – update simulation time and delta
//! - [`waves`] – spawn enemies at the entrances while the field is active

pub mod effects;
pub mod enemies;
pub mod field;
pub mod targeting;
pub mod time;
pub mod waves;
