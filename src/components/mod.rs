//! ECS components for entities.
//!
//! Submodules overview:
//! - [`effector`] – effector tower blocks and how long their effects last
//! - [`enemy`] – enemy marker and path-following state
//! - [`health`] – hit points
//! - [`location`] – world-space position
//! - [`shrine`] – marker for the shrine at the centre of the field
//! - [`status`] – statuses effectors leave on enemies (slow, fire)
//! - [`targeter`] – targeter tower blocks and selection methods
//! - [`tower`] – tower composition and block back-references

pub mod effector;
pub mod enemy;
pub mod health;
pub mod location;
pub mod shrine;
pub mod status;
pub mod targeter;
pub mod tower;
