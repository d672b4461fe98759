//! ECS resources made available to systems.
//!
//! Overview
//! - `blockentities` – block position to entity lookup (the shrine, tower blocks)
//! - `defenceconfig` – tunables loaded from an INI file
//! - `defencefield` – field geometry and the activation latch
//! - `targetrng` – seeded random source for random targeting
//! - `wavestate` – enemy spawn bookkeeping
//! - `worldtime` – simulation time and delta
pub mod blockentities;
pub mod defenceconfig;
pub mod defencefield;
pub mod targetrng;
pub mod wavestate;
pub mod worldtime;
