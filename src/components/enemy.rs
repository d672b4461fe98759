//! Enemy marker and path-following state.
//!
//! Enemies walk a precomputed list of waypoints from an entrance towards the
//! shrine. `step` is the index of the waypoint most recently reached and is
//! what "first" targeting compares: the larger the step, the closer the
//! enemy is to the shrine.
//!
//! # Related
//!
//! - [`crate::systems::enemies`] – spawning and movement
//! - [`crate::systems::targeting::SelectionMethod::First`] – uses [`PathFollower::step`]

use bevy_ecs::prelude::Component;
use glam::Vec3;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Enemy;

#[derive(Component, Clone, Debug)]
pub struct PathFollower {
    /// Waypoints in world space, entrance first.
    pub path: Vec<Vec3>,
    /// Index of the last waypoint reached.
    pub step: usize,
    /// Distance travelled past `path[step]` towards `path[step + 1]`.
    pub progress: f32,
    /// Blocks per second before any status modifiers.
    pub speed: f32,
}

impl PathFollower {
    pub fn new(path: Vec<Vec3>, speed: f32) -> Self {
        PathFollower {
            path,
            step: 0,
            progress: 0.0,
            speed,
        }
    }

    /// True once the last waypoint has been reached.
    pub fn finished(&self) -> bool {
        self.step + 1 >= self.path.len()
    }

    /// Current interpolated position on the path.
    pub fn position(&self) -> Vec3 {
        match (self.path.get(self.step), self.path.get(self.step + 1)) {
            (Some(from), Some(to)) => {
                let segment = from.distance(*to);
                if segment <= f32::EPSILON {
                    *from
                } else {
                    from.lerp(*to, (self.progress / segment).min(1.0))
                }
            }
            (Some(from), None) => *from,
            _ => Vec3::ZERO,
        }
    }

    /// Move `distance` blocks along the path, crossing as many waypoints as
    /// needed. Stops at the final waypoint.
    pub fn advance(&mut self, distance: f32) {
        let mut remaining = self.progress + distance.max(0.0);
        while let (Some(from), Some(to)) = (self.path.get(self.step), self.path.get(self.step + 1)) {
            let segment = from.distance(*to);
            if remaining < segment {
                self.progress = remaining;
                return;
            }
            remaining -= segment;
            self.step += 1;
        }
        self.progress = 0.0;
    }
}
