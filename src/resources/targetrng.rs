use bevy_ecs::prelude::Resource;

/// Random source for [`SelectionMethod::Random`] targeting.
///
/// Seeded from the configuration so a replayed world picks the same enemies.
///
/// [`SelectionMethod::Random`]: crate::components::targeter::SelectionMethod::Random
#[derive(Resource, Debug, Clone)]
pub struct TargetRng(pub fastrand::Rng);

impl TargetRng {
    pub fn with_seed(seed: u64) -> Self {
        TargetRng(fastrand::Rng::with_seed(seed))
    }
}

impl Default for TargetRng {
    fn default() -> Self {
        Self::with_seed(0)
    }
}
