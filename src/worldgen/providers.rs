//! Facet providers.

use glam::{IVec2, IVec3};

use super::Region;
use super::facet::{BooleanFieldFacet2D, DefenceFieldFacet};
use super::noise::WhiteNoise;
use crate::resources::defencefield::DefenceField;

/// Scatters filler columns inside the dome.
///
/// A column qualifies when it is outside the shrine's clear zone, inside the
/// dome and clear of every entrance; it is then filled when its rescaled
/// noise value falls under `threshold`.
#[derive(Debug, Clone)]
pub struct RandomFillingProvider {
    field: DefenceField,
    noise: WhiteNoise,
    threshold: f64,
}

impl RandomFillingProvider {
    pub fn new(field: DefenceField, threshold: f64) -> Self {
        RandomFillingProvider {
            field,
            noise: WhiteNoise::new(0),
            threshold,
        }
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.noise = WhiteNoise::new(seed);
    }

    pub fn process(&self, region: &Region) -> BooleanFieldFacet2D {
        let mut facet = BooleanFieldFacet2D::new(region);
        let shrine_ring = f64::from(self.field.shrine_ring_size());
        let outer_ring = f64::from(self.field.outer_ring_size());
        for column in region.columns() {
            let distance = column.as_dvec2().length();
            if distance > shrine_ring
                && distance < outer_ring
                && !self.field.in_range_of_entrance(IVec3::new(column.x, 0, column.y))
                && (self.noise.noise(column.x, column.y) + 1.0) / 2.0 < self.threshold
            {
                facet.set_world(column.x, column.y, true);
            }
        }
        facet
    }
}

/// Computes the dome.
///
/// The dome is the shell of blocks whose rounded distance to the centre
/// equals the outer ring size, from ground level up. Blocks inside an
/// entrance's clear zone are left out to open the entrance, and each opening
/// gets a smaller shell of radius `entrance_ring_size` on the outside of the
/// dome.
#[derive(Debug, Clone)]
pub struct DefenceFieldProvider {
    field: DefenceField,
}

impl DefenceFieldProvider {
    pub fn new(field: DefenceField) -> Self {
        DefenceFieldProvider { field }
    }

    /// Whether `pos` belongs to the dome or an entrance hood.
    pub fn is_dome_block(&self, pos: IVec3) -> bool {
        if pos.y < 0 {
            return false;
        }
        let centre = self.field.field_centre().as_dvec3();
        let distance = pos.as_dvec3().distance(centre);
        let outer = self.field.outer_ring_size();
        if distance.round() as i32 == outer {
            return !self.field.in_range_of_entrance(pos);
        }
        let entrance_distance = self.field.distance_to_nearest_entrance(pos);
        entrance_distance >= 0.0
            && distance > f64::from(outer)
            && entrance_distance.round() as i32 == self.field.entrance_ring_size()
    }

    pub fn process(&self, region: &Region) -> DefenceFieldFacet {
        let mut facet = DefenceFieldFacet::default();
        if !self.may_intersect(region) {
            return facet;
        }
        for pos in region.positions() {
            if self.is_dome_block(pos) {
                facet.set_world(pos, true);
            }
        }
        facet
    }

    /// Cheap rejection for regions far from the dome wall.
    fn may_intersect(&self, region: &Region) -> bool {
        let reach = f64::from(self.field.outer_ring_size() + 2 * self.field.entrance_ring_size() + 1);
        let centre = self.field.field_centre();
        let nearest = centre.clamp(region.min, region.max);
        let corners = [
            IVec2::new(region.min.x, region.min.z),
            IVec2::new(region.max.x, region.min.z),
            IVec2::new(region.min.x, region.max.z),
            IVec2::new(region.max.x, region.max.z),
        ];
        let farthest = corners
            .iter()
            .map(|c| IVec3::new(c.x, region.max.y.abs().max(region.min.y.abs()), c.y))
            .map(|c| (c - centre).as_dvec3().length())
            .fold(0.0, f64::max);
        let nearest = (nearest - centre).as_dvec3().length();
        region.max.y >= 0 && nearest <= reach && farthest >= f64::from(self.field.outer_ring_size()) - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filling_skips_shrine_zone_and_entrances() {
        let field = DefenceField::new();
        let mut provider = RandomFillingProvider::new(field.clone(), 1.0);
        provider.set_seed(3);
        let region = Region::new(IVec3::new(-70, 0, -70), IVec3::new(70, 0, 70));
        let facet = provider.process(&region);

        // With a threshold of 1 every eligible column is filled.
        assert!(facet.get_world(10, 10));
        assert!(!facet.get_world(0, 0));
        assert!(!facet.get_world(3, 3));
        assert!(!facet.get_world(65, 0));
        assert!(!facet.get_world(58, 0));
        assert!(facet.get_world(54, 0));
    }

    #[test]
    fn filling_threshold_zero_fills_nothing() {
        let provider = RandomFillingProvider::new(DefenceField::new(), 0.0);
        let region = Region::new(IVec3::new(-30, 0, -30), IVec3::new(30, 0, 30));
        assert_eq!(provider.process(&region).set_columns().count(), 0);
    }

    #[test]
    fn dome_shell_is_open_at_entrances() {
        let provider = DefenceFieldProvider::new(DefenceField::new());
        assert!(provider.is_dome_block(IVec3::new(0, 0, 60)));
        assert!(provider.is_dome_block(IVec3::new(0, 60, 0)));
        assert!(!provider.is_dome_block(IVec3::new(0, -60, 0)));
        assert!(!provider.is_dome_block(IVec3::new(0, 0, 30)));
        // Entrance 0 sits at (60, 0, 0).
        assert!(!provider.is_dome_block(IVec3::new(60, 0, 0)));
        assert!(!provider.is_dome_block(IVec3::new(60, 2, 1)));
    }

    #[test]
    fn entrance_hood_sits_outside_the_dome() {
        let provider = DefenceFieldProvider::new(DefenceField::new());
        assert!(provider.is_dome_block(IVec3::new(64, 0, 0)));
        assert!(provider.is_dome_block(IVec3::new(62, 3, 1)));
        // Inside the dome the hood is not built.
        assert!(!provider.is_dome_block(IVec3::new(56, 0, 0)));
    }

    #[test]
    fn far_regions_are_empty() {
        let provider = DefenceFieldProvider::new(DefenceField::new());
        let inside = Region::new(IVec3::new(-8, 0, -8), IVec3::new(8, 8, 8));
        let outside = Region::new(IVec3::new(200, 0, 200), IVec3::new(215, 15, 215));
        assert!(provider.process(&inside).is_empty());
        assert!(provider.process(&outside).is_empty());
    }

    #[test]
    fn wall_region_has_blocks() {
        let provider = DefenceFieldProvider::new(DefenceField::new());
        let wall = Region::new(IVec3::new(-4, 0, 56), IVec3::new(4, 6, 63));
        let facet = provider.process(&wall);
        assert!(!facet.is_empty());
        assert!(facet.get_world(IVec3::new(0, 0, 60)));
    }
}
