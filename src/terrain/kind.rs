use std::fmt;

use egui::Color32;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// Elevation above which terrain is snow.
pub const SNOW_LEVEL: f32 = 0.7;
/// Elevation above which terrain is rocky.
pub const ROCK_LEVEL: f32 = 0.55;
/// Elevation above which terrain is grassland.
pub const GRASS_LEVEL: f32 = 0.35;
/// Elevation above which terrain is dry plains; anything at or below is water.
pub const SEA_LEVEL: f32 = 0.25;

pub const WATER_COLOR: Color32 = Color32::from_rgb(0x1E, 0x90, 0xFF);

/// The five terrain categories a sample point can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainKind {
    Snow,
    Rocky,
    Grassland,
    DryPlains,
    Water,
}

impl TerrainKind {
    pub const ALL: [TerrainKind; 5] = [
        TerrainKind::Snow,
        TerrainKind::Rocky,
        TerrainKind::Grassland,
        TerrainKind::DryPlains,
        TerrainKind::Water,
    ];

    /// Map an elevation to its category using the fixed thresholds.
    pub fn classify(elevation: f32) -> Self {
        if elevation > SNOW_LEVEL {
            TerrainKind::Snow
        } else if elevation > ROCK_LEVEL {
            TerrainKind::Rocky
        } else if elevation > GRASS_LEVEL {
            TerrainKind::Grassland
        } else if elevation > SEA_LEVEL {
            TerrainKind::DryPlains
        } else {
            TerrainKind::Water
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            TerrainKind::Snow => Color32::from_rgb(0xFF, 0xFF, 0xFF),
            TerrainKind::Rocky => Color32::from_rgb(0xA9, 0xA9, 0xA9),
            TerrainKind::Grassland => Color32::from_rgb(0x4C, 0xAF, 0x50),
            TerrainKind::DryPlains => Color32::from_rgb(0x8B, 0x45, 0x13),
            TerrainKind::Water => WATER_COLOR,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TerrainKind::Snow => "Snow",
            TerrainKind::Rocky => "Rocky",
            TerrainKind::Grassland => "Grassland",
            TerrainKind::DryPlains => "Dry plains",
            TerrainKind::Water => "Water",
        }
    }

    /// Terrain a village may be built on.
    pub fn is_settleable(self) -> bool {
        matches!(self, TerrainKind::Grassland | TerrainKind::DryPlains)
    }
}

impl fmt::Display for TerrainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_lowercase())
    }
}

/// Which terrain categories render in their own colour.
///
/// A hidden category is not removed from the data; the rasterizer paints it
/// with a randomly chosen visible category instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainVisibility {
    pub snow: bool,
    pub rocky: bool,
    pub grassland: bool,
    pub dry_plains: bool,
    pub water: bool,
}

impl Default for TerrainVisibility {
    fn default() -> Self {
        Self {
            snow: true,
            rocky: true,
            grassland: true,
            dry_plains: true,
            water: true,
        }
    }
}

impl TerrainVisibility {
    pub fn is_visible(&self, kind: TerrainKind) -> bool {
        match kind {
            TerrainKind::Snow => self.snow,
            TerrainKind::Rocky => self.rocky,
            TerrainKind::Grassland => self.grassland,
            TerrainKind::DryPlains => self.dry_plains,
            TerrainKind::Water => self.water,
        }
    }

    fn flag_mut(&mut self, kind: TerrainKind) -> &mut bool {
        match kind {
            TerrainKind::Snow => &mut self.snow,
            TerrainKind::Rocky => &mut self.rocky,
            TerrainKind::Grassland => &mut self.grassland,
            TerrainKind::DryPlains => &mut self.dry_plains,
            TerrainKind::Water => &mut self.water,
        }
    }

    /// Show or hide a category. Hiding the last visible one is refused.
    pub fn set(&mut self, kind: TerrainKind, visible: bool) -> Result<(), MapError> {
        if !visible && self.is_visible(kind) && self.visible_kinds().len() == 1 {
            return Err(MapError::LastVisibleTerrain(kind));
        }
        *self.flag_mut(kind) = visible;
        Ok(())
    }

    /// One bit per category in `TerrainKind::ALL` order.
    pub fn bits(&self) -> u8 {
        TerrainKind::ALL
            .into_iter()
            .enumerate()
            .filter(|(_, kind)| self.is_visible(*kind))
            .fold(0, |bits, (i, _)| bits | (1 << i))
    }

    pub fn visible_kinds(&self) -> Vec<TerrainKind> {
        TerrainKind::ALL
            .into_iter()
            .filter(|kind| self.is_visible(*kind))
            .collect()
    }

    /// Uniformly random visible category, or water if nothing is visible.
    pub fn random_visible<R: Rng + ?Sized>(&self, rng: &mut R) -> TerrainKind {
        self.visible_kinds()
            .choose(rng)
            .copied()
            .unwrap_or(TerrainKind::Water)
    }

    /// Uniformly random visible category other than water.
    pub fn random_visible_land<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<TerrainKind> {
        let land: Vec<TerrainKind> = self
            .visible_kinds()
            .into_iter()
            .filter(|kind| *kind != TerrainKind::Water)
            .collect();
        land.choose(rng).copied()
    }

    /// Colour to paint `kind` with: its own when visible, a substitute otherwise.
    pub fn paint_color<R: Rng + ?Sized>(&self, kind: TerrainKind, rng: &mut R) -> Color32 {
        if self.is_visible(kind) {
            kind.color()
        } else {
            self.random_visible(rng).color()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn thresholds_are_exclusive_lower_bounds() {
        assert_eq!(TerrainKind::classify(0.71), TerrainKind::Snow);
        assert_eq!(TerrainKind::classify(0.7), TerrainKind::Rocky);
        assert_eq!(TerrainKind::classify(0.55), TerrainKind::Grassland);
        assert_eq!(TerrainKind::classify(0.35), TerrainKind::DryPlains);
        assert_eq!(TerrainKind::classify(0.25), TerrainKind::Water);
        assert_eq!(TerrainKind::classify(0.0), TerrainKind::Water);
    }

    #[test]
    fn hidden_kind_is_replaced_by_a_visible_one() {
        let mut visibility = TerrainVisibility::default();
        visibility.set(TerrainKind::Grassland, false).unwrap();
        visibility.set(TerrainKind::Snow, false).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let color = visibility.paint_color(TerrainKind::Grassland, &mut rng);
            assert_ne!(color, TerrainKind::Grassland.color());
            assert_ne!(color, TerrainKind::Snow.color());
        }
        assert_eq!(
            visibility.paint_color(TerrainKind::Water, &mut rng),
            WATER_COLOR
        );
    }

    #[test]
    fn last_visible_kind_cannot_be_hidden() {
        let mut visibility = TerrainVisibility::default();
        for kind in [
            TerrainKind::Snow,
            TerrainKind::Rocky,
            TerrainKind::Grassland,
            TerrainKind::DryPlains,
        ] {
            visibility.set(kind, false).unwrap();
        }
        assert_eq!(
            visibility.set(TerrainKind::Water, false),
            Err(MapError::LastVisibleTerrain(TerrainKind::Water))
        );
        assert!(visibility.water);
        assert_eq!(visibility.visible_kinds(), vec![TerrainKind::Water]);
    }

    #[test]
    fn bits_track_each_flag() {
        let mut visibility = TerrainVisibility::default();
        assert_eq!(visibility.bits(), 0b1_1111);
        visibility.set(TerrainKind::Water, false).unwrap();
        assert_eq!(visibility.bits(), 0b0_1111);
        visibility.set(TerrainKind::Snow, false).unwrap();
        assert_eq!(visibility.bits(), 0b0_1110);
    }

    #[test]
    fn empty_visibility_falls_back_to_water() {
        let visibility = TerrainVisibility {
            snow: false,
            rocky: false,
            grassland: false,
            dry_plains: false,
            water: false,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(visibility.random_visible(&mut rng), TerrainKind::Water);
        assert_eq!(visibility.random_visible_land(&mut rng), None);
    }

    #[test]
    fn land_substitute_skips_water() {
        let mut visibility = TerrainVisibility::default();
        visibility.set(TerrainKind::Snow, false).unwrap();
        visibility.set(TerrainKind::Rocky, false).unwrap();
        visibility.set(TerrainKind::DryPlains, false).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        for _ in 0..50 {
            assert_eq!(
                visibility.random_visible_land(&mut rng),
                Some(TerrainKind::Grassland)
            );
        }
    }
}
