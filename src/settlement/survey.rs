use egui::Pos2;

use crate::spatial::SpatialIndex;
use crate::terrain::{PointField, TerrainKind};

/// Spacing of the survey sample lattice.
pub const SURVEY_STEP: i32 = 5;

/// Terrain counts over a circular neighbourhood.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Survey {
    pub total: usize,
    pub grass: usize,
    /// Grassland or dry plains.
    pub valid: usize,
}

impl Survey {
    pub fn grass_ratio(&self) -> f32 {
        ratio(self.grass, self.total)
    }

    pub fn valid_ratio(&self) -> f32 {
        ratio(self.valid, self.total)
    }
}

fn ratio(count: usize, total: usize) -> f32 {
    if total == 0 {
        0.0
    } else {
        count as f32 / total as f32
    }
}

/// Reads terrain categories at arbitrary positions of a point field.
#[derive(Clone, Copy)]
pub struct TerrainProbe<'a> {
    pub field: &'a PointField,
    pub index: &'a SpatialIndex,
}

impl<'a> TerrainProbe<'a> {
    pub fn new(field: &'a PointField, index: &'a SpatialIndex) -> Self {
        Self { field, index }
    }

    fn in_map(&self, pos: Pos2) -> bool {
        let config = &self.field.config;
        pos.x >= 0.0 && pos.x < config.width_f() && pos.y >= 0.0 && pos.y < config.height_f()
    }

    /// Sample `center + (dx, dy)` for `dx, dy` in `-radius..=radius` step
    /// [`SURVEY_STEP`] inside the circle, skipping samples off the map.
    ///
    /// Returns `None` when `center` itself lies outside the map.
    pub fn survey(&self, center: Pos2, radius: i32) -> Option<Survey> {
        if !self.in_map(center) {
            return None;
        }

        let mut survey = Survey::default();
        let mut hint = 0;
        let radius_sq = radius * radius;
        for dx in (-radius..=radius).step_by(SURVEY_STEP as usize) {
            for dy in (-radius..=radius).step_by(SURVEY_STEP as usize) {
                if dx * dx + dy * dy > radius_sq {
                    continue;
                }
                let sample = center + egui::vec2(dx as f32, dy as f32);
                if !self.in_map(sample) {
                    continue;
                }
                let Some(nearest) = self.index.find_nearest_from(sample, hint) else {
                    continue;
                };
                hint = nearest;

                survey.total += 1;
                match self.field.kinds[nearest] {
                    TerrainKind::Grassland => {
                        survey.grass += 1;
                        survey.valid += 1;
                    }
                    TerrainKind::DryPlains => survey.valid += 1,
                    _ => {}
                }
            }
        }

        Some(survey)
    }
}
