use egui::Pos2;
use rand::Rng;
#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

use super::kind::TerrainKind;
use super::noise::{ElevationOctaves, NoiseSampler};
use crate::config::MapConfig;

/// Radial falloff that pushes elevation to zero towards the padded boundary.
///
/// `distance` is the normalised distance from the centre of the padded
/// rectangle (1.0 at its corners). Zero from `1 / 1.2` outwards.
pub fn edge_fade(distance: f32) -> f32 {
    (1.0 - (distance * 1.2).min(1.0)).powf(1.5)
}

/// Normalised distance of `pos` from the centre of the padded rectangle.
pub fn radial_distance(config: &MapConfig, pos: Pos2) -> f32 {
    let padding = config.padding();
    let padded_width = config.width_f() + padding * 2.0;
    let padded_height = config.height_f() + padding * 2.0;
    let nx = (pos.x + padding) / padded_width - 0.5;
    let ny = (pos.y + padding) / padded_height - 0.5;
    (nx * nx + ny * ny).sqrt() / 0.5f32.sqrt()
}

/// Scattered sample points with their elevation and terrain category.
///
/// `points`, `elevations` and `kinds` always have the same length and share
/// indices.
#[derive(Debug, Clone, PartialEq)]
pub struct PointField {
    pub config: MapConfig,
    pub points: Vec<Pos2>,
    pub elevations: Vec<f32>,
    pub kinds: Vec<TerrainKind>,
}

impl PointField {
    /// Scatter `config.point_count` points over the padded rectangle and
    /// classify each one.
    pub fn generate<R, N>(config: &MapConfig, rng: &mut R, noise: &N) -> Self
    where
        R: Rng + ?Sized,
        N: NoiseSampler + Sync + ?Sized,
    {
        let padding = config.padding();
        let padded_width = config.width_f() + padding * 2.0;
        let padded_height = config.height_f() + padding * 2.0;

        let points: Vec<Pos2> = (0..config.point_count)
            .map(|_| {
                Pos2::new(
                    rng.random::<f32>() * padded_width - padding,
                    rng.random::<f32>() * padded_height - padding,
                )
            })
            .collect();

        let octaves = ElevationOctaves::point_field();
        let elevation_at = |p: &Pos2| {
            let raw = octaves.elevation(noise, p.x as f64, p.y as f64) as f32;
            raw * edge_fade(radial_distance(config, *p))
        };

        #[cfg(not(target_arch = "wasm32"))]
        let elevations: Vec<f32> = points.par_iter().map(elevation_at).collect();
        #[cfg(target_arch = "wasm32")]
        let elevations: Vec<f32> = points.iter().map(elevation_at).collect();

        let kinds = elevations.iter().map(|&e| TerrainKind::classify(e)).collect();

        Self {
            config: *config,
            points,
            elevations,
            kinds,
        }
    }

    /// Build a field from explicit data, classifying each elevation.
    /// `points` and `elevations` must have the same length.
    pub fn from_parts(config: MapConfig, points: Vec<Pos2>, elevations: Vec<f32>) -> Self {
        debug_assert_eq!(points.len(), elevations.len());
        let kinds = elevations.iter().map(|&e| TerrainKind::classify(e)).collect();
        Self {
            config,
            points,
            elevations,
            kinds,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn count(&self, kind: TerrainKind) -> usize {
        self.kinds.iter().filter(|k| **k == kind).count()
    }
}
