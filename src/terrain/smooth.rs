use serde::{Deserialize, Serialize};

use super::noise::{ElevationOctaves, NoiseSampler};
use crate::config::MapConfig;

/// Parameters of the coarse height lattice drawn by smooth mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeParams {
    /// Number of lattice cells across the padded width.
    pub resolution: usize,
    /// Padding as a fraction of the map width.
    pub padding_ratio: f32,
}

impl Default for LatticeParams {
    fn default() -> Self {
        Self {
            resolution: 8,
            padding_ratio: 0.1,
        }
    }
}

/// Coarse `(resolution + 2)²` height map sampled directly from noise.
///
/// Independent of the point field: it reads noise at integer lattice
/// coordinates with its own octave stack and a linear edge fade.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightLattice {
    pub resolution: usize,
    pub padding: f32,
    /// Width of the padded area.
    pub total_width: f32,
    /// Height of the padded area.
    pub total_height: f32,
    /// Side length of one lattice cell (square, derived from the width).
    pub cell_size: f32,
    /// Row-major by x: `heights[x * (resolution + 2) + y]`.
    heights: Vec<f32>,
}

impl HeightLattice {
    pub fn generate<N: NoiseSampler + ?Sized>(
        config: &MapConfig,
        params: &LatticeParams,
        noise: &N,
    ) -> Self {
        let resolution = params.resolution.max(1);
        let width = config.width_f();
        let height = config.height_f();
        let padding = width * params.padding_ratio;
        let total_width = width + padding * 2.0;
        let total_height = height + padding * 2.0;
        let cell_size = total_width / resolution as f32;
        let side = resolution + 2;
        let octaves = ElevationOctaves::smooth_lattice();

        let mut heights = vec![0.0; side * side];
        for x in 0..side {
            for y in 0..side {
                let nx = (x as f32 * cell_size - padding) / width - 0.5;
                let ny = (y as f32 * cell_size - padding) / height - 0.5;
                let distance = (nx * nx + ny * ny).sqrt() / 0.5f32.sqrt();
                let fade = (1.0 - distance * 1.2).max(0.0);
                let elevation = octaves.elevation(noise, x as f64, y as f64) as f32;
                heights[x * side + y] = elevation * fade;
            }
        }

        Self {
            resolution,
            padding,
            total_width,
            total_height,
            cell_size,
            heights,
        }
    }

    /// Lattice value at integer coordinates; both must be `<= resolution + 1`.
    pub fn height(&self, x: usize, y: usize) -> f32 {
        self.heights[x * (self.resolution + 2) + y]
    }
}
