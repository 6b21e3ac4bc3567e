use std::fmt;

use egui::{Pos2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::gradient::LinearBrush;
use super::surface::Raster;
use crate::spatial::SpatialIndex;
use crate::terrain::{HeightLattice, PointField, TerrainKind, TerrainVisibility, WATER_COLOR};

/// Side length of one pixel-mode cell.
pub const PIXEL_CELL: usize = 2;

/// Segments used to flatten each smooth-mode bezier.
const BEZIER_SEGMENTS: usize = 16;

/// How terrain is drawn into the render cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RenderMode {
    #[default]
    Pixel,
    Voronoi,
    Smooth,
}

impl RenderMode {
    pub const ALL: [RenderMode; 3] = [RenderMode::Pixel, RenderMode::Voronoi, RenderMode::Smooth];

    /// Next mode in the cycle Pixel -> Voronoi -> Smooth -> Pixel.
    pub fn next(self) -> Self {
        match self {
            RenderMode::Pixel => RenderMode::Voronoi,
            RenderMode::Voronoi => RenderMode::Smooth,
            RenderMode::Smooth => RenderMode::Pixel,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RenderMode::Pixel => "pixel",
            RenderMode::Voronoi => "voronoi",
            RenderMode::Smooth => "smooth",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(text.trim()))
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the terrain strategies read.
#[derive(Clone, Copy)]
pub struct TerrainScene<'a> {
    pub field: &'a PointField,
    pub index: &'a SpatialIndex,
    pub lattice: &'a HeightLattice,
    pub visibility: &'a TerrainVisibility,
}

/// Draw the terrain of `scene` into a fresh `width x height` surface.
///
/// The surface starts filled with water; `rng` picks substitute colours for
/// hidden categories.
pub fn render_terrain<R: Rng + ?Sized>(
    mode: RenderMode,
    scene: TerrainScene<'_>,
    rng: &mut R,
) -> Raster {
    let config = &scene.field.config;
    let mut raster = Raster::new(config.width as usize, config.height as usize, WATER_COLOR);

    match mode {
        RenderMode::Pixel => render_pixels(&mut raster, scene, rng),
        RenderMode::Voronoi => render_voronoi(&mut raster, scene, rng),
        RenderMode::Smooth => render_smooth(&mut raster, scene.lattice, scene.visibility, rng),
    }

    raster
}

fn render_pixels<R: Rng + ?Sized>(raster: &mut Raster, scene: TerrainScene<'_>, rng: &mut R) {
    let mut hint = 0;
    for y in (0..raster.height()).step_by(PIXEL_CELL) {
        for x in (0..raster.width()).step_by(PIXEL_CELL) {
            let half = PIXEL_CELL as f32 / 2.0;
            let centre = Pos2::new(x as f32 + half, y as f32 + half);
            let Some(nearest) = scene.index.find_nearest_from(centre, hint) else {
                return;
            };
            hint = nearest;

            let kind = scene.field.kinds[nearest];
            let color = scene.visibility.paint_color(kind, rng);
            let size = PIXEL_CELL as i64;
            raster.fill_rect(x as i64, y as i64, size, size, color);
        }
    }
}

fn render_voronoi<R: Rng + ?Sized>(raster: &mut Raster, scene: TerrainScene<'_>, rng: &mut R) {
    let padded = scene.field.config.padded_bounds();
    for (i, (point, kind)) in scene.field.points.iter().zip(&scene.field.kinds).enumerate() {
        if !padded.contains(*point) {
            continue;
        }
        let cell = scene.index.cell_polygon(i, padded);
        if cell.len() < 3 {
            continue;
        }
        let color = scene.visibility.paint_color(*kind, rng);
        raster.fill_polygon(&cell, color);
    }
}

fn render_smooth<R: Rng + ?Sized>(
    raster: &mut Raster,
    lattice: &HeightLattice,
    visibility: &TerrainVisibility,
    rng: &mut R,
) {
    let g = lattice.cell_size;
    let offset = Vec2::splat(lattice.padding);

    for i in 0..=lattice.resolution {
        for j in 0..=lattice.resolution {
            let kind = TerrainKind::classify(lattice.height(i, j));
            if kind == TerrainKind::Water {
                continue;
            }
            let brush_kind = if visibility.is_visible(kind) {
                kind
            } else {
                match visibility.random_visible_land(rng) {
                    Some(substitute) => substitute,
                    None => continue,
                }
            };
            let Some(brush) =
                LinearBrush::for_terrain(brush_kind, lattice.total_width, lattice.total_height)
            else {
                continue;
            };

            let (fi, fj) = (i as f32, j as f32);
            let shape = flatten_cubic([
                Pos2::new(fi * g, fj * g) - offset,
                Pos2::new((fi + 0.5) * g, fj * g) - offset,
                Pos2::new((fi + 1.0) * g, (fj + 0.5) * g) - offset,
                Pos2::new((fi + 1.0) * g, (fj + 1.0) * g) - offset,
            ]);
            // 画刷定义在未平移的格坐标中
            raster.fill_polygon_with(&shape, |p| brush.color_at(p + offset));
        }
    }
}

/// Points along a cubic bezier, endpoints included.
fn flatten_cubic([p0, c1, c2, p3]: [Pos2; 4]) -> Vec<Pos2> {
    (0..=BEZIER_SEGMENTS)
        .map(|step| {
            let t = step as f32 / BEZIER_SEGMENTS as f32;
            let u = 1.0 - t;
            let v = p0.to_vec2() * (u * u * u)
                + c1.to_vec2() * (3.0 * u * u * t)
                + c2.to_vec2() * (3.0 * u * t * t)
                + p3.to_vec2() * (t * t * t);
            v.to_pos2()
        })
        .collect()
}
