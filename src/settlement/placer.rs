use egui::Pos2;
use rand::Rng;
#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::names::generate_name;
use super::survey::TerrainProbe;
use super::{Settlement, Settlements, Tier};

/// Tunables of settlement placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementParams {
    /// Cell size of the city scoring grid.
    pub score_grid: usize,
    pub score_radius: i32,
    pub min_city_score: usize,
    /// Survey radius of the final grassland check of a city.
    pub city_radius: i32,
    pub city_grass_ratio: f32,
    pub city_spacing: f32,
    pub city_count: (usize, usize),

    pub village_radius: i32,
    pub village_valid_ratio: f32,
    pub village_city_spacing: f32,
    pub village_spacing: f32,
    pub village_count: (usize, usize),
    pub village_attempts: usize,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            score_grid: 10,
            score_radius: 30,
            min_city_score: 100,
            city_radius: 40,
            city_grass_ratio: 0.7,
            city_spacing: 100.0,
            city_count: (1, 3),
            village_radius: 20,
            village_valid_ratio: 0.5,
            village_city_spacing: 60.0,
            village_spacing: 40.0,
            village_count: (2, 4),
            village_attempts: 1000,
        }
    }
}

/// A grassland centre found by the scoring grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityCandidate {
    pub position: Pos2,
    pub score: usize,
}

/// Grass counts of the scoring grid, column-major: `scores[gx * rows + gy]`.
#[derive(Debug, Clone)]
pub struct ScoreGrid {
    pub cols: usize,
    pub rows: usize,
    pub scores: Vec<usize>,
}

impl ScoreGrid {
    pub fn compute(probe: TerrainProbe<'_>, params: &PlacementParams) -> Self {
        let config = &probe.field.config;
        let grid = params.score_grid.max(1);
        let cols = (config.width as usize).div_ceil(grid);
        let rows = (config.height as usize).div_ceil(grid);

        let score_column = |gx: usize| -> Vec<usize> {
            (0..rows)
                .map(|gy| {
                    let center = Pos2::new((gx * grid) as f32, (gy * grid) as f32);
                    probe
                        .survey(center, params.score_radius)
                        .map_or(0, |survey| survey.grass)
                })
                .collect()
        };

        #[cfg(not(target_arch = "wasm32"))]
        let columns: Vec<Vec<usize>> = (0..cols).into_par_iter().map(score_column).collect();
        #[cfg(target_arch = "wasm32")]
        let columns: Vec<Vec<usize>> = (0..cols).map(score_column).collect();

        Self {
            cols,
            rows,
            scores: columns.concat(),
        }
    }

    pub fn score(&self, gx: usize, gy: usize) -> usize {
        self.scores[gx * self.rows + gy]
    }

    /// Interior cells scoring at least `min_score` with no strictly higher
    /// neighbour, best first.
    pub fn candidates(&self, grid: usize, min_score: usize) -> Vec<CityCandidate> {
        let mut candidates = Vec::new();
        for gx in 1..self.cols.saturating_sub(1) {
            for gy in 1..self.rows.saturating_sub(1) {
                let score = self.score(gx, gy);
                if score < min_score {
                    continue;
                }
                let is_max = (gx - 1..=gx + 1)
                    .all(|nx| (gy - 1..=gy + 1).all(|ny| self.score(nx, ny) <= score));
                if is_max {
                    candidates.push(CityCandidate {
                        position: Pos2::new(
                            (gx as f32 + 0.5) * grid as f32,
                            (gy as f32 + 0.5) * grid as f32,
                        ),
                        score,
                    });
                }
            }
        }
        // 稳定排序，同分时保持扫描顺序
        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates
    }
}

fn far_from(position: Pos2, others: &[Settlement], distance: f32) -> bool {
    others
        .iter()
        .all(|other| other.position.distance(position) >= distance)
}

fn random_target<R: Rng + ?Sized>(range: (usize, usize), rng: &mut R) -> usize {
    let (lo, hi) = range;
    rng.random_range(lo.min(hi)..=hi.max(lo))
}

pub fn place_cities<R: Rng + ?Sized>(
    probe: TerrainProbe<'_>,
    params: &PlacementParams,
    rng: &mut R,
) -> Vec<Settlement> {
    let target = random_target(params.city_count, rng);
    let grid = ScoreGrid::compute(probe, params);
    let candidates = grid.candidates(params.score_grid.max(1), params.min_city_score);
    log::debug!("城市候选 {} 个, 目标 {}", candidates.len(), target);

    let mut cities: Vec<Settlement> = Vec::new();
    for candidate in candidates {
        if cities.len() >= target {
            break;
        }
        if !far_from(candidate.position, &cities, params.city_spacing) {
            continue;
        }
        let grassy = probe
            .survey(candidate.position, params.city_radius)
            .is_some_and(|s| s.total > 0 && s.grass_ratio() >= params.city_grass_ratio);
        if !grassy {
            continue;
        }
        cities.push(Settlement::new(candidate.position, Tier::City));
    }
    cities
}

pub fn place_villages<R: Rng + ?Sized>(
    probe: TerrainProbe<'_>,
    cities: &[Settlement],
    params: &PlacementParams,
    rng: &mut R,
) -> Vec<Settlement> {
    let target = random_target(params.village_count, rng);
    let config = &probe.field.config;
    let mut villages: Vec<Settlement> = Vec::new();
    let mut attempts = 0;

    while villages.len() < target && attempts < params.village_attempts {
        attempts += 1;
        let position = Pos2::new(
            rng.random::<f32>() * config.width_f(),
            rng.random::<f32>() * config.height_f(),
        );

        let suitable = probe
            .survey(position, params.village_radius)
            .is_some_and(|s| s.total > 0 && s.valid_ratio() >= params.village_valid_ratio);
        if suitable
            && far_from(position, cities, params.village_city_spacing)
            && far_from(position, &villages, params.village_spacing)
        {
            villages.push(Settlement::new(position, Tier::Village));
        }
    }

    if villages.len() < target {
        log::debug!("村庄 {}/{}，{} 次尝试后放弃", villages.len(), target, attempts);
    }
    villages
}

/// Place and name all settlements of a map.
pub fn place_settlements<R: Rng + ?Sized>(
    probe: TerrainProbe<'_>,
    params: &PlacementParams,
    rng: &mut R,
) -> Settlements {
    let mut cities = place_cities(probe, params, rng);
    let mut villages = place_villages(probe, &cities, params, rng);

    for list in [&mut cities, &mut villages] {
        let mut used: Vec<String> = Vec::with_capacity(list.len());
        for settlement in list.iter_mut() {
            settlement.name = generate_name(settlement.tier, &used, rng);
            used.push(settlement.name.clone());
        }
    }

    Settlements { cities, villages }
}
