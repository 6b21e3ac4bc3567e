use egui::{Pos2, Vec2};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::compositor::RenderCache;
use crate::config::{parse_size, validate_size, MapConfig};
use crate::error::MapError;
use crate::raster::{RenderMode, TerrainScene};
use crate::settlement::{place_settlements, PlacementParams, Settlements, TerrainProbe};
use crate::spatial::SpatialIndex;
use crate::terrain::{
    HeightLattice, LatticeParams, PointField, SimplexSampler, TerrainKind, TerrainVisibility,
};
use crate::view::ViewState;

/// Offset between the point-field noise seed and the smooth-lattice noise seed.
const LATTICE_SEED_OFFSET: u32 = 0x9E37_79B9;

fn noise_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

/// Seed of the substitution RNG: a function of the cache inputs only, so the
/// same seed, mode and visibility always paint the same pixels.
fn cache_seed(seed: u64, mode: RenderMode, visibility: &TerrainVisibility) -> u64 {
    let inputs = ((mode as u64) << 8) | visibility.bits() as u64;
    seed ^ (inputs + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Run `f` and log how long it took (native only, the web has no monotonic clock here).
fn timed<T>(label: &str, f: impl FnOnce() -> T) -> T {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let started = std::time::Instant::now();
        let value = f();
        log::info!("{label}: {:.1?}", started.elapsed());
        value
    }
    #[cfg(target_arch = "wasm32")]
    {
        log::info!("{label}");
        f()
    }
}

/// A generated map together with its view, render settings and render cache.
///
/// Every operation leaves the cache consistent with the field, settlements,
/// render mode and visibility.
pub struct FantasyMap {
    config: MapConfig,
    seed: u64,
    lattice_params: LatticeParams,
    placement: PlacementParams,

    field: PointField,
    index: SpatialIndex,
    lattice: HeightLattice,
    settlements: Settlements,

    render_mode: RenderMode,
    visibility: TerrainVisibility,
    view: ViewState,

    cache: RenderCache,
}

impl FantasyMap {
    pub fn generate(config: MapConfig, seed: u64) -> Self {
        Self::generate_with(
            config,
            seed,
            RenderMode::default(),
            TerrainVisibility::default(),
        )
    }

    pub fn generate_with(
        config: MapConfig,
        seed: u64,
        render_mode: RenderMode,
        visibility: TerrainVisibility,
    ) -> Self {
        let lattice_params = LatticeParams::default();
        let placement = PlacementParams::default();
        let (field, index, lattice, settlements) =
            generate_content(&config, seed, &lattice_params, &placement);
        let mut map = Self {
            config,
            seed,
            lattice_params,
            placement,
            cache: RenderCache {
                image: crate::raster::Raster::new(0, 0, crate::terrain::WATER_COLOR),
                revision: 0,
            },
            field,
            index,
            lattice,
            settlements,
            render_mode,
            visibility,
            view: ViewState::default(),
        };
        map.rebuild_cache();
        map
    }

    /// New map with a fresh random seed; render mode, visibility and view are kept.
    pub fn regenerate(&mut self) {
        self.regenerate_with_seed(rand::random());
    }

    pub fn regenerate_with_seed(&mut self, seed: u64) {
        let (field, index, lattice, settlements) =
            generate_content(&self.config, seed, &self.lattice_params, &self.placement);
        self.seed = seed;
        self.field = field;
        self.index = index;
        self.lattice = lattice;
        self.settlements = settlements;
        self.rebuild_cache();
    }

    /// Resize and regenerate with a fresh seed. Invalid sizes keep the current map.
    pub fn set_size(&mut self, width: u32, height: u32) -> Result<(), MapError> {
        if let Err(err) = validate_size(width, height) {
            log::warn!("{err}");
            return Err(err);
        }
        self.config.width = width;
        self.config.height = height;
        self.regenerate();
        Ok(())
    }

    /// Resize from the text of the width and height inputs.
    pub fn set_size_from_text(&mut self, width: &str, height: &str) -> Result<(), MapError> {
        let (width, height) = parse_size(width, height).inspect_err(|err| log::warn!("{err}"))?;
        self.set_size(width, height)
    }

    // ------------------------------------------------------------------------
    // View
    // ------------------------------------------------------------------------

    pub fn set_pan(&mut self, pan: Vec2) {
        self.view.set_pan(pan);
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.view.set_zoom(zoom);
    }

    pub fn zoom_at(&mut self, anchor: Pos2, factor: f32) {
        self.view.zoom_at(anchor, factor);
    }

    pub fn reset_view(&mut self) {
        self.view.reset();
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    // ------------------------------------------------------------------------
    // Render settings
    // ------------------------------------------------------------------------

    pub fn cycle_render_mode(&mut self) -> RenderMode {
        self.set_render_mode(self.render_mode.next());
        self.render_mode
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        if mode != self.render_mode {
            log::debug!("渲染模式 {} -> {}", self.render_mode, mode);
            self.render_mode = mode;
            self.rebuild_cache();
        }
    }

    /// Show or hide a terrain category. Hiding the last visible one fails and
    /// keeps the previous visibility.
    pub fn set_terrain_visible(&mut self, kind: TerrainKind, visible: bool) -> Result<(), MapError> {
        if self.visibility.is_visible(kind) == visible {
            return Ok(());
        }
        self.visibility
            .set(kind, visible)
            .inspect_err(|err| log::warn!("{err}"))?;
        self.rebuild_cache();
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn field(&self) -> &PointField {
        &self.field
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn lattice(&self) -> &HeightLattice {
        &self.lattice
    }

    pub fn settlements(&self) -> &Settlements {
        &self.settlements
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn visibility(&self) -> &TerrainVisibility {
        &self.visibility
    }

    pub fn cache(&self) -> &RenderCache {
        &self.cache
    }

    /// Render into a fresh image and swap it in when complete.
    fn rebuild_cache(&mut self) {
        let revision = self.cache.revision + 1;
        let scene = TerrainScene {
            field: &self.field,
            index: &self.index,
            lattice: &self.lattice,
            visibility: &self.visibility,
        };
        let mut rng =
            ChaCha8Rng::seed_from_u64(cache_seed(self.seed, self.render_mode, &self.visibility));
        let label = format!("渲染缓存 {} #{revision}", self.render_mode);
        let cache = timed(&label, || {
            RenderCache::build(self.render_mode, scene, &self.settlements, revision, &mut rng)
        });
        self.cache = cache;
    }
}

fn generate_content(
    config: &MapConfig,
    seed: u64,
    lattice_params: &LatticeParams,
    placement: &PlacementParams,
) -> (PointField, SpatialIndex, HeightLattice, Settlements) {
    timed(&format!("生成地图 seed={seed} {}x{}", config.width, config.height), || {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let noise = SimplexSampler::new(noise_seed(seed));
        let field = PointField::generate(config, &mut rng, &noise);
        let index = SpatialIndex::build(&field.points);

        let lattice_noise = SimplexSampler::new(noise_seed(seed).wrapping_add(LATTICE_SEED_OFFSET));
        let lattice = HeightLattice::generate(config, lattice_params, &lattice_noise);

        let settlements = place_settlements(TerrainProbe::new(&field, &index), placement, &mut rng);
        log::info!(
            "{} 城市, {} 村庄",
            settlements.cities.len(),
            settlements.villages.len()
        );
        (field, index, lattice, settlements)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> MapConfig {
        MapConfig {
            width: 240,
            height: 180,
            point_count: 600,
        }
    }

    #[test]
    fn map_generation_is_deterministic() {
        let a = FantasyMap::generate(MapConfig::default(), 42);
        let b = FantasyMap::generate(MapConfig::default(), 42);
        assert_eq!(a.field(), b.field());
        assert_eq!(a.settlements(), b.settlements());
        assert_eq!(a.cache().image, b.cache().image);
    }

    #[test]
    fn cache_matches_config_size() {
        let map = FantasyMap::generate(small_config(), 3);
        assert_eq!(map.cache().image.size(), [240, 180]);
        assert_eq!(map.cache().revision, 1);
    }

    #[test]
    fn invalid_size_keeps_the_map() {
        let mut map = FantasyMap::generate(small_config(), 5);
        let before = map.cache().revision;
        assert_eq!(
            map.set_size(50, 600),
            Err(MapError::InvalidSize {
                width: 50,
                height: 600
            })
        );
        assert!(matches!(
            map.set_size_from_text("abc", "300"),
            Err(MapError::UnparsableSize(_))
        ));
        assert_eq!(map.config(), &small_config());
        assert_eq!(map.cache().revision, before);
    }

    #[test]
    fn resize_regenerates() {
        let mut map = FantasyMap::generate(small_config(), 5);
        map.set_size_from_text("300", " 200 ").unwrap();
        assert_eq!(map.cache().image.size(), [300, 200]);
        assert_eq!(map.field().config.width, 300);
        // 调整尺寸是完整重新生成，换新种子
        assert_ne!(map.seed(), 5);
        assert_eq!(map.field().len(), small_config().point_count);
    }

    #[test]
    fn toggling_restores_pixels() {
        let mut map = FantasyMap::generate(small_config(), 9);
        for mode in RenderMode::ALL {
            map.set_render_mode(mode);
            let original = map.cache().image.clone();
            map.set_terrain_visible(TerrainKind::Water, false).unwrap();
            if mode != RenderMode::Smooth {
                // 平滑模式不绘制水域，底色始终是水
                assert_ne!(map.cache().image, original, "{mode}");
            }
            map.set_terrain_visible(TerrainKind::Water, true).unwrap();
            assert_eq!(map.cache().image, original, "{mode}");
        }
    }

    #[test]
    fn toggling_restores_substituted_pixels() {
        let mut map = FantasyMap::generate(small_config(), 9);
        map.set_terrain_visible(TerrainKind::Water, false).unwrap();
        for mode in [RenderMode::Pixel, RenderMode::Voronoi] {
            map.set_render_mode(mode);
            let original = map.cache().image.clone();
            map.set_terrain_visible(TerrainKind::Snow, false).unwrap();
            map.set_terrain_visible(TerrainKind::Snow, true).unwrap();
            assert_eq!(map.cache().image, original, "{mode}");
        }
    }

    #[test]
    fn cache_seed_depends_on_inputs_only() {
        let all = TerrainVisibility::default();
        let mut no_water = all;
        no_water.set(TerrainKind::Water, false).unwrap();
        assert_eq!(
            cache_seed(9, RenderMode::Pixel, &no_water),
            cache_seed(9, RenderMode::Pixel, &no_water)
        );
        assert_ne!(
            cache_seed(9, RenderMode::Pixel, &all),
            cache_seed(9, RenderMode::Pixel, &no_water)
        );
        assert_ne!(
            cache_seed(9, RenderMode::Pixel, &no_water),
            cache_seed(9, RenderMode::Voronoi, &no_water)
        );
    }

    #[test]
    fn hiding_last_visible_is_rejected() {
        let mut map = FantasyMap::generate(small_config(), 1);
        for kind in [
            TerrainKind::Snow,
            TerrainKind::Rocky,
            TerrainKind::Grassland,
            TerrainKind::DryPlains,
        ] {
            map.set_terrain_visible(kind, false).unwrap();
        }
        let revision = map.cache().revision;
        assert_eq!(
            map.set_terrain_visible(TerrainKind::Water, false),
            Err(MapError::LastVisibleTerrain(TerrainKind::Water))
        );
        assert!(map.visibility().water);
        assert_eq!(map.cache().revision, revision);
    }

    #[test]
    fn render_mode_cycles_and_rebuilds() {
        let mut map = FantasyMap::generate(small_config(), 2);
        let revision = map.cache().revision;
        assert_eq!(map.cycle_render_mode(), RenderMode::Voronoi);
        assert_eq!(map.cycle_render_mode(), RenderMode::Smooth);
        assert_eq!(map.cycle_render_mode(), RenderMode::Pixel);
        assert_eq!(map.cache().revision, revision + 3);
    }

    #[test]
    fn regenerate_keeps_settings_and_view() {
        let mut map = FantasyMap::generate(small_config(), 2);
        map.set_render_mode(RenderMode::Smooth);
        map.set_zoom(2.0);
        map.set_pan(Vec2::new(10.0, 20.0));
        map.regenerate_with_seed(77);
        assert_eq!(map.seed(), 77);
        assert_eq!(map.render_mode(), RenderMode::Smooth);
        assert_eq!(map.view().zoom, 2.0);
        assert_eq!(map.view().pan, Vec2::new(10.0, 20.0));

        map.reset_view();
        assert_eq!(map.view(), &ViewState::default());
    }

    #[test]
    fn view_changes_do_not_rebuild() {
        let mut map = FantasyMap::generate(small_config(), 2);
        let revision = map.cache().revision;
        map.zoom_at(Pos2::new(10.0, 10.0), 3.0);
        map.set_pan(Vec2::new(-40.0, 5.0));
        map.set_zoom(100.0);
        assert_eq!(map.view().zoom, crate::view::MAX_ZOOM);
        assert_eq!(map.cache().revision, revision);
    }
}
