// 整张地图的跨模块性质：采样场、最近点查询、像素模式、聚落、交互
use chizu::config::MapConfig;
use chizu::raster::{render_terrain, RenderMode, TerrainScene, PIXEL_CELL};
use chizu::settlement::Tier;
use chizu::terrain::{TerrainKind, TerrainVisibility};
use chizu::ui::InteractionController;
use chizu::view::{ViewState, MAX_ZOOM, MIN_ZOOM};
use chizu::{FantasyMap, MapError};
use egui::{Pos2, Vec2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SEEDS: [u64; 4] = [1, 42, 2024, 987_654_321];

#[test]
fn test_point_field_is_consistent() {
    for seed in SEEDS {
        let map = FantasyMap::generate(MapConfig::default(), seed);
        let field = map.field();
        assert_eq!(field.points.len(), 3000);
        assert_eq!(field.elevations.len(), field.points.len());
        assert_eq!(field.kinds.len(), field.points.len());

        let padded = map.config().padded_bounds();
        for ((p, e), k) in field.points.iter().zip(&field.elevations).zip(&field.kinds) {
            assert!(padded.contains(*p), "seed {seed}: {p:?} outside {padded:?}");
            assert_eq!(*k, TerrainKind::classify(*e));
        }
    }
}

#[test]
fn test_nearest_matches_brute_force() {
    let map = FantasyMap::generate(MapConfig::default(), 7);
    let points = &map.field().points;
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for _ in 0..500 {
        let q = Pos2::new(
            rng.random_range(-200.0..1000.0),
            rng.random_range(-200.0..800.0),
        );
        let found = map.index().find_nearest(q).expect("non-empty index");
        let best = points
            .iter()
            .map(|p| p.distance_sq(q))
            .fold(f32::INFINITY, f32::min);
        assert!(
            points[found].distance_sq(q) <= best + 1e-3,
            "{q:?}: got {found}, distance² {} vs {best}",
            points[found].distance_sq(q)
        );
    }
}

#[test]
fn test_pixel_mode_cells_take_nearest_kind() {
    let map = FantasyMap::generate(MapConfig::default(), 11);
    let field = map.field();
    let visibility = TerrainVisibility::default();
    let scene = TerrainScene {
        field,
        index: map.index(),
        lattice: map.lattice(),
        visibility: &visibility,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let raster = render_terrain(RenderMode::Pixel, scene, &mut rng);

    let half = PIXEL_CELL as f32 / 2.0;
    for y in (0..raster.height()).step_by(PIXEL_CELL * 7) {
        for x in (0..raster.width()).step_by(PIXEL_CELL * 5) {
            let centre = Pos2::new(x as f32 + half, y as f32 + half);
            let best = field
                .points
                .iter()
                .map(|p| p.distance_sq(centre))
                .fold(f32::INFINITY, f32::min);
            let color = raster.get(x, y).expect("in bounds");
            let explained = field
                .points
                .iter()
                .zip(&field.kinds)
                .any(|(p, k)| p.distance_sq(centre) <= best + 1e-3 && k.color() == color);
            assert!(explained, "pixel ({x}, {y}) has {color:?}");

            // 整个 2x2 单元同色
            for (dx, dy) in [(1, 0), (0, 1), (1, 1)] {
                if let Some(other) = raster.get(x + dx, y + dy) {
                    assert_eq!(other, color);
                }
            }
        }
    }
}

#[test]
fn test_settlements_respect_spacing_and_bounds() {
    for seed in SEEDS {
        let map = FantasyMap::generate(MapConfig::default(), seed);
        let settlements = map.settlements();
        let bounds = map.config().bounds();

        assert!(settlements.cities.len() <= 3);
        assert!(settlements.villages.len() <= 4);

        for (i, a) in settlements.cities.iter().enumerate() {
            assert_eq!(a.tier, Tier::City);
            assert!(bounds.contains(a.position));
            for b in &settlements.cities[i + 1..] {
                assert!(a.position.distance(b.position) >= 100.0, "seed {seed}");
            }
        }
        for (i, v) in settlements.villages.iter().enumerate() {
            assert_eq!(v.tier, Tier::Village);
            assert!(bounds.contains(v.position));
            for c in &settlements.cities {
                assert!(v.position.distance(c.position) >= 60.0, "seed {seed}");
            }
            for w in &settlements.villages[i + 1..] {
                assert!(v.position.distance(w.position) >= 40.0, "seed {seed}");
            }
        }

        for settlement in settlements.iter() {
            assert!(!settlement.name.is_empty());
        }
    }
}

#[test]
fn test_same_seed_same_map() {
    let a = FantasyMap::generate(MapConfig::default(), 31337);
    let mut b = FantasyMap::generate(MapConfig::default(), 1);
    b.regenerate_with_seed(31337);
    assert_eq!(a.field(), b.field());
    assert_eq!(a.settlements(), b.settlements());
}

#[test]
fn test_visibility_round_trip_every_kind() {
    let mut map = FantasyMap::generate(MapConfig::default(), 5);
    map.set_render_mode(RenderMode::Voronoi);
    let original = map.cache().image.clone();
    for kind in TerrainKind::ALL {
        map.set_terrain_visible(kind, false).unwrap();
        map.set_terrain_visible(kind, true).unwrap();
        assert_eq!(map.cache().image, original, "{kind}");
    }
}

#[test]
fn test_round_trip_with_a_hidden_kind_keeps_substitutes() {
    let mut map = FantasyMap::generate(MapConfig::default(), 9);
    map.set_terrain_visible(TerrainKind::Water, false).unwrap();
    for mode in [RenderMode::Pixel, RenderMode::Voronoi] {
        map.set_render_mode(mode);
        let original = map.cache().image.clone();
        for kind in [TerrainKind::Snow, TerrainKind::Grassland] {
            map.set_terrain_visible(kind, false).unwrap();
            map.set_terrain_visible(kind, true).unwrap();
            let differing = map
                .cache()
                .image
                .pixels()
                .iter()
                .zip(original.pixels())
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(differing, 0, "{mode} after toggling {kind}");
        }
    }
}

#[test]
fn test_hidden_water_is_never_painted_blue_in_pixel_mode() {
    let mut map = FantasyMap::generate(MapConfig::default(), 8);
    map.set_terrain_visible(TerrainKind::Water, false).unwrap();
    let water = TerrainKind::Water.color();
    let water_pixels = map
        .cache()
        .image
        .pixels()
        .iter()
        .filter(|c| **c == water)
        .count();
    assert_eq!(water_pixels, 0);
}

#[test]
fn test_invalid_sizes_are_rejected() {
    let mut map = FantasyMap::generate(MapConfig::default(), 3);
    let revision = map.cache().revision;
    for (w, h) in [(0, 600), (99, 600), (800, 4097), (u32::MAX, 100)] {
        assert_eq!(
            map.set_size(w, h),
            Err(MapError::InvalidSize {
                width: w,
                height: h
            })
        );
    }
    assert_eq!(map.config(), &MapConfig::default());
    assert_eq!(map.cache().revision, revision);
}

#[test]
fn test_drag_then_zoom_keeps_anchor() {
    let mut controller = InteractionController::new();
    let mut view = ViewState::default();

    controller.pointer_down(Pos2::new(100.0, 100.0));
    assert!(controller.pointer_move(Pos2::new(130.0, 80.0), &mut view));
    controller.pointer_up();
    assert!(!controller.pointer_move(Pos2::new(500.0, 500.0), &mut view));
    assert_eq!(view.pan, Vec2::new(30.0, -20.0));

    let cursor = Pos2::new(250.0, 175.0);
    let under_cursor = view.to_world(cursor);
    controller.wheel(-300.0, cursor, &mut view);
    assert!(view.zoom > 1.0);
    let after = view.to_local(under_cursor);
    assert!((after - cursor).length() < 1e-3, "{after:?}");
}

#[test]
fn test_zoom_stays_within_bounds() {
    let mut controller = InteractionController::new();
    let mut view = ViewState::default();
    let canvas = Vec2::new(800.0, 600.0);

    for _ in 0..50 {
        controller.zoom_in(canvas, &mut view);
    }
    assert_eq!(view.zoom, MAX_ZOOM);
    for _ in 0..50 {
        controller.wheel(500.0, Pos2::new(10.0, 10.0), &mut view);
    }
    assert_eq!(view.zoom, MIN_ZOOM);

    controller.reset_view(&mut view);
    assert_eq!(view, ViewState::default());
}
