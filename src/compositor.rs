use egui::{
    Color32, ColorImage, Context, FontId, Painter, Pos2, Rect, TextureHandle, TextureId,
    TextureOptions, Vec2,
};
use rand::Rng;

use crate::raster::{render_terrain, Raster, RenderMode, TerrainScene};
use crate::settlement::{Settlement, Settlements, Tier};
use crate::terrain::WATER_COLOR;
use crate::view::ViewState;

/// Cell size of the path and glyph grid.
pub const GLYPH_CELL: i64 = 2;

pub const LABEL_FONT_SIZE: f32 = 12.0;

/// Translucent white behind settlement names.
pub fn label_plate() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 255, 255, 178)
}

/// The off-screen map image plus a revision bumped on every rebuild.
#[derive(Debug, Clone)]
pub struct RenderCache {
    pub image: Raster,
    pub revision: u64,
}

impl RenderCache {
    /// Terrain first, then paths, then glyphs.
    pub fn build<R: Rng + ?Sized>(
        mode: RenderMode,
        scene: TerrainScene<'_>,
        settlements: &Settlements,
        revision: u64,
        rng: &mut R,
    ) -> Self {
        let mut image = render_terrain(mode, scene, rng);
        paint_settlements(&mut image, settlements);
        Self { image, revision }
    }

    pub fn to_color_image(&self) -> ColorImage {
        self.image.to_color_image()
    }
}

pub fn paint_settlements(raster: &mut Raster, settlements: &Settlements) {
    for tier in [Tier::City, Tier::Village] {
        draw_path(raster, &settlements.path(tier), tier.path_color());
    }

    let (width, height) = (raster.width() as f32, raster.height() as f32);
    for settlement in settlements.iter() {
        let p = settlement.position;
        if p.x >= 0.0 && p.x <= width && p.y >= 0.0 && p.y <= height {
            draw_glyph(raster, settlement);
        }
    }
}

/// Stepped line through `points` on the glyph grid.
pub fn draw_path(raster: &mut Raster, points: &[Pos2], color: Color32) {
    let to_grid = |p: Pos2| {
        (
            (p.x / GLYPH_CELL as f32).floor() as i64,
            (p.y / GLYPH_CELL as f32).floor() as i64,
        )
    };
    for pair in points.windows(2) {
        for (gx, gy) in bresenham(to_grid(pair[0]), to_grid(pair[1])) {
            raster.fill_rect(gx * GLYPH_CELL, gy * GLYPH_CELL, GLYPH_CELL, GLYPH_CELL, color);
        }
    }
}

/// Grid cells of the line `from -> to`, both ends included.
pub fn bresenham(from: (i64, i64), to: (i64, i64)) -> Vec<(i64, i64)> {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut cells = Vec::with_capacity((dx - dy + 1) as usize);
    loop {
        cells.push((x, y));
        if (x, y) == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    cells
}

/// Bordered square marker: outer ring of grid cells in the border colour,
/// interior in the fill colour.
pub fn draw_glyph(raster: &mut Raster, settlement: &Settlement) {
    let size = settlement.tier.glyph_size();
    let half = size as f32 / 2.0;
    let x0 = (settlement.position.x - half).floor() as i64;
    let y0 = (settlement.position.y - half).floor() as i64;

    raster.fill_rect(x0, y0, size, size, settlement.tier.border_color());
    let inner = size - 2 * GLYPH_CELL;
    if inner > 0 {
        raster.fill_rect(
            x0 + GLYPH_CELL,
            y0 + GLYPH_CELL,
            inner,
            inner,
            settlement.tier.fill_color(),
        );
    }
}

// ============================================================================
// 画布输出
// ============================================================================

/// GPU copy of the render cache, re-uploaded only when the revision changes.
#[derive(Default)]
pub struct MapTexture {
    handle: Option<TextureHandle>,
    revision: Option<u64>,
}

impl MapTexture {
    pub fn sync(&mut self, ctx: &Context, cache: &RenderCache) -> TextureId {
        if self.revision == Some(cache.revision) {
            if let Some(handle) = &self.handle {
                return handle.id();
            }
        }

        let image = cache.to_color_image();
        let id = if let Some(handle) = self.handle.as_mut() {
            handle.set(image, TextureOptions::NEAREST);
            handle.id()
        } else {
            let handle = ctx.load_texture("map_cache", image, TextureOptions::NEAREST);
            let id = handle.id();
            self.handle = Some(handle);
            id
        };
        log::debug!("上传地图纹理 revision={}", cache.revision);
        self.revision = Some(cache.revision);
        id
    }
}

/// Draw the cached map and the settlement labels into `canvas`.
pub fn paint_map(
    painter: &Painter,
    canvas: Rect,
    view: &ViewState,
    texture: TextureId,
    cache_size: Vec2,
    settlements: &Settlements,
) {
    let painter = painter.with_clip_rect(canvas);
    // 先铺满水色，平移时不露出空白
    painter.rect_filled(canvas, 0.0, WATER_COLOR);

    let to_screen = view.transform(canvas.min);
    let map_rect = to_screen * Rect::from_min_size(Pos2::ZERO, cache_size);
    let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
    painter.image(texture, map_rect, uv, Color32::WHITE);

    let bounds = Rect::from_min_size(Pos2::ZERO, cache_size);
    for settlement in settlements.iter() {
        if bounds.contains(settlement.position) {
            paint_label(&painter, view, canvas.min, settlement);
        }
    }
}

fn paint_label(painter: &Painter, view: &ViewState, origin: Pos2, settlement: &Settlement) {
    let to_screen = view.transform(origin);
    let color = settlement.tier.border_color();
    let galley = painter.layout_no_wrap(
        settlement.name.clone(),
        FontId::proportional(LABEL_FONT_SIZE * view.zoom),
        color,
    );
    let text_width = galley.size().x / view.zoom;

    let Pos2 { x, y } = settlement.position;
    let plate = Rect::from_min_size(
        Pos2::new(x - text_width / 2.0 - 4.0, y - 24.0),
        Vec2::new(text_width + 8.0, 16.0),
    );
    painter.rect_filled(to_screen * plate, 0.0, label_plate());

    let anchor = to_screen * Pos2::new(x, y - 16.0);
    painter.galley(anchor - galley.size() / 2.0, galley, color);
}
