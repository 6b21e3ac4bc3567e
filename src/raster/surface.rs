use egui::{Color32, ColorImage, Pos2};

/// Off-screen RGBA surface the render cache is drawn into.
///
/// Pixel `(x, y)` covers `[x, x + 1) x [y, y + 1)`; fills test pixel centres.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Color32>,
}

impl Raster {
    pub fn new(width: usize, height: usize, fill: Color32) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> [usize; 2] {
        [self.width, self.height]
    }

    pub fn pixels(&self) -> &[Color32] {
        &self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    pub fn set(&mut self, x: i64, y: i64, color: Color32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    pub fn fill(&mut self, color: Color32) {
        self.pixels.fill(color);
    }

    /// Fill an axis-aligned rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Color32) {
        let x0 = x.max(0) as usize;
        let y0 = y.max(0) as usize;
        let x1 = (x + w).clamp(0, self.width as i64) as usize;
        let y1 = (y + h).clamp(0, self.height as i64) as usize;
        for row in y0..y1 {
            let start = row * self.width;
            self.pixels[start + x0.min(x1)..start + x1].fill(color);
        }
    }

    pub fn fill_polygon(&mut self, polygon: &[Pos2], color: Color32) {
        self.fill_polygon_with(polygon, |_| color);
    }

    /// Scanline fill (even-odd) of a closed polygon, colouring each covered
    /// pixel with `shade(pixel_centre)`.
    pub fn fill_polygon_with(&mut self, polygon: &[Pos2], mut shade: impl FnMut(Pos2) -> Color32) {
        if polygon.len() < 3 || self.width == 0 || self.height == 0 {
            return;
        }

        let (min_y, max_y) = polygon
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.y), hi.max(p.y))
            });
        let first_row = (min_y - 0.5).ceil().max(0.0) as usize;
        let end_row = ((max_y - 0.5).ceil().max(0.0) as usize).min(self.height);

        let mut crossings = Vec::with_capacity(8);
        for row in first_row..end_row {
            let yc = row as f32 + 0.5;
            crossings.clear();
            for (i, &a) in polygon.iter().enumerate() {
                let b = polygon[(i + 1) % polygon.len()];
                if (a.y <= yc && yc < b.y) || (b.y <= yc && yc < a.y) {
                    crossings.push(a.x + (yc - a.y) * (b.x - a.x) / (b.y - a.y));
                }
            }
            crossings.sort_by(f32::total_cmp);

            for span in crossings.chunks_exact(2) {
                let start = (span[0] - 0.5).ceil().max(0.0) as usize;
                let end = ((span[1] - 0.5).ceil().max(0.0) as usize).min(self.width);
                for col in start..end {
                    let color = shade(Pos2::new(col as f32 + 0.5, yc));
                    self.pixels[row * self.width + col] = color;
                }
            }
        }
    }

    /// Plain-text PPM (P3) of the surface, alpha dropped.
    pub fn to_ppm(&self) -> String {
        let mut ppm = format!("P3\n{} {}\n255\n", self.width, self.height);
        for row in self.pixels.chunks(self.width.max(1)) {
            let line: Vec<String> = row
                .iter()
                .map(|c| format!("{} {} {}", c.r(), c.g(), c.b()))
                .collect();
            ppm.push_str(&line.join(" "));
            ppm.push('\n');
        }
        ppm
    }

    pub fn to_color_image(&self) -> ColorImage {
        ColorImage {
            size: self.size(),
            pixels: self.pixels.clone(),
        }
    }
}
