use serde::{Deserialize, Serialize};

use crate::error::MapError;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_POINT_COUNT: usize = 3000;

pub const MIN_MAP_SIZE: u32 = 100;
pub const MAX_MAP_SIZE: u32 = 4096;

/// Size and density of a generated map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub width: u32,
    pub height: u32,
    pub point_count: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            point_count: DEFAULT_POINT_COUNT,
        }
    }
}

impl MapConfig {
    pub fn with_size(width: u32, height: u32) -> Result<Self, MapError> {
        validate_size(width, height)?;
        Ok(Self {
            width,
            height,
            ..Default::default()
        })
    }

    /// Padding added around the visible area when scattering points.
    pub fn padding(&self) -> f32 {
        self.width.max(self.height) as f32 * 0.2
    }

    pub fn width_f(&self) -> f32 {
        self.width as f32
    }

    pub fn height_f(&self) -> f32 {
        self.height as f32
    }

    /// The visible area `[0, width] x [0, height]`.
    pub fn bounds(&self) -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(self.width_f(), self.height_f()))
    }

    /// The visible area grown by [`Self::padding`] on every side.
    pub fn padded_bounds(&self) -> egui::Rect {
        self.bounds().expand(self.padding())
    }
}

pub fn validate_size(width: u32, height: u32) -> Result<(), MapError> {
    let range = MIN_MAP_SIZE..=MAX_MAP_SIZE;
    if range.contains(&width) && range.contains(&height) {
        Ok(())
    } else {
        Err(MapError::InvalidSize { width, height })
    }
}

/// Parse the width/height text inputs of the control panel.
pub fn parse_size(width: &str, height: &str) -> Result<(u32, u32), MapError> {
    let parse = |text: &str| {
        text.trim()
            .parse::<u32>()
            .map_err(|_| MapError::UnparsableSize(text.to_string()))
    };
    let size = (parse(width)?, parse(height)?);
    validate_size(size.0, size.1)?;
    Ok(size)
}
