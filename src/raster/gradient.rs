use egui::{Color32, Pos2};

use crate::terrain::TerrainKind;

/// Smooth-mode brush: a mirrored linear gradient along `start -> end`.
///
/// The colour is `edge` at both ends of the axis and `middle` halfway.
/// Points project onto the axis; beyond either end the edge colour holds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearBrush {
    pub start: Pos2,
    pub end: Pos2,
    pub edge: Color32,
    pub middle: Color32,
}

impl LinearBrush {
    pub fn new(start: Pos2, end: Pos2, edge: Color32, middle: Color32) -> Self {
        Self {
            start,
            end,
            edge,
            middle,
        }
    }

    /// Position of `pos` along the axis, 0 at `start` and 1 at `end`.
    pub fn axis_position(&self, pos: Pos2) -> f32 {
        let axis = self.end - self.start;
        let len_sq = axis.length_sq();
        if len_sq <= f32::EPSILON {
            return 0.0;
        }
        ((pos - self.start).dot(axis) / len_sq).clamp(0.0, 1.0)
    }

    pub fn color_at(&self, pos: Pos2) -> Color32 {
        // 折叠到 [0, 1]：两端为 0，中点为 1
        let towards_middle = 1.0 - (2.0 * self.axis_position(pos) - 1.0).abs();
        self.edge.lerp_to_gamma(self.middle, towards_middle)
    }

    /// Brush for a land category spanning `(0, 0) -> (width, height)`.
    /// Water has no brush; the base fill shows through.
    pub fn for_terrain(kind: TerrainKind, width: f32, height: f32) -> Option<Self> {
        let (edge, middle) = match kind {
            TerrainKind::DryPlains => (0x8B4513, 0xA0522D),
            TerrainKind::Grassland => (0x4CAF50, 0x45A049),
            TerrainKind::Rocky => (0xA9A9A9, 0x808080),
            TerrainKind::Snow => (0xFFFFFF, 0xF0F0F0),
            TerrainKind::Water => return None,
        };
        Some(Self::new(
            Pos2::ZERO,
            Pos2::new(width, height),
            hex(edge),
            hex(middle),
        ))
    }
}

fn hex(rgb: u32) -> Color32 {
    let [_, r, g, b] = rgb.to_be_bytes();
    Color32::from_rgb(r, g, b)
}
