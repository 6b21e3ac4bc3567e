use egui::emath::TSTransform;
use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 4.0;

/// Pan and zoom of the map canvas.
///
/// `pan` is in canvas pixels relative to the canvas origin; a map point `p`
/// appears at `origin + pan + p * zoom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub pan: Vec2,
    pub zoom: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl ViewState {
    pub fn set_pan(&mut self, pan: Vec2) {
        self.pan = pan;
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = clamp_zoom(zoom);
    }

    /// Scale by `factor` keeping the map point under `anchor` (canvas-local)
    /// in place.
    pub fn zoom_at(&mut self, anchor: Pos2, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let world = self.to_world(anchor);
        self.zoom = clamp_zoom(self.zoom * factor);
        self.pan = anchor.to_vec2() - world.to_vec2() * self.zoom;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Canvas-local position to map coordinates.
    pub fn to_world(&self, local: Pos2) -> Pos2 {
        ((local.to_vec2() - self.pan) / self.zoom).to_pos2()
    }

    /// Map coordinates to canvas-local position.
    pub fn to_local(&self, world: Pos2) -> Pos2 {
        (world.to_vec2() * self.zoom + self.pan).to_pos2()
    }

    /// Map-to-screen transform for a canvas whose top-left corner is `origin`.
    pub fn transform(&self, origin: Pos2) -> TSTransform {
        TSTransform::new(origin.to_vec2() + self.pan, self.zoom)
    }
}

fn clamp_zoom(zoom: f32) -> f32 {
    if zoom.is_nan() {
        1.0
    } else {
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    }
}
