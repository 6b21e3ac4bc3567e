use egui::{Align, Layout};

use crate::compositor::MapTexture;
use crate::config::{MapConfig, MAX_MAP_SIZE, MIN_MAP_SIZE};
use crate::map::FantasyMap;
use crate::terrain::TerrainKind;
use crate::ui::{InteractionController, MapCanvas};

pub struct ChizuApp {
    map: FantasyMap,
    controller: InteractionController,
    texture: MapTexture,

    /// Size of the map canvas in the last frame; zoom buttons anchor at its centre.
    canvas_size: egui::Vec2,
    seed_input: u64,
    width_input: String,
    height_input: String,
    /// Last rejected input, shown under the controls.
    error: Option<String>,
}

impl Default for ChizuApp {
    fn default() -> Self {
        let config = MapConfig::default();
        let seed = rand::random();
        Self {
            map: FantasyMap::generate(config, seed),
            controller: InteractionController::new(),
            texture: MapTexture::default(),
            canvas_size: config.bounds().size(),
            seed_input: seed,
            width_input: config.width.to_string(),
            height_input: config.height.to_string(),
            error: None,
        }
    }
}

impl ChizuApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Default::default()
    }

    fn regenerate(&mut self) {
        self.map.regenerate();
        self.seed_input = self.map.seed();
        self.error = None;
    }

    fn report<T>(&mut self, result: Result<T, crate::error::MapError>) {
        match result {
            Ok(_) => self.error = None,
            Err(err) => {
                log::warn!("{err}");
                self.error = Some(err.to_string());
            }
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        let canvas_size = self.canvas_size;
        ui.heading("Map");
        if ui.button("New map").clicked() {
            self.regenerate();
        }
        ui.horizontal(|ui| {
            ui.label("Seed");
            ui.add(egui::DragValue::new(&mut self.seed_input).speed(1));
            if ui.button("Generate").clicked() {
                self.map.regenerate_with_seed(self.seed_input);
            }
        });

        ui.separator();
        ui.label(format!("Size ({MIN_MAP_SIZE}..={MAX_MAP_SIZE})"));
        ui.horizontal(|ui| {
            ui.add(egui::TextEdit::singleline(&mut self.width_input).desired_width(48.0));
            ui.label("x");
            ui.add(egui::TextEdit::singleline(&mut self.height_input).desired_width(48.0));
        });
        if ui.button("Resize").clicked() {
            let result = self
                .map
                .set_size_from_text(&self.width_input, &self.height_input);
            self.report(result);
            self.seed_input = self.map.seed();
        }

        ui.separator();
        ui.heading("Rendering");
        if ui
            .button(format!("Mode: {}", self.map.render_mode()))
            .clicked()
        {
            self.map.cycle_render_mode();
        }
        ui.with_layout(Layout::top_down(Align::LEFT), |ui| {
            for kind in TerrainKind::ALL {
                let mut visible = self.map.visibility().is_visible(kind);
                if ui.checkbox(&mut visible, kind.label()).changed() {
                    let result = self.map.set_terrain_visible(kind, visible);
                    self.report(result);
                }
            }
        });

        ui.separator();
        ui.heading("View");
        ui.horizontal(|ui| {
            if ui.button("+").clicked() {
                self.controller.zoom_in(canvas_size, self.map.view_mut());
            }
            if ui.button("-").clicked() {
                self.controller.zoom_out(canvas_size, self.map.view_mut());
            }
            if ui.button("Reset view").clicked() {
                self.controller.reset_view(self.map.view_mut());
            }
        });
        ui.label(format!("Zoom: {:.0}%", self.map.view().zoom * 100.0));

        if let Some(error) = &self.error {
            ui.colored_label(ui.visuals().error_fg_color, error);
        }

        ui.separator();
        ui.heading("Settlements");
        egui::ScrollArea::vertical().show(ui, |ui| {
            for settlement in self.map.settlements().iter() {
                ui.label(format!(
                    "{} {}: ({:.2}, {:.2})",
                    settlement.tier.label(),
                    settlement.name,
                    settlement.position.x,
                    settlement.position.y
                ));
            }
        });
    }
}

impl eframe::App for ChizuApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("controls").show(ctx, |ui| {
            self.controls(ui);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::default())
            .show(ctx, |ui| {
                let response = ui.add(MapCanvas {
                    map: &mut self.map,
                    controller: &mut self.controller,
                    texture: &mut self.texture,
                });
                self.canvas_size = response.rect.size();
            });

        if ctx.input(|i| {
            i.key_pressed(egui::Key::R) && i.modifiers.matches_logically(egui::Modifiers::CTRL)
        }) {
            self.regenerate();
        }
    }
}
