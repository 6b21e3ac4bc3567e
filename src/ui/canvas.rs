use egui::{Response, Sense, Ui, Widget};

use super::input::InteractionController;
use crate::compositor::{paint_map, MapTexture};
use crate::map::FantasyMap;

/// The interactive map surface: input first, then the cached map and labels.
pub struct MapCanvas<'a> {
    pub map: &'a mut FantasyMap,
    pub controller: &'a mut InteractionController,
    pub texture: &'a mut MapTexture,
}

impl Widget for MapCanvas<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let desired_size = ui.available_size();
        let (screen_rect, response) = ui.allocate_exact_size(desired_size, Sense::click_and_drag());

        self.controller.update(ui, &response, self.map.view_mut());

        let texture = self.texture.sync(ui.ctx(), self.map.cache());
        paint_map(
            ui.painter(),
            screen_rect,
            self.map.view(),
            texture,
            self.map.config().bounds().size(),
            self.map.settlements(),
        );

        response
    }
}
