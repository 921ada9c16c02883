use eframe::egui::{self, PointerButton, Pos2, Ui};

use super::super::ViewModel;
use super::super::render_utils::screen_to_canvas;

impl ViewModel {
    pub(in crate::app) fn handle_graph_pointer(
        &mut self,
        ui: &Ui,
        response: &egui::Response,
        origin: Pos2,
    ) {
        if response.drag_started_by(PointerButton::Primary)
            && let Some(press) = ui.input(|input| input.pointer.press_origin())
            && let Some(index) = self.engine.node_at(screen_to_canvas(origin, press))
        {
            self.engine.drag_start(index);
        }

        if self.engine.is_dragging() {
            if response.dragged_by(PointerButton::Primary)
                && let Some(pointer) = response.interact_pointer_pos()
            {
                self.engine.drag_move(screen_to_canvas(origin, pointer));
            }

            if response.drag_stopped() || !response.dragged() {
                self.engine.drag_end();
            }
        }

        if response.clicked_by(PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
        {
            self.engine.click_at(screen_to_canvas(origin, pointer));
        }
    }

    pub(in crate::app) fn hovered_node(&self, response: &egui::Response, origin: Pos2) -> Option<usize> {
        let pointer = response.hover_pos()?;
        self.engine.node_at(screen_to_canvas(origin, pointer))
    }
}
