use eframe::egui::{Align2, Color32, CursorIcon, FontId, Sense, Ui};

use super::super::ViewModel;
use super::super::render_utils::draw_background;

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let size = self.engine.surface().size();
        let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect);
        self.handle_graph_pointer(ui, &response, rect.min);

        if self.live_simulation && self.engine.tick() {
            ui.ctx().request_repaint();
        }
        if self.engine.is_dragging() {
            ui.ctx().request_repaint();
        }

        self.engine.surface().paint(&painter, rect.min);

        if self.engine.surface().nodes().is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No accounts in the current data.",
                FontId::proportional(14.0),
                Color32::from_gray(160),
            );
        }

        if let Some(index) = self.hovered_node(&response, rect.min)
            && let Some(node) = self.engine.surface().nodes().get(index)
        {
            ui.ctx().set_cursor_icon(if self.engine.is_dragging() {
                CursorIcon::Grabbing
            } else {
                CursorIcon::PointingHand
            });
            let pinned = self
                .engine
                .simulation()
                .nodes()
                .get(index)
                .is_some_and(|sim_node| sim_node.is_pinned());
            let text = if pinned {
                format!("{} (pinned)", node.id)
            } else {
                node.id.clone()
            };
            response.on_hover_text_at_pointer(text);
        }
    }
}
