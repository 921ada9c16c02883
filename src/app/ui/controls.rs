use eframe::egui::{self, Color32, RichText, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::super::ViewModel;
use super::super::render_utils::{DRAG_PALETTE, NODE_FILL, SELECTION_PALETTE};

const SELECTOR_ROWS: usize = 200;

/// Node ids matching `query`, best match first. An empty query keeps the
/// dataset order.
fn matching_nodes<'a>(nodes: &'a [String], query: &str) -> Vec<&'a str> {
    let query = query.trim();
    if query.is_empty() {
        return nodes.iter().map(String::as_str).collect();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored = nodes
        .iter()
        .filter_map(|id| {
            matcher
                .fuzzy_match(id, query)
                .map(|score| (score, id.as_str()))
        })
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored.into_iter().map(|(_, id)| id).collect()
}

fn legend_row(ui: &mut Ui, color: Color32, text: &str) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("●").color(color));
        ui.label(text);
    });
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Graph Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Select node");
        ui.text_edit_singleline(&mut self.selector_query)
            .on_hover_text("Fuzzy filter for the node list below");

        let matches = matching_nodes(&self.data.nodes, &self.selector_query);
        let mut choice = self.selector_choice.clone();
        egui::ComboBox::from_id_salt("node_selector")
            .selected_text(self.selector_choice.as_deref().unwrap_or("(none)"))
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                if matches.is_empty() {
                    ui.label("No matching nodes.");
                }
                for id in matches.iter().take(SELECTOR_ROWS) {
                    ui.selectable_value(&mut choice, Some((*id).to_owned()), *id);
                }
                if matches.len() > SELECTOR_ROWS {
                    ui.small(format!("{} more, refine the filter", matches.len() - SELECTOR_ROWS));
                }
            });
        if choice != self.selector_choice {
            self.select_external(choice);
        }

        let clear = ui.add_enabled(
            self.selector_choice.is_some(),
            egui::Button::new("Clear selection"),
        );
        if clear.clicked() {
            self.select_external(None);
        }

        ui.separator();

        ui.checkbox(&mut self.live_simulation, "Live simulation")
            .on_hover_text("Pause to freeze the layout; dragging still moves nodes");

        ui.separator();
        ui.label(RichText::new("Legend").strong());
        legend_row(ui, NODE_FILL, "account");
        legend_row(ui, DRAG_PALETTE.center, "dragged node");
        legend_row(ui, DRAG_PALETTE.neighbor, "dragged node's counterparties");
        legend_row(ui, SELECTION_PALETTE.center, "selected node");
        legend_row(ui, SELECTION_PALETTE.neighbor, "selected node's counterparties");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_owned()).collect()
    }

    #[test]
    fn empty_query_keeps_dataset_order() {
        let nodes = ids(&["Node3", "Node1", "Node2"]);

        assert_eq!(matching_nodes(&nodes, "  "), vec!["Node3", "Node1", "Node2"]);
    }

    #[test]
    fn filters_out_nodes_that_do_not_match() {
        let nodes = ids(&["alice", "bob", "alina"]);

        let found = matching_nodes(&nodes, "ali");

        assert_eq!(found.len(), 2);
        assert!(found.contains(&"alice"));
        assert!(found.contains(&"alina"));
    }

    #[test]
    fn matching_ignores_case() {
        let nodes = ids(&["Node1", "Other"]);

        assert_eq!(matching_nodes(&nodes, "NODE"), vec!["Node1"]);
    }
}
