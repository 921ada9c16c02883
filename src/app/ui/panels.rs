use std::sync::mpsc;

use anyhow::Result;
use eframe::egui::{self, Align, Context, Layout};
use log::info;

use crate::data::{DataSource, GraphData};

use super::super::engine::{EngineConfig, GraphEngine};
use super::super::highlight::{Origin, Phase};
use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(data: GraphData, engine_config: EngineConfig) -> Result<Self> {
        let (clicks_tx, clicks_rx) = mpsc::channel();
        let engine = Self::engine_for(&data, &engine_config, None, &clicks_tx)?;

        Ok(Self {
            data,
            engine,
            engine_config,
            revision: 0,
            live_simulation: true,
            selector_query: String::new(),
            selector_choice: None,
            clicks_tx,
            clicks_rx,
        })
    }

    fn engine_for(
        data: &GraphData,
        config: &EngineConfig,
        previous: Option<&GraphEngine>,
        clicks_tx: &mpsc::Sender<String>,
    ) -> Result<GraphEngine> {
        let clicks_tx = clicks_tx.clone();
        Ok(GraphEngine::build(data, config, previous)?.with_click_handler(move |id| {
            let _ = clicks_tx.send(id.to_owned());
        }))
    }

    pub(in crate::app) fn replace_data(&mut self, data: GraphData) -> Result<()> {
        let next = Self::engine_for(&data, &self.engine_config, Some(&self.engine), &self.clicks_tx)?;

        self.engine.clear();
        self.engine = next;
        self.data = data;
        self.revision += 1;
        self.selector_choice = None;
        while self.clicks_rx.try_recv().is_ok() {}

        info!(
            "reloaded transaction data (revision {}): {} nodes, {} edges",
            self.revision,
            self.data.node_count(),
            self.data.edge_count()
        );
        Ok(())
    }

    pub(in crate::app) fn select_external(&mut self, id: Option<String>) {
        self.engine.set_selected(id.as_deref());
        self.selector_choice = self.engine.selected().map(str::to_owned);
    }

    fn drain_node_clicks(&mut self) {
        while let Ok(id) = self.clicks_rx.try_recv() {
            self.selector_choice = Some(id);
        }
    }

    fn status_text(&self) -> String {
        if let Phase::Emphasized {
            node,
            origin: Origin::Drag,
        } = self.engine.phase()
        {
            let id = self.engine.surface().nodes().get(node).map_or("", |shape| shape.id.as_str());
            format!("dragging {id}")
        } else if self.engine.simulation().is_running() {
            format!("alpha {:.3}", self.engine.simulation().alpha())
        } else {
            "settled".to_owned()
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        source: &DataSource,
        reload_requested: &mut bool,
        can_reload: bool,
    ) {
        self.drain_node_clicks();

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("tx-graph");
                    ui.separator();
                    ui.label(format!("source: {source}"));
                    ui.label(format!("nodes: {}", self.data.node_count()));
                    ui.label(format!("edges: {}", self.data.edge_count()));
                    if self.engine.dropped_edges() > 0 {
                        ui.label(format!("dropped: {}", self.engine.dropped_edges()))
                            .on_hover_text("Edges whose endpoints are missing from the node list");
                    }
                    let reload_button =
                        ui.add_enabled(can_reload, egui::Button::new("Reload data"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    if ui.button("Reheat layout").clicked() {
                        self.engine.reheat();
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.status_text());
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both()
                .id_salt("graph_canvas")
                .show(ui, |ui| self.draw_graph(ui));
        });
    }
}
