use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};
use log::error;

use crate::data::{DataSource, GraphData, fetch_graph_data};

mod engine;
mod graph;
mod highlight;
mod physics;
mod render_utils;
mod surface;
mod ui;

pub use engine::{EdgePolicy, EngineConfig};
use engine::GraphEngine;

pub struct AppConfig {
    pub source: DataSource,
    pub engine: EngineConfig,
    pub initial_selection: Option<String>,
}

pub struct GraphApp {
    config: AppConfig,
    state: AppState,
    reload_rx: Option<Receiver<Result<GraphData, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<GraphData, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    data: GraphData,
    engine: GraphEngine,
    engine_config: EngineConfig,
    revision: u64,
    live_simulation: bool,
    selector_query: String,
    selector_choice: Option<String>,
    clicks_tx: Sender<String>,
    clicks_rx: Receiver<String>,
}

impl GraphApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let state = Self::start_load(config.source.clone());
        Self {
            config,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(source: DataSource) -> Receiver<Result<GraphData, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = fetch_graph_data(&source).map_err(|error| format!("{error:#}"));
            if let Err(error) = &result {
                error!("{error}");
            }
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(source: DataSource) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(source),
        }
    }

    fn ready_state(&mut self, data: GraphData) -> AppState {
        match ViewModel::new(data, self.config.engine) {
            Ok(mut model) => {
                if let Some(id) = self.config.initial_selection.take() {
                    model.select_external(Some(id));
                }
                AppState::Ready(Box::new(model))
            }
            Err(error) => AppState::Error(format!("{error:#}")),
        }
    }
}

impl eframe::App for GraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;
        let mut loaded = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(data)) => loaded = Some(data),
                    Ok(Err(error)) => transition = Some(AppState::Error(error)),
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition =
                            Some(AppState::Error("Background fetch worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading(format!("Loading transactions from {}...", self.config.source));
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the transaction graph");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    let retry = ui.add_enabled(
                        self.config.source.is_reloadable(),
                        egui::Button::new("Retry"),
                    );
                    if retry.clicked() {
                        transition = Some(Self::start_load(self.config.source.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                let can_reload = self.config.source.is_reloadable() && !is_reloading;
                model.show(ctx, &self.config.source, &mut reload_requested, can_reload);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.config.source.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(Ok(data)) => {
                            if let Err(error) = model.replace_data(data) {
                                transition = Some(AppState::Error(format!("{error:#}")));
                            }
                        }
                        Ok(Err(error)) => transition = Some(AppState::Error(error)),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(AppState::Error("Background fetch worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(data) = loaded {
            transition = Some(self.ready_state(data));
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
