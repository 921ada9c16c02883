use eframe::egui::{Pos2, Vec2, vec2};
use log::warn;

use super::highlight::{HighlightEvent, Highlighter, Phase};
use super::physics::{DRAG_ALPHA_TARGET, Simulation, TickListener};
use super::surface::Surface;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgePolicy {
    #[default]
    Drop,
    Reject,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    pub canvas: Vec2,
    pub charge: f32,
    pub edge_policy: EdgePolicy,
    pub preserve_layout: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas: vec2(800.0, 600.0),
            charge: -200.0,
            edge_policy: EdgePolicy::Drop,
            preserve_layout: false,
        }
    }
}

pub(in crate::app) type ClickHandler = Box<dyn FnMut(&str)>;

pub(in crate::app) struct GraphEngine {
    simulation: Simulation,
    surface: Surface,
    highlighter: Highlighter,
    selected: Option<String>,
    dragging: Option<usize>,
    dropped_edges: usize,
    on_node_click: Option<ClickHandler>,
}

impl GraphEngine {
    pub(in crate::app) fn from_parts(
        simulation: Simulation,
        surface: Surface,
        dropped_edges: usize,
    ) -> Self {
        Self {
            simulation,
            surface,
            highlighter: Highlighter::default(),
            selected: None,
            dragging: None,
            dropped_edges,
            on_node_click: None,
        }
    }

    pub(in crate::app) fn with_click_handler(mut self, handler: impl FnMut(&str) + 'static) -> Self {
        self.on_node_click = Some(Box::new(handler));
        self
    }

    pub(in crate::app) fn surface(&self) -> &Surface {
        &self.surface
    }

    pub(in crate::app) fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub(in crate::app) fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub(in crate::app) fn phase(&self) -> Phase {
        self.highlighter.phase()
    }

    pub(in crate::app) fn dropped_edges(&self) -> usize {
        self.dropped_edges
    }

    pub(in crate::app) fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    pub(in crate::app) fn node_at(&self, point: Pos2) -> Option<usize> {
        self.surface.node_at(point)
    }

    /// Runs one simulation step and syncs the surface. Returns whether
    /// another step should be scheduled.
    pub(in crate::app) fn tick(&mut self) -> bool {
        self.simulation.step(&mut self.surface)
    }

    pub(in crate::app) fn reheat(&mut self) {
        self.simulation.restart();
    }

    pub(in crate::app) fn drag_start(&mut self, index: usize) {
        if self.dragging.is_some_and(|current| current != index) {
            self.drag_end();
        }

        let Some(node) = self.simulation.node_mut(index) else {
            return;
        };
        let at = node.pos;
        node.pin(at);
        self.simulation.reheat(DRAG_ALPHA_TARGET);
        self.dragging = Some(index);
        self.highlighter
            .apply(&mut self.surface, HighlightEvent::DragStarted(index));
    }

    pub(in crate::app) fn drag_move(&mut self, point: Pos2) {
        let Some(index) = self.dragging else {
            return;
        };
        let Some(node) = self.simulation.node_mut(index) else {
            return;
        };

        node.pin(point.to_vec2());
        node.pos = point.to_vec2();
        self.surface
            .on_tick(self.simulation.nodes(), self.simulation.links());
    }

    pub(in crate::app) fn drag_end(&mut self) {
        let Some(index) = self.dragging.take() else {
            return;
        };

        self.simulation.cool();
        if let Some(node) = self.simulation.node_mut(index) {
            node.unpin();
        }
        self.highlighter
            .apply(&mut self.surface, HighlightEvent::DragEnded(index));
    }

    pub(in crate::app) fn click(&mut self, index: usize) {
        let Some(id) = self.surface.nodes().get(index).map(|node| node.id.clone()) else {
            return;
        };

        self.select_index(index, id.clone());
        if let Some(handler) = self.on_node_click.as_mut() {
            handler(&id);
        }
    }

    pub(in crate::app) fn click_at(&mut self, point: Pos2) -> bool {
        match self.surface.node_at(point) {
            Some(index) => {
                self.click(index);
                true
            }
            None => false,
        }
    }

    pub(in crate::app) fn set_selected(&mut self, id: Option<&str>) {
        if self.selected.as_deref() == id {
            return;
        }

        let Some(id) = id else {
            self.deselect();
            return;
        };

        match self.surface.index_of(id) {
            Some(index) => self.select_index(index, id.to_owned()),
            None => {
                warn!("ignoring selection of unknown node {id:?}");
                self.deselect();
            }
        }
    }

    pub(in crate::app) fn clear(&mut self) {
        self.simulation.stop();
        self.surface.clear();
        self.highlighter.forget();
        self.selected = None;
        self.dragging = None;
    }

    fn select_index(&mut self, index: usize, id: String) {
        self.selected = Some(id);
        self.highlighter
            .apply(&mut self.surface, HighlightEvent::Selected(index));
    }

    fn deselect(&mut self) {
        self.selected = None;
        self.highlighter
            .apply(&mut self.surface, HighlightEvent::Deselected);
    }
}
