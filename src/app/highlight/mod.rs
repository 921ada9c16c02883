mod collect;

use log::debug;

use super::render_utils::{
    DRAG_PALETTE, EmphasisPalette, LINK_LABEL, LINK_STROKE, NODE_FILL, NODE_LABEL,
    SELECTION_PALETTE,
};
use super::surface::Surface;

use self::collect::collect_highlight_set;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum Origin {
    Drag,
    Selection,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum Phase {
    Idle,
    Emphasized { node: usize, origin: Origin },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum HighlightEvent {
    DragStarted(usize),
    DragEnded(usize),
    Selected(usize),
    Deselected,
}

#[derive(Debug, Default)]
pub(in crate::app) struct Highlighter {
    selection: Option<usize>,
    drag: Option<usize>,
    touched_nodes: Vec<usize>,
    touched_links: Vec<usize>,
}

impl Highlighter {
    pub(in crate::app) fn phase(&self) -> Phase {
        if let Some(node) = self.drag {
            Phase::Emphasized {
                node,
                origin: Origin::Drag,
            }
        } else if let Some(node) = self.selection {
            Phase::Emphasized {
                node,
                origin: Origin::Selection,
            }
        } else {
            Phase::Idle
        }
    }

    /// Returns whether the visible emphasis changed.
    pub(in crate::app) fn apply(&mut self, surface: &mut Surface, event: HighlightEvent) -> bool {
        let (selection, drag) = match event {
            HighlightEvent::DragStarted(node) => (self.selection, Some(node)),
            HighlightEvent::DragEnded(node) if self.drag == Some(node) => (self.selection, None),
            HighlightEvent::DragEnded(_) => (self.selection, self.drag),
            HighlightEvent::Selected(node) => (Some(node), self.drag),
            HighlightEvent::Deselected => (None, self.drag),
        };

        if selection == self.selection && drag == self.drag {
            return false;
        }

        let before = self.phase();
        self.selection = selection;
        self.drag = drag;
        self.restyle(surface);
        debug!("highlight {before:?} -> {:?} on {event:?}", self.phase());
        true
    }

    pub(in crate::app) fn forget(&mut self) {
        *self = Self::default();
    }

    fn restyle(&mut self, surface: &mut Surface) {
        self.revert(surface);
        if let Some(node) = self.selection {
            self.emphasize(surface, node, SELECTION_PALETTE);
        }
        if let Some(node) = self.drag {
            self.emphasize(surface, node, DRAG_PALETTE);
        }
    }

    fn revert(&mut self, surface: &mut Surface) {
        for index in self.touched_nodes.drain(..) {
            if let Some(shape) = surface.node_mut(index) {
                shape.fill = NODE_FILL;
                shape.label_color = NODE_LABEL;
            }
        }
        for index in self.touched_links.drain(..) {
            if let Some(shape) = surface.link_mut(index) {
                shape.stroke = LINK_STROKE;
                shape.label_color = LINK_LABEL;
            }
        }
    }

    fn emphasize(&mut self, surface: &mut Surface, center: usize, palette: EmphasisPalette) {
        let set = collect_highlight_set(surface, center);

        for &index in &set.links {
            if let Some(shape) = surface.link_mut(index) {
                shape.stroke = palette.center;
                shape.label_color = palette.center;
                self.touched_links.push(index);
            }
        }
        for &index in &set.neighbors {
            if let Some(shape) = surface.node_mut(index) {
                shape.fill = palette.neighbor;
                shape.label_color = palette.neighbor;
                self.touched_nodes.push(index);
            }
        }
        if let Some(shape) = surface.node_mut(set.center) {
            shape.fill = palette.center;
            shape.label_color = palette.center;
            self.touched_nodes.push(set.center);
        }
    }
}
