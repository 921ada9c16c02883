use std::collections::HashMap;

use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Stroke, Vec2};

use crate::util::format_amount;

use super::physics::{SimLink, SimNode, TickListener};
use super::render_utils::{
    LABEL_FONT_SIZE, LINK_LABEL, LINK_STROKE, NODE_FILL, NODE_LABEL, NODE_RADIUS,
    canvas_to_screen, circle_contains, label_anchor, midpoint, stroke_width,
};

pub(super) struct NodeShape {
    pub(super) id: String,
    pub(super) center: Pos2,
    pub(super) fill: Color32,
    pub(super) label_color: Color32,
}

pub(super) struct LinkShape {
    pub(super) source: usize,
    pub(super) target: usize,
    pub(super) start: Pos2,
    pub(super) end: Pos2,
    pub(super) width: f32,
    pub(super) stroke: Color32,
    pub(super) label: String,
    pub(super) label_color: Color32,
}

pub(super) struct Surface {
    size: Vec2,
    nodes: Vec<NodeShape>,
    links: Vec<LinkShape>,
    index_by_id: HashMap<String, usize>,
    incident: Vec<Vec<usize>>,
}

impl Surface {
    pub(super) fn build(size: Vec2, nodes: &[SimNode], links: &[SimLink]) -> Self {
        let node_shapes = nodes
            .iter()
            .map(|node| NodeShape {
                id: node.id.clone(),
                center: node.pos.to_pos2(),
                fill: NODE_FILL,
                label_color: NODE_LABEL,
            })
            .collect::<Vec<_>>();

        let mut incident = vec![Vec::new(); nodes.len()];
        let mut link_shapes = Vec::with_capacity(links.len());
        for link in links {
            let (Some(source), Some(target)) = (nodes.get(link.source), nodes.get(link.target))
            else {
                continue;
            };

            let index = link_shapes.len();
            incident[link.source].push(index);
            if link.target != link.source {
                incident[link.target].push(index);
            }

            link_shapes.push(LinkShape {
                source: link.source,
                target: link.target,
                start: source.pos.to_pos2(),
                end: target.pos.to_pos2(),
                width: stroke_width(link.amount),
                stroke: LINK_STROKE,
                label: format_amount(link.amount),
                label_color: LINK_LABEL,
            });
        }

        let index_by_id = node_shapes
            .iter()
            .enumerate()
            .map(|(index, shape)| (shape.id.clone(), index))
            .collect();

        Self {
            size,
            nodes: node_shapes,
            links: link_shapes,
            index_by_id,
            incident,
        }
    }

    pub(super) fn size(&self) -> Vec2 {
        self.size
    }

    pub(super) fn nodes(&self) -> &[NodeShape] {
        &self.nodes
    }

    pub(super) fn links(&self) -> &[LinkShape] {
        &self.links
    }

    pub(super) fn node_mut(&mut self, index: usize) -> Option<&mut NodeShape> {
        self.nodes.get_mut(index)
    }

    pub(super) fn link_mut(&mut self, index: usize) -> Option<&mut LinkShape> {
        self.links.get_mut(index)
    }

    pub(super) fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub(super) fn incident_links(&self, index: usize) -> &[usize] {
        self.incident.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(super) fn node_at(&self, point: Pos2) -> Option<usize> {
        self.nodes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, node)| circle_contains(node.center, NODE_RADIUS, point))
            .map(|(index, _)| index)
    }

    pub(super) fn clear(&mut self) {
        self.nodes.clear();
        self.links.clear();
        self.index_by_id.clear();
        self.incident.clear();
    }

    pub(super) fn paint(&self, painter: &Painter, origin: Pos2) {
        let font = FontId::proportional(LABEL_FONT_SIZE);

        for link in &self.links {
            painter.line_segment(
                [canvas_to_screen(origin, link.start), canvas_to_screen(origin, link.end)],
                Stroke::new(link.width, link.stroke),
            );
        }

        for link in &self.links {
            painter.text(
                canvas_to_screen(origin, midpoint(link.start, link.end)),
                Align2::LEFT_BOTTOM,
                &link.label,
                font.clone(),
                link.label_color,
            );
        }

        for node in &self.nodes {
            painter.circle_filled(canvas_to_screen(origin, node.center), NODE_RADIUS, node.fill);
        }

        for node in &self.nodes {
            painter.text(
                canvas_to_screen(origin, label_anchor(node.center)),
                Align2::LEFT_BOTTOM,
                &node.id,
                font.clone(),
                node.label_color,
            );
        }
    }
}

impl TickListener for Surface {
    fn on_tick(&mut self, nodes: &[SimNode], _links: &[SimLink]) {
        for (shape, node) in self.nodes.iter_mut().zip(nodes) {
            shape.center = node.pos.to_pos2();
        }

        for link in &mut self.links {
            if let (Some(source), Some(target)) = (nodes.get(link.source), nodes.get(link.target)) {
                link.start = source.pos.to_pos2();
                link.end = target.pos.to_pos2();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    fn sample() -> Surface {
        let nodes = vec![
            SimNode::at_origin("Person_1"),
            SimNode::at_origin("Person_2"),
            SimNode::at_origin("Person_3"),
        ];
        let links = vec![
            SimLink { source: 0, target: 1, amount: 100.0 },
            SimLink { source: 2, target: 0, amount: 400.0 },
        ];
        Surface::build(vec2(800.0, 600.0), &nodes, &links)
    }

    #[test]
    fn builds_one_shape_per_node_and_link() {
        let surface = sample();

        assert_eq!(surface.nodes().len(), 3);
        assert_eq!(surface.links().len(), 2);
        assert_eq!(surface.links()[0].label, "100");
        assert!((surface.links()[1].width - 8f32.sqrt()).abs() < 1e-6);
        assert!(surface.nodes().iter().all(|node| node.fill == NODE_FILL));
        assert!(surface.links().iter().all(|link| link.stroke == LINK_STROKE));
    }

    #[test]
    fn resolves_incident_links_once() {
        let surface = sample();

        assert_eq!(surface.index_of("Person_3"), Some(2));
        assert_eq!(surface.incident_links(0), &[0, 1]);
        assert_eq!(surface.incident_links(1), &[0]);
        assert!(surface.incident_links(99).is_empty());
    }

    #[test]
    fn follows_simulation_positions_on_tick() {
        let mut surface = sample();
        let mut nodes = vec![
            SimNode::at_origin("Person_1"),
            SimNode::at_origin("Person_2"),
            SimNode::at_origin("Person_3"),
        ];
        nodes[0].pos = vec2(10.0, 20.0);
        nodes[1].pos = vec2(30.0, 40.0);
        let links = vec![SimLink { source: 0, target: 1, amount: 100.0 }];

        surface.on_tick(&nodes, &links);

        assert_eq!(surface.nodes()[1].center, Pos2::new(30.0, 40.0));
        assert_eq!(surface.links()[0].start, Pos2::new(10.0, 20.0));
        assert_eq!(surface.links()[0].end, Pos2::new(30.0, 40.0));
        assert_eq!(surface.links()[1].end, Pos2::new(10.0, 20.0));
    }

    #[test]
    fn hit_test_prefers_the_topmost_node() {
        let surface = sample();
        assert_eq!(surface.node_at(Pos2::new(3.0, 3.0)), Some(2));
        assert_eq!(surface.node_at(Pos2::new(300.0, 300.0)), None);
    }

    #[test]
    fn clear_removes_everything() {
        let mut surface = sample();
        surface.clear();

        assert!(surface.nodes().is_empty());
        assert!(surface.links().is_empty());
        assert_eq!(surface.index_of("Person_1"), None);
        assert_eq!(surface.node_at(Pos2::ZERO), None);
    }
}
