use std::collections::HashMap;

use anyhow::{Result, anyhow};
use eframe::egui::Vec2;
use log::{info, warn};

use crate::data::GraphData;

use super::super::engine::{EdgePolicy, EngineConfig, GraphEngine};
use super::super::physics::{SimLink, SimNode, Simulation, SimulationConfig};
use super::super::surface::Surface;

/// Resolves `from`/`to` ids to node indices. Returns the links and how many
/// edges were dropped.
fn resolve_links(
    data: &GraphData,
    index_by_id: &HashMap<&str, usize>,
    policy: EdgePolicy,
) -> Result<(Vec<SimLink>, usize)> {
    let mut links = Vec::with_capacity(data.edges.len());
    let mut dropped = 0usize;

    for (position, edge) in data.edges.iter().enumerate() {
        let source = index_by_id.get(edge.from.as_str()).copied();
        let target = index_by_id.get(edge.to.as_str()).copied();

        match (source, target) {
            (Some(source), Some(target)) => links.push(SimLink {
                source,
                target,
                amount: edge.amount,
            }),
            _ if policy == EdgePolicy::Reject => {
                return Err(anyhow!(
                    "edge #{position} ({} -> {}) references a node that is not in the node list",
                    edge.from,
                    edge.to
                ));
            }
            _ => {
                warn!(
                    "dropping edge #{position} ({} -> {}): unknown endpoint",
                    edge.from, edge.to
                );
                dropped += 1;
            }
        }
    }

    Ok((links, dropped))
}

fn carried_positions(previous: Option<&GraphEngine>) -> HashMap<&str, Vec2> {
    previous
        .map(|engine| {
            engine
                .simulation()
                .nodes()
                .iter()
                .map(|node| (node.id.as_str(), node.pos))
                .collect()
        })
        .unwrap_or_default()
}

impl GraphEngine {
    pub(in crate::app) fn build(
        data: &GraphData,
        config: &EngineConfig,
        previous: Option<&GraphEngine>,
    ) -> Result<Self> {
        let index_by_id = data
            .nodes
            .iter()
            .enumerate()
            .map(|(index, id)| (id.as_str(), index))
            .collect::<HashMap<_, _>>();
        let (links, dropped) = resolve_links(data, &index_by_id, config.edge_policy)?;

        let carried = if config.preserve_layout {
            carried_positions(previous)
        } else {
            HashMap::new()
        };
        let mut carried_count = 0usize;
        let nodes = data
            .nodes
            .iter()
            .map(|id| {
                let mut node = SimNode::at_origin(id.as_str());
                if let Some(pos) = carried.get(id.as_str()) {
                    node.pos = *pos;
                    carried_count += 1;
                }
                node
            })
            .collect::<Vec<_>>();

        let surface = Surface::build(config.canvas, &nodes, &links);
        let simulation = Simulation::new(
            nodes,
            links,
            SimulationConfig::for_canvas(config.canvas, config.charge),
        );

        info!(
            "built graph engine: {} nodes, {} links, {} dropped edges, {} carried positions",
            simulation.nodes().len(),
            simulation.links().len(),
            dropped,
            carried_count
        );

        Ok(Self::from_parts(simulation, surface, dropped))
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;
    use crate::data::EdgeRecord;

    fn edge(from: &str, to: &str, amount: f64) -> EdgeRecord {
        EdgeRecord {
            from: from.to_owned(),
            to: to.to_owned(),
            timestamp: String::new(),
            amount,
        }
    }

    fn data() -> GraphData {
        GraphData {
            nodes: vec!["a".into(), "b".into(), "c".into()],
            edges: vec![
                edge("a", "b", 10.0),
                edge("b", "ghost", 20.0),
                edge("c", "a", 30.0),
                edge("nobody", "c", 40.0),
            ],
        }
    }

    #[test]
    fn drops_edges_with_missing_endpoints() {
        let engine = GraphEngine::build(&data(), &EngineConfig::default(), None)
            .expect("lenient build succeeds");

        assert_eq!(engine.surface().nodes().len(), 3);
        assert_eq!(engine.surface().links().len(), 2);
        assert_eq!(engine.simulation().links().len(), 2);
        assert_eq!(engine.dropped_edges(), 2);
        assert_eq!(engine.surface().links()[1].label, "30");
    }

    #[test]
    fn strict_policy_rejects_the_first_bad_edge() {
        let config = EngineConfig {
            edge_policy: EdgePolicy::Reject,
            ..EngineConfig::default()
        };

        let error = GraphEngine::build(&data(), &config, None)
            .err()
            .expect("strict build fails");

        assert!(error.to_string().contains("b -> ghost"));
    }

    #[test]
    fn nodes_start_at_the_origin_by_default() {
        let mut previous =
            GraphEngine::build(&data(), &EngineConfig::default(), None).expect("engine builds");
        for _ in 0..10 {
            previous.tick();
        }

        let engine = GraphEngine::build(&data(), &EngineConfig::default(), Some(&previous))
            .expect("engine builds");

        assert!(
            engine
                .simulation()
                .nodes()
                .iter()
                .all(|node| node.pos == Vec2::ZERO)
        );
    }

    #[test]
    fn preserve_layout_carries_positions_by_id() {
        let config = EngineConfig {
            preserve_layout: true,
            ..EngineConfig::default()
        };
        let mut previous = GraphEngine::build(&data(), &config, None).expect("engine builds");
        for _ in 0..10 {
            previous.tick();
        }
        let kept = previous.simulation().nodes()[2].pos;

        let next = GraphData {
            nodes: vec!["c".into(), "new".into()],
            edges: vec![edge("c", "new", 1.0)],
        };
        let engine = GraphEngine::build(&next, &config, Some(&previous)).expect("engine builds");

        assert_eq!(engine.simulation().nodes()[0].pos, kept);
        assert_eq!(engine.simulation().nodes()[1].pos, Vec2::ZERO);
        assert_eq!(engine.surface().nodes()[0].center, kept.to_pos2());
    }

    #[test]
    fn canvas_size_sets_the_centering_target() {
        let config = EngineConfig {
            canvas: vec2(200.0, 100.0),
            ..EngineConfig::default()
        };
        let mut engine = GraphEngine::build(&data(), &config, None).expect("engine builds");
        for _ in 0..400 {
            if !engine.tick() {
                break;
            }
        }

        let nodes = engine.simulation().nodes();
        let centroid = nodes.iter().fold(Vec2::ZERO, |sum, node| sum + node.pos) / nodes.len() as f32;
        assert!((centroid - vec2(100.0, 50.0)).length() < 1.0);
        assert_eq!(engine.surface().size(), vec2(200.0, 100.0));
    }
}
