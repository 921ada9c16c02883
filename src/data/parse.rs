use std::collections::HashSet;

use anyhow::{Context, Result, anyhow};

use super::graph::GraphData;

pub fn parse_graph_data(raw: &str) -> Result<GraphData> {
    let data: GraphData =
        serde_json::from_str(raw).context("invalid graph JSON (expected {nodes, edges})")?;

    let mut seen = HashSet::with_capacity(data.nodes.len());
    for id in &data.nodes {
        if !seen.insert(id.as_str()) {
            return Err(anyhow!("duplicate node id {id:?} in graph data"));
        }
    }

    for (index, edge) in data.edges.iter().enumerate() {
        if !edge.amount.is_finite() || edge.amount < 0.0 {
            return Err(anyhow!(
                "edge #{index} ({} -> {}) has invalid amount {}",
                edge.from,
                edge.to,
                edge.amount
            ));
        }
    }

    Ok(data)
}
