use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub timestamp: String,
    pub amount: f64,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl GraphData {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|node| node == id)
    }

    pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a EdgeRecord> + 'a {
        self.edges.iter().filter(move |edge| edge.from == id)
    }

    pub fn incoming<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a EdgeRecord> + 'a {
        self.edges.iter().filter(move |edge| edge.to == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: &str, to: &str, amount: f64) -> EdgeRecord {
        EdgeRecord {
            from: from.to_owned(),
            to: to.to_owned(),
            timestamp: String::new(),
            amount,
        }
    }

    #[test]
    fn splits_transfers_by_direction() {
        let data = GraphData {
            nodes: vec!["a".into(), "b".into(), "c".into()],
            edges: vec![edge("a", "b", 10.0), edge("c", "a", 5.0), edge("b", "c", 1.0)],
        };

        let sent = data.outgoing("a").map(|edge| edge.amount).sum::<f64>();
        let received = data.incoming("a").map(|edge| edge.amount).sum::<f64>();
        assert_eq!(sent, 10.0);
        assert_eq!(received, 5.0);
        assert!(data.contains_node("c"));
        assert!(!data.contains_node("d"));
    }
}
