use std::fmt;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use super::graph::GraphData;
use super::parse::parse_graph_data;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Stdin,
}

impl DataSource {
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    /// Stdin can only be drained once.
    pub fn is_reloadable(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdin => f.write_str("<stdin>"),
        }
    }
}

pub fn fetch_graph_data(source: &DataSource) -> Result<GraphData> {
    let raw = match source {
        DataSource::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read graph data from {}", path.display()))?,
        DataSource::Stdin => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read graph data from stdin")?;
            raw
        }
    };

    let data =
        parse_graph_data(&raw).with_context(|| format!("failed to parse graph data from {source}"))?;
    info!(
        "fetched {} nodes and {} edges from {source}",
        data.node_count(),
        data.edge_count()
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_means_stdin() {
        assert_eq!(DataSource::from_arg("-"), DataSource::Stdin);
        assert!(!DataSource::Stdin.is_reloadable());

        let file = DataSource::from_arg("data/tx.json");
        assert!(file.is_reloadable());
        assert_eq!(file.to_string(), "data/tx.json");
    }

    #[test]
    fn reads_and_parses_files() {
        let path = std::env::temp_dir().join(format!("tx-graph-fetch-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{"nodes": ["a", "b"], "edges": [{"from": "a", "to": "b", "timestamp": "2025-01-01T00:00:00", "amount": 7}]}"#,
        )
        .expect("temp file is writable");

        let data = fetch_graph_data(&DataSource::File(path.clone())).expect("file loads");
        let _ = std::fs::remove_file(&path);

        assert_eq!(data.nodes, vec!["a".to_owned(), "b".to_owned()]);
        assert_eq!(data.edges[0].amount, 7.0);
    }

    #[test]
    fn missing_file_names_the_path() {
        let source = DataSource::from_arg("/definitely/not/here.json");
        let error = fetch_graph_data(&source).unwrap_err();
        assert!(format!("{error:#}").contains("/definitely/not/here.json"));
    }
}
