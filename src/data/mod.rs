mod fetch;
mod graph;
mod parse;

pub use fetch::{DataSource, fetch_graph_data};
pub use graph::{EdgeRecord, GraphData};
