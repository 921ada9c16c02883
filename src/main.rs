mod app;
mod data;
mod util;

use clap::Parser;
use eframe::egui::vec2;

use app::{AppConfig, EdgePolicy, EngineConfig};
use data::DataSource;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Transaction graph JSON, or `-` to read it from stdin.
    #[arg(long, default_value = "transactions.json")]
    data: String,

    /// Account to select once the data has loaded.
    #[arg(long)]
    select: Option<String>,

    /// Fail the load when an edge references an unknown account.
    #[arg(long)]
    strict_edges: bool,

    /// Keep node positions across reloads instead of restarting at the origin.
    #[arg(long)]
    preserve_layout: bool,

    #[arg(long, default_value_t = 800.0)]
    width: f32,

    #[arg(long, default_value_t = 600.0)]
    height: f32,

    /// Many-body strength; negative values repel.
    #[arg(long, default_value_t = -200.0, allow_hyphen_values = true)]
    charge: f32,
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = AppConfig {
        source: DataSource::from_arg(&args.data),
        engine: EngineConfig {
            canvas: vec2(args.width.max(1.0), args.height.max(1.0)),
            charge: args.charge,
            edge_policy: if args.strict_edges {
                EdgePolicy::Reject
            } else {
                EdgePolicy::Drop
            },
            preserve_layout: args.preserve_layout,
        },
        initial_selection: args.select,
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([config.engine.canvas.x + 620.0, config.engine.canvas.y + 80.0]),
        ..Default::default()
    };

    eframe::run_native(
        "tx-graph",
        options,
        Box::new(move |cc| Ok(Box::new(app::GraphApp::new(cc, config)))),
    )
}
