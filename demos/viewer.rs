//! Interactive pathway diagram viewer using egui (requires `--features egui`).
//!
//! Usage:
//!   cargo run --features egui --example viewer -- <layout.json> [--content-service <url>]

#[cfg(feature = "egui")]
use anyhow::Result;
#[cfg(feature = "egui")]
use clap::Parser;
#[cfg(feature = "egui")]
use pathview::content::{ContentService, DEFAULT_BASE_URL};
#[cfg(feature = "egui")]
use pathview::egui_app::ViewerApp;
#[cfg(feature = "egui")]
use pathview::model::Diagram;

#[cfg(feature = "egui")]
#[derive(Parser, Debug)]
#[command(author, version, about = "Interactive pathway diagram viewer", long_about = None)]
struct Args {
    /// Diagram layout JSON file
    #[arg(value_name = "LAYOUT_JSON")]
    layout: String,

    /// Content service base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    content_service: String,
}

#[cfg(feature = "egui")]
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let diagram = Diagram::from_json_file(&args.layout)?;
    let content = ContentService::new(args.content_service);
    let app = ViewerApp::new(diagram, content);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_maximized(true),
        ..Default::default()
    };
    eframe::run_native(
        "pathview diagram viewer",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(())
}

#[cfg(not(feature = "egui"))]
fn main() {
    eprintln!("Rebuild with --features egui to run the viewer demo");
}
