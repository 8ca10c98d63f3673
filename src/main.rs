#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod cli;
mod logging;
mod ui;

use rust_timeline_view::io::load_timeline;
use rust_timeline_view::Timeline;
use tracing::{error, info, warn};

fn main() -> eframe::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level);

    let timeline = match &args.file {
        Some(path) => match load_timeline(path) {
            Ok(timeline) => timeline,
            Err(err) => {
                error!(path = %path.display(), error = %err, "failed to load timeline");
                eprintln!("Error: {}: {}", path.display(), err);
                std::process::exit(1);
            }
        },
        None => {
            info!("no file given, showing the demo timeline");
            Timeline::sample(chrono::Local::now().date_naive())
        }
    };

    for (id, problems) in timeline.invalid_tasks() {
        let reasons: Vec<String> = problems.iter().map(|p| p.to_string()).collect();
        warn!(task = %id, reasons = %reasons.join("; "), "skipping invalid task");
    }
    let timeline = timeline.without_invalid_tasks();
    let mode = args.view;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title(format!("{} - Timeline", timeline.name)),
        ..Default::default()
    };

    eframe::run_native(
        "Rust Timeline View",
        options,
        Box::new(move |cc| Ok(Box::new(app::TimelineApp::new(cc, timeline, mode)))),
    )
}
