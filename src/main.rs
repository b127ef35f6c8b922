mod app;
mod util;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fisk_monitor::dashboard::DEFAULT_REPORT_HISTORY;
use fisk_monitor::feed::FeedSource;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Newline-delimited JSON cluster events; `-` reads stdin
    #[arg(long, default_value = "-")]
    events: FeedSource,

    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    #[arg(long, default_value_t = 800.0)]
    height: f32,

    /// Number of reported inconsistencies kept for display
    #[arg(long, default_value_t = DEFAULT_REPORT_HISTORY)]
    report_history: usize,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height]),
        ..Default::default()
    };

    let initial_viewport = eframe::egui::vec2(args.width, args.height);
    eframe::run_native(
        "fisk-monitor",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::MonitorApp::new(
                cc,
                args.events.clone(),
                initial_viewport,
                args.report_history,
            )))
        }),
    )
}
