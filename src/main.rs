// wlosd - on-screen display daemon for Wayland compositors
// Reads commands on stdin and keeps overlay windows on screen

mod cli;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{error, info, warn};

use cli::{Backend, Cli};
use wlosd::osd::{reader, Event, Osd, TimerManager};
use wlosd::render::headless::HeadlessRenderer;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let stylesheet = cli.css.or_else(wlosd::config::find_stylesheet);
    match &stylesheet {
        Some(path) => info!("Using css file {}", path.display()),
        None => info!("No css file found"),
    }

    // Timers sleep on this runtime; the event loop itself runs on the main thread
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("wlosd-timers")
        .enable_all()
        .build()
        .context("Failed to start the timer runtime")?;
    let (tx, rx) = mpsc::unbounded_channel();

    match cli.backend {
        Backend::Headless => {
            if !cfg!(feature = "gtk") {
                warn!("Built without the `gtk` feature; nothing will be drawn on screen");
            }
            let osd = Osd::new(
                HeadlessRenderer::new(),
                TimerManager::new(tx.clone()),
                stylesheet,
                Box::new(io::stdout()),
            );
            start_sources(tx)?;
            runtime.block_on(osd.run(rx));
        }
        Backend::Gtk => run_gtk(&runtime, tx, rx, stylesheet)?,
    }

    info!("Exiting");
    Ok(())
}

/// Start the producers that feed the event loop: the stdin reader and the
/// SIGINT/SIGTERM handler.
fn start_sources(events: UnboundedSender<Event>) -> Result<()> {
    let interrupt = events.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = interrupt.send(Event::Interrupted);
    }) {
        warn!("Failed to install signal handler: {e}");
    }

    reader::spawn(events).context("Failed to start the stdin reader")?;
    Ok(())
}

#[cfg(feature = "gtk")]
fn run_gtk(
    runtime: &Runtime,
    tx: UnboundedSender<Event>,
    rx: UnboundedReceiver<Event>,
    stylesheet: Option<PathBuf>,
) -> Result<()> {
    use wlosd::render::gtk::{self, GtkRenderer};

    let renderer = GtkRenderer::open().context("Failed to open the display")?;
    let osd = Osd::new(
        renderer,
        TimerManager::new(tx.clone()),
        stylesheet,
        Box::new(io::stdout()),
    );
    start_sources(tx)?;

    // GTK must run on this thread; timers still need the tokio context
    let _guard = runtime.enter();
    gtk::block_on(osd.run(rx));
    Ok(())
}

#[cfg(not(feature = "gtk"))]
fn run_gtk(
    _runtime: &Runtime,
    _tx: UnboundedSender<Event>,
    _rx: UnboundedReceiver<Event>,
    _stylesheet: Option<PathBuf>,
) -> Result<()> {
    Err(wlosd::RenderError::Unsupported(
        "built without the `gtk` feature; use --backend headless".to_string(),
    ))
    .context("Failed to open the display")
}
