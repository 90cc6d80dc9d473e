//! ClipStack front-end library entry point.
//!
//! Exposes a `run` helper so the binary can launch either window surface
//! without duplicating initialization logic. Which surface this process
//! renders is a configuration concern; the two surfaces share the bridge
//! protocol but no state or rendering code.

mod app;
/// Bridge worker + protocol types used by the surfaces and headless tests.
pub mod backend;
mod sidebar;
mod style;

use app::CanvasApp;
use backend::{spawn_bridge, RemoteConn};
use clipstack_core::config::Surface;
use clipstack_core::Config;
use eframe::egui;
use sidebar::SidebarApp;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn suppress_vulkan_loader_debug() {
    if std::env::var("CLIPSTACK_KEEP_VK_DEBUG").is_ok() {
        return;
    }
    std::env::remove_var("VK_LOADER_DEBUG");
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("clipstack=warn,clipstack_gui=info"))
        .unwrap();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

/// Start the configured window surface with tracing enabled.
///
/// # Returns
/// The result of `eframe::run_native`.
///
/// # Errors
/// Propagates any `eframe` initialization or runtime error, including a
/// failed connection to the backend process.
pub fn run() -> eframe::Result<()> {
    suppress_vulkan_loader_debug();
    init_tracing();

    let config = Config::from_env();
    let conn = RemoteConn::connect(&config.backend_addr)
        .map_err(|err| eframe::Error::AppCreation(Box::new(err)))?;
    let bridge = spawn_bridge(conn);
    info!(
        "connected to backend at {} as {:?} surface",
        config.backend_addr, config.surface
    );

    match config.surface {
        Surface::Canvas => {
            let canvas = CanvasApp::new(bridge, config.collapse_threshold);
            let options = eframe::NativeOptions {
                viewport: egui::ViewportBuilder::default()
                    .with_inner_size(app::DEFAULT_WINDOW_SIZE)
                    .with_min_inner_size(app::MIN_WINDOW_SIZE)
                    .with_title("ClipStack"),
                ..Default::default()
            };
            eframe::run_native("ClipStack", options, Box::new(|_cc| Ok(Box::new(canvas))))
        }
        Surface::Sidebar => {
            let sidebar_app = SidebarApp::new(bridge);
            let options = eframe::NativeOptions {
                viewport: egui::ViewportBuilder::default()
                    .with_inner_size(sidebar::SIDEBAR_WINDOW_SIZE)
                    .with_always_on_top()
                    .with_title("ClipStack Sidebar"),
                ..Default::default()
            };
            eframe::run_native(
                "ClipStack Sidebar",
                options,
                Box::new(|_cc| Ok(Box::new(sidebar_app))),
            )
        }
    }
}
