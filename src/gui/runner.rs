//! GUI runner - launches the scope admin window

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use super::app::ScopeAdminApp;
use crate::api::{Dispatcher, ScopeApi, ScopeClient, Waker};
use crate::config::Config;
use crate::store::ScopeStore;
use crate::views::{Route, ScopeAdmin};

/// Run the scope admin GUI, opened on `start`, until the window is closed
pub fn run_gui(config: Config, start: Route) -> Result<()> {
    let api: Arc<dyn ScopeApi> = Arc::new(ScopeClient::from_settings(&config.server));
    info!("Managing scopes at {}", config.server.base_url);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.gui.window_width, config.gui.window_height])
            .with_min_inner_size([640.0, 400.0])
            .with_decorations(true)
            .with_resizable(true),
        centered: true,
        ..Default::default()
    };

    eframe::run_native(
        "scope-admin",
        options,
        Box::new(move |cc| {
            // Completions arrive on the request thread; wake the UI so they get pumped
            let ctx = cc.egui_ctx.clone();
            let waker: Waker = Arc::new(move || ctx.request_repaint());
            let dispatcher = Dispatcher::spawn_with_waker(api, Some(waker));

            let mut admin = ScopeAdmin::new(ScopeStore::new().shared(), dispatcher);
            admin.navigate(start);
            Ok(Box::new(ScopeAdminApp::new(admin)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run GUI: {}", e))
}
