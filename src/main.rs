mod app;
mod azkar;
mod controller;
mod platform;
mod popup;
mod scheduler;
mod settings;
mod storage;
mod tray;

use eframe::egui;

use crate::azkar::AzkarList;
use crate::platform::{Host, NativeHost};
use crate::settings::Settings;
use crate::storage::{AzkarStore, SettingsStore};

fn main() -> eframe::Result<()> {
    env_logger::init();

    let settings_store = SettingsStore::new(SettingsStore::default_path());
    let azkar_store = AzkarStore::new(AzkarStore::default_path());

    // Both files are seeded with defaults on first run; unreadable files
    // only cost the persisted values, not the session.
    let settings = settings_store.load().unwrap_or_else(|e| {
        log::error!("failed to load settings: {e}");
        Settings::default()
    });
    let azkar = azkar_store.load().unwrap_or_else(|e| {
        log::error!("failed to load reminder list: {e}");
        AzkarList::seeded()
    });

    // Reconcile the OS startup registration with the persisted flag.
    let host = NativeHost;
    if let Err(e) = host.set_auto_start(settings.start_with_windows) {
        log::warn!("{e}");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(app::APP_TITLE)
            .with_inner_size([420.0, 540.0]),
        ..Default::default()
    };

    eframe::run_native(
        app::APP_TITLE,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(app::AzkarApp::new(
                settings_store,
                azkar_store,
                settings,
                azkar,
                Box::new(NativeHost),
            )))
        }),
    )
}
