use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use tray_icon::menu::{Menu, MenuEvent, MenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder, TrayIconEvent};

/// Commands the tray affordance can issue. The tray event thread only
/// forwards these; all state changes happen on the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayCommand {
    /// Restore and focus the main window.
    Restore,
    /// Stop the reminder scheduler, leaving the window as it is.
    StopReminders,
    /// Tear down and terminate.
    Exit,
}

/// Create a simple 16x16 green icon for the system tray.
fn create_default_icon() -> Icon {
    let size = 16u32;
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for _ in 0..size * size {
        rgba.push(46); // R
        rgba.push(160); // G
        rgba.push(100); // B
        rgba.push(255); // A
    }
    Icon::from_rgba(rgba, size, size).expect("Failed to create tray icon")
}

/// Build the tray icon with its menu and start the event-forwarding thread.
///
/// Menu and double-click events arrive on global receivers owned by the
/// tray-icon crate; the thread drains both and forwards `TrayCommand`s to
/// the UI thread, waking the (possibly hidden) window first so the command
/// is processed promptly.
pub fn build_tray(commands: Sender<TrayCommand>, ctx: eframe::egui::Context) -> TrayIcon {
    let menu = Menu::new();
    let open_item = MenuItem::new("Open", true, None);
    let stop_item = MenuItem::new("Stop reminders", true, None);
    let quit_item = MenuItem::new("Quit", true, None);
    let open_id = open_item.id().clone();
    let stop_id = stop_item.id().clone();
    let quit_id = quit_item.id().clone();

    menu.append(&open_item).unwrap();
    menu.append(&stop_item).unwrap();
    menu.append(&quit_item).unwrap();

    let tray = TrayIconBuilder::new()
        .with_menu(Box::new(menu))
        .with_tooltip("Azkar Reminder")
        .with_icon(create_default_icon())
        .build()
        .expect("Failed to build tray icon");

    thread::spawn(move || loop {
        let mut pending = Vec::new();

        while let Ok(event) = MenuEvent::receiver().try_recv() {
            if event.id() == &open_id {
                pending.push(TrayCommand::Restore);
            } else if event.id() == &stop_id {
                pending.push(TrayCommand::StopReminders);
            } else if event.id() == &quit_id {
                pending.push(TrayCommand::Exit);
            }
        }

        while let Ok(event) = TrayIconEvent::receiver().try_recv() {
            if let TrayIconEvent::DoubleClick { .. } = event {
                pending.push(TrayCommand::Restore);
            }
        }

        for cmd in pending {
            // Same Windows fix as the show path in platform.rs: wake the
            // hidden window natively so the egui loop handles the command.
            if matches!(cmd, TrayCommand::Restore | TrayCommand::Exit) {
                crate::platform::show_window_native();
            }
            if commands.send(cmd).is_err() {
                return;
            }
            ctx.request_repaint();
        }

        thread::sleep(Duration::from_millis(50));
    });

    tray
}
