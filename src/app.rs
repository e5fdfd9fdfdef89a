use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use eframe::egui;

use crate::azkar::AzkarList;
use crate::controller::{CloseAction, WindowController};
use crate::platform::{Host, NoticeKind};
use crate::popup::PopupPresenter;
use crate::scheduler::Scheduler;
use crate::settings::Settings;
use crate::storage::{AzkarStore, SettingsStore};
use crate::tray::{self, TrayCommand};

pub const APP_TITLE: &str = "Azkar Reminder";

pub struct AzkarApp {
    settings: Settings,
    settings_store: SettingsStore,
    azkar: AzkarList,
    azkar_store: AzkarStore,
    scheduler: Scheduler,
    popups: PopupPresenter,
    controller: WindowController,
    host: Box<dyn Host>,

    interval_text: String,
    display_text: String,
    new_zikr_text: String,
    status: Option<String>,

    initialized: bool,
    was_visible: bool,
    tray_shown: bool,
    tray: Option<tray_icon::TrayIcon>,
    commands: Option<Receiver<TrayCommand>>,
}

impl AzkarApp {
    pub fn new(
        settings_store: SettingsStore,
        azkar_store: AzkarStore,
        settings: Settings,
        azkar: AzkarList,
        host: Box<dyn Host>,
    ) -> Self {
        let interval_text = settings.interval_minutes.to_string();
        let display_text = settings.display_seconds.to_string();
        Self {
            settings,
            settings_store,
            azkar,
            azkar_store,
            scheduler: Scheduler::new(),
            popups: PopupPresenter::new(),
            controller: WindowController::new(),
            host,
            interval_text,
            display_text,
            new_zikr_text: String::new(),
            status: None,
            initialized: false,
            was_visible: false,
            tray_shown: true,
            tray: None,
            commands: None,
        }
    }

    fn drain_tray_commands(&mut self, ctx: &egui::Context) {
        let drained: Vec<TrayCommand> = match &self.commands {
            Some(rx) => rx.try_iter().collect(),
            None => return,
        };
        for cmd in drained {
            match cmd {
                TrayCommand::Restore => self.controller.restore(),
                TrayCommand::StopReminders => {
                    self.scheduler.stop();
                    self.status = Some("Reminders stopped.".into());
                }
                TrayCommand::Exit => {
                    self.controller.request_exit();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
        }
    }

    fn tick_scheduler(&mut self, now: Instant) {
        if let Some(text) = self.scheduler.poll(now, &self.azkar) {
            if self.settings.play_sound {
                self.host.play_cue();
            }
            self.popups.show(text, self.settings.display_seconds, now);
        }
    }

    fn start_reminders(&mut self, now: Instant) {
        let result = self.scheduler.start(
            &self.interval_text,
            &self.display_text,
            &mut self.settings,
            &self.settings_store,
            now,
        );
        match result {
            Ok(()) => {
                self.status = Some(format!(
                    "Reminders running every {} minutes.",
                    self.settings.interval_minutes
                ));
                self.host
                    .notify(NoticeKind::Info, APP_TITLE, "Reminders are running");
                // The window retires to the tray once reminders are running.
                self.controller.hide();
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn main_panel(&mut self, ctx: &egui::Context, now: Instant) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(APP_TITLE);
            ui.add_space(8.0);

            let mut to_remove: Option<String> = None;
            egui::ScrollArea::vertical().max_height(220.0).show(ui, |ui| {
                for zikr in self.azkar.entries() {
                    ui.horizontal(|ui| {
                        ui.label(&zikr.text);
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                if ui.small_button("✕").clicked() {
                                    to_remove = Some(zikr.text.clone());
                                }
                            },
                        );
                    });
                }
                if self.azkar.is_empty() {
                    ui.weak("No reminders yet. Add one below.");
                }
            });
            if let Some(text) = to_remove {
                match self.azkar_store.remove(&mut self.azkar, &text) {
                    Ok(true) => self.status = None,
                    Ok(false) => {}
                    Err(e) => self.status = Some(e.to_string()),
                }
            }

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.new_zikr_text)
                        .hint_text("New zikr...")
                        .desired_width(240.0),
                );
                if ui.button("Add").clicked() {
                    match self.azkar_store.add(&mut self.azkar, &self.new_zikr_text) {
                        Ok(true) => {
                            self.new_zikr_text.clear();
                            self.status = None;
                        }
                        Ok(false) => {
                            self.status = Some("Cannot add an empty zikr.".into());
                        }
                        Err(e) => self.status = Some(e.to_string()),
                    }
                }
            });

            ui.add_space(8.0);
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Every");
                ui.add(egui::TextEdit::singleline(&mut self.interval_text).desired_width(48.0));
                ui.label("minutes, show for");
                ui.add(egui::TextEdit::singleline(&mut self.display_text).desired_width(48.0));
                ui.label("seconds");
            });
            ui.checkbox(&mut self.settings.play_sound, "Play a sound cue");
            let startup = ui.checkbox(
                &mut self.settings.start_with_windows,
                "Start with Windows",
            );
            if startup.changed() {
                let enabled = self.settings.start_with_windows;
                if let Err(e) = self.host.set_auto_start(enabled) {
                    self.settings.start_with_windows = !enabled;
                    self.status = Some(e.to_string());
                } else if let Err(e) = self.settings_store.save(&self.settings) {
                    self.status = Some(e.to_string());
                }
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Start").clicked() {
                    self.start_reminders(now);
                }
                if ui.button("Stop").clicked() {
                    self.scheduler.stop();
                    self.status = Some("Reminders stopped.".into());
                }
                if self.scheduler.is_running() {
                    ui.weak("running");
                }
            });

            if let Some(status) = &self.status {
                ui.add_space(4.0);
                ui.label(status.clone());
            }
        });
    }
}

impl eframe::App for AzkarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Build the tray on the first frame (now we have the real Context).
        if !self.initialized {
            self.initialized = true;
            let (tx, rx) = mpsc::channel();
            let tray = tray::build_tray(tx, ctx.clone());
            if let Err(e) = tray.set_visible(false) {
                log::warn!("failed to hide tray icon: {e}");
            }
            self.tray_shown = false;
            self.tray = Some(tray);
            self.commands = Some(rx);
            self.was_visible = true;
        }

        let now = Instant::now();

        self.drain_tray_commands(ctx);
        self.tick_scheduler(now);
        self.popups.render(ctx, now);

        // Intercept the close button: hide to tray unless exit was requested.
        if ctx.input(|i| i.viewport().close_requested()) {
            match self.controller.handle_close_request() {
                CloseAction::HideToTray => {
                    ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
                }
                CloseAction::Exit => {
                    // Tear down the tray affordance; the close then proceeds
                    // and ends the process.
                    self.tray = None;
                }
            }
        }

        // Apply window visibility transitions.
        let is_visible = self.controller.is_visible();
        if is_visible && !self.was_visible {
            ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
            ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
        } else if !is_visible && self.was_visible {
            // Hide natively first to avoid a black flash before egui
            // presents the final frame.
            crate::platform::hide_window_native();
            ctx.send_viewport_cmd(egui::ViewportCommand::Visible(false));
        }
        self.was_visible = is_visible;

        // Keep the tray affordance in lockstep with the window.
        if let Some(tray) = &self.tray {
            let want = self.controller.tray_visible();
            if want != self.tray_shown {
                if let Err(e) = tray.set_visible(want) {
                    log::warn!("failed to toggle tray icon: {e}");
                }
                self.tray_shown = want;
            }
        }

        // Poll fast while a popup is animating, slowly otherwise so timer
        // firings and tray commands are still serviced while hidden.
        let cadence = if self.popups.has_live() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };
        ctx.request_repaint_after(cadence);

        if !is_visible {
            // Window is hidden — don't render UI but keep the loop alive.
            return;
        }

        self.main_panel(ctx, now);
    }
}
