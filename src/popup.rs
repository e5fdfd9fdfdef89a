use std::time::{Duration, Instant};

use eframe::egui;

/// Duration of each fade edge of the popup envelope.
const FADE: Duration = Duration::from_millis(300);

const POPUP_SIZE: [f32; 2] = [360.0, 120.0];
const CORNER_MARGIN: f32 = 20.0;
/// Clearance above the bottom screen edge so the popup sits above a taskbar.
const BOTTOM_CLEARANCE: f32 = 60.0;

/// One transient reminder popup. Fades in, holds for its display duration,
/// fades out, then is discarded.
struct Popup {
    id: u64,
    text: String,
    opened_at: Instant,
    display: Duration,
}

impl Popup {
    /// Envelope alpha at `now`; None once the popup has finished.
    fn alpha(&self, now: Instant) -> Option<f32> {
        let age = now.saturating_duration_since(self.opened_at);
        if age < FADE {
            Some(age.as_secs_f32() / FADE.as_secs_f32())
        } else if age < self.display {
            Some(1.0)
        } else if age < self.display + FADE {
            Some(1.0 - (age - self.display).as_secs_f32() / FADE.as_secs_f32())
        } else {
            None
        }
    }
}

/// Owns the live popups. Each firing spawns an independent instance;
/// overlapping popups are neither deduplicated nor queued.
pub struct PopupPresenter {
    popups: Vec<Popup>,
    next_id: u64,
}

impl PopupPresenter {
    pub fn new() -> Self {
        Self {
            popups: Vec::new(),
            next_id: 1,
        }
    }

    pub fn show(&mut self, text: String, display_seconds: u32, now: Instant) {
        self.popups.push(Popup {
            id: self.next_id,
            text,
            opened_at: now,
            display: Duration::from_secs(u64::from(display_seconds)),
        });
        self.next_id += 1;
    }

    /// Drop popups whose envelope has finished.
    pub fn prune(&mut self, now: Instant) {
        self.popups.retain(|p| p.alpha(now).is_some());
    }

    pub fn live_count(&self) -> usize {
        self.popups.len()
    }

    pub fn has_live(&self) -> bool {
        !self.popups.is_empty()
    }

    /// Render each live popup as its own undecorated always-on-top viewport
    /// pinned to the bottom-right screen corner.
    pub fn render(&mut self, ctx: &egui::Context, now: Instant) {
        self.prune(now);

        let monitor = ctx
            .input(|i| i.viewport().monitor_size)
            .unwrap_or(egui::vec2(1920.0, 1080.0));
        let pos = egui::pos2(
            monitor.x - POPUP_SIZE[0] - CORNER_MARGIN,
            monitor.y - POPUP_SIZE[1] - BOTTOM_CLEARANCE,
        );

        for popup in &self.popups {
            let Some(alpha) = popup.alpha(now) else { continue };
            let viewport_id = egui::ViewportId::from_hash_of(("zikr-popup", popup.id));
            let builder = egui::ViewportBuilder::default()
                .with_title("Zikr")
                .with_inner_size(POPUP_SIZE)
                .with_position(pos)
                .with_decorations(false)
                .with_transparent(true)
                .with_always_on_top()
                .with_taskbar(false);

            let text = popup.text.clone();
            ctx.show_viewport_immediate(viewport_id, builder, |ctx, _class| {
                let fill = egui::Color32::from_rgba_unmultiplied(30, 30, 30, (alpha * 235.0) as u8);
                let frame = egui::Frame::new()
                    .fill(fill)
                    .corner_radius(egui::CornerRadius::same(10))
                    .inner_margin(egui::Margin::same(16));
                egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            egui::RichText::new(&text)
                                .size(22.0)
                                .color(egui::Color32::from_white_alpha((alpha * 255.0) as u8)),
                        );
                    });
                });
            });
        }
    }
}

impl Default for PopupPresenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_fades_in_holds_and_fades_out() {
        let mut presenter = PopupPresenter::new();
        let t0 = Instant::now();
        presenter.show("ذكر".into(), 5, t0);
        let popup = &presenter.popups[0];

        let early = popup.alpha(t0 + Duration::from_millis(150)).unwrap();
        assert!(early > 0.0 && early < 1.0);

        assert_eq!(popup.alpha(t0 + Duration::from_secs(2)), Some(1.0));

        let fading = popup.alpha(t0 + Duration::from_millis(5150)).unwrap();
        assert!(fading > 0.0 && fading < 1.0);

        assert_eq!(popup.alpha(t0 + Duration::from_millis(5400)), None);
    }

    #[test]
    fn test_prune_discards_finished_popups() {
        let mut presenter = PopupPresenter::new();
        let t0 = Instant::now();
        presenter.show("a".into(), 5, t0);

        presenter.prune(t0 + Duration::from_secs(5));
        assert_eq!(presenter.live_count(), 1);

        presenter.prune(t0 + Duration::from_secs(6));
        assert_eq!(presenter.live_count(), 0);
    }

    #[test]
    fn test_overlapping_popups_age_independently() {
        let mut presenter = PopupPresenter::new();
        let t0 = Instant::now();
        presenter.show("first".into(), 5, t0);
        presenter.show("second".into(), 5, t0 + Duration::from_secs(3));
        assert_eq!(presenter.live_count(), 2);

        // First is past its envelope, second is still holding.
        presenter.prune(t0 + Duration::from_secs(6));
        assert_eq!(presenter.live_count(), 1);
        assert_eq!(presenter.popups[0].text, "second");
    }

    #[test]
    fn test_popups_are_not_deduplicated() {
        let mut presenter = PopupPresenter::new();
        let t0 = Instant::now();
        presenter.show("same".into(), 5, t0);
        presenter.show("same".into(), 5, t0);
        assert_eq!(presenter.live_count(), 2);
        assert_ne!(presenter.popups[0].id, presenter.popups[1].id);
    }
}
