use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::egui;

use crate::domain::simulation::{RngMode, SimSettings, SimStats};

pub fn show_settings_panel(
    ctx: &mut egui::Context,
    settings: &mut SimSettings,
    stats: &SimStats,
    next_state: &mut NextState<RngMode>,
    diagnostics: &DiagnosticsStore,
) {
    egui::Window::new("Settings")
        .default_open(false)
        .show(ctx, |ui| {
            ui.label(format!(
                "Dominoes: {}  Settled: {}",
                stats.spawned, stats.settled
            ));
            if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
                if let Some(value) = fps.smoothed() {
                    ui.label(format!("FPS: {:.1}", value));
                }
            }

            ui.separator();

            ui.checkbox(&mut settings.running, "Running");
            ui.add(egui::Slider::new(&mut settings.gravity, 0.1..=9.81).text("Gravity"));

            ui.separator();

            if ui
                .checkbox(&mut settings.deterministic, "Deterministic")
                .changed()
            {
                if settings.deterministic {
                    next_state.set(RngMode::Seeded);
                } else {
                    next_state.set(RngMode::Entropy);
                }
            }
            ui.add_enabled(
                !settings.deterministic,
                egui::DragValue::new(&mut settings.seed).prefix("Seed: "),
            );
        });
}
