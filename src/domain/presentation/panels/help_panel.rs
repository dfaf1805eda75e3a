use bevy_egui::egui;

use crate::domain::controls::Keybinds;
use crate::domain::simulation::SimSettings;

pub fn show_help_panel(ctx: &mut egui::Context, settings: &SimSettings, keybinds: &Keybinds) {
    if settings.show_help {
        egui::Window::new("Help").show(ctx, |ui| {
            ui.label("Answer each question and press Next to drop a domino.");
            ui.label(format!("{:?}: Pause Simulation", keybinds.pause));
            ui.label(format!("{:?}: Toggle Help", keybinds.help));
            ui.label(format!("{:?}: Toggle Diagnostics", keybinds.diagnostics));
        });
    }
}
