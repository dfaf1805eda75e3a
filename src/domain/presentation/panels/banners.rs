use bevy_egui::egui::{self, Align2, Color32, FontId, RichText};

pub fn show_completion_banner(ctx: &mut egui::Context) {
    egui::Area::new("completion_banner".into())
        .anchor(Align2::CENTER_BOTTOM, egui::vec2(0.0, -48.0))
        .show(ctx, |ui| {
            let text = RichText::new("The survey is complete. Thank you!")
                .font(FontId::proportional(36.0))
                .color(Color32::WHITE);
            ui.label(text);
        });
}
