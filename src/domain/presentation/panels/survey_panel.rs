use bevy::prelude::*;
use bevy_egui::egui::{self, Align2};

use crate::domain::survey::questionnaire::QuestionKind;
use crate::domain::survey::{AdvanceRequested, AnswerDraft, Survey};

pub fn show_survey_panel(
    ctx: &mut egui::Context,
    survey: &Survey,
    draft: &mut AnswerDraft,
    ev_advance: &mut EventWriter<AdvanceRequested>,
) {
    let Some(question) = survey.current() else {
        return;
    };

    egui::Window::new("Survey")
        .anchor(Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.label(format!(
                "Question {} of {}",
                survey.current_index() + 1,
                survey.len()
            ));
            ui.heading(question.prompt());

            match question.kind() {
                QuestionKind::MultipleChoice { options } => {
                    for (i, option) in options.iter().enumerate() {
                        ui.radio_value(&mut draft.selected, Some(i), option.as_str());
                    }
                }
                QuestionKind::OpenEnded => {
                    ui.add(
                        egui::TextEdit::multiline(&mut draft.text)
                            .hint_text("Type your answer")
                            .desired_rows(3)
                            .desired_width(f32::INFINITY),
                    );
                }
            }

            ui.separator();
            if ui.button("Next").clicked() {
                ev_advance.send(AdvanceRequested);
            }
        });
}
