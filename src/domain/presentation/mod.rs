//! HUD, survey panel and the 3D view of the stage.

pub mod panels;
pub mod stage_view;

use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin};

use crate::domain::controls::Keybinds;
use crate::domain::simulation::{RngMode, SimSettings, SimStats};
use crate::domain::survey::{AdvanceRequested, AnswerDraft, Survey, SurveyState};
use panels::{
    banners::show_completion_banner, diagnostics_panel::show_diagnostics_panel,
    help_panel::show_help_panel, settings_panel::show_settings_panel,
    survey_panel::show_survey_panel,
};
use stage_view::StageViewPlugin;

pub struct UiPlugin;
impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((EguiPlugin, StageViewPlugin))
            .add_systems(Update, (hud_system, survey_ui));
    }
}

fn hud_system(
    mut contexts: EguiContexts,
    mut settings: ResMut<SimSettings>,
    stats: Res<SimStats>,
    mut next_state: ResMut<NextState<RngMode>>,
    diagnostics: Res<DiagnosticsStore>,
    keybinds: Res<Keybinds>,
) {
    let ctx = contexts.ctx_mut();
    show_settings_panel(ctx, &mut settings, &stats, &mut next_state, &diagnostics);
    show_help_panel(ctx, &settings, &keybinds);
    show_diagnostics_panel(ctx, &diagnostics, &settings, &stats);
}

fn survey_ui(
    mut contexts: EguiContexts,
    survey: Res<Survey>,
    mut draft: ResMut<AnswerDraft>,
    mut ev_advance: EventWriter<AdvanceRequested>,
    survey_state: Res<State<SurveyState>>,
) {
    match survey_state.get() {
        SurveyState::Asking => {
            show_survey_panel(contexts.ctx_mut(), &survey, &mut draft, &mut ev_advance);
        }
        SurveyState::Completed => show_completion_banner(contexts.ctx_mut()),
    }
}
