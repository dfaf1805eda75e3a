pub mod catalog;
pub mod questionnaire;

use bevy::prelude::*;

use crate::domain::simulation::{SimTick, SpawnDomino};
use questionnaire::{Advance, Questionnaire};

#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SurveyState {
    #[default]
    Asking,
    Completed,
}

#[derive(Resource, Deref, DerefMut, Clone, Debug)]
pub struct Survey(pub Questionnaire);

/// What the respondent has entered for the question on screen.
#[derive(Resource, Default, Clone, Debug, PartialEq, Eq)]
pub struct AnswerDraft {
    pub text: String,
    pub selected: Option<usize>,
}

impl AnswerDraft {
    pub fn clear(&mut self) {
        self.text.clear();
        self.selected = None;
    }
}

/// The "next" control was used.
#[derive(Event, Default, Clone, Copy, Debug)]
pub struct AdvanceRequested;

pub struct SurveyPlugin {
    questionnaire: Questionnaire,
}

impl SurveyPlugin {
    pub fn new(questionnaire: Questionnaire) -> Self {
        Self { questionnaire }
    }
}

impl Plugin for SurveyPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Survey(self.questionnaire.clone()))
            .init_resource::<AnswerDraft>()
            .init_state::<SurveyState>()
            .add_event::<AdvanceRequested>()
            .add_event::<SpawnDomino>()
            .add_systems(Update, advance_survey.before(SimTick))
            .add_systems(OnEnter(SurveyState::Completed), log_completion);
    }
}

fn advance_survey(
    mut requests: EventReader<AdvanceRequested>,
    mut survey: ResMut<Survey>,
    mut draft: ResMut<AnswerDraft>,
    mut ev_spawn: EventWriter<SpawnDomino>,
    mut next_state: ResMut<NextState<SurveyState>>,
) {
    for _ in requests.read() {
        match survey.advance(&draft.text) {
            Advance::Next { index } => {
                debug!(question = index + 1, "next question");
                draft.clear();
                ev_spawn.send(SpawnDomino);
            }
            Advance::Completed => {
                draft.clear();
                next_state.set(SurveyState::Completed);
            }
            Advance::Finished => {}
        }
    }
}

fn log_completion(survey: Res<Survey>) {
    info!(
        questions = survey.len(),
        answers = survey.answers().len(),
        "survey completed"
    );
}
