use domino_survey::domain::simulation::DominoStage;
use domino_survey::domain::survey::questionnaire::{Question, Questionnaire};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Two multiple-choice questions followed by one open-ended question.
pub fn short_questionnaire() -> Questionnaire {
    Questionnaire::new(vec![
        Question::multiple_choice("Favourite platform?", ["A", "B", "C"]),
        Question::multiple_choice("Do you save posts?", ["Yes", "No"]),
        Question::open_ended("What did you lose?"),
    ])
    .expect("questionnaire should be valid")
}

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Tick until every domino has settled, or give up after `max_frames`.
pub fn run_until_settled(stage: &mut DominoStage, max_frames: usize) -> usize {
    for frame in 0..max_frames {
        if stage.scheduler.watching().is_empty() {
            return frame;
        }
        stage.tick();
    }
    max_frames
}
