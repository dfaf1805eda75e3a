//! Domain modules split by discipline.
//! - `controls`: keyboard shortcuts.
//! - `presentation`: HUD, survey panel and the mesh mirror of the stage.
//! - `simulation`: physics, dominoes and the frame loop.
//! - `survey`: the questionnaire that paces the dominoes.

pub mod controls;
pub mod presentation;
pub mod simulation;
pub mod survey;

pub use controls::InputPlugin;
pub use presentation::UiPlugin;
pub use simulation::{SimPlugin, SpawnDomino};
pub use survey::{SurveyPlugin, SurveyState};
