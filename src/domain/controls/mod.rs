use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::domain::simulation::SimSettings;

#[derive(Resource, Debug, Clone)]
pub struct Keybinds {
    pub pause: KeyCode,
    pub help: KeyCode,
    pub diagnostics: KeyCode,
}

impl Default for Keybinds {
    fn default() -> Self {
        Self {
            pause: KeyCode::Space,
            help: KeyCode::KeyH,
            diagnostics: KeyCode::F3,
        }
    }
}

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Keybinds>()
            .add_systems(Update, keyboard_shortcuts);
    }
}

fn flip_if_pressed(keys: &ButtonInput<KeyCode>, key: KeyCode, flag: &mut bool) {
    if keys.just_pressed(key) {
        *flag = !*flag;
    }
}

fn keyboard_shortcuts(
    mut contexts: EguiContexts,
    mut settings: ResMut<SimSettings>,
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
) {
    // Typing into the answer box must not trigger shortcuts.
    if contexts.ctx_mut().wants_keyboard_input() {
        return;
    }
    flip_if_pressed(&keys, keybinds.pause, &mut settings.running);
    flip_if_pressed(&keys, keybinds.help, &mut settings.show_help);
    flip_if_pressed(&keys, keybinds.diagnostics, &mut settings.show_diagnostics);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_only_on_fresh_press() {
        let mut keys = ButtonInput::<KeyCode>::default();
        let mut running = true;

        flip_if_pressed(&keys, KeyCode::Space, &mut running);
        assert!(running);

        keys.press(KeyCode::Space);
        flip_if_pressed(&keys, KeyCode::Space, &mut running);
        assert!(!running);

        // Held, not just pressed.
        keys.clear();
        flip_if_pressed(&keys, KeyCode::Space, &mut running);
        assert!(!running);
    }
}
