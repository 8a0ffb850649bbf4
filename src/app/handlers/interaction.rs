//! Handler für Zeiger-Gesten.

use glam::Vec2;

use crate::app::interaction::PointerInput;
use crate::app::use_cases;
use crate::app::AppState;

pub fn pointer_down(state: &mut AppState, input: PointerInput) {
    use_cases::interaction::pointer_down(state, input);
}

pub fn pointer_move(state: &mut AppState, pos: Vec2) {
    use_cases::interaction::pointer_move(state, pos);
}

pub fn pointer_up(state: &mut AppState, pos: Vec2) {
    use_cases::interaction::pointer_up(state, pos);
}

/// Bricht die laufende Geste ohne Host-Meldung ab.
pub fn cancel(state: &mut AppState) {
    use_cases::interaction::cancel(state);
}
