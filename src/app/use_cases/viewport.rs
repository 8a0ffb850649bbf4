//! Use-Case-Funktionen für Viewport-Zustand.

use crate::app::AppState;
use crate::core::ContainerRect;

/// Aktualisiert das gespeicherte Viewport-Rechteck.
///
/// Eine laufende Geste wird abgebrochen, da ihre Projektion nicht mehr stimmt.
pub fn set_rect(state: &mut AppState, rect: ContainerRect) {
    if rect == state.view.container {
        return;
    }
    if !state.interaction.kind().is_idle() {
        state.interaction.cancel();
    }
    state.view.container = rect;
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn set_rect_updates_container() {
        let mut state = AppState::new();
        let rect = ContainerRect::new(Vec2::new(10.0, 20.0), Vec2::new(300.0, 200.0));

        set_rect(&mut state, rect);

        assert_eq!(state.view.container, rect);
        assert!(state.scene_transform().is_some());
    }

    #[test]
    fn degenerate_rect_disables_transform() {
        let mut state = AppState::new();
        set_rect(&mut state, ContainerRect::from_size(Vec2::new(0.0, 200.0)));

        assert!(state.scene_transform().is_none());
    }
}
