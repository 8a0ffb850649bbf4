//! Keyboard-Shortcuts für den Viewport.
//!
//! Verarbeitet globale Tastenkombinationen und mappt sie auf `AppIntent`s.

use crate::app::{AppIntent, EditMode};
use crate::core::ViewPreset;

/// Zifferntasten der Ansichts-Presets in Toolbar-Reihenfolge.
const PRESET_KEYS: [egui::Key; 7] = [
    egui::Key::Num1,
    egui::Key::Num2,
    egui::Key::Num3,
    egui::Key::Num4,
    egui::Key::Num5,
    egui::Key::Num6,
    egui::Key::Num7,
];

/// Verarbeitet Keyboard-Shortcuts und gibt AppIntents zurück.
pub(super) fn collect_keyboard_intents(
    ui: &egui::Ui,
    mode: EditMode,
    has_selection: bool,
) -> Vec<AppIntent> {
    let mut events = Vec::new();
    let modifiers = ui.input(|i| i.modifiers);
    let pressed = |key: egui::Key| ui.input(|i| i.key_pressed(key));

    if pressed(egui::Key::Escape) {
        events.push(AppIntent::CancelGestureRequested);
    }

    if modifiers.command {
        if pressed(egui::Key::O) {
            events.push(AppIntent::OpenSnapshotRequested);
        }
        return events;
    }

    if (pressed(egui::Key::Delete) || pressed(egui::Key::Backspace)) && has_selection {
        events.push(AppIntent::DeleteSelectedRequested);
    }

    if pressed(egui::Key::Home) {
        events.push(AppIntent::ResetCameraRequested);
    }
    if pressed(egui::Key::Plus) || pressed(egui::Key::Equals) {
        events.push(AppIntent::ZoomInRequested);
    }
    if pressed(egui::Key::Minus) {
        events.push(AppIntent::ZoomOutRequested);
    }

    for (key, preset) in PRESET_KEYS.iter().zip(ViewPreset::ALL) {
        if pressed(*key) {
            events.push(AppIntent::ViewPresetRequested { preset });
        }
    }

    // E: Ansicht ↔ Bearbeiten, L: selektierten Sensor sperren / entsperren
    if pressed(egui::Key::E) {
        let next = match mode {
            EditMode::View => EditMode::Edit,
            EditMode::Edit | EditMode::Locked { .. } => EditMode::View,
        };
        events.push(AppIntent::EditModeRequested { mode: next });
    }
    if pressed(egui::Key::L) {
        match mode {
            EditMode::Locked { .. } => events.push(AppIntent::EditModeRequested {
                mode: EditMode::Edit,
            }),
            _ if has_selection => events.push(AppIntent::LockSelectedRequested),
            _ => {}
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_with_key(key: egui::Key, modifiers: egui::Modifiers, mode: EditMode, has_selection: bool) -> Vec<AppIntent> {
        let ctx = egui::Context::default();
        let mut raw_input = egui::RawInput::default();
        raw_input.modifiers = modifiers;
        raw_input.events.push(egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        });

        let mut events = Vec::new();
        let _ = ctx.run(raw_input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                events = collect_keyboard_intents(ui, mode, has_selection);
            });
        });
        events
    }

    #[test]
    fn escape_cancels_gesture() {
        let events = collect_with_key(egui::Key::Escape, egui::Modifiers::NONE, EditMode::Edit, false);
        assert!(matches!(events.as_slice(), [AppIntent::CancelGestureRequested]));
    }

    #[test]
    fn delete_requires_selection() {
        let none = collect_with_key(egui::Key::Delete, egui::Modifiers::NONE, EditMode::Edit, false);
        assert!(none.is_empty());

        let some = collect_with_key(egui::Key::Delete, egui::Modifiers::NONE, EditMode::Edit, true);
        assert!(matches!(some.as_slice(), [AppIntent::DeleteSelectedRequested]));
    }

    #[test]
    fn number_keys_select_presets() {
        let events = collect_with_key(egui::Key::Num2, egui::Modifiers::NONE, EditMode::View, false);
        assert!(matches!(
            events.as_slice(),
            [AppIntent::ViewPresetRequested {
                preset: ViewPreset::Front
            }]
        ));
    }

    #[test]
    fn l_toggles_lock() {
        let lock = collect_with_key(egui::Key::L, egui::Modifiers::NONE, EditMode::Edit, true);
        assert!(matches!(lock.as_slice(), [AppIntent::LockSelectedRequested]));

        let unlock = collect_with_key(
            egui::Key::L,
            egui::Modifiers::NONE,
            EditMode::Locked { sensor_id: 3 },
            true,
        );
        assert!(matches!(
            unlock.as_slice(),
            [AppIntent::EditModeRequested {
                mode: EditMode::Edit
            }]
        ));
    }

    #[test]
    fn command_o_opens_snapshot() {
        let events = collect_with_key(egui::Key::O, egui::Modifiers::COMMAND, EditMode::View, false);
        assert!(matches!(events.as_slice(), [AppIntent::OpenSnapshotRequested]));
    }
}
