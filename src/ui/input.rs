//! Viewport-Input-Handling: Zeiger, Mausrad, Tastatur → AppIntent.

use glam::Vec2;

use super::keyboard;
use crate::app::interaction::{PointerButton, PointerInput, PointerModifiers};
use crate::app::{AppIntent, EditMode};
use crate::core::ContainerRect;

/// Verwaltet den Input-Zustand für den Viewport.
#[derive(Default)]
pub struct InputState {
    /// Letzte bekannte Zeigerposition (für Releases ohne Position)
    last_pointer: Option<Vec2>,
}

impl InputState {
    /// Erstellt einen neuen, leeren Input-Zustand.
    pub fn new() -> Self {
        Self { last_pointer: None }
    }

    /// Sammelt Viewport-Events aus egui-Input und gibt AppIntents zurück.
    ///
    /// Solange `captures_pointer` gilt, werden Bewegungen und Loslassen auch
    /// außerhalb des Viewports weitergeleitet.
    pub fn collect_viewport_events(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        captures_pointer: bool,
        mode: EditMode,
        has_selection: bool,
    ) -> Vec<AppIntent> {
        let mut events = Vec::new();

        events.push(AppIntent::ViewportResized {
            rect: container_rect(response.rect),
        });

        events.extend(keyboard::collect_keyboard_intents(ui, mode, has_selection));

        let (raw_events, any_down) = ui.input(|i| (i.events.clone(), i.pointer.any_down()));
        let mut tracking = captures_pointer || any_down;

        for event in raw_events {
            match event {
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed: true,
                    modifiers,
                } => {
                    if !response.rect.contains(pos) || !response.hovered() {
                        continue;
                    }
                    let pos = to_vec2(pos);
                    self.last_pointer = Some(pos);
                    if let Some(input) = pointer_input(pos, button, modifiers) {
                        tracking = true;
                        events.push(AppIntent::PointerPressed { input });
                    }
                }
                egui::Event::PointerButton {
                    pos, pressed: false, ..
                } => {
                    let pos = to_vec2(pos);
                    self.last_pointer = Some(pos);
                    if tracking {
                        events.push(AppIntent::PointerReleased { pos });
                    }
                }
                egui::Event::PointerMoved(pos) => {
                    let pos = to_vec2(pos);
                    self.last_pointer = Some(pos);
                    if tracking {
                        events.push(AppIntent::PointerMoved { pos });
                    }
                }
                egui::Event::PointerGone if captures_pointer => {
                    // Zeiger hat das Fenster verlassen: an letzter Position loslassen
                    if let Some(pos) = self.last_pointer {
                        events.push(AppIntent::PointerReleased { pos });
                    }
                }
                _ => {}
            }
        }

        self.handle_scroll_zoom(ui, response, &mut events);
        events
    }

    /// Mausrad-Zoom auf die aktuelle Mausposition.
    fn handle_scroll_zoom(&self, ui: &egui::Ui, response: &egui::Response, events: &mut Vec<AppIntent>) {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll == 0.0 {
            return;
        }
        if let Some(pos) = response.hover_pos() {
            events.push(AppIntent::WheelScrolled {
                pos: to_vec2(pos),
                delta: scroll,
            });
        }
    }
}

fn to_vec2(pos: egui::Pos2) -> Vec2 {
    Vec2::new(pos.x, pos.y)
}

/// Viewport-Rechteck von egui in den Szenen-Typ.
pub fn container_rect(rect: egui::Rect) -> ContainerRect {
    ContainerRect::new(to_vec2(rect.min), Vec2::new(rect.width(), rect.height()))
}

/// egui-Taste und Modifier → `PointerInput`. Zusatztasten werden ignoriert.
pub fn pointer_input(
    pos: Vec2,
    button: egui::PointerButton,
    modifiers: egui::Modifiers,
) -> Option<PointerInput> {
    let button = match button {
        egui::PointerButton::Primary => PointerButton::Primary,
        egui::PointerButton::Secondary => PointerButton::Secondary,
        egui::PointerButton::Middle => PointerButton::Middle,
        egui::PointerButton::Extra1 | egui::PointerButton::Extra2 => return None,
    };
    Some(
        PointerInput::primary(pos)
            .with_button(button)
            .with_modifiers(PointerModifiers {
                shift: modifiers.shift,
                ctrl: modifiers.command || modifiers.ctrl,
                alt: modifiers.alt,
            }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_key_counts_as_ctrl() {
        let modifiers = egui::Modifiers {
            command: true,
            ..Default::default()
        };
        let input = pointer_input(Vec2::ONE, egui::PointerButton::Primary, modifiers).unwrap();
        assert!(input.modifiers.ctrl);
        assert!(!input.modifiers.shift);
    }

    #[test]
    fn extra_buttons_are_ignored() {
        assert!(pointer_input(Vec2::ZERO, egui::PointerButton::Extra1, egui::Modifiers::NONE).is_none());
        let middle = pointer_input(Vec2::ZERO, egui::PointerButton::Middle, egui::Modifiers::NONE);
        assert_eq!(middle.map(|i| i.button), Some(PointerButton::Middle));
    }

    #[test]
    fn container_rect_keeps_absolute_origin() {
        let rect = egui::Rect::from_min_size(egui::pos2(10.0, 40.0), egui::vec2(300.0, 200.0));
        let container = container_rect(rect);
        assert_eq!(container.min, Vec2::new(10.0, 40.0));
        assert_eq!(container.center(), Vec2::new(160.0, 140.0));
    }
}
