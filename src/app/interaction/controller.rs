//! Zustandsmaschine der Zeiger-Interaktion.
//!
//! Konsumiert Pointer-Events, entscheidet über die Geste und liefert
//! `InteractionEffect`s. Die Maschine mutiert weder Kamera noch Daten selbst;
//! das übernimmt der Use-Case, der die Effekte anwendet.

use glam::Vec2;

use super::gesture::{Gesture, GestureKind};
use super::hit_test::{self, is_on_plane};
use super::session::InputSession;
use crate::app::compositor::{area_at, SceneOverrides};
use crate::app::state::EditMode;
use crate::core::{Boundary, SceneTransform};
use crate::shared::{FloorStack, LayerElement, ViewerOptions};

/// Maustaste eines Pointer-Events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// Gedrückte Modifier-Tasten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

/// Pointer-Down-Ereignis in Screen-Koordinaten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub pos: Vec2,
    pub button: PointerButton,
    pub modifiers: PointerModifiers,
}

impl PointerInput {
    /// Primärtaste ohne Modifier.
    pub fn primary(pos: Vec2) -> Self {
        Self {
            pos,
            button: PointerButton::Primary,
            modifiers: PointerModifiers::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: PointerModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }
}

/// Grund für eine abgelehnte Geste.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Eine andere Geste läuft bereits
    GestureActive(GestureKind),
    /// Kamera ist im gesperrten Modus fixiert
    CameraLocked,
    /// Zeiger lässt sich nicht auf die Etage projizieren
    NoProjection,
}

/// Ergebnis einer Zustandsänderung; wird vom Use-Case angewendet.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEffect {
    RotateCamera { delta: Vec2 },
    SetPan { pan: Vec2 },
    SelectSensor { sensor_id: Option<u64> },
    SensorClicked { sensor_id: u64 },
    SensorDropped {
        sensor_id: u64,
        x: f32,
        y: f32,
        area_id: Option<u64>,
    },
    BoundaryCommitted { sensor_id: u64, boundary: Boundary },
    Rejected {
        requested: GestureKind,
        reason: RejectReason,
    },
}

/// Read-only Sicht auf die Szene für eine Interaktions-Entscheidung.
#[derive(Clone, Copy)]
pub struct InteractionContext<'a> {
    pub stack: &'a FloorStack,
    /// `None` bei Container ohne Fläche
    pub transform: Option<&'a SceneTransform>,
    pub mode: EditMode,
    pub selected: Option<u64>,
    pub pan: Vec2,
    pub options: &'a ViewerOptions,
}

/// Was ein Pointer-Down auslösen würde.
enum Start {
    Begin {
        gesture: Gesture,
        click_target: Option<u64>,
    },
    PendingClick(Option<u64>),
    Refused(GestureKind, RejectReason),
    Nothing,
}

/// Besitzt Geste und Eingabe-Session; genau eine Geste zur Zeit.
#[derive(Debug, Default)]
pub struct InteractionController {
    gesture: Gesture,
    session: Option<InputSession>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(&self) -> GestureKind {
        self.gesture.kind()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Muss die UI-Bindung Zeigerbewegungen global weiterleiten?
    pub fn captures_pointer(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&InputSession> {
        self.session.as_ref()
    }

    /// Live-Vorschau der laufenden Geste als Überlagerung.
    pub fn live_overrides(&self) -> SceneOverrides {
        let mut overrides = SceneOverrides::new();
        match &self.gesture {
            Gesture::DraggingSensor {
                sensor_id, preview, ..
            } => overrides.set_position(*sensor_id, *preview),
            Gesture::DrawingBoundary {
                sensor_id, preview, ..
            }
            | Gesture::ResizingBoundary {
                sensor_id, preview, ..
            } if preview.is_renderable() => overrides.set_boundary(*sensor_id, *preview),
            _ => {}
        }
        overrides
    }

    // ── Pointer-Events ──────────────────────────────────────────────

    pub fn pointer_down(
        &mut self,
        ctx: &InteractionContext,
        input: PointerInput,
    ) -> Vec<InteractionEffect> {
        let start = self.classify(ctx, &input);
        let active = self.kind();

        if self.session.is_some() {
            return match start {
                // Offener Klick-Kandidat: zweiter Pointer-Down wird ignoriert
                Start::Begin { .. } if active.is_idle() => Vec::new(),
                Start::Begin { gesture, .. } if active.can_enter(gesture.kind()) => {
                    log::debug!("Geste {:?} → {:?}", active, gesture.kind());
                    self.gesture = gesture;
                    Vec::new()
                }
                Start::Begin { gesture, .. } => {
                    log::debug!("Geste {:?} abgelehnt, {:?} läuft", gesture.kind(), active);
                    vec![InteractionEffect::Rejected {
                        requested: gesture.kind(),
                        reason: RejectReason::GestureActive(active),
                    }]
                }
                Start::Refused(requested, reason) => {
                    vec![InteractionEffect::Rejected { requested, reason }]
                }
                Start::PendingClick(_) | Start::Nothing => Vec::new(),
            };
        }

        match start {
            Start::Begin {
                gesture,
                click_target,
            } => {
                log::debug!("Geste gestartet: {:?}", gesture.kind());
                self.session = Some(InputSession::acquire(
                    input.pos,
                    ctx.options.click_threshold_px,
                    click_target,
                ));
                self.gesture = gesture;
                Vec::new()
            }
            Start::PendingClick(target) => {
                self.session = Some(InputSession::acquire(
                    input.pos,
                    ctx.options.click_threshold_px,
                    target,
                ));
                Vec::new()
            }
            Start::Refused(requested, reason) => {
                log::debug!("Geste {:?} verweigert: {:?}", requested, reason);
                vec![InteractionEffect::Rejected { requested, reason }]
            }
            Start::Nothing => Vec::new(),
        }
    }

    pub fn pointer_move(&mut self, ctx: &InteractionContext, pos: Vec2) -> Vec<InteractionEffect> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        session.track(pos);
        if !session.is_drag() {
            return Vec::new();
        }

        let project_raw =
            |layer: usize| ctx.transform.and_then(|t| hit_test::project_onto(ctx.stack, t, layer, pos));
        let project = |layer: usize| project_raw(layer).map(clamp_unit);

        match &mut self.gesture {
            Gesture::Idle => Vec::new(),
            Gesture::RotatingCamera { last } => {
                let delta = pos - *last;
                *last = pos;
                vec![InteractionEffect::RotateCamera { delta }]
            }
            Gesture::PanningCamera { anchor } => {
                vec![InteractionEffect::SetPan { pan: pos - *anchor }]
            }
            Gesture::DraggingSensor {
                layer,
                preview,
                grab,
                ..
            } => {
                if let Some(floor) = project_raw(*layer) {
                    *preview = clamp_unit(floor - *grab);
                }
                Vec::new()
            }
            Gesture::DrawingBoundary {
                layer,
                anchor,
                preview,
                ..
            } => {
                if let Some(floor) = project(*layer) {
                    *preview = Boundary::from_corners(*anchor, floor);
                }
                Vec::new()
            }
            Gesture::ResizingBoundary {
                layer,
                handle,
                original,
                preview,
                ..
            } => {
                if let Some(floor) = project(*layer) {
                    *preview = original.with_corner_moved(*handle, floor);
                }
                Vec::new()
            }
        }
    }

    pub fn pointer_up(&mut self, ctx: &InteractionContext, pos: Vec2) -> Vec<InteractionEffect> {
        let mut effects = self.pointer_move(ctx, pos);
        let Some(session) = self.session.take() else {
            return effects;
        };
        let gesture = std::mem::take(&mut self.gesture);
        let is_click = !session.is_drag();
        log::debug!(
            "Geste beendet: {:?} ({:.1}px, Klick: {})",
            gesture.kind(),
            session.travelled(),
            is_click
        );

        match gesture {
            Gesture::Idle => {
                if let (true, Some(sensor_id)) = (is_click, session.click_target) {
                    effects.extend(click_effects(sensor_id));
                }
            }
            Gesture::RotatingCamera { .. } => {
                if is_click && ctx.mode.locked_sensor().is_none() {
                    effects.push(InteractionEffect::SelectSensor { sensor_id: None });
                }
            }
            Gesture::PanningCamera { .. } => {}
            Gesture::DraggingSensor {
                sensor_id,
                layer,
                grab,
                ..
            } => {
                if is_click {
                    effects.extend(click_effects(sensor_id));
                } else {
                    effects.push(drop_effect(ctx, sensor_id, layer, pos, grab));
                }
            }
            Gesture::DrawingBoundary {
                sensor_id, preview, ..
            }
            | Gesture::ResizingBoundary {
                sensor_id, preview, ..
            } => {
                let boundary = preview.clamped_to_unit();
                if !is_click && boundary.is_renderable() {
                    effects.push(InteractionEffect::BoundaryCommitted {
                        sensor_id,
                        boundary,
                    });
                }
            }
        }
        effects
    }

    /// Bricht die laufende Geste ab (z.B. Escape). Liefert die abgebrochene Art.
    pub fn cancel(&mut self) -> GestureKind {
        let kind = self.kind();
        if self.session.take().is_some() {
            log::debug!("Geste abgebrochen: {:?}", kind);
        }
        self.gesture = Gesture::Idle;
        kind
    }

    /// Gibt Session und Geste bedingungslos frei (Szenenwechsel, Beenden).
    pub fn teardown(&mut self) {
        self.session = None;
        self.gesture = Gesture::Idle;
    }

    // ── Klassifikation ──────────────────────────────────────────────

    fn classify(&self, ctx: &InteractionContext, input: &PointerInput) -> Start {
        let Some(transform) = ctx.transform else {
            return Start::Nothing;
        };
        let pos = input.pos;
        let locked = ctx.mode.locked_sensor();
        let editing = ctx.mode.allows_editing();

        // Pan: Mitteltaste oder Primär + Shift
        let wants_pan = input.button == PointerButton::Middle
            || (input.button == PointerButton::Primary && input.modifiers.shift);
        if wants_pan {
            if locked.is_some() {
                return Start::Refused(GestureKind::PanningCamera, RejectReason::CameraLocked);
            }
            return Start::Begin {
                gesture: Gesture::PanningCamera {
                    anchor: pos - ctx.pan,
                },
                click_target: None,
            };
        }
        if input.button != PointerButton::Primary {
            return Start::Nothing;
        }

        // Resize-Handles des selektierten Sensors
        let editable = |id: u64| editing && locked.map_or(true, |l| l == id);
        if let Some(selected) = ctx.selected.filter(|id| editable(*id)) {
            if let Some(layer) = ctx.stack.layer_of_sensor(selected) {
                if let Some(rect) = layer.sensor_room(selected) {
                    if let Some(hit) = hit_test::pick_handle(
                        layer,
                        &rect,
                        transform,
                        pos,
                        ctx.options.handle_radius_px,
                    ) {
                        return Start::Begin {
                            gesture: Gesture::ResizingBoundary {
                                sensor_id: selected,
                                layer: hit.layer,
                                handle: hit.handle,
                                original: hit.rect,
                                preview: hit.rect,
                            },
                            click_target: None,
                        };
                    }
                }
            }
        }

        let marker = hit_test::pick_marker(ctx.stack, transform, pos, ctx.options.marker_pick_radius_px);
        let hit = marker.or_else(|| hit_test::pick_room(ctx.stack, transform, pos));

        // Grenze zeichnen: Ctrl über freier Fläche, Sensor ohne Grenze selektiert
        if input.modifiers.ctrl && hit.is_none() {
            if let Some(selected) = ctx.selected.filter(|id| editable(*id)) {
                if !ctx.stack.sensor_has_room(selected) {
                    if let Some(layer) = ctx.stack.layer_of_sensor(selected) {
                        return match transform.to_floor(&layer.placement, pos) {
                            Some(floor) if is_on_plane(floor) => Start::Begin {
                                gesture: Gesture::DrawingBoundary {
                                    sensor_id: selected,
                                    layer: layer.index,
                                    anchor: floor,
                                    preview: Boundary::from_corners(floor, floor),
                                },
                                click_target: None,
                            },
                            _ => Start::Refused(GestureKind::DrawingBoundary, RejectReason::NoProjection),
                        };
                    }
                }
            }
        }

        if let Some(hit) = hit {
            if locked.is_some_and(|l| l != hit.sensor_id) {
                return Start::Nothing;
            }
            if let (true, Some(marker)) = (editable(hit.sensor_id), marker) {
                let preview = marker_position(ctx.stack, marker.sensor_id).unwrap_or(Vec2::splat(0.5));
                // Der Marker-Kopf schwebt über dem Boden: gegriffen wird
                // neben dem Fußpunkt, der Versatz bleibt über den Drag erhalten.
                let grab = hit_test::project_onto(ctx.stack, transform, marker.layer, pos)
                    .map_or(Vec2::ZERO, |floor| floor - preview);
                return Start::Begin {
                    gesture: Gesture::DraggingSensor {
                        sensor_id: marker.sensor_id,
                        layer: marker.layer,
                        preview,
                        grab,
                    },
                    click_target: Some(marker.sensor_id),
                };
            }
            return Start::PendingClick(Some(hit.sensor_id));
        }

        if locked.is_some() {
            return Start::Refused(GestureKind::RotatingCamera, RejectReason::CameraLocked);
        }
        Start::Begin {
            gesture: Gesture::RotatingCamera { last: pos },
            click_target: None,
        }
    }
}

fn click_effects(sensor_id: u64) -> [InteractionEffect; 2] {
    [
        InteractionEffect::SelectSensor {
            sensor_id: Some(sensor_id),
        },
        InteractionEffect::SensorClicked { sensor_id },
    ]
}

/// Abschluss eines Sensor-Drags; ohne gültige Projektion wird nichts gemeldet.
///
/// `grab` ist der beim Greifen gemessene Versatz zum Marker-Fußpunkt.
fn drop_effect(
    ctx: &InteractionContext,
    sensor_id: u64,
    layer: usize,
    pos: Vec2,
    grab: Vec2,
) -> InteractionEffect {
    let target = ctx
        .transform
        .and_then(|t| hit_test::project_onto(ctx.stack, t, layer, pos))
        .zip(ctx.stack.layer(layer));
    match target {
        Some((floor, layer)) => {
            let point = clamp_unit(floor - grab);
            InteractionEffect::SensorDropped {
                sensor_id,
                x: point.x,
                y: point.y,
                area_id: area_at(layer, point).or_else(|| layer.sensor_area(sensor_id)),
            }
        }
        None => {
            log::debug!("Drop von Sensor {} ohne gültige Projektion verworfen", sensor_id);
            InteractionEffect::Rejected {
                requested: GestureKind::DraggingSensor,
                reason: RejectReason::NoProjection,
            }
        }
    }
}

fn marker_position(stack: &FloorStack, sensor_id: u64) -> Option<Vec2> {
    stack.layer_of_sensor(sensor_id)?.elements.iter().find_map(|e| match e {
        LayerElement::Marker {
            sensor_id: id,
            position,
            ..
        } if *id == sensor_id => Some(*position),
        _ => None,
    })
}

fn clamp_unit(point: Vec2) -> Vec2 {
    point.clamp(Vec2::ZERO, Vec2::ONE)
}
