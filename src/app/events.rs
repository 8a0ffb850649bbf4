//! AppIntent- und AppCommand-Enums für den Intent/Command-Datenfluss.
//!
//! Intents sind Eingaben aus UI/Host ohne Mutationslogik, Commands die
//! mutierenden Schritte, die der Controller zentral ausführt.

use glam::Vec2;

use super::interaction::PointerInput;
use super::state::EditMode;
use crate::core::{ContainerRect, FacilitySnapshot, RoomVisibilitySettings, ViewPreset};
use crate::shared::ViewerOptions;

/// Eingaben aus UI und Host.
#[derive(Debug, Clone)]
pub enum AppIntent {
    // ── Kamera ──────────────────────────────────────────────────
    /// Kamera auf Perspektive zurücksetzen
    ResetCameraRequested,
    ZoomInRequested,
    ZoomOutRequested,
    /// Mausrad über dem Viewport (Screen-Position, Scroll-Delta in Pixeln)
    WheelScrolled { pos: Vec2, delta: f32 },
    ViewPresetRequested { preset: ViewPreset },
    /// Viewport-Rechteck hat sich geändert
    ViewportResized { rect: ContainerRect },

    // ── Zeiger ──────────────────────────────────────────────────
    PointerPressed { input: PointerInput },
    PointerMoved { pos: Vec2 },
    PointerReleased { pos: Vec2 },
    /// Escape: laufende Geste abbrechen
    CancelGestureRequested,

    // ── Bearbeitung ─────────────────────────────────────────────
    EditModeRequested { mode: EditMode },
    /// Selektierten Sensor isoliert bearbeiten
    LockSelectedRequested,
    SensorSelected { sensor_id: Option<u64> },
    DeleteSelectedRequested,

    // ── Host / Daten ────────────────────────────────────────────
    /// Host liefert einen neuen Datenstand
    SnapshotReplaced { snapshot: Box<FacilitySnapshot> },
    /// Einstellungs-Panel hat die Raum-Einstellungen geändert
    RoomSettingsEdited { settings: RoomVisibilitySettings },
    OpenSnapshotRequested,

    // ── Optionen & Anwendung ────────────────────────────────────
    OptionsChanged { options: ViewerOptions },
    ResetOptionsRequested,
    ToggleSettingsPanelRequested,
    ExitRequested,
}

/// Mutierende Schritte auf dem AppState.
#[derive(Debug, Clone)]
pub enum AppCommand {
    // ── Kamera & Viewport ───────────────────────────────────────
    ResetCamera,
    ZoomIn,
    ZoomOut,
    WheelZoom { delta: f32, cursor: Vec2 },
    ApplyViewPreset { preset: ViewPreset },
    SetViewportRect { rect: ContainerRect },

    // ── Interaktion ─────────────────────────────────────────────
    PointerDown { input: PointerInput },
    PointerMove { pos: Vec2 },
    PointerUp { pos: Vec2 },
    CancelGesture,

    // ── Selektion & Modus ───────────────────────────────────────
    SetEditMode { mode: EditMode },
    SelectSensor { sensor_id: Option<u64> },
    RemoveSelectedSensor,

    // ── Szene ───────────────────────────────────────────────────
    ReplaceSnapshot { snapshot: Box<FacilitySnapshot> },
    ReportSettingsChange { settings: RoomVisibilitySettings },
    RequestOpenSnapshotDialog,

    // ── Optionen & Anwendung ────────────────────────────────────
    ApplyOptions { options: ViewerOptions },
    ResetOptions,
    ToggleSettingsPanel,
    RequestExit,
}

impl AppCommand {
    /// Hochfrequente Zeiger-Commands werden nicht ins Command-Log geschrieben.
    pub fn is_pointer_motion(&self) -> bool {
        matches!(self, AppCommand::PointerMove { .. })
    }
}
