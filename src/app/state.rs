//! Application State: zentrale Datenhaltung der Szene.

use super::compositor::{self, SceneOverrides};
use super::host::{HostCapabilities, HostEvent};
use super::interaction::InteractionController;
use super::CommandLog;
use crate::core::{
    CameraState, ContainerRect, FacilitySnapshot, FloorBackground, FloorPlanCache, SceneTransform,
    Sensor,
};
use crate::shared::{FloorStack, ViewerOptions};

/// Bearbeitungsmodus der Szene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Nur ansehen und auswählen
    #[default]
    View,
    /// Sensoren verschieben, Grenzen zeichnen und ändern
    Edit,
    /// Einzelner Sensor isoliert; Kamera fest in Frontansicht
    Locked { sensor_id: u64 },
}

impl EditMode {
    pub fn allows_editing(self) -> bool {
        !matches!(self, EditMode::View)
    }

    pub fn locked_sensor(self) -> Option<u64> {
        match self {
            EditMode::Locked { sensor_id } => Some(sensor_id),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EditMode::View => "Ansicht",
            EditMode::Edit => "Bearbeiten",
            EditMode::Locked { .. } => "Gesperrt",
        }
    }
}

/// Vom Host übergebene Daten plus noch unbestätigte Änderungen.
#[derive(Debug, Default)]
pub struct SceneData {
    pub snapshot: FacilitySnapshot,
    /// Gemeldete, vom Host noch nicht zurückgespielte Änderungen
    pub pending: SceneOverrides,
    /// Zählt Snapshot-Wechsel
    pub revision: u64,
}

impl SceneData {
    pub fn sensor(&self, id: u64) -> Option<&Sensor> {
        self.snapshot.sensor(id)
    }

    /// Übernimmt einen neuen Snapshot des Hosts.
    pub fn replace(&mut self, snapshot: FacilitySnapshot) {
        self.snapshot = snapshot;
        self.pending.clear();
        self.revision += 1;
    }
}

/// View-bezogener Anwendungszustand
pub struct ViewState {
    pub camera: CameraState,
    /// Bildschirm-Rechteck des Viewports
    pub container: ContainerRect,
    pub floor_plans: FloorPlanCache,
    pub background: FloorBackground,
    /// Signalisiert, dass die Floor-Plan-Textur neu hochgeladen werden muss
    pub background_dirty: bool,
}

impl ViewState {
    /// Neutrale Frontkamera; der Viewer setzt beim Start die Perspektive.
    pub fn new() -> Self {
        Self {
            camera: CameraState::new(),
            container: ContainerRect::default(),
            floor_plans: FloorPlanCache::new(),
            background: FloorBackground::Grid,
            background_dirty: false,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

/// Selektions-Zustand
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    pub selected_sensor: Option<u64>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// UI-Flags, die der Host-Rahmen auswertet
#[derive(Debug, Clone)]
pub struct UiState {
    pub show_settings_panel: bool,
    /// Datei-Dialog für einen Snapshot anzeigen
    pub show_open_dialog: bool,
    /// Letzte Meldung für die Statusleiste
    pub status_message: Option<String>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            show_settings_panel: true,
            show_open_dialog: false,
            status_message: None,
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Hauptzustand der Anwendung
pub struct AppState {
    pub scene: SceneData,
    pub view: ViewState,
    pub selection: SelectionState,
    pub ui: UiState,
    pub edit_mode: EditMode,
    /// Gesten-Zustandsmaschine
    pub interaction: InteractionController,
    /// Laufzeit-Optionen
    pub options: ViewerOptions,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Noch nicht zugestellte Host-Callbacks
    pub outbox: Vec<HostEvent>,
    pub host_capabilities: HostCapabilities,
    /// Signalisiert dem Host (eframe), die Anwendung kontrolliert zu beenden
    pub should_exit: bool,
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State
    pub fn new() -> Self {
        Self {
            scene: SceneData::default(),
            view: ViewState::new(),
            selection: SelectionState::new(),
            ui: UiState::new(),
            edit_mode: EditMode::View,
            interaction: InteractionController::new(),
            options: ViewerOptions::default(),
            command_log: CommandLog::new(),
            outbox: Vec::new(),
            host_capabilities: HostCapabilities::default(),
            should_exit: false,
        }
    }

    /// Seitenverhältnis der Etagen-Ebene: Floor-Plan-Bild, sonst Option.
    pub fn plane_aspect(&self) -> f32 {
        self.view
            .background
            .image()
            .map_or(self.options.plane_aspect, |image| image.aspect())
    }

    /// View-Transformation des aktuellen Frames (`None` ohne Viewport-Fläche).
    pub fn scene_transform(&self) -> Option<SceneTransform> {
        SceneTransform::new(
            &self.view.camera,
            self.view.container,
            self.options.plane_fill,
            self.plane_aspect(),
        )
    }

    /// Unbestätigte Änderungen plus Live-Vorschau der laufenden Geste.
    pub fn scene_overrides(&self) -> SceneOverrides {
        self.scene
            .pending
            .merged_with(&self.interaction.live_overrides())
    }

    /// Komponiert den Etagen-Stapel des aktuellen Zustands.
    pub fn compose_stack(&self) -> FloorStack {
        let snapshot = &self.scene.snapshot;
        compositor::compose(
            &snapshot.sensors,
            &snapshot.areas,
            &snapshot.room_settings,
            &self.scene_overrides(),
        )
    }

    pub fn sensor_count(&self) -> usize {
        self.scene.snapshot.sensors.len()
    }

    pub fn selected_sensor(&self) -> Option<&Sensor> {
        self.selection
            .selected_sensor
            .and_then(|id| self.scene.sensor(id))
    }

    /// Entnimmt alle wartenden Host-Events.
    pub fn take_host_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.outbox)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
