//! Floorplan Studio Library.
//! Szenen-Kern (Kamera, Projektion, Etagen-Komposition, Gesten) als Library
//! exportiert für Tests, Benchmarks und Einbettung in einen Host.

pub mod app;
pub mod core;
pub mod render;
pub mod shared;
pub mod ui;

pub use app::{
    AppCommand, AppController, AppIntent, AppState, EditMode, HostCapabilities, HostEvent,
    SceneCallbacks, UiState, ViewState,
};
pub use core::{
    Area, AreaType, Boundary, CameraState, ContainerRect, FacilitySnapshot, RoomVisibilitySettings,
    SceneTransform, Sensor, SensorStatus, ViewPreset,
};
pub use shared::{FloorLayer, FloorStack, LayerElement, RenderScene, ViewerOptions};
