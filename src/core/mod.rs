//! Core-Domänentypen: Kamera, Projektion, Areas, Sensoren, Status-Engine.

pub mod area;
pub mod boundary;
pub mod camera;
pub mod floor_plan;
pub mod room_settings;
pub mod sensor;
pub mod snapshot;
pub mod status;
pub mod transform;

pub use area::{Area, AreaIndex, AreaType, MAX_ANCESTOR_DEPTH};
pub use boundary::{resolve_rect, Boundary, GeometrySource, ResizeHandle, ResolvedRect};
pub use camera::{CameraState, Rotation, ViewPreset};
pub use floor_plan::{FloorBackground, FloorPlanCache, FloorPlanError, FloorPlanImage};
pub use room_settings::{
    CutPlane, FloorAdjustment, RoomVisibilitySettings, SectionCut, VisionMode,
};
pub use sensor::{Sensor, Telemetry, DEFAULT_SENSOR_ELEVATION};
pub use snapshot::FacilitySnapshot;
pub use status::{classify, room_opacity, ParameterKind, SensorStatus, StatusPalette};
pub use transform::{ContainerRect, LayerPlacement, SceneTransform};
