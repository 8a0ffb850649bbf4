//! Application-Layer: Controller, State, Events und Use-Cases.

pub mod command_log;
pub mod compositor;
pub mod controller;
pub mod events;
pub mod handlers;
pub mod host;
pub mod interaction;
mod intent_mapping;
pub mod render_scene;
/// Application State
///
/// Hält Host-Daten, Kamera, Selektion und die Gesten-Zustandsmaschine.
pub mod state;
pub mod use_cases;

pub use command_log::CommandLog;
pub use compositor::SceneOverrides;
pub use controller::AppController;
pub use events::{AppCommand, AppIntent};
pub use host::{HostCapabilities, HostEvent, SceneCallbacks};
pub use render_scene::build as build_render_scene;
pub use state::{AppState, EditMode, SceneData, SelectionState, UiState, ViewState};
