//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Typen, die zwischen `app` und `render` geteilt werden,
//! um direkte Abhängigkeiten zu vermeiden.

pub mod options;
mod floor_stack;
mod render_scene;

pub use floor_stack::{FloorLayer, FloorStack, LayerElement};
pub use options::ViewerOptions;
pub use render_scene::{DraftBoundary, RenderScene};
