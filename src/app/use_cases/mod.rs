//! Use-Cases der Application-Layer-Orchestrierung.

pub mod camera;
pub mod interaction;
pub mod scene;
pub mod selection;
pub mod viewport;
