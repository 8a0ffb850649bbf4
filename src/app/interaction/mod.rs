//! Interaktions-Controller: Zeiger-Gesten auf der 2.5D-Szene.
//!
//! Aufgeteilt in:
//! - `gesture`: Gesten-Zustände und erlaubte Übergänge
//! - `session`: Zeiger-Erfassung für die Dauer einer Geste, Klick/Drag-Schwelle
//! - `hit_test`: Marker-, Raum- und Handle-Treffer auf dem Etagen-Stapel
//! - `controller`: die Zustandsmaschine selbst

mod controller;
mod gesture;
mod session;

pub use controller::{
    InteractionContext, InteractionController, InteractionEffect, PointerButton, PointerInput,
    PointerModifiers, RejectReason,
};
pub use gesture::{Gesture, GestureKind};
pub use session::InputSession;
