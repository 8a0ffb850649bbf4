//! UI-Layer mit egui: Toolbar, Einstellungs-Panel, Statusleiste, Input-Handling.
//!
//! Die UI ist ein dünner Beobachter: sie liest den AppState und liefert
//! ausschließlich `AppIntent`s zurück.

pub mod dialogs;
pub mod input;
mod keyboard;
pub mod settings_panel;
pub mod status;
pub mod toolbar;

pub use dialogs::pick_snapshot_file;
pub use input::InputState;
pub use settings_panel::render_settings_panel;
pub use status::render_status_bar;
pub use toolbar::render_toolbar;
