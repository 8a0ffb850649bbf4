//! Floorplan Studio.
//!
//! 2.5D-Gebäudeansicht: Sensoren über mehrere Etagen platzieren, Raumgrenzen
//! zeichnen und Status auf einen Blick erfassen. Die Binary spielt den Host,
//! der die Daten hält und die Callbacks der Szene übernimmt.

use std::path::{Path, PathBuf};

use eframe::egui;
use floorplan_studio::{
    render, ui, AppController, AppIntent, AppState, Boundary, FacilitySnapshot,
    RoomVisibilitySettings, Sensor, SceneCallbacks, ViewerOptions,
};

/// Eingebetteter Demo-Datensatz, falls keine Datei übergeben wird.
const DEMO_FACILITY: &str = include_str!("../demos/facility.json");

fn main() -> Result<(), eframe::Error> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> Result<(), eframe::Error> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("Floorplan Studio v{} startet...", env!("CARGO_PKG_VERSION"));

        let snapshot_path = std::env::args().nth(1).map(PathBuf::from);
        let host = DemoHost::open(snapshot_path.as_deref());

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1280.0, 800.0])
                .with_title("Floorplan Studio"),
            renderer: eframe::Renderer::Glow,
            multisampling: 4,
            ..Default::default()
        };

        eframe::run_native(
            "Floorplan Studio",
            options,
            Box::new(|_cc| Ok(Box::new(StudioApp::new(host)))),
        )
    }
}

// ── Host ────────────────────────────────────────────────────────────

/// Hält die Facility-Daten und übernimmt gemeldete Änderungen.
struct DemoHost {
    snapshot: FacilitySnapshot,
    /// Daten geändert, Szene braucht einen neuen Snapshot
    dirty: bool,
}

impl DemoHost {
    fn open(path: Option<&Path>) -> Self {
        let snapshot = match path {
            Some(path) => FacilitySnapshot::load_from_file(path).unwrap_or_else(|e| {
                log::error!("Snapshot konnte nicht geladen werden: {:#}", e);
                Self::demo()
            }),
            None => Self::demo(),
        };
        Self {
            snapshot,
            dirty: false,
        }
    }

    fn demo() -> FacilitySnapshot {
        FacilitySnapshot::from_json_str(DEMO_FACILITY).unwrap_or_else(|e| {
            log::error!("Demo-Datensatz ungültig: {:#}", e);
            FacilitySnapshot::default()
        })
    }

    fn load(&mut self, path: &Path) -> anyhow::Result<()> {
        self.snapshot = FacilitySnapshot::load_from_file(path)?;
        self.dirty = true;
        Ok(())
    }
}

impl SceneCallbacks for DemoHost {
    fn on_sensor_click(&mut self, sensor: &Sensor) {
        log::info!("Sensor angeklickt: {} ({})", sensor.display_name(), sensor.sensor_type);
    }

    fn on_sensor_drop(&mut self, sensor_id: u64, x: f32, y: f32, area_id: Option<u64>) {
        self.dirty |= self.snapshot.apply_drop(sensor_id, x, y, area_id);
    }

    fn on_boundary_update(&mut self, sensor_id: u64, boundary: &Boundary) {
        self.dirty |= self.snapshot.apply_boundary(sensor_id, *boundary);
    }

    fn on_sensor_remove(&mut self, sensor_id: u64) {
        self.dirty |= self.snapshot.remove_sensor(sensor_id).is_some();
    }

    fn on_settings_change(&mut self, settings: &RoomVisibilitySettings) {
        self.snapshot.room_settings = settings.clone();
        self.dirty = true;
    }
}

// ── Anwendung ───────────────────────────────────────────────────────

/// Haupt-Anwendungsstruktur
struct StudioApp {
    state: AppState,
    controller: AppController,
    renderer: render::SceneRenderer,
    input: ui::InputState,
    host: DemoHost,
}

impl StudioApp {
    fn new(host: DemoHost) -> Self {
        // Optionen aus TOML laden (oder Standardwerte)
        let config_path = ViewerOptions::config_path();
        let mut state = AppState::new();
        state.options = ViewerOptions::load_from_file(&config_path);
        state.host_capabilities.sensor_remove = true;

        let mut app = Self {
            state,
            controller: AppController::new(),
            renderer: render::SceneRenderer::new(),
            input: ui::InputState::new(),
            host,
        };
        app.process_events(vec![
            AppIntent::SnapshotReplaced {
                snapshot: Box::new(app.host.snapshot.clone()),
            },
            AppIntent::ResetCameraRequested,
        ]);
        app
    }
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.should_exit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let events = self.collect_ui_events(ctx);

        let has_meaningful_events = events
            .iter()
            .any(|e| !matches!(e, AppIntent::ViewportResized { .. }));

        self.process_events(events);
        self.handle_open_dialog();
        self.sync_host();
        self.sync_background_upload(ctx);

        self.maybe_request_repaint(ctx, has_meaningful_events);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.interaction.teardown();
    }
}

impl StudioApp {
    fn collect_ui_events(&mut self, ctx: &egui::Context) -> Vec<AppIntent> {
        let mut events = Vec::new();
        let scene = self.controller.build_render_scene(&self.state);

        ui::render_status_bar(ctx, &self.state, scene.stack.total_layers);
        events.extend(ui::render_toolbar(ctx, &self.state));
        events.extend(ui::render_settings_panel(
            ctx,
            &self.state,
            &scene.stack.all_levels,
        ));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(ctx.style().visuals.extreme_bg_color))
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

                events.extend(self.input.collect_viewport_events(
                    ui,
                    &response,
                    self.state.interaction.captures_pointer(),
                    self.state.edit_mode,
                    self.state.selection.selected_sensor.is_some(),
                ));

                let painter = ui.painter_at(rect);
                self.renderer.render_scene(&painter, &scene);

                if self.state.sensor_count() == 0 {
                    painter.text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "Keine Sensoren. Öffnen… lädt einen Facility-Snapshot",
                        egui::FontId::proportional(18.0),
                        ctx.style().visuals.text_color(),
                    );
                }
            });

        events
    }

    fn process_events(&mut self, events: Vec<AppIntent>) {
        for event in events {
            if let Err(e) = self.controller.handle_intent(&mut self.state, event) {
                log::error!("Event handling failed: {:#}", e);
            }
        }
    }

    fn handle_open_dialog(&mut self) {
        let Some(path) = ui::pick_snapshot_file(&mut self.state.ui) else {
            return;
        };
        if let Err(e) = self.host.load(&path) {
            log::error!("Snapshot konnte nicht geladen werden: {:#}", e);
            self.state.ui.status_message = Some(format!("Laden fehlgeschlagen: {}", path.display()));
        }
    }

    /// Stellt Host-Callbacks zu und spielt geänderte Daten zurück in die Szene.
    fn sync_host(&mut self) {
        self.controller
            .flush_host_events(&mut self.state, &mut self.host);
        if !self.host.dirty {
            return;
        }
        self.host.dirty = false;
        let snapshot = Box::new(self.host.snapshot.clone());
        self.process_events(vec![AppIntent::SnapshotReplaced { snapshot }]);
    }

    fn sync_background_upload(&mut self, ctx: &egui::Context) {
        if !self.state.view.background_dirty {
            return;
        }
        self.state.view.background_dirty = false;
        self.renderer.set_background(ctx, &self.state.view.background);
    }

    fn maybe_request_repaint(&self, ctx: &egui::Context, has_meaningful_events: bool) {
        if has_meaningful_events
            || ctx.input(|i| i.pointer.is_moving())
            || self.state.interaction.captures_pointer()
        {
            ctx.request_repaint();
        }
    }
}
