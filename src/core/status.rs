//! Status- und Farb-Engine: Schwellwert-Klassifikation und Raum-Deckkraft.
//!
//! Die Skalierungskonstanten der Messgrößen sind Darstellungs-Heuristiken,
//! keine physikalischen Grenzwerte. Sie sind als benannte Konstanten abgelegt
//! und können ohne weitere Logikänderung angepasst werden.

use super::room_settings::VisionMode;
use super::sensor::Telemetry;

/// Anteil des Schwellwerts, ab dem ein Wert als Warnung gilt.
pub const WARNING_RATIO: f32 = 0.8;
/// Obergrenze des Messwert-Boosts pro Messgröße.
pub const MAX_INTENSITY_BOOST: f32 = 0.5;
/// Obergrenze der resultierenden Wand-Deckkraft.
pub const MAX_ROOM_OPACITY: f32 = 0.9;
/// Mindest-Deckkraft bei kritischem Status.
pub const CRITICAL_OPACITY_FLOOR: f32 = 0.2;
/// Mindest-Deckkraft bei Warnung.
pub const WARNING_OPACITY_FLOOR: f32 = 0.1;

/// Temperatur: Boost beginnt bei 20 °C.
pub const TEMPERATURE_BASELINE: f32 = 20.0;
/// Temperatur: Skalierung des Boosts.
pub const TEMPERATURE_SPAN: f32 = 40.0;
/// Luftfeuchte: Boost beginnt bei 30 %.
pub const HUMIDITY_BASELINE: f32 = 30.0;
/// Luftfeuchte: Skalierung des Boosts.
pub const HUMIDITY_SPAN: f32 = 120.0;
/// CO2: Boost beginnt bei 400 ppm.
pub const CO2_BASELINE: f32 = 400.0;
/// CO2: Skalierung des Boosts.
pub const CO2_SPAN: f32 = 3200.0;

/// Klassifizierter Sensorzustand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SensorStatus {
    /// Keine oder ungültige Telemetrie
    Unknown,
    Safe,
    Warning,
    Critical,
}

impl SensorStatus {
    /// Kurzbezeichnung für Labels.
    pub fn label(self) -> &'static str {
        match self {
            SensorStatus::Unknown => "unbekannt",
            SensorStatus::Safe => "ok",
            SensorStatus::Warning => "Warnung",
            SensorStatus::Critical => "kritisch",
        }
    }
}

/// Klassifiziert einen Messwert gegen seinen Schwellwert.
///
/// `critical` ab `threshold`, `warning` ab `0.8 * threshold`, sonst `safe`.
pub fn classify(val: f32, threshold: f32) -> SensorStatus {
    if !val.is_finite() || !threshold.is_finite() {
        return SensorStatus::Unknown;
    }
    if val >= threshold {
        SensorStatus::Critical
    } else if val >= WARNING_RATIO * threshold {
        SensorStatus::Warning
    } else {
        SensorStatus::Safe
    }
}

/// Status aus optionaler Telemetrie.
pub fn status_of(telemetry: Option<&Telemetry>) -> SensorStatus {
    telemetry.map_or(SensorStatus::Unknown, |t| classify(t.val, t.threshold))
}

/// Messgröße eines Sensors, abgeleitet aus dem Sensortyp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    Temperature,
    Humidity,
    Co2,
    Other,
}

impl ParameterKind {
    /// Ordnet freie Typ-Strings des Backends zu (Groß-/Kleinschreibung egal).
    pub fn from_sensor_type(sensor_type: &str) -> Self {
        let normalized = sensor_type.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "temperature" | "temp" => ParameterKind::Temperature,
            "humidity" | "hum" => ParameterKind::Humidity,
            "co2" | "carbon_dioxide" => ParameterKind::Co2,
            _ => ParameterKind::Other,
        }
    }
}

/// Messwert-abhängiger Deckkraft-Boost, geklemmt auf [0, MAX_INTENSITY_BOOST].
pub fn intensity_boost(kind: ParameterKind, val: f32) -> f32 {
    if !val.is_finite() {
        return 0.0;
    }
    let raw = match kind {
        ParameterKind::Temperature => (val - TEMPERATURE_BASELINE) / TEMPERATURE_SPAN,
        ParameterKind::Humidity => (val - HUMIDITY_BASELINE) / HUMIDITY_SPAN,
        ParameterKind::Co2 => (val - CO2_BASELINE) / CO2_SPAN,
        ParameterKind::Other => 0.0,
    };
    raw.clamp(0.0, MAX_INTENSITY_BOOST)
}

/// Endgültige Wand-Deckkraft eines Sensor-Raums.
///
/// Basis + Boost, geklemmt auf `MAX_ROOM_OPACITY`, danach die Status-Untergrenze.
pub fn room_opacity(base_wall_opacity: f32, kind: ParameterKind, telemetry: Option<&Telemetry>) -> f32 {
    let base = if base_wall_opacity.is_finite() {
        base_wall_opacity.max(0.0)
    } else {
        0.0
    };
    let Some(telemetry) = telemetry else {
        return base.min(MAX_ROOM_OPACITY);
    };

    let boosted = (base + intensity_boost(kind, telemetry.val)).min(MAX_ROOM_OPACITY);
    match classify(telemetry.val, telemetry.threshold) {
        SensorStatus::Critical => boosted.max(CRITICAL_OPACITY_FLOOR),
        SensorStatus::Warning => boosted.max(WARNING_OPACITY_FLOOR),
        SensorStatus::Safe | SensorStatus::Unknown => boosted,
    }
}

/// RGBA-Farben pro Status für einen Sichtmodus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusPalette {
    pub safe: [f32; 4],
    pub warning: [f32; 4],
    pub critical: [f32; 4],
    pub unknown: [f32; 4],
    /// Farbe der Architektur-Räume (ohne Sensor)
    pub architecture: [f32; 4],
    /// Hintergrund/Grid der Etagen-Ebene
    pub floor: [f32; 4],
}

impl StatusPalette {
    /// Palette für einen Sichtmodus.
    pub fn for_mode(mode: VisionMode) -> Self {
        match mode {
            VisionMode::Normal => Self {
                safe: [0.2, 0.8, 0.3, 1.0],
                warning: [1.0, 0.7, 0.1, 1.0],
                critical: [0.9, 0.15, 0.15, 1.0],
                unknown: [0.6, 0.6, 0.65, 1.0],
                architecture: [0.55, 0.65, 0.8, 1.0],
                floor: [0.92, 0.93, 0.95, 1.0],
            },
            VisionMode::Night => Self {
                safe: [0.1, 0.55, 0.3, 1.0],
                warning: [0.75, 0.5, 0.05, 1.0],
                critical: [0.8, 0.1, 0.2, 1.0],
                unknown: [0.35, 0.35, 0.45, 1.0],
                architecture: [0.25, 0.35, 0.55, 1.0],
                floor: [0.08, 0.1, 0.14, 1.0],
            },
            // Farbenblind-freundlich: Blau / Orange / Violett
            VisionMode::Alternate => Self {
                safe: [0.0, 0.45, 0.7, 1.0],
                warning: [0.9, 0.6, 0.0, 1.0],
                critical: [0.8, 0.47, 0.65, 1.0],
                unknown: [0.6, 0.6, 0.6, 1.0],
                architecture: [0.34, 0.71, 0.91, 1.0],
                floor: [0.95, 0.95, 0.92, 1.0],
            },
        }
    }

    /// Grundfarbe eines Status.
    pub fn color(&self, status: SensorStatus) -> [f32; 4] {
        match status {
            SensorStatus::Safe => self.safe,
            SensorStatus::Warning => self.warning,
            SensorStatus::Critical => self.critical,
            SensorStatus::Unknown => self.unknown,
        }
    }
}
