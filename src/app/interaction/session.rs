//! Eingabe-Session: Zeiger-Erfassung für die Dauer genau einer Geste.
//!
//! Die Session wird beim Pointer-Down erworben und bei Pointer-Up, Abbruch
//! oder Teardown in jedem Fall wieder freigegeben. Solange sie besteht,
//! leitet die UI-Bindung Zeigerbewegungen auch außerhalb des Viewports weiter.

use glam::Vec2;

/// Aktive Zeiger-Erfassung.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSession {
    origin: Vec2,
    last: Vec2,
    travelled: f32,
    click_threshold: f32,
    /// Sensor unter dem Zeiger beim Pointer-Down (Klick-Kandidat)
    pub click_target: Option<u64>,
}

impl InputSession {
    /// Erwirbt eine Session am Startpunkt.
    pub fn acquire(origin: Vec2, click_threshold: f32, click_target: Option<u64>) -> Self {
        Self {
            origin,
            last: origin,
            travelled: 0.0,
            click_threshold: if click_threshold.is_finite() {
                click_threshold.max(0.0)
            } else {
                0.0
            },
            click_target,
        }
    }

    /// Registriert eine Bewegung und liefert das Delta zur letzten Position.
    pub fn track(&mut self, pos: Vec2) -> Vec2 {
        let delta = pos - self.last;
        if delta.is_finite() {
            self.travelled += delta.length();
            self.last = pos;
            delta
        } else {
            Vec2::ZERO
        }
    }

    /// Aufsummierte Zeigerstrecke seit dem Start.
    pub fn travelled(&self) -> f32 {
        self.travelled
    }

    /// Ist die Bewegung bereits ein Drag (und kein Klick mehr)?
    pub fn is_drag(&self) -> bool {
        self.travelled >= self.click_threshold
            && self.travelled > 0.0
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn last(&self) -> Vec2 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cumulative_movement_decides_click_or_drag() {
        let mut session = InputSession::acquire(Vec2::ZERO, 5.0, None);
        session.track(Vec2::new(2.0, 0.0));
        session.track(Vec2::new(0.0, 0.0));
        assert!(!session.is_drag());

        // Hin und her zählt kumulativ
        session.track(Vec2::new(2.0, 0.0));
        assert!(session.is_drag());
        assert_eq!(session.travelled(), 6.0);
    }

    #[test]
    fn track_returns_delta_and_ignores_nan() {
        let mut session = InputSession::acquire(Vec2::new(10.0, 10.0), 5.0, Some(3));
        assert_eq!(session.track(Vec2::new(13.0, 14.0)), Vec2::new(3.0, 4.0));
        assert_eq!(session.track(Vec2::new(f32::NAN, 0.0)), Vec2::ZERO);
        assert_eq!(session.last(), Vec2::new(13.0, 14.0));
        assert_eq!(session.click_target, Some(3));
    }
}
