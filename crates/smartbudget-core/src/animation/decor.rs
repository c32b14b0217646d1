#![forbid(unsafe_code)]

//! Decorative motion for the glass UI: the floating logo badge and the
//! tilting cards.
//!
//! Both are endless loops driven by [`Animation::tick`]; the view reads a
//! [`Transform`] each frame. Timing matches the screens they decorate, not
//! any physical model.

use std::time::Duration;

use super::{Animation, PingPong, Spin, Tween, ease_in_out};

/// Transform applied to a decorated view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Vertical offset in points (negative is up).
    pub translate_y: f32,
    /// Rotation around the Z axis, degrees.
    pub rotate_deg: f32,
    /// Rotation around the Y axis, as a fraction of a turn.
    pub rotate_y: f32,
    pub scale: f32,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translate_y: 0.0,
        rotate_deg: 0.0,
        rotate_y: 0.0,
        scale: 1.0,
    };
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ---------------------------------------------------------------------------
// Floating
// ---------------------------------------------------------------------------

pub const DEFAULT_FLOAT_INTENSITY: f32 = 10.0;
pub const DEFAULT_FLOAT_DURATION: Duration = Duration::from_millis(3000);
const FLOAT_PEAK_SCALE: f32 = 1.05;

/// Bobbing, slowly spinning, gently breathing badge.
///
/// * rises `intensity` points and settles back, `duration` each way
/// * turns a full circle every `2 * duration`
/// * breathes `1.0 -> 1.05 -> 1.0`, `duration / 2` each way
#[derive(Debug, Clone, Copy)]
pub struct Floating {
    bob: PingPong,
    spin: Spin,
    breathe: PingPong,
}

impl Floating {
    pub fn new(intensity: f32, duration: Duration) -> Self {
        Self {
            bob: PingPong::between(0.0, -intensity.abs(), duration),
            spin: Spin::new(duration.saturating_mul(2)),
            breathe: PingPong::between(1.0, FLOAT_PEAK_SCALE, duration / 2),
        }
    }

    pub fn transform(&self) -> Transform {
        Transform {
            translate_y: self.bob.value(),
            rotate_deg: self.spin.degrees(),
            rotate_y: 0.0,
            scale: self.breathe.value(),
        }
    }
}

impl Default for Floating {
    fn default() -> Self {
        Self::new(DEFAULT_FLOAT_INTENSITY, DEFAULT_FLOAT_DURATION)
    }
}

impl Animation for Floating {
    fn tick(&mut self, dt: Duration) {
        self.bob.tick(dt);
        self.spin.tick(dt);
        self.breathe.tick(dt);
    }

    fn is_complete(&self) -> bool {
        false
    }

    /// Vertical offset, the most visible channel.
    fn value(&self) -> f32 {
        self.bob.value()
    }

    fn reset(&mut self) {
        self.bob.reset();
        self.spin.reset();
        self.breathe.reset();
    }
}

// ---------------------------------------------------------------------------
// CardTilt
// ---------------------------------------------------------------------------

pub const IDLE_SWAY: f32 = 0.1;
pub const IDLE_SWAY_LEG: Duration = Duration::from_millis(2000);
pub const PAN_DIVISOR: f32 = 200.0;
pub const MAX_PAN_TILT: f32 = 0.3;
pub const PRESSED_SCALE: f32 = 1.05;
pub const SETTLE_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy)]
enum TiltMode {
    /// Non-interactive cards sway on their own.
    Idle(PingPong),
    /// Following a finger.
    Panning { rotate_y: f32 },
    /// Easing back to rest after release.
    Settling { rotate_y: Tween, scale: Tween },
    Resting,
}

/// A card that sways when idle and tilts under a pan gesture.
#[derive(Debug, Clone, Copy)]
pub struct CardTilt {
    interactive: bool,
    mode: TiltMode,
}

impl CardTilt {
    /// A card that follows pan gestures and otherwise rests flat.
    pub fn interactive() -> Self {
        Self {
            interactive: true,
            mode: TiltMode::Resting,
        }
    }

    /// A card that sways `0.1 -> -0.1` on its own and ignores gestures.
    pub fn swaying() -> Self {
        Self {
            interactive: false,
            mode: TiltMode::Idle(Self::sway()),
        }
    }

    fn sway() -> PingPong {
        PingPong::between(IDLE_SWAY, -IDLE_SWAY, IDLE_SWAY_LEG)
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Horizontal pan update. Ignored by non-interactive cards.
    pub fn on_pan(&mut self, translation_x: f32) {
        if !self.interactive || !translation_x.is_finite() {
            return;
        }
        let rotate_y = (translation_x / PAN_DIVISOR).clamp(-MAX_PAN_TILT, MAX_PAN_TILT);
        self.mode = TiltMode::Panning { rotate_y };
    }

    /// Finger lifted: ease back to flat and unscaled.
    pub fn on_release(&mut self) {
        if let TiltMode::Panning { rotate_y } = self.mode {
            self.mode = TiltMode::Settling {
                rotate_y: Tween::new(rotate_y, 0.0, SETTLE_DURATION).easing(ease_in_out),
                scale: Tween::new(PRESSED_SCALE, 1.0, SETTLE_DURATION),
            };
        }
    }

    pub fn transform(&self) -> Transform {
        let (rotate_y, scale) = match &self.mode {
            TiltMode::Idle(sway) => (sway.value(), 1.0),
            TiltMode::Panning { rotate_y } => (*rotate_y, PRESSED_SCALE),
            TiltMode::Settling { rotate_y, scale } => (rotate_y.value(), scale.value()),
            TiltMode::Resting => (0.0, 1.0),
        };
        Transform {
            rotate_y,
            scale,
            ..Transform::IDENTITY
        }
    }
}

impl Animation for CardTilt {
    fn tick(&mut self, dt: Duration) {
        match &mut self.mode {
            TiltMode::Idle(sway) => sway.tick(dt),
            TiltMode::Settling { rotate_y, scale } => {
                rotate_y.tick(dt);
                scale.tick(dt);
                if rotate_y.is_complete() && scale.is_complete() {
                    self.mode = TiltMode::Resting;
                }
            }
            TiltMode::Panning { .. } | TiltMode::Resting => {}
        }
    }

    fn is_complete(&self) -> bool {
        matches!(self.mode, TiltMode::Resting)
    }

    fn value(&self) -> f32 {
        self.transform().rotate_y
    }

    fn reset(&mut self) {
        self.mode = if self.interactive {
            TiltMode::Resting
        } else {
            TiltMode::Idle(Self::sway())
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn floating_starts_at_rest() {
        let f = Floating::default();
        let t = f.transform();
        assert!(close(t.translate_y, 0.0));
        assert!(close(t.rotate_deg, 0.0));
        assert!(close(t.scale, 1.0));
    }

    #[test]
    fn floating_peaks_after_one_leg() {
        let mut f = Floating::new(8.0, Duration::from_millis(4000));
        f.tick(Duration::from_millis(4000));
        let t = f.transform();
        // At the top of the bob and half way round the spin.
        assert!(close(t.translate_y, -8.0));
        assert!(close(t.rotate_deg, 180.0));
        // Breathing legs are 2s, so two legs in: back to 1.0.
        assert!(close(t.scale, 1.0));
    }

    #[test]
    fn floating_never_completes() {
        let mut f = Floating::default();
        for _ in 0..1000 {
            f.tick(Duration::from_millis(16));
        }
        assert!(!f.is_complete());
        let y = f.transform().translate_y;
        assert!((-10.0..=0.0).contains(&y), "offset out of range: {y}");
    }

    #[test]
    fn swaying_card_ignores_gestures() {
        let mut card = CardTilt::swaying();
        card.on_pan(400.0);
        assert!(close(card.transform().rotate_y, IDLE_SWAY));
        card.tick(IDLE_SWAY_LEG);
        assert!(close(card.transform().rotate_y, -IDLE_SWAY));
    }

    #[test]
    fn pan_tilts_and_clamps() {
        let mut card = CardTilt::interactive();
        card.on_pan(40.0);
        assert!(close(card.transform().rotate_y, 0.2));
        assert!(close(card.transform().scale, PRESSED_SCALE));
        card.on_pan(-1000.0);
        assert!(close(card.transform().rotate_y, -MAX_PAN_TILT));
    }

    #[test]
    fn release_settles_back_to_rest() {
        let mut card = CardTilt::interactive();
        card.on_pan(60.0);
        card.on_release();
        assert!(!card.is_complete());
        card.tick(SETTLE_DURATION);
        assert!(card.is_complete());
        assert_eq!(card.transform(), Transform::IDENTITY);
    }

    #[test]
    fn release_without_pan_is_noop() {
        let mut card = CardTilt::interactive();
        card.on_release();
        assert!(card.is_complete());
    }
}
