//! Per-frame driving input
//!
//! Raw event capture stays in the platform layer; this module only turns key
//! names and joystick displacement into a [`DriveInput`] snapshot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Input snapshot for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DriveInput {
    pub accelerate: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
    /// Deflection ratio (0-1) from an analog device; `None` for digital input
    #[serde(default)]
    pub analog_magnitude: Option<f32>,
}

impl DriveInput {
    /// Commanded longitudinal direction: +1 forward, -1 backward, 0 coast.
    /// Accelerate wins when both pedals are held.
    pub fn throttle(&self) -> f32 {
        if self.accelerate {
            1.0
        } else if self.brake {
            -1.0
        } else {
            0.0
        }
    }

    /// Commanded turn direction: +1 left, -1 right, 0 straight.
    /// Left wins when both are held.
    pub fn steer_direction(&self) -> f32 {
        if self.steer_left {
            1.0
        } else if self.steer_right {
            -1.0
        } else {
            0.0
        }
    }

    /// How much of the full steering lock is requested
    pub fn steer_scale(&self) -> f32 {
        match self.analog_magnitude {
            Some(m) if m.is_finite() => m.clamp(0.0, 1.0),
            Some(_) => 0.0,
            None => 1.0,
        }
    }

    /// Apply a keyboard event by `KeyboardEvent.key` name.
    /// Returns false for keys that don't drive.
    pub fn apply_key(&mut self, key: &str, pressed: bool) -> bool {
        let slot = match key {
            // q/z for AZERTY keyboards
            "ArrowLeft" | "a" | "q" => &mut self.steer_left,
            "ArrowRight" | "d" => &mut self.steer_right,
            "ArrowUp" | "w" | "z" => &mut self.accelerate,
            "ArrowDown" | "s" => &mut self.brake,
            _ => return false,
        };
        *slot = pressed;
        self.analog_magnitude = None;
        true
    }
}

/// Maximum knob travel from the touch origin (px)
pub const JOYSTICK_MAX_DISTANCE: f32 = 50.0;
/// Travel below this on an axis is ignored (px)
pub const JOYSTICK_DEAD_ZONE: f32 = 10.0;

/// Virtual touch joystick state
#[derive(Debug, Clone, Copy, Default)]
pub struct JoystickInput {
    origin: Option<Vec2>,
    knob: Vec2,
}

impl JoystickInput {
    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    /// First touch; ignored while a touch is already tracked
    pub fn touch_start(&mut self, at: Vec2) {
        if self.origin.is_none() {
            self.origin = Some(at);
            self.knob = Vec2::ZERO;
        }
    }

    /// Touch moved; knob displacement is clamped to the joystick radius
    pub fn touch_move(&mut self, at: Vec2) {
        if let Some(origin) = self.origin {
            self.knob = (at - origin).clamp_length_max(JOYSTICK_MAX_DISTANCE);
        }
    }

    pub fn touch_end(&mut self) {
        self.origin = None;
        self.knob = Vec2::ZERO;
    }

    /// Knob offset from center in screen pixels (y down)
    pub fn knob_offset(&self) -> Vec2 {
        self.knob
    }

    /// Convert to a drive snapshot (screen y grows downward)
    pub fn to_input(&self) -> DriveInput {
        if self.origin.is_none() {
            return DriveInput::default();
        }
        let Vec2 { x: dx, y: dy } = self.knob;
        DriveInput {
            accelerate: dy < -JOYSTICK_DEAD_ZONE,
            brake: dy > JOYSTICK_DEAD_ZONE,
            steer_left: dx < -JOYSTICK_DEAD_ZONE,
            steer_right: dx > JOYSTICK_DEAD_ZONE,
            analog_magnitude: Some(self.knob.length() / JOYSTICK_MAX_DISTANCE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        let mut input = DriveInput::default();
        assert!(input.apply_key("ArrowUp", true));
        assert!(input.apply_key("q", true));
        assert!(input.accelerate && input.steer_left);
        assert!(input.apply_key("z", false));
        assert!(!input.accelerate);
        assert!(!input.apply_key("Enter", true));
    }

    #[test]
    fn test_throttle_priority() {
        let both = DriveInput {
            accelerate: true,
            brake: true,
            ..Default::default()
        };
        assert_eq!(both.throttle(), 1.0);
        let brake = DriveInput {
            brake: true,
            ..Default::default()
        };
        assert_eq!(brake.throttle(), -1.0);
        assert_eq!(DriveInput::default().throttle(), 0.0);
    }

    #[test]
    fn test_steer_scale() {
        let mut input = DriveInput::default();
        assert_eq!(input.steer_scale(), 1.0);
        input.analog_magnitude = Some(0.4);
        assert!((input.steer_scale() - 0.4).abs() < 1e-6);
        input.analog_magnitude = Some(3.0);
        assert_eq!(input.steer_scale(), 1.0);
        input.analog_magnitude = Some(f32::NAN);
        assert_eq!(input.steer_scale(), 0.0);
    }

    #[test]
    fn test_joystick_dead_zone_and_clamp() {
        let mut stick = JoystickInput::default();
        assert_eq!(stick.to_input(), DriveInput::default());

        stick.touch_start(Vec2::new(100.0, 100.0));
        stick.touch_move(Vec2::new(105.0, 95.0));
        let input = stick.to_input();
        assert!(!input.accelerate && !input.steer_right);

        // Up and to the left, far past the radius
        stick.touch_move(Vec2::new(0.0, 0.0));
        assert!((stick.knob_offset().length() - JOYSTICK_MAX_DISTANCE).abs() < 1e-4);
        let input = stick.to_input();
        assert!(input.accelerate && input.steer_left);
        assert!((input.analog_magnitude.unwrap() - 1.0).abs() < 1e-5);

        stick.touch_end();
        assert!(!stick.is_active());
        assert_eq!(stick.to_input(), DriveInput::default());
    }

    #[test]
    fn test_second_touch_ignored() {
        let mut stick = JoystickInput::default();
        stick.touch_start(Vec2::new(10.0, 10.0));
        stick.touch_start(Vec2::new(500.0, 500.0));
        stick.touch_move(Vec2::new(10.0, 40.0));
        assert!(stick.to_input().brake);
    }
}
