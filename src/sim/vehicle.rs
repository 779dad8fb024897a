//! Player car motion model
//!
//! Arcade velocity/steering model, not a physics simulation. Two phases:
//! - `Driving`: input drives acceleration and steering, the car moves
//! - `CollisionRecovery`: input ignored, speed bleeds off, the body rocks,
//!   and the car stays put until the recovery time runs out

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::consts::VELOCITY_EPSILON;
use crate::error::SetupError;
use crate::input::DriveInput;
use crate::{forward_vector, normalize_angle};

/// Per-car constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleTuning {
    /// Units/s² gained while accelerating in the direction of travel
    pub acceleration_rate: f32,
    /// Units/s² when the pedal opposes the direction of travel
    pub brake_rate: f32,
    /// Units/s² of coasting drag
    pub friction_rate: f32,
    /// Radians
    pub max_steering_angle: f32,
    /// Radians/s the front wheels turn toward the target
    pub steering_speed: f32,
    /// Units/s
    pub max_speed: f32,
    /// Reverse top speed as a fraction of `max_speed`
    pub reverse_speed_factor: f32,
    /// Larger = wider turns
    pub turn_radius: f32,
    /// Seconds spent in collision recovery
    pub collision_duration: f32,
    /// Units/s² of braking while recovering
    pub impact_deceleration: f32,
    /// Fraction of speed lost on impact (velocity *= 1 - this)
    pub collision_velocity_retention: f32,
    /// Peak body roll while recovering (radians)
    pub tilt_amplitude: f32,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            acceleration_rate: 7.0,
            brake_rate: 15.0,
            friction_rate: 2.0,
            max_steering_angle: PI / 8.0,
            steering_speed: 0.5,
            max_speed: 100.0,
            reverse_speed_factor: 0.5,
            turn_radius: 2.0,
            collision_duration: 1.0,
            impact_deceleration: 20.0,
            collision_velocity_retention: 0.7,
            tilt_amplitude: 0.15,
        }
    }
}

impl VehicleTuning {
    /// Lowest allowed velocity (top reverse speed, negative)
    pub fn min_velocity(&self) -> f32 {
        -self.max_speed * self.reverse_speed_factor
    }

    /// Reject tuning that would break the speed/steering bounds
    pub fn validate(&self) -> Result<(), SetupError> {
        let non_negative = [
            (self.acceleration_rate, "acceleration_rate must be finite and >= 0"),
            (self.brake_rate, "brake_rate must be finite and >= 0"),
            (self.friction_rate, "friction_rate must be finite and >= 0"),
            (self.max_steering_angle, "max_steering_angle must be finite and >= 0"),
            (self.steering_speed, "steering_speed must be finite and >= 0"),
            (self.max_speed, "max_speed must be finite and >= 0"),
            (self.reverse_speed_factor, "reverse_speed_factor must be finite and >= 0"),
            (self.collision_duration, "collision_duration must be finite and >= 0"),
            (self.impact_deceleration, "impact_deceleration must be finite and >= 0"),
        ];
        for (value, reason) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SetupError::InvalidTuning(reason));
            }
        }
        if !(self.turn_radius.is_finite() && self.turn_radius > 0.0) {
            return Err(SetupError::InvalidTuning("turn_radius must be finite and > 0"));
        }
        if !(0.0..=1.0).contains(&self.collision_velocity_retention) {
            return Err(SetupError::InvalidTuning("collision_velocity_retention must be in [0, 1]"));
        }
        if !self.tilt_amplitude.is_finite() {
            return Err(SetupError::InvalidTuning("tilt_amplitude must be finite"));
        }
        Ok(())
    }
}

/// Motion phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionPhase {
    Driving,
    /// Seconds since the impact
    CollisionRecovery { elapsed: f32 },
}

/// Mutable state of the player's car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleState {
    /// Signed speed along the forward vector
    pub velocity: f32,
    pub acceleration: f32,
    /// Yaw (radians, normalized to [-π, π))
    pub orientation: f32,
    /// Front wheel angle (radians, positive = left)
    pub steering_angle: f32,
    /// World-space position
    pub position: Vec3,
    /// Cosmetic body roll (radians)
    pub tilt: f32,
    pub phase: MotionPhase,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 0.0)
    }
}

impl VehicleState {
    /// Car at rest at `position` facing `orientation`
    pub fn new(position: Vec3, orientation: f32) -> Self {
        Self {
            velocity: 0.0,
            acceleration: 0.0,
            orientation: normalize_angle(orientation),
            steering_angle: 0.0,
            position,
            tilt: 0.0,
            phase: MotionPhase::Driving,
        }
    }

    pub fn collided(&self) -> bool {
        matches!(self.phase, MotionPhase::CollisionRecovery { .. })
    }

    /// Seconds since the last impact (0 while driving)
    pub fn collision_elapsed(&self) -> f32 {
        match self.phase {
            MotionPhase::CollisionRecovery { elapsed } => elapsed,
            MotionPhase::Driving => 0.0,
        }
    }

    pub fn forward(&self) -> Vec3 {
        forward_vector(self.orientation)
    }

    /// Enter collision recovery. Returns false (and changes nothing) when
    /// already recovering.
    pub fn notify_collision(&mut self, tuning: &VehicleTuning) -> bool {
        if self.collided() {
            return false;
        }
        self.velocity *= 1.0 - tuning.collision_velocity_retention;
        self.acceleration = 0.0;
        self.tilt = 0.0;
        self.phase = MotionPhase::CollisionRecovery { elapsed: 0.0 };
        true
    }
}

/// Advance the car by `dt` seconds
pub fn advance_vehicle(state: &mut VehicleState, tuning: &VehicleTuning, input: &DriveInput, dt: f32) {
    if !dt.is_finite() || dt <= 0.0 {
        return;
    }

    match state.phase {
        MotionPhase::Driving => drive(state, tuning, input, dt),
        MotionPhase::CollisionRecovery { elapsed } => recover(state, tuning, elapsed + dt, dt),
    }
}

fn drive(state: &mut VehicleState, tuning: &VehicleTuning, input: &DriveInput, dt: f32) {
    // Longitudinal
    let throttle = input.throttle();
    state.acceleration = if throttle != 0.0 {
        if state.velocity * throttle < 0.0 {
            throttle * tuning.brake_rate
        } else {
            throttle * tuning.acceleration_rate
        }
    } else if state.velocity != 0.0 {
        -state.velocity.signum() * tuning.friction_rate
    } else {
        0.0
    };

    let before = state.velocity;
    state.velocity += state.acceleration * dt;
    // Coasting friction stops the car, it never pushes it backward
    if throttle == 0.0 && before * state.velocity < 0.0 {
        state.velocity = 0.0;
    }
    state.velocity = state.velocity.clamp(tuning.min_velocity(), tuning.max_speed);
    if state.velocity.abs() < VELOCITY_EPSILON {
        state.velocity = 0.0;
    }

    // Steering
    let target = input.steer_direction() * input.steer_scale() * tuning.max_steering_angle;
    let step = tuning.steering_speed * dt;
    let diff = target - state.steering_angle;
    state.steering_angle = if diff.abs() <= step {
        target
    } else {
        state.steering_angle + diff.signum() * step
    };
    state.steering_angle = state
        .steering_angle
        .clamp(-tuning.max_steering_angle, tuning.max_steering_angle);

    // Turning authority grows with speed
    state.orientation = normalize_angle(
        state.orientation + state.steering_angle * state.velocity * dt / tuning.turn_radius,
    );
    state.position += forward_vector(state.orientation) * (state.velocity * dt);
}

fn recover(state: &mut VehicleState, tuning: &VehicleTuning, elapsed: f32, dt: f32) {
    let before = state.velocity;
    if before != 0.0 {
        state.acceleration = -before.signum() * tuning.impact_deceleration;
        let after = before + state.acceleration * dt;
        state.velocity = if after * before <= 0.0 || after.abs() < VELOCITY_EPSILON {
            0.0
        } else {
            after
        };
    } else {
        state.acceleration = 0.0;
    }

    if elapsed >= tuning.collision_duration {
        state.tilt = 0.0;
        state.phase = MotionPhase::Driving;
    } else {
        state.tilt = (elapsed * PI / tuning.collision_duration).sin() * tuning.tilt_amplitude;
        state.phase = MotionPhase::CollisionRecovery { elapsed };
    }
}
