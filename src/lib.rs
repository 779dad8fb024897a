//! Road Dash - Arcade driving along a procedurally generated road
//!
//! Core modules:
//! - `sim`: Deterministic simulation (road curve, placement, vehicle, collisions, clock)
//! - `input`: Per-frame input snapshot and keyboard/joystick mapping
//! - `config`: Data-driven game configuration (JSON)
//! - `error`: Setup and config errors
//! - `platform`: Browser bindings (wasm32 only)

pub mod config;
pub mod error;
pub mod input;
pub mod platform;
pub mod sim;

pub use config::GameConfig;
pub use error::{ConfigError, SetupError};
pub use input::{DriveInput, JoystickInput};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Velocities below this snap to zero (avoids creeping)
    pub const VELOCITY_EPSILON: f32 = 0.01;

    /// Road defaults
    pub const ROAD_WIDTH: f32 = 30.0;
    pub const ROAD_SEGMENT_LENGTH: f32 = 100.0;
    pub const ROAD_SEGMENT_COUNT: usize = 40;
    /// Cached samples per road (curve resolution)
    pub const CURVE_RESOLUTION: usize = 2000;

    /// Placement look-ahead (samples) used to derive object heading
    pub const PLACEMENT_LOOK_AHEAD: usize = 3;
    /// Horizontal jitter span (total, centered on zero)
    pub const PLACEMENT_JITTER: f32 = 1.2;
    /// Yaw jitter span (total, centered on zero)
    pub const PLACEMENT_YAW_JITTER: f32 = 0.2;

    /// Planar radius for car/obstacle and car/bonus hits
    pub const COLLISION_RADIUS: f32 = 2.0;

    /// Countdown length in seconds
    pub const GAME_DURATION: f32 = 90.0;
    /// Points per collected bonus
    pub const SCORE_MULTIPLIER: u32 = 10;

    /// Distance covered by one full wheel turn
    pub const WHEEL_CIRCUMFERENCE: f32 = 0.5;
}

/// Normalized angle to [-π, π). Non-finite input is returned unchanged.
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    if !angle.is_finite() {
        return angle;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid can round up to TAU itself
    if wrapped >= PI { wrapped - TAU } else { wrapped }
}

/// Convert a simulation-space point (x = along road, y = height, z = lateral)
/// into the renderer's world space.
///
/// This is the only place the axis remap lives; curve consumers and the
/// placement engine both go through it.
#[inline]
pub fn sim_to_world(p: Vec3) -> Vec3 {
    Vec3::new(-p.z, p.y, p.x)
}

/// Drop the vertical component (ground-plane projection)
#[inline]
pub fn planar(p: Vec3) -> Vec3 {
    Vec3::new(p.x, 0.0, p.z)
}

/// Vehicle forward vector for a yaw (radians). Yaw 0 faces -Z.
#[inline]
pub fn forward_vector(orientation: f32) -> Vec3 {
    Vec3::new(-orientation.sin(), 0.0, -orientation.cos())
}

/// Inverse of [`forward_vector`] for a planar direction
#[inline]
pub fn heading_for_direction(dir: Vec3) -> f32 {
    (-dir.x).atan2(-dir.z)
}
