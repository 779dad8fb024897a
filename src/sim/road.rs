//! Procedural road layout
//!
//! Generates the control points the [`RoadCurve`] is built from: a road that
//! heads down simulation +x with a bounded random walk sideways.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::curve::RoadCurve;
use crate::consts::*;
use crate::error::SetupError;

/// Road layout parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadConfig {
    /// Paved width (used for lateral placement of objects)
    pub width: f32,
    /// Number of generated segments (control points = segments + 1)
    pub segment_count: usize,
    /// Distance along x between control points
    pub segment_length: f32,
    /// Largest lateral change between neighbouring control points
    pub max_lateral_step: f32,
    /// Lateral offset never leaves [-max_lateral_drift, max_lateral_drift]
    pub max_lateral_drift: f32,
    /// Height noise amplitude (0 = flat road)
    pub height_variation: f32,
    /// Straight segments at the start so the car does not spawn in a bend
    pub straight_start_segments: usize,
    /// Cached curve samples
    pub resolution: usize,
    /// Authored control points; bypass generation when present
    pub control_points: Option<Vec<Vec3>>,
}

impl Default for RoadConfig {
    fn default() -> Self {
        Self {
            width: ROAD_WIDTH,
            segment_count: ROAD_SEGMENT_COUNT,
            segment_length: ROAD_SEGMENT_LENGTH,
            max_lateral_step: 35.0,
            max_lateral_drift: 250.0,
            height_variation: 0.0,
            straight_start_segments: 2,
            resolution: CURVE_RESOLUTION,
            control_points: None,
        }
    }
}

impl RoadConfig {
    /// Reject layouts that would panic or produce a degenerate road
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.resolution == 0 {
            return Err(SetupError::ZeroResolution);
        }
        if !(self.width.is_finite() && self.width >= 0.0) {
            return Err(SetupError::InvalidRoad("width must be finite and >= 0"));
        }
        if !(self.segment_length.is_finite() && self.segment_length > 0.0) {
            return Err(SetupError::InvalidRoad("segment_length must be finite and > 0"));
        }
        if !(self.max_lateral_step.is_finite() && self.max_lateral_step >= 0.0) {
            return Err(SetupError::InvalidRoad("max_lateral_step must be finite and >= 0"));
        }
        if !(self.max_lateral_drift.is_finite() && self.max_lateral_drift >= 0.0) {
            return Err(SetupError::InvalidRoad("max_lateral_drift must be finite and >= 0"));
        }
        if !(self.height_variation.is_finite() && self.height_variation >= 0.0) {
            return Err(SetupError::InvalidRoad("height_variation must be finite and >= 0"));
        }
        Ok(())
    }
}

/// Produce control points for a procedural road
pub fn generate_control_points(config: &RoadConfig, rng: &mut impl Rng) -> Vec<Vec3> {
    let mut points = Vec::with_capacity(config.segment_count + 1);
    let mut lateral = 0.0_f32;
    points.push(Vec3::ZERO);

    for i in 1..=config.segment_count {
        if i > config.straight_start_segments {
            if config.max_lateral_step > 0.0 {
                lateral += rng.random_range(-config.max_lateral_step..=config.max_lateral_step);
            }
            lateral = lateral.clamp(-config.max_lateral_drift, config.max_lateral_drift);
        }
        let height = if config.height_variation > 0.0 && i > config.straight_start_segments {
            rng.random_range(-config.height_variation..=config.height_variation)
        } else {
            0.0
        };
        points.push(Vec3::new(i as f32 * config.segment_length, height, lateral));
    }

    points
}

/// Build the road curve: authored points if configured, generated otherwise
pub fn build_road(config: &RoadConfig, rng: &mut impl Rng) -> Result<RoadCurve, SetupError> {
    config.validate()?;
    let points = match &config.control_points {
        Some(points) => points.clone(),
        None => generate_control_points(config, rng),
    };
    let curve = RoadCurve::new(points, config.resolution)?;
    log::info!(
        "Road built: {} control points, length {:.0}",
        curve.control_points().len(),
        curve.length()
    );
    Ok(curve)
}
