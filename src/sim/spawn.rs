//! Object placement along the road
//!
//! Spreads clones of template objects (other cars, bonuses, street furniture)
//! along a [`RoadCurve`]:
//! - spawn probability rises along the road (sparse start, dense finish)
//! - minimum spacing against the most recently placed object
//! - random side of the road, lateral offset, jitter
//! - heading aligned with the road
//!
//! Attaching the objects to a scene is the caller's job.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::curve::RoadCurve;
use crate::consts::*;
use crate::error::SetupError;
use crate::{normalize_angle, planar, sim_to_world};

/// Which half of the road an object sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Direction multiplier along the road's lateral axis
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Placement tuning for one layer of objects
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Curve parameter steps to consider (samples = divisions + 1)
    pub sample_divisions: usize,
    /// Minimum distance to the previously placed object
    pub min_spacing: f32,
    /// Spawn probability at the road start; >= 1 always spawns
    pub base_probability: f32,
    /// Hard cap on placements
    pub max_objects: usize,
    /// Higher values push the density toward the end of the road
    pub density_exponent: f32,
    /// Height every placed object is forced to
    pub height_offset: f32,
    /// Base lateral distance from the centerline (defaults to road width / 4)
    pub lateral_offset_from_center: Option<f32>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            sample_divisions: 800,
            min_spacing: 18.0,
            base_probability: 0.03,
            max_objects: 60,
            density_exponent: 2.0,
            height_offset: 1.0,
            lateral_offset_from_center: None,
        }
    }
}

impl PlacementConfig {
    /// Probability of attempting a spawn at curve parameter `t`
    pub fn spawn_probability(&self, t: f32) -> f32 {
        let base = self.base_probability;
        base + (1.0 - base) * t.powf(self.density_exponent)
    }

    fn validate(&self) -> Result<(), SetupError> {
        if self.sample_divisions == 0 {
            return Err(SetupError::ZeroResolution);
        }
        if !(self.min_spacing.is_finite() && self.min_spacing >= 0.0) {
            return Err(SetupError::InvalidPlacement("min_spacing must be finite and >= 0"));
        }
        if !self.base_probability.is_finite() {
            return Err(SetupError::InvalidPlacement("base_probability must be finite"));
        }
        if !(self.density_exponent.is_finite() && self.density_exponent >= 0.0) {
            return Err(SetupError::InvalidPlacement("density_exponent must be finite and >= 0"));
        }
        if !self.height_offset.is_finite() {
            return Err(SetupError::InvalidPlacement("height_offset must be finite"));
        }
        if self.lateral_offset_from_center.is_some_and(|o| !o.is_finite()) {
            return Err(SetupError::InvalidPlacement("lateral_offset_from_center must be finite"));
        }
        Ok(())
    }
}

/// An object cloned from the template pool and positioned in world space
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedObject<T> {
    /// Index of the pool entry this was cloned from
    pub template_index: usize,
    pub template: T,
    pub position: Vec3,
    /// Heading around the vertical axis (radians)
    pub yaw: f32,
    pub side: Side,
}

impl<T> PlacedObject<T> {
    /// Add a side-dependent turn to the heading
    pub fn turn_by_side(&mut self, left: f32, right: f32) {
        let turn = match self.side {
            Side::Left => left,
            Side::Right => right,
        };
        self.yaw = normalize_angle(self.yaw + turn);
    }
}

/// Place clones of `pool` along `curve`.
///
/// Output follows curve traversal order. Each placement is at least
/// `min_spacing` from the one before it (only the immediate predecessor is
/// checked).
pub fn spawn_along_curve<T: Clone>(
    curve: &RoadCurve,
    pool: &[T],
    config: &PlacementConfig,
    road_width: f32,
    rng: &mut impl Rng,
) -> Result<Vec<PlacedObject<T>>, SetupError> {
    if pool.is_empty() {
        return Err(SetupError::EmptyTemplatePool);
    }
    config.validate()?;

    let samples: Vec<(Vec3, Vec3)> = curve
        .sample_points(config.sample_divisions)
        .into_iter()
        .map(|(p, tangent)| (sim_to_world(p), sim_to_world(tangent)))
        .collect();
    let last_index = samples.len() - 1;
    let base_offset = config
        .lateral_offset_from_center
        .unwrap_or(road_width / 4.0);

    let mut placed: Vec<PlacedObject<T>> = Vec::new();
    let mut last_placed: Option<Vec3> = None;

    for (i, &(point, tangent)) in samples.iter().enumerate() {
        if placed.len() >= config.max_objects {
            break;
        }

        let t = i as f32 / last_index as f32;
        if rng.random::<f32>() > config.spawn_probability(t) {
            continue;
        }

        let template_index = rng.random_range(0..pool.len());

        // Look a few samples ahead for a stable heading
        let ahead = (i + PLACEMENT_LOOK_AHEAD).min(last_index);
        let dir = planar(samples[ahead].0 - point)
            .try_normalize()
            .or_else(|| planar(tangent).try_normalize())
            .unwrap_or(Vec3::Z);
        let heading = dir.x.atan2(dir.z);

        let side = if rng.random_bool(0.5) {
            Side::Left
        } else {
            Side::Right
        };
        let offset = base_offset * (0.6 + 0.4 * rng.random::<f32>());
        let lateral = Vec3::new(dir.z, 0.0, -dir.x);
        let mut position = point + lateral * (offset * side.sign());

        position.x += (rng.random::<f32>() - 0.5) * PLACEMENT_JITTER;
        position.z += (rng.random::<f32>() - 0.5) * PLACEMENT_JITTER;
        let yaw = normalize_angle(heading + (rng.random::<f32>() - 0.5) * PLACEMENT_YAW_JITTER);
        position.y = config.height_offset;

        // Spacing is checked on the final position so consecutive outputs hold it
        if let Some(last) = last_placed {
            if position.distance(last) < config.min_spacing {
                continue;
            }
        }

        placed.push(PlacedObject {
            template_index,
            template: pool[template_index].clone(),
            position,
            yaw,
            side,
        });
        last_placed = Some(position);
    }

    log::debug!(
        "Placed {} objects from a pool of {} ({} samples)",
        placed.len(),
        pool.len(),
        samples.len()
    );
    Ok(placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn straight_road(length: f32) -> RoadCurve {
        RoadCurve::new(vec![Vec3::ZERO, Vec3::new(length, 0.0, 0.0)], 256).unwrap()
    }

    fn always() -> PlacementConfig {
        PlacementConfig {
            base_probability: 10.0,
            max_objects: 1000,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_pool_rejected() {
        let curve = straight_road(100.0);
        let pool: [u8; 0] = [];
        let err = spawn_along_curve(&curve, &pool, &PlacementConfig::default(), 30.0, &mut Pcg32::seed_from_u64(1))
            .unwrap_err();
        assert_eq!(err, SetupError::EmptyTemplatePool);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let curve = straight_road(100.0);
        let mut rng = Pcg32::seed_from_u64(1);
        let zero = PlacementConfig {
            sample_divisions: 0,
            ..Default::default()
        };
        assert_eq!(
            spawn_along_curve(&curve, &[1], &zero, 30.0, &mut rng).unwrap_err(),
            SetupError::ZeroResolution
        );
        let negative = PlacementConfig {
            min_spacing: -1.0,
            ..Default::default()
        };
        assert!(spawn_along_curve(&curve, &[1], &negative, 30.0, &mut rng).is_err());
    }

    #[test]
    fn test_probability_shape() {
        let config = PlacementConfig::default();
        assert!((config.spawn_probability(0.0) - 0.03).abs() < 1e-6);
        assert!((config.spawn_probability(1.0) - 1.0).abs() < 1e-6);
        assert!(config.spawn_probability(0.25) < config.spawn_probability(0.75));
        assert!(always().spawn_probability(0.5) >= 1.0);
    }

    #[test]
    fn test_consecutive_spacing_and_order() {
        let curve = straight_road(2000.0);
        let objects =
            spawn_along_curve(&curve, &["a", "b", "c"], &always(), 30.0, &mut Pcg32::seed_from_u64(3))
                .unwrap();
        assert!(objects.len() > 10);
        for pair in objects.windows(2) {
            assert!(pair[1].position.distance(pair[0].position) >= 18.0);
            // Straight sim +x road runs along world +z
            assert!(pair[1].position.z > pair[0].position.z - PLACEMENT_JITTER);
        }
    }

    #[test]
    fn test_max_objects_cap() {
        let curve = straight_road(2000.0);
        let config = PlacementConfig {
            max_objects: 5,
            ..always()
        };
        let objects = spawn_along_curve(&curve, &[0], &config, 30.0, &mut Pcg32::seed_from_u64(11)).unwrap();
        assert_eq!(objects.len(), 5);

        let none = PlacementConfig {
            max_objects: 0,
            ..always()
        };
        assert!(spawn_along_curve(&curve, &[0], &none, 30.0, &mut Pcg32::seed_from_u64(11))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_saturated_probability_is_dense() {
        let curve = straight_road(1000.0);
        let config = PlacementConfig {
            min_spacing: 15.0,
            ..always()
        };
        let dense = spawn_along_curve(&curve, &[0], &config, 30.0, &mut Pcg32::seed_from_u64(5)).unwrap();
        let sparse = spawn_along_curve(
            &curve,
            &[0],
            &PlacementConfig {
                min_spacing: 15.0,
                max_objects: 1000,
                base_probability: 0.0,
                density_exponent: 6.0,
                ..Default::default()
            },
            30.0,
            &mut Pcg32::seed_from_u64(5),
        )
        .unwrap();
        // At most ~17 units of road between placements when every sample is tried
        assert!(dense.len() >= 40, "only {} placed", dense.len());
        assert!(dense.len() > sparse.len());
    }

    #[test]
    fn test_side_height_and_heading() {
        let curve = straight_road(1000.0);
        let config = PlacementConfig {
            height_offset: 0.25,
            ..always()
        };
        let objects = spawn_along_curve(&curve, &[0], &config, 30.0, &mut Pcg32::seed_from_u64(8)).unwrap();
        for obj in &objects {
            assert_eq!(obj.position.y, 0.25);
            // Lateral axis for a +z road is world x: left is negative
            match obj.side {
                Side::Left => assert!(obj.position.x < 0.0),
                Side::Right => assert!(obj.position.x > 0.0),
            }
            // road width 30 -> offset in [4.5, 7.5] plus up to 0.6 jitter
            assert!(obj.position.x.abs() >= 4.5 - 0.6 && obj.position.x.abs() <= 7.5 + 0.6);
            assert!(obj.yaw.abs() <= 0.1 + 1e-5);
        }
        assert!(objects.iter().any(|o| o.side == Side::Left));
        assert!(objects.iter().any(|o| o.side == Side::Right));
    }

    #[test]
    fn test_lateral_offset_override() {
        let curve = straight_road(1000.0);
        let config = PlacementConfig {
            lateral_offset_from_center: Some(20.0),
            ..always()
        };
        let objects = spawn_along_curve(&curve, &[0], &config, 30.0, &mut Pcg32::seed_from_u64(21)).unwrap();
        assert!(objects.iter().all(|o| o.position.x.abs() >= 12.0 - 0.6));
    }

    #[test]
    fn test_seeded_runs_match() {
        let curve = straight_road(1500.0);
        let config = PlacementConfig::default();
        let a = spawn_along_curve(&curve, &[1, 2, 3], &config, 30.0, &mut Pcg32::seed_from_u64(77)).unwrap();
        let b = spawn_along_curve(&curve, &[1, 2, 3], &config, 30.0, &mut Pcg32::seed_from_u64(77)).unwrap();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.position, y.position);
            assert_eq!(x.template_index, y.template_index);
            assert_eq!(x.template, pool_value(x.template_index));
        }
    }

    fn pool_value(index: usize) -> i32 {
        [1, 2, 3][index]
    }

    #[test]
    fn test_turn_by_side() {
        let mut obj = PlacedObject {
            template_index: 0,
            template: (),
            position: Vec3::ZERO,
            yaw: 0.0,
            side: Side::Left,
        };
        obj.turn_by_side(std::f32::consts::FRAC_PI_2, -std::f32::consts::FRAC_PI_2);
        assert!((obj.yaw - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
