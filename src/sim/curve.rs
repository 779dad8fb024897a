//! Road centerline curve
//!
//! A uniform Catmull-Rom spline through the control points, in simulation
//! space (x = along road, y = height, z = lateral offset). The curve passes
//! exactly through every control point and has a continuous first
//! derivative, so tangents are stable enough to orient objects with.
//!
//! Evaluation is by curve parameter `t` in [0, 1], which is evenly spread
//! over control-point segments, not over distance. A cached table of
//! samples with cumulative arc length maps between the two.

use glam::Vec3;

use crate::error::SetupError;

/// One cached sample of the curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    /// Curve parameter of this sample
    pub t: f32,
    pub position: Vec3,
    /// Unit tangent
    pub tangent: Vec3,
    /// Cumulative arc length from the start of the curve
    pub distance: f32,
}

/// Immutable road centerline, built once per level
#[derive(Debug, Clone)]
pub struct RoadCurve {
    points: Vec<Vec3>,
    samples: Vec<CurveSample>,
}

impl RoadCurve {
    /// Build a curve through `control_points`, caching `resolution + 1`
    /// samples for arc-length queries.
    pub fn new(control_points: Vec<Vec3>, resolution: usize) -> Result<Self, SetupError> {
        if control_points.len() < 2 {
            return Err(SetupError::TooFewControlPoints {
                got: control_points.len(),
            });
        }
        if let Some(index) = control_points.iter().position(|p| !p.is_finite()) {
            return Err(SetupError::NonFiniteControlPoint { index });
        }
        if resolution == 0 {
            return Err(SetupError::ZeroResolution);
        }

        let mut curve = Self {
            points: control_points,
            samples: Vec::with_capacity(resolution + 1),
        };

        let mut distance = 0.0;
        let mut prev: Option<Vec3> = None;
        for i in 0..=resolution {
            let t = i as f32 / resolution as f32;
            let position = curve.point_at(t);
            if let Some(prev) = prev {
                distance += position.distance(prev);
            }
            curve.samples.push(CurveSample {
                t,
                position,
                tangent: curve.tangent_at(t),
                distance,
            });
            prev = Some(position);
        }

        Ok(curve)
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Cached sample table (ordered by `t`, distance non-decreasing)
    pub fn samples(&self) -> &[CurveSample] {
        &self.samples
    }

    /// Total arc length (from the cached samples)
    pub fn length(&self) -> f32 {
        self.samples.last().map(|s| s.distance).unwrap_or(0.0)
    }

    /// Point on the curve at parameter `t` (clamped to [0, 1])
    pub fn point_at(&self, t: f32) -> Vec3 {
        let (p0, p1, p2, p3, u) = self.segment(t);
        let u2 = u * u;
        let u3 = u2 * u;
        0.5 * ((2.0 * p1)
            + (p2 - p0) * u
            + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * u2
            + (3.0 * p1 - p0 - 3.0 * p2 + p3) * u3)
    }

    /// Unit tangent at parameter `t`
    pub fn tangent_at(&self, t: f32) -> Vec3 {
        let (p0, p1, p2, p3, u) = self.segment(t);
        let u2 = u * u;
        let d = 0.5
            * ((p2 - p0)
                + 2.0 * (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * u
                + 3.0 * (3.0 * p1 - p0 - 3.0 * p2 + p3) * u2);

        // Coincident control points give a zero derivative; fall back to the chord
        let d = d.try_normalize().or_else(|| (p2 - p1).try_normalize());
        d.unwrap_or(Vec3::X)
    }

    /// `n + 1` (position, tangent) pairs evenly spaced by parameter.
    /// `n = 0` yields the start of the curve only.
    pub fn sample_points(&self, n: usize) -> Vec<(Vec3, Vec3)> {
        (0..=n)
            .map(|i| {
                let t = division_param(i, n);
                (self.point_at(t), self.tangent_at(t))
            })
            .collect()
    }

    /// Cumulative arc length at each of the `n + 1` parameter-spaced samples
    pub fn arc_lengths(&self, n: usize) -> Vec<f32> {
        (0..=n).map(|i| self.distance_at(division_param(i, n))).collect()
    }

    /// Arc length from the start to parameter `t`, interpolated from the cache
    pub fn distance_at(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let last = self.samples.len() - 1;
        let scaled = t * last as f32;
        let i = (scaled.floor() as usize).min(last.saturating_sub(1));
        let frac = scaled - i as f32;
        let a = self.samples[i].distance;
        let b = self.samples[(i + 1).min(last)].distance;
        a + (b - a) * frac
    }

    /// Curve parameter at arc length `distance` (clamped to the curve)
    pub fn param_at_distance(&self, distance: f32) -> f32 {
        let distance = distance.clamp(0.0, self.length());
        let idx = self.samples.partition_point(|s| s.distance < distance);
        if idx == 0 {
            return 0.0;
        }
        if idx >= self.samples.len() {
            return 1.0;
        }
        let a = &self.samples[idx - 1];
        let b = &self.samples[idx];
        let span = b.distance - a.distance;
        if span <= f32::EPSILON {
            return b.t;
        }
        a.t + (b.t - a.t) * (distance - a.distance) / span
    }

    /// Point at arc length `distance` along the curve
    pub fn point_at_distance(&self, distance: f32) -> Vec3 {
        self.point_at(self.param_at_distance(distance))
    }

    /// Control points for the segment containing `t`, plus the local
    /// parameter. End segments mirror a phantom neighbour.
    fn segment(&self, t: f32) -> (Vec3, Vec3, Vec3, Vec3, f32) {
        let n = self.points.len();
        let segments = n - 1;
        let scaled = t.clamp(0.0, 1.0) * segments as f32;
        let i = (scaled.floor() as usize).min(segments - 1);
        let u = scaled - i as f32;

        let p1 = self.points[i];
        let p2 = self.points[i + 1];
        let p0 = if i == 0 { 2.0 * p1 - p2 } else { self.points[i - 1] };
        let p3 = if i + 2 < n {
            self.points[i + 2]
        } else {
            2.0 * p2 - p1
        };
        (p0, p1, p2, p3, u)
    }
}

/// Parameter of division `i` out of `n`
fn division_param(i: usize, n: usize) -> f32 {
    if n == 0 { 0.0 } else { i as f32 / n as f32 }
}
