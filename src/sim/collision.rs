//! Car vs. object proximity checks
//!
//! Planar distance only: obstacles and bonuses float at different heights
//! but are hit the same way.

use glam::Vec3;

use super::spawn::PlacedObject;

/// Anything with a world position that can be driven into
pub trait Positioned {
    fn world_position(&self) -> Vec3;
}

impl Positioned for Vec3 {
    fn world_position(&self) -> Vec3 {
        *self
    }
}

impl<T> Positioned for PlacedObject<T> {
    fn world_position(&self) -> Vec3 {
        self.position
    }
}

/// Index of the first candidate (in list order, not nearest) whose planar
/// distance to `position` is within `radius`. A negative or NaN radius hits
/// nothing.
pub fn find_collision<C: Positioned>(position: Vec3, candidates: &[C], radius: f32) -> Option<usize> {
    if !(radius >= 0.0) {
        return None;
    }
    let radius_sq = radius * radius;
    candidates.iter().position(|candidate| {
        let p = candidate.world_position();
        let dx = p.x - position.x;
        let dz = p.z - position.z;
        dx * dx + dz * dz <= radius_sq
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::COLLISION_RADIUS;

    #[test]
    fn test_first_in_list_order_wins() {
        let candidates = [Vec3::new(1.5, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0)];
        assert_eq!(find_collision(Vec3::ZERO, &candidates, COLLISION_RADIUS), Some(0));

        // Both within radius: the earlier one is reported even though it is farther
        let overlapping = [Vec3::new(1.5, 0.0, 0.0), Vec3::new(0.5, 0.0, 0.0)];
        assert_eq!(find_collision(Vec3::ZERO, &overlapping, COLLISION_RADIUS), Some(0));

        let reversed = [Vec3::new(3.0, 0.0, 0.0), Vec3::new(1.5, 0.0, 0.0)];
        assert_eq!(find_collision(Vec3::ZERO, &reversed, COLLISION_RADIUS), Some(1));
    }

    #[test]
    fn test_height_ignored() {
        let candidates = [Vec3::new(0.0, 50.0, 1.0)];
        assert_eq!(find_collision(Vec3::ZERO, &candidates, 2.0), Some(0));
    }

    #[test]
    fn test_miss_and_empty() {
        let candidates = [Vec3::new(2.5, 0.0, 0.0), Vec3::new(0.0, 0.0, -2.1)];
        assert_eq!(find_collision(Vec3::ZERO, &candidates, 2.0), None);
        let none: [Vec3; 0] = [];
        assert_eq!(find_collision(Vec3::ZERO, &none, 2.0), None);
    }

    #[test]
    fn test_negative_radius_hits_nothing() {
        let candidates = [Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)];
        assert_eq!(find_collision(Vec3::ZERO, &candidates, -2.0), None);
        assert_eq!(find_collision(Vec3::ZERO, &candidates, f32::NAN), None);
        assert_eq!(find_collision(Vec3::ZERO, &candidates, 0.0), Some(0));
    }

    #[test]
    fn test_placed_objects() {
        use crate::sim::spawn::Side;
        let objects = vec![PlacedObject {
            template_index: 0,
            template: "cone",
            position: Vec3::new(10.0, 1.0, 10.0),
            yaw: 0.0,
            side: Side::Left,
        }];
        assert_eq!(find_collision(Vec3::new(11.0, 0.0, 10.0), &objects, 2.0), Some(0));
        assert_eq!(find_collision(Vec3::ZERO, &objects, 2.0), None);
    }
}
