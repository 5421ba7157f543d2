//! Ray / plane intersection for pointer picking.

use glam::Vec3;

/// Rays closer than this to parallel with a plane never hit it.
const PARALLEL_EPSILON: f32 = 1e-6;

/// A half-line starting at `origin`. `direction` is kept normalised so hit
/// distances are in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// `None` for a zero or non-finite direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        if !origin.is_finite() {
            return None;
        }
        Some(Self { origin, direction })
    }

    /// Ray from `from` through `to`.
    pub fn between(from: Vec3, to: Vec3) -> Option<Self> {
        Self::new(from, to - from)
    }

    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }

    /// First intersection with `plane` in front of the origin.
    ///
    /// Misses (parallel ray, plane behind the origin) and degenerate
    /// results (NaN or infinity) all return `None`.
    pub fn intersect_plane(&self, plane: &Plane) -> Option<RaycastHit> {
        let denom = plane.normal.dot(self.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let distance = -(plane.normal.dot(self.origin) + plane.constant) / denom;
        if !distance.is_finite() || distance < 0.0 {
            return None;
        }
        let point = self.point_at(distance);
        if !point.is_finite() {
            log::debug!("Discarding non-finite plane hit {point}");
            return None;
        }
        Some(RaycastHit { distance, point, normal: plane.normal })
    }
}

/// Plane `normal · p + constant = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub constant: f32,
}

impl Plane {
    /// The landscape rest plane, `y = 0`.
    pub const GROUND: Self = Self { normal: Vec3::Y, constant: 0.0 };

    /// `normal` is normalised; `None` if it is zero.
    pub fn new(normal: Vec3, constant: f32) -> Option<Self> {
        let len = normal.length();
        if len <= PARALLEL_EPSILON || !len.is_finite() {
            return None;
        }
        Some(Self { normal: normal / len, constant: constant / len })
    }
}

/// Result of a ray query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// Distance along the ray to the hit point.
    pub distance: f32,
    /// World position of the hit.
    pub point: Vec3,
    /// Surface normal at the hit point.
    pub normal: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downward_ray_hits_ground() {
        let ray = Ray::between(Vec3::new(0.0, 20.0, 40.0), Vec3::new(5.0, 0.0, 0.0)).unwrap();
        let hit = ray.intersect_plane(&Plane::GROUND).unwrap();
        assert!(hit.point.y.abs() < 1e-4);
        assert!((hit.point.x - 5.0).abs() < 1e-4);
        assert!(hit.point.z.abs() < 1e-3);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn ray_looking_away_misses() {
        let up = Ray::new(Vec3::new(0.0, 20.0, 0.0), Vec3::new(0.0, 1.0, -1.0)).unwrap();
        assert!(up.intersect_plane(&Plane::GROUND).is_none());

        let flat = Ray::new(Vec3::new(0.0, 20.0, 0.0), Vec3::X).unwrap();
        assert!(flat.intersect_plane(&Plane::GROUND).is_none());
    }

    #[test]
    fn degenerate_rays_are_rejected() {
        assert!(Ray::new(Vec3::ZERO, Vec3::ZERO).is_none());
        assert!(Ray::new(Vec3::ZERO, Vec3::new(f32::NAN, 1.0, 0.0)).is_none());
        assert!(Ray::new(Vec3::new(f32::INFINITY, 0.0, 0.0), Vec3::Y).is_none());
        assert!(Ray::between(Vec3::ONE, Vec3::ONE).is_none());
    }

    #[test]
    fn ray_on_plane_starts_at_zero_distance() {
        let ray = Ray::new(Vec3::new(1.0, 0.0, 2.0), -Vec3::Y).unwrap();
        let hit = ray.intersect_plane(&Plane::GROUND).unwrap();
        assert_eq!(hit.distance, 0.0);
        assert_eq!(hit.point, Vec3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn horizontal_plane_offset() {
        // y = 3, with an unnormalised normal
        let plane = Plane::new(Vec3::new(0.0, 2.0, 0.0), -6.0).unwrap();
        assert_eq!(plane.normal, Vec3::Y);
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), -Vec3::Y).unwrap();
        let hit = ray.intersect_plane(&plane).unwrap();
        assert!((hit.distance - 7.0).abs() < 1e-5);
        assert!(Plane::new(Vec3::ZERO, 1.0).is_none());
    }
}
