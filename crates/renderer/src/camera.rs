//! Perspective camera looking at the landscape.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3, Vec4};
use physics::Ray;

/// Look-at camera with configurable FOV and clipping planes.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 20.0, 40.0),
            target: Vec3::ZERO,
            fov_degrees: 50.0,
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl Camera {
    /// Create a camera at `position` looking at `target`.
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Default::default()
        }
    }

    /// Update aspect ratio (call on viewport resize).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Window pixel coordinates (origin top-left) to normalised device
    /// coordinates (origin centre, +y up). `None` for an empty viewport.
    pub fn screen_to_ndc(cursor: Vec2, viewport: Vec2) -> Option<Vec2> {
        if viewport.x <= 0.0 || viewport.y <= 0.0 || !cursor.is_finite() {
            return None;
        }
        Some(Vec2::new(
            cursor.x / viewport.x * 2.0 - 1.0,
            -(cursor.y / viewport.y) * 2.0 + 1.0,
        ))
    }

    /// World-space ray from the eye through a window pixel.
    pub fn screen_ray(&self, cursor: Vec2, viewport: Vec2) -> Option<Ray> {
        let ndc = Self::screen_to_ndc(cursor, viewport)?;
        let view_proj = self.view_projection_matrix();
        let det = view_proj.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        // perspective_rh maps depth to 0..1, so 1.0 is the far plane
        let far = view_proj.inverse().project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::between(self.position, far)
    }

    /// Project a world point to window pixels. `None` behind the camera.
    pub fn world_to_screen(&self, point: Vec3, viewport: Vec2) -> Option<Vec2> {
        let clip = self.view_projection_matrix() * point.extend(1.0);
        project_clip(clip, viewport)
    }
}

/// Clip-space position to window pixels.
pub(crate) fn project_clip(clip: Vec4, viewport: Vec2) -> Option<Vec2> {
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(Vec2::new(
        (ndc.x + 1.0) * 0.5 * viewport.x,
        (1.0 - ndc.y) * 0.5 * viewport.y,
    ))
}

/// Camera uniform data for GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub position: [f32; 4], // w unused, padding
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 4],
        }
    }

    pub fn update(&mut self, camera: &Camera) {
        self.view = camera.view_matrix().to_cols_array_2d();
        self.proj = camera.projection_matrix().to_cols_array_2d();
        self.view_proj = camera.view_projection_matrix().to_cols_array_2d();
        let pos = camera.position;
        self.position = [pos.x, pos.y, pos.z, 1.0];
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use physics::Plane;

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    fn camera() -> Camera {
        let mut cam = Camera::default();
        cam.set_aspect(1280, 720);
        cam
    }

    #[test]
    fn ndc_corners() {
        assert_eq!(Camera::screen_to_ndc(Vec2::ZERO, VIEWPORT), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(Camera::screen_to_ndc(VIEWPORT, VIEWPORT), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(Camera::screen_to_ndc(VIEWPORT * 0.5, VIEWPORT), Some(Vec2::ZERO));
        assert_eq!(Camera::screen_to_ndc(Vec2::ZERO, Vec2::new(0.0, 10.0)), None);
    }

    #[test]
    fn centre_ray_hits_look_target() {
        let cam = camera();
        let ray = cam.screen_ray(VIEWPORT * 0.5, VIEWPORT).unwrap();
        let hit = ray.intersect_plane(&Plane::GROUND).unwrap();
        assert!(hit.point.length() < 1e-2, "hit {:?}", hit.point);
    }

    #[test]
    fn upward_camera_misses_ground() {
        // Tilted 45° upward: every pixel looks above the horizon.
        let mut cam = camera();
        cam.target = cam.position + Vec3::new(0.0, 1.0, -1.0);
        let ray = cam.screen_ray(Vec2::new(640.0, 0.0), VIEWPORT).unwrap();
        assert!(ray.intersect_plane(&Plane::GROUND).is_none());
    }

    #[test]
    fn world_to_screen_inverts_screen_ray() {
        let cam = camera();
        let cursor = Vec2::new(300.0, 500.0);
        let hit = cam
            .screen_ray(cursor, VIEWPORT)
            .and_then(|r| r.intersect_plane(&Plane::GROUND))
            .unwrap();
        let back = cam.world_to_screen(hit.point, VIEWPORT).unwrap();
        assert!((back - cursor).length() < 0.5, "{back:?}");
    }

    #[test]
    fn points_behind_camera_do_not_project() {
        let cam = camera();
        assert!(cam.world_to_screen(Vec3::new(0.0, 30.0, 80.0), VIEWPORT).is_none());
    }

    #[test]
    fn uniform_tracks_camera() {
        let cam = camera();
        let mut u = CameraUniform::default();
        u.update(&cam);
        assert_eq!(u.position, [0.0, 20.0, 40.0, 1.0]);
        assert_eq!(u.view, cam.view_matrix().to_cols_array_2d());
        assert_eq!(bytemuck::bytes_of(&u).len(), 208);
    }
}
