//! Turns pointer clicks and drags into ground-plane ripples.

use crate::state::{InputState, MouseButton};
use glam::{Vec2, Vec3};
use physics::Plane;
use renderer::Camera;
use ripple::RippleSink;

/// Default world-space gap between wake ripples while dragging.
pub const DEFAULT_DRAG_SPACING: f32 = 4.0;

/// Axis-aligned window-pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl ScreenRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { min: Vec2::new(x, y), max: Vec2::new(x + width, y + height) }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Routes pointer input to a [`RippleSink`].
///
/// Clicks over UI chrome and rays that never reach the ground are ignored
/// without error.
#[derive(Debug, Clone)]
pub struct InputAdapter {
    /// Regions covered by UI controls.
    chrome: Vec<ScreenRect>,
    ground: Plane,
    drag_spacing: f32,
    /// Ground point of the last ripple emitted by the current press.
    drag_anchor: Option<Vec3>,
}

impl Default for InputAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_SPACING)
    }
}

impl InputAdapter {
    pub fn new(drag_spacing: f32) -> Self {
        Self {
            chrome: Vec::new(),
            ground: Plane::GROUND,
            drag_spacing: drag_spacing.max(0.0),
            drag_anchor: None,
        }
    }

    pub fn with_chrome(mut self, rect: ScreenRect) -> Self {
        self.chrome.push(rect);
        self
    }

    pub fn add_chrome(&mut self, rect: ScreenRect) {
        self.chrome.push(rect);
    }

    pub fn is_over_chrome(&self, cursor: Vec2) -> bool {
        self.chrome.iter().any(|r| r.contains(cursor))
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Ground-plane point under the cursor, if any.
    pub fn pick_ground(&self, cursor: Vec2, camera: &Camera, viewport: Vec2) -> Option<Vec3> {
        let ray = camera.screen_ray(cursor, viewport)?;
        ray.intersect_plane(&self.ground).map(|hit| hit.point)
    }

    /// A press on the render surface: add a ripple where the ray meets the
    /// ground and start a drag from there.
    pub fn click(
        &mut self,
        cursor: Vec2,
        camera: &Camera,
        viewport: Vec2,
        sink: &mut impl RippleSink,
    ) -> Option<Vec3> {
        if self.is_over_chrome(cursor) {
            log::debug!("Click at {cursor} landed on UI chrome");
            return None;
        }
        let point = self.pick_ground(cursor, camera, viewport)?;
        sink.add_ripple(point.x, point.z);
        self.drag_anchor = Some(point);
        log::debug!("Ripple from click at ({:.2}, {:.2})", point.x, point.z);
        Some(point)
    }

    /// Pointer moved with the button held: leave a wake ripple once the
    /// ground point is `drag_spacing` away from the previous one.
    pub fn drag(
        &mut self,
        cursor: Vec2,
        camera: &Camera,
        viewport: Vec2,
        sink: &mut impl RippleSink,
    ) -> Option<Vec3> {
        let anchor = self.drag_anchor?;
        if self.is_over_chrome(cursor) {
            return None;
        }
        let point = self.pick_ground(cursor, camera, viewport)?;
        if point.distance(anchor) < self.drag_spacing {
            return None;
        }
        sink.add_ripple(point.x, point.z);
        self.drag_anchor = Some(point);
        Some(point)
    }

    /// End the current drag.
    pub fn release(&mut self) {
        self.drag_anchor = None;
    }

    /// Feed one frame of pointer state. Returns the number of ripples added.
    pub fn update(
        &mut self,
        input: &InputState,
        camera: &Camera,
        viewport: Vec2,
        sink: &mut impl RippleSink,
    ) -> usize {
        let cursor = input.mouse_position();
        let mut added = 0;
        if input.is_mouse_pressed(MouseButton::Left) && input.is_cursor_inside() {
            added += self.click(cursor, camera, viewport, sink).is_some() as usize;
        } else if input.is_mouse_held(MouseButton::Left)
            && input.is_cursor_inside()
            && input.mouse_delta() != Vec2::ZERO
        {
            added += self.drag(cursor, camera, viewport, sink).is_some() as usize;
        }
        if input.is_mouse_released(MouseButton::Left) {
            self.release();
        }
        added
    }
}
