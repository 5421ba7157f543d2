//! Software point renderer: additive round sprites onto an RGB image.
//!
//! Each point is a disc of diameter `size` pixels whose glow falls off as
//! `1 - smoothstep(0.3, 0.5, r)` (`r` in sprite units, pixels beyond 0.5
//! discarded). Contributions are weighted by alpha and summed, then clamped.

use crate::camera::{project_clip, Camera};
use crate::vertex::PointVertex;
use engine_core::{smoothstep, to_rgb8};
use glam::{Vec2, Vec3};
use image::{Rgb, RgbImage};

const GLOW_INNER: f32 = 0.3;
const GLOW_OUTER: f32 = 0.5;
/// Sprites larger than this are clamped to keep one splat bounded.
const MAX_SPRITE_SIZE: f32 = 64.0;

/// Accumulates point sprites into a floating-point framebuffer.
#[derive(Debug, Clone)]
pub struct PointSplatter {
    width: u32,
    height: u32,
    accum: Vec<Vec3>,
}

impl PointSplatter {
    pub fn new(width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            log::warn!("Point splatter created with empty surface {width}x{height}");
        }
        Self {
            width,
            height,
            accum: vec![Vec3::ZERO; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Clear to black.
    pub fn clear(&mut self) {
        self.accum.fill(Vec3::ZERO);
    }

    /// Draw every point; returns how many landed on screen.
    pub fn draw(&mut self, camera: &Camera, points: &[PointVertex]) -> usize {
        let view_proj = camera.view_projection_matrix();
        let viewport = self.viewport();
        let mut drawn = 0;
        for p in points {
            if p.alpha <= 0.0 || p.size <= 0.0 {
                continue;
            }
            let clip = view_proj * p.world_position().extend(1.0);
            let Some(center) = project_clip(clip, viewport) else {
                continue;
            };
            if self.splat(center, p.size, Vec3::from_array(p.color) * p.alpha) {
                drawn += 1;
            }
        }
        drawn
    }

    /// Add one sprite. Sub-pixel sprites deposit their area into the pixel
    /// they land in.
    fn splat(&mut self, center: Vec2, size: f32, color: Vec3) -> bool {
        let size = size.min(MAX_SPRITE_SIZE);
        if !center.is_finite() {
            return false;
        }

        if size < 1.0 {
            return match self.index(center.x.floor() as i64, center.y.floor() as i64) {
                Some(idx) => {
                    self.accum[idx] += color * (size * size);
                    true
                }
                None => false,
            };
        }

        let half = size * GLOW_OUTER;
        let x0 = (center.x - half).floor() as i64;
        let x1 = (center.x + half).ceil() as i64;
        let y0 = (center.y - half).floor() as i64;
        let y1 = (center.y + half).ceil() as i64;
        let mut hit = false;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let Some(idx) = self.index(x, y) else {
                    continue;
                };
                let pixel = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let r = pixel.distance(center) / size;
                if r > GLOW_OUTER {
                    continue;
                }
                let glow = 1.0 - smoothstep(GLOW_INNER, GLOW_OUTER, r);
                self.accum[idx] += color * glow;
                hit = true;
            }
        }
        hit
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Accumulated colour at a pixel, before clamping.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Vec3> {
        self.index(x as i64, y as i64).map(|i| self.accum[i])
    }

    /// Clamp the framebuffer into an 8-bit image.
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            Rgb(to_rgb8(self.accum[y as usize * self.width as usize + x as usize]))
        })
    }
}
