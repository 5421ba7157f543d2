//! A scripted landscape session: drives the frame loop, replays UI events
//! and renders snapshots.

use crate::config::{color_or, LandscapeConfig, ScriptedEvent};
use engine_core::Time;
use glam::{Vec2, Vec3};
use image::RgbImage;
use input::{ElementState, InputAdapter, InputState, MouseButton, ScreenRect};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use renderer::{pack_points, Camera, PointSplatter, PointVertex};
use ripple::{DriverSettings, FrameDriver, PointGrid};

/// Low-level pointer step derived from scripted events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    Move(Vec2),
    Press,
    Release,
}

/// Pointer actions scheduled for `frame`, in order.
pub fn pointer_actions(events: &[ScriptedEvent], frame: u64) -> Vec<PointerAction> {
    let mut actions = Vec::new();
    for event in events {
        match *event {
            ScriptedEvent::Click { frame: f, x, y } if f == frame => {
                actions.push(PointerAction::Move(Vec2::new(x, y)));
                actions.push(PointerAction::Press);
                actions.push(PointerAction::Release);
            }
            ScriptedEvent::Drag { frame: f, from, to, steps }
                if frame >= f && frame <= f.saturating_add(steps) =>
            {
                let from = Vec2::new(from.0, from.1);
                let to = Vec2::new(to.0, to.1);
                if frame == f {
                    actions.push(PointerAction::Move(from));
                    actions.push(PointerAction::Press);
                } else {
                    let t = (frame - f) as f32 / steps as f32;
                    actions.push(PointerAction::Move(from.lerp(to, t)));
                }
                if frame == f.saturating_add(steps) {
                    actions.push(PointerAction::Release);
                }
            }
            _ => {}
        }
    }
    actions
}

/// Summary of one evaluated frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameStats {
    pub frame: u64,
    pub time: f32,
    pub active_ripples: usize,
    pub ripples_added: usize,
    /// Largest absolute ripple height on the grid.
    pub peak_ripple: f32,
    pub sparkling: usize,
    /// Points with nonzero alpha and size.
    pub visible: usize,
}

pub struct Session {
    config: LandscapeConfig,
    driver: FrameDriver,
    camera: Camera,
    adapter: InputAdapter,
    input: InputState,
    splatter: PointSplatter,
    vertices: Vec<PointVertex>,
    time: Time,
    rng: StdRng,
}

impl Session {
    pub fn new(config: LandscapeConfig) -> Self {
        let grid = PointGrid::new(config.grid_rows, config.grid_cols, config.grid_spacing);
        log::info!("Landscape grid: {} points", grid.len());

        let settings = DriverSettings {
            base_color: config.base_color(),
            ripple_color: config.ripple_color(),
            strength: config.ripple_strength,
        };
        let driver = FrameDriver::new(grid, settings);

        let mut camera = Camera::new(
            Vec3::from_array(config.camera_position),
            Vec3::from_array(config.camera_target),
        );
        camera.fov_degrees = config.camera_fov;
        camera.set_aspect(config.viewport_width, config.viewport_height);

        let mut adapter = InputAdapter::new(config.drag_spacing);
        for [x, y, w, h] in &config.chrome {
            adapter.add_chrome(ScreenRect::new(*x, *y, *w, *h));
        }

        Self {
            driver,
            camera,
            adapter,
            input: InputState::new(),
            splatter: PointSplatter::new(config.viewport_width, config.viewport_height),
            vertices: Vec::new(),
            time: Time::fixed(config.frame_delta),
            rng: StdRng::seed_from_u64(config.seed),
            config,
        }
    }

    pub fn config(&self) -> &LandscapeConfig {
        &self.config
    }

    pub fn driver(&self) -> &FrameDriver {
        &self.driver
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    fn viewport(&self) -> Vec2 {
        Vec2::new(self.config.viewport_width as f32, self.config.viewport_height as f32)
    }

    /// Apply this frame's UI events, then tick the driver once.
    pub fn step(&mut self) -> FrameStats {
        let frame = self.time.frame_count();
        self.apply_ui_events(frame);
        let ripples_added = self.apply_pointer(frame);

        self.time.update();
        let view = self.camera.view_matrix();
        self.driver.tick(self.time.delta_seconds(), view);

        let mut stats = FrameStats {
            frame,
            time: self.driver.time(),
            active_ripples: self.driver.registry().len(),
            ripples_added,
            ..Default::default()
        };
        for s in self.driver.samples() {
            stats.peak_ripple = stats.peak_ripple.max(s.ripple_height.abs());
            stats.sparkling += (s.sparkle > 0.0) as usize;
            stats.visible += (s.alpha > 0.0 && s.size > 0.0) as usize;
        }
        stats
    }

    fn apply_ui_events(&mut self, frame: u64) {
        for event in self.config.events.iter().filter(|e| e.frame() == frame) {
            match event {
                ScriptedEvent::BaseColor { color, .. } => {
                    log::info!("Frame {frame}: base colour {color}");
                    self.driver.set_base_color(color_or(color, self.config.base_color.clone(), "event"));
                }
                ScriptedEvent::RippleColor { color, .. } => {
                    log::info!("Frame {frame}: ripple colour {color}");
                    self.driver.set_ripple_color(color_or(color, self.config.ripple_color.clone(), "event"));
                }
                ScriptedEvent::Strength { value, .. } => {
                    log::info!("Frame {frame}: ripple strength {value}");
                    self.driver.set_strength(*value);
                }
                ScriptedEvent::Reset { .. } => {
                    log::info!("Frame {frame}: scene reset");
                    self.driver.reset();
                    self.adapter.release();
                }
                ScriptedEvent::Click { .. } | ScriptedEvent::Drag { .. } => {}
            }
        }
    }

    fn apply_pointer(&mut self, frame: u64) -> usize {
        self.input.begin_frame();
        let mut actions = pointer_actions(&self.config.events, frame);

        let rate = self.config.random_clicks_per_second * self.config.frame_delta;
        let viewport = self.viewport();
        if rate > 0.0
            && viewport.min_element() > 0.0
            && !self.input.is_mouse_held(MouseButton::Left)
            && self.rng.gen::<f32>() < rate
        {
            let cursor = Vec2::new(
                self.rng.gen_range(0.0..viewport.x),
                self.rng.gen_range(0.0..viewport.y),
            );
            actions.extend([PointerAction::Move(cursor), PointerAction::Press, PointerAction::Release]);
        }

        for action in actions {
            match action {
                PointerAction::Move(p) => self.input.process_cursor_position((p.x as f64, p.y as f64)),
                PointerAction::Press => {
                    self.input.process_mouse_button(MouseButton::Left, ElementState::Pressed)
                }
                PointerAction::Release => {
                    self.input.process_mouse_button(MouseButton::Left, ElementState::Released)
                }
            }
        }

        self.adapter.update(&self.input, &self.camera, viewport, &mut self.driver)
    }

    /// Splat the last evaluated frame into an image.
    pub fn render(&mut self) -> RgbImage {
        pack_points(self.driver.grid().points(), self.driver.samples(), &mut self.vertices);
        self.splatter.clear();
        let drawn = self.splatter.draw(&self.camera, &self.vertices);
        log::debug!("Splatted {drawn} of {} points", self.vertices.len());
        self.splatter.to_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(events: Vec<ScriptedEvent>) -> LandscapeConfig {
        LandscapeConfig {
            grid_rows: 40,
            grid_cols: 40,
            grid_spacing: 1.0,
            viewport_width: 160,
            viewport_height: 90,
            chrome: vec![[0.0, 0.0, 20.0, 20.0]],
            events,
            ..Default::default()
        }
    }

    #[test]
    fn drag_schedule_presses_moves_and_releases() {
        let events = vec![ScriptedEvent::Drag { frame: 2, from: (0.0, 0.0), to: (40.0, 0.0), steps: 4 }];
        assert!(pointer_actions(&events, 1).is_empty());
        assert_eq!(
            pointer_actions(&events, 2),
            vec![PointerAction::Move(Vec2::ZERO), PointerAction::Press]
        );
        assert_eq!(pointer_actions(&events, 4), vec![PointerAction::Move(Vec2::new(20.0, 0.0))]);
        assert_eq!(
            pointer_actions(&events, 6),
            vec![PointerAction::Move(Vec2::new(40.0, 0.0)), PointerAction::Release]
        );
        assert!(pointer_actions(&events, 7).is_empty());
    }

    #[test]
    fn endless_drag_does_not_overflow() {
        let events = vec![ScriptedEvent::Drag { frame: 5, from: (0.0, 0.0), to: (10.0, 0.0), steps: u64::MAX }];
        assert_eq!(
            pointer_actions(&events, 5),
            vec![PointerAction::Move(Vec2::ZERO), PointerAction::Press]
        );
        let mid = pointer_actions(&events, 6);
        assert_eq!(mid.len(), 1);
        assert!(matches!(mid[0], PointerAction::Move(_)));
        assert!(pointer_actions(&events, u64::MAX).contains(&PointerAction::Release));
    }

    #[test]
    fn scripted_click_creates_ripple_on_next_tick() {
        let mut session = Session::new(small_config(vec![ScriptedEvent::Click { frame: 0, x: 80.0, y: 45.0 }]));
        let stats = session.step();
        assert_eq!(stats.frame, 0);
        assert_eq!(stats.ripples_added, 1);
        assert_eq!(stats.active_ripples, 1);
        let ripple = session.driver().registry().iter().next().copied().unwrap();
        assert!((ripple.age - session.config().frame_delta).abs() < 1e-6);
        assert_eq!(ripple.strength, 5.0);
    }

    #[test]
    fn clicks_on_chrome_do_nothing() {
        let mut session = Session::new(small_config(vec![ScriptedEvent::Click { frame: 0, x: 5.0, y: 5.0 }]));
        let stats = session.step();
        assert_eq!(stats.ripples_added, 0);
        assert_eq!(stats.active_ripples, 0);
    }

    #[test]
    fn ui_events_reach_the_driver() {
        let mut session = Session::new(small_config(vec![
            ScriptedEvent::Strength { frame: 0, value: 17 },
            ScriptedEvent::BaseColor { frame: 1, color: "#ff0000".to_string() },
            ScriptedEvent::Click { frame: 2, x: 80.0, y: 45.0 },
            ScriptedEvent::Reset { frame: 4 },
        ]));
        session.step();
        assert_eq!(session.driver().strength(), 17);
        session.step();
        assert_eq!(session.driver().color_transition().to(), Vec3::new(1.0, 0.0, 0.0));
        session.step();
        assert_eq!(session.driver().registry().iter().next().unwrap().strength, 17.0);
        session.step();
        session.step();
        assert!(session.driver().registry().is_empty());
        assert_eq!(session.driver().strength(), 5);
    }

    #[test]
    fn ripples_lift_points_and_render() {
        let mut session = Session::new(small_config(vec![ScriptedEvent::Click { frame: 0, x: 80.0, y: 45.0 }]));
        let mut peak: f32 = 0.0;
        for _ in 0..30 {
            peak = peak.max(session.step().peak_ripple);
        }
        assert!(peak > 0.1, "peak {peak}");

        let img = session.render();
        assert_eq!(img.dimensions(), (160, 90));
        assert!(img.pixels().any(|p| p.0 != [0, 0, 0]));
    }
}
