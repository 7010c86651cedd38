use levelgen::{LevelGenerator, Phase, XY};
use macroquad::prelude::KeyCode;

use crate::camera::Camera;
use crate::format_fingerprint;

pub const MAX_STEPS_PER_FRAME: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewerMode {
    Paused,
    #[default]
    AutoPlay,
    Finished(Phase),
}

/// Presentation state driven by one `tick` per rendered frame. Generation
/// only ever advances through `LevelGenerator::step`.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerState {
    pub mode: ViewerMode,
    pub camera: Camera,
    pub auto_scale: bool,
    pub show_labels: bool,
    pub show_arrows: bool,
    pub steps_per_frame: usize,
    /// Log line of the most recent executor step.
    pub last_log: String,
    /// Set for one frame when the user asks for a fresh seed.
    pub restart_requested: bool,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            mode: ViewerMode::default(),
            camera: Camera::default(),
            auto_scale: true,
            show_labels: false,
            show_arrows: false,
            steps_per_frame: 1,
            last_log: String::new(),
            restart_requested: false,
        }
    }
}

impl ViewerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies this frame's key presses, advances generation as the mode
    /// allows, and refits the camera when auto-scaling. `range` is the
    /// shorter window side in pixels.
    pub fn tick(&mut self, generator: &mut LevelGenerator, keys_pressed: &[KeyCode], range: f64) {
        self.restart_requested = keys_pressed.contains(&KeyCode::R);
        self.handle_view_keys(keys_pressed, range);

        match self.mode {
            ViewerMode::Paused => {
                if keys_pressed.contains(&KeyCode::Space) {
                    self.mode = ViewerMode::AutoPlay;
                } else if keys_pressed.contains(&KeyCode::Right) {
                    self.advance(generator, 1);
                }
            }
            ViewerMode::AutoPlay => {
                if keys_pressed.contains(&KeyCode::Space) {
                    self.mode = ViewerMode::Paused;
                } else {
                    self.advance(generator, self.steps_per_frame);
                }
            }
            ViewerMode::Finished(_) => {}
        }

        if self.auto_scale
            && let Some(camera) = Camera::fit(&generator.graph().bounds(), range)
        {
            self.camera = camera;
        }
    }

    fn advance(&mut self, generator: &mut LevelGenerator, steps: usize) {
        for _ in 0..steps {
            let report = generator.step();
            self.last_log = report.log;
            if report.complete {
                self.mode = ViewerMode::Finished(generator.phase());
                return;
            }
        }
    }

    fn handle_view_keys(&mut self, keys_pressed: &[KeyCode], range: f64) {
        for key in keys_pressed {
            match key {
                KeyCode::A => self.auto_scale = !self.auto_scale,
                KeyCode::L => self.show_labels = !self.show_labels,
                KeyCode::Period => self.show_arrows = !self.show_arrows,
                KeyCode::Up => {
                    self.steps_per_frame = (self.steps_per_frame * 2).min(MAX_STEPS_PER_FRAME);
                }
                KeyCode::Down => self.steps_per_frame = (self.steps_per_frame / 2).max(1),
                KeyCode::Equal => self.manual_view().zoom_in(),
                KeyCode::Minus => self.manual_view().zoom_out(),
                KeyCode::Z => self.manual_view().pan(XY::new(-1.0, 0.0), range),
                KeyCode::X => self.manual_view().pan(XY::new(1.0, 0.0), range),
                KeyCode::Apostrophe => self.manual_view().pan(XY::new(0.0, -1.0), range),
                KeyCode::Slash => self.manual_view().pan(XY::new(0.0, 1.0), range),
                _ => {}
            }
        }
    }

    /// Manual zoom and pan take the camera away from auto-scaling.
    fn manual_view(&mut self) -> &mut Camera {
        self.auto_scale = false;
        &mut self.camera
    }

    pub fn status_text(&self) -> String {
        match self.mode {
            ViewerMode::Paused => "PAUSED [Space] play [Right] step".to_string(),
            ViewerMode::AutoPlay => {
                format!("RUNNING x{} [Space] pause [Up/Down] speed", self.steps_per_frame)
            }
            ViewerMode::Finished(Phase::Succeeded) => "SUCCEEDED [R] new seed".to_string(),
            ViewerMode::Finished(_) => "FAILED [R] new seed".to_string(),
        }
    }
}

/// One-line summary of the generator under view.
pub fn generator_summary(generator: &LevelGenerator) -> String {
    let graph = generator.graph();
    format!(
        "seed {} | steps {} | depth {} | nodes {} | edges {} | fingerprint {}",
        generator.config().seed,
        generator.steps_taken(),
        generator.depth(),
        graph.num_nodes(),
        graph.num_edges(),
        format_fingerprint(graph.fingerprint()),
    )
}
