use ferris_input::Action;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Step sizes and initial values for the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Wall time between animation ticks.
    pub tick_interval: Duration,
    /// Degrees the wheel turns per tick while animating.
    pub angle_step: f32,
    /// Radians the camera orbits per arrow press.
    pub orbit_step: f32,
    /// Units the camera rises or sinks per arrow press.
    pub height_step: f32,
    pub initial_camera: CameraState,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(16),
            angle_step: 2.0,
            orbit_step: 0.05,
            height_step: 0.2,
            initial_camera: CameraState::default(),
        }
    }
}

/// Wheel rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimationState {
    pub animating: bool,
    /// Degrees, in `[0, 360)`.
    pub angle: f32,
}

impl AnimationState {
    /// Advance by `step` degrees if animating, wrapping into `[0, 360)`.
    pub fn advance(&mut self, step: f32) {
        if self.animating {
            self.angle = wrap_degrees(self.angle + step);
        }
    }
}

/// Which light sources are switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightingState {
    pub directional: bool,
    pub point: bool,
}

impl Default for LightingState {
    fn default() -> Self {
        Self {
            directional: true,
            point: true,
        }
    }
}

/// Orbit camera parameters. The camera always looks at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    /// Horizontal distance from the vertical axis.
    pub radius: f32,
    /// Rotation around the vertical axis, radians.
    pub azimuth: f32,
    /// Eye height above the origin.
    pub height: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            radius: 5.0,
            azimuth: 0.0,
            height: 3.0,
        }
    }
}

impl CameraState {
    /// Eye position: `(r·cos a, h, r·sin a)`.
    pub fn eye(&self) -> [f32; 3] {
        [
            self.radius * self.azimuth.cos(),
            self.height,
            self.radius * self.azimuth.sin(),
        ]
    }
}

/// Everything the render pass reads and the input handlers write.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimState {
    pub animation: AnimationState,
    pub lighting: LightingState,
    pub camera: CameraState,
    #[serde(skip)]
    config: SimConfig,
}

impl PartialEq for SimState {
    fn eq(&self, other: &Self) -> bool {
        self.animation == other.animation
            && self.lighting == other.lighting
            && self.camera == other.camera
    }
}

impl SimState {
    /// Initial state with default step sizes.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SimConfig) -> Self {
        Self {
            camera: config.initial_camera,
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Apply one input action. Returns true when the scene needs a redraw.
    ///
    /// Shell actions (HUD, quit) are ignored here and return false.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::ToggleAnimation => {
                self.animation.animating = !self.animation.animating;
                tracing::info!("animation {}", on_off(self.animation.animating));
            }
            Action::ToggleDirectionalLight => {
                self.lighting.directional = !self.lighting.directional;
                tracing::info!("directional light {}", on_off(self.lighting.directional));
            }
            Action::TogglePointLight => {
                self.lighting.point = !self.lighting.point;
                tracing::info!("point light {}", on_off(self.lighting.point));
            }
            Action::OrbitLeft => self.camera.azimuth -= self.config.orbit_step,
            Action::OrbitRight => self.camera.azimuth += self.config.orbit_step,
            Action::RaiseCamera => self.camera.height += self.config.height_step,
            Action::LowerCamera => self.camera.height -= self.config.height_step,
            Action::ToggleHud | Action::Quit => return false,
        }
        tracing::debug!(?action, camera = ?self.camera, "applied action");
        true
    }

    /// One animation clock tick.
    pub fn tick(&mut self) {
        self.animation.advance(self.config.angle_step);
    }

    /// Run `n` ticks back to back.
    pub fn run_ticks(&mut self, n: u32) {
        for _ in 0..n {
            self.tick();
        }
    }
}

/// Wrap degrees into `[0, 360)`.
pub fn wrap_degrees(deg: f32) -> f32 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
