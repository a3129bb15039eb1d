use crate::camera::{OrbitCamera, ProjectionConfig};
use crate::lighting::LightRig;
use crate::primitive::DrawList;
use crate::scene::{self, WheelConfig};
use ferris_common::{Color, palette};
use ferris_sim::SimState;

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone)]
pub struct Frame {
    pub camera: OrbitCamera,
    pub lights: LightRig,
    pub draws: DrawList,
    pub clear_color: Color,
}

impl Frame {
    /// Derive a frame from the current simulation state.
    ///
    /// The light rig is rebuilt from the toggles on every call.
    pub fn compose(state: &SimState, wheel: &WheelConfig, projection: ProjectionConfig) -> Self {
        Self {
            camera: OrbitCamera::new(state.camera, projection),
            lights: LightRig::from_state(&state.lighting),
            draws: scene::assemble(state.animation.angle, wheel),
            clear_color: palette::BACKGROUND,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Part;
    use ferris_input::Action;

    #[test]
    fn frame_tracks_simulation_state() {
        let mut state = SimState::new();
        state.apply(Action::TogglePointLight);
        state.apply(Action::RaiseCamera);

        let frame = Frame::compose(&state, &WheelConfig::default(), ProjectionConfig::default());
        assert!(frame.lights.sun.is_some());
        assert!(frame.lights.lamp.is_none());
        assert!((frame.camera.eye().y - 3.2).abs() < 1e-5);
        assert_eq!(frame.draws.of_part(Part::Cabin).count(), 8);
        assert_eq!(frame.clear_color, palette::BACKGROUND);
    }
}
