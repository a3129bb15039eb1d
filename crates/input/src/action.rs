/// A high-level action produced from keyboard input.
///
/// Simulation actions are applied by `ferris_sim::SimState::apply`; the
/// remaining ones are handled by the application shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Start or pause the wheel rotation.
    ToggleAnimation,
    /// Switch the directional "sun" light on or off.
    ToggleDirectionalLight,
    /// Switch the positional "lamp" light on or off.
    TogglePointLight,
    /// Orbit the camera clockwise when seen from above.
    OrbitLeft,
    /// Orbit the camera counter-clockwise when seen from above.
    OrbitRight,
    /// Move the camera up.
    RaiseCamera,
    /// Move the camera down.
    LowerCamera,
    /// Show or hide the HUD overlay.
    ToggleHud,
    /// Close the application.
    Quit,
}

impl Action {
    /// Whether this action changes simulation state rather than the shell.
    pub fn is_simulation(self) -> bool {
        !matches!(self, Self::ToggleHud | Self::Quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_actions_are_not_simulation() {
        assert!(!Action::ToggleHud.is_simulation());
        assert!(!Action::Quit.is_simulation());
    }

    #[test]
    fn scene_actions_are_simulation() {
        for action in [
            Action::ToggleAnimation,
            Action::ToggleDirectionalLight,
            Action::TogglePointLight,
            Action::OrbitLeft,
            Action::OrbitRight,
            Action::RaiseCamera,
            Action::LowerCamera,
        ] {
            assert!(action.is_simulation(), "{action:?}");
        }
    }
}
