//! Light sources and material, plus a CPU evaluation of the lighting
//! equation the GPU shader implements.
//!
//! Ambient and diffuse reflectance follow each draw item's color; specular
//! reflectance and shininess come from the shared [`Material`].

use ferris_common::Color;
use ferris_sim::LightingState;
use glam::Vec3;

/// Sun-like light at infinity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector pointing from the scene toward the light.
    pub direction: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::ONE.normalize(),
            diffuse: Vec3::new(1.0, 0.9, 0.7),
            specular: Vec3::ONE,
        }
    }
}

/// Lamp at a world position, without attenuation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, -2.0, 0.0),
            diffuse: Vec3::ONE,
            specular: Vec3::ONE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub specular: Vec3,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            specular: Vec3::ONE,
            shininess: 50.0,
        }
    }
}

/// Lights active for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightRig {
    pub ambient: Vec3,
    pub sun: Option<DirectionalLight>,
    pub lamp: Option<PointLight>,
    pub material: Material,
}

impl Default for LightRig {
    fn default() -> Self {
        Self::from_state(&LightingState::default())
    }
}

impl LightRig {
    /// Rig with the default sources, each present only if switched on.
    pub fn from_state(state: &LightingState) -> Self {
        Self {
            ambient: Vec3::splat(0.2),
            sun: state.directional.then(DirectionalLight::default),
            lamp: state.point.then(PointLight::default),
            material: Material::default(),
        }
    }

    /// Lit color of a surface point, clamped to `[0, 1]`.
    ///
    /// `normal` must be unit length; `eye` is the camera position.
    pub fn illuminate(&self, position: Vec3, normal: Vec3, eye: Vec3, color: Color) -> Vec3 {
        let base = color.to_vec3();
        let view = (eye - position).normalize_or_zero();
        let mut lit = self.ambient * base;

        if let Some(sun) = &self.sun {
            lit += self.contribution(sun.direction, sun.diffuse, sun.specular, normal, view, base);
        }
        if let Some(lamp) = &self.lamp {
            let to_light = (lamp.position - position).normalize_or_zero();
            lit += self.contribution(to_light, lamp.diffuse, lamp.specular, normal, view, base);
        }

        lit.clamp(Vec3::ZERO, Vec3::ONE)
    }

    fn contribution(
        &self,
        to_light: Vec3,
        diffuse: Vec3,
        specular: Vec3,
        normal: Vec3,
        view: Vec3,
        base: Vec3,
    ) -> Vec3 {
        let n_dot_l = normal.dot(to_light);
        if n_dot_l <= 0.0 {
            return Vec3::ZERO;
        }
        let half = (to_light + view).normalize_or_zero();
        let spec = normal.dot(half).max(0.0).powf(self.material.shininess);
        diffuse * base * n_dot_l + specular * self.material.specular * spec
    }

    pub fn active_count(&self) -> usize {
        usize::from(self.sun.is_some()) + usize::from(self.lamp.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREY: Color = Color::rgb(0.5, 0.5, 0.5);

    fn rig(directional: bool, point: bool) -> LightRig {
        LightRig::from_state(&LightingState { directional, point })
    }

    #[test]
    fn toggles_control_sources() {
        assert_eq!(rig(true, true).active_count(), 2);
        let sun_only = rig(true, false);
        assert!(sun_only.sun.is_some() && sun_only.lamp.is_none());
        let lamp_only = rig(false, true);
        assert!(lamp_only.sun.is_none() && lamp_only.lamp.is_some());
        assert_eq!(rig(false, false).active_count(), 0);
    }

    #[test]
    fn unlit_scene_is_ambient_only() {
        let c = rig(false, false).illuminate(Vec3::ZERO, Vec3::Y, Vec3::new(0.0, 5.0, 5.0), GREY);
        assert!((c - Vec3::splat(0.1)).length() < 1e-6);
    }

    #[test]
    fn disabling_sun_removes_only_its_contribution() {
        // top face: lit by the sun, facing away from the lamp below
        let p = Vec3::new(0.0, 1.0, 0.0);
        let eye = Vec3::new(5.0, 3.0, 0.0);
        let both = rig(true, true).illuminate(p, Vec3::Y, eye, GREY);
        let lamp_only = rig(false, true).illuminate(p, Vec3::Y, eye, GREY);
        let none = rig(false, false).illuminate(p, Vec3::Y, eye, GREY);
        assert!(both.x > lamp_only.x);
        assert!((lamp_only - none).length() < 1e-6);
    }

    #[test]
    fn disabling_lamp_removes_only_its_contribution() {
        // bottom face: lit by the lamp at y=-2, facing away from the sun
        let p = Vec3::new(0.0, -1.0, 0.0);
        let eye = Vec3::new(5.0, -3.0, 0.0);
        let both = rig(true, true).illuminate(p, Vec3::NEG_Y, eye, GREY);
        let sun_only = rig(true, false).illuminate(p, Vec3::NEG_Y, eye, GREY);
        let none = rig(false, false).illuminate(p, Vec3::NEG_Y, eye, GREY);
        assert!(both.y > sun_only.y);
        assert!((sun_only - none).length() < 1e-6);
    }

    #[test]
    fn sun_is_warm() {
        let c = rig(true, false).illuminate(
            Vec3::ZERO,
            Vec3::ONE.normalize(),
            Vec3::new(0.0, 0.0, 10.0),
            GREY,
        );
        assert!(c.x > c.z);
    }

    #[test]
    fn output_is_clamped() {
        let c = rig(true, true).illuminate(
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::ONE.normalize(),
            Vec3::ONE * 4.0,
            Color::WHITE,
        );
        assert!(c.max_element() <= 1.0 && c.min_element() >= 0.0);
    }
}
