use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Linear RGB color with opacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Opaque color from three channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, self.a)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<Vec3> for Color {
    fn from(v: Vec3) -> Self {
        Self::rgb(v.x, v.y, v.z)
    }
}

/// Colors of the individual scene parts.
pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(0.2, 0.2, 0.2);
    pub const GROUND: Color = Color::rgb(0.0, 0.5, 0.0);
    pub const BASE: Color = Color::rgb(0.6, 0.3, 0.1);
    pub const SUPPORT: Color = Color::rgb(0.8, 0.0, 0.0);
    pub const RING: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const SPOKE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const CABIN: Color = Color::rgb(1.0, 1.0, 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_is_opaque() {
        let c = Color::rgb(0.1, 0.2, 0.3);
        assert_eq!(c.a, 1.0);
        assert_eq!(c.to_array(), [0.1, 0.2, 0.3, 1.0]);
    }

    #[test]
    fn vec3_round_trip_keeps_channels() {
        let c = Color::from(Vec3::new(0.6, 0.3, 0.1));
        assert_eq!(c, palette::BASE);
        assert_eq!(c.to_vec3(), Vec3::new(0.6, 0.3, 0.1));
    }
}
