//! Scene assembly: walks the ride hierarchy with a [`TransformStack`] and
//! emits one [`DrawItem`](crate::DrawItem) per primitive.
//!
//! Draw order: ground, base, supports, then the wheel assembly (ring,
//! spokes, cabins). The wheel assembly is rotated about Z by the animation
//! angle; each cabin applies the opposite rotation after being moved to its
//! slot on the ring, which leaves it level for any wheel angle.

use crate::primitive::{DrawList, Part, Primitive};
use crate::transform_stack::TransformStack;
use ferris_common::palette;
use glam::{Mat4, Vec3};

/// Dimensions of the ride and its surroundings.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelConfig {
    /// Height of the ground plane.
    pub ground_level: f32,
    /// Half the side length of the square ground.
    pub ground_half_extent: f32,
    /// Scale applied to the unit cube forming the base block.
    pub base_size: Vec3,
    /// X offset of each support from the center.
    pub support_offset: f32,
    /// Y of the top end of the supports.
    pub support_top: f32,
    pub support_radius: f32,
    pub support_length: f32,
    pub ring_outer_radius: f32,
    pub ring_inner_radius: f32,
    pub ring_depth: f32,
    pub spoke_count: u32,
    pub spoke_radius: f32,
    pub cabin_count: u32,
    /// Distance of cabin centers from the hub.
    pub cabin_orbit: f32,
    pub cabin_size: f32,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            ground_level: -1.2,
            ground_half_extent: 5.0,
            base_size: Vec3::new(2.0, 0.2, 1.0),
            support_offset: 0.5,
            support_top: -0.7,
            support_radius: 0.03,
            support_length: 0.5,
            ring_outer_radius: 0.9,
            ring_inner_radius: 0.75,
            ring_depth: 0.1,
            spoke_count: 8,
            spoke_radius: 0.03,
            cabin_count: 8,
            cabin_orbit: 0.8,
            cabin_size: 0.1,
        }
    }
}

impl WheelConfig {
    /// Angle between neighbouring cabins, degrees.
    pub fn cabin_spacing(&self) -> f32 {
        360.0 / self.cabin_count.max(1) as f32
    }

    pub fn spoke_spacing(&self) -> f32 {
        360.0 / self.spoke_count.max(1) as f32
    }

    /// Cabin slot on the ring, in wheel-local coordinates.
    pub fn cabin_slot(&self, index: u32) -> Vec3 {
        let theta = (index as f32 * self.cabin_spacing()).to_radians();
        Vec3::new(
            self.cabin_orbit * theta.cos(),
            self.cabin_orbit * theta.sin(),
            0.0,
        )
    }
}

/// Compose the full scene for a wheel angle in degrees.
pub fn assemble(angle: f32, config: &WheelConfig) -> DrawList {
    let mut list = DrawList::new();
    let mut stack = TransformStack::new();

    ground(&mut stack, config, &mut list);
    base(&mut stack, config, &mut list);
    supports(&mut stack, config, &mut list);

    stack.scoped(|s| {
        s.rotate_degrees(angle, Vec3::Z);
        wheel(s, angle, config, &mut list);
    });

    tracing::trace!(angle, items = list.len(), "scene assembled");
    list
}

fn ground(stack: &mut TransformStack, config: &WheelConfig, list: &mut DrawList) {
    stack.scoped(|s| {
        s.translate(Vec3::new(0.0, config.ground_level, 0.0));
        let side = config.ground_half_extent * 2.0;
        s.scale(Vec3::new(side, 1.0, side));
        list.push(Part::Ground, Primitive::Quad, s.current(), palette::GROUND);
    });
}

fn base(stack: &mut TransformStack, config: &WheelConfig, list: &mut DrawList) {
    stack.scoped(|s| {
        s.translate(Vec3::new(0.0, config.ground_level, 0.0));
        s.scale(config.base_size);
        list.push(Part::Base, Primitive::Cube, s.current(), palette::BASE);
    });
}

fn supports(stack: &mut TransformStack, config: &WheelConfig, list: &mut DrawList) {
    for x in [-config.support_offset, config.support_offset] {
        stack.scoped(|s| {
            s.translate(Vec3::new(x, config.support_top, 0.0));
            // stand the tube up: +Z becomes -Y
            s.rotate_degrees(90.0, Vec3::X);
            list.push(
                Part::Support,
                Primitive::Cylinder,
                cylinder(s.current(), config.support_radius, config.support_length),
                palette::SUPPORT,
            );
        });
    }
}

/// Ring, spokes and cabins, in wheel-local space.
fn wheel(stack: &mut TransformStack, angle: f32, config: &WheelConfig, list: &mut DrawList) {
    for radius in [config.ring_outer_radius, config.ring_inner_radius] {
        stack.scoped(|s| {
            s.translate(Vec3::new(0.0, 0.0, -config.ring_depth / 2.0));
            list.push(
                Part::Ring,
                Primitive::Cylinder,
                cylinder(s.current(), radius, config.ring_depth),
                palette::RING,
            );
        });
    }

    // each spoke spans the full diameter, from +orbit down to -orbit
    for i in 0..config.spoke_count {
        stack.scoped(|s| {
            s.rotate_degrees(i as f32 * config.spoke_spacing(), Vec3::Z);
            s.translate(Vec3::new(0.0, config.cabin_orbit, 0.0));
            s.rotate_degrees(90.0, Vec3::X);
            list.push(
                Part::Spoke,
                Primitive::Cylinder,
                cylinder(s.current(), config.spoke_radius, config.cabin_orbit * 2.0),
                palette::SPOKE,
            );
        });
    }

    for i in 0..config.cabin_count {
        stack.scoped(|s| {
            s.translate(config.cabin_slot(i));
            // cancel the wheel rotation so the cabin hangs level
            s.rotate_degrees(-angle, Vec3::Z);
            s.scale(Vec3::splat(config.cabin_size));
            list.push(Part::Cabin, Primitive::Cube, s.current(), palette::CABIN);
        });
    }
}

/// Model matrix for the unit cylinder resized to `radius` and `length`.
fn cylinder(parent: Mat4, radius: f32, length: f32) -> Mat4 {
    parent * Mat4::from_scale(Vec3::new(radius, radius, length))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat3;

    const EPS: f32 = 1e-5;

    fn approx_vec(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    fn approx_mat3(a: Mat3, b: Mat3) -> bool {
        a.to_cols_array()
            .iter()
            .zip(b.to_cols_array())
            .all(|(x, y)| (x - y).abs() < EPS)
    }

    #[test]
    fn part_counts_and_order() {
        let list = assemble(0.0, &WheelConfig::default());
        let parts: Vec<Part> = list.items().iter().map(|i| i.part).collect();
        assert_eq!(list.len(), 1 + 1 + 2 + 2 + 8 + 8);
        assert_eq!(&parts[..4], &[Part::Ground, Part::Base, Part::Support, Part::Support]);
        assert_eq!(&parts[4..6], &[Part::Ring, Part::Ring]);
        assert!(parts[6..14].iter().all(|p| *p == Part::Spoke));
        assert!(parts[14..].iter().all(|p| *p == Part::Cabin));
    }

    #[test]
    fn ground_spans_ten_units_at_floor_level() {
        let list = assemble(0.0, &WheelConfig::default());
        let ground = list.items()[0];
        let corner = ground.model.transform_point3(Vec3::new(0.5, 0.0, 0.5));
        assert!(approx_vec(corner, Vec3::new(5.0, -1.2, 5.0)));
    }

    #[test]
    fn supports_hang_down_to_the_base() {
        let list = assemble(0.0, &WheelConfig::default());
        for support in list.of_part(Part::Support) {
            let top = support.model.transform_point3(Vec3::ZERO);
            let bottom = support.model.transform_point3(Vec3::Z);
            assert!((top.y + 0.7).abs() < EPS);
            assert!((bottom.y + 1.2).abs() < EPS);
            assert!((top.x.abs() - 0.5).abs() < EPS);
        }
    }

    #[test]
    fn static_parts_ignore_wheel_angle() {
        let config = WheelConfig::default();
        let a = assemble(0.0, &config);
        let b = assemble(123.0, &config);
        for part in [Part::Ground, Part::Base, Part::Support] {
            let xs: Vec<_> = a.of_part(part).map(|i| i.model).collect();
            let ys: Vec<_> = b.of_part(part).map(|i| i.model).collect();
            assert_eq!(xs, ys);
        }
    }

    #[test]
    fn ring_is_centered_on_the_hub() {
        let list = assemble(30.0, &WheelConfig::default());
        let radii: Vec<f32> = list
            .of_part(Part::Ring)
            .map(|r| r.model.transform_point3(Vec3::X).truncate().length())
            .collect();
        assert!((radii[0] - 0.9).abs() < 1e-4);
        assert!((radii[1] - 0.75).abs() < 1e-4);
        for ring in list.of_part(Part::Ring) {
            let front = ring.model.transform_point3(Vec3::ZERO);
            let back = ring.model.transform_point3(Vec3::Z);
            assert!((front.z + 0.05).abs() < EPS);
            assert!((back.z - 0.05).abs() < EPS);
        }
    }

    #[test]
    fn spokes_are_diameters_at_45_degree_steps() {
        let list = assemble(0.0, &WheelConfig::default());
        for (i, spoke) in list.of_part(Part::Spoke).enumerate() {
            let start = spoke.model.transform_point3(Vec3::ZERO);
            let end = spoke.model.transform_point3(Vec3::Z);
            assert!(approx_vec(start, -end), "spoke {i} not through the hub");
            let theta = (i as f32 * 45.0).to_radians();
            // rotated +Y axis
            let expected = Vec3::new(-0.8 * theta.sin(), 0.8 * theta.cos(), 0.0);
            assert!(approx_vec(start, expected), "spoke {i}: {start:?}");
        }
    }

    #[test]
    fn cabins_are_spaced_45_degrees_apart() {
        let config = WheelConfig::default();
        assert_eq!(config.cabin_spacing(), 45.0);
        for angle in [0.0, 17.0, 200.0] {
            let list = assemble(angle, &config);
            let origins: Vec<Vec3> = list.of_part(Part::Cabin).map(|c| c.origin()).collect();
            assert_eq!(origins.len(), 8);
            for (i, o) in origins.iter().enumerate() {
                assert!((o.length() - 0.8).abs() < 1e-4);
                let expected = (angle + i as f32 * 45.0).to_radians();
                assert!(approx_vec(
                    *o,
                    Vec3::new(0.8 * expected.cos(), 0.8 * expected.sin(), 0.0)
                ));
            }
        }
    }

    #[test]
    fn cabins_stay_level_for_any_angle() {
        let config = WheelConfig::default();
        let level = Mat3::from_diagonal(Vec3::splat(config.cabin_size));
        for angle in [0.0, 1.0, 45.0, 90.0, 179.5, 270.0, 359.0] {
            let list = assemble(angle, &config);
            for cabin in list.of_part(Part::Cabin) {
                assert!(
                    approx_mat3(Mat3::from_mat4(cabin.model), level),
                    "cabin rotated at angle {angle}"
                );
            }
        }
    }

    #[test]
    fn wheel_rotation_moves_spokes() {
        let config = WheelConfig::default();
        let a = assemble(0.0, &config);
        let b = assemble(90.0, &config);
        let first_a = a.of_part(Part::Spoke).next().unwrap().origin();
        let first_b = b.of_part(Part::Spoke).next().unwrap().origin();
        assert!(approx_vec(first_a, Vec3::new(0.0, 0.8, 0.0)));
        assert!(approx_vec(first_b, Vec3::new(-0.8, 0.0, 0.0)));
    }

    #[test]
    fn counts_follow_config() {
        let config = WheelConfig {
            cabin_count: 6,
            spoke_count: 3,
            ..WheelConfig::default()
        };
        let list = assemble(0.0, &config);
        assert_eq!(list.of_part(Part::Cabin).count(), 6);
        assert_eq!(list.of_part(Part::Spoke).count(), 3);
        assert_eq!(config.cabin_spacing(), 60.0);
    }
}
