use ferris_common::Color;
use glam::{Mat4, Vec3};

/// Unit shapes every draw item is built from.
///
/// Sizes come entirely from the item's model matrix:
/// - `Cube`: edge length 1, centered on the origin.
/// - `Cylinder`: open tube of radius 1 running along +Z from z=0 to z=1.
/// - `Quad`: 1x1 square in the XZ plane, centered, facing +Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    Cube,
    Cylinder,
    Quad,
}

impl Primitive {
    pub const ALL: [Primitive; 3] = [Primitive::Cube, Primitive::Cylinder, Primitive::Quad];

    pub fn name(self) -> &'static str {
        match self {
            Self::Cube => "cube",
            Self::Cylinder => "cylinder",
            Self::Quad => "quad",
        }
    }
}

/// Which part of the ride an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Ground,
    Base,
    Support,
    Ring,
    Spoke,
    Cabin,
}

/// One primitive placed in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub part: Part,
    pub primitive: Primitive,
    /// Local-to-world matrix.
    pub model: Mat4,
    pub color: Color,
}

impl DrawItem {
    /// World-space position of the primitive's local origin.
    pub fn origin(&self) -> Vec3 {
        self.model.w_axis.truncate()
    }

    /// Matrix for transforming normals: inverse-transpose of the model's 3x3.
    pub fn normal_matrix(&self) -> glam::Mat3 {
        glam::Mat3::from_mat4(self.model).inverse().transpose()
    }
}

/// Draw items in submission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    items: Vec<DrawItem>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, part: Part, primitive: Primitive, model: Mat4, color: Color) {
        self.items.push(DrawItem {
            part,
            primitive,
            model,
            color,
        });
    }

    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn of_part(&self, part: Part) -> impl Iterator<Item = &DrawItem> {
        self.items.iter().filter(move |i| i.part == part)
    }

    pub fn of_primitive(&self, primitive: Primitive) -> impl Iterator<Item = &DrawItem> {
        self.items.iter().filter(move |i| i.primitive == primitive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_translation_column() {
        let item = DrawItem {
            part: Part::Base,
            primitive: Primitive::Cube,
            model: Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)),
            color: Color::WHITE,
        };
        assert_eq!(item.origin(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn normal_matrix_undoes_nonuniform_scale() {
        let item = DrawItem {
            part: Part::Base,
            primitive: Primitive::Cube,
            model: Mat4::from_scale(Vec3::new(2.0, 0.5, 1.0)),
            color: Color::WHITE,
        };
        let n = item.normal_matrix() * Vec3::Y;
        assert!((n.normalize() - Vec3::Y).length() < 1e-6);
        assert!((n.y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn filters_by_part_and_primitive() {
        let mut list = DrawList::new();
        list.push(Part::Ground, Primitive::Quad, Mat4::IDENTITY, Color::WHITE);
        list.push(Part::Cabin, Primitive::Cube, Mat4::IDENTITY, Color::WHITE);
        list.push(Part::Base, Primitive::Cube, Mat4::IDENTITY, Color::WHITE);
        assert_eq!(list.len(), 3);
        assert_eq!(list.of_part(Part::Cabin).count(), 1);
        assert_eq!(list.of_primitive(Primitive::Cube).count(), 2);
    }
}
