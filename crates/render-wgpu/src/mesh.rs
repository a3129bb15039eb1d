use bytemuck::{Pod, Zeroable};
use ferris_render::Primitive;
use glam::Vec3;
use std::f32::consts::TAU;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

/// CPU-side indexed triangle mesh. Triangles wind counter-clockwise when
/// seen from the side their normals point to.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

/// Tessellation of the unit cylinder, matching a GLU quadric.
pub const CYLINDER_SLICES: u16 = 20;
pub const CYLINDER_STACKS: u16 = 20;

impl Mesh {
    /// Mesh for a unit primitive (see [`Primitive`] for the exact shapes).
    pub fn for_primitive(primitive: Primitive) -> Self {
        match primitive {
            Primitive::Cube => Self::cube(),
            Primitive::Cylinder => Self::cylinder(CYLINDER_SLICES, CYLINDER_STACKS),
            Primitive::Quad => Self::quad(),
        }
    }

    /// Unit cube centered on the origin, one flat-shaded quad per face.
    pub fn cube() -> Self {
        // (normal, u, v) with u x v == normal
        let faces = [
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        ];
        let mut mesh = Self::default();
        for (normal, u, v) in faces {
            mesh.push_face(normal * 0.5, normal, u * 0.5, v * 0.5);
        }
        mesh
    }

    /// 1x1 square in the XZ plane facing +Y.
    pub fn quad() -> Self {
        let mut mesh = Self::default();
        mesh.push_face(Vec3::ZERO, Vec3::Y, Vec3::X * 0.5, Vec3::NEG_Z * 0.5);
        mesh
    }

    /// Open tube of radius 1 along +Z from z=0 to z=1, without caps.
    pub fn cylinder(slices: u16, stacks: u16) -> Self {
        let slices = slices.max(3);
        let stacks = stacks.max(1);
        let mut mesh = Self::default();

        for j in 0..=stacks {
            let z = f32::from(j) / f32::from(stacks);
            for i in 0..=slices {
                let theta = TAU * f32::from(i) / f32::from(slices);
                let radial = Vec3::new(theta.cos(), theta.sin(), 0.0);
                mesh.vertices
                    .push(Vertex::new(radial + Vec3::new(0.0, 0.0, z), radial));
            }
        }

        let row = slices + 1;
        for j in 0..stacks {
            for i in 0..slices {
                let a = j * row + i;
                let b = a + 1;
                let c = b + row;
                let d = a + row;
                mesh.indices.extend_from_slice(&[a, b, c, c, d, a]);
            }
        }
        mesh
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    fn push_face(&mut self, center: Vec3, normal: Vec3, u: Vec3, v: Vec3) {
        let base = self.vertices.len() as u16;
        for corner in [center - u - v, center + u - v, center + u + v, center - u + v] {
            self.vertices.push(Vertex::new(corner, normal));
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
}
