//! wgpu render backend for the ferris wheel.
//!
//! Draws every item of a [`ferris_render::Frame`] with one lit pipeline,
//! instanced per primitive mesh. The shader reproduces the classic
//! fixed-function lighting model: global ambient, one directional and one
//! point light, Blinn-Phong specular, two-sided surfaces.
//!
//! # Invariants
//! - Renderer never mutates simulation state.
//! - The animation clock is separate from the render frame rate.

mod context;
mod gpu;
mod mesh;
mod shaders;

pub use context::{GpuContext, GpuError};
pub use gpu::WgpuRenderer;
pub use mesh::{Mesh, Vertex};
