//! Rendering adapter: renderer-agnostic description of one ferris wheel frame.
//!
//! # Invariants
//! - Renderers read simulation state, never mutate it.
//! - Every draw item carries its full local-to-world matrix.
//! - Cabins keep an identity world orientation for every wheel angle.

pub mod camera;
pub mod frame;
pub mod lighting;
pub mod primitive;
mod renderer;
pub mod scene;
pub mod transform_stack;

pub use camera::{OrbitCamera, ProjectionConfig};
pub use frame::Frame;
pub use lighting::{DirectionalLight, LightRig, Material, PointLight};
pub use primitive::{DrawItem, DrawList, Part, Primitive};
pub use renderer::{DebugTextRenderer, Renderer};
pub use scene::{WheelConfig, assemble};
pub use transform_stack::{StackError, TransformStack};

pub fn crate_info() -> &'static str {
    "ferris-render v0.1.0"
}
