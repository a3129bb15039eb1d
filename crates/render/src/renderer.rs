use crate::frame::Frame;
use crate::primitive::Part;
use std::fmt::Write as _;

/// Renderer-agnostic interface for backends that turn a frame into output
/// without a device context.
///
/// A renderer reads the frame and never feeds anything back into the
/// simulation.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, frame: &Frame) -> Self::Output;
}

/// Human-readable dump of a frame: camera, lights and every draw item.
///
/// Used by the CLI and in tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Also print the lit color of each item's origin as seen from the eye.
    pub shade: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shading() -> Self {
        Self { shade: true }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &Frame) -> String {
        let mut out = String::new();
        let eye = frame.camera.eye();
        let p = &frame.camera.projection;

        // writing into a String cannot fail
        let _ = writeln!(out, "=== Frame ({} items) ===", frame.draws.len());
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) target=(0.00, 0.00, 0.00) fov={:.0} near={:.1} far={:.1}",
            eye.x, eye.y, eye.z, p.fov_degrees, p.near, p.far
        );
        let _ = writeln!(
            out,
            "Lights: sun={} lamp={}",
            on_off(frame.lights.sun.is_some()),
            on_off(frame.lights.lamp.is_some())
        );

        for item in frame.draws.items() {
            let o = item.origin();
            let _ = write!(
                out,
                "  {:<8} {:<8} at=({:.2}, {:.2}, {:.2}) color=({:.2}, {:.2}, {:.2})",
                part_name(item.part),
                item.primitive.name(),
                o.x,
                o.y,
                o.z,
                item.color.r,
                item.color.g,
                item.color.b
            );
            if self.shade {
                let normal = (eye - o).normalize_or_zero();
                let lit = frame.lights.illuminate(o, normal, eye, item.color);
                let _ = write!(out, " lit=({:.2}, {:.2}, {:.2})", lit.x, lit.y, lit.z);
            }
            out.push('\n');
        }

        out
    }
}

fn part_name(part: Part) -> &'static str {
    match part {
        Part::Ground => "ground",
        Part::Base => "base",
        Part::Support => "support",
        Part::Ring => "ring",
        Part::Spoke => "spoke",
        Part::Cabin => "cabin",
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
