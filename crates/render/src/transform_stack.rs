use glam::{Mat4, Vec3};

/// Errors from transform stack operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StackError {
    #[error("cannot pop the root transform")]
    Underflow,
}

/// Save/restore stack of local-to-world matrices used while walking the scene.
///
/// Every mutation post-multiplies the top matrix, so operations read in the
/// order they are applied to a model: the last call acts on the vertices first.
/// The stack is never empty; the bottom entry is the root transform.
#[derive(Debug, Clone)]
pub struct TransformStack {
    stack: Vec<Mat4>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    /// A stack holding only the identity.
    pub fn new() -> Self {
        Self::with_root(Mat4::IDENTITY)
    }

    pub fn with_root(root: Mat4) -> Self {
        Self { stack: vec![root] }
    }

    /// The current local-to-world matrix.
    pub fn current(&self) -> Mat4 {
        // pop refuses to remove the root
        self.stack.last().copied().unwrap_or(Mat4::IDENTITY)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Save a copy of the current matrix.
    pub fn push(&mut self) {
        self.stack.push(self.current());
    }

    /// Restore the matrix saved by the matching `push`.
    pub fn pop(&mut self) -> Result<Mat4, StackError> {
        if self.stack.len() <= 1 {
            return Err(StackError::Underflow);
        }
        self.stack.pop().ok_or(StackError::Underflow)
    }

    /// Run `f` between a push and its pop.
    pub fn scoped<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let depth = self.depth();
        self.push();
        let out = f(self);
        self.stack.truncate(depth);
        out
    }

    pub fn multiply(&mut self, m: Mat4) {
        if let Some(top) = self.stack.last_mut() {
            *top *= m;
        }
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.multiply(Mat4::from_translation(offset));
    }

    /// Rotate by `degrees` around `axis` (normalized internally).
    pub fn rotate_degrees(&mut self, degrees: f32, axis: Vec3) {
        self.multiply(Mat4::from_axis_angle(axis.normalize(), degrees.to_radians()));
    }

    pub fn scale(&mut self, factors: Vec3) {
        self.multiply(Mat4::from_scale(factors));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn pop_restores_previous_matrix() {
        let mut s = TransformStack::new();
        s.translate(Vec3::X);
        let saved = s.current();
        s.push();
        s.scale(Vec3::splat(3.0));
        assert_ne!(s.current(), saved);
        s.pop().unwrap();
        assert_eq!(s.current(), saved);
    }

    #[test]
    fn root_cannot_be_popped() {
        let mut s = TransformStack::new();
        assert_eq!(s.pop(), Err(StackError::Underflow));
        assert_eq!(s.depth(), 1);
    }

    #[test]
    fn operations_compose_outer_to_inner() {
        let mut s = TransformStack::new();
        s.translate(Vec3::new(0.0, 1.0, 0.0));
        s.rotate_degrees(90.0, Vec3::Z);
        // X is rotated to Y first, then translated up.
        let p = s.current().transform_point3(Vec3::X);
        assert!(approx(p, Vec3::new(0.0, 2.0, 0.0)));
    }

    #[test]
    fn scoped_restores_even_with_unbalanced_pushes() {
        let mut s = TransformStack::new();
        s.scoped(|s| {
            s.translate(Vec3::Y);
            s.push();
            s.push();
        });
        assert_eq!(s.depth(), 1);
        assert_eq!(s.current(), Mat4::IDENTITY);
    }

    #[test]
    fn rotation_about_x_turns_z_into_negative_y() {
        let mut s = TransformStack::new();
        s.rotate_degrees(90.0, Vec3::X);
        let p = s.current().transform_point3(Vec3::Z);
        assert!(approx(p, Vec3::NEG_Y));
    }
}
