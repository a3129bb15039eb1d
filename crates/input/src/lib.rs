//! Input mapping: platform-agnostic keys translated into scene actions.
//!
//! # Invariants
//! - The simulation consumes actions, never raw key events.
//! - Character bindings are case-sensitive.

pub mod action;
pub mod keymap;

pub use action::Action;
pub use keymap::{Key, KeyMap};

pub fn crate_info() -> &'static str {
    "ferris-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
