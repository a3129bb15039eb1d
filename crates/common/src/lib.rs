//! Shared value types used across the ferris wheel crates.

pub mod types;

pub use types::{Color, palette};
