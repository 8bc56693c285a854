//! Command implementations for hcasl.

pub mod slide;

pub use slide::{SlideCommand, SlideStats};
