//! Step definitions for suggestion-driven task scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
