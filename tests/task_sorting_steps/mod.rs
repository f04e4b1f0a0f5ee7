//! Step definitions for task ordering scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
