//! Adapter implementations for task ports.

pub mod file;
pub mod gemini;
pub mod memory;
