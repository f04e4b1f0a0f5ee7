//! Task management for TaskAI.
//!
//! Users submit a task form, review AI-suggested subtasks, and confirm to
//! create the task. Tasks can then change status, have subtasks ticked off,
//! be broken down again into detailed steps, be re-ordered, or be deleted.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
