//! taskai: a task manager core with AI-suggested subtasks.
//!
//! Tasks live in an in-memory collection that is authoritative for the
//! running process and mirrored, whole, to durable storage after every
//! change. A hosted language model proposes subtasks for new tasks and
//! detailed steps for existing ones.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: tasks, subtasks, validation and ordering rules
//! - **Ports**: the durable mirror and suggestion service contracts
//! - **Adapters**: in-memory, file-backed and hosted-model implementations
//! - **Services**: the task store and lifecycle orchestration
//!
//! # Modules
//!
//! - [`task`]: task model, store and lifecycle
//! - [`config`]: TOML and environment configuration
//! - [`cli`]: the `taskai` command-line front end

pub mod cli;
pub mod config;
pub mod task;
