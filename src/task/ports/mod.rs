//! Port contracts for the task manager.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod mirror;
pub mod suggestion;

pub use mirror::{DurableMirror, MirrorError, MirrorResult};
pub use suggestion::{
    DetailedSteps, DetailedStepsRequest, SubtaskSuggestionRequest, SubtaskSuggestions,
    SuggestionAdapter, SuggestionError, SuggestionKind, SuggestionResult,
};
