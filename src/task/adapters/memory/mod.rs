//! In-memory adapters.

mod mirror;
mod suggestion;

pub use mirror::InMemoryMirror;
pub use suggestion::ScriptedSuggestionAdapter;
