//! Confirmation step between suggestion and task creation.

use crate::task::domain::TaskDraft;

/// A validated draft with the suggestions offered for it and the user's
/// current selection.
///
/// Nothing is stored until the review is confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionReview {
    draft: TaskDraft,
    suggestions: Vec<String>,
    selected: Vec<usize>,
}

impl SuggestionReview {
    /// Creates a review with nothing selected.
    #[must_use]
    pub const fn new(draft: TaskDraft, suggestions: Vec<String>) -> Self {
        Self {
            draft,
            suggestions,
            selected: Vec::new(),
        }
    }

    /// Returns the draft under review.
    #[must_use]
    pub const fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    /// Returns the offered suggestions in the order received.
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Returns whether the suggestion at `index` is selected.
    #[must_use]
    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Selects or deselects the suggestion at `index`.
    ///
    /// Returns `false` when `index` is out of range.
    pub fn toggle(&mut self, index: usize) -> bool {
        if index >= self.suggestions.len() {
            return false;
        }
        if let Some(position) = self.selected.iter().position(|&chosen| chosen == index) {
            self.selected.remove(position);
        } else {
            self.selected.push(index);
        }
        true
    }

    /// Selects every suggestion not yet selected, in offered order.
    pub fn select_all(&mut self) {
        for index in 0..self.suggestions.len() {
            if !self.selected.contains(&index) {
                self.selected.push(index);
            }
        }
    }

    /// Returns the selected suggestion texts in the order they were chosen.
    #[must_use]
    pub fn selected_texts(&self) -> Vec<String> {
        self.selected
            .iter()
            .filter_map(|&index| self.suggestions.get(index).cloned())
            .collect()
    }

    /// Consumes the review, yielding the draft and the selected texts.
    #[must_use]
    pub fn into_selection(self) -> (TaskDraft, Vec<String>) {
        let selected = self.selected_texts();
        (self.draft, selected)
    }
}
