use serde::{Deserialize, Serialize};

use crate::domain::category::PetitionCategory;

pub const DRAFT_START_MARKER: &str = "---DRAFT---";
pub const DRAFT_END_MARKER: &str = "---END DRAFT---";

/// Petition fields recovered from an assistant reply. Every field is optional
/// and independent of the others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<PetitionCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParsedDraft {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.target.is_none()
            && self.category.is_none()
            && self.description.is_none()
    }

    /// Every field present, with non-blank text.
    pub fn is_complete(&self) -> bool {
        [&self.title, &self.target, &self.description]
            .iter()
            .all(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()))
            && self.category.is_some()
    }

    /// Overlays `newer` onto `self`, keeping the current value wherever the
    /// newer draft has nothing (or only whitespace) for a field.
    pub fn merge(&mut self, newer: &ParsedDraft) {
        merge_text(&mut self.title, &newer.title);
        merge_text(&mut self.target, &newer.target);
        merge_text(&mut self.description, &newer.description);
        if newer.category.is_some() {
            self.category = newer.category;
        }
    }

    /// Writes the present fields back out in the fenced template the
    /// assistant is asked to produce.
    pub fn to_draft_block(&self) -> String {
        let mut block = String::from(DRAFT_START_MARKER);
        block.push('\n');
        if let Some(title) = &self.title {
            block.push_str(&format!("Title: {title}\n"));
        }
        if let Some(target) = &self.target {
            block.push_str(&format!("Target: {target}\n"));
        }
        if let Some(category) = &self.category {
            block.push_str(&format!("Category: {}\n", category.as_str()));
        }
        if let Some(description) = &self.description {
            block.push_str(&format!("Description:\n{description}\n"));
        }
        block.push_str(DRAFT_END_MARKER);
        block
    }
}

fn merge_text(current: &mut Option<String>, newer: &Option<String>) {
    if let Some(value) = newer.as_deref().filter(|v| !v.trim().is_empty()) {
        *current = Some(value.to_string());
    }
}
