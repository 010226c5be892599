//! Value objects exchanged between a step producer and its driver.

use std::fmt::{Display, Formatter};

use crate::git::{Reference, Repository};

/// Separator used in step titles, e.g. `Rebase main · quickstep`.
pub const DOT: &str = "\u{2022}";

/// The domain object an item stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    None,
    Repository(Repository),
    Reference(Reference),
    /// Extra arguments of a confirmation variant.
    Flags(Vec<String>),
    /// An opaque key, used by drivers that build their own steps.
    Key(String),
    /// The trailing `Cancel` entry of a confirmation step.
    Cancel,
}

impl Payload {
    pub fn into_repository(self) -> Option<Repository> {
        match self {
            Payload::Repository(repo) => Some(repo),
            _ => None,
        }
    }

    pub fn into_reference(self) -> Option<Reference> {
        match self {
            Payload::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn into_flags(self) -> Option<Vec<String>> {
        match self {
            Payload::Flags(flags) => Some(flags),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionItem {
    pub label: String,
    pub description: String,
    pub detail: Option<String>,
    /// Pre-selected when the step is shown.
    pub picked: bool,
    pub payload: Payload,
}

impl SelectionItem {
    pub fn new(label: impl Into<String>, payload: Payload) -> Self {
        Self {
            label: label.into(),
            description: String::new(),
            detail: None,
            picked: false,
            payload,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    #[must_use]
    pub fn with_picked(mut self, picked: bool) -> Self {
        self.picked = picked;
        self
    }

    pub fn is_cancel(&self) -> bool {
        self.payload == Payload::Cancel
    }
}

impl Display for SelectionItem {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.label)?;

        if !self.description.is_empty() {
            write!(formatter, "  {}", self.description)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Choose among domain candidates.
    Selection,
    /// Choose among variants of the final action.
    Confirmation,
}

/// One question to put to the user. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub title: String,
    pub placeholder: String,
    pub items: Vec<SelectionItem>,
    pub multiselect: bool,
    pub kind: StepKind,
    /// Answer the step without presenting it when exactly one variant is on
    /// offer.
    pub resolve_single: bool,
}

impl Step {
    /// The only non-cancel item, when the step may be resolved without
    /// asking.
    pub fn sole_choice(&self) -> Option<&SelectionItem> {
        if !self.resolve_single {
            return None;
        }

        let mut choices = self.items.iter().filter(|i| !i.is_cancel());
        match (choices.next(), choices.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    pub fn picked_items(&self) -> impl Iterator<Item = (usize, &SelectionItem)> {
        self.items.iter().enumerate().filter(|(_, i)| i.picked)
    }
}

/// What the driver resumes a producer with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Selected(Vec<SelectionItem>),
    /// The user asked for the previous step.
    Back,
    /// The user dismissed the step.
    Cancelled,
}

impl Answer {
    /// Dismissal, or picking the `Cancel` entry of a confirmation.
    pub fn is_cancellation(&self) -> bool {
        match self {
            Answer::Cancelled => true,
            Answer::Selected(items) => items.iter().any(SelectionItem::is_cancel),
            Answer::Back => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Executed,
    Aborted,
}

/// What a producer hands back to its driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Ask(Step),
    Done(Outcome),
}

/// `1 commit`, `3 commits`.
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Joins two title parts with a padded dot.
pub fn with_dot(left: &str, right: &str) -> String {
    format!("{left}  {DOT}  {right}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confirmation(items: Vec<SelectionItem>, resolve_single: bool) -> Step {
        Step {
            title: "Confirm".to_string(),
            placeholder: "Confirm".to_string(),
            items,
            multiselect: false,
            kind: StepKind::Confirmation,
            resolve_single,
        }
    }

    #[test]
    fn test_sole_choice_ignores_cancel_item() {
        let step = confirmation(
            vec![
                SelectionItem::new("Fetch", Payload::Flags(vec![])),
                SelectionItem::new("Cancel", Payload::Cancel),
            ],
            true,
        );

        assert_eq!(step.sole_choice().map(|i| i.label.as_str()), Some("Fetch"));
    }

    #[test]
    fn test_sole_choice_requires_flag_and_single_variant() {
        let single = vec![SelectionItem::new("Fetch", Payload::Flags(vec![]))];
        assert!(confirmation(single.clone(), false).sole_choice().is_none());

        let mut two = single;
        two.push(SelectionItem::new("Fetch All", Payload::Flags(vec!["--all".to_string()])));
        assert!(confirmation(two, true).sole_choice().is_none());
    }

    #[test]
    fn test_answer_cancellation() {
        assert!(Answer::Cancelled.is_cancellation());
        assert!(!Answer::Back.is_cancellation());
        assert!(!Answer::Selected(vec![]).is_cancellation());
        assert!(Answer::Selected(vec![SelectionItem::new("Cancel", Payload::Cancel)]).is_cancellation());
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("commit", 1), "1 commit");
        assert_eq!(pluralize("commit", 0), "0 commits");
        assert_eq!(pluralize("commit", 12), "12 commits");
    }

    #[test]
    fn test_selection_item_display() {
        let item = SelectionItem::new("Fetch & Prune", Payload::None).with_description("--prune");
        assert_eq!(format!("{item}"), "Fetch & Prune  --prune");
        assert_eq!(format!("{}", SelectionItem::new("Fetch", Payload::None)), "Fetch");
    }
}
