//! Type definitions for the step selection screen.
//!
//! This module defines the UI state of the screen a [`Step`] is shown on
//! and the result of handling one key press.
//!
//! [`Step`]: quickstep_core::step::Step

use indexmap::IndexSet;
use quickstep_core::step::Answer;

/// Direction to cycle through items in the selection UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

/// State for the UI viewport.
///
/// Tracks the visible portion of the item list when there are more
/// items than can fit on screen.
#[derive(Clone, PartialEq, Debug)]
pub struct ViewportState {
    pub offset: usize,
    pub height: u16,
    pub width: u16,
}

/// Complete UI state for the step selection screen.
#[derive(Clone, PartialEq, Debug)]
pub struct UiState {
    /// Position of the highlighted row among the displayed items
    pub selected_index: usize,
    /// Viewport state for scrolling
    pub viewport: ViewportState,
    /// Whether the user is currently filtering/searching
    pub is_filtering: bool,
    /// Current filter/search text
    pub filter_text: String,
    /// Item indexes toggled on in a multi-select step, in toggle order
    pub checked: IndexSet<usize>,
}

/// What a key press asks the screen to do.
#[derive(Debug, PartialEq)]
pub enum KeyOutcome {
    /// Leave the screen and resume the producer with this answer.
    Answer(Answer),
    /// Redraw with a new state.
    State(UiState),
    Move(CycleDirection),
    /// Nothing to select; ring the bell.
    Bell,
    Ignore,
}
