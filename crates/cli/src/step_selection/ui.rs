use std::fmt::Display;
use std::io::{stdout, Write};
use std::time::Duration;

use crossterm::cursor::{self, MoveTo};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Color::{DarkBlue, DarkGreen, Reset, Yellow};
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue, terminal, ExecutableCommand};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use indexmap::IndexSet;
use quickstep_core::error::Result;
use quickstep_core::step::{Answer, SelectionItem, Step};

use super::types::CycleDirection::{Down, Up};
use super::types::{CycleDirection, KeyOutcome, UiState, ViewportState};

/// Rows taken by the header, the placeholder and the footer.
const CHROME_ROWS: u16 = 3;

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Restore the terminal on drop
        let _ = disable_raw_mode();
        let mut stdout = stdout();
        let _ = stdout.execute(cursor::Show);
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}

/// Shows `step` until the user answers it.
pub fn prompt_for_step(step: &Step) -> Result<Answer> {
    let mut stdout = stdout();

    stdout.execute(EnterAlternateScreen)?;
    enable_raw_mode()?;

    let _raw_mode_guard = RawModeGuard; // When this goes out of scope, raw mode is disabled
    stdout.execute(cursor::Hide)?;

    let (width, height) = terminal::size()?;
    let mut ui_state = initial_state(step, width, height);
    let mut indexes_to_display = filter_displayed_indexes(step, &ui_state.filter_text);

    redraw_ui(step, &ui_state, &indexes_to_display)?;

    loop {
        if !event::poll(Duration::from_millis(500))? {
            continue;
        }

        let new_ui_state = match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                match handle_key_event(key_event, step, &ui_state, &indexes_to_display) {
                    KeyOutcome::Answer(answer) => return Ok(answer),
                    KeyOutcome::State(state) => Some(state),
                    KeyOutcome::Move(direction) => Some(move_selected_index(
                        &ui_state,
                        indexes_to_display.len(),
                        direction,
                    )),
                    KeyOutcome::Bell => {
                        execute!(stdout, Print("\x07"))?;
                        None
                    }
                    KeyOutcome::Ignore => None,
                }
            }
            Event::Resize(width, height) => Some(handle_resize(
                width,
                height,
                &ui_state,
                indexes_to_display.len(),
            )),
            _ => None,
        };

        if let Some(new_ui_state) = new_ui_state {
            if new_ui_state == ui_state {
                continue;
            }

            if new_ui_state.filter_text != ui_state.filter_text {
                indexes_to_display = filter_displayed_indexes(step, &new_ui_state.filter_text);
            }

            ui_state = new_ui_state;
            redraw_ui(step, &ui_state, &indexes_to_display)?;
        }
    }
}

/// Highlights the first picked item and pre-checks picked items of a
/// multi-select step.
pub fn initial_state(step: &Step, width: u16, height: u16) -> UiState {
    let viewport_height = height.saturating_sub(CHROME_ROWS).max(1);
    let selected_index = step.picked_items().map(|(i, _)| i).next().unwrap_or(0);

    let checked: IndexSet<usize> = if step.multiselect {
        step.picked_items().map(|(i, _)| i).collect()
    } else {
        IndexSet::new()
    };

    UiState {
        selected_index,
        viewport: ViewportState {
            offset: selected_index.saturating_sub(viewport_height as usize - 1),
            height: viewport_height,
            width,
        },
        is_filtering: false,
        filter_text: String::new(),
        checked,
    }
}

/// Handle keyboard events in the step selection UI
pub fn handle_key_event(
    key_event: KeyEvent,
    step: &Step,
    ui_state: &UiState,
    indexes_to_display: &[usize],
) -> KeyOutcome {
    match key_event.code {
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyOutcome::Answer(Answer::Cancelled)
        }
        KeyCode::Up => KeyOutcome::Move(Up),
        KeyCode::Down => KeyOutcome::Move(Down),
        KeyCode::Enter => accept(step, ui_state, indexes_to_display),
        KeyCode::Esc if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = false;
            updated_state.filter_text.clear();
            updated_state.selected_index = 0;
            updated_state.viewport.offset = 0;
            KeyOutcome::State(updated_state)
        }
        KeyCode::Esc => KeyOutcome::Answer(Answer::Cancelled),
        KeyCode::Backspace if !ui_state.filter_text.is_empty() => {
            let mut updated_state = ui_state.clone();
            updated_state.filter_text.pop();
            updated_state.selected_index = 0;
            updated_state.viewport.offset = 0;
            KeyOutcome::State(updated_state)
        }
        KeyCode::Backspace | KeyCode::Left if !ui_state.is_filtering => {
            KeyOutcome::Answer(Answer::Back)
        }
        KeyCode::Char(c) if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            updated_state.filter_text.push(c);
            updated_state.selected_index = 0;
            updated_state.viewport.offset = 0;
            KeyOutcome::State(updated_state)
        }
        KeyCode::Char('/') => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = true;
            KeyOutcome::State(updated_state)
        }
        KeyCode::Char(' ') if step.multiselect => {
            let Some(&item_index) = indexes_to_display.get(ui_state.selected_index) else {
                return KeyOutcome::Bell;
            };

            let mut updated_state = ui_state.clone();
            if !updated_state.checked.shift_remove(&item_index) {
                updated_state.checked.insert(item_index);
            }
            KeyOutcome::State(updated_state)
        }
        KeyCode::Char('k') => KeyOutcome::Move(Up),
        KeyCode::Char('j') => KeyOutcome::Move(Down),
        KeyCode::Char('q') => KeyOutcome::Answer(Answer::Cancelled),
        _ => KeyOutcome::Ignore,
    }
}

/// Enter: the checked items of a multi-select step, otherwise the
/// highlighted one.
fn accept(step: &Step, ui_state: &UiState, indexes_to_display: &[usize]) -> KeyOutcome {
    if step.multiselect {
        let selection: Vec<SelectionItem> = ui_state
            .checked
            .iter()
            .filter_map(|i| step.items.get(*i).cloned())
            .collect();
        return KeyOutcome::Answer(Answer::Selected(selection));
    }

    match indexes_to_display
        .get(ui_state.selected_index)
        .and_then(|i| step.items.get(*i))
    {
        Some(item) => KeyOutcome::Answer(Answer::Selected(vec![item.clone()])),
        None => KeyOutcome::Bell,
    }
}

/// Handle window resize events
pub fn handle_resize(width: u16, height: u16, ui_state: &UiState, items_to_display: usize) -> UiState {
    let new_height = height.saturating_sub(CHROME_ROWS).max(1);
    let mut ui_state = ui_state.clone();
    let mut new_viewport = ViewportState {
        width,
        height: new_height,
        offset: ui_state.viewport.offset,
    };

    // If growing taller, try to show more items above current selection
    match new_height.cmp(&ui_state.viewport.height) {
        std::cmp::Ordering::Greater if new_viewport.offset > 0 => {
            let height_increase = new_height - ui_state.viewport.height;
            new_viewport.offset = new_viewport.offset.saturating_sub(height_increase as usize);
        }
        std::cmp::Ordering::Less if ui_state.selected_index >= new_viewport.offset + new_height as usize => {
            new_viewport.offset = ui_state.selected_index.saturating_sub(new_height as usize - 1);

            if new_viewport.offset + new_height as usize > items_to_display {
                new_viewport.offset = items_to_display.saturating_sub(new_height as usize);
            }
        }
        _ => {}
    }

    ui_state.viewport = new_viewport;
    ui_state
}

/// Move the selected index in the given direction, wrapping around
pub fn move_selected_index(
    ui_state: &UiState,
    items_to_display: usize,
    direction: CycleDirection,
) -> UiState {
    if items_to_display == 0 {
        return ui_state.clone();
    }

    let mut new_index = ui_state.selected_index;
    let mut ui_state = ui_state.clone();
    let viewport_height = ui_state.viewport.height as usize;

    match direction {
        Up => {
            if new_index == 0 {
                new_index = items_to_display - 1;
                ui_state.viewport.offset = new_index.saturating_sub(viewport_height - 1);
            } else {
                new_index -= 1;
                if new_index < ui_state.viewport.offset {
                    ui_state.viewport.offset = new_index;
                }
            }
        }
        Down => {
            new_index = (new_index + 1) % items_to_display;
            if new_index < ui_state.selected_index {
                ui_state.viewport.offset = 0;
            } else if new_index >= ui_state.viewport.offset + viewport_height {
                ui_state.viewport.offset = new_index + 1 - viewport_height;
            }
        }
    }

    ui_state.selected_index = new_index;
    ui_state
}

/// Indexes of the items matching `predicate`, in step order.
pub fn filter_displayed_indexes(step: &Step, predicate: &str) -> Vec<usize> {
    if predicate.is_empty() {
        return (0..step.items.len()).collect();
    }

    let matcher = SkimMatcherV2::default();

    step.items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            matcher
                .fuzzy_match(&item.to_string(), predicate)
                .map(|_| i)
        })
        .collect()
}

fn redraw_ui(step: &Step, ui_state: &UiState, indexes_to_display: &[usize]) -> Result<()> {
    let mut stdout = stdout();

    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

    print_header(step, ui_state, indexes_to_display.len())?;

    queue!(
        stdout,
        MoveTo(0, 1),
        SetAttribute(Attribute::Bold),
        Print(&step.placeholder),
        SetAttribute(Attribute::Reset),
    )?;

    if indexes_to_display.is_empty() {
        queue!(
            stdout,
            MoveTo(0, 2),
            SetForegroundColor(Color::Red),
            Print("No matching items!"),
            SetAttribute(Attribute::Reset),
            SetForegroundColor(Reset),
        )?;
    } else {
        print_items_with_selection(step, ui_state, indexes_to_display)?;
    }

    let footer_row = ui_state.viewport.height + CHROME_ROWS - 1;
    queue!(stdout, MoveTo(0, footer_row))?;

    if ui_state.is_filtering {
        queue!(
            stdout,
            SetAttribute(Attribute::Bold),
            Print(format!("Filter: {}", ui_state.filter_text)),
            SetAttribute(Attribute::Reset)
        )?;
    } else if let Some(detail) = indexes_to_display
        .get(ui_state.selected_index)
        .and_then(|i| step.items.get(*i))
        .and_then(|item| item.detail.as_ref())
    {
        queue!(
            stdout,
            SetForegroundColor(Color::DarkGrey),
            Print(fit_to_width(detail, ui_state.viewport.width)),
            SetForegroundColor(Reset)
        )?;
    }

    stdout.flush()?;
    Ok(())
}

/// Print the header for the step selection UI
fn print_header(step: &Step, ui_state: &UiState, item_display_count: usize) -> Result<()> {
    let mut stdout = stdout();
    let width = ui_state.viewport.width as usize;

    let instructions = if ui_state.is_filtering {
        "<esc>: Stop Filtering".to_string()
    } else {
        let toggle = if step.multiselect { "space: Toggle   |   " } else { "" };
        format!(
            "{}/{}   |   {toggle}/: Filter   |   <-: Back   |   esc: Cancel",
            pad_to_width_of(ui_state.selected_index + 1, item_display_count),
            item_display_count
        )
    };

    let content = fit_to_width(&format!("  {}   |   {instructions}", step.title), ui_state.viewport.width);
    let right_padding = " ".repeat(width.saturating_sub(content.chars().count()));

    queue!(
        stdout,
        MoveTo(0, 0),
        SetBackgroundColor(DarkGreen),
        Print(content),
        Print(right_padding),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )?;

    Ok(())
}

/// Pad a value to match the width of the largest value
fn pad_to_width_of<T: Display>(value: T, max_number: usize) -> String {
    let width = format!("{max_number}").len();
    format!("{:>width$}", value.to_string())
}

fn fit_to_width(text: &str, width: u16) -> String {
    text.chars().take(width as usize).collect()
}

/// One row: a check box for multi-select steps, then the item.
pub fn format_row(step: &Step, ui_state: &UiState, item_index: usize) -> String {
    let item = &step.items[item_index];

    if step.multiselect {
        let mark = if ui_state.checked.contains(&item_index) { 'x' } else { ' ' };
        format!("[{mark}] {item}")
    } else {
        format!("{item}")
    }
}

/// Print all visible items with the selected one highlighted
fn print_items_with_selection(
    step: &Step,
    ui_state: &UiState,
    indexes_to_display: &[usize],
) -> Result<()> {
    let mut stdout = stdout();
    let viewport = &ui_state.viewport;

    let visible_items = indexes_to_display
        .iter()
        .enumerate()
        .skip(viewport.offset)
        .take(viewport.height as usize);

    for (row, (position, item_index)) in visible_items.enumerate() {
        let is_selected = position == ui_state.selected_index;
        let content = fit_to_width(&format_row(step, ui_state, *item_index), viewport.width);
        let padding = " ".repeat((viewport.width as usize).saturating_sub(content.chars().count()));

        queue!(stdout, MoveTo(0, row as u16 + 2), Clear(ClearType::CurrentLine))?;

        if is_selected {
            queue!(
                stdout,
                SetAttribute(Attribute::Bold),
                SetBackgroundColor(DarkBlue),
                SetForegroundColor(Yellow),
            )?;
        }

        queue!(
            stdout,
            Print(content),
            Print(padding),
            SetAttribute(Attribute::Reset),
            SetBackgroundColor(Reset),
            SetForegroundColor(Reset),
        )?;
    }

    Ok(())
}
