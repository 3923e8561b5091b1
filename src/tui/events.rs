//! Event handling for the terminal UI
//!
//! Crossterm events are first mapped to an [`Action`], then applied to the
//! widget. Applying needs no terminal, so the whole keyboard contract is
//! testable headless.

use super::renderer::{CursorTarget, TerminalRenderer};
use crate::backing::BackingControl;
use crate::dropdown::DropdownState;
use crate::options::GroupState;
use crate::remote::RemoteRequest;
use crate::widget::Multiselect;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

/// User intent decoded from one terminal event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Input(char),
    Backspace,
    Up,
    Down,
    /// Tab, or Space on an empty query
    Toggle,
    ToggleGroup,
    SelectAll,
    SelectNone,
    Escape,
    Confirm,
    Interrupt,
    Click { column: u16, row: u16 },
    Ignored,
}

/// Result of applying an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Keep running the event loop
    Continue,
    /// A remote search should be started
    Fetch(RemoteRequest),
    /// Exit, keeping the selection
    Confirm,
    /// Exit without a result
    Abort,
}

/// Screen areas of the last drawn frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitAreas {
    /// Everything the widget drew
    pub widget: Rect,
    /// The search field
    pub search: Rect,
}

/// Map a key to an action
///
/// Space types into a non-empty query and toggles otherwise.
#[must_use]
pub fn map_key(key: KeyEvent, query_is_empty: bool) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::Ignored;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Interrupt,
        (KeyCode::Char('a'), KeyModifiers::CONTROL) => Action::SelectAll,
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => Action::SelectNone,
        (KeyCode::Char('g'), KeyModifiers::CONTROL) => Action::ToggleGroup,
        (KeyCode::Char(' '), _) if query_is_empty => Action::Toggle,
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => Action::Input(c),
        (KeyCode::Tab, _) => Action::Toggle,
        (KeyCode::Backspace, _) => Action::Backspace,
        (KeyCode::Up, _) => Action::Up,
        (KeyCode::Down, _) => Action::Down,
        (KeyCode::Esc, _) => Action::Escape,
        (KeyCode::Enter, _) => Action::Confirm,
        _ => Action::Ignored,
    }
}

/// Map any terminal event to an action
#[must_use]
pub fn map_event(event: &Event, query_is_empty: bool) -> Action {
    match event {
        Event::Key(key) => map_key(*key, query_is_empty),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => Action::Click {
            column: *column,
            row: *row,
        },
        _ => Action::Ignored,
    }
}

/// Apply an action to the widget
pub fn apply<B: BackingControl>(
    widget: &mut Multiselect<B, TerminalRenderer>,
    action: Action,
    areas: &HitAreas,
) -> EventResult {
    match action {
        Action::Input(c) => {
            widget.renderer_mut().push_char(c);
            widget.focus();
            query_changed(widget)
        }
        Action::Backspace => {
            if widget.renderer_mut().backspace() {
                query_changed(widget)
            } else {
                if let Some(pill) = widget.derived().pills.last().map(|p| p.id.clone()) {
                    widget.remove_pill(&pill);
                }
                EventResult::Continue
            }
        }
        Action::Up => {
            if !open_dropdown(widget) {
                widget.renderer_mut().cursor_up();
            }
            EventResult::Continue
        }
        Action::Down => {
            if !open_dropdown(widget) {
                widget.renderer_mut().cursor_down();
            }
            EventResult::Continue
        }
        Action::Toggle => {
            if !open_dropdown(widget) {
                toggle_current(widget);
            }
            EventResult::Continue
        }
        Action::ToggleGroup => {
            if !open_dropdown(widget)
                && let Some(group) = widget.renderer().current_group()
            {
                let checked = widget.group_state(&group) != Some(GroupState::All);
                widget.toggle_group(&group, checked);
            }
            EventResult::Continue
        }
        Action::SelectAll => {
            widget.select_all();
            EventResult::Continue
        }
        Action::SelectNone => {
            widget.select_none();
            EventResult::Continue
        }
        Action::Escape => {
            if widget.dismiss_key() {
                EventResult::Continue
            } else {
                EventResult::Abort
            }
        }
        Action::Confirm => EventResult::Confirm,
        Action::Interrupt => EventResult::Abort,
        Action::Click { column, row } => {
            let position = Position::new(column, row);
            if areas.search.contains(position) {
                widget.focus();
            } else if !areas.widget.contains(position) {
                widget.pointer_outside();
            }
            EventResult::Continue
        }
        Action::Ignored => EventResult::Continue,
    }
}

/// Open a closed dropdown, returning whether it was closed
///
/// Rows are hidden while closed, so navigation and toggles only open it.
fn open_dropdown<B: BackingControl>(widget: &mut Multiselect<B, TerminalRenderer>) -> bool {
    if widget.dropdown_state() == DropdownState::Closed {
        widget.focus();
        true
    } else {
        false
    }
}

fn query_changed<B: BackingControl>(widget: &mut Multiselect<B, TerminalRenderer>) -> EventResult {
    widget
        .refresh_query()
        .map_or(EventResult::Continue, EventResult::Fetch)
}

fn toggle_current<B: BackingControl>(widget: &mut Multiselect<B, TerminalRenderer>) {
    match widget.renderer().current() {
        Some(CursorTarget::Option(id)) => {
            let checked = widget.store().find(&id).is_some_and(|o| o.selected);
            widget.toggle_option(&id, !checked);
        }
        Some(CursorTarget::Group(group)) => {
            let checked = widget.group_state(&group) != Some(GroupState::All);
            widget.toggle_group(&group, checked);
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backing::NativeList;
    use crate::config::WidgetConfig;
    use crate::options::{Group, OptionId, OptionItem};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn widget(config: WidgetConfig) -> Multiselect<NativeList, TerminalRenderer> {
        let list = NativeList::new(
            true,
            vec![
                OptionItem::new(OptionId::Int(1), "Red").in_group("warm"),
                OptionItem::new(OptionId::Int(2), "Orange").in_group("warm"),
                OptionItem::new(OptionId::Int(3), "Blue"),
            ],
        )
        .with_groups(vec![Group::new("warm", "Warm")]);

        Multiselect::builder()
            .selector("#t")
            .config(config)
            .backing(list)
            .renderer(TerminalRenderer::new())
            .build()
            .unwrap()
    }

    fn areas() -> HitAreas {
        HitAreas {
            widget: Rect::new(0, 0, 40, 10),
            search: Rect::new(0, 0, 40, 3),
        }
    }

    #[test]
    fn test_map_key() {
        assert_eq!(map_key(key(KeyCode::Char('r')), true), Action::Input('r'));
        assert_eq!(map_key(key(KeyCode::Char(' ')), true), Action::Toggle);
        assert_eq!(map_key(key(KeyCode::Char(' ')), false), Action::Input(' '));
        assert_eq!(map_key(key(KeyCode::Tab), false), Action::Toggle);
        assert_eq!(map_key(ctrl('g'), true), Action::ToggleGroup);
        assert_eq!(map_key(ctrl('a'), true), Action::SelectAll);
        assert_eq!(map_key(ctrl('n'), true), Action::SelectNone);
        assert_eq!(map_key(ctrl('c'), true), Action::Interrupt);
        assert_eq!(map_key(key(KeyCode::Esc), true), Action::Escape);
        assert_eq!(map_key(key(KeyCode::F(5)), true), Action::Ignored);
    }

    #[test]
    fn test_map_mouse_click() {
        let event = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 7,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(map_event(&event, true), Action::Click { column: 4, row: 7 });
    }

    #[test]
    fn test_typing_opens_and_filters() {
        let mut w = widget(WidgetConfig::default());
        for c in "blu".chars() {
            assert_eq!(apply(&mut w, Action::Input(c), &areas()), EventResult::Continue);
        }

        assert_eq!(w.dropdown_state(), DropdownState::Open);
        assert_eq!(w.query(), "blu");
        assert_eq!(w.renderer().visible_ids(), vec![OptionId::Int(3)]);
    }

    #[test]
    fn test_typing_in_remote_mode_fetches() {
        let mut w = widget(WidgetConfig::default().with_ajax_url("http://localhost/q"));
        let result = apply(&mut w, Action::Input('n'), &areas());

        assert!(matches!(result, EventResult::Fetch(ref r) if r.term == "n"));
    }

    #[test]
    fn test_toggle_row_and_header() {
        let mut w = widget(WidgetConfig::default());
        apply(&mut w, Action::Down, &areas());

        // Cursor starts on the "Warm" header.
        apply(&mut w, Action::Toggle, &areas());
        assert_eq!(
            w.snapshot().selected_ids,
            vec![OptionId::Int(1), OptionId::Int(2)]
        );

        apply(&mut w, Action::Down, &areas());
        apply(&mut w, Action::Toggle, &areas());
        assert_eq!(w.snapshot().selected_ids, vec![OptionId::Int(2)]);

        apply(&mut w, Action::ToggleGroup, &areas());
        assert_eq!(
            w.snapshot().selected_ids,
            vec![OptionId::Int(1), OptionId::Int(2)]
        );
        apply(&mut w, Action::ToggleGroup, &areas());
        assert!(w.snapshot().is_empty());
    }

    #[test]
    fn test_closed_dropdown_only_opens() {
        for action in [Action::Toggle, Action::ToggleGroup, Action::Up, Action::Down] {
            let mut w = widget(WidgetConfig::default());
            assert_eq!(w.dropdown_state(), DropdownState::Closed);

            assert_eq!(apply(&mut w, action, &areas()), EventResult::Continue);
            assert_eq!(w.dropdown_state(), DropdownState::Open, "{action:?}");
            assert!(w.snapshot().is_empty(), "{action:?} toggled a hidden row");
            assert_eq!(w.backing().change_count(), 0);
        }
    }

    #[test]
    fn test_backspace_on_empty_query_removes_last_pill() {
        let mut w = widget(WidgetConfig::default().with_multi_tags(true));
        w.toggle_all(true);

        apply(&mut w, Action::Backspace, &areas());
        assert_eq!(
            w.snapshot().selected_ids,
            vec![OptionId::Int(1), OptionId::Int(2)]
        );
    }

    #[test]
    fn test_escape_closes_then_aborts() {
        let mut w = widget(WidgetConfig::default());
        w.focus();

        assert_eq!(apply(&mut w, Action::Escape, &areas()), EventResult::Continue);
        assert_eq!(w.dropdown_state(), DropdownState::Closed);
        assert_eq!(apply(&mut w, Action::Escape, &areas()), EventResult::Abort);
    }

    #[test]
    fn test_click_outside_closes() {
        let mut w = widget(WidgetConfig::default());
        w.focus();

        apply(&mut w, Action::Click { column: 5, row: 5 }, &areas());
        assert_eq!(w.dropdown_state(), DropdownState::Open);

        apply(&mut w, Action::Click { column: 5, row: 20 }, &areas());
        assert_eq!(w.dropdown_state(), DropdownState::Closed);

        apply(&mut w, Action::Click { column: 1, row: 1 }, &areas());
        assert_eq!(w.dropdown_state(), DropdownState::Open);
    }

    #[test]
    fn test_toolbar_keys() {
        let mut w = widget(WidgetConfig::default().with_toolbar(true));
        apply(&mut w, Action::SelectAll, &areas());
        assert_eq!(w.snapshot().selected_count, 3);
        apply(&mut w, Action::SelectNone, &areas());
        assert!(w.snapshot().is_empty());
    }
}
