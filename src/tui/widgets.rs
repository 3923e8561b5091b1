//! Ratatui widgets drawing the row model

use super::renderer::{Entry, TerminalRenderer};
use super::theme::Theme;
use crate::config::Strings;
use crate::options::GroupState;
use crate::selection::Pill;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

/// Search field showing the query while open and the summary while closed
pub struct SearchBar<'a> {
    model: &'a TerminalRenderer,
    strings: &'a Strings,
    theme: &'a Theme,
}

impl<'a> SearchBar<'a> {
    #[must_use]
    pub const fn new(model: &'a TerminalRenderer, strings: &'a Strings, theme: &'a Theme) -> Self {
        Self {
            model,
            strings,
            theme,
        }
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let derived = self.model.derived();
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.model.is_open()));
        if let Some(count) = derived.counter {
            block = block.title(Span::styled(format!(" {count} "), self.theme.counter_style()));
        }

        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.model.is_open() {
            let mut spans = vec![
                Span::styled(self.strings.search.as_str(), self.theme.dimmed_style()),
                Span::raw(" "),
                Span::raw(self.model.query()),
            ];
            spans.push(Span::styled(
                "│",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
            Line::from(spans)
        } else if derived.display_text.is_empty() {
            Line::from(Span::styled(
                derived.placeholder.as_str(),
                self.theme.dimmed_style(),
            ))
        } else {
            Line::from(derived.display_text.as_str())
        };

        Paragraph::new(line).render(inner, buf);
    }
}

/// Selected items as removable pills
pub struct PillBar<'a> {
    pills: &'a [Pill],
    theme: &'a Theme,
}

impl<'a> PillBar<'a> {
    #[must_use]
    pub const fn new(pills: &'a [Pill], theme: &'a Theme) -> Self {
        Self { pills, theme }
    }
}

impl Widget for PillBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();
        for (i, pill) in self.pills.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                format!(" {} × ", pill.label),
                self.theme.pill_style(),
            ));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// "Select all" / "Select none" hints
pub struct Toolbar<'a> {
    strings: &'a Strings,
    theme: &'a Theme,
}

impl<'a> Toolbar<'a> {
    #[must_use]
    pub const fn new(strings: &'a Strings, theme: &'a Theme) -> Self {
        Self { strings, theme }
    }
}

impl Widget for Toolbar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::styled("^A", self.theme.cursor_style()),
            Span::raw(" "),
            Span::raw(self.strings.all.as_str()),
            Span::raw("   "),
            Span::styled("^N", self.theme.cursor_style()),
            Span::raw(" "),
            Span::raw(self.strings.none.as_str()),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}

/// Checklist of visible rows and group headers
pub struct OptionList<'a> {
    model: &'a TerminalRenderer,
    theme: &'a Theme,
}

impl<'a> OptionList<'a> {
    #[must_use]
    pub const fn new(model: &'a TerminalRenderer, theme: &'a Theme) -> Self {
        Self { model, theme }
    }

    fn checkbox(checked: bool) -> &'static str {
        if checked { "[x] " } else { "[ ] " }
    }

    fn group_checkbox(state: GroupState) -> &'static str {
        match state {
            GroupState::All => "[x] ",
            GroupState::Partial => "[-] ",
            GroupState::None => "[ ] ",
        }
    }

    fn line(&self, entry: Entry<'_>, is_cursor: bool) -> ListItem<'a> {
        let mut spans = Vec::new();
        spans.push(Span::styled(
            if is_cursor { "> " } else { "  " },
            self.theme.cursor_style(),
        ));

        match entry {
            Entry::Header(header) => {
                spans.push(Span::styled(
                    Self::group_checkbox(header.state),
                    self.theme.checked_style(),
                ));
                spans.push(Span::styled(header.label.clone(), self.theme.group_style()));
            }
            Entry::Option(row) => {
                if row.group.is_some() {
                    spans.push(Span::raw("  "));
                }
                spans.push(Span::styled(
                    Self::checkbox(row.checked),
                    self.theme.checked_style(),
                ));
                spans.push(Span::raw(row.label.clone()));
                if let Some(description) = &row.description {
                    spans.push(Span::styled(
                        format!("  {description}"),
                        self.theme.dimmed_style(),
                    ));
                }
            }
        }

        let item = ListItem::new(Line::from(spans));
        if is_cursor {
            item.style(self.theme.cursor_style())
        } else {
            item
        }
    }
}

impl Widget for OptionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
            .border_style(self.theme.border_style(true));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let entries = self.model.entries();
        let cursor = self.model.cursor();
        let height = usize::from(inner.height);

        // Start from the requested offset but keep the cursor on screen.
        let requested = usize::try_from(self.model.scroll()).unwrap_or(usize::MAX);
        let mut start = requested.min(entries.len().saturating_sub(height));
        if cursor < start {
            start = cursor;
        } else if cursor >= start + height {
            start = cursor + 1 - height;
        }
        let end = (start + height).min(entries.len());

        let items: Vec<ListItem> = entries[start..end]
            .iter()
            .enumerate()
            .map(|(i, entry)| self.line(*entry, start + i == cursor))
            .collect();

        List::new(items).render(inner, buf);
    }
}

/// Key hints along the bottom edge
pub struct HelpBar<'a> {
    theme: &'a Theme,
    toolbar: bool,
}

impl<'a> HelpBar<'a> {
    #[must_use]
    pub const fn new(theme: &'a Theme, toolbar: bool) -> Self {
        Self { theme, toolbar }
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut hints = vec![
            ("↑/↓", "move"),
            ("TAB", "toggle"),
            ("^G", "group"),
            ("Enter", "confirm"),
            ("ESC", "close"),
        ];
        if self.toolbar {
            hints.insert(3, ("^A/^N", "all/none"));
        }

        let mut spans = Vec::new();
        for (i, (key, action)) in hints.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.dimmed_style()));
            }
            spans.push(Span::styled(key, self.theme.cursor_style()));
            spans.push(Span::styled(":", self.theme.dimmed_style()));
            spans.push(Span::raw(action));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Group, OptionId, OptionItem};
    use crate::render::Renderer;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_option_list_draws_headers_and_checks() {
        let mut model = TerminalRenderer::new();
        let warm = model.materialize_group(&Group::new("warm", "Warm"));
        model.set_group_state(warm, GroupState::Partial);
        let red = model.materialize_row(&OptionItem::new(OptionId::Int(1), "Red").in_group("warm"), 0);
        model.set_row_checked(red, true);
        model.materialize_row(&OptionItem::new(OptionId::Int(2), "Blue"), 1);

        let theme = Theme::dark();
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        OptionList::new(&model, &theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("[-] Warm"));
        assert!(text.contains("[x] Red"));
        assert!(text.contains("[ ] Blue"));
    }

    #[test]
    fn test_search_bar_shows_placeholder_when_closed() {
        let mut model = TerminalRenderer::new();
        model.paint_selection(&crate::selection::DerivedState {
            placeholder: "Pick one".to_string(),
            counter: Some(0),
            ..Default::default()
        });

        let theme = Theme::dark();
        let strings = Strings::default();
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        SearchBar::new(&model, &strings, &theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Pick one"));
        assert!(text.contains(" 0 "));
    }
}
