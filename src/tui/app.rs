//! Terminal event loop

use super::error::{Result, TuiError};
use super::events::{EventResult, HitAreas, apply, map_event};
use super::renderer::TerminalRenderer;
use super::theme::Theme;
use super::widgets::{HelpBar, OptionList, PillBar, SearchBar, Toolbar};
use crate::backing::BackingControl;
use crate::remote::{RemoteCompletion, RemoteSource, spawn_fetch};
use crate::widget::Multiselect;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Enter pressed; the selection stands
    Confirmed,
    /// Escape on a closed dropdown, or Ctrl+C
    Aborted,
}

/// Run the widget in the terminal until the user confirms or aborts
///
/// The dropdown opens immediately. Remote searches run on worker threads
/// when a `source` is given; their results are handed back to the widget on
/// this thread.
///
/// # Errors
///
/// Returns `TuiError::Io` if the terminal cannot be set up or drawn.
pub fn run<B: BackingControl>(
    widget: &mut Multiselect<B, TerminalRenderer>,
    source: Option<Arc<dyn RemoteSource>>,
) -> Result<Outcome> {
    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, widget, source);

    if let Err(e) = cleanup_terminal(&mut terminal) {
        warn!(error = %e, "failed to restore terminal");
    }

    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(stdout)).map_err(TuiError::from)
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_loop<B: BackingControl>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    widget: &mut Multiselect<B, TerminalRenderer>,
    source: Option<Arc<dyn RemoteSource>>,
) -> Result<Outcome> {
    let theme = Theme::for_choice(widget.config().theme);
    let (sender, receiver): (Sender<RemoteCompletion>, Receiver<RemoteCompletion>) =
        mpsc::channel();
    let mut areas = HitAreas::default();

    widget.focus();

    loop {
        while let Ok(completion) = receiver.try_recv() {
            if let Some(outcome) = widget.complete_remote(completion) {
                debug!(
                    removed = outcome.removed.len(),
                    appended = outcome.appended.len(),
                    "merged remote results"
                );
            }
        }

        terminal.draw(|frame| areas = draw(frame, widget, &theme))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        let event = event::read()?;
        let action = map_event(&event, widget.renderer().query().is_empty());

        match apply(widget, action, &areas) {
            EventResult::Continue => {}
            EventResult::Fetch(request) => {
                if let Some(source) = &source {
                    let seq = request.seq;
                    if let Err(e) = spawn_fetch(Arc::clone(source), request, sender.clone()) {
                        warn!(seq, error = %e, "failed to start remote search");
                    }
                }
            }
            EventResult::Confirm => return Ok(Outcome::Confirmed),
            EventResult::Abort => return Ok(Outcome::Aborted),
        }
    }
}

fn draw<B: BackingControl>(
    frame: &mut Frame,
    widget: &Multiselect<B, TerminalRenderer>,
    theme: &Theme,
) -> HitAreas {
    let config = widget.config();
    let model = widget.renderer();
    let open = model.is_open();
    let show_pills = config.multi_tags && !model.derived().pills.is_empty();

    let mut constraints = vec![Constraint::Length(3)];
    if show_pills {
        constraints.push(Constraint::Length(1));
    }
    if open && config.toolbar {
        constraints.push(Constraint::Length(1));
    }
    if open {
        constraints.push(Constraint::Min(3));
    }
    constraints.push(Constraint::Length(1));

    let area = frame.area();
    let chunks = Layout::vertical(constraints).split(area);
    let mut next = chunks.iter().copied();

    let search = next.next().unwrap_or_default();
    frame.render_widget(SearchBar::new(model, &config.strings, theme), search);

    let mut widget_bottom = search.bottom();
    if show_pills && let Some(rect) = next.next() {
        frame.render_widget(PillBar::new(&model.derived().pills, theme), rect);
        widget_bottom = rect.bottom();
    }
    if open && config.toolbar && let Some(rect) = next.next() {
        frame.render_widget(Toolbar::new(&config.strings, theme), rect);
        widget_bottom = rect.bottom();
    }
    if open && let Some(rect) = next.next() {
        frame.render_widget(OptionList::new(model, theme), rect);
        widget_bottom = rect.bottom();
    }
    if let Some(rect) = next.next() {
        frame.render_widget(HelpBar::new(theme, config.toolbar), rect);
    }

    HitAreas {
        widget: Rect::new(area.x, area.y, area.width, widget_bottom.saturating_sub(area.y)),
        search,
    }
}
