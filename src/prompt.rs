//! Interactive terminal prompts.
//!
//! This module provides ratatui-based prompts for:
//! - Free-text input with inline validation (instance URL, username, status)
//! - Masked input (password)
//! - Single-choice selection (status visibility)
//!
//! Every prompt reads keys from an [`EventSource`] so tests can script the
//! operator. Esc or Ctrl+C cancels with [`PromptError::Cancelled`].
use colored::*;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use ratatui::{
    Frame, Terminal, TerminalOptions, Viewport,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::fmt;
use std::io::{self, Stdout};

use crate::errors::{PromptError, ValidationError};
use crate::instance::Visibility;
use crate::validation;

/// Rows used by a text prompt: bordered input (3) + message (1).
const TEXT_PROMPT_HEIGHT: u16 = 4;

/// Username and password collected for the token exchange.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Trait representing an event source (so tests can inject fake events).
pub trait EventSource {
    fn read_event(&mut self) -> anyhow::Result<Event>;
}

/// Real event source that delegates to `crossterm::event::read`.
struct CrosstermEventSource;

impl EventSource for CrosstermEventSource {
    fn read_event(&mut self) -> anyhow::Result<Event> {
        Ok(event::read()?)
    }
}

fn is_ctrl_c(code: KeyCode, modifiers: KeyModifiers) -> bool {
    code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL)
}

/// Prompt for a line of text using an injected event source.
///
/// With `mask` set, every typed character is drawn as the mask character.
/// `validate` runs on Enter; a failure is shown under the input and the
/// prompt keeps going.
pub fn prompt_text_with<B, E, V>(
    terminal: &mut Terminal<B>,
    events: &mut E,
    label: &str,
    mask: Option<char>,
    validate: V,
) -> anyhow::Result<String>
where
    B: Backend,
    E: EventSource,
    V: Fn(&str) -> Result<(), ValidationError>,
{
    let mut input = String::new();
    let mut message = String::new();

    loop {
        terminal.draw(|frame| {
            render_text_prompt(frame, label, &input, mask, &message);
        })?;

        if let Event::Key(key) = events.read_event()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if is_ctrl_c(key.code, key.modifiers) {
                return Err(PromptError::Cancelled.into());
            }

            match key.code {
                KeyCode::Enter => match validate(&input) {
                    Ok(()) => return Ok(input),
                    Err(e) => message = format!("⚠️  {}", e),
                },
                KeyCode::Esc => return Err(PromptError::Cancelled.into()),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    input.push(c);
                    message.clear();
                }
                KeyCode::Backspace => {
                    input.pop();
                    message.clear();
                }
                _ => {}
            }
        }
    }
}

/// Render a single-line input prompt.
pub fn render_text_prompt(
    f: &mut Frame,
    label: &str,
    input: &str,
    mask: Option<char>,
    message: &str,
) {
    let chunks = Layout::default()
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(f.size());

    let shown = match mask {
        Some(m) => m.to_string().repeat(input.chars().count()),
        None => input.to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title("Enter: confirm | Esc: cancel");
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!("{}: ", label),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(shown),
            Span::raw("│"),
        ]))
        .block(block),
        chunks[0],
    );

    f.render_widget(
        Paragraph::new(if message.is_empty() { " " } else { message })
            .style(Style::default().fg(Color::Yellow)),
        chunks[1],
    );
}

/// Let the operator pick one of `items` using an injected event source.
/// Returns the index of the chosen item.
pub fn select_with<B, E, T>(
    terminal: &mut Terminal<B>,
    events: &mut E,
    label: &str,
    items: &[T],
) -> anyhow::Result<usize>
where
    B: Backend,
    E: EventSource,
    T: fmt::Display,
{
    if items.is_empty() {
        anyhow::bail!("Nothing to select for {}", label);
    }

    let mut list_state = ListState::default();
    list_state.select(Some(0));

    loop {
        terminal.draw(|frame| {
            render_select(frame, label, items, &mut list_state);
        })?;

        if let Event::Key(key) = events.read_event()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if is_ctrl_c(key.code, key.modifiers) {
                return Err(PromptError::Cancelled.into());
            }

            let cursor = list_state.selected().unwrap_or(0);
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    list_state.select(Some(cursor.saturating_sub(1)));
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if cursor + 1 < items.len() {
                        list_state.select(Some(cursor + 1));
                    }
                }
                KeyCode::Enter => return Ok(cursor),
                KeyCode::Esc => return Err(PromptError::Cancelled.into()),
                _ => {}
            }
        }
    }
}

/// Render a single-choice list.
pub fn render_select<T: fmt::Display>(
    f: &mut Frame,
    label: &str,
    items: &[T],
    list_state: &mut ListState,
) {
    let chunks = Layout::default()
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.size());

    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| ListItem::new(item.to_string()))
        .collect();
    let list = List::new(list_items)
        .block(Block::default().borders(Borders::ALL).title(label.to_string()))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    f.render_stateful_widget(list, chunks[0], list_state);

    f.render_widget(
        Paragraph::new("↑/↓: navigate | Enter: select | Esc: cancel")
            .style(Style::default().fg(Color::DarkGray)),
        chunks[1],
    );
}

/// Pick a visibility using an injected event source.
pub fn select_visibility_with<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    events: &mut E,
) -> anyhow::Result<Visibility> {
    let index = select_with(terminal, events, "Visibility", &Visibility::ALL)?;
    Ok(Visibility::ALL[index])
}

/// Run `prompt` in an inline viewport of `height` rows below the cursor.
///
/// Raw mode is restored whatever the prompt returns.
fn with_inline_terminal<T>(
    height: u16,
    prompt: impl FnOnce(
        &mut Terminal<CrosstermBackend<Stdout>>,
        &mut CrosstermEventSource,
    ) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    terminal::enable_raw_mode().map_err(PromptError::from)?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut term = match Terminal::with_options(
        backend,
        TerminalOptions {
            viewport: Viewport::Inline(height),
        },
    ) {
        Ok(term) => term,
        Err(e) => {
            let _ = terminal::disable_raw_mode();
            return Err(PromptError::from(e).into());
        }
    };

    let mut event_src = CrosstermEventSource;
    let res = prompt(&mut term, &mut event_src);

    // Wipe the prompt so only the answer line remains
    let _ = term.clear();
    let restore = terminal::disable_raw_mode();
    drop(term);
    restore.map_err(PromptError::from)?;

    res
}

fn print_answer(label: &str, value: &str) {
    println!("{} {}", format!("{}:", label).cyan(), value);
}

/// Ask for the instance URL. It must begin with `https://`.
pub fn prompt_instance_url() -> anyhow::Result<String> {
    let url = with_inline_terminal(TEXT_PROMPT_HEIGHT, |terminal, events| {
        prompt_text_with(
            terminal,
            events,
            "Instance URL",
            None,
            validation::validate_instance_url,
        )
    })?;
    print_answer("Instance URL", &url);
    Ok(url)
}

/// Ask for username and (masked) password.
pub fn prompt_credentials() -> anyhow::Result<Credentials> {
    let username = with_inline_terminal(TEXT_PROMPT_HEIGHT, |terminal, events| {
        prompt_text_with(
            terminal,
            events,
            "Username",
            None,
            validation::validate_username,
        )
    })?;
    print_answer("Username", &username);

    let password = with_inline_terminal(TEXT_PROMPT_HEIGHT, |terminal, events| {
        prompt_text_with(
            terminal,
            events,
            "Password",
            Some('*'),
            validation::validate_password,
        )
    })?;
    print_answer("Password", "[hidden]");

    Ok(Credentials { username, password })
}

/// Ask for the text of the next status. Any text is accepted.
pub fn prompt_status() -> anyhow::Result<String> {
    let status = with_inline_terminal(TEXT_PROMPT_HEIGHT, |terminal, events| {
        prompt_text_with(terminal, events, "Post", None, |_| Ok(()))
    })?;
    print_answer("Post", &status);
    Ok(status)
}

/// Ask which visibility the next status gets.
pub fn select_visibility() -> anyhow::Result<Visibility> {
    // Items plus list borders plus the hint line
    let height = Visibility::ALL.len() as u16 + 3;
    let visibility = with_inline_terminal(height, |terminal, events| {
        select_visibility_with(terminal, events)
    })?;
    print_answer("Visibility", visibility.as_str());
    Ok(visibility)
}
