use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use fedipost::errors::{PromptError, is_cancelled};
use fedipost::instance::Visibility;
use fedipost::prompt::{EventSource, prompt_text_with, select_visibility_with};
use fedipost::validation;
use ratatui::{Terminal, backend::TestBackend};
use std::collections::VecDeque;

struct MockEventSource {
    events: VecDeque<Event>,
}

impl MockEventSource {
    fn new(events: Vec<Event>) -> Self {
        Self {
            events: VecDeque::from(events),
        }
    }
}

impl EventSource for MockEventSource {
    fn read_event(&mut self) -> anyhow::Result<Event> {
        // Running dry means the prompt asked for more input than scripted
        self.events
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("scripted events exhausted"))
    }
}

fn key_event(code: KeyCode) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: crossterm::event::KeyEventState::empty(),
    })
}

fn typed(text: &str) -> Vec<Event> {
    text.chars().map(|c| key_event(KeyCode::Char(c))).collect()
}

fn ctrl_c() -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
}

fn terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(80, 24)).unwrap()
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn test_instance_url_reprompts_until_valid() {
    // "http://x" is rejected, then the scheme is fixed by retyping
    let mut events = typed("http://x");
    events.push(key_event(KeyCode::Enter));
    for _ in 0.."http://x".len() {
        events.push(key_event(KeyCode::Backspace));
    }
    events.extend(typed("https://example.social"));
    events.push(key_event(KeyCode::Enter));

    let mut event_source = MockEventSource::new(events);
    let mut terminal = terminal();

    let result = prompt_text_with(
        &mut terminal,
        &mut event_source,
        "Instance URL",
        None,
        validation::validate_instance_url,
    );

    assert_eq!(result.unwrap(), "https://example.social");
}

#[test]
fn test_validation_message_is_shown() {
    let events = vec![key_event(KeyCode::Enter), key_event(KeyCode::Esc)];

    let mut event_source = MockEventSource::new(events);
    let mut terminal = terminal();

    let result = prompt_text_with(
        &mut terminal,
        &mut event_source,
        "Username",
        None,
        validation::validate_username,
    );

    assert!(result.is_err());
    assert!(screen_text(&terminal).contains("Username cannot be empty"));
}

#[test]
fn test_masked_input_is_not_echoed() {
    let mut events = typed("hunter2");
    events.push(key_event(KeyCode::Enter));

    let mut event_source = MockEventSource::new(events);
    let mut terminal = terminal();

    let result = prompt_text_with(
        &mut terminal,
        &mut event_source,
        "Password",
        Some('*'),
        validation::validate_password,
    );

    assert_eq!(result.unwrap(), "hunter2");
    let screen = screen_text(&terminal);
    assert!(!screen.contains("hunter2"));
    assert!(screen.contains("*******"));
}

#[test]
fn test_unvalidated_prompt_accepts_empty_input() {
    let events = vec![key_event(KeyCode::Enter)];

    let mut event_source = MockEventSource::new(events);
    let mut terminal = terminal();

    let result = prompt_text_with(&mut terminal, &mut event_source, "Post", None, |_| Ok(()));

    assert_eq!(result.unwrap(), "");
}

#[test]
fn test_escape_cancels_text_prompt() {
    let mut events = typed("half a th");
    events.push(key_event(KeyCode::Esc));

    let mut event_source = MockEventSource::new(events);
    let mut terminal = terminal();

    let err = prompt_text_with(&mut terminal, &mut event_source, "Post", None, |_| Ok(()))
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<PromptError>(),
        Some(PromptError::Cancelled)
    ));
}

#[test]
fn test_ctrl_c_cancels_instead_of_typing() {
    let mut events = typed("abc");
    events.push(ctrl_c());

    let mut event_source = MockEventSource::new(events);
    let mut terminal = terminal();

    let err = prompt_text_with(&mut terminal, &mut event_source, "Post", None, |_| Ok(()))
        .unwrap_err();

    assert!(is_cancelled(&err));
}

#[test]
fn test_key_release_events_are_ignored() {
    let release = Event::Key(KeyEvent {
        code: KeyCode::Char('z'),
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Release,
        state: crossterm::event::KeyEventState::empty(),
    });
    let mut events = vec![release];
    events.extend(typed("ok"));
    events.push(key_event(KeyCode::Enter));

    let mut event_source = MockEventSource::new(events);
    let mut terminal = terminal();

    let result = prompt_text_with(&mut terminal, &mut event_source, "Post", None, |_| Ok(()));

    assert_eq!(result.unwrap(), "ok");
}

#[test]
fn test_select_visibility_default_is_public() {
    let mut event_source = MockEventSource::new(vec![key_event(KeyCode::Enter)]);
    let mut terminal = terminal();

    let visibility = select_visibility_with(&mut terminal, &mut event_source).unwrap();

    assert_eq!(visibility, Visibility::Public);
}

#[test]
fn test_select_visibility_navigation() {
    let events = vec![
        key_event(KeyCode::Down),
        key_event(KeyCode::Down),
        key_event(KeyCode::Up),
        key_event(KeyCode::Char('j')),
        key_event(KeyCode::Enter),
    ];

    let mut event_source = MockEventSource::new(events);
    let mut terminal = terminal();

    let visibility = select_visibility_with(&mut terminal, &mut event_source).unwrap();

    assert_eq!(visibility, Visibility::Private);
}

#[test]
fn test_select_visibility_cursor_is_clamped() {
    // Any key sequence can only land on one of the four values
    let mut events = vec![key_event(KeyCode::Up); 3];
    events.extend(vec![key_event(KeyCode::Down); 10]);
    events.push(key_event(KeyCode::Enter));

    let mut event_source = MockEventSource::new(events);
    let mut terminal = terminal();

    let visibility = select_visibility_with(&mut terminal, &mut event_source).unwrap();

    assert_eq!(visibility, Visibility::Direct);
    assert!(Visibility::ALL.contains(&visibility));
}

#[test]
fn test_select_visibility_ignores_typed_text() {
    let mut events = typed("friends-only");
    events.push(key_event(KeyCode::Enter));

    let mut event_source = MockEventSource::new(events);
    let mut terminal = terminal();

    let visibility = select_visibility_with(&mut terminal, &mut event_source).unwrap();

    // Letters other than j/k do not move the cursor
    assert_eq!(visibility, Visibility::Public);
}

#[test]
fn test_select_visibility_escape_cancels() {
    let mut event_source = MockEventSource::new(vec![key_event(KeyCode::Esc)]);
    let mut terminal = terminal();

    let err = select_visibility_with(&mut terminal, &mut event_source).unwrap_err();

    assert!(is_cancelled(&err));
}
