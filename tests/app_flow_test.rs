//! App state driven the way the UI loop drives it: key presses in, bus
//! messages in, rendered frames out.

mod common;

use agentdeck::app::{AppMessage, InputState, View, MAX_MESSAGES};
use agentdeck::domain::{max_offset, EditorMode};
use agentdeck::events::{DomainEvent, ErrorReport, ErrorSource, Event};
use agentdeck::models::{ConversationMessage, MessageKind};
use agentdeck::session::{SessionAccumulator, SessionCommand};
use agentdeck::ui;
use common::*;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn press(app: &mut agentdeck::app::App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn ctrl(app: &mut agentdeck::app::App, c: char) {
    app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
}

fn type_str(app: &mut agentdeck::app::App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn event(payload: DomainEvent) -> AppMessage {
    AppMessage::Event(Event::new(payload))
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn test_history_cap_with_auto_bottom() {
    let (mut app, _rx) = test_app();
    app.handle_resize(100, 30);

    for i in 0..600 {
        app.handle_message(event(DomainEvent::ConversationMessage(
            ConversationMessage::assistant(format!("message {}", i)),
        )));
        let total = app.conversation_lines().len();
        let viewport = app.layout().viewport_height();
        assert_eq!(app.scroll.offset(), max_offset(total, viewport));
    }

    assert_eq!(app.messages.len(), MAX_MESSAGES);
    assert_eq!(app.messages.front().unwrap().content, "message 100");
    assert_eq!(app.messages.back().unwrap().content, "message 599");
}

#[test]
fn test_prompt_round_trip_through_keys() {
    let (mut app, mut rx) = test_app();

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.input_state(), InputState::Normal);
    press(&mut app, KeyCode::Char('i'));
    assert_eq!(app.input_state(), InputState::Insert);
    type_str(&mut app, "list files");
    press(&mut app, KeyCode::Enter);

    assert_eq!(
        rx.try_recv().unwrap(),
        SessionCommand::Execute {
            prompt: "list files".to_string(),
            resume: false
        }
    );
    assert!(app.is_loading);
    assert!(!app.input_active);
    assert_eq!(app.messages.back().unwrap().kind, MessageKind::User);

    app.handle_message(AppMessage::CommandFinished);
    assert!(!app.is_loading);
}

#[test]
fn test_accumulated_session_is_resumed() {
    let (mut app, mut rx) = test_app();
    let mut accumulator = SessionAccumulator::new();
    for line in [INIT_LINE, ASSISTANT_HI, RESULT_B] {
        for payload in accumulator.ingest(line) {
            app.handle_message(event(payload));
        }
    }
    assert_eq!(app.session.id.as_deref(), Some("B"));
    assert_eq!(app.stats.turns, 1);

    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('a'));
    type_str(&mut app, "more");
    press(&mut app, KeyCode::Enter);
    assert_eq!(
        rx.try_recv().unwrap(),
        SessionCommand::Execute {
            prompt: "more".to_string(),
            resume: true
        }
    );
}

#[test]
fn test_vim_edit_before_submit() {
    let (mut app, mut rx) = test_app();
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('i'));
    type_str(&mut app, "hello world");
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.editor.mode(), EditorMode::Normal);

    press(&mut app, KeyCode::Char('0'));
    press(&mut app, KeyCode::Char('c'));
    press(&mut app, KeyCode::Char('w'));
    assert_eq!(app.editor.mode(), EditorMode::Insert);
    assert_eq!(app.editor.text(), "world");
    type_str(&mut app, "hi ");
    press(&mut app, KeyCode::Enter);

    assert_eq!(
        rx.try_recv().unwrap(),
        SessionCommand::Execute {
            prompt: "hi world".to_string(),
            resume: false
        }
    );
}

#[test]
fn test_blank_submit_is_ignored() {
    let (mut app, mut rx) = test_app();
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('i'));
    type_str(&mut app, "   ");
    press(&mut app, KeyCode::Enter);
    assert!(rx.try_recv().is_err());
    assert!(app.messages.is_empty());
}

#[test]
fn test_view_switching_and_quit() {
    let (mut app, _rx) = test_app();
    ctrl(&mut app, 'h');
    assert_eq!(app.view, View::Help);
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.view, View::Main);
    ctrl(&mut app, 's');
    assert_eq!(app.view, View::Settings);
    ctrl(&mut app, 'm');
    assert_eq!(app.view, View::Main);

    // `q` types while inserting and quits otherwise.
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('i'));
    press(&mut app, KeyCode::Char('q'));
    assert!(!app.should_quit);
    assert_eq!(app.editor.text(), "q");
    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit);
}

#[test]
fn test_ctrl_c_quits_from_insert() {
    let (mut app, _rx) = test_app();
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('i'));
    ctrl(&mut app, 'c');
    assert!(app.should_quit);
}

#[test]
fn test_new_conversation_is_requested() {
    let (mut app, mut rx) = test_app();
    ctrl(&mut app, 'n');
    assert_eq!(rx.try_recv().unwrap(), SessionCommand::NewConversation);
}

#[test]
fn test_scroll_keys_only_when_inactive() {
    let (mut app, _rx) = test_app();
    app.handle_resize(80, 20);
    for i in 0..60 {
        app.push_message(ConversationMessage::user(format!("line {}", i)));
    }
    let bottom = app.scroll.offset();
    assert!(bottom > 0);

    press(&mut app, KeyCode::Char('k'));
    assert_eq!(app.scroll.offset(), bottom - 1);
    press(&mut app, KeyCode::Home);
    assert_eq!(app.scroll.offset(), 0);
    press(&mut app, KeyCode::PageDown);
    assert_eq!(app.scroll.offset(), app.layout().viewport_height().min(bottom));
    press(&mut app, KeyCode::End);
    assert_eq!(app.scroll.offset(), bottom);

    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('k'));
    assert_eq!(app.scroll.offset(), bottom);
}

#[test]
fn test_errors_are_bounded_and_result_errors_inline() {
    let (mut app, _rx) = test_app();
    for i in 0..7 {
        app.handle_message(event(DomainEvent::Error(ErrorReport::new(
            ErrorSource::Stderr,
            format!("e{}", i),
        ))));
    }
    assert_eq!(app.errors.len(), 5);
    assert_eq!(app.errors.front().unwrap().message, "e2");
    assert!(app.messages.is_empty());

    app.handle_message(event(DomainEvent::Error(ErrorReport::new(
        ErrorSource::Result,
        "result error: quota",
    ))));
    assert_eq!(app.messages.back().unwrap().kind, MessageKind::Error);
}

#[test]
fn test_dashboard_frame() {
    let (mut app, _rx) = test_app();
    app.handle_resize(100, 30);
    let mut accumulator = SessionAccumulator::new();
    for line in [INIT_LINE, ASSISTANT_HI, TOOL_USE, TOOL_RESULT, RESULT_B] {
        for payload in accumulator.ingest(line) {
            app.handle_message(event(payload));
        }
    }

    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|f| ui::render(f, &app)).unwrap();
    let text = screen_text(&terminal);

    assert!(text.contains("hi"));
    assert!(text.contains("Session Info"));
    assert!(text.contains("Bash"));
}

#[test]
fn test_tiny_window_warns() {
    let (mut app, _rx) = test_app();
    app.handle_resize(60, 7);
    let mut terminal = Terminal::new(TestBackend::new(60, 7)).unwrap();
    terminal.draw(|f| ui::render(f, &app)).unwrap();
    assert!(screen_text(&terminal).contains("Window too small"));
}
