//! Line-mode front end.
//!
//! Reads prompts from stdin one line at a time and prints domain events to
//! stdout as they arrive. Shares the runner and bus with the dashboard; only
//! the presentation differs.

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::app::AppMessage;
use crate::events::DomainEvent;
use crate::input::SlashCommand;
use crate::session::{Session, SessionCommand, UsageStats};
use crate::shutdown::ShutdownListener;
use crate::stream::line_from_bytes;

const PROMPT: &str = "> ";

/// What the input loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAction {
    Continue,
    Quit,
}

/// One printable line for an event, or `None` for events line mode keeps
/// silent about.
pub fn format_event(payload: &DomainEvent) -> Option<String> {
    match payload {
        DomainEvent::SystemInit(notice) => Some(format!("ℹ️  {}", notice.summary())),
        DomainEvent::SessionInfo(_) => None,
        DomainEvent::ConversationMessage(msg) => {
            Some(format!("{}{}", msg.kind.prefix(), msg.content))
        }
        DomainEvent::ToolActivity(activity) => Some(format!("   {}", activity.display())),
        DomainEvent::Error(report) => Some(format!("❌ Error: {}", report.message)),
        DomainEvent::SessionStats(stats) => Some(format!(
            "📊 Turns: {} | Tokens: {} | Cost: ${:.6}",
            stats.turns,
            stats.total_tokens(),
            stats.cost_usd
        )),
    }
}

/// State of the line-mode loop.
pub struct LineMode<W: Write> {
    out: W,
    commands: mpsc::UnboundedSender<SessionCommand>,
    session: Session,
    stats: UsageStats,
    model: Option<String>,
    waiting: bool,
}

impl<W: Write> LineMode<W> {
    pub fn new(
        out: W,
        commands: mpsc::UnboundedSender<SessionCommand>,
        model: Option<String>,
    ) -> Self {
        Self {
            out,
            commands,
            session: Session::new(),
            stats: UsageStats::default(),
            model,
            waiting: false,
        }
    }

    /// True while a prompt is running; stdin is not read meanwhile.
    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    /// Latest session snapshot seen on the bus.
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn stats(&self) -> &UsageStats {
        &self.stats
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn write_prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{PROMPT}")?;
        self.out.flush()
    }

    fn send(&mut self, command: SessionCommand) -> io::Result<LineAction> {
        if self.commands.send(command).is_err() {
            warn!("session runner is gone");
            writeln!(self.out, "❌ Error: Agent runner stopped")?;
            return Ok(LineAction::Quit);
        }
        Ok(LineAction::Continue)
    }

    /// Handle one line typed by the operator.
    pub fn handle_line(&mut self, line: &str) -> io::Result<LineAction> {
        let Some(command) = SlashCommand::parse(line) else {
            let prompt = line.trim();
            if prompt.is_empty() {
                self.write_prompt()?;
                return Ok(LineAction::Continue);
            }
            self.waiting = true;
            let resume = self.session.id.is_some();
            return self.send(SessionCommand::Execute {
                prompt: prompt.to_string(),
                resume,
            });
        };

        let action = match command {
            SlashCommand::New => self.send(SessionCommand::NewConversation)?,
            SlashCommand::Model(model) => {
                match &model {
                    Some(name) => writeln!(self.out, "Model set to {name}")?,
                    None => writeln!(self.out, "Model reset to the agent default")?,
                }
                self.model = model.clone();
                self.send(SessionCommand::SetModel(model))?
            }
            SlashCommand::Session => {
                self.write_session()?;
                LineAction::Continue
            }
            SlashCommand::Help => {
                for line in SlashCommand::help_lines() {
                    writeln!(self.out, "{line}")?;
                }
                LineAction::Continue
            }
            SlashCommand::Exit => LineAction::Quit,
            SlashCommand::Unknown(text) => {
                writeln!(self.out, "❌ Error: Unknown command {text} (try /help)")?;
                LineAction::Continue
            }
        };
        if action == LineAction::Continue {
            self.write_prompt()?;
        }
        Ok(action)
    }

    fn write_session(&mut self) -> io::Result<()> {
        let model = self
            .model
            .as_deref()
            .or(self.session.model.as_deref())
            .unwrap_or("default");
        writeln!(
            self.out,
            "Session: {}",
            self.session.id.as_deref().unwrap_or("none")
        )?;
        writeln!(self.out, "Model: {model}")?;
        if self.session.chain.is_empty() {
            writeln!(self.out, "Chain: (empty)")?;
        } else {
            writeln!(self.out, "Chain: {}", self.session.chain.join(" -> "))?;
        }
        writeln!(
            self.out,
            "Turns: {} | Tokens: {} | Cost: ${:.6}",
            self.stats.turns,
            self.stats.total_tokens(),
            self.stats.cost_usd
        )
    }

    /// Handle one message from the bus.
    pub fn handle_message(&mut self, message: AppMessage) -> io::Result<()> {
        match message {
            AppMessage::Event(event) => {
                match &event.payload {
                    DomainEvent::SessionInfo(session) => self.session = session.clone(),
                    DomainEvent::SessionStats(stats) => self.stats = *stats,
                    _ => {}
                }
                if let Some(line) = format_event(&event.payload) {
                    writeln!(self.out, "{line}")?;
                }
            }
            AppMessage::CommandFinished => {
                self.waiting = false;
                self.write_prompt()?;
            }
        }
        self.out.flush()
    }
}

/// Drive line mode until `/exit`, end of input, an interrupt, or shutdown.
pub async fn run<R, W>(
    mode: &mut LineMode<W>,
    input: R,
    messages: &mut mpsc::UnboundedReceiver<AppMessage>,
    mut shutdown: ShutdownListener,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.split(b'\n');
    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);
    let mut signals = true;

    mode.write_prompt()?;
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            result = &mut interrupt, if signals => match result {
                Ok(()) => {
                    info!("interrupted");
                    writeln!(mode.out)?;
                    break;
                }
                Err(e) => {
                    warn!("cannot listen for interrupts: {}", e);
                    signals = false;
                }
            },
            message = messages.recv() => match message {
                Some(message) => mode.handle_message(message)?,
                None => break,
            },
            line = lines.next_segment(), if !mode.is_waiting() => match line? {
                Some(bytes) => {
                    if mode.handle_line(&line_from_bytes(bytes))? == LineAction::Quit {
                        break;
                    }
                }
                None => {
                    writeln!(mode.out)?;
                    break;
                }
            },
        }
    }
    mode.out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{ErrorReport, ErrorSource, Event};
    use crate::models::ConversationMessage;
    use crate::shutdown::Shutdown;

    fn mode() -> (LineMode<Vec<u8>>, mpsc::UnboundedReceiver<SessionCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (LineMode::new(Vec::new(), tx, None), rx)
    }

    fn text(mode: &LineMode<Vec<u8>>) -> String {
        String::from_utf8_lossy(mode.output()).to_string()
    }

    #[test]
    fn test_prompt_sends_execute_and_waits() {
        let (mut mode, mut rx) = mode();
        assert_eq!(mode.handle_line("  hello  ").unwrap(), LineAction::Continue);
        assert!(mode.is_waiting());
        assert_eq!(
            rx.try_recv().unwrap(),
            SessionCommand::Execute {
                prompt: "hello".to_string(),
                resume: false
            }
        );

        mode.handle_message(AppMessage::CommandFinished).unwrap();
        assert!(!mode.is_waiting());
    }

    #[test]
    fn test_resume_after_session_known() {
        let (mut mode, mut rx) = mode();
        let mut session = Session::new();
        session.advance("abc");
        mode.handle_message(AppMessage::Event(Event::new(DomainEvent::SessionInfo(session))))
            .unwrap();
        mode.handle_line("again").unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            SessionCommand::Execute {
                prompt: "again".to_string(),
                resume: true
            }
        );
    }

    #[test]
    fn test_slash_commands() {
        let (mut mode, mut rx) = mode();
        mode.handle_line("/new").unwrap();
        assert_eq!(rx.try_recv().unwrap(), SessionCommand::NewConversation);

        mode.handle_line("/model opus").unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            SessionCommand::SetModel(Some("opus".to_string()))
        );

        mode.handle_line("/session").unwrap();
        mode.handle_line("/bogus").unwrap();
        let out = text(&mode);
        assert!(out.contains("Model set to opus"));
        assert!(out.contains("Session: none"));
        assert!(out.contains("Model: opus"));
        assert!(out.contains("Unknown command /bogus"));
        assert_eq!(mode.handle_line("/exit").unwrap(), LineAction::Quit);
    }

    #[test]
    fn test_events_printed() {
        let (mut mode, _rx) = mode();
        mode.handle_message(AppMessage::Event(Event::new(
            DomainEvent::ConversationMessage(ConversationMessage::assistant("hi there")),
        )))
        .unwrap();
        mode.handle_message(AppMessage::Event(Event::new(DomainEvent::Error(
            ErrorReport::new(ErrorSource::Stderr, "boom"),
        ))))
        .unwrap();
        let out = text(&mode);
        assert!(out.contains("🤖 hi there"));
        assert!(out.contains("❌ Error: boom"));
    }

    #[test]
    fn test_runner_gone_quits() {
        let (mut mode, rx) = mode();
        drop(rx);
        assert_eq!(mode.handle_line("hello").unwrap(), LineAction::Quit);
        assert!(text(&mode).contains("Agent runner stopped"));
    }

    #[tokio::test]
    async fn test_run_until_exit() {
        let (mut mode, _rx) = mode();
        let (_tx, mut messages) = mpsc::unbounded_channel();
        let shutdown = Shutdown::new();
        let input: &[u8] = b"/help\n/exit\nnever read\n";

        run(&mut mode, input, &mut messages, shutdown.listener())
            .await
            .unwrap();
        let out = text(&mode);
        assert!(out.contains("/model [name]"));
        assert!(!mode.is_waiting());
    }

    #[tokio::test]
    async fn test_run_survives_invalid_utf8_input() {
        let (mut mode, _rx) = mode();
        let (_tx, mut messages) = mpsc::unbounded_channel();
        let shutdown = Shutdown::new();
        let input: &[u8] = b"/bad\xff\r\n/help\n/exit\n";

        run(&mut mode, input, &mut messages, shutdown.listener())
            .await
            .unwrap();
        let out = text(&mode);
        assert!(out.contains("Unknown command /bad\u{FFFD}"));
        assert!(out.contains("/model [name]"));
    }

    #[tokio::test]
    async fn test_run_stops_at_end_of_input() {
        let (mut mode, _rx) = mode();
        let (_tx, mut messages) = mpsc::unbounded_channel();
        let shutdown = Shutdown::new();
        let input: &[u8] = b"";

        run(&mut mode, input, &mut messages, shutdown.listener())
            .await
            .unwrap();
        assert!(text(&mode).starts_with(PROMPT));
    }
}
