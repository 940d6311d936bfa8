//! The invocation actor.
//!
//! [`SessionRunner`] owns the [`SessionAccumulator`] and processes
//! [`SessionCommand`]s one at a time, so at most one agent process runs and
//! session state has exactly one writer.

use tokio::sync::mpsc;
use tracing::{info, warn};

use super::accumulator::SessionAccumulator;
use crate::agent::{run_agent, AgentCommand};
use crate::app::AppMessage;
use crate::bus::EventBus;
use crate::error::ProcessError;
use crate::events::{DomainEvent, ErrorReport, ErrorSource};
use crate::models::ConversationMessage;
use crate::shutdown::ShutdownListener;

/// Requests accepted by the runner.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Run the agent with a prompt. `resume` continues the current session
    /// when one exists.
    Execute { prompt: String, resume: bool },
    NewConversation,
    /// Override the model for later invocations; `None` restores the
    /// agent's default.
    SetModel(Option<String>),
}

pub struct SessionRunner {
    accumulator: SessionAccumulator,
    command: AgentCommand,
    bus: EventBus,
    shutdown: ShutdownListener,
}

impl SessionRunner {
    pub fn new(command: AgentCommand, bus: EventBus) -> Self {
        let shutdown = bus.listener();
        Self {
            accumulator: SessionAccumulator::new(),
            command,
            bus,
            shutdown,
        }
    }

    pub fn accumulator(&self) -> &SessionAccumulator {
        &self.accumulator
    }

    /// Run the agent once, publishing every decoded event in stdout order.
    pub async fn execute_command(&mut self, prompt: &str, resume: bool) -> Result<(), ProcessError> {
        // Resuming continues the context; the agent always answers with a
        // fresh identifier, which the result line records.
        let resume_id = if resume {
            self.accumulator.session().resume_id().map(str::to_string)
        } else {
            None
        };

        let accumulator = &mut self.accumulator;
        let bus = &self.bus;
        let stderr_bus = self.bus.clone();

        run_agent(
            &self.command,
            prompt,
            resume_id.as_deref(),
            self.shutdown.clone(),
            |line| {
                for event in accumulator.ingest(line) {
                    bus.publish(event);
                }
            },
            move |line| {
                stderr_bus.publish(DomainEvent::Error(ErrorReport::new(
                    ErrorSource::Stderr,
                    line,
                )));
            },
        )
        .await
    }

    /// Reset session state and announce it.
    pub fn new_conversation(&mut self) {
        self.accumulator.reset();
        info!("new conversation started");
        self.bus.publish(DomainEvent::SessionInfo(self.accumulator.snapshot()));
        self.bus.publish(DomainEvent::SessionStats(self.accumulator.stats()));
        self.bus.publish(DomainEvent::ConversationMessage(
            ConversationMessage::system("New conversation started"),
        ));
    }

    pub fn set_model(&mut self, model: Option<String>) {
        info!(?model, "model override changed");
        self.command.model = model.filter(|m| !m.is_empty());
    }

    /// Apply one command. Failures are published, never returned.
    pub async fn handle(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Execute { prompt, resume } => {
                match self.execute_command(&prompt, resume).await {
                    Ok(()) => {}
                    Err(ProcessError::Cancelled) => info!("invocation cancelled"),
                    Err(e) => {
                        warn!("agent invocation failed: {}", e);
                        self.bus.publish(DomainEvent::Error(ErrorReport::from(&e)));
                    }
                }
                self.bus.notify_ui(AppMessage::CommandFinished);
            }
            SessionCommand::NewConversation => self.new_conversation(),
            SessionCommand::SetModel(model) => self.set_model(model),
        }
    }

    /// Process commands until the channel closes or shutdown fires.
    ///
    /// Returns the runner so callers can read final session state.
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<SessionCommand>) -> Self {
        let mut shutdown = self.shutdown.clone();
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                next = commands.recv() => match next {
                    Some(command) => self.handle(command).await,
                    None => break,
                }
            }
        }
        info!("session runner stopped");
        self
    }
}
