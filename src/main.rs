use agentdeck::app::{App, AppMessage};
use agentdeck::bus::EventBus;
use agentdeck::cli::{parse_args, version_line, CliCommand, USAGE};
use agentdeck::config::AppConfig;
use agentdeck::events::{Event, EventKind};
use agentdeck::headless::{self, LineMode};
use agentdeck::logging;
use agentdeck::markdown::{MarkdownRenderer, RenderService};
use agentdeck::session::{Session, SessionCommand, SessionRunner, UsageStats};
use agentdeck::shutdown::Shutdown;
use agentdeck::summary::format_summary;
use agentdeck::terminal::{setup_panic_hook, TerminalManager};
use agentdeck::ui;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{Event as TermEvent, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::Terminal;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Redraw tick, roughly 60 frames per second.
const TICK: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let options = match parse_args(std::env::args()) {
        Ok(CliCommand::Version) => {
            println!("{}", version_line());
            return Ok(());
        }
        Ok(CliCommand::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Ok(CliCommand::Run(options)) => options,
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    color_eyre::install()?;

    let config = AppConfig::from_env().with_cli(&options);
    let log_path = logging::init(&config)?;
    info!(version = %version_line(), log = ?log_path, headless = config.headless, "starting");

    // Without a working renderer nothing can be shown.
    let renderer = MarkdownRenderer::new()
        .map_err(|e| eyre!("cannot start the markdown renderer: {}", e))?;
    let renderer: Arc<dyn RenderService> = Arc::new(renderer);

    let runtime = tokio::runtime::Runtime::new()?;
    let outcome = runtime.block_on(async {
        if config.headless {
            run_headless(&config).await
        } else {
            run_dashboard(&config, renderer).await
        }
    });
    // stdin reads run on a blocking thread that never returns on its own.
    runtime.shutdown_timeout(Duration::from_millis(100));

    let (session, stats) = outcome?;
    print!("{}", format_summary(&session, &stats, chrono::Utc::now()));
    info!("exiting");
    Ok(())
}

/// Spawn the session runner plus a subscriber per event kind that logs
/// everything the bus publishes.
fn spawn_services(
    config: &AppConfig,
    bus: &EventBus,
    commands: mpsc::UnboundedReceiver<SessionCommand>,
) -> JoinHandle<SessionRunner> {
    for kind in EventKind::ALL {
        bus.spawn_subscriber(kind, kind.default_capacity(), |event: Event| async move {
            debug!(kind = ?event.kind(), at = %event.timestamp, payload = ?event.payload, "event");
        });
    }
    let runner = SessionRunner::new(config.agent_command(), bus.clone());
    tokio::spawn(runner.run(commands))
}

/// Stop the bus and collect final session state from the runner.
async fn finish(
    bus: &EventBus,
    runner: JoinHandle<SessionRunner>,
    fallback: (Session, UsageStats),
) -> (Session, UsageStats) {
    bus.shutdown();
    match runner.await {
        Ok(runner) => (
            runner.accumulator().snapshot(),
            runner.accumulator().stats(),
        ),
        Err(e) => {
            error!("session runner failed: {}", e);
            fallback
        }
    }
}

async fn run_dashboard(
    config: &AppConfig,
    renderer: Arc<dyn RenderService>,
) -> Result<(Session, UsageStats)> {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let mut app = App::new(renderer, command_tx, config.settings_info());
    let bus = EventBus::new(app.message_sender(), Shutdown::new());
    let runner = spawn_services(config, &bus, command_rx);

    setup_panic_hook();
    let mut manager = TerminalManager::new()?;
    let result = run_app(manager.terminal(), &mut app).await;
    manager.restore();
    if let Err(e) = &result {
        error!("ui loop failed: {}", e);
    }

    let totals = finish(&bus, runner, (app.session.clone(), app.stats)).await;
    result.map(|()| totals)
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (we need ownership for select!)
    let Some(mut message_rx) = app.message_rx.take() else {
        return Err(eyre!("message receiver already taken"));
    };

    let size = terminal.size()?;
    app.handle_resize(size.width, size.height);

    while !app.should_quit {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, &*app))?;
            app.needs_redraw = false;
        }

        let timeout = tokio::time::sleep(TICK);

        tokio::select! {
            _ = timeout => {}

            event_result = event_stream.next() => match event_result {
                Some(Ok(TermEvent::Resize(width, height))) => {
                    app.handle_resize(width, height);
                }
                Some(Ok(TermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => warn!("terminal event error: {}", e),
                None => {
                    info!("terminal input closed");
                    break;
                }
            },

            Some(msg) = message_rx.recv() => {
                app.handle_message(msg);
            }
        }
    }
    Ok(())
}

async fn run_headless(config: &AppConfig) -> Result<(Session, UsageStats)> {
    let (ui_tx, mut ui_rx) = mpsc::unbounded_channel::<AppMessage>();
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let bus = EventBus::new(ui_tx, Shutdown::new());
    let runner = spawn_services(config, &bus, command_rx);

    let mut mode = LineMode::new(std::io::stdout(), command_tx, config.model.clone());
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let result = headless::run(&mut mode, input, &mut ui_rx, bus.listener()).await;
    if let Err(e) = &result {
        error!("line mode failed: {}", e);
    }

    let fallback = (mode.session().clone(), *mode.stats());
    let totals = finish(&bus, runner, fallback).await;
    result?;
    Ok(totals)
}
