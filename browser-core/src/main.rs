//! src/main.rs
//! Sample browser TUI: catalog on the left, lazily loaded sources on demand

use std::{
    io::{self, Stdout},
    panic::PanicHookInfo,
    path::PathBuf,
    sync::Arc,
    time::Instant,
};

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use tokio::{
    signal,
    sync::{Notify, mpsc},
};
use tracing::{error, info, warn};

use browser_core::{
    AppError, Logger,
    cache::source_cache::SourceCache,
    catalog::{builtin::builtin, index::Catalog, manifest},
    config::Config,
    controller::{
        action_dispatcher::ActionDispatcher,
        event_loop::{EventLoop, TaskResult},
    },
    model::{app_state::AppState, ui_state::UIState},
    registry::{discovery::build_from_dir, loader::LoaderRegistry},
    view::ui::UIRenderer,
};

type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    setup_panic_handler();

    let app = App::new()
        .await
        .context("Failed to initialize application")?;
    app.run().await.context("Application runtime error")?;

    info!("Application exited cleanly");
    Ok(())
}

struct App {
    terminal: AppTerminal,
    event_loop: EventLoop,
    state: AppState,
    action_dispatcher: ActionDispatcher,
    ui_renderer: UIRenderer,
    cache: SourceCache,
    shutdown: Arc<Notify>,
}

impl App {
    async fn new() -> Result<Self> {
        // first argument, if any, is an explicit config file
        let config = match std::env::args().nth(1).map(PathBuf::from) {
            Some(path) => Config::load_from(&path)
                .await
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::load().await.unwrap_or_else(|e| {
                eprintln!("Failed to load config, using defaults: {e}");
                Config::default()
            }),
        };

        Logger::init_tracing(&config.logging).context("Failed to initialize logging")?;
        info!("Starting sample browser");

        let catalog: Catalog = match &config.manifest {
            Some(path) => manifest::load(path)
                .await
                .with_context(|| format!("Failed to load manifest {}", path.display()))?,
            None => builtin(),
        };
        info!("Catalog ready: {} entries", catalog.len());

        let cache = SourceCache::new();
        let (registry, startup_error) = match build_from_dir(
            &config.samples_dir,
            &config.asset_pattern,
            &config.virtual_base,
            &cache,
        ) {
            Ok(registry) => (registry, None),
            Err(e) => {
                warn!("Asset discovery failed, continuing without loaders: {}", e);
                (LoaderRegistry::builder(config.virtual_base.as_str()).build(), Some(e))
            }
        };

        let audit = registry.audit(&catalog);
        if !audit.is_clean() {
            warn!(
                "Registry drift: {} entries without loaders, {} unused assets",
                audit.missing_loaders.len(),
                audit.orphan_assets.len()
            );
        }
        audit
            .enforce(config.strict_registry)
            .context("Loader registry does not cover the catalog")?;

        let (task_tx, task_rx) = mpsc::unbounded_channel::<TaskResult>();
        let mut state = AppState::new(
            catalog,
            Arc::new(registry),
            config.load_timeout,
            UIState::new(config.info_dismiss_ms),
            task_tx,
        );
        state.report_registry_drift(&audit);
        if let Some(e) = startup_error {
            state.report_error(&e);
        }

        let event_loop = EventLoop::new(task_rx, config.tick_rate);
        let terminal = setup_terminal().context("Failed to initialize terminal")?;

        info!("Application initialized successfully");

        Ok(Self {
            terminal,
            event_loop,
            state,
            action_dispatcher: ActionDispatcher::new(),
            ui_renderer: UIRenderer::new(),
            cache,
            shutdown: Arc::new(Notify::new()),
        })
    }

    async fn run(mut self) -> Result<()> {
        self.setup_shutdown_handler();
        info!("Starting event loop");

        loop {
            self.render()?;

            tokio::select! {
                _ = self.shutdown.notified() => {
                    info!("Shutdown signal received");
                    break;
                }

                maybe_action = self.event_loop.next_action(self.state.input_mode()) => {
                    let Some(action) = maybe_action else {
                        info!("All event sources closed");
                        break;
                    };
                    if !self.action_dispatcher.handle(&mut self.state, action) {
                        break;
                    }
                }
            }
        }

        self.log_final_metrics();
        info!("Event loop terminated cleanly");
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        if !self.state.redraw {
            return Ok(());
        }

        let start = Instant::now();
        let renderer = &mut self.ui_renderer;
        let state = &mut self.state;
        self.terminal
            .draw(|frame: &mut Frame<'_>| renderer.render(frame, state))
            .map_err(|e| AppError::Terminal(e.to_string()))
            .context("Failed to draw terminal")?;
        self.state.redraw = false;

        let duration = start.elapsed();
        if duration.as_millis() > 16 {
            warn!("Slow render: {}ms (target: <16ms)", duration.as_millis());
        }
        Ok(())
    }

    fn log_final_metrics(&self) {
        let dispatcher = self.action_dispatcher.stats();
        let render = self.ui_renderer.stats();
        let cache = self.cache.stats();

        info!("Final metrics:");
        info!(
            "  Actions: {}, selections: {}, load results: {}",
            dispatcher.total_actions, dispatcher.selections, dispatcher.task_results
        );
        info!("  Frames: {}, slow frames: {}", render.frames, render.slow);
        info!(
            "  Source cache: {} hits, {} misses, {} failed loads",
            cache.hits, cache.misses, cache.load_exceptions
        );
    }

    fn setup_shutdown_handler(&self) {
        let shutdown: Arc<Notify> = self.shutdown.clone();

        tokio::spawn(async move {
            #[cfg(unix)]
            {
                use tokio::signal::unix::{SignalKind, signal};

                let mut sigterm = match signal(SignalKind::terminate()) {
                    Ok(s) => s,
                    Err(e) => {
                        warn!("Failed to create SIGTERM handler: {}", e);
                        return;
                    }
                };

                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM"),
                    _ = signal::ctrl_c() => info!("Received Ctrl+C"),
                }
            }

            #[cfg(not(unix))]
            {
                if let Err(e) = signal::ctrl_c().await {
                    warn!("Failed to listen for Ctrl+C: {}", e);
                    return;
                }
                info!("Received Ctrl+C");
            }

            shutdown.notify_one();
        });
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Err(e) = cleanup_terminal(&mut self.terminal) {
            warn!("Failed to cleanup terminal: {}", e);
        }
    }
}

fn setup_terminal() -> Result<AppTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    info!("Terminal setup complete");
    Ok(terminal)
}

fn cleanup_terminal(terminal: &mut AppTerminal) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!("Terminal cleanup complete");
    Ok(())
}

fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);

        error!("Application panicked: {}", panic_info);
        original_hook(panic_info);
    }));
}
