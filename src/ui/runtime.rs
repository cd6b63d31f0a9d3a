use std::io::{self, Stdout};
use std::sync::mpsc::RecvTimeoutError;
use std::time::{Duration, Instant};

use anyhow::Context;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::config::Config;
use crate::feed::{FeedClient, FeedPoller, ThumbnailLoader};
use crate::shutdown::{ShutdownCoordinator, ShutdownPhase};
use crate::store::Store;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::{handle_key, handle_mouse};
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use crate::ui::tile::{THUMB_COLS, THUMB_ROWS};

/// Runs the viewer until the user quits or SIGINT arrives.
///
/// Network tasks run on a tokio runtime; the store, the app state and all
/// rendering stay on this thread.
pub fn run(config: &Config) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("photofeed-worker")
        .build()
        .context("failed to start async runtime")?;
    let coordinator = ShutdownCoordinator::new();
    let client = FeedClient::new(&config.feed).context("failed to build feed client")?;
    let tick_rate = Duration::from_millis(config.ui.tick_rate_ms);

    let (mut terminal, guard) =
        setup_terminal(config.ui.mouse).context("failed to set up terminal")?;
    let events = EventHandler::new(tick_rate, coordinator.handle());
    let mut app = App::new(Store::new());

    let poller = FeedPoller::new(client.clone(), &config.feed, coordinator.handle());
    app.attach_refresh(poller.refresh_handle());
    runtime.spawn(poller.run(events.sender()));

    if config.thumbnails.enabled {
        let (loader, requester) = ThumbnailLoader::new(
            client,
            config.thumbnails.max_concurrent,
            THUMB_COLS,
            THUMB_ROWS,
            coordinator.handle(),
        );
        app.attach_thumbnails(requester);
        runtime.spawn(loader.run(events.sender()));
    }

    let signal_tx = events.sender();
    let signal_shutdown = coordinator.handle();
    runtime.spawn(async move {
        tokio::select! {
            _ = signal_shutdown.wait() => {}
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => {
                    tracing::info!("SIGINT received");
                    let _ = signal_tx.send(AppEvent::Shutdown);
                }
                Err(err) => tracing::warn!(error = %err, "failed to listen for SIGINT"),
            },
        }
    });

    if let Ok(size) = terminal.size() {
        app.on_resize(size.width, size.height);
    }
    let result = event_loop(&mut terminal, &mut app, &events, tick_rate);

    coordinator.signal();
    coordinator.advance(ShutdownPhase::StoppingTasks);
    {
        let props = app.props();
        tracing::info!(
            images = props.total_images,
            favorites = props.total_favorites,
            dispatched = app.store().dispatched(),
            "session ended"
        );
    }
    app.teardown();
    runtime.shutdown_timeout(Duration::from_secs(1));

    coordinator.advance(ShutdownPhase::RestoringTerminal);
    drop(terminal);
    drop(guard);
    coordinator.advance(ShutdownPhase::Complete);

    result.context("terminal I/O failed")
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    events: &EventHandler,
    tick_rate: Duration,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;
        if app.should_quit() {
            return Ok(());
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Key(key)) => handle_key(app, key),
            Ok(AppEvent::Mouse(mouse)) => handle_mouse(app, mouse),
            Ok(AppEvent::Resize(cols, rows)) => app.on_resize(cols, rows),
            Ok(AppEvent::Tick) => app.on_tick(Instant::now()),
            Ok(AppEvent::Feed(event)) => app.on_feed_event(event),
            Ok(AppEvent::Thumbnail(event)) => app.on_thumbnail(event),
            Ok(AppEvent::Shutdown) => app.request_quit(),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        }
    }
}
