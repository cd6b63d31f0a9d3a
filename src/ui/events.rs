use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, MouseEvent};

use crate::feed::{EventSink, FeedEvent, ThumbnailEvent};
use crate::shutdown::ShutdownHandle;

/// Everything the UI loop reacts to, funneled through one channel.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
    Feed(FeedEvent),
    Thumbnail(ThumbnailEvent),
    /// SIGINT received or terminal input lost
    Shutdown,
}

impl From<FeedEvent> for AppEvent {
    fn from(event: FeedEvent) -> Self {
        AppEvent::Feed(event)
    }
}

impl From<ThumbnailEvent> for AppEvent {
    fn from(event: ThumbnailEvent) -> Self {
        AppEvent::Thumbnail(event)
    }
}

impl<E: Into<AppEvent> + Send + 'static> EventSink<E> for Sender<AppEvent> {
    fn deliver(&self, event: E) -> bool {
        self.send(event.into()).is_ok()
    }
}

/// Source of terminal events for the input thread.
pub trait TerminalInput {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
}

/// Reads from the real terminal through crossterm.
pub struct CrosstermInput;

impl TerminalInput for CrosstermInput {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        event::read()
    }
}

pub struct EventHandler {
    rx: Receiver<AppEvent>,
    tx: Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration, shutdown: ShutdownHandle) -> Self {
        Self::with_input(CrosstermInput, tick_rate, shutdown)
    }

    pub fn with_input<I: TerminalInput + Send + 'static>(
        input: I,
        tick_rate: Duration,
        shutdown: ShutdownHandle,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();
        thread::spawn(move || {
            input_loop(input, tick_rate, &shutdown, &event_tx);
            tracing::debug!("input thread stopped");
        });
        Self { rx, tx }
    }

    pub fn next(&self, timeout: Duration) -> Result<AppEvent, mpsc::RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }
}

fn input_loop<I: TerminalInput>(
    mut input: I,
    tick_rate: Duration,
    shutdown: &ShutdownHandle,
    event_tx: &Sender<AppEvent>,
) {
    let mut last_tick = Instant::now();
    loop {
        if shutdown.is_shutting_down() {
            return;
        }

        // Short poll so the shutdown flag is seen promptly.
        let timeout = tick_rate
            .saturating_sub(last_tick.elapsed())
            .min(Duration::from_millis(50));

        match input.poll(timeout) {
            Ok(true) => {
                let forwarded = match input.read() {
                    Ok(Event::Key(key)) => event_tx.send(AppEvent::Key(key)).is_ok(),
                    Ok(Event::Mouse(mouse)) => event_tx.send(AppEvent::Mouse(mouse)).is_ok(),
                    Ok(Event::Resize(cols, rows)) => {
                        event_tx.send(AppEvent::Resize(cols, rows)).is_ok()
                    }
                    Ok(_) => true,
                    Err(err) => {
                        tracing::error!(error = %err, "terminal read failed");
                        let _ = event_tx.send(AppEvent::Shutdown);
                        return;
                    }
                };
                if !forwarded {
                    return;
                }
            }
            Ok(false) => {}
            Err(err) => {
                tracing::error!(error = %err, "terminal poll failed");
                let _ = event_tx.send(AppEvent::Shutdown);
                return;
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if event_tx.send(AppEvent::Tick).is_err() {
                return;
            }
            last_tick = Instant::now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shutdown::ShutdownCoordinator;

    #[test]
    fn sender_sink_wraps_background_events() {
        let (tx, rx) = mpsc::channel::<AppEvent>();
        assert!(tx.deliver(FeedEvent::Fetching));
        assert!(matches!(rx.recv(), Ok(AppEvent::Feed(FeedEvent::Fetching))));

        drop(rx);
        assert!(!tx.deliver(FeedEvent::Fetching));
    }

    struct BrokenInput {
        fail_on_read: bool,
    }

    impl TerminalInput for BrokenInput {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            if self.fail_on_read {
                Ok(true)
            } else {
                Err(io::Error::other("poll failed"))
            }
        }

        fn read(&mut self) -> io::Result<Event> {
            Err(io::Error::other("read failed"))
        }
    }

    fn first_non_tick(handler: &EventHandler) -> AppEvent {
        loop {
            match handler.next(Duration::from_secs(2)) {
                Ok(AppEvent::Tick) => continue,
                Ok(event) => return event,
                Err(err) => panic!("no event from input thread: {:?}", err),
            }
        }
    }

    #[test]
    fn input_errors_request_shutdown() {
        for fail_on_read in [false, true] {
            let coordinator = ShutdownCoordinator::new();
            let handler = EventHandler::with_input(
                BrokenInput { fail_on_read },
                Duration::from_millis(10),
                coordinator.handle(),
            );
            assert!(matches!(first_non_tick(&handler), AppEvent::Shutdown));
        }
    }
}
