use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event as CEvent, KeyEvent};

const INPUT_POLL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    /// Clock tick driving the status engine.
    Tick,
    /// Banner and donation carousel step.
    Rotate,
}

/// Sends `event` every `period` until dropped. Dropping stops the thread
/// and waits for it.
pub struct Ticker {
    stop: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn<T>(period: Duration, tx: mpsc::Sender<T>, event: T) -> Self
    where
        T: Clone + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(period) {
                Err(RecvTimeoutError::Timeout) => {
                    if tx.send(event.clone()).is_err() {
                        break;
                    }
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });
        Self {
            stop: Some(stop_tx),
            handle: Some(handle),
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        drop(self.stop.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Forwards key presses from the terminal until dropped.
struct InputReader {
    stop: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl InputReader {
    fn spawn(tx: mpsc::Sender<Event>) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || loop {
            match stop_rx.try_recv() {
                Err(TryRecvError::Empty) => {}
                Ok(()) | Err(TryRecvError::Disconnected) => break,
            }
            if !event::poll(INPUT_POLL).unwrap_or(false) {
                continue;
            }
            match event::read() {
                Ok(CEvent::Key(key)) => {
                    if tx.send(Event::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    log::debug!("Terminal input closed: {}", e);
                    break;
                }
            }
        });
        Self {
            stop: Some(stop_tx),
            handle: Some(handle),
        }
    }
}

impl Drop for InputReader {
    fn drop(&mut self) {
        drop(self.stop.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    _input: InputReader,
    _tick: Ticker,
    _rotate: Ticker,
}

impl EventHandler {
    pub fn new(tick: Duration, rotation: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            _tick: Ticker::spawn(tick, tx.clone(), Event::Tick),
            _rotate: Ticker::spawn(rotation, tx.clone(), Event::Rotate),
            _input: InputReader::spawn(tx),
            rx,
        }
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_repeats_until_dropped() {
        let (tx, rx) = mpsc::channel();
        let ticker = Ticker::spawn(Duration::from_millis(5), tx, 7u8);

        assert_eq!(rx.recv_timeout(Duration::from_secs(2)), Ok(7));
        assert_eq!(rx.recv_timeout(Duration::from_secs(2)), Ok(7));
        drop(ticker);

        // The thread has been joined, so its sender is gone.
        while rx.try_recv().is_ok() {}
        assert!(rx.recv().is_err());
    }

    #[test]
    fn ticker_stops_when_receiver_goes_away() {
        let (tx, rx) = mpsc::channel();
        let ticker = Ticker::spawn(Duration::from_millis(1), tx, ());
        drop(rx);
        // Drop must not hang even though the thread already exited.
        drop(ticker);
    }

    #[test]
    fn slow_ticker_is_cancelled_promptly() {
        let (tx, rx) = mpsc::channel::<()>();
        let started = std::time::Instant::now();
        let ticker = Ticker::spawn(Duration::from_secs(60), tx, ());
        drop(ticker);
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(rx.try_recv().is_err());
    }
}
