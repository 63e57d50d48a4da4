//! Ticker Actor: Dedicated thread for generating release ticks.
//!
//! This actor provides the fixed cadence that drains the token buffer.
//! It decouples pacing from the session loop so the buffer itself never
//! holds a timer.

use crate::error::Result;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Reference release cadence, tuned for reading speed.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(210);

/// Shortest accepted period; a zero interval would never advance the deadline.
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// A tick event sent at regular intervals.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    /// Tick number (monotonically increasing).
    pub frame: u64,
    /// Time elapsed since the ticker was started.
    pub elapsed: Duration,
}

/// Ticker actor that generates regular timing events.
pub struct TickerActor {
    /// Handle to the ticker thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Receiver for tick events.
    tick_rx: Receiver<Tick>,
    /// Configured period.
    interval: Duration,
}

impl TickerActor {
    /// Spawn a new ticker actor with the given interval.
    ///
    /// # Arguments
    ///
    /// * `interval` - Time between ticks (e.g., 210ms for the reference pace).
    ///   Clamped to at least 1ms.
    pub fn spawn(interval: Duration) -> Result<Self> {
        let interval = interval.max(MIN_TICK_INTERVAL);
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        // Bounded channel with small buffer - a stalled consumer must not
        // get a burst of queued ticks later
        let (tick_tx, tick_rx) = bounded(2);

        let handle = thread::Builder::new()
            .name("pacer-ticker".to_string())
            .spawn(move || {
                Self::run_loop(&tick_tx, &shutdown_clone, interval);
            })?;

        tracing::debug!(interval_ms = interval.as_millis(), "ticker started");

        Ok(Self {
            handle: Some(handle),
            shutdown,
            tick_rx,
            interval,
        })
    }

    /// Get a reference to the tick receiver.
    ///
    /// Use this with `select!` alongside the transport receiver.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<Tick> {
        &self.tick_rx
    }

    /// The configured tick period.
    #[inline]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Signal the ticker to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Whether shutdown has been requested.
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    /// Wait for the ticker thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main ticker loop.
    fn run_loop(tick_tx: &Sender<Tick>, shutdown: &Arc<AtomicBool>, interval: Duration) {
        let start = Instant::now();
        let mut frame = 0u64;
        let mut next_tick = start + interval;

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            let now = Instant::now();
            if now >= next_tick {
                let tick = Tick {
                    frame,
                    elapsed: now - start,
                };

                // Skip the tick if the consumer is behind
                match tick_tx.try_send(tick) {
                    Ok(()) | Err(crossbeam_channel::TrySendError::Full(_)) => {}
                    Err(crossbeam_channel::TrySendError::Disconnected(_)) => break,
                }

                frame += 1;
                next_tick += interval;

                // Behind schedule: realign instead of catching up
                if next_tick < now {
                    next_tick = now + interval;
                }
            } else {
                let sleep_duration = next_tick - now;
                thread::sleep(sleep_duration.min(Duration::from_millis(5)));
            }
        }

        tracing::debug!(frames = frame, "ticker stopped");
    }
}

impl Drop for TickerActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_basic() {
        let ticker = TickerActor::spawn(Duration::from_millis(10)).unwrap();

        let tick = ticker.receiver().recv_timeout(Duration::from_millis(200));
        assert_eq!(tick.unwrap().frame, 0);

        let tick2 = ticker.receiver().recv_timeout(Duration::from_millis(200));
        assert!(tick2.is_ok());

        ticker.join();
    }

    #[test]
    fn test_ticker_default_interval() {
        assert_eq!(DEFAULT_TICK_INTERVAL, Duration::from_millis(210));
        let ticker = TickerActor::spawn(DEFAULT_TICK_INTERVAL).unwrap();
        assert_eq!(ticker.interval(), DEFAULT_TICK_INTERVAL);
        ticker.join();
    }

    #[test]
    fn test_ticker_clamps_zero_interval() {
        let ticker = TickerActor::spawn(Duration::ZERO).unwrap();
        assert_eq!(ticker.interval(), Duration::from_millis(1));

        let first = ticker.receiver().recv_timeout(Duration::from_millis(200)).unwrap();
        let second = ticker.receiver().recv_timeout(Duration::from_millis(200)).unwrap();
        assert!(second.frame > first.frame);
        assert!(second.elapsed >= Duration::from_millis(1));
        ticker.join();
    }

    #[test]
    fn test_ticker_shutdown_stops_ticks() {
        let ticker = TickerActor::spawn(Duration::from_millis(5)).unwrap();
        let rx = ticker.receiver().clone();
        ticker.join();

        // Drain whatever was buffered before shutdown, then nothing more
        while rx.try_recv().is_ok() {}
        thread::sleep(Duration::from_millis(30));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_ticker_does_not_queue_up() {
        let ticker = TickerActor::spawn(Duration::from_millis(5)).unwrap();
        thread::sleep(Duration::from_millis(50));

        let mut backlog = 0;
        while ticker.receiver().try_recv().is_ok() {
            backlog += 1;
        }
        assert!(backlog <= 2);
        ticker.join();
    }
}
