//! Cancellable periodic tick source.
//!
//! The ticker runs as a tokio task and only emits events; the owner applies
//! them on its own thread so wave state is never touched concurrently.

use anyhow::anyhow;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Default animation cadence, roughly 60 frames per second.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Ticks queued while the owner is busy. Further ticks are dropped.
const TICK_BACKLOG: usize = 8;

/// Handle to a running ticker. Stops the ticker when dropped.
#[derive(Debug)]
pub struct TickHandle {
    stop_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl TickHandle {
    /// Spawns a ticker on the current tokio runtime.
    ///
    /// The first tick fires one `interval` after the call. Returns the handle
    /// and the receiving end of the tick channel.
    ///
    /// # Errors
    /// - If called outside a tokio runtime
    /// - If `interval` is zero
    pub fn spawn(interval: Duration) -> anyhow::Result<(Self, mpsc::Receiver<Instant>)> {
        if interval.is_zero() {
            return Err(anyhow!("Tick interval must be greater than zero"));
        }

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| anyhow!("Animation ticker requires a tokio runtime: {e}"))?;

        let (tick_tx, tick_rx) = mpsc::channel(TICK_BACKLOG);
        let (stop_tx, stop_rx) = oneshot::channel();
        let task = runtime.spawn(run_ticker(interval, tick_tx, stop_rx));

        tracing::debug!("Ticker started with {}ms interval", interval.as_millis());

        Ok((
            Self {
                stop_tx: Some(stop_tx),
                task: Some(task),
            },
            tick_rx,
        ))
    }

    /// Stops the ticker. Calling this more than once has no effect.
    pub fn stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            // The task may already have exited because the receiver went away.
            let _ = stop_tx.send(());
            tracing::debug!("Ticker stopped");
        }
        self.task.take();
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_ticker(
    period: Duration,
    tick_tx: mpsc::Sender<Instant>,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = &mut stop_rx => break,
            at = interval.tick() => {
                match tick_tx.try_send(at) {
                    Ok(()) => {}
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        tracing::trace!("Tick dropped, owner is behind");
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => break,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(rx: &mut mpsc::Receiver<Instant>) -> usize {
        let mut count = 0;
        while rx.try_recv().is_ok() {
            count += 1;
        }
        count
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_at_interval() {
        let (_handle, mut rx) = TickHandle::spawn(Duration::from_millis(16)).unwrap();

        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(drain(&mut rx), 0);

        time::sleep(Duration::from_millis(40)).await;
        assert!(drain(&mut rx) >= 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_ends_ticks() {
        let (mut handle, mut rx) = TickHandle::spawn(Duration::from_millis(16)).unwrap();
        time::sleep(Duration::from_millis(40)).await;
        handle.stop();
        handle.stop();
        assert!(!handle.is_running());

        drain(&mut rx);
        time::sleep(Duration::from_millis(100)).await;
        assert_eq!(drain(&mut rx), 0);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_ticker() {
        let (handle, mut rx) = TickHandle::spawn(Duration::from_millis(16)).unwrap();
        drop(handle);

        time::sleep(Duration::from_millis(100)).await;
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_backlog_is_bounded() {
        let (_handle, mut rx) = TickHandle::spawn(Duration::from_millis(1)).unwrap();
        time::sleep(Duration::from_millis(200)).await;
        assert!(drain(&mut rx) <= TICK_BACKLOG);
    }

    #[test]
    fn test_spawn_outside_runtime_fails() {
        assert!(TickHandle::spawn(DEFAULT_TICK_INTERVAL).is_err());
    }

    #[tokio::test]
    async fn test_zero_interval_is_rejected() {
        assert!(TickHandle::spawn(Duration::ZERO).is_err());
    }
}
