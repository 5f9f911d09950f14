//! Periodic countdown recomputation
//!
//! A [`CountdownTicker`] belongs to one view. It ticks once on start, then on
//! a fixed-delay interval, publishing each state on a watch channel. The
//! background task is aborted when the ticker is stopped or dropped.

use super::{Countdown, CountdownState};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Default recompute period
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(1000);

/// Cancellable periodic countdown task
pub struct CountdownTicker {
    state: watch::Receiver<CountdownState>,
    handle: Option<JoinHandle<()>>,
}

impl CountdownTicker {
    /// Spawn the ticker on the current tokio runtime
    pub fn start(countdown: Countdown, period: Duration) -> Self {
        let (tx, rx) = watch::channel(countdown.now());

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let next = countdown.now();
                tx.send_if_modified(|current| {
                    if *current == next {
                        false
                    } else {
                        *current = next;
                        true
                    }
                });

                if tx.is_closed() {
                    break;
                }
            }
        });

        Self {
            state: rx,
            handle: Some(handle),
        }
    }

    /// Receiver notified on every change of the countdown
    pub fn subscribe(&self) -> watch::Receiver<CountdownState> {
        self.state.clone()
    }

    /// Most recently computed state
    pub fn current(&self) -> CountdownState {
        *self.state.borrow()
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Cancel the task and wait for it to wind down
    pub async fn stop(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
        }
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, Utc};

    fn tomorrow() -> Countdown {
        Countdown::new(Utc::now() + ChronoDuration::days(1))
    }

    #[tokio::test]
    async fn test_ticks_immediately() {
        let ticker = CountdownTicker::start(tomorrow(), DEFAULT_TICK_PERIOD);
        let state = ticker.current();

        assert_eq!(state.days, 0);
        assert_eq!(state.hours, 23);
        assert!(!state.has_passed);
        assert!(ticker.is_running());

        ticker.stop().await;
    }

    #[tokio::test]
    async fn test_publishes_updates() {
        let ticker = CountdownTicker::start(tomorrow(), Duration::from_millis(20));
        let mut rx = ticker.subscribe();
        let first = *rx.borrow_and_update();

        // Seconds field changes at least once within a couple of seconds
        let changed = tokio::time::timeout(Duration::from_secs(3), async {
            loop {
                rx.changed().await.unwrap();
                if *rx.borrow_and_update() != first {
                    break;
                }
            }
        })
        .await;
        assert!(changed.is_ok());

        ticker.stop().await;
    }

    #[tokio::test]
    async fn test_stop_closes_channel() {
        let ticker = CountdownTicker::start(tomorrow(), Duration::from_millis(10));
        let mut rx = ticker.subscribe();

        ticker.stop().await;
        rx.borrow_and_update();

        assert!(rx.changed().await.is_err());
    }

    #[tokio::test]
    async fn test_drop_cancels_task() {
        let ticker = CountdownTicker::start(tomorrow(), Duration::from_millis(10));
        let mut rx = ticker.subscribe();
        drop(ticker);

        let closed = tokio::time::timeout(Duration::from_secs(1), async {
            while rx.changed().await.is_ok() {}
        })
        .await;
        assert!(closed.is_ok());
    }

    #[tokio::test]
    async fn test_passed_target() {
        let countdown = Countdown::new(Utc::now() - ChronoDuration::minutes(1));
        let ticker = CountdownTicker::start(countdown, Duration::from_millis(10));

        assert_eq!(ticker.current(), CountdownState::passed());
        ticker.stop().await;
    }
}
