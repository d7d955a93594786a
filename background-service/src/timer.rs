use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, warn};

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Fixed-period refresh schedule running as its own task.
///
/// The first tick fires one full period after `spawn`. No jitter, no backoff.
/// The task stops when `on_tick` returns `false`, on `cancel`, or on drop.
#[derive(Debug)]
pub struct RefreshTimer {
    period: Duration,
    task: JoinHandle<()>,
}

impl RefreshTimer {
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let period = if period < MIN_PERIOD {
            warn!("Refresh period {:?} too small, using {:?}", period, MIN_PERIOD);
            MIN_PERIOD
        } else {
            period
        };

        let first_tick = Instant::now() + period;
        let task = tokio::spawn(async move {
            let mut interval = interval_at(first_tick, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if !on_tick() {
                    debug!("Refresh timer receiver gone, stopping");
                    break;
                }
            }
        });

        debug!("Refresh timer started with period {:?}", period);
        Self { period, task }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        let _timer = RefreshTimer::spawn(Duration::from_secs(30), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });

        tokio::time::sleep(Duration::from_secs(29)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        let timer = RefreshTimer::spawn(Duration::from_secs(30), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });

        tokio::time::sleep(Duration::from_secs(31)).await;
        timer.cancel();
        tokio::time::sleep(Duration::from_secs(300)).await;

        assert_eq!(ticks.load(Ordering::SeqCst), 1);
        assert!(timer.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_callback_declines() {
        let timer = RefreshTimer::spawn(Duration::from_secs(5), || false);
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert!(timer.is_finished());
        assert_eq!(timer.period(), Duration::from_secs(5));
    }
}
