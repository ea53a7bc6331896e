//! Fixed-rate snake jobs with per-job cancellation
//!
//! Every snake gets one repeating job on the shared runtime. The job fires
//! immediately and then at the snake's own period; missed ticks are skipped
//! rather than bursted, so a slow tick never causes a catch-up stampede and
//! a single snake never has two ticks in flight. Jobs are cancelled by
//! aborting their task, individually or all at once when the display
//! surface goes away.

use crate::SnakeId;
use log::{debug, error};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// What one scheduled tick accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The snake moved; a repaint is due.
    Advanced,
    /// No square was available this tick; nothing changed.
    Skipped,
}

/// Failure inside one scheduled tick. The job stays alive either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickError {
    /// A lock guarding shared state was poisoned by a panic elsewhere.
    Poisoned(&'static str),
}

impl fmt::Display for TickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickError::Poisoned(what) => write!(f, "poisoned {} lock", what),
        }
    }
}

impl std::error::Error for TickError {}

/// Runs one repeating job per snake and publishes redraw signals.
pub struct PeriodicScheduler {
    handle: Handle,
    redraw: watch::Sender<()>,
    jobs: Mutex<HashMap<SnakeId, JoinHandle<()>>>,
}

impl PeriodicScheduler {
    pub fn new(handle: Handle) -> Self {
        let (redraw, _) = watch::channel(());
        PeriodicScheduler {
            handle,
            redraw,
            jobs: Mutex::new(HashMap::new()),
        }
    }

    /// Subscribes to the payload-free "repaint now" signal. Signals
    /// coalesce; a consumer that looks late sees a single pending change.
    pub fn redraw_watch(&self) -> watch::Receiver<()> {
        self.redraw.subscribe()
    }

    /// Starts the repeating job for `id`, firing immediately and then every
    /// `period`. A job already registered under `id` is aborted first.
    ///
    /// The tick callback decides what happened: `Advanced` publishes a
    /// redraw signal, `Skipped` stays quiet, and an error is logged without
    /// stopping the job.
    pub fn schedule<F>(&self, id: SnakeId, period: Duration, mut tick: F)
    where
        F: FnMut() -> Result<TickOutcome, TickError> + Send + 'static,
    {
        let redraw = self.redraw.clone();
        let job = self.handle.spawn(async move {
            let mut timer = interval(period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                timer.tick().await;
                match tick() {
                    Ok(TickOutcome::Advanced) => {
                        redraw.send_replace(());
                    }
                    Ok(TickOutcome::Skipped) => {}
                    Err(e) => error!("Snake {} tick failed: {}", id, e),
                }
            }
        });

        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(old) = jobs.insert(id, job) {
            debug!("Replacing job for snake {}", id);
            old.abort();
        }
    }

    /// Aborts the job of `id`. Returns whether a job was registered. The
    /// abort is best-effort and never waits for an in-flight tick.
    pub fn cancel(&self, id: SnakeId) -> bool {
        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        match jobs.remove(&id) {
            Some(job) => {
                job.abort();
                debug!("Cancelled job for snake {}", id);
                true
            }
            None => false,
        }
    }

    /// Aborts every job. Returns how many were registered.
    pub fn cancel_all(&self) -> usize {
        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        let cancelled = jobs.len();
        for (_, job) in jobs.drain() {
            job.abort();
        }
        cancelled
    }

    /// Number of registered jobs.
    pub fn active_jobs(&self) -> usize {
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::time::sleep;

    fn counting_job(counter: Arc<AtomicUsize>) -> impl FnMut() -> Result<TickOutcome, TickError> {
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(TickOutcome::Advanced)
        }
    }

    #[tokio::test]
    async fn test_scheduled_job_fires_repeatedly() {
        let scheduler = PeriodicScheduler::new(Handle::current());
        let counter = Arc::new(AtomicUsize::new(0));
        scheduler.schedule(1, Duration::from_millis(10), counting_job(counter.clone()));

        sleep(Duration::from_millis(120)).await;
        // The first fire is immediate; at 10ms per tick this should be well
        // past 5 by now even on a loaded machine.
        assert!(counter.load(Ordering::SeqCst) >= 5);
        assert_eq!(scheduler.active_jobs(), 1);
    }

    #[tokio::test]
    async fn test_advanced_ticks_publish_redraw() {
        let scheduler = PeriodicScheduler::new(Handle::current());
        let mut redraw = scheduler.redraw_watch();
        assert!(!redraw.has_changed().unwrap());

        let counter = Arc::new(AtomicUsize::new(0));
        scheduler.schedule(1, Duration::from_millis(10), counting_job(counter));

        tokio::time::timeout(Duration::from_secs(2), redraw.changed())
            .await
            .expect("no redraw signal within two seconds")
            .unwrap();
    }

    #[tokio::test]
    async fn test_skipped_ticks_stay_quiet() {
        let scheduler = PeriodicScheduler::new(Handle::current());
        let mut redraw = scheduler.redraw_watch();
        scheduler.schedule(1, Duration::from_millis(5), || Ok(TickOutcome::Skipped));

        sleep(Duration::from_millis(60)).await;
        assert!(!redraw.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_failing_job_stays_alive() {
        let scheduler = PeriodicScheduler::new(Handle::current());
        let attempts = Arc::new(AtomicUsize::new(0));
        let seen = attempts.clone();
        scheduler.schedule(1, Duration::from_millis(10), move || {
            seen.fetch_add(1, Ordering::SeqCst);
            Err(TickError::Poisoned("snake"))
        });

        sleep(Duration::from_millis(100)).await;
        assert!(attempts.load(Ordering::SeqCst) >= 3);
        assert_eq!(scheduler.active_jobs(), 1);
    }

    #[tokio::test]
    async fn test_cancel_stops_one_job() {
        let scheduler = PeriodicScheduler::new(Handle::current());
        let counter = Arc::new(AtomicUsize::new(0));
        scheduler.schedule(1, Duration::from_millis(10), counting_job(counter.clone()));

        sleep(Duration::from_millis(40)).await;
        assert!(scheduler.cancel(1));
        assert_eq!(scheduler.active_jobs(), 0);

        // Let any in-flight tick drain, then verify the count has settled.
        sleep(Duration::from_millis(30)).await;
        let settled = counter.load(Ordering::SeqCst);
        sleep(Duration::from_millis(50)).await;
        assert_eq!(counter.load(Ordering::SeqCst), settled);
    }

    #[tokio::test]
    async fn test_cancel_unknown_job() {
        let scheduler = PeriodicScheduler::new(Handle::current());
        assert!(!scheduler.cancel(42));
    }

    #[tokio::test]
    async fn test_cancel_all_aborts_every_job() {
        let scheduler = PeriodicScheduler::new(Handle::current());
        let counter = Arc::new(AtomicUsize::new(0));
        for id in 1..=3 {
            scheduler.schedule(id, Duration::from_millis(10), counting_job(counter.clone()));
        }
        assert_eq!(scheduler.active_jobs(), 3);

        assert_eq!(scheduler.cancel_all(), 3);
        assert_eq!(scheduler.active_jobs(), 0);

        sleep(Duration::from_millis(30)).await;
        let settled = counter.load(Ordering::SeqCst);
        sleep(Duration::from_millis(50)).await;
        assert_eq!(counter.load(Ordering::SeqCst), settled);
    }

    #[tokio::test]
    async fn test_rescheduling_replaces_previous_job() {
        let scheduler = PeriodicScheduler::new(Handle::current());
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        scheduler.schedule(1, Duration::from_millis(10), counting_job(first.clone()));
        sleep(Duration::from_millis(30)).await;
        scheduler.schedule(1, Duration::from_millis(10), counting_job(second.clone()));
        assert_eq!(scheduler.active_jobs(), 1);

        sleep(Duration::from_millis(30)).await;
        let first_settled = first.load(Ordering::SeqCst);
        sleep(Duration::from_millis(50)).await;
        assert_eq!(first.load(Ordering::SeqCst), first_settled);
        assert!(second.load(Ordering::SeqCst) >= 2);
    }

    #[test]
    fn test_tick_error_display() {
        let err = TickError::Poisoned("registry");
        assert_eq!(err.to_string(), "poisoned registry lock");
    }
}
