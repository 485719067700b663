//! Cancellable scheduled tasks, one slot per logical operation.
//!
//! Scheduling a key aborts whatever task was still pending under that key, so
//! a rapid repeat of the same trigger never leaves two deferred effects racing.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    /// The rotating-word typing animation loop.
    Typing,
    /// Hides the builder overlay once its fade-out finishes.
    OverlayFade,
    /// Clears the contact form's success notice.
    ContactNotice,
}

#[derive(Default)]
pub struct TimerRegistry {
    handles: Mutex<HashMap<TimerKey, JoinHandle<()>>>,
}

impl TimerRegistry {
    /// Runs `task` under `key`, aborting the previous task for that key first.
    pub fn spawn<F>(&self, key: TimerKey, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut handles = self.handles.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = handles.remove(&key) {
            if !previous.is_finished() {
                debug!("Cancelling pending {key:?} task");
            }
            previous.abort();
        }
        handles.insert(key, tokio::spawn(task));
    }

    /// Runs `action` once after `delay`, replacing any pending action for `key`.
    pub fn schedule<F>(&self, key: TimerKey, delay: Duration, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.spawn(key, async move {
            tokio::time::sleep(delay).await;
            action();
        });
    }

    /// Aborts the task for `key`. Returns true if one was still pending.
    pub fn cancel(&self, key: TimerKey) -> bool {
        let mut handles = self.handles.lock().unwrap_or_else(|e| e.into_inner());
        match handles.remove(&key) {
            Some(handle) => {
                let pending = !handle.is_finished();
                handle.abort();
                pending
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn is_pending(&self, key: TimerKey) -> bool {
        let handles = self.handles.lock().unwrap_or_else(|e| e.into_inner());
        handles.get(&key).is_some_and(|h| !h.is_finished())
    }
}

impl Drop for TimerRegistry {
    fn drop(&mut self) {
        let handles = self.handles.get_mut().unwrap_or_else(|e| e.into_inner());
        for (_, handle) in handles.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_schedule_fires_after_delay() {
        let timers = TimerRegistry::default();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        timers.schedule(TimerKey::ContactNotice, Duration::from_millis(500), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(timers.is_pending(TimerKey::ContactNotice));

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!timers.is_pending(TimerKey::ContactNotice));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rescheduling_cancels_previous() {
        let timers = TimerRegistry::default();
        let fired = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let counter = fired.clone();
            timers.schedule(TimerKey::OverlayFade, Duration::from_millis(100), move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1, "only the last trigger fires");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_reports_pending() {
        let timers = TimerRegistry::default();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        timers.schedule(TimerKey::OverlayFade, Duration::from_millis(100), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(timers.cancel(TimerKey::OverlayFade));
        assert!(!timers.cancel(TimerKey::OverlayFade));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_are_independent() {
        let timers = TimerRegistry::default();
        let fired = Arc::new(AtomicUsize::new(0));
        for key in [TimerKey::OverlayFade, TimerKey::ContactNotice] {
            let counter = fired.clone();
            timers.schedule(key, Duration::from_millis(10), move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }
}
