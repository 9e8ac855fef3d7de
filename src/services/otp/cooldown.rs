use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

/// One-second countdown backed by a tokio task.
///
/// The task stops itself at zero and is aborted on `cancel`, on restart and
/// on drop, so a torn-down widget never keeps ticking.
pub struct Cooldown {
    remaining: Arc<AtomicU32>,
    ticks: broadcast::Sender<u32>,
    task: Option<JoinHandle<()>>,
}

impl Cooldown {
    pub fn new() -> Self {
        let (ticks, _) = broadcast::channel(64);
        Self {
            remaining: Arc::new(AtomicU32::new(0)),
            ticks,
            task: None,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining.load(Ordering::SeqCst)
    }

    pub fn is_active(&self) -> bool {
        self.remaining() > 0
    }

    /// Receives the remaining seconds after every tick.
    pub fn subscribe(&self) -> broadcast::Receiver<u32> {
        self.ticks.subscribe()
    }

    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, seconds: u32) {
        self.cancel();
        self.remaining.store(seconds, Ordering::SeqCst);
        let _ = self.ticks.send(seconds);
        if seconds == 0 {
            return;
        }

        let remaining = Arc::clone(&self.remaining);
        let ticks = self.ticks.clone();
        self.task = Some(tokio::spawn(async move {
            let period = Duration::from_secs(1);
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                let before = remaining
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| Some(v.saturating_sub(1)))
                    .unwrap_or(0);
                let left = before.saturating_sub(1);
                let _ = ticks.send(left);
                if left == 0 {
                    break;
                }
            }
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Default for Cooldown {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Cooldown {
    fn drop(&mut self) {
        self.cancel();
    }
}
