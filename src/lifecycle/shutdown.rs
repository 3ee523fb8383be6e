//! Shutdown coordination for the function host.
//!
//! Backed by a `watch` channel holding a single "stopping" flag, so a task
//! that subscribes after shutdown was triggered still sees it.

use tokio::sync::watch;

/// Owner side: flips the host into the stopping state.
#[derive(Clone)]
pub struct Shutdown {
    stopping: watch::Sender<bool>,
}

/// Task side: resolves once the host is stopping.
#[derive(Clone)]
pub struct ShutdownSignal {
    stopping: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (stopping, _) = watch::channel(false);
        Self { stopping }
    }

    /// Hand out a signal for one long-running task.
    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            stopping: self.stopping.subscribe(),
        }
    }

    /// Start stopping. Idempotent; works with no subscribers.
    pub fn trigger(&self) {
        self.stopping.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.stopping.borrow()
    }

    /// Number of signals still held by running tasks.
    pub fn receiver_count(&self) -> usize {
        self.stopping.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Wait until shutdown is triggered. Also returns if every `Shutdown`
    /// handle is dropped, since nothing could trigger it any more.
    pub async fn recv(&mut self) {
        let _ = self.stopping.wait_for(|stopping| *stopping).await;
    }

    pub fn is_triggered(&self) -> bool {
        *self.stopping.borrow()
    }
}
