use tokio::sync::watch;

/// Create a linked shutdown handle and listener
pub fn shutdown_channel() -> (ShutdownHandle, ShutdownListener) {
    let (tx, rx) = watch::channel(false);
    (ShutdownHandle { tx }, ShutdownListener { rx })
}

/// Owner side of the shutdown signal
///
/// Dropping the handle counts as a shutdown request.
#[derive(Debug)]
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

impl ShutdownHandle {
    /// Ask every listener to stop
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn listener(&self) -> ShutdownListener {
        ShutdownListener {
            rx: self.tx.subscribe(),
        }
    }
}

/// Listener side, cloned into every task that must stop on request
#[derive(Debug, Clone)]
pub struct ShutdownListener {
    rx: watch::Receiver<bool>,
}

impl ShutdownListener {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolves once shutdown was triggered or the handle dropped
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }
}
