//! Trailing-edge debouncing for search input.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Default quiet period before a search term is applied.
pub const DEFAULT_QUIET: Duration = Duration::from_millis(300);

/// Forwards only the latest submitted value, once no newer value has
/// arrived for the quiet period.
///
/// Dropping the handle closes the channel; a value still waiting is
/// delivered to the sink right away.
#[derive(Debug)]
pub struct Debouncer<T> {
    tx: Option<mpsc::UnboundedSender<T>>,
    task: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the debouncing task on the current tokio runtime.
    pub fn spawn<F>(quiet: Duration, mut sink: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();

        let task = tokio::spawn(async move {
            while let Some(first) = rx.recv().await {
                let mut pending = first;
                loop {
                    tokio::select! {
                        next = rx.recv() => match next {
                            Some(value) => pending = value,
                            None => {
                                sink(pending);
                                return;
                            }
                        },
                        _ = tokio::time::sleep(quiet) => {
                            sink(pending);
                            break;
                        }
                    }
                }
            }
        });

        Self {
            tx: Some(tx),
            task: Some(task),
        }
    }

    /// Submit a value, restarting the quiet period.
    ///
    /// Returns false once the debouncer has shut down.
    pub fn submit(&self, value: T) -> bool {
        match &self.tx {
            Some(tx) => tx.send(value).is_ok(),
            None => false,
        }
    }

    /// Flush any pending value and wait for the task to finish.
    pub async fn shutdown(mut self) {
        self.tx.take();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}
