//! Task manager for the locate/forecast/place side effects
//!
//! At most one task runs per [`TaskKey`]: spawning under a key aborts the task
//! already registered there, so a new location supersedes in-flight fetches
//! for the old one. Tasks send their result action back through the action
//! channel; a task resolving to `None` sends nothing.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::action::Action;

/// Identifies a task slot
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TaskKey {
    Locate,
    Forecast,
    Place,
}

impl TaskKey {
    pub fn name(&self) -> &'static str {
        match self {
            TaskKey::Locate => "locate",
            TaskKey::Forecast => "forecast",
            TaskKey::Place => "place",
        }
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Manages async task lifecycle with automatic cancellation.
pub struct TaskManager {
    tasks: HashMap<TaskKey, AbortHandle>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            tasks: HashMap::new(),
            action_tx,
        }
    }

    /// Spawn a task, cancelling any existing task with the same key.
    ///
    /// The future resolves to an action or `Option<Action>`. Must be called
    /// from within a tokio runtime.
    pub fn spawn<F, R>(&mut self, key: TaskKey, future: F) -> &mut Self
    where
        F: Future<Output = R> + Send + 'static,
        R: Into<Option<Action>> + Send + 'static,
    {
        if self.cancel(key) {
            tracing::debug!(task = %key, "superseded running task");
        }

        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            if let Some(action) = future.await.into() {
                // receiver is gone during shutdown
                let _ = tx.send(action);
            }
        });

        self.tasks.insert(key, handle.abort_handle());
        self
    }

    /// Cancel a task by key. Returns true if an unfinished task was aborted.
    pub fn cancel(&mut self, key: TaskKey) -> bool {
        match self.tasks.remove(&key) {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    /// Cancel all running tasks.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    /// Check if a task with the given key is still running.
    pub fn is_running(&self, key: TaskKey) -> bool {
        self.tasks
            .get(&key)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Number of unfinished tasks.
    pub fn len(&self) -> usize {
        self.tasks.values().filter(|h| !h.is_finished()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn running_keys(&self) -> impl Iterator<Item = TaskKey> + '_ {
        self.tasks
            .iter()
            .filter(|(_, handle)| !handle.is_finished())
            .map(|(key, _)| *key)
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    async fn recv(rx: &mut mpsc::UnboundedReceiver<Action>) -> Action {
        tokio::time::timeout(Duration::from_millis(200), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed")
    }

    #[test]
    fn test_task_key_names() {
        assert_eq!(TaskKey::Locate.to_string(), "locate");
        assert_eq!(TaskKey::Forecast.name(), "forecast");
        assert_eq!(TaskKey::Place.name(), "place");
    }

    #[tokio::test]
    async fn test_spawn_sends_action() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn(TaskKey::Locate, async { Action::LocateRequest });

        assert_eq!(recv(&mut rx).await, Action::LocateRequest);
    }

    #[tokio::test]
    async fn test_spawn_none_sends_nothing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn(TaskKey::Place, async { None::<Action> });

        let result = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_spawn_cancels_previous() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);
        let counter = Arc::new(AtomicUsize::new(0));

        let c1 = counter.clone();
        tasks.spawn(TaskKey::Forecast, async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            c1.fetch_add(1, Ordering::SeqCst);
            Action::ForecastDidError {
                generation: 1,
                message: "old".into(),
            }
        });

        let c2 = counter.clone();
        tasks.spawn(TaskKey::Forecast, async move {
            c2.fetch_add(10, Ordering::SeqCst);
            Action::ForecastDidError {
                generation: 2,
                message: "new".into(),
            }
        });

        let action = recv(&mut rx).await;
        assert!(matches!(action, Action::ForecastDidError { generation: 2, .. }));

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 10);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_different_keys_run_concurrently() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks
            .spawn(TaskKey::Forecast, async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                Action::Tick
            })
            .spawn(TaskKey::Place, async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                Action::Quit
            });
        assert_eq!(tasks.len(), 2);

        let first = recv(&mut rx).await;
        let second = recv(&mut rx).await;
        assert!(matches!(
            (first, second),
            (Action::Tick, Action::Quit) | (Action::Quit, Action::Tick)
        ));
    }

    #[tokio::test]
    async fn test_cancel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn(TaskKey::Locate, async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Action::LocateRequest
        });
        assert!(tasks.is_running(TaskKey::Locate));

        assert!(tasks.cancel(TaskKey::Locate));
        assert!(!tasks.is_running(TaskKey::Locate));

        let result = tokio::time::timeout(Duration::from_millis(150), rx.recv()).await;
        assert!(matches!(result, Err(_) | Ok(None)));
    }

    #[tokio::test]
    async fn test_cancel_all() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn(TaskKey::Forecast, async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Action::Tick
        });
        tasks.spawn(TaskKey::Place, async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Action::Tick
        });
        assert_eq!(tasks.len(), 2);

        tasks.cancel_all();

        assert!(tasks.is_empty());
        assert_eq!(tasks.running_keys().count(), 0);
    }
}
