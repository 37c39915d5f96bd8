//! Identified, cancelable delayed tasks.
//!
//! Every simulated asynchronous operation (video upload, payment, chat reply,
//! expert hand-off) runs as a task that sleeps for a fixed delay and then
//! executes its continuation. A delay always succeeds; the only way a task
//! does not run is cancellation.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use uuid::Uuid;

/// Identifier handed out for every scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s.trim()).ok().map(Self)
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskKind {
    VideoUpload,
    Payment,
    ChatReply,
    ExpertHandoff,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    pub id: TaskId,
    pub kind: TaskKind,
    pub delay: Duration,
    pub scheduled_at: DateTime<Utc>,
}

struct ScheduledTask {
    info: TaskInfo,
    cancel: CancellationToken,
}

type Registry = Arc<Mutex<HashMap<TaskId, ScheduledTask>>>;

fn lock(registry: &Registry) -> MutexGuard<'_, HashMap<TaskId, ScheduledTask>> {
    // The map stays consistent even if a holder panicked.
    registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Runs delayed continuations on the tokio runtime.
///
/// Tasks are fire-and-forget unless cancelled by id. Nothing prevents the
/// same kind of task from being scheduled twice; callers that need an
/// in-flight guard keep it themselves.
pub struct TaskScheduler {
    tasks: Registry,
    root: CancellationToken,
    tracker: TaskTracker,
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(Mutex::new(HashMap::new())),
            root: CancellationToken::new(),
            tracker: TaskTracker::new(),
        }
    }

    /// Runs `continuation` after `delay` unless the task is cancelled first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F, Fut>(&self, kind: TaskKind, delay: Duration, continuation: F) -> TaskId
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let id = TaskId::new();
        let cancel = self.root.child_token();
        let info = TaskInfo {
            id,
            kind,
            delay,
            scheduled_at: Utc::now(),
        };

        // Registered before spawning so a zero-delay task always finds itself.
        lock(&self.tasks).insert(
            id,
            ScheduledTask {
                info,
                cancel: cancel.clone(),
            },
        );

        let registry = Arc::clone(&self.tasks);
        self.tracker.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("[TaskScheduler] {} task {} cancelled", kind, id);
                    lock(&registry).remove(&id);
                }
                _ = tokio::time::sleep(delay) => {
                    // Whoever removes the entry owns the task. A `cancel` that
                    // won the race after the sleep elapsed still prevents the run.
                    let claimed = lock(&registry).remove(&id).is_some();
                    if !claimed {
                        tracing::debug!("[TaskScheduler] {} task {} cancelled as it fired", kind, id);
                        return;
                    }
                    tracing::debug!("[TaskScheduler] {} task {} fired after {:?}", kind, id, delay);
                    continuation().await;
                }
            }
        });

        tracing::debug!("[TaskScheduler] Scheduled {} task {} in {:?}", kind, id, delay);
        id
    }

    /// Cancels a pending task. Returns `false` if it already fired, was
    /// already cancelled, or never existed.
    pub fn cancel(&self, id: TaskId) -> bool {
        let removed = lock(&self.tasks).remove(&id);
        match removed {
            Some(task) => {
                task.cancel.cancel();
                tracing::info!("[TaskScheduler] Cancelled {} task {}", task.info.kind, id);
                true
            }
            None => false,
        }
    }

    /// Tasks that have not fired yet, oldest first.
    pub fn pending(&self) -> Vec<TaskInfo> {
        let mut infos: Vec<TaskInfo> = lock(&self.tasks).values().map(|t| t.info.clone()).collect();
        infos.sort_by_key(|info| info.scheduled_at);
        infos
    }

    /// Waits until every task, including ones scheduled by continuations
    /// while waiting, has fired or been cancelled.
    pub async fn wait_idle(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }

    /// Cancels every pending task. Later `schedule` calls are cancelled
    /// immediately.
    pub async fn shutdown(&self) {
        self.root.cancel();
        let cancelled = {
            let mut tasks = lock(&self.tasks);
            let n = tasks.len();
            tasks.clear();
            n
        };
        self.wait_idle().await;
        tracing::info!("[TaskScheduler] Shut down, {} pending task(s) cancelled", cancelled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_task_fires_after_delay() {
        let scheduler = TaskScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        scheduler
            .schedule(TaskKind::ChatReply, Duration::from_millis(1500), move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        assert_eq!(scheduler.pending().len(), 1);
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        scheduler.wait_idle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(scheduler.pending().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_task_never_fires() {
        let scheduler = TaskScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        let id = scheduler
            .schedule(TaskKind::ExpertHandoff, Duration::from_secs(2), move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        scheduler.wait_idle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deregistered_task_does_not_run_after_delay() {
        let scheduler = TaskScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        let id = scheduler
            .schedule(TaskKind::VideoUpload, Duration::from_secs(3), move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        // A cancel that removed the entry without the token reaching the
        // task before its sleep elapsed.
        assert!(lock(&scheduler.tasks).remove(&id).is_some());
        scheduler.wait_idle().await;

        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(!scheduler.cancel(id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeat_submissions_are_not_deduplicated() {
        let scheduler = TaskScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let counter = Arc::clone(&fired);
            scheduler
                .schedule(TaskKind::Payment, Duration::from_secs(3), move || async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                });
        }

        scheduler.wait_idle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_everything() {
        let scheduler = TaskScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        for kind in [TaskKind::VideoUpload, TaskKind::Payment] {
            let counter = Arc::clone(&fired);
            scheduler
                .schedule(kind, Duration::from_secs(3), move || async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                });
        }

        scheduler.shutdown().await;
        assert!(scheduler.pending().is_empty());
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_task_id_roundtrip_through_display() {
        let id = TaskId::new();
        assert_eq!(TaskId::parse(&id.to_string()), Some(id));
        assert_eq!(TaskId::parse("not-a-uuid"), None);
    }
}
