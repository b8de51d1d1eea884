//! Task manager for scheduled callbacks and async operations
//!
//! Every task is registered under a [`TaskKey`]. Spawning or scheduling with
//! a key that is already taken aborts the previous task first, so there is
//! at most one pending task per key. This is what makes the clock tick a
//! single re-armed callback: each `Tick` schedules the next one under the
//! same key, and stopping the clock cancels that key.
//!
//! ```ignore
//! let (action_tx, mut action_rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut tasks = TaskManager::new(action_tx);
//!
//! // Fire a tick after 30ms, replacing any pending tick
//! let time = time.clone();
//! tasks.schedule("tick", Duration::from_millis(30), async move {
//!     Action::Tick { now: time.now_ms() }
//! });
//!
//! // Stop: no further ticks
//! tasks.cancel(&TaskKey::new("tick"));
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::Action;

/// Name a task is registered under. Timer keys are usually `&'static str`
/// constants and are stored without allocating.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskKey(Cow<'static, str>);

impl TaskKey {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for TaskKey {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for TaskKey {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

/// Keyed tokio tasks that each resolve to one action.
///
/// A finished task sends its action on the channel; a cancelled one sends
/// nothing. Dropping the manager aborts everything still pending.
pub struct TaskManager<A> {
    handles: HashMap<TaskKey, AbortHandle>,
    sink: mpsc::UnboundedSender<A>,
}

impl<A> TaskManager<A>
where
    A: Action,
{
    /// `sink` receives the action each task resolves to.
    pub fn new(sink: mpsc::UnboundedSender<A>) -> Self {
        Self {
            handles: HashMap::new(),
            sink,
        }
    }

    /// Run `future` now, replacing any task registered under `key`.
    pub fn spawn<F>(&mut self, key: impl Into<TaskKey>, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        self.schedule(key, Duration::ZERO, future)
    }

    /// Run `future` once `delay` has passed, replacing any task registered
    /// under `key`.
    ///
    /// The future is not polled before the delay ends, so whatever it reads
    /// (such as the current time) is read when it fires.
    pub fn schedule<F>(&mut self, key: impl Into<TaskKey>, delay: Duration, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        let key = key.into();
        self.cancel(&key);

        let sink = self.sink.clone();
        let task = tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            // Receiver gone means the session is over
            let _ = sink.send(future.await);
        });

        self.handles.insert(key, task.abort_handle());
        self
    }

    /// No-op for unknown keys.
    pub fn cancel(&mut self, key: &TaskKey) {
        if let Some(handle) = self.handles.remove(key) {
            tracing::trace!(task = %key, "Cancelling task");
            handle.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        self.handles.drain().for_each(|(_, handle)| handle.abort());
    }

    /// Registered and not yet finished.
    pub fn is_pending(&self, key: &TaskKey) -> bool {
        self.handles
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Registered tasks, counting ones that finished but were not replaced
    /// or cancelled yet.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &TaskKey> {
        self.handles.keys()
    }
}

impl<A> Drop for TaskManager<A> {
    fn drop(&mut self) {
        self.handles.drain().for_each(|(_, handle)| handle.abort());
    }
}
