//! Subscriber registry.
//!
//! Any number of callbacks can observe the motion state. Each subscription
//! returns a handle; calling [`Subscription::unsubscribe`] removes exactly
//! that callback. Callbacks may unsubscribe (or add subscribers) while a
//! publish is running; removals take effect before the next publish.

use crate::MotionState;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Callback = Box<dyn FnMut(&MotionState) + Send>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<(u64, Callback)>,
    publishing: bool,
    removed_during_publish: Vec<u64>,
    cleared_during_publish: bool,
}

/// Shared list of subscriber callbacks.
#[derive(Clone, Default)]
pub(crate) struct Subscribers {
    inner: Arc<Mutex<Registry>>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Subscribers {
    pub(crate) fn add(&self, callback: Callback) -> Subscription {
        let mut reg = lock(&self.inner);
        reg.next_id += 1;
        let id = reg.next_id;
        reg.entries.push((id, callback));
        Subscription {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Invoke every callback with `state`.
    ///
    /// Callbacks run without the registry lock held.
    pub(crate) fn publish(&self, state: &MotionState) {
        let mut entries = {
            let mut reg = lock(&self.inner);
            reg.publishing = true;
            std::mem::take(&mut reg.entries)
        };

        for (_, callback) in entries.iter_mut() {
            callback(state);
        }

        let mut reg = lock(&self.inner);
        reg.publishing = false;
        let removed = std::mem::take(&mut reg.removed_during_publish);
        if std::mem::take(&mut reg.cleared_during_publish) {
            entries.clear();
        }
        // Subscribers added mid-publish go after the existing ones.
        let added = std::mem::take(&mut reg.entries);
        entries.extend(added);
        entries.retain(|(id, _)| !removed.contains(id));
        reg.entries = entries;
    }

    pub(crate) fn len(&self) -> usize {
        lock(&self.inner).entries.len()
    }

    pub(crate) fn clear(&self) {
        let mut reg = lock(&self.inner);
        if reg.publishing {
            reg.cleared_during_publish = true;
        }
        reg.entries.clear();
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.len())
            .finish()
    }
}

/// Handle returned by [`MotionEngine::subscribe`](crate::MotionEngine::subscribe).
///
/// Dropping the handle does not unsubscribe.
#[must_use = "keep the handle to be able to unsubscribe"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Remove this subscriber. A no-op if the engine is already gone.
    pub fn unsubscribe(self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut reg = lock(&registry);
        if reg.publishing {
            reg.removed_during_publish.push(self.id);
        }
        reg.entries.retain(|(id, _)| *id != self.id);
    }
}
