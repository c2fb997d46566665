use crate::runtime::scheduler::TaskHandle;

/// Every task a scene started, so teardown can stop them in one pass.
///
/// Once sealed by [`TeardownSet::cancel_all`], any handle tracked afterwards is
/// canceled on the spot.
#[derive(Debug, Default)]
pub struct TeardownSet {
    handles: Vec<TaskHandle>,
    sealed: bool,
}

impl TeardownSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, handle: TaskHandle) {
        if self.sealed {
            handle.cancel();
            return;
        }
        self.handles.push(handle);
    }

    pub fn track_all(&mut self, handles: impl IntoIterator<Item = TaskHandle>) {
        for h in handles {
            self.track(h);
        }
    }

    /// Drop handles of tasks that already finished or were canceled elsewhere.
    pub fn prune(&mut self) {
        self.handles.retain(TaskHandle::is_live);
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Cancel everything tracked and seal the set. Returns how many tasks were
    /// still live; a second call returns 0.
    pub fn cancel_all(&mut self) -> usize {
        self.sealed = true;
        self.handles.drain(..).filter(|h| h.cancel()).count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/teardown.rs"]
mod tests;
