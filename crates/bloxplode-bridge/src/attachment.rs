// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The activity currently hosting the web content.
//
// Lifecycle callbacks run on the UI thread while `rumble` arrives on the
// webview's JavaScript-bridge thread, so every read hands out a clone taken
// under the lock. A caller keeps its handle alive for the whole call even if
// the activity is detached halfway through.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Holds at most one attached activity handle.
pub struct ActivitySlot<T> {
    current: Mutex<Option<T>>,
}

impl<T> ActivitySlot<T> {
    pub const fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }

    /// Attach `handle`, replacing any previous activity.
    ///
    /// `publish` runs under the lock with the new handle and whether an
    /// activity was already attached. The previous handle is returned.
    pub fn attach(&self, handle: T, publish: impl FnOnce(&T, bool)) -> Option<T> {
        let mut slot = self.lock();
        publish(&handle, slot.is_some());
        slot.replace(handle)
    }

    /// Detach the current activity, but only if `is_current` recognises it
    /// as the one being torn down. A stale `onDestroy` from an older
    /// instance leaves a newer attachment alone.
    ///
    /// `retract` runs under the lock when the detach happens.
    pub fn detach_if(&self, is_current: impl FnOnce(&T) -> bool, retract: impl FnOnce()) -> bool {
        let mut slot = self.lock();
        match slot.as_ref() {
            Some(current) if is_current(current) => {
                retract();
                *slot = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<T>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> ActivitySlot<T> {
    /// A clone of the attached handle, or `None` after teardown.
    pub fn current(&self) -> Option<T> {
        self.lock().clone()
    }
}

impl<T> Default for ActivitySlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn empty_until_attached() {
        let slot: ActivitySlot<u32> = ActivitySlot::new();
        assert!(slot.current().is_none());
        assert!(!slot.is_attached());
    }

    #[test]
    fn attach_reports_previous_activity() {
        let slot = ActivitySlot::new();
        let mut seen = Vec::new();
        assert_eq!(slot.attach(1, |_, had| seen.push(had)), None);
        assert_eq!(slot.attach(2, |_, had| seen.push(had)), Some(1));
        assert_eq!(seen, vec![false, true]);
        assert_eq!(slot.current(), Some(2));
    }

    #[test]
    fn stale_destroy_keeps_newer_activity() {
        let slot = ActivitySlot::new();
        slot.attach(1, |_, _| {});
        slot.attach(2, |_, _| {});

        let mut retracted = false;
        assert!(!slot.detach_if(|current| *current == 1, || retracted = true));
        assert!(!retracted);
        assert_eq!(slot.current(), Some(2));

        assert!(slot.detach_if(|current| *current == 2, || retracted = true));
        assert!(retracted);
        assert!(slot.current().is_none());
    }

    #[test]
    fn handle_outlives_detach() {
        let slot = ActivitySlot::new();
        slot.attach(Arc::new("activity"), |_, _| {});

        let held = slot.current().unwrap();
        slot.detach_if(|_| true, || {});

        assert!(slot.current().is_none());
        assert_eq!(*held, "activity");
        assert_eq!(Arc::strong_count(&held), 1);
    }
}
