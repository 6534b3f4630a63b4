use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    Initial,
    Refresh,
    WeekSwitch,
    EntityDetail,
}

impl LoadKind {
    /// Week switches show a loading state inside the opportunities region instead.
    pub fn shows_overlay(self) -> bool {
        !matches!(self, LoadKind::WeekSwitch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading(LoadKind),
    Ready,
}

/// Tracks in-flight loads. The overlay stays up until every overlapping load has settled.
#[derive(Debug, Default)]
pub struct LoadTracker {
    active: Mutex<Vec<(u64, LoadKind)>>,
    next_id: AtomicU64,
    started: AtomicBool,
}

impl LoadTracker {
    pub fn begin(&self, kind: LoadKind) -> LoadGuard<'_> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.started.store(true, Ordering::Relaxed);
        self.lock().push((id, kind));
        tracing::trace!(id, ?kind, "load started");
        LoadGuard { tracker: self, id }
    }

    pub fn phase(&self) -> Phase {
        if !self.started.load(Ordering::Relaxed) {
            return Phase::Idle;
        }
        match self.lock().last() {
            Some((_, kind)) => Phase::Loading(*kind),
            None => Phase::Ready,
        }
    }

    pub fn overlay_visible(&self) -> bool {
        self.lock().iter().any(|(_, kind)| kind.shows_overlay())
    }

    pub fn in_flight(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(u64, LoadKind)>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Removes its load from the tracker when dropped, on every exit path.
#[derive(Debug)]
pub struct LoadGuard<'a> {
    tracker: &'a LoadTracker,
    id: u64,
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        self.tracker.lock().retain(|(id, _)| *id != self.id);
        tracing::trace!(id = self.id, "load settled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_first_load() {
        let tracker = LoadTracker::default();
        assert_eq!(tracker.phase(), Phase::Idle);

        let guard = tracker.begin(LoadKind::Initial);
        assert_eq!(tracker.phase(), Phase::Loading(LoadKind::Initial));
        drop(guard);
        assert_eq!(tracker.phase(), Phase::Ready);
    }

    #[test]
    fn overlapping_loads_keep_overlay_up() {
        let tracker = LoadTracker::default();
        let refresh = tracker.begin(LoadKind::Refresh);
        let detail = tracker.begin(LoadKind::EntityDetail);

        drop(refresh);
        assert!(tracker.overlay_visible());
        assert_eq!(tracker.phase(), Phase::Loading(LoadKind::EntityDetail));

        drop(detail);
        assert!(!tracker.overlay_visible());
        assert_eq!(tracker.in_flight(), 0);
    }

    #[test]
    fn week_switch_does_not_raise_overlay() {
        let tracker = LoadTracker::default();
        let _week = tracker.begin(LoadKind::WeekSwitch);
        assert!(!tracker.overlay_visible());
        assert_eq!(tracker.phase(), Phase::Loading(LoadKind::WeekSwitch));
    }
}
