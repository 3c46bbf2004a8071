use fuelmap_owner_api::DashboardSnapshot;
use std::sync::Arc;
use tokio::sync::watch;

/// Holds the single current value of the composite dashboard state.
///
/// The store starts absent; the first successful fetch populates it. Every
/// committed write is one atomic watch-channel commit, so readers observe
/// either the state before a mutation or after it, never a torn value, and
/// subscribers are woken exactly when the value changes.
///
/// Clones share the same underlying value.
#[derive(Clone)]
pub struct SnapshotStore {
    tx: Arc<watch::Sender<Option<DashboardSnapshot>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Clone of the current value, `None` before the first load.
    pub fn read(&self) -> Option<DashboardSnapshot> {
        self.tx.borrow().clone()
    }

    pub fn is_present(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Replace the whole value and notify subscribers.
    pub fn replace(&self, snapshot: DashboardSnapshot) {
        self.tx.send_replace(Some(snapshot));
    }

    /// Mutate the value in place if one is present. Returns whether `apply`
    /// ran; when it did not (store absent), subscribers are not notified.
    pub fn update_if_present(&self, apply: impl FnOnce(&mut DashboardSnapshot)) -> bool {
        self.update_if_present_with(apply).is_some()
    }

    /// Like [`Self::update_if_present`], but passes `apply`'s return value
    /// back out. Capture and mutation happen inside one channel commit, so
    /// no other writer can slip in between them.
    pub fn update_if_present_with<T>(
        &self,
        apply: impl FnOnce(&mut DashboardSnapshot) -> T,
    ) -> Option<T> {
        let mut out = None;
        self.tx.send_if_modified(|current| match current.as_mut() {
            Some(snapshot) => {
                out = Some(apply(snapshot));
                true
            }
            None => false,
        });
        out
    }

    /// Receiver for change notification; see [`tokio::sync::watch`].
    pub fn subscribe(&self) -> watch::Receiver<Option<DashboardSnapshot>> {
        self.tx.subscribe()
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuelmap_owner_api::DashboardStats;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_starts_absent() {
        let store = SnapshotStore::new();
        assert_eq!(store.read(), None);
        assert!(!store.is_present());
    }

    #[test]
    fn test_replace_then_read() {
        let store = SnapshotStore::new();
        let snapshot = DashboardSnapshot {
            stats: DashboardStats {
                total_stations: 3,
                ..Default::default()
            },
            ..Default::default()
        };

        store.replace(snapshot.clone());

        assert_eq!(store.read(), Some(snapshot));
    }

    #[test]
    fn test_update_while_absent_is_a_silent_no_op() {
        let store = SnapshotStore::new();
        let rx = store.subscribe();

        let ran = store.update_if_present(|s| s.stats.total_stations = 9);

        assert!(!ran);
        assert_eq!(store.read(), None);
        assert!(!rx.has_changed().expect("channel open"));
    }

    #[test]
    fn test_update_notifies_subscribers() {
        let store = SnapshotStore::new();
        store.replace(DashboardSnapshot::default());
        let rx = store.subscribe();

        let ran = store.update_if_present(|s| s.stats.total_stations = 9);

        assert!(ran);
        assert!(rx.has_changed().expect("channel open"));
        assert_eq!(
            store.read().map(|s| s.stats.total_stations),
            Some(9)
        );
    }

    #[test]
    fn test_capture_and_apply_share_one_commit() {
        let store = SnapshotStore::new();
        store.replace(DashboardSnapshot {
            stats: DashboardStats {
                total_stations: 1,
                ..Default::default()
            },
            ..Default::default()
        });

        let before = store.update_if_present_with(|s| {
            let seen = s.stats.total_stations;
            s.stats.total_stations += 1;
            seen
        });

        assert_eq!(before, Some(1));
        assert_eq!(store.read().map(|s| s.stats.total_stations), Some(2));
    }

    #[test]
    fn test_clones_share_state() {
        let store = SnapshotStore::new();
        let clone = store.clone();

        store.replace(DashboardSnapshot::default());

        assert!(clone.is_present());
    }
}
