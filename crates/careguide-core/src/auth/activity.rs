use chrono::Utc;
use tracing::debug;

use crate::storage::Storage;

use super::session::LAST_ACTIVITY_KEY;

/// Records the timestamp of the most recent user interaction.
///
/// Owns reads and writes of the session store's last-activity key. The
/// store consults it to decide expiry; the client calls `record` (via
/// `SessionStore::touch`) on qualifying interactions. Writes are
/// fire-and-forget - a failed write just means the session expires on
/// its original schedule.
pub struct ActivityTracker<S: Storage> {
    storage: S,
}

impl<S: Storage> ActivityTracker<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Stamp the last-activity timestamp with the current time.
    pub fn record(&self) {
        let now = Utc::now().timestamp_millis();
        if let Err(e) = self.storage.set(LAST_ACTIVITY_KEY, &now.to_string()) {
            debug!(error = %e, "Failed to record activity timestamp");
        }
    }

    /// The stored timestamp in milliseconds since epoch, `None` when
    /// unset or unparsable.
    pub fn last_activity(&self) -> Option<i64> {
        let raw = match self.storage.get(LAST_ACTIVITY_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                debug!(error = %e, "Failed to read activity timestamp");
                return None;
            }
        };
        raw.trim().parse().ok()
    }

    /// Drop the stored timestamp.
    pub fn clear(&self) {
        if let Err(e) = self.storage.remove(LAST_ACTIVITY_KEY) {
            debug!(error = %e, "Failed to clear activity timestamp");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_record_then_read_back() {
        let tracker = ActivityTracker::new(MemoryStorage::new());
        assert!(tracker.last_activity().is_none());

        let before = Utc::now().timestamp_millis();
        tracker.record();
        let recorded = tracker.last_activity().unwrap();
        assert!(recorded >= before);
    }

    #[test]
    fn test_repeated_records_never_go_backwards() {
        let tracker = ActivityTracker::new(MemoryStorage::new());

        tracker.record();
        let first = tracker.last_activity().unwrap();
        tracker.record();
        let second = tracker.last_activity().unwrap();
        assert!(second >= first);
    }

    #[test]
    fn test_garbage_timestamp_reads_as_none() {
        let storage = MemoryStorage::new();
        let tracker = ActivityTracker::new(storage.clone());

        storage.set(LAST_ACTIVITY_KEY, "yesterday").unwrap();
        assert!(tracker.last_activity().is_none());
    }

    #[test]
    fn test_clear() {
        let tracker = ActivityTracker::new(MemoryStorage::new());
        tracker.record();
        tracker.clear();
        assert!(tracker.last_activity().is_none());

        // Clearing again is fine
        tracker.clear();
    }
}
