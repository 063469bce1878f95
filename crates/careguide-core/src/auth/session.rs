use chrono::Utc;
use tracing::{debug, warn};

use crate::models::UserProfile;
use crate::storage::Storage;

use super::ActivityTracker;

/// Storage key for the authenticated-session flag.
pub(crate) const AUTH_FLAG_KEY: &str = "careguide.authenticated";

/// Storage key for the signed-in user's identity record.
pub(crate) const USER_KEY: &str = "careguide.user";

/// Storage key for the last-activity timestamp.
pub(crate) const LAST_ACTIVITY_KEY: &str = "careguide.last_activity";

/// Value stored under the flag key while a session exists. A fixed marker,
/// not a token - credentials never live client-side.
pub(crate) const AUTH_SENTINEL: &str = "true";

/// Sessions expire after 12 hours without recorded activity.
pub(crate) const IDLE_TIMEOUT_MS: i64 = 12 * 60 * 60 * 1000;

/// Single source of truth for the client's authentication state.
///
/// The store is the sole writer of its three storage keys; everything else
/// requests state transitions through these methods. Storage failures are
/// swallowed at this boundary - a session that cannot be read or written
/// behaves as no session at all, which is always recoverable by signing
/// in again.
pub struct SessionStore<S: Storage> {
    storage: S,
    activity: ActivityTracker<S>,
}

impl<S: Storage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            activity: ActivityTracker::new(storage.clone()),
            storage,
        }
    }

    /// Open a session for `user`: identity record, flag, and a fresh
    /// activity timestamp, in that order. If any write fails the partial
    /// state is rolled back so identity and flag are never observable
    /// without each other.
    pub fn establish(&self, user: &UserProfile) {
        let encoded = match serde_json::to_string(user) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(error = %e, "Failed to encode user profile, session not established");
                return;
            }
        };

        if let Err(e) = self.storage.set(USER_KEY, &encoded) {
            debug!(error = %e, "Storage rejected user record, session not established");
            return;
        }
        if let Err(e) = self.storage.set(AUTH_FLAG_KEY, AUTH_SENTINEL) {
            debug!(error = %e, "Storage rejected session flag, rolling back");
            self.invalidate();
            return;
        }
        self.activity.record();
    }

    /// Clear all session state. Idempotent; clearing an absent session is
    /// a no-op.
    pub fn invalidate(&self) {
        if let Err(e) = self.storage.remove(AUTH_FLAG_KEY) {
            debug!(error = %e, "Failed to remove session flag");
        }
        if let Err(e) = self.storage.remove(USER_KEY) {
            debug!(error = %e, "Failed to remove user record");
        }
        self.activity.clear();
    }

    /// Check whether a live session exists: flag present, activity
    /// timestamp present, and idle time strictly under the 12-hour
    /// timeout. Every failing branch clears all session state before
    /// returning, so a stale timestamp can never resurrect a session.
    pub fn is_valid(&self) -> bool {
        let flag = match self.storage.get(AUTH_FLAG_KEY) {
            Ok(flag) => flag,
            Err(e) => {
                debug!(error = %e, "Failed to read session flag");
                None
            }
        };
        if flag.as_deref() != Some(AUTH_SENTINEL) {
            self.invalidate();
            return false;
        }

        let Some(last_activity) = self.activity.last_activity() else {
            self.invalidate();
            return false;
        };

        let elapsed = Utc::now().timestamp_millis() - last_activity;
        if elapsed >= IDLE_TIMEOUT_MS {
            debug!(elapsed_ms = elapsed, "Session expired from inactivity");
            self.invalidate();
            return false;
        }

        true
    }

    /// The stored user identity, or `None` when no session exists or the
    /// stored record does not parse.
    pub fn current_user(&self) -> Option<UserProfile> {
        let raw = match self.storage.get(USER_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                debug!(error = %e, "Failed to read user record");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Stored user record is malformed, treating as signed out");
                None
            }
        }
    }

    /// Raw last-activity timestamp in milliseconds since epoch, `None`
    /// when unset or unparsable.
    pub fn last_activity_time(&self) -> Option<i64> {
        self.activity.last_activity()
    }

    /// Record user activity now, extending the expiry window. Cheap
    /// enough to call on every interaction.
    pub fn touch(&self) {
        self.activity.record();
    }

    /// Milliseconds until idle expiry (for display), `None` when no
    /// activity timestamp exists.
    pub fn expires_in_ms(&self) -> Option<i64> {
        let last_activity = self.activity.last_activity()?;
        let elapsed = Utc::now().timestamp_millis() - last_activity;
        Some((IDLE_TIMEOUT_MS - elapsed).max(0))
    }
}
