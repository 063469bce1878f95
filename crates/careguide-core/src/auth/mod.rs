//! Authentication state for the current client.
//!
//! This module provides:
//! - `SessionStore`: single source of truth for "is this client
//!   authenticated, and as whom", with inactivity-based expiry
//! - `ActivityTracker`: last-activity timestamp recording consulted by
//!   the store to decide expiry
//! - credential validation and password-strength scoring for form input
//!
//! Sessions expire after 12 hours without recorded activity. Expiry is
//! evaluated lazily on the next validity check, not by a background timer.

pub mod activity;
pub mod session;
pub mod validate;

pub use activity::ActivityTracker;
pub use session::SessionStore;
pub use validate::{password_strength, PasswordStrength, ValidationError};
