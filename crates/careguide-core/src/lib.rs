//! Core client library for CareGuide, a consumer health-guidance product.
//!
//! Owns the client-side determination of "is this user signed in, and as
//! whom": a session store with 12-hour inactivity expiry over an injected
//! key-value storage backend, an activity tracker that keeps live
//! sessions alive, and a thin HTTP client for the remote identity
//! service's registration and login endpoints.
//!
//! Expiry is lazy - a session past its idle window is cleared on the
//! next validity check, not by a background timer.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod storage;

pub use api::{surface_message, ApiError, AuthClient, RegisterRequest};
pub use auth::{password_strength, ActivityTracker, PasswordStrength, SessionStore, ValidationError};
pub use config::Config;
pub use models::UserProfile;
pub use storage::{DiskStorage, MemoryStorage, Storage, StorageError};
