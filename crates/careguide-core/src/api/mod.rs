//! HTTP client module for the CareGuide identity service.
//!
//! This module provides the `AuthClient` for registration and login
//! against the remote identity endpoints. The service authenticates the
//! transport with a session cookie, which the client's cookie jar carries
//! automatically; nothing secret is stored on this side.

pub mod client;
pub mod error;

pub use client::{AuthClient, RegisterRequest};
pub use error::{surface_message, ApiError};
