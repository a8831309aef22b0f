//! Postfach Session Management
//!
//! One explicit browsing context per run:
//! - Cookies live inside the session, never in process-wide state
//! - Login fills and submits the portal's own login form
//! - Logout is a plain navigation to a fixed endpoint
//! - Every navigation goes through the `Portal` trait so runs can be
//!   replayed against canned pages

mod auth;
mod error;
mod form;
#[cfg(any(test, feature = "test-utils"))]
mod memory;
mod page;
mod portal;

pub use auth::{Authenticator, Credentials, DEFAULT_PASSWORD_FIELD, DEFAULT_USERNAME_FIELD};
pub use error::SessionError;
pub use form::{FormMethod, FormSubmission};
#[cfg(any(test, feature = "test-utils"))]
pub use memory::{MemoryPortal, PortalRequest};
pub use page::Page;
pub use portal::{HttpPortal, Portal};

pub type Result<T> = std::result::Result<T, SessionError>;
