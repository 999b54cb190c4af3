//! HTTP session identity.
//!
//! This crate decides which session an HTTP request belongs to. It mints
//! random session ids, persists them as cookies, mirrors them into a
//! per-request item map and resolves the cached user session behind the
//! active id. It is framework agnostic: hosts implement [`HttpRequest`] and
//! [`HttpResponse`] on top of their framework's types and plug storage in
//! through [`CacheClient`].
//!
//! # Temporary and permanent ids
//!
//! Every user agent holds two session ids at once: a temporary id in a
//! session-scoped cookie and a permanent id in a long-lived cookie. A third
//! cookie stores the [`SessionOptions`], the option set that decides which of
//! the two ids is active for a request. Without options the temporary id
//! wins, so plain visitors get sessions that end with their browser session.
//! Opting into [`SessionOptions::PERMANENT`], e.g. from a "remember me"
//! checkbox, switches the user agent over to the long-lived id.
//!
//! # Security
//!
//! Session ids carry 120 bits of entropy from a cryptographically secure
//! random generator, well above the 64 bits recommended by the
//! [OWASP session management cheat sheet](https://cheatsheetseries.owasp.org/cheatsheets/Session_Management_Cheat_Sheet.html).
//! All cookies written by this crate are http-only, and the temporary id
//! cookie is marked secure on secure connections unless configured otherwise.
//! Cache keys are derived by hashing the session id, so the raw id never
//! shows up in cache key listings.
//!
//! # Example
//!
//! ```
//! use session_identity::{
//!     BasicHttpRequest, BasicHttpResponse, MemoryCache, RandomSessionIdGenerator,
//!     SessionConfig, SessionManager,
//! };
//!
//! # fn main() -> session_identity::Result {
//! # use session_identity::CacheClient;
//! # async_std::task::block_on(async {
//! #
//! let manager = SessionManager::new(SessionConfig::default());
//! // Draws from thread_rng(), which is cryptographically secure.
//! let mut generator = RandomSessionIdGenerator::default();
//!
//! // First request of a fresh user agent: no cookies yet, so fresh ids are
//! // minted onto the response.
//! let mut request = BasicHttpRequest::new();
//! let mut response = BasicHttpResponse::new();
//! let session_id = manager.get_or_create_session_id(&mut response, &mut request, &mut generator);
//!
//! // Cache a user session under the active id, e.g. after login.
//! let mut cache: MemoryCache<String> = MemoryCache::new();
//! let cache_key = manager.session_cache_key_for(&request).unwrap();
//! cache.set(&cache_key, "logged in".to_string()).await?;
//!
//! // A later request from the same user agent replays the cookies.
//! let mut request = BasicHttpRequest::new();
//! for cookie in response.cookies() {
//!     request = request.with_cookie(cookie.name.as_str(), cookie.value.as_str());
//! }
//! let mut response = BasicHttpResponse::new();
//! let session: String = manager
//!     .session_as(&cache, &mut request, &mut response, &mut generator)
//!     .await?;
//! assert_eq!(session, "logged in");
//! assert_eq!(manager.get_session_id(&request), Some(session_id));
//! #
//! # Ok(()) }) }
//! ```

#![forbid(unsafe_code)]
#![deny(
    future_incompatible,
    missing_debug_implementations,
    nonstandard_style,
    missing_docs,
    unreachable_pub,
    missing_copy_implementations,
    unused_qualifications
)]

pub use anyhow::Error;
/// An anyhow::Result with default return type of ()
pub type Result<T = ()> = std::result::Result<T, Error>;

mod auth;
mod basic_http;
mod cache;
mod config;
mod http;
mod options;
mod session_id;
mod session_manager;

pub use auth::{AuthRepository, UserAuthRecord, UserSession};
pub use basic_http::{BasicHttpRequest, BasicHttpResponse};
pub use cache::{session_cache_key, CacheClient, MemoryCache};
pub use config::SessionConfig;
pub use http::{CookieExpiry, HttpRequest, HttpResponse, SessionCookie};
pub use options::SessionOptions;
pub use session_id::{
    create_random_session_id, DebugSessionIdGenerator, RandomSessionIdGenerator,
    SessionIdGenerator, PERMANENT_SESSION_ID_COOKIE, SESSION_ID_BYTES, SESSION_OPTIONS_COOKIE,
    TEMPORARY_SESSION_ID_COOKIE,
};
pub use session_manager::SessionManager;
