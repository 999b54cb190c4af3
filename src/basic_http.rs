use crate::auth::AuthRepository;
use crate::http::{HttpRequest, HttpResponse, SessionCookie};
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// An in-memory [`HttpRequest`] implementation.
///
/// Carries a cookie map, the per-request item map, the secure-connection flag
/// and an optional auth repository. Useful for tests and for hosts whose
/// framework adapter prefers to collect request data up front.
#[derive(Default)]
pub struct BasicHttpRequest {
    cookies: HashMap<String, String>,
    items: HashMap<String, String>,
    secure_connection: bool,
    auth_repository: Option<Arc<dyn AuthRepository>>,
}

impl BasicHttpRequest {
    /// Create a request without cookies or items, on a non-secure connection.
    pub fn new() -> Self {
        Default::default()
    }

    /// Add a cookie to the request.
    #[must_use]
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Set whether the request arrived over a secure connection.
    #[must_use]
    pub fn with_secure_connection(mut self, secure: bool) -> Self {
        self.secure_connection = secure;
        self
    }

    /// Attach an auth repository resolvable through
    /// [`HttpRequest::auth_repository`].
    #[must_use]
    pub fn with_auth_repository(mut self, repository: Arc<dyn AuthRepository>) -> Self {
        self.auth_repository = Some(repository);
        self
    }
}

impl HttpRequest for BasicHttpRequest {
    fn cookie_value(&self, name: &str) -> Option<String> {
        self.cookies.get(name).cloned()
    }

    fn item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) {
        self.items.insert(key.to_owned(), value);
    }

    fn is_secure_connection(&self) -> bool {
        self.secure_connection
    }

    fn auth_repository(&self) -> Option<Arc<dyn AuthRepository>> {
        self.auth_repository.clone()
    }
}

impl Debug for BasicHttpRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicHttpRequest")
            .field("cookies", &self.cookies)
            .field("items", &self.items)
            .field("secure_connection", &self.secure_connection)
            .field("auth_repository", &self.auth_repository.as_ref().map(|_| ".."))
            .finish()
    }
}

/// An in-memory [`HttpResponse`] implementation that records the cookies set
/// on it, in insertion order.
#[derive(Debug, Default)]
pub struct BasicHttpResponse {
    cookies: Vec<SessionCookie>,
}

impl BasicHttpResponse {
    /// Create a response without cookies.
    pub fn new() -> Self {
        Default::default()
    }

    /// All cookies set on this response, in insertion order.
    pub fn cookies(&self) -> &[SessionCookie] {
        &self.cookies
    }

    /// The most recent cookie set under the given name, mirroring how a
    /// cookie jar would resolve repeated writes.
    pub fn cookie(&self, name: &str) -> Option<&SessionCookie> {
        self.cookies.iter().rev().find(|cookie| cookie.name == name)
    }
}

impl HttpResponse for BasicHttpResponse {
    fn set_cookie(&mut self, cookie: SessionCookie) {
        self.cookies.push(cookie);
    }
}
