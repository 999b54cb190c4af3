use crate::auth::AuthRepository;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// The request side of the host's HTTP abstraction.
///
/// This crate never parses HTTP itself; the host implements this trait on top
/// of its framework's request type. Besides cookie reads, the trait exposes a
/// per-request item map, i.e. transient string storage that dies with the
/// request. Session ids and option strings are mirrored into the item map
/// whenever they are read from a cookie or freshly minted, so that later
/// operations within the same request do not re-parse cookies.
pub trait HttpRequest {
    /// Returns the value of the cookie with the given name, if the request
    /// carries one.
    fn cookie_value(&self, name: &str) -> Option<String>;

    /// Returns the per-request item stored under the given key.
    fn item(&self, key: &str) -> Option<String>;

    /// Store a per-request item under the given key, overwriting any previous
    /// value.
    fn set_item(&mut self, key: &str, value: String);

    /// Returns true if the request arrived over a secure connection.
    fn is_secure_connection(&self) -> bool;

    /// Resolve the auth repository collaborator from request-scoped services.
    ///
    /// The default implementation resolves nothing. Hosts that carry an auth
    /// repository in their request state can override this so that
    /// [`SessionManager::update_from_auth_repository`](crate::SessionManager::update_from_auth_repository)
    /// finds it without an explicit argument.
    fn auth_repository(&self) -> Option<Arc<dyn AuthRepository>> {
        None
    }

    /// Two-tier lookup with explicit precedence: the per-request item cache
    /// first, the cookie second.
    ///
    /// # Example
    ///
    /// ```
    /// # use session_identity::{BasicHttpRequest, HttpRequest};
    /// let mut request = BasicHttpRequest::new().with_cookie("s-id", "from-cookie");
    /// assert_eq!(request.item_or_cookie("s-id").as_deref(), Some("from-cookie"));
    /// request.set_item("s-id", "from-item".into());
    /// assert_eq!(request.item_or_cookie("s-id").as_deref(), Some("from-item"));
    /// ```
    fn item_or_cookie(&self, name: &str) -> Option<String> {
        self.item(name).or_else(|| self.cookie_value(name))
    }
}

/// The response side of the host's HTTP abstraction.
///
/// Cookie writes are handed over as [`SessionCookie`] values; applying them
/// to the wire format is the host's job.
pub trait HttpResponse {
    /// Queue a cookie to be sent with the response.
    fn set_cookie(&mut self, cookie: SessionCookie);
}

/// The expiry of a cookie.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum CookieExpiry {
    /// The cookie expires when the client session ends, i.e. no expiry
    /// attribute is sent.
    SessionEnd,
    /// The cookie expires at the given date and time.
    DateTime(DateTime<Utc>),
}

/// A cookie write, to be applied to the response by the host.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SessionCookie {
    /// The cookie name.
    pub name: String,
    /// The cookie value.
    pub value: String,
    /// When the cookie expires.
    pub expiry: CookieExpiry,
    /// Whether the cookie is only sent over secure connections.
    pub secure: bool,
    /// Whether the cookie is hidden from client-side scripts.
    pub http_only: bool,
    /// The path the cookie is scoped to.
    pub path: String,
}

impl SessionCookie {
    /// Create a session-scoped cookie, cleared when the client session ends.
    pub fn session_scoped(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expiry: CookieExpiry::SessionEnd,
            secure: false,
            http_only: true,
            path: "/".into(),
        }
    }

    /// Create a long-lived cookie expiring at the given date and time.
    pub fn permanent(
        name: impl Into<String>,
        value: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expiry: CookieExpiry::DateTime(expires_at),
            secure: false,
            http_only: true,
            path: "/".into(),
        }
    }

    /// Create a removal cookie: empty value, expired at the unix epoch.
    pub fn expired(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            expiry: CookieExpiry::DateTime(DateTime::UNIX_EPOCH),
            secure: false,
            http_only: true,
            path: "/".into(),
        }
    }

    /// Set the secure flag on this cookie.
    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }
}
