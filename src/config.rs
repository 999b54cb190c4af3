use chrono::Duration;

/// Configuration for a [`SessionManager`](crate::SessionManager).
///
/// Passed in at construction time; there is no global configuration.
///
/// # Example
///
/// ```
/// # use session_identity::SessionConfig;
/// let config = SessionConfig::default()
///     .with_require_secure_cookies(false)
///     .with_permanent_cookie_duration(chrono::Duration::days(90));
/// assert!(!config.require_secure_cookies);
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SessionConfig {
    /// Whether temporary session cookies should be marked secure-only.
    /// The flag only takes effect on requests that actually arrive over a
    /// secure connection, so the cookie stays reachable for hosts serving
    /// plain HTTP.
    pub require_secure_cookies: bool,
    /// How far in the future permanent cookies expire.
    pub permanent_cookie_duration: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            require_secure_cookies: true,
            permanent_cookie_duration: Duration::days(20 * 365),
        }
    }
}

impl SessionConfig {
    /// Create the default configuration: secure cookies required, permanent
    /// cookies valid for twenty years.
    pub fn new() -> Self {
        Default::default()
    }

    /// Set whether temporary session cookies should be marked secure-only.
    #[must_use]
    pub fn with_require_secure_cookies(mut self, require: bool) -> Self {
        self.require_secure_cookies = require;
        self
    }

    /// Set how far in the future permanent cookies expire.
    #[must_use]
    pub fn with_permanent_cookie_duration(mut self, duration: Duration) -> Self {
        self.permanent_cookie_duration = duration;
        self
    }
}
