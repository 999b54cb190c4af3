use crate::auth::{AuthRepository, UserSession};
use crate::cache::{session_cache_key, CacheClient};
use crate::config::SessionConfig;
use crate::http::{HttpRequest, HttpResponse, SessionCookie};
use crate::options::SessionOptions;
use crate::session_id::{
    SessionIdGenerator, PERMANENT_SESSION_ID_COOKIE, SESSION_OPTIONS_COOKIE,
    TEMPORARY_SESSION_ID_COOKIE,
};
use crate::Result;
use chrono::Utc;
use log::{debug, trace};

/// Issues and resolves session identifiers for one in-flight request/response
/// pair.
///
/// Every user agent can hold two session ids at once: a *temporary* id in a
/// session-scoped cookie and a *permanent* id in a long-lived cookie. Which of
/// the two is active for a request is decided by the request's
/// [`SessionOptions`]. The manager itself is stateless; every accessor
/// re-derives its answer from the request's item map and cookies, and all
/// durable state lives with the external collaborators.
///
/// Freshly minted ids are written to a cookie on the response and mirrored
/// into the request's item map, so follow-up calls within the same request see
/// them without a cookie round trip.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionManager {
    config: SessionConfig,
}

impl SessionManager {
    /// Create a session manager with the given configuration.
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this manager was created with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Read the session option set from the request, via the two-tier
    /// item-then-cookie lookup.
    ///
    /// A missing or malformed options cookie yields an empty set, which falls
    /// open to the default temporary-session behavior.
    pub fn get_options(&self, request: &impl HttpRequest) -> SessionOptions {
        match request.item_or_cookie(SESSION_OPTIONS_COOKIE) {
            Some(value) => SessionOptions::from_cookie_value(&value),
            None => SessionOptions::new(),
        }
    }

    /// Merge the given flags into the request's option set and persist the
    /// result to a long-lived cookie and the request's item map.
    ///
    /// Inserting [`SessionOptions::PERMANENT`] removes
    /// [`SessionOptions::TEMPORARY`] and vice versa; other flags merge
    /// untouched. Called without flags, nothing is written and an empty set is
    /// returned.
    ///
    /// # Example
    ///
    /// ```
    /// # use session_identity::{
    /// #     BasicHttpRequest, BasicHttpResponse, SessionConfig, SessionManager, SessionOptions,
    /// # };
    /// let manager = SessionManager::new(SessionConfig::default());
    /// let mut request = BasicHttpRequest::new();
    /// let mut response = BasicHttpResponse::new();
    ///
    /// manager.add_options(&mut response, &mut request, &[SessionOptions::TEMPORARY]);
    /// let options = manager.add_options(&mut response, &mut request, &[SessionOptions::PERMANENT]);
    /// assert!(options.is_permanent());
    /// assert!(!options.contains(SessionOptions::TEMPORARY));
    /// ```
    pub fn add_options(
        &self,
        response: &mut impl HttpResponse,
        request: &mut impl HttpRequest,
        options: &[&str],
    ) -> SessionOptions {
        if options.is_empty() {
            return SessionOptions::new();
        }

        let mut merged = self.get_options(request);
        for option in options {
            merged.insert(option);
        }

        let value = merged.to_cookie_value();
        response.set_cookie(self.permanent_cookie(SESSION_OPTIONS_COOKIE, &value));
        request.set_item(SESSION_OPTIONS_COOKIE, value);
        merged
    }

    /// Returns the request's active session id: the permanent id if the
    /// option set contains [`SessionOptions::PERMANENT`], the temporary id
    /// otherwise.
    pub fn get_session_id(&self, request: &impl HttpRequest) -> Option<String> {
        if self.get_options(request).is_permanent() {
            self.get_permanent_session_id(request)
        } else {
            self.get_temporary_session_id(request)
        }
    }

    /// Returns the permanent session id, bypassing the option check.
    pub fn get_permanent_session_id(&self, request: &impl HttpRequest) -> Option<String> {
        request.item_or_cookie(PERMANENT_SESSION_ID_COOKIE)
    }

    /// Returns the temporary session id, bypassing the option check.
    pub fn get_temporary_session_id(&self, request: &impl HttpRequest) -> Option<String> {
        request.item_or_cookie(TEMPORARY_SESSION_ID_COOKIE)
    }

    /// Mint a fresh permanent session id: long-lived cookie on the response,
    /// item on the request.
    pub fn create_permanent_session_id(
        &self,
        response: &mut impl HttpResponse,
        request: &mut impl HttpRequest,
        generator: &mut impl SessionIdGenerator,
    ) -> String {
        let session_id = generator.generate_session_id();
        response.set_cookie(self.permanent_cookie(PERMANENT_SESSION_ID_COOKIE, &session_id));
        request.set_item(PERMANENT_SESSION_ID_COOKIE, session_id.clone());
        debug!("Created permanent session id");
        session_id
    }

    /// Mint a fresh temporary session id: session-scoped cookie on the
    /// response, item on the request.
    ///
    /// The cookie is marked secure-only when the configuration requires
    /// secure cookies *and* the request arrived over a secure connection. A
    /// non-secure request keeps a non-secure cookie either way, otherwise the
    /// client would never send it back.
    pub fn create_temporary_session_id(
        &self,
        response: &mut impl HttpResponse,
        request: &mut impl HttpRequest,
        generator: &mut impl SessionIdGenerator,
    ) -> String {
        let session_id = generator.generate_session_id();
        let secure = self.config.require_secure_cookies && request.is_secure_connection();
        response.set_cookie(
            SessionCookie::session_scoped(TEMPORARY_SESSION_ID_COOKIE, &session_id)
                .with_secure(secure),
        );
        request.set_item(TEMPORARY_SESSION_ID_COOKIE, session_id.clone());
        debug!("Created temporary session id");
        session_id
    }

    /// Mint exactly one fresh session id, permanent or temporary as selected
    /// by the request's option set, and return it.
    pub fn create_session_id(
        &self,
        response: &mut impl HttpResponse,
        request: &mut impl HttpRequest,
        generator: &mut impl SessionIdGenerator,
    ) -> String {
        if self.get_options(request).is_permanent() {
            self.create_permanent_session_id(response, request, generator)
        } else {
            self.create_temporary_session_id(response, request, generator)
        }
    }

    /// Mint BOTH a fresh permanent and a fresh temporary session id and
    /// return the active one per the request's option set.
    ///
    /// This always mints two new tokens, even when the request already
    /// carries valid ids; existing ids are rotated away. Callers that want to
    /// keep an existing id should use
    /// [`get_or_create_session_id`](Self::get_or_create_session_id) instead.
    pub fn create_session_ids(
        &self,
        response: &mut impl HttpResponse,
        request: &mut impl HttpRequest,
        generator: &mut impl SessionIdGenerator,
    ) -> String {
        let permanent_id = self.create_permanent_session_id(response, request, generator);
        let temporary_id = self.create_temporary_session_id(response, request, generator);
        if self.get_options(request).is_permanent() {
            permanent_id
        } else {
            temporary_id
        }
    }

    /// Returns the active session id, minting both ids first if the request
    /// has none.
    ///
    /// # Example
    ///
    /// ```
    /// # use session_identity::{
    /// #     BasicHttpRequest, BasicHttpResponse, DebugSessionIdGenerator, SessionConfig,
    /// #     SessionManager,
    /// # };
    /// let manager = SessionManager::new(SessionConfig::default());
    /// let mut request = BasicHttpRequest::new();
    /// let mut response = BasicHttpResponse::new();
    /// let mut generator = DebugSessionIdGenerator::default();
    ///
    /// let id = manager.get_or_create_session_id(&mut response, &mut request, &mut generator);
    /// // The id is stable within the request once it exists.
    /// assert_eq!(
    ///     manager.get_or_create_session_id(&mut response, &mut request, &mut generator),
    ///     id,
    /// );
    /// ```
    pub fn get_or_create_session_id(
        &self,
        response: &mut impl HttpResponse,
        request: &mut impl HttpRequest,
        generator: &mut impl SessionIdGenerator,
    ) -> String {
        match self.get_session_id(request) {
            Some(session_id) => session_id,
            None => self.create_session_ids(response, request, generator),
        }
    }

    /// Expire the temporary-id, permanent-id and options cookies on the
    /// client by writing removal cookies for all three names.
    pub fn delete_session_cookies(&self, response: &mut impl HttpResponse) {
        response.set_cookie(SessionCookie::expired(TEMPORARY_SESSION_ID_COOKIE));
        response.set_cookie(SessionCookie::expired(PERMANENT_SESSION_ID_COOKIE));
        response.set_cookie(SessionCookie::expired(SESSION_OPTIONS_COOKIE));
    }

    /// Derive the cache key of the request's active session, or `None` when
    /// no session id resolves.
    pub fn session_cache_key_for(&self, request: &impl HttpRequest) -> Option<String> {
        self.get_session_id(request)
            .map(|session_id| session_cache_key(&session_id))
    }

    /// Resolve the cached user session for the request's active session id.
    ///
    /// If an id resolves, its cache entry is looked up and returned when
    /// present and not equal to `Data::default()`. If no id resolves, both
    /// session ids are minted as a side effect. In every other case a
    /// `Data::default()` is returned; it is **not** written to the cache by
    /// this operation.
    ///
    /// # Example
    ///
    /// ```
    /// # use session_identity::{
    /// #     BasicHttpRequest, BasicHttpResponse, DebugSessionIdGenerator, MemoryCache,
    /// #     SessionConfig, SessionManager,
    /// # };
    /// # fn main() -> session_identity::Result {
    /// # async_std::task::block_on(async {
    /// let manager = SessionManager::new(SessionConfig::default());
    /// let cache: MemoryCache<u32> = MemoryCache::new();
    /// let mut request = BasicHttpRequest::new();
    /// let mut response = BasicHttpResponse::new();
    /// let mut generator = DebugSessionIdGenerator::default();
    ///
    /// // No session id yet: both ids are minted and a default is returned.
    /// let session: u32 = manager
    ///     .session_as(&cache, &mut request, &mut response, &mut generator)
    ///     .await?;
    /// assert_eq!(session, 0);
    /// assert!(manager.get_temporary_session_id(&request).is_some());
    /// assert!(manager.get_permanent_session_id(&request).is_some());
    /// # Ok(()) }) }
    /// ```
    pub async fn session_as<Data, Cache>(
        &self,
        cache: &Cache,
        request: &mut impl HttpRequest,
        response: &mut impl HttpResponse,
        generator: &mut impl SessionIdGenerator,
    ) -> Result<Data>
    where
        Data: Default + PartialEq,
        Cache: CacheClient<Data>,
    {
        let cached = match self.session_cache_key_for(request) {
            Some(key) => {
                let cached = cache.get(&key).await?;
                if cached.is_some() {
                    trace!("Session cache hit for {}", key);
                } else {
                    trace!("Session cache miss for {}", key);
                }
                cached
            }
            None => {
                self.create_session_ids(response, request, generator);
                None
            }
        };

        Ok(match cached {
            Some(session) if session != Data::default() => session,
            _ => Data::default(),
        })
    }

    /// Remove the cached user session at the request's active session id.
    /// No-op when no session id resolves.
    pub async fn clear_session<Data, Cache>(
        &self,
        cache: &mut Cache,
        request: &impl HttpRequest,
    ) -> Result<()>
    where
        Cache: CacheClient<Data>,
    {
        let Some(key) = self.session_cache_key_for(request) else {
            return Ok(());
        };
        debug!("Removing cached user session at {}", key);
        cache.remove(&key).await
    }

    /// Fetch the auth record for the request's active session and copy its
    /// roles and permissions onto `session`.
    ///
    /// The repository is taken from the `repository` argument when given,
    /// otherwise resolved from the request via
    /// [`HttpRequest::auth_repository`]. Without a repository or without an
    /// active session id this is a no-op.
    pub async fn update_from_auth_repository<Session: UserSession>(
        &self,
        session: &mut Session,
        request: &impl HttpRequest,
        repository: Option<&dyn AuthRepository>,
    ) -> Result<()> {
        let resolved;
        let repository = match repository {
            Some(repository) => repository,
            None => match request.auth_repository() {
                Some(repository) => {
                    resolved = repository;
                    resolved.as_ref()
                }
                None => return Ok(()),
            },
        };

        let Some(session_id) = self.get_session_id(request) else {
            return Ok(());
        };
        if let Some(user_auth) = repository.user_auth_by_session(&session_id).await? {
            session.update_from_user_auth(&user_auth);
        }
        Ok(())
    }

    /// A long-lived cookie expiring `permanent_cookie_duration` from now.
    fn permanent_cookie(&self, name: &str, value: &str) -> SessionCookie {
        SessionCookie::permanent(
            name,
            value,
            Utc::now() + self.config.permanent_cookie_duration,
        )
    }
}
