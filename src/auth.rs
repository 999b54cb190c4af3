use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The authorization fields of a durable authentication record, as returned
/// by an [`AuthRepository`].
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct UserAuthRecord {
    /// The roles granted to the user.
    pub roles: Vec<String>,
    /// The permissions granted to the user.
    pub permissions: Vec<String>,
}

/// Consumer-provided access to durable authentication records.
///
/// Implement this against whatever store holds user auth data. The session
/// layer only ever asks one question: which roles and permissions belong to
/// the user behind a session id.
///
/// # Example
///
/// ```rust,ignore
/// #[async_trait]
/// impl AuthRepository for PgAuthRepository {
///     async fn user_auth_by_session(
///         &self,
///         session_id: &str,
///     ) -> session_identity::Result<Option<UserAuthRecord>> {
///         self.fetch_auth_record(session_id).await
///     }
/// }
/// ```
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Fetch the auth record for the user behind the given session id.
    /// Returns `Ok(None)` if the session is not associated with a user.
    async fn user_auth_by_session(&self, session_id: &str) -> Result<Option<UserAuthRecord>>;
}

/// A user session object carrying authorization fields.
///
/// Session types are application-defined; implementing this trait lets the
/// session layer copy roles and permissions from an auth record onto them.
///
/// # Example
///
/// ```
/// # use session_identity::{UserAuthRecord, UserSession};
/// #[derive(Default)]
/// struct CustomerSession {
///     roles: Vec<String>,
///     permissions: Vec<String>,
/// }
///
/// impl UserSession for CustomerSession {
///     fn set_roles(&mut self, roles: Vec<String>) {
///         self.roles = roles;
///     }
///
///     fn set_permissions(&mut self, permissions: Vec<String>) {
///         self.permissions = permissions;
///     }
/// }
///
/// let record = UserAuthRecord {
///     roles: vec!["admin".into()],
///     permissions: vec!["reports:read".into()],
/// };
/// let mut session = CustomerSession::default();
/// session.update_from_user_auth(&record);
/// assert_eq!(session.roles, ["admin"]);
/// ```
pub trait UserSession {
    /// Replace the roles stored on this session.
    fn set_roles(&mut self, roles: Vec<String>);

    /// Replace the permissions stored on this session.
    fn set_permissions(&mut self, permissions: Vec<String>);

    /// Copy roles and permissions from the given auth record onto this
    /// session.
    fn update_from_user_auth(&mut self, user_auth: &UserAuthRecord) {
        self.set_roles(user_auth.roles.clone());
        self.set_permissions(user_auth.permissions.clone());
    }
}
