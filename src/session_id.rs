use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::ThreadRng;
use rand::Rng;
use std::fmt::Write;

/// The name of the cookie holding the temporary session id.
/// The same name is used as the key of the per-request item mirroring the cookie.
pub const TEMPORARY_SESSION_ID_COOKIE: &str = "s-id";

/// The name of the cookie holding the permanent session id.
/// The same name is used as the key of the per-request item mirroring the cookie.
pub const PERMANENT_SESSION_ID_COOKIE: &str = "s-pid";

/// The name of the cookie holding the comma-joined session option flags.
/// The same name is used as the key of the per-request item mirroring the cookie.
pub const SESSION_OPTIONS_COOKIE: &str = "s-opts";

/// The number of random bytes in a session id.
///
/// 15 bytes give 120 bits of entropy, which is above the [OWASP recommendation]
/// of 64 bits for session identifiers. Encoded as unpadded base64 this yields
/// ids of exactly 20 characters.
///
/// [OWASP recommendation]: https://cheatsheetseries.owasp.org/cheatsheets/Session_Management_Cheat_Sheet.html#session-id-entropy
pub const SESSION_ID_BYTES: usize = 15;

/// Generate a fresh session id from the given random generator:
/// [`SESSION_ID_BYTES`] random bytes, URL-safe base64 encoded without padding.
///
/// Make sure to use a cryptographically secure random generator.
/// According to the docs of the rand crate, [`rand::thread_rng`] is secure.
///
/// **Panics** if the underlying random source fails. A failing random source
/// is a process-level configuration error and not recoverable here.
///
/// # Example
///
/// ```
/// # use session_identity::create_random_session_id;
/// let id = create_random_session_id(&mut rand::thread_rng());
/// assert_eq!(id.len(), 20);
/// assert_ne!(id, create_random_session_id(&mut rand::thread_rng()));
/// ```
pub fn create_random_session_id(rng: &mut impl Rng) -> String {
    let bytes: [u8; SESSION_ID_BYTES] = rng.gen();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// A type with the ability to generate session ids.
pub trait SessionIdGenerator {
    /// Generate a fresh session id, i.e. a string that is a valid cookie value.
    fn generate_session_id(&mut self) -> String;
}

/// The default session id generator with focus on security.
/// It uses [`rand::rngs::ThreadRng`] as a random source and encodes
/// [`SESSION_ID_BYTES`] random bytes with URL-safe base64.
#[derive(Debug, Default)]
pub struct RandomSessionIdGenerator {
    rng: ThreadRng,
}

impl SessionIdGenerator for RandomSessionIdGenerator {
    fn generate_session_id(&mut self) -> String {
        create_random_session_id(&mut self.rng)
    }
}

/// A debug session id generator that generates an ascending sequence of
/// integers, formatted as strings padded with zeroes to the length of a real
/// session id. Only meant for tests.
#[derive(Debug, Default)]
#[allow(missing_copy_implementations)]
pub struct DebugSessionIdGenerator {
    next_index: usize,
}

impl SessionIdGenerator for DebugSessionIdGenerator {
    fn generate_session_id(&mut self) -> String {
        let mut id = String::new();
        write!(&mut id, "{:020}", self.next_index).unwrap();
        self.next_index += 1;
        id
    }
}
