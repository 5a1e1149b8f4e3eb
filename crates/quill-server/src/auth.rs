use axum::http::HeaderMap;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Domain separation for the session token MAC key.
const TOKEN_CONTEXT: &str = "quill session token v1";

/// Credential-backed session authority.
///
/// The authentication provider is deliberately minimal: one configured
/// admin username/password pair. A successful login yields a bearer token
/// carrying the principal's email (`<username>@local`) plus a keyed BLAKE3
/// MAC, so the server stays stateless across requests. Tokens do not
/// expire; rotating the session secret invalidates all of them.
#[derive(Clone)]
pub struct SessionAuthority {
    key: [u8; 32],
    admin_username: String,
    admin_password: String,
}

impl SessionAuthority {
    pub fn new(secret: &str, admin_username: String, admin_password: String) -> Self {
        Self {
            key: blake3::derive_key(TOKEN_CONTEXT, secret.as_bytes()),
            admin_username,
            admin_password,
        }
    }

    /// Check the credential pair and issue a session token on success.
    pub fn login(&self, username: &str, password: &str) -> Option<(String, String)> {
        if username != self.admin_username || password != self.admin_password {
            return None;
        }
        let email = format!("{username}@local");
        let token = self.issue(&email);
        Some((token, email))
    }

    /// Token format: `base64url(email).hex(mac)`.
    fn issue(&self, email: &str) -> String {
        let mac = blake3::keyed_hash(&self.key, email.as_bytes());
        format!("{}.{}", URL_SAFE_NO_PAD.encode(email), mac.to_hex())
    }

    /// Verify a token and recover the principal's email.
    pub fn verify(&self, token: &str) -> Option<String> {
        let (email_part, mac_part) = token.split_once('.')?;
        let email_bytes = URL_SAFE_NO_PAD.decode(email_part).ok()?;
        let email = String::from_utf8(email_bytes).ok()?;
        let claimed = blake3::Hash::from_hex(mac_part).ok()?;
        let expected = blake3::keyed_hash(&self.key, email.as_bytes());
        // blake3::Hash equality is constant-time.
        if claimed == expected {
            Some(email)
        } else {
            None
        }
    }
}

impl std::fmt::Debug for SessionAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionAuthority")
            .field("admin_username", &self.admin_username)
            .finish_non_exhaustive()
    }
}

/// Extract the authenticated principal's email from a request's
/// `Authorization: Bearer <token>` header. Absent or invalid tokens yield
/// `None`, which the access policy treats as "no principal".
pub fn principal_email(headers: &HeaderMap, sessions: &SessionAuthority) -> Option<String> {
    let value = headers.get(axum::http::header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    sessions.verify(token)
}
