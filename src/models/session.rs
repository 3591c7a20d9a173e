use serde::{Deserialize, Serialize};

/// JWT claims carried by the session cookie and minted identity tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// A verified identity produced by the server-side auth gate
///
/// Carries a fresh identity token when one could be minted; the loader falls
/// back to the literal "unauthenticated" when it is absent.
#[derive(Debug, Clone)]
pub struct VerifiedUser {
    pub user_id: String,
    pub email: String,
    pub id_token: Option<String>,
}

impl VerifiedUser {
    /// The bearer credential for outbound calls, with the documented fallback
    pub fn bearer_token(&self) -> &str {
        self.id_token.as_deref().unwrap_or("unauthenticated")
    }
}

/// The live session the view borrows for the request duration
///
/// Distinct from [`VerifiedUser`]: the view only needs the display email and
/// the sign-out capability, not the identity token.
#[derive(Debug, Clone)]
pub struct Session {
    pub email: String,
    pub sign_out_path: String,
}
