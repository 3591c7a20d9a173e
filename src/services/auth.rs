use crate::models::{Claims, Session, VerifiedUser};
use actix_web::HttpRequest;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

/// Path the sign-out form posts to
pub const SIGN_OUT_PATH: &str = "/auth/sign-out";

/// Errors that can occur while verifying a session
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no session cookie present")]
    MissingSession,

    #[error("session cookie rejected: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

/// Outcome of the server-side auth gate
#[derive(Debug)]
pub enum ServerDecision {
    /// Render may proceed with this verified identity
    Authorized(VerifiedUser),
    /// Respond with a 307 redirect to this location instead of rendering
    RedirectToLogin(String),
}

/// Outcome of the client-side auth gate
#[derive(Debug)]
pub enum ClientDecision {
    Proceed,
    RedirectToLogin(String),
}

/// Auth gate for server-rendered pages
///
/// A binary decision made once per request; there are no retries and no
/// degraded outcome. Implementations expose the verified identity (with a
/// fresh identity token) to the loader and the live session to the view.
pub trait Authenticator: Send + Sync {
    /// Gate a server-side render: redirect-or-proceed plus the verified identity
    fn authorize_server(&self, req: &HttpRequest) -> ServerDecision;

    /// Gate an action against an already-materialized session
    fn authorize_client(&self, session: Option<&Session>) -> ClientDecision;

    /// Accessor for the live session (email + sign-out capability)
    fn session(&self, req: &HttpRequest) -> Option<Session>;

    /// Name of the session cookie this authenticator reads
    fn cookie_name(&self) -> &str;

    /// Location unauthenticated requests are redirected to
    fn login_path(&self) -> &str;
}

/// Cookie-based authenticator
///
/// Verifies an HS256 JWT carried in a request cookie and mints fresh
/// short-lived identity tokens for outbound calls. The secret is shared with
/// whatever issues the session cookies.
pub struct CookieAuthenticator {
    cookie_name: String,
    login_path: String,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    id_token_ttl_secs: u64,
}

impl CookieAuthenticator {
    pub fn new(
        secret: &str,
        cookie_name: String,
        login_path: String,
        id_token_ttl_secs: u64,
    ) -> Self {
        Self {
            cookie_name,
            login_path,
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            id_token_ttl_secs,
        }
    }

    /// Verify the session cookie on the given request
    fn verify(&self, req: &HttpRequest) -> Result<Claims, AuthError> {
        let cookie = req
            .cookie(&self.cookie_name)
            .ok_or(AuthError::MissingSession)?;

        let token = decode::<Claims>(cookie.value(), &self.decoding, &self.validation)?;
        Ok(token.claims)
    }

    /// Mint a fresh identity token for a verified user
    ///
    /// Returns None (rather than failing the request) if signing goes wrong;
    /// the loader then sends the documented "unauthenticated" fallback.
    fn mint_id_token(&self, user_id: &str, email: &str) -> Option<String> {
        let token = self.issue_token(user_id, email, self.id_token_ttl_secs as i64);
        match token {
            Ok(token) => Some(token),
            Err(e) => {
                tracing::warn!("Failed to mint identity token for {}: {}", user_id, e);
                None
            }
        }
    }

    /// Sign a token for the given identity, valid for `ttl_secs`
    ///
    /// Session cookies and identity tokens share this shape; the issuer of
    /// session cookies uses the same claims with a longer TTL.
    pub fn issue_token(
        &self,
        user_id: &str,
        email: &str,
        ttl_secs: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now,
            exp: now + ttl_secs,
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Login location including the originally requested path
    fn login_redirect(&self, destination: &str) -> String {
        format!(
            "{}?destination={}",
            self.login_path,
            urlencoding::encode(destination)
        )
    }
}

impl Authenticator for CookieAuthenticator {
    fn authorize_server(&self, req: &HttpRequest) -> ServerDecision {
        match self.verify(req) {
            Ok(claims) => {
                let id_token = self.mint_id_token(&claims.sub, &claims.email);
                ServerDecision::Authorized(VerifiedUser {
                    user_id: claims.sub,
                    email: claims.email,
                    id_token,
                })
            }
            Err(e) => {
                tracing::debug!("Unauthenticated request to {}: {}", req.path(), e);
                ServerDecision::RedirectToLogin(self.login_redirect(req.path()))
            }
        }
    }

    fn authorize_client(&self, session: Option<&Session>) -> ClientDecision {
        match session {
            Some(_) => ClientDecision::Proceed,
            None => ClientDecision::RedirectToLogin(self.login_path.clone()),
        }
    }

    fn session(&self, req: &HttpRequest) -> Option<Session> {
        let claims = self.verify(req).ok()?;
        Some(Session {
            email: claims.email,
            sign_out_path: SIGN_OUT_PATH.to_string(),
        })
    }

    fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    fn login_path(&self) -> &str {
        &self.login_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn authenticator() -> CookieAuthenticator {
        CookieAuthenticator::new(
            "test-secret",
            "session".to_string(),
            "/auth/login".to_string(),
            300,
        )
    }

    #[test]
    fn test_missing_cookie_redirects_to_login() {
        let auth = authenticator();
        let req = TestRequest::get().uri("/demo").to_http_request();

        match auth.authorize_server(&req) {
            ServerDecision::RedirectToLogin(location) => {
                assert_eq!(location, "/auth/login?destination=%2Fdemo");
            }
            ServerDecision::Authorized(_) => panic!("expected redirect"),
        }
    }

    #[test]
    fn test_valid_cookie_yields_verified_user_with_token() {
        let auth = authenticator();
        let token = auth.issue_token("u1", "u1@example.com", 3600).unwrap();
        let req = TestRequest::get()
            .uri("/demo")
            .cookie(actix_web::cookie::Cookie::new("session", token))
            .to_http_request();

        match auth.authorize_server(&req) {
            ServerDecision::Authorized(user) => {
                assert_eq!(user.user_id, "u1");
                assert_eq!(user.email, "u1@example.com");
                assert!(user.id_token.is_some());
            }
            ServerDecision::RedirectToLogin(l) => panic!("unexpected redirect to {}", l),
        }
    }

    #[test]
    fn test_expired_cookie_redirects() {
        let auth = authenticator();
        // Past the default 60s validation leeway
        let token = auth.issue_token("u1", "u1@example.com", -120).unwrap();
        let req = TestRequest::get()
            .uri("/demo")
            .cookie(actix_web::cookie::Cookie::new("session", token))
            .to_http_request();

        assert!(matches!(
            auth.authorize_server(&req),
            ServerDecision::RedirectToLogin(_)
        ));
    }

    #[test]
    fn test_garbled_cookie_redirects() {
        let auth = authenticator();
        let req = TestRequest::get()
            .uri("/demo")
            .cookie(actix_web::cookie::Cookie::new("session", "not-a-jwt"))
            .to_http_request();

        assert!(matches!(
            auth.authorize_server(&req),
            ServerDecision::RedirectToLogin(_)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let auth = authenticator();
        let other = CookieAuthenticator::new(
            "other-secret",
            "session".to_string(),
            "/auth/login".to_string(),
            300,
        );
        let token = other.issue_token("u1", "u1@example.com", 3600).unwrap();
        let req = TestRequest::get()
            .uri("/demo")
            .cookie(actix_web::cookie::Cookie::new("session", token))
            .to_http_request();

        assert!(matches!(
            auth.authorize_server(&req),
            ServerDecision::RedirectToLogin(_)
        ));
    }

    #[test]
    fn test_session_accessor() {
        let auth = authenticator();
        let token = auth.issue_token("u1", "u1@example.com", 3600).unwrap();
        let req = TestRequest::get()
            .uri("/demo")
            .cookie(actix_web::cookie::Cookie::new("session", token))
            .to_http_request();

        let session = auth.session(&req).unwrap();
        assert_eq!(session.email, "u1@example.com");
        assert_eq!(session.sign_out_path, SIGN_OUT_PATH);
    }

    #[test]
    fn test_client_gate() {
        let auth = authenticator();
        let session = Session {
            email: "u1@example.com".to_string(),
            sign_out_path: SIGN_OUT_PATH.to_string(),
        };

        assert!(matches!(
            auth.authorize_client(Some(&session)),
            ClientDecision::Proceed
        ));
        assert!(matches!(
            auth.authorize_client(None),
            ClientDecision::RedirectToLogin(_)
        ));
    }
}
