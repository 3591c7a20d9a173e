//! Gatefold - auth-gated server-side rendering demo service
//!
//! Serves a single server-rendered demo page behind cookie authentication.
//! Unauthenticated requests are redirected (307) to the login page; for
//! authenticated requests a server-side loader fetches data from two backend
//! endpoints (one bearer-token-authenticated, one cookie-forwarding) before
//! the page is rendered.

pub mod config;
pub mod models;
pub mod routes;
pub mod services;
pub mod view;

// Re-export commonly used types
pub use models::{PageData, Session, VerifiedUser};
pub use routes::AppState;
pub use services::{Authenticator, CookieAuthenticator, LoaderError, PageLoader, ServerDecision};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let user = VerifiedUser {
            user_id: "u1".to_string(),
            email: "u1@example.com".to_string(),
            id_token: None,
        };
        assert_eq!(user.bearer_token(), "unauthenticated");
    }
}
