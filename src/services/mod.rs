// Service exports
pub mod auth;
pub mod loader;
pub mod urls;

pub use auth::{
    AuthError, Authenticator, ClientDecision, CookieAuthenticator, ServerDecision, SIGN_OUT_PATH,
};
pub use loader::{LoaderError, PageLoader, COLOR_ENDPOINT, PROFILE_ENDPOINT};
