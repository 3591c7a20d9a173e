use crate::models::{ErrorResponse, HealthResponse, Session};
use crate::services::auth::{Authenticator, ClientDecision, ServerDecision, SIGN_OUT_PATH};
use crate::services::loader::{LoaderError, PageLoader};
use crate::view;
use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse, Responder, ResponseError};
use std::sync::Arc;
use thiserror::Error;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn Authenticator>,
    pub loader: Arc<PageLoader>,
}

/// Configure the page routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/demo", web::get().to(demo_page))
        .route(SIGN_OUT_PATH, web::post().to(sign_out));
}

/// Request-level failure while producing the demo page
///
/// Any loader failure is fatal to the render: the response is a generic
/// server error, never a partially populated page.
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Load(#[from] LoaderError),
}

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        tracing::error!("Demo page data loading failed: {}", self);
        HttpResponse::InternalServerError().json(ErrorResponse {
            error: "data_loading_failed".to_string(),
            message: self.to_string(),
            status_code: 500,
        })
    }
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Server-rendered demo page
///
/// GET /demo
///
/// Auth gate first: unauthenticated requests get a 307 to the login location
/// before any data fetching occurs. Authenticated requests run the loader and
/// render the page from its output plus the live session.
async fn demo_page(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, PageError> {
    let user = match state.auth.authorize_server(&req) {
        ServerDecision::Authorized(user) => user,
        ServerDecision::RedirectToLogin(location) => {
            tracing::info!("Redirecting unauthenticated request to {}", location);
            return Ok(temporary_redirect(&location));
        }
    };

    tracing::debug!("Loading demo page data for user {}", user.user_id);
    let data = state.loader.load(&user, &req).await?;

    // The session accessor re-reads the request; it cannot be absent here
    // since the gate already verified the same cookie.
    let session = state.auth.session(&req).unwrap_or_else(|| Session {
        email: user.email.clone(),
        sign_out_path: SIGN_OUT_PATH.to_string(),
    });

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(view::render_demo_page(&session, &data)))
}

/// Sign out the current session
///
/// POST /auth/sign-out
///
/// Clears the session cookie and sends the browser back to the login page.
async fn sign_out(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let session = state.auth.session(&req);

    match state.auth.authorize_client(session.as_ref()) {
        ClientDecision::RedirectToLogin(location) => temporary_redirect(&location),
        ClientDecision::Proceed => {
            let mut removal = actix_web::cookie::Cookie::new(
                state.auth.cookie_name().to_string(),
                String::new(),
            );
            removal.set_path("/");
            removal.make_removal();

            HttpResponse::SeeOther()
                .insert_header((header::LOCATION, state.auth.login_path().to_string()))
                .cookie(removal)
                .finish()
        }
    }
}

/// 307 keeps the method on re-issue, matching the SSR redirect contract
fn temporary_redirect(location: &str) -> HttpResponse {
    HttpResponse::TemporaryRedirect()
        .insert_header((header::LOCATION, location))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporary_redirect_shape() {
        let response = temporary_redirect("/auth/login?destination=%2Fdemo");
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/auth/login?destination=%2Fdemo"
        );
    }

    #[test]
    fn test_page_error_is_server_error() {
        let err = PageError::Load(LoaderError::InvalidResponse("missing field".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
