use crate::models::{PageData, VerifiedUser};
use crate::services::urls;
use actix_web::http::header::COOKIE as INBOUND_COOKIE;
use actix_web::HttpRequest;
use reqwest::header::{AUTHORIZATION, COOKIE};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Endpoint expecting an Authorization header, returns `favoriteColor`
pub const COLOR_ENDPOINT: &str = "/api/example";

/// Endpoint expecting forwarded cookies, returns `favoriteAnimal` and `email`
pub const PROFILE_ENDPOINT: &str = "/api/cookies-example";

/// Errors that can occur while loading page data
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("data fetching from {path} failed with status {status}: {body}")]
    Upstream {
        path: &'static str,
        status: u16,
        body: String,
    },

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

/// Server-side data loader for the demo page
///
/// Performs two sequential upstream calls per request: the color endpoint
/// with a bearer identity token, then the profile endpoint with the inbound
/// cookies forwarded. Any failure aborts the whole load; no retries and no
/// caching.
pub struct PageLoader {
    client: Client,
    base_url: Option<String>,
}

impl PageLoader {
    pub fn new(base_url: Option<String>, timeout_secs: Option<u64>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs.unwrap_or(30)))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, base_url }
    }

    /// Load the demo page data for a verified user
    pub async fn load(
        &self,
        user: &VerifiedUser,
        req: &HttpRequest,
    ) -> Result<PageData, LoaderError> {
        // First call: identity token in the Authorization header, with the
        // literal "unauthenticated" fallback when no token could be minted.
        let url = urls::absolute_url(self.base_url.as_deref(), COLOR_ENDPOINT, req);
        tracing::debug!("Fetching favorite color from: {}", url);

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, user.bearer_token())
            .send()
            .await?;

        let body = check_response(COLOR_ENDPOINT, response).await?;
        let favorite_color = required_str(&body, "favoriteColor")?;

        // Second call, issued only once the first has succeeded: no
        // Authorization header, inbound cookie header forwarded verbatim.
        let cookie_header = req
            .headers()
            .get(INBOUND_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        let url = urls::absolute_url(self.base_url.as_deref(), PROFILE_ENDPOINT, req);
        tracing::debug!("Fetching profile from: {}", url);

        let response = self
            .client
            .get(&url)
            .header(COOKIE, cookie_header)
            .send()
            .await?;

        let body = check_response(PROFILE_ENDPOINT, response).await?;

        Ok(PageData {
            favorite_color,
            favorite_animal: required_str(&body, "favoriteAnimal")?,
            email: required_str(&body, "email")?,
        })
    }
}

/// Parse the body as JSON and reject non-2xx statuses
///
/// The error message embeds the status code and the serialized error body so
/// the upstream failure survives into the request-level error.
async fn check_response(
    path: &'static str,
    response: reqwest::Response,
) -> Result<Value, LoaderError> {
    let status = response.status();
    let body: Value = response.json().await?;

    if !status.is_success() {
        return Err(LoaderError::Upstream {
            path,
            status: status.as_u16(),
            body: body.to_string(),
        });
    }

    Ok(body)
}

fn required_str(body: &Value, field: &str) -> Result<String, LoaderError> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| LoaderError::InvalidResponse(format!("missing field {}", field)))
}
