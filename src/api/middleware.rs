//! Request middleware: bearer authentication and `Last-Modified` stamping

use axum::{
    extract::{Request, State},
    http::{
        header::{AUTHORIZATION, LAST_MODIFIED},
        HeaderMap, HeaderValue, Method,
    },
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use super::error::ApiError;
use super::state::AppState;

/// IMF-fixdate, the HTTP date format
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

/// Resolve the bearer token into a [`Principal`](crate::auth::Principal)
/// and attach it to the request extensions
pub async fn require_principal(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let principal = {
        let token = bearer_token(request.headers()).ok_or_else(|| {
            ApiError::Unauthorized(
                "Authentication required. Provide Authorization: Bearer <token>".to_string(),
            )
        })?;
        state.users().authenticate(token)?
    };

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

/// Stamp successful mutating responses with `Last-Modified`
pub async fn last_modified(request: Request, next: Next) -> Response {
    let mutating = !matches!(
        *request.method(),
        Method::GET | Method::HEAD | Method::OPTIONS
    );

    let mut response = next.run(request).await;

    if mutating && response.status().is_success() {
        let stamp = Utc::now().format(HTTP_DATE_FORMAT).to_string();
        if let Ok(value) = HeaderValue::from_str(&stamp) {
            response.headers_mut().insert(LAST_MODIFIED, value);
        }
    }

    response
}
