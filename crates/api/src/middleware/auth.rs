//! Session authentication middleware.
//!
//! `require_session` validates the bearer token and stores the principal in
//! request extensions; `require_admin` additionally gates on the ADMIN role
//! and must run after `require_session`.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::app::AppState;
use crate::extractors::Session;

/// Middleware that requires a valid session token.
///
/// Rejects requests without a valid `Authorization: Bearer <token>` header.
/// The decoded principal is stored in request extensions for downstream
/// handlers and middleware.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let token = match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) => token,
        None => return unauthorized_response("Missing or invalid Authorization header"),
    };

    let claims = match state.session_keys.verify(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("Session validation failed: {}", e);
            return unauthorized_response("Invalid or expired session");
        }
    };

    match Session::from_claims(&claims) {
        Ok(session) => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        Err(_) => unauthorized_response("Invalid or expired session"),
    }
}

/// Middleware that requires the ADMIN role.
///
/// Must be layered inside `require_session` so the principal is already in
/// request extensions.
pub async fn require_admin(req: Request<Body>, next: Next) -> Response {
    match req.extensions().get::<Session>() {
        Some(session) if session.is_admin() => next.run(req).await,
        Some(_) => (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "forbidden",
                "message": "Admin access required"
            })),
        )
            .into_response(),
        None => unauthorized_response("Authentication required"),
    }
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized",
            "message": message
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_response() {
        let response = unauthorized_response("Missing or invalid Authorization header");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_bearer_prefix_stripping() {
        let header = "Bearer abc.def.ghi";
        assert_eq!(header.strip_prefix("Bearer "), Some("abc.def.ghi"));
        assert_eq!("Basic abc".strip_prefix("Bearer "), None);
    }
}
