use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};

use super::auth::AuthUser;
use crate::error::ApiError;

/// Middleware gating destructive and creation operations to administrators.
/// Must run after jwt_auth_middleware so the AuthUser extension is present.
pub async fn require_admin_middleware(
    request: Request,
    next: Next,
) -> Result<Response, impl IntoResponse> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| {
            let api_error =
                ApiError::unauthorized("JWT authentication required before admin check");
            (
                StatusCode::from_u16(api_error.status_code()).unwrap(),
                Json(api_error.to_json()),
            )
        })?
        .clone();

    if !auth_user.is_admin() {
        tracing::warn!(
            "Admin gate rejected user '{}' with access '{}'",
            auth_user.name,
            auth_user.access
        );
        let api_error = ApiError::forbidden("Administrator access required");
        return Err((
            StatusCode::from_u16(api_error.status_code()).unwrap(),
            Json(api_error.to_json()),
        ));
    }

    Ok(next.run(request).await)
}
