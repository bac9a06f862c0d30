use axum::{extract::Request, middleware::Next, response::Response};

use crate::database::models::Role;
use crate::error::ApiError;

use super::auth::AuthUser;

pub const STAFF_OR_ADMIN: &[Role] = &[Role::Staff, Role::Admin];
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Role gate: passes the request through unchanged when the verified
/// identity's role is in the allowed set, 403 otherwise.
///
/// Must be layered after [`super::auth::jwt_auth_middleware`]; a route wired
/// without it has no identity to check and is rejected with 401.
pub async fn require_role(
    allowed: &'static [Role],
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    if !allowed.contains(&user.role) {
        return Err(ApiError::forbidden(format!(
            "Role {} is not permitted to access this resource",
            user.role.as_str()
        )));
    }

    Ok(next.run(request).await)
}
