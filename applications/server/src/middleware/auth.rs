/// Authorization gate middleware
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use ebazar_core::{Role, Store};

use crate::services::Claims;

/// Verified identity stored in request extensions by [`auth_middleware`].
/// Handlers take this as an extractor and use it instead of any
/// client-supplied identity.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(Claims);

impl AuthenticatedUser {
    /// The verified subject email
    pub fn email(&self) -> &str {
        &self.0.email
    }

    /// Ownership check: the verified subject must equal the owner email
    /// named by the request. A mismatch gets the same response as a
    /// missing or invalid credential - the wire does not distinguish
    /// "forbidden" from "unauthenticated".
    pub fn require_owner(&self, owner_email: &str) -> Result<()> {
        if self.0.email == owner_email {
            Ok(())
        } else {
            Err(ServerError::Unauthorized)
        }
    }
}

/// Middleware that extracts and verifies the bearer token from the
/// Authorization header.
///
/// Absent header, missing Bearer prefix, malformed token, foreign
/// signature and expired token all reject with the uniform 401 body.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let auth_header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(ServerError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ServerError::Unauthorized)?;

    let claims = state.tokens.verify(token).map_err(|e| {
        tracing::warn!("token verification failed: {e}");
        ServerError::Unauthorized
    })?;

    request.extensions_mut().insert(AuthenticatedUser(claims));

    Ok(next.run(request).await)
}

/// Middleware for admin-only routes; runs inside [`auth_middleware`].
///
/// The role is read from the store, not from token claims - the token
/// payload is client-controlled at issuance.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let auth = request
        .extensions()
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or(ServerError::Unauthorized)?;

    let user = state
        .db
        .find_user(auth.email())
        .await?
        .ok_or(ServerError::Unauthorized)?;

    if user.role != Role::Admin {
        return Err(ServerError::Unauthorized);
    }

    Ok(next.run(request).await)
}

/// Implement `FromRequestParts` so `AuthenticatedUser` can be used as a
/// handler extractor
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(ServerError::Unauthorized)
    }
}
