/// User registration and admin customer listing
use crate::{error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{extract::State, Json};
use ebazar_core::{NewUser, Role, Store, User};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
}

/// Registration is idempotent: a repeat of a known email acknowledges
/// instead of erroring, and never duplicates the record.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RegisterResponse {
    Created(User),
    Exists { message: &'static str },
}

/// POST /adduser - register a user, or acknowledge an existing one.
///
/// The role is always `customer`; admins are only created through the
/// operator CLI, never over the wire.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>> {
    if state.db.find_user(&body.email).await?.is_some() {
        return Ok(Json(RegisterResponse::Exists {
            message: "user already exists",
        }));
    }

    let user = state
        .db
        .create_user(NewUser {
            email: body.email,
            name: body.name,
            role: Role::Customer,
        })
        .await?;

    Ok(Json(RegisterResponse::Created(user)))
}

/// GET /customers - admin-only list of customer accounts
pub async fn list_customers(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<User>>> {
    Ok(Json(state.db.list_customers().await?))
}
