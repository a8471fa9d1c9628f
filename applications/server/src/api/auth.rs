/// Token issuance endpoint
use crate::{error::Result, state::AppState};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /jwt - issue a signed token for the given email.
///
/// Issuance is open; possession of a token proves nothing beyond
/// knowing an email. Protection comes from the ownership checks on the
/// gated routes, which compare the verified subject to the resource
/// owner.
pub async fn issue_token(
    State(state): State<AppState>,
    Json(body): Json<TokenRequest>,
) -> Result<Json<TokenResponse>> {
    let token = state.tokens.issue(&body.email)?;
    Ok(Json(TokenResponse { token }))
}
