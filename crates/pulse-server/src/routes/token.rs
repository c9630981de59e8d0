//! Access-token issuance.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use pulse_auth::token::issue_access_token;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    #[serde(default)]
    pub name: String,
}

/// Sign a 24-hour access token for the posted identity. Identity
/// verification happens upstream at the sign-in provider; this
/// endpoint only mints the session token.
pub async fn issue(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TokenRequest>,
) -> ApiResult<Json<Value>> {
    let token = issue_access_token(&body.email, &body.name, &state.auth)?;
    Ok(Json(json!({ "token": token })))
}
