//! Homepage slider endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use pulse_core::models::slider::{CreateSlider, Slider};
use pulse_core::repository::SliderRepository;

use crate::auth::{AuthedUser, require_admin};
use crate::error::ApiResult;
use crate::state::AppState;

/// Carousel content, ordered by position.
pub async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Slider>>> {
    let sliders = state.sliders.list().await?;
    Ok(Json(sliders))
}

/// Admin-only slider creation.
pub async fn create(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Json(body): Json<CreateSlider>,
) -> ApiResult<Json<Slider>> {
    require_admin(&state, &claims).await?;
    let slider = state.sliders.create(body).await?;
    Ok(Json(slider))
}
