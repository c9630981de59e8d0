//! Report endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use pulse_core::PulseError;
use pulse_core::models::product::ModerateProduct;
use pulse_core::models::report::{CreateReport, Report};
use pulse_core::repository::{ProductRepository, ReportRepository};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{AuthedUser, require_moderator};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub product_id: String,
    pub reason: String,
}

/// Append a report and flag the product for moderator review.
///
/// The append and the flag flip are two independent writes; a crash
/// between them leaves a report whose product is unflagged until the
/// next report arrives.
pub async fn create(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Json(body): Json<ReportRequest>,
) -> ApiResult<Json<Report>> {
    let report = state
        .reports
        .append(CreateReport {
            product_id: body.product_id.clone(),
            user_email: claims.sub,
            reason: body.reason,
        })
        .await?;

    // Reports against unknown or malformed product ids still land in
    // the log; only real products get their flag flipped.
    if let Ok(product_id) = Uuid::parse_str(&body.product_id) {
        match state
            .products
            .moderate(
                product_id,
                ModerateProduct {
                    reported: Some(true),
                    ..Default::default()
                },
            )
            .await
        {
            Ok(_) | Err(PulseError::NotFound { .. }) => {}
            Err(e) => return Err(e.into()),
        }
    }

    Ok(Json(report))
}

/// Moderation queue.
pub async fn list(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
) -> ApiResult<Json<Vec<Report>>> {
    require_moderator(&state, &claims).await?;
    let reports = state.reports.list().await?;
    Ok(Json(reports))
}

/// Dismiss a handled report.
pub async fn remove(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    require_moderator(&state, &claims).await?;
    state.reports.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
