//! Planning HTTP handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::planning::{
    CampaignInput, Dashboard, DashboardQuery, OpportunitiesQuery, PlanningService,
};
use crate::AppState;

fn planning_service(state: &AppState) -> PlanningService {
    PlanningService::new(
        state.db.clone(),
        state.config.scheduler.clone(),
        state.config.signals.clone(),
    )
}

/// Planting opportunities for locations that are free today
pub async fn list_opportunities(
    State(state): State<AppState>,
    Query(query): Query<OpportunitiesQuery>,
) -> impl IntoResponse {
    let service = planning_service(&state);

    match service.opportunities(query.farm_id).await {
        Ok(suggestions) => (
            StatusCode::OK,
            Json(serde_json::json!({ "suggestions": suggestions })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Planting campaign that feeds a selling schedule
pub async fn plan_campaign(
    State(state): State<AppState>,
    Json(input): Json<CampaignInput>,
) -> impl IntoResponse {
    if let Err(e) = input.validate() {
        return AppError::from(e).into_response();
    }

    let service = planning_service(&state);
    let selling_schedule_id = input.selling_schedule_id;

    match service.campaign(input).await {
        Ok(suggestions) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "selling_schedule_id": selling_schedule_id,
                "suggestions": suggestions,
            })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Dashboard summary with upcoming harvests and suggestions
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<Dashboard>> {
    query.validate()?;

    let service = planning_service(&state);
    let dashboard = service.dashboard(query).await?;
    Ok(Json(dashboard))
}
