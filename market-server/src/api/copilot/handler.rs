//! Insight Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::api::ApiResult;
use crate::auth::CurrentUser;
use crate::auth::access::ensure_retailer_owner;
use crate::services::insights::{self, InsightSummary};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub retailer_id: i64,
}

/// POST /api/copilot/summary?retailer_id=
pub async fn summary(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<SummaryQuery>,
) -> ApiResult<InsightSummary> {
    ensure_retailer_owner(&state.pool, &user, query.retailer_id).await?;
    Ok(Json(insights::summarize(&state.pool, query.retailer_id).await?))
}
