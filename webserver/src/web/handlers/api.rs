//! REST API handlers
//!
//! Each handler parses the request, calls one orchestrator operation and
//! shapes the JSON response. Error kinds map to status codes in
//! `crate::error`.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::NaiveDate;
use serde_json::{json, Value};

use orchestrator::{AppealStore, Orchestrator};
use shared::{
    AppealId, CancelAppealRequest, CompleteAppealRequest, CreateAppealRequest, DateRangeQuery,
};

use crate::error::{WebServerError, WebServerResult};

fn parse_id(id: &str) -> WebServerResult<AppealId> {
    AppealId::from_string(id)
        .map_err(|_| WebServerError::bad_request(format!("Invalid appeal id: {id}")))
}

fn parse_date(field: &str, value: Option<&str>) -> WebServerResult<NaiveDate> {
    let value = value
        .ok_or_else(|| WebServerError::bad_request("startDate and endDate are required"))?;
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        WebServerError::bad_request(format!("Invalid {field} format, use YYYY-MM-DD"))
    })
}

/// GET /appeals - appeals still in an active status
pub async fn get_started_appeals<S>(
    State(orchestrator): State<Arc<Orchestrator<S>>>,
) -> WebServerResult<Json<Value>>
where
    S: AppealStore + Send + Sync + 'static,
{
    let appeals = orchestrator.list_started().await?;
    Ok(Json(json!({ "appeals": appeals })))
}

/// GET /appeals/all
pub async fn get_all_appeals<S>(
    State(orchestrator): State<Arc<Orchestrator<S>>>,
) -> WebServerResult<Json<Value>>
where
    S: AppealStore + Send + Sync + 'static,
{
    let appeals = orchestrator.list_all().await?;
    Ok(Json(json!({ "appeals": appeals })))
}

/// GET /appeals/by-dates?startDate=YYYY-MM-DD&endDate=YYYY-MM-DD
pub async fn get_appeals_by_dates<S>(
    State(orchestrator): State<Arc<Orchestrator<S>>>,
    Query(query): Query<DateRangeQuery>,
) -> WebServerResult<Json<Value>>
where
    S: AppealStore + Send + Sync + 'static,
{
    let start = parse_date("startDate", query.start_date.as_deref())?;
    let end = parse_date("endDate", query.end_date.as_deref())?;

    let appeals = orchestrator.list_by_date_range(start, end).await?;
    Ok(Json(json!({ "appeals": appeals })))
}

/// GET /appeals/:id
pub async fn get_appeal_by_id<S>(
    State(orchestrator): State<Arc<Orchestrator<S>>>,
    Path(id): Path<String>,
) -> WebServerResult<Json<Value>>
where
    S: AppealStore + Send + Sync + 'static,
{
    let appeal = orchestrator.get_appeal(parse_id(&id)?).await?;
    Ok(Json(json!({ "appeal": appeal })))
}

/// POST /appeals
pub async fn create_appeal<S>(
    State(orchestrator): State<Arc<Orchestrator<S>>>,
    Json(request): Json<CreateAppealRequest>,
) -> WebServerResult<(StatusCode, Json<Value>)>
where
    S: AppealStore + Send + Sync + 'static,
{
    let appeal = orchestrator
        .create_appeal(&request.theme, &request.message)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Appeal created successfully",
            "appeal": appeal,
        })),
    ))
}

/// PATCH /appeals/:id/start
pub async fn start_processing<S>(
    State(orchestrator): State<Arc<Orchestrator<S>>>,
    Path(id): Path<String>,
) -> WebServerResult<Json<Value>>
where
    S: AppealStore + Send + Sync + 'static,
{
    let appeal = orchestrator.start_processing(parse_id(&id)?).await?;
    Ok(Json(json!({
        "message": "Appeal started processing successfully",
        "appeal": appeal,
    })))
}

/// PATCH /appeals/:id/complete
pub async fn complete_appeal<S>(
    State(orchestrator): State<Arc<Orchestrator<S>>>,
    Path(id): Path<String>,
    Json(request): Json<CompleteAppealRequest>,
) -> WebServerResult<Json<Value>>
where
    S: AppealStore + Send + Sync + 'static,
{
    let appeal = orchestrator
        .complete_appeal(parse_id(&id)?, &request.solution)
        .await?;
    Ok(Json(json!({
        "message": "Appeal completed successfully",
        "appeal": appeal,
    })))
}

/// PATCH /appeals/:id/cancel
///
/// The body is optional; a reason is recorded when one is supplied. A body
/// that is present but not valid JSON is rejected rather than ignored.
pub async fn cancel_appeal<S>(
    State(orchestrator): State<Arc<Orchestrator<S>>>,
    Path(id): Path<String>,
    body: Bytes,
) -> WebServerResult<Json<Value>>
where
    S: AppealStore + Send + Sync + 'static,
{
    let request: CancelAppealRequest = if body.is_empty() {
        CancelAppealRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|_| WebServerError::bad_request("Cannot parse JSON"))?
    };
    let reason = request.reason.as_deref();
    let appeal = orchestrator.cancel_appeal(parse_id(&id)?, reason).await?;
    Ok(Json(json!({
        "message": "Appeal canceled successfully",
        "id": appeal.id,
    })))
}

/// POST /appeals/cancel-all-in-progress
pub async fn cancel_all_in_progress<S>(
    State(orchestrator): State<Arc<Orchestrator<S>>>,
) -> WebServerResult<Json<Value>>
where
    S: AppealStore + Send + Sync + 'static,
{
    let cancelled = orchestrator.cancel_all_in_progress().await?;
    Ok(Json(json!({
        "message": "All in progress appeals canceled successfully",
        "cancelled": cancelled,
    })))
}

/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
