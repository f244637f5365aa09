use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    adapters::http::{app_state::AppState, middleware::AdminAccess},
    app_error::{AppError, AppResult},
    domain::entities::waitlist_entry::{NewWaitlistEntry, WaitlistEntry},
    use_cases::waitlist::WaitlistUseCases,
};

#[derive(Deserialize)]
struct SubmitPayload {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    email: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ListResponse {
    pub items: Vec<WaitlistEntry>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CountResponse {
    pub count: i64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ClearResponse {
    pub deleted: u64,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/waitlist",
            get(list_entries).post(submit_entry).delete(clear_entries),
        )
        .route("/waitlist/count", get(count_entries))
        .route("/waitlist/clear", post(clear_entries))
}

async fn submit_entry(
    State(app_state): State<AppState>,
    payload: Result<Json<SubmitPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Malformed signup body");
        AppError::InvalidInput("Request body must be a JSON object with text fields".into())
    })?;
    let input = NewWaitlistEntry::new(payload.first_name, payload.last_name, payload.email);
    let entry = app_state.waitlist_use_cases.submit(&input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn list_entries(
    State(app_state): State<AppState>,
    _admin: AdminAccess,
) -> AppResult<impl IntoResponse> {
    let items = app_state.waitlist_use_cases.list().await?;
    Ok(Json(ListResponse { items }))
}

async fn count_entries(
    State(waitlist): State<Arc<WaitlistUseCases>>,
) -> AppResult<impl IntoResponse> {
    let count = waitlist.count().await?;
    Ok(Json(CountResponse { count }))
}

async fn clear_entries(
    State(app_state): State<AppState>,
    _admin: AdminAccess,
) -> AppResult<impl IntoResponse> {
    let deleted = app_state.waitlist_use_cases.clear_all().await?;
    Ok(Json(ClearResponse { deleted }))
}
