use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    adapters::inbound::http::{DayCompletionsResponse, StatsResponse},
    app_state::AppState,
    domain::{
        models::{DayCompletions, DayKey},
        HabitError,
    },
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_stats))
        .route("/calendar", get(get_calendar))
        .route("/completions", get(get_completions))
}

#[instrument(name = "get_stats", skip(app_state))]
pub async fn get_stats(State(app_state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let stats = app_state.habit_service.stats().await?;
    Ok(Json(stats.into()))
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    year: Option<i32>,
    month: Option<u8>,
}

/// Completion counts for each day of a month. Defaults to the current month.
#[instrument(name = "get_calendar", skip(app_state))]
pub async fn get_calendar(
    State(app_state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Vec<DayCompletionsResponse>>, ApiError> {
    let service = &app_state.habit_service;
    let today = service.today().date();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(u8::from(today.month()));

    let days = service.calendar_month(year, month).await?;

    Ok(Json(days.into_iter().map(Into::into).collect()))
}

#[derive(Debug, Deserialize)]
pub struct CompletionsQuery {
    date: Option<String>,
}

/// Number of habits completed on a day. Defaults to today.
#[instrument(name = "get_completions", skip(app_state))]
pub async fn get_completions(
    State(app_state): State<AppState>,
    Query(query): Query<CompletionsQuery>,
) -> Result<Json<DayCompletionsResponse>, ApiError> {
    let service = &app_state.habit_service;
    let day = match query.date.as_deref() {
        Some(raw) => raw
            .parse::<DayKey>()
            .map_err(|_| HabitError::validation("date", "expected YYYY-MM-DD"))?,
        None => service.today(),
    };

    let completions = service.completions_on(day).await?;

    Ok(Json(DayCompletions { day, completions }.into()))
}
