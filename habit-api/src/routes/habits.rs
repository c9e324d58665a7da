use std::str::FromStr;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::{
    adapters::inbound::http::{HabitResponse, MessageResponse},
    app_state::AppState,
    domain::{
        models::{Category, HabitId, HabitUpdate, NewHabit},
        HabitError,
    },
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_habits).post(create_habit))
        .route(
            "/:id",
            get(get_habit).put(update_habit).delete(delete_habit),
        )
        .route("/:id/toggle", post(toggle_habit))
        .route("/:id/screentime", post(log_screen_time))
}

/// Parse an optional enum string, naming `field` in the error.
fn parse_enum<T: FromStr>(field: &'static str, value: Option<&str>) -> Result<Option<T>, HabitError> {
    value
        .map(|raw| {
            raw.parse()
                .map_err(|_| HabitError::validation(field, format!("unknown value '{raw}'")))
        })
        .transpose()
}

/// Accept any JSON number with no fractional part.
fn whole_number(field: &'static str, value: &Value) -> Result<i64, HabitError> {
    let invalid = || HabitError::validation(field, "must be a non-negative integer");
    let Value::Number(number) = value else {
        return Err(invalid());
    };

    if let Some(n) = number.as_i64() {
        return Ok(n);
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => Ok(f as i64),
        _ => Err(invalid()),
    }
}

fn goal_minutes(value: &Value) -> Result<u32, HabitError> {
    let goal = whole_number("screenTimeGoal", value)?;
    i32::try_from(goal)
        .ok()
        .and_then(|g| u32::try_from(g).ok())
        .ok_or_else(|| HabitError::validation("screenTimeGoal", "must be a non-negative integer"))
}

// ============================================================================
// Create / read
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHabitPayload {
    #[serde(default)]
    name: String,
    description: Option<String>,
    icon: Option<String>,
    frequency: Option<String>,
    category: Option<String>,
    habit_type: Option<String>,
    screen_time_goal: Option<Value>,
}

impl CreateHabitPayload {
    fn into_new_habit(self) -> Result<NewHabit, HabitError> {
        let mut habit = NewHabit::new(self.name);
        if let Some(description) = self.description {
            habit = habit.with_description(description);
        }
        if let Some(icon) = self.icon {
            habit = habit.with_icon(icon);
        }
        if let Some(frequency) = parse_enum("frequency", self.frequency.as_deref())? {
            habit = habit.with_frequency(frequency);
        }
        if let Some(category) = parse_enum("category", self.category.as_deref())? {
            habit = habit.with_category(category);
        }
        if let Some(habit_type) = parse_enum("habitType", self.habit_type.as_deref())? {
            habit = habit.with_type(habit_type);
        }
        if let Some(goal) = self.screen_time_goal.as_ref().filter(|v| !v.is_null()) {
            habit = habit.with_goal(goal_minutes(goal)?);
        }
        Ok(habit)
    }
}

#[instrument(name = "create_habit", skip(app_state, body))]
pub async fn create_habit(
    State(app_state): State<AppState>,
    body: Result<Json<CreateHabitPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<HabitResponse>), ApiError> {
    let Json(body) = body?;
    let new_habit = body.into_new_habit()?;

    let service = &app_state.habit_service;
    let habit = service.create_habit(new_habit).await?;

    Ok((
        StatusCode::CREATED,
        Json(HabitResponse::new(habit, service.today())),
    ))
}

#[derive(Debug, Deserialize)]
pub struct ListHabitsQuery {
    category: Option<String>,
}

#[instrument(name = "list_habits", skip(app_state))]
pub async fn list_habits(
    State(app_state): State<AppState>,
    Query(query): Query<ListHabitsQuery>,
) -> Result<Json<Vec<HabitResponse>>, ApiError> {
    let category = match query.category.as_deref() {
        None | Some("all") => None,
        raw => parse_enum::<Category>("category", raw)?,
    };

    let service = &app_state.habit_service;
    let habits = service.list_habits(category).await?;

    Ok(Json(HabitResponse::list(habits, service.today())))
}

#[instrument(name = "get_habit", skip(app_state))]
pub async fn get_habit(
    State(app_state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<HabitResponse>, ApiError> {
    let Path(id) = id?;
    let service = &app_state.habit_service;
    let habit = service.get_habit(HabitId::new(id)).await?;

    Ok(Json(HabitResponse::new(habit, service.today())))
}

// ============================================================================
// Update / delete
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHabitPayload {
    name: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    description: Option<Option<String>>,
    icon: Option<String>,
    category: Option<String>,
    frequency: Option<String>,
    screen_time_goal: Option<Value>,
}

impl UpdateHabitPayload {
    fn into_update(self) -> Result<HabitUpdate, HabitError> {
        Ok(HabitUpdate {
            name: self.name,
            description: self.description,
            icon: self.icon,
            category: parse_enum("category", self.category.as_deref())?,
            frequency: parse_enum("frequency", self.frequency.as_deref())?,
            screen_time_goal: self
                .screen_time_goal
                .as_ref()
                .filter(|v| !v.is_null())
                .map(goal_minutes)
                .transpose()?,
        })
    }
}

#[instrument(name = "update_habit", skip(app_state, body))]
pub async fn update_habit(
    State(app_state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<UpdateHabitPayload>, JsonRejection>,
) -> Result<Json<HabitResponse>, ApiError> {
    let Path(id) = id?;
    let Json(body) = body?;
    let update = body.into_update()?;

    let service = &app_state.habit_service;
    let habit = service.update_habit(HabitId::new(id), update).await?;

    Ok(Json(HabitResponse::new(habit, service.today())))
}

#[instrument(name = "delete_habit", skip(app_state))]
pub async fn delete_habit(
    State(app_state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    app_state.habit_service.delete_habit(HabitId::new(id)).await?;

    Ok(Json(MessageResponse {
        message: "Habit deleted".to_string(),
    }))
}

// ============================================================================
// Day engines
// ============================================================================

#[instrument(name = "toggle_habit", skip(app_state))]
pub async fn toggle_habit(
    State(app_state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<HabitResponse>, ApiError> {
    let Path(id) = id?;
    let service = &app_state.habit_service;
    let habit = service.toggle_today(HabitId::new(id)).await?;

    Ok(Json(HabitResponse::new(habit, service.today())))
}

#[derive(Debug, Deserialize)]
pub struct ScreenTimePayload {
    #[serde(default)]
    minutes: Value,
}

#[instrument(name = "log_screen_time", skip(app_state, body))]
pub async fn log_screen_time(
    State(app_state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<ScreenTimePayload>, JsonRejection>,
) -> Result<Json<HabitResponse>, ApiError> {
    let Path(id) = id?;
    let Json(body) = body?;
    let minutes = whole_number("minutes", &body.minutes)?;

    let service = &app_state.habit_service;
    let habit = service.log_screen_time(HabitId::new(id), minutes).await?;

    Ok(Json(HabitResponse::new(habit, service.today())))
}
