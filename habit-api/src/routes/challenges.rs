use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    adapters::inbound::http::{ChallengeResponse, HabitResponse},
    app_state::AppState,
    domain::{
        models::{ChallengeId, ChallengeType, NewChallenge},
        HabitError,
    },
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_challenges).post(create_challenge))
        .route("/:id/join", post(join_challenge))
}

#[instrument(name = "list_challenges", skip(app_state))]
pub async fn list_challenges(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ChallengeResponse>>, ApiError> {
    let challenges = app_state.challenge_service.list_challenges().await?;
    Ok(Json(challenges.into_iter().map(Into::into).collect()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChallengePayload {
    #[serde(default)]
    title: String,
    description: Option<String>,
    #[serde(default)]
    duration: i64,
    #[serde(default)]
    habits: Vec<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl CreateChallengePayload {
    fn into_new_challenge(self) -> Result<NewChallenge, HabitError> {
        let duration = u32::try_from(self.duration)
            .ok()
            .filter(|d| i32::try_from(*d).is_ok())
            .ok_or_else(|| HabitError::validation("duration", "must be a positive number of days"))?;

        let mut challenge = NewChallenge::new(self.title, duration).with_habits(self.habits);
        if let Some(description) = self.description {
            challenge = challenge.with_description(description);
        }
        if let Some(raw) = self.kind {
            let kind: ChallengeType = raw
                .parse()
                .map_err(|_| HabitError::validation("type", format!("unknown value '{raw}'")))?;
            challenge = challenge.with_kind(kind);
        }
        Ok(challenge)
    }
}

#[instrument(name = "create_challenge", skip(app_state, body))]
pub async fn create_challenge(
    State(app_state): State<AppState>,
    body: Result<Json<CreateChallengePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ChallengeResponse>), ApiError> {
    let Json(body) = body?;
    let challenge = app_state
        .challenge_service
        .create_challenge(body.into_new_challenge()?)
        .await?;

    Ok((StatusCode::CREATED, Json(challenge.into())))
}

#[instrument(name = "join_challenge", skip(app_state))]
pub async fn join_challenge(
    State(app_state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<(StatusCode, Json<Vec<HabitResponse>>), ApiError> {
    let Path(id) = id?;
    let habits = app_state
        .challenge_service
        .join_challenge(ChallengeId::new(id))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(HabitResponse::list(habits, app_state.habit_service.today())),
    ))
}
