pub mod logging;

use axum::Json;
use axum::body::Bytes;
use axum::extract::Path;
use axum::middleware;
use axum::response::Html;
use axum::{Router, extract::State, http::StatusCode, routing::{get, post}};
use serde::de::{self, DeserializeOwned};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/courses", get(list_courses))
        .route("/course", post(create_course))
        .route(
            "/courses/{id}",
            get(show_course).put(update_course).delete(delete_course),
        )
        .layer(middleware::from_fn(logging::log_requests))
        .with_state(state)
}

/// Decodes a JSON object body, telling an absent body apart from a malformed one.
///
/// A literal `null` decodes as an object with every field missing, so it fails
/// the emptiness check rather than parsing.
fn decode_payload<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::MissingPayload);
    }
    let value: Value = serde_json::from_slice(body).map_err(AppError::MalformedPayload)?;
    let object = match value {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            return Err(AppError::MalformedPayload(de::Error::custom(format!(
                "expected a JSON object, found {other}"
            ))));
        }
    };
    serde_json::from_value(Value::Object(object)).map_err(AppError::MalformedPayload)
}

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(AppError::InvalidId)
}

async fn home() -> Html<&'static str> {
    Html("<h2>Welcome to home page</h2>")
}

async fn health(State(state): State<AppState>) -> Result<Json<&'static str>, AppError> {
    state.courses.ping().await?;
    Ok(Json("ok"))
}

async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = state.courses.get_all().await?;
    Ok(Json(courses))
}

async fn create_course(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let params: CreateCourseParams = decode_payload(&body)?;
    if params.is_empty() {
        return Err(AppError::EmptyPayload);
    }
    let course = state.courses.create(params).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

async fn show_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Course>, AppError> {
    let id = parse_id(&id)?;
    let course = state.courses.get_by_id(id).await?;
    Ok(Json(course))
}

async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Course>, AppError> {
    let id = parse_id(&id)?;
    let params: UpdateCourseParams = decode_payload(&body)?;
    if params.is_empty() {
        return Err(AppError::InvalidPayload);
    }
    let course = state.courses.update(id, params).await?;
    Ok(Json(course))
}

async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    state.courses.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
