//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use study_pack_core::{Pack, StoreError};
use tracing::error;
use utoipa::{IntoParams, OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        list_packs_handler,
        get_pack_handler,
        create_pack_handler,
        generate_pack_handler,
        delete_pack_handler,
        delete_all_packs_handler,
    ),
    components(
        schemas(PackView, PackDetail, FlashcardDto, QuizQuestionDto, CreatePackRequest)
    ),
    tags(
        (name = "Study Packs API", description = "Create, list, inspect and delete study packs.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

const NO_SUMMARY: &str = "No summary yet.";

/// The payload for both manual and generated pack creation.
#[derive(Deserialize, ToSchema)]
pub struct CreatePackRequest {
    pub title: String,
    #[serde(default)]
    pub notes: String,
}

/// Destructive endpoints require `confirm=true`.
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConfirmParams {
    #[serde(default)]
    pub confirm: bool,
}

/// What a pack list entry shows: headline data, counts and a preview.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackView {
    pub id: String,
    pub title: String,
    pub created_at: String,
    pub summary: String,
    pub key_point_count: usize,
    pub flashcard_count: usize,
    pub quiz_question_count: usize,
    pub key_points: Vec<String>,
    pub example_question: Option<String>,
}

impl From<&Pack> for PackView {
    fn from(pack: &Pack) -> Self {
        let summary = if pack.summary.is_empty() {
            NO_SUMMARY.to_string()
        } else {
            pack.summary.clone()
        };
        Self {
            id: pack.id.clone(),
            title: pack.title.clone(),
            created_at: pack.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            summary,
            key_point_count: pack.key_points.len(),
            flashcard_count: pack.flashcards.len(),
            quiz_question_count: pack.quiz_questions.len(),
            key_points: pack.key_points.clone(),
            example_question: pack.quiz_questions.first().map(|q| q.question.clone()),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct FlashcardDto {
    pub front: String,
    pub back: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestionDto {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
}

/// Every field of a pack.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackDetail {
    pub id: String,
    pub title: String,
    pub notes: String,
    pub summary: String,
    pub key_points: Vec<String>,
    pub flashcards: Vec<FlashcardDto>,
    pub quiz_questions: Vec<QuizQuestionDto>,
    pub created_at: DateTime<Utc>,
}

impl From<Pack> for PackDetail {
    fn from(pack: Pack) -> Self {
        Self {
            id: pack.id,
            title: pack.title,
            notes: pack.notes,
            summary: pack.summary,
            key_points: pack.key_points,
            flashcards: pack
                .flashcards
                .into_iter()
                .map(|c| FlashcardDto {
                    front: c.front,
                    back: c.back,
                })
                .collect(),
            quiz_questions: pack
                .quiz_questions
                .into_iter()
                .map(|q| QuizQuestionDto {
                    question: q.question,
                    options: q.options,
                    correct_index: q.correct_index,
                    explanation: q.explanation,
                })
                .collect(),
            created_at: pack.created_at,
        }
    }
}

fn store_error_response(e: StoreError) -> (StatusCode, String) {
    match e {
        StoreError::Validation(message) => (StatusCode::BAD_REQUEST, message),
        StoreError::Generation(detail) => {
            error!("Failed to generate pack: {}", detail);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong generating the pack.".to_string(),
            )
        }
    }
}

fn require_confirmation(params: &ConfirmParams) -> Result<(), (StatusCode, String)> {
    if params.confirm {
        Ok(())
    } else {
        Err((
            StatusCode::BAD_REQUEST,
            "Deletion must be confirmed with confirm=true".to_string(),
        ))
    }
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// List all packs, most recent first.
#[utoipa::path(
    get,
    path = "/packs",
    responses(
        (status = 200, description = "Packs in display order", body = [PackView])
    )
)]
pub async fn list_packs_handler(State(app_state): State<Arc<AppState>>) -> Json<Vec<PackView>> {
    let packs = app_state.store.list_for_display().await;
    Json(packs.iter().map(PackView::from).collect())
}

/// Fetch one pack with its flashcards and quiz.
#[utoipa::path(
    get,
    path = "/packs/{id}",
    responses(
        (status = 200, description = "The pack", body = PackDetail),
        (status = 404, description = "No pack with this id")
    ),
    params(
        ("id" = String, Path, description = "The pack id.")
    )
)]
pub async fn get_pack_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PackDetail>, (StatusCode, String)> {
    app_state
        .store
        .get(&id)
        .await
        .map(|pack| Json(PackDetail::from(pack)))
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Pack {} not found", id)))
}

/// Create a pack from a title and notes without deriving anything.
#[utoipa::path(
    post,
    path = "/packs",
    request_body = CreatePackRequest,
    responses(
        (status = 201, description = "Pack created", body = PackDetail),
        (status = 400, description = "Title is missing")
    )
)]
pub async fn create_pack_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<CreatePackRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let pack = app_state
        .store
        .create_manual(&req.title, &req.notes)
        .await
        .map_err(store_error_response)?;
    Ok((StatusCode::CREATED, Json(PackDetail::from(pack))))
}

/// Create a pack whose summary, key points, flashcards and quiz are derived from the notes.
#[utoipa::path(
    post,
    path = "/packs/generate",
    request_body = CreatePackRequest,
    responses(
        (status = 201, description = "Pack generated", body = PackDetail),
        (status = 400, description = "Title or notes are missing"),
        (status = 500, description = "Generation failed")
    )
)]
pub async fn generate_pack_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<CreatePackRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let pack = app_state
        .store
        .create_generated(&req.title, &req.notes)
        .await
        .map_err(store_error_response)?;
    Ok((StatusCode::CREATED, Json(PackDetail::from(pack))))
}

/// Delete one pack. Deleting an unknown id succeeds.
#[utoipa::path(
    delete,
    path = "/packs/{id}",
    responses(
        (status = 204, description = "Pack deleted"),
        (status = 400, description = "Deletion was not confirmed")
    ),
    params(
        ("id" = String, Path, description = "The pack id."),
        ConfirmParams
    )
)]
pub async fn delete_pack_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<ConfirmParams>,
) -> Result<StatusCode, (StatusCode, String)> {
    require_confirmation(&params)?;
    app_state.store.delete_one(&id).await;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete every pack.
#[utoipa::path(
    delete,
    path = "/packs",
    responses(
        (status = 204, description = "All packs deleted"),
        (status = 400, description = "Deletion was not confirmed")
    ),
    params(ConfirmParams)
)]
pub async fn delete_all_packs_handler(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<ConfirmParams>,
) -> Result<StatusCode, (StatusCode, String)> {
    require_confirmation(&params)?;
    app_state.store.delete_all().await;
    Ok(StatusCode::NO_CONTENT)
}
