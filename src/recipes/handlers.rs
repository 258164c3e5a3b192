use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use mongodb::bson::oid::ObjectId;
use serde_json::{Map, Value};
use tracing::{error, instrument, warn};

use crate::state::AppState;

use super::dto::{
    CreatedRecipeResponse, ErrorResponse, MessageResponse, RecipeDetailsResponse,
    RecipeListResponse, UpdatedRecipeResponse,
};

// --- public routers ---

pub fn read_router() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes))
        .route("/recipes/:recipe_id", get(get_recipe))
}

pub fn write_router() -> Router<AppState> {
    Router::new()
        .route("/recipes", post(create_recipe))
        .route("/recipes/:recipe_id", put(update_recipe).delete(delete_recipe))
}

// --- handlers ---

#[instrument(skip(state, body))]
pub async fn create_recipe(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<CreatedRecipeResponse>), (StatusCode, Json<ErrorResponse>)> {
    let recipe = state.store.insert(body).await.map_err(|e| {
        error!(error = %e, "create recipe failed");
        internal_error()
    })?;
    Ok((StatusCode::CREATED, Json(CreatedRecipeResponse { recipe })))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
) -> Result<Json<RecipeListResponse>, (StatusCode, Json<ErrorResponse>)> {
    let recipes = state.store.find_all().await.map_err(|e| {
        error!(error = %e, "list recipes failed");
        internal_error()
    })?;
    Ok(Json(RecipeListResponse { recipes }))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
) -> Response {
    let Ok(id) = ObjectId::parse_str(&recipe_id) else {
        warn!(%recipe_id, "rejected malformed recipe id");
        return wrong_id().into_response();
    };
    match state.store.find_by_id(id).await {
        Ok(Some(recipe)) => Json(RecipeDetailsResponse { user: recipe }).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(MessageResponse {
                message: "Recipe not found".into(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, %recipe_id, "get recipe failed");
            bad_request(e).into_response()
        }
    }
}

/// The id format is not pre-checked here; an unparsable id comes back
/// through the `{error}` path like any other store failure.
#[instrument(skip(state, body))]
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
    Json(body): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<UpdatedRecipeResponse>), (StatusCode, Json<ErrorResponse>)> {
    let id = ObjectId::parse_str(&recipe_id).map_err(|e| {
        warn!(%recipe_id, error = %e, "update with unparsable recipe id");
        bad_request(e)
    })?;
    let recipe = state.store.update_by_id(id, body).await.map_err(|e| {
        error!(error = %e, %recipe_id, "update recipe failed");
        bad_request(e)
    })?;
    Ok((StatusCode::ACCEPTED, Json(UpdatedRecipeResponse { recipe })))
}

#[instrument(skip(state))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
) -> Response {
    let Ok(id) = ObjectId::parse_str(&recipe_id) else {
        warn!(%recipe_id, "rejected malformed recipe id");
        return wrong_id().into_response();
    };
    // no existence check: a delete of an unknown id still reports success
    match state.store.delete_by_id(id).await {
        Ok(()) => (
            StatusCode::ACCEPTED,
            Json(MessageResponse {
                message: "recipe deleted".into(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, %recipe_id, "delete recipe failed");
            internal_error().into_response()
        }
    }
}

fn internal_error() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Status code: 500 (Internal Server Error)".into(),
        }),
    )
}

fn bad_request<E: std::fmt::Display>(e: E) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

fn wrong_id() -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(MessageResponse {
            message: "The id seems wrong".into(),
        }),
    )
}
