use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use tower_http::services::ServeDir;

use crate::{
    errors::{WebError, WebResult},
    models::{RecipeDraft, RecipeEnvelope, RecipeListEnvelope},
    store::RecipeStore,
};

/// Shared handler state. The store is constructed once in `main` and
/// injected here; handlers hold no other state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecipeStore>,
}

/// Build the full router: the JSON resource API, the informational root
/// route, the readiness check, and static files served from `public_dir`
/// at the root path space.
pub fn app(state: AppState, public_dir: &str) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route(
            "/recipes/:id",
            get(get_recipe).patch(update_recipe).delete(delete_recipe),
        )
        .fallback_service(ServeDir::new(public_dir))
        .layer(
            tower_http::compression::CompressionLayer::new()
                .quality(tower_http::CompressionLevel::Fastest),
        )
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

// Informational only; the resource API lives under /recipes.
async fn root() -> Html<&'static str> {
    Html("<h1>Recipe Service</h1>")
}

/// Readiness gate: reports whether the store currently answers a ping.
async fn health(State(state): State<AppState>) -> StatusCode {
    match state.store.ping().await {
        Ok(()) => StatusCode::OK,
        Err(err) => {
            tracing::warn!(error = %err, "store ping failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn create_recipe(
    State(state): State<AppState>,
    Json(draft): Json<RecipeDraft>,
) -> WebResult<impl IntoResponse> {
    let recipe = state.store.insert(draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(RecipeEnvelope {
            message: "Recipe created successfully.".into(),
            recipe,
        }),
    ))
}

async fn list_recipes(State(state): State<AppState>) -> WebResult<Json<RecipeListEnvelope>> {
    let recipes = state.store.find_all().await?;
    Ok(Json(RecipeListEnvelope {
        message: "Fetched all recipes successfully.".into(),
        recipes,
    }))
}

async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> WebResult<Json<RecipeEnvelope>> {
    let recipe = state
        .store
        .find_by_id(&id)
        .await?
        .ok_or(WebError::NotFound)?;
    Ok(Json(RecipeEnvelope {
        message: format!("Fetched recipe {id} successfully."),
        recipe,
    }))
}

async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<RecipeDraft>,
) -> WebResult<Json<RecipeEnvelope>> {
    let recipe = state
        .store
        .update_by_id(&id, draft)
        .await?
        .ok_or(WebError::NotFound)?;
    Ok(Json(RecipeEnvelope {
        message: "Recipe updated successfully.".into(),
        recipe,
    }))
}

async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> WebResult<Json<RecipeEnvelope>> {
    let recipe = state
        .store
        .delete_by_id(&id)
        .await?
        .ok_or(WebError::NotFound)?;
    Ok(Json(RecipeEnvelope {
        message: "Recipe deleted successfully.".into(),
        recipe,
    }))
}
