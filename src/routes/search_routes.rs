use axum::{extract::State, routing::post, Json, Router};

use crate::controllers::search_controller::SearchController;
use crate::dto::search_dto::{SearchRequest, SearchResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_search_router() -> Router<AppState> {
    Router::new().route("/", post(search_buses))
}

async fn search_buses(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let controller = SearchController::new(state.pool.clone());
    let response = controller.search(request).await?;
    Ok(Json(response))
}
