use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use newsdash_core::{Event, Page};

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::{PageQuery, SearchPageQuery, SearchRequest};

pub async fn list_news(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Event>>, ApiError> {
    let sort = query.sort_spec().map_err(ApiError::BadRequest)?;
    let page = state.news_service.list(query.page, query.size, sort).await?;
    Ok(Json(page))
}

pub async fn get_news(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Event>, ApiError> {
    Ok(Json(state.news_service.get(&id).await?))
}

pub async fn search_news(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchPageQuery>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<Page<Event>>, ApiError> {
    tracing::debug!(text = %req.text, page = query.page, "news search");
    let page = state.news_service.search(&req.text, query.page, query.size).await?;
    Ok(Json(page))
}
