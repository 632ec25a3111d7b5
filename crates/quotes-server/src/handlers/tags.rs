//! Tag handlers

use super::{lenient, PageQuery};
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use quotes_core::{Pagination, TagQuotes};
use serde::Deserialize;

const DEFAULT_LIMIT: u32 = 10;
const DEFAULT_CLOUD_LIMIT: u32 = 14;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    limit: Option<String>,
    count: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let limit = lenient(query.limit.as_deref(), DEFAULT_CLOUD_LIMIT).min(state.max_page_size);
    let store_err = ApiError::store("Error fetching tags");

    if query.count.as_deref() == Some("true") {
        let mut tags = state.store.tags_with_count().await.map_err(store_err)?;
        tags.truncate(limit as usize);
        Ok(Json(tags).into_response())
    } else {
        let tags = state.store.popular_tags(limit as usize).await.map_err(store_err)?;
        Ok(Json(tags).into_response())
    }
}

pub async fn get(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<TagQuotes>, ApiError> {
    let page = query.page();
    let limit = query.limit(DEFAULT_LIMIT, state.max_page_size);

    let tag = state
        .store
        .get_tag_by_slug(&slug)
        .await
        .map_err(ApiError::store("Error fetching tag"))?
        .ok_or_else(|| ApiError::not_found("Tag not found"))?;

    let total = state
        .store
        .tags_with_count()
        .await
        .map_err(ApiError::store("Error fetching tag"))?
        .into_iter()
        .find(|counted| counted.tag.id == tag.id)
        .map(|counted| counted.quote_count)
        .unwrap_or(0);

    let quotes = state
        .store
        .list_quotes_by_tag(&slug, page, limit)
        .await
        .map_err(ApiError::store("Error fetching tag"))?;

    Ok(Json(TagQuotes {
        tag,
        quotes,
        pagination: Pagination::new(page, limit, total),
    }))
}
