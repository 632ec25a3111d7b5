//! Category handlers

use super::PageQuery;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use quotes_core::{CategoryQuotes, Pagination};
use serde::Deserialize;

const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    count: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let store_err = ApiError::store("Error fetching categories");

    if query.count.as_deref() == Some("true") {
        let categories = state.store.categories_with_count().await.map_err(store_err)?;
        Ok(Json(categories).into_response())
    } else {
        let categories = state.store.list_categories().await.map_err(store_err)?;
        Ok(Json(categories).into_response())
    }
}

pub async fn get(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<CategoryQuotes>, ApiError> {
    let page = query.page();
    let limit = query.limit(DEFAULT_LIMIT, state.max_page_size);

    let category = state
        .store
        .get_category_by_slug(&slug)
        .await
        .map_err(ApiError::store("Error fetching category"))?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    let total = state
        .store
        .categories_with_count()
        .await
        .map_err(ApiError::store("Error fetching category"))?
        .into_iter()
        .find(|counted| counted.category.id == category.id)
        .map(|counted| counted.quote_count)
        .unwrap_or(0);

    let quotes = state
        .store
        .list_quotes_by_category(&slug, page, limit)
        .await
        .map_err(ApiError::store("Error fetching category"))?;

    Ok(Json(CategoryQuotes {
        category,
        quotes,
        pagination: Pagination::new(page, limit, total),
    }))
}
