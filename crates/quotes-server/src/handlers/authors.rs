//! Author handlers

use super::PageQuery;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use quotes_core::{Author, AuthorQuotes, Pagination};

const DEFAULT_LIMIT: u32 = 10;
const DEFAULT_POPULAR_LIMIT: u32 = 5;

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<Author>>, ApiError> {
    let page = query.page();
    let limit = query.limit(DEFAULT_LIMIT, state.max_page_size);

    let authors = state
        .store
        .list_authors(page, limit)
        .await
        .map_err(ApiError::store("Error fetching authors"))?;
    Ok(Json(authors))
}

pub async fn popular(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<Author>>, ApiError> {
    let limit = query.limit(DEFAULT_POPULAR_LIMIT, state.max_page_size);

    let authors = state
        .store
        .popular_authors(limit as usize)
        .await
        .map_err(ApiError::store("Error fetching popular authors"))?;
    Ok(Json(authors))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<AuthorQuotes>, ApiError> {
    let Ok(id) = id.parse::<u32>() else {
        return Err(ApiError::not_found("Author not found"));
    };

    let author = state
        .store
        .get_author_by_id(id)
        .await
        .map_err(ApiError::store("Error fetching author"))?
        .ok_or_else(|| ApiError::not_found("Author not found"))?;

    let page = query.page();
    let limit = query.limit(DEFAULT_LIMIT, state.max_page_size);

    // quote_count is maintained on every insert
    let total = author.quote_count as usize;
    let quotes = state
        .store
        .list_quotes_by_author(id, page, limit)
        .await
        .map_err(ApiError::store("Error fetching author"))?;

    Ok(Json(AuthorQuotes {
        author,
        quotes,
        pagination: Pagination::new(page, limit, total),
    }))
}
