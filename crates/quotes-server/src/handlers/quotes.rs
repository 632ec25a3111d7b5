//! Quote handlers

use super::PageQuery;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use quotes_core::{Pagination, QuotePage, QuoteWithAuthor};

const DEFAULT_LIMIT: u32 = 10;
const DEFAULT_FEATURED_LIMIT: u32 = 6;

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<QuotePage>, ApiError> {
    let page = query.page();
    let limit = query.limit(DEFAULT_LIMIT, state.max_page_size);

    let quotes = state
        .store
        .list_quotes(page, limit)
        .await
        .map_err(ApiError::store("Error fetching quotes"))?;
    let total = state
        .store
        .total_quotes()
        .await
        .map_err(ApiError::store("Error fetching quotes"))?;

    Ok(Json(QuotePage {
        quotes,
        pagination: Pagination::new(page, limit, total),
    }))
}

pub async fn featured(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<QuoteWithAuthor>>, ApiError> {
    let limit = query.limit(DEFAULT_FEATURED_LIMIT, state.max_page_size);

    let quotes = state
        .store
        .featured_quotes(limit as usize)
        .await
        .map_err(ApiError::store("Error fetching featured quotes"))?;
    Ok(Json(quotes))
}

pub async fn random(State(state): State<AppState>) -> Result<Json<QuoteWithAuthor>, ApiError> {
    state
        .store
        .random_quote()
        .await
        .map_err(ApiError::store("Error fetching random quote"))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("No quotes found"))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<QuoteWithAuthor>, ApiError> {
    let Ok(id) = id.parse::<u32>() else {
        return Err(ApiError::not_found("Quote not found"));
    };

    state
        .store
        .get_quote_by_id(id)
        .await
        .map_err(ApiError::store("Error fetching quote"))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Quote not found"))
}
