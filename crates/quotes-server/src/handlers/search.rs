//! Search handler

use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use quotes_core::{Pagination, QuotePage, SearchParams};
use tracing::debug;

const INVALID_PARAMS: &str = "Invalid search parameters";

pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<QuotePage>, ApiError> {
    let Query(params) = query.map_err(|rejection| {
        debug!("Rejected search query: {}", rejection);
        ApiError::bad_request(INVALID_PARAMS)
    })?;

    if params.page == 0 || params.limit == 0 || params.limit > state.max_page_size {
        return Err(ApiError::bad_request(INVALID_PARAMS));
    }

    let result = state
        .store
        .search_quotes(&params)
        .await
        .map_err(ApiError::store("Error searching quotes"))?;

    Ok(Json(QuotePage {
        quotes: result.quotes,
        pagination: Pagination::new(params.page, params.limit, result.total),
    }))
}
