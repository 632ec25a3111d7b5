//! HTTP handlers

pub mod authors;
pub mod categories;
pub mod quotes;
pub mod search;
pub mod status;
pub mod tags;

use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `?page&limit` as sent by the client. Anything missing, non-numeric or zero
/// falls back to the route's default.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
    limit: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> u32 {
        lenient(self.page.as_deref(), 1)
    }

    pub fn limit(&self, default: u32, max: u32) -> u32 {
        lenient(self.limit.as_deref(), default).min(max)
    }
}

/// Parses a positive integer, falling back to `default`.
pub fn lenient(value: Option<&str>, default: u32) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_paging() {
        assert_eq!(lenient(None, 10), 10);
        assert_eq!(lenient(Some("25"), 10), 25);
        assert_eq!(lenient(Some("0"), 10), 10);
        assert_eq!(lenient(Some("-3"), 10), 10);
        assert_eq!(lenient(Some("abc"), 10), 10);

        let query = PageQuery {
            page: Some("3".to_string()),
            limit: Some("500".to_string()),
        };
        assert_eq!(query.page(), 3);
        assert_eq!(query.limit(10, 100), 100);
        assert_eq!(PageQuery::default().limit(6, 100), 6);
    }
}
