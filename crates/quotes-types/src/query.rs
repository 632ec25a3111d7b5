//! Query parameters and response envelopes

use crate::{Author, Category, QuoteWithAuthor, Tag};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Search filters. All supplied filters combine with AND.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Substring matched against quote text or author name
    #[serde(default)]
    pub q: Option<String>,
    /// Substring matched against author name
    #[serde(default)]
    pub author: Option<String>,
    /// Category slug, exact match
    #[serde(default)]
    pub category: Option<String>,
    /// Tag slug, exact match
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            q: None,
            author: None,
            category: None,
            tag: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl SearchParams {
    pub fn text(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Self::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_category(mut self, slug: impl Into<String>) -> Self {
        self.category = Some(slug.into());
        self
    }

    pub fn with_tag(mut self, slug: impl Into<String>) -> Self {
        self.tag = Some(slug.into());
        self
    }

    pub fn paged(mut self, page: u32, limit: u32) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }
}

/// One page of search hits plus the size of the whole filtered set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub quotes: Vec<QuoteWithAuthor>,
    pub total: usize,
}

impl SearchResult {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Pagination block returned alongside paged listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub total_pages: usize,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: usize) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(limit as usize)
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

/// `{quotes, pagination}` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotePage {
    pub quotes: Vec<QuoteWithAuthor>,
    pub pagination: Pagination,
}

/// Quotes filed under one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryQuotes {
    pub category: Category,
    pub quotes: Vec<QuoteWithAuthor>,
    pub pagination: Pagination,
}

/// Quotes carrying one tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagQuotes {
    pub tag: Tag,
    pub quotes: Vec<QuoteWithAuthor>,
    pub pagination: Pagination,
}

/// Quotes by one author
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorQuotes {
    pub author: Author,
    pub quotes: Vec<QuoteWithAuthor>,
    pub pagination: Pagination,
}

/// Row counts per table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStatus {
    pub total: usize,
    pub authors: usize,
    pub categories: usize,
    pub tags: usize,
}
