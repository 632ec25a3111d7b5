//! Quote types

use crate::{Author, Category, Tag};
use serde::{Deserialize, Serialize};

/// A stored quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: u32,
    pub text: String,
    pub author_id: u32,
    pub source: Option<String>,
    pub is_featured: bool,
}

/// Quote creation payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuote {
    pub text: String,
    pub author_id: u32,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
}

impl NewQuote {
    pub fn new(text: impl Into<String>, author_id: u32) -> Self {
        Self {
            text: text.into(),
            author_id,
            source: None,
            is_featured: false,
        }
    }

    pub fn featured(mut self, is_featured: bool) -> Self {
        self.is_featured = is_featured;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// A quote joined with its author, categories and tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteWithAuthor {
    #[serde(flatten)]
    pub quote: Quote,
    pub author: Author,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
}

/// Quote ↔ category association row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteCategory {
    pub id: u32,
    pub quote_id: u32,
    pub category_id: u32,
}

/// Quote ↔ tag association row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteTag {
    pub id: u32,
    pub quote_id: u32,
    pub tag_id: u32,
}
