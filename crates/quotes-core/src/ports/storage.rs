//! Storage trait for the quote catalogue

use crate::Result;
use async_trait::async_trait;
use quotes_types::{
    Author, Category, CategoryWithCount, NewAuthor, NewCategory, NewQuote, NewTag, Quote,
    QuoteCategory, QuoteTag, QuoteWithAuthor, SearchParams, SearchResult, StoreStatus, Tag,
    TagWithCount,
};

/// Quote store
///
/// Pages are 1-indexed. Every quote handed out by a listing is enriched with
/// its author, categories and tags.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    // Quotes
    async fn list_quotes(&self, page: u32, limit: u32) -> Result<Vec<QuoteWithAuthor>>;
    async fn list_quotes_by_category(
        &self,
        slug: &str,
        page: u32,
        limit: u32,
    ) -> Result<Vec<QuoteWithAuthor>>;
    async fn list_quotes_by_tag(
        &self,
        slug: &str,
        page: u32,
        limit: u32,
    ) -> Result<Vec<QuoteWithAuthor>>;
    async fn list_quotes_by_author(
        &self,
        author_id: u32,
        page: u32,
        limit: u32,
    ) -> Result<Vec<QuoteWithAuthor>>;
    async fn get_quote_by_id(&self, id: u32) -> Result<Option<QuoteWithAuthor>>;
    async fn random_quote(&self) -> Result<Option<QuoteWithAuthor>>;
    async fn featured_quotes(&self, limit: usize) -> Result<Vec<QuoteWithAuthor>>;
    async fn search_quotes(&self, params: &SearchParams) -> Result<SearchResult>;
    async fn create_quote(&self, quote: NewQuote) -> Result<Quote>;
    async fn total_quotes(&self) -> Result<usize>;
    async fn status(&self) -> Result<StoreStatus>;

    // Authors
    async fn list_authors(&self, page: u32, limit: u32) -> Result<Vec<Author>>;
    async fn get_author_by_id(&self, id: u32) -> Result<Option<Author>>;
    async fn get_author_by_name(&self, name: &str) -> Result<Option<Author>>;
    async fn popular_authors(&self, limit: usize) -> Result<Vec<Author>>;
    async fn create_author(&self, author: NewAuthor) -> Result<Author>;

    // Categories
    async fn list_categories(&self) -> Result<Vec<Category>>;
    async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>>;
    async fn create_category(&self, category: NewCategory) -> Result<Category>;
    async fn categories_with_count(&self) -> Result<Vec<CategoryWithCount>>;

    // Tags
    async fn list_tags(&self) -> Result<Vec<Tag>>;
    async fn tags_with_count(&self) -> Result<Vec<TagWithCount>>;
    async fn popular_tags(&self, limit: usize) -> Result<Vec<Tag>>;
    async fn get_tag_by_slug(&self, slug: &str) -> Result<Option<Tag>>;
    async fn create_tag(&self, tag: NewTag) -> Result<Tag>;

    // Relationships
    async fn add_quote_category(&self, quote_id: u32, category_id: u32) -> Result<QuoteCategory>;
    async fn add_quote_tag(&self, quote_id: u32, tag_id: u32) -> Result<QuoteTag>;
}
