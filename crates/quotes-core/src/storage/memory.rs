//! In-memory quote store
//!
//! Six id-keyed tables behind one coarse `RwLock`. Ids are handed out by
//! per-table counters starting at 1 and never reused, so iterating a
//! `BTreeMap` yields rows in insertion order.

use crate::error::{QuoteError, Result};
use crate::ports::QuoteStore;
use async_trait::async_trait;
use quotes_types::{
    Author, Category, CategoryWithCount, NewAuthor, NewCategory, NewQuote, NewTag, Quote,
    QuoteCategory, QuoteTag, QuoteWithAuthor, SearchParams, SearchResult, StoreStatus, Tag,
    TagWithCount,
};
use rand::Rng;
use std::collections::{BTreeMap, HashMap, HashSet};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// In-memory implementation of [`QuoteStore`]
pub struct MemStorage {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    quotes: BTreeMap<u32, Quote>,
    authors: BTreeMap<u32, Author>,
    categories: BTreeMap<u32, Category>,
    tags: BTreeMap<u32, Tag>,
    quote_categories: BTreeMap<u32, QuoteCategory>,
    quote_tags: BTreeMap<u32, QuoteTag>,
    // (quote_id, category_id) -> association row id
    category_pairs: HashMap<(u32, u32), u32>,
    // (quote_id, tag_id) -> association row id
    tag_pairs: HashMap<(u32, u32), u32>,
    ids: IdCounters,
}

struct IdCounters {
    quote: u32,
    author: u32,
    category: u32,
    tag: u32,
    quote_category: u32,
    quote_tag: u32,
}

impl Default for IdCounters {
    fn default() -> Self {
        Self {
            quote: 1,
            author: 1,
            category: 1,
            tag: 1,
            quote_category: 1,
            quote_tag: 1,
        }
    }
}

fn next_id(counter: &mut u32) -> u32 {
    let id = *counter;
    *counter += 1;
    id
}

/// Number of rows to skip for a 1-indexed page. Page 0 reads as page 1.
fn offset(page: u32, limit: u32) -> usize {
    (page.max(1) as usize - 1).saturating_mul(limit as usize)
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn require_non_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(QuoteError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(())
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Random quote using the caller's generator
    pub async fn random_quote_with<R: Rng>(
        &self,
        rng: &mut R,
    ) -> Option<QuoteWithAuthor> {
        self.tables.read().await.random_quote(rng)
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Tables {
    fn category_id_by_slug(&self, slug: &str) -> Option<u32> {
        self.categories
            .values()
            .find(|category| category.slug == slug)
            .map(|category| category.id)
    }

    fn tag_id_by_slug(&self, slug: &str) -> Option<u32> {
        self.tags
            .values()
            .find(|tag| tag.slug == slug)
            .map(|tag| tag.id)
    }

    /// Join a batch of quotes with authors, categories and tags.
    ///
    /// Each association table is walked once for the whole batch.
    fn enrich<'a>(&self, quotes: impl IntoIterator<Item = &'a Quote>) -> Vec<QuoteWithAuthor> {
        let quotes: Vec<&Quote> = quotes.into_iter().collect();
        if quotes.is_empty() {
            return Vec::new();
        }
        let wanted: HashSet<u32> = quotes.iter().map(|quote| quote.id).collect();

        let mut categories_by_quote: HashMap<u32, Vec<Category>> = HashMap::new();
        for row in self.quote_categories.values() {
            if !wanted.contains(&row.quote_id) {
                continue;
            }
            if let Some(category) = self.categories.get(&row.category_id) {
                categories_by_quote
                    .entry(row.quote_id)
                    .or_default()
                    .push(category.clone());
            }
        }

        let mut tags_by_quote: HashMap<u32, Vec<Tag>> = HashMap::new();
        for row in self.quote_tags.values() {
            if !wanted.contains(&row.quote_id) {
                continue;
            }
            if let Some(tag) = self.tags.get(&row.tag_id) {
                tags_by_quote.entry(row.quote_id).or_default().push(tag.clone());
            }
        }

        quotes
            .into_iter()
            .map(|quote| QuoteWithAuthor {
                quote: quote.clone(),
                author: self
                    .authors
                    .get(&quote.author_id)
                    .cloned()
                    .unwrap_or_else(Author::unknown),
                categories: categories_by_quote.remove(&quote.id).unwrap_or_default(),
                tags: tags_by_quote.remove(&quote.id).unwrap_or_default(),
            })
            .collect()
    }

    /// Picks an id in `[1, quote count]` and falls back to quote 1 on a miss.
    fn random_quote<R: Rng>(&self, rng: &mut R) -> Option<QuoteWithAuthor> {
        if self.quotes.is_empty() {
            return None;
        }
        let id = rng.gen_range(1..=self.quotes.len() as u32);
        let quote = self.quotes.get(&id).or_else(|| self.quotes.get(&1))?;
        self.enrich([quote]).pop()
    }

    fn search(&self, params: &SearchParams) -> SearchResult {
        let text = non_blank(&params.q).map(str::to_lowercase);
        let text_authors: HashSet<u32> = match &text {
            Some(needle) => self
                .authors
                .values()
                .filter(|author| author.name.to_lowercase().contains(needle.as_str()))
                .map(|author| author.id)
                .collect(),
            None => HashSet::new(),
        };

        let author_ids = match non_blank(&params.author) {
            Some(name) => {
                let needle = name.to_lowercase();
                let ids: HashSet<u32> = self
                    .authors
                    .values()
                    .filter(|author| author.name.to_lowercase().contains(&needle))
                    .map(|author| author.id)
                    .collect();
                if ids.is_empty() {
                    return SearchResult::empty();
                }
                Some(ids)
            }
            None => None,
        };

        let category_quotes = match non_blank(&params.category) {
            Some(slug) => {
                let Some(category_id) = self.category_id_by_slug(slug) else {
                    return SearchResult::empty();
                };
                let ids: HashSet<u32> = self
                    .quote_categories
                    .values()
                    .filter(|row| row.category_id == category_id)
                    .map(|row| row.quote_id)
                    .collect();
                if ids.is_empty() {
                    return SearchResult::empty();
                }
                Some(ids)
            }
            None => None,
        };

        let tag_quotes = match non_blank(&params.tag) {
            Some(slug) => {
                let Some(tag_id) = self.tag_id_by_slug(slug) else {
                    return SearchResult::empty();
                };
                let ids: HashSet<u32> = self
                    .quote_tags
                    .values()
                    .filter(|row| row.tag_id == tag_id)
                    .map(|row| row.quote_id)
                    .collect();
                if ids.is_empty() {
                    return SearchResult::empty();
                }
                Some(ids)
            }
            None => None,
        };

        let skip = offset(params.page, params.limit);
        let limit = params.limit as usize;
        let mut total = 0;
        let mut hits = Vec::new();

        for quote in self.quotes.values() {
            if let Some(needle) = &text {
                let matches = quote.text.to_lowercase().contains(needle.as_str())
                    || text_authors.contains(&quote.author_id);
                if !matches {
                    continue;
                }
            }
            if let Some(ids) = &author_ids {
                if !ids.contains(&quote.author_id) {
                    continue;
                }
            }
            if let Some(ids) = &category_quotes {
                if !ids.contains(&quote.id) {
                    continue;
                }
            }
            if let Some(ids) = &tag_quotes {
                if !ids.contains(&quote.id) {
                    continue;
                }
            }

            if total >= skip && hits.len() < limit {
                hits.push(quote);
            }
            total += 1;
        }

        SearchResult {
            quotes: self.enrich(hits),
            total,
        }
    }

    fn category_counts(&self) -> HashMap<u32, usize> {
        let mut counts = HashMap::new();
        for row in self.quote_categories.values() {
            *counts.entry(row.category_id).or_insert(0) += 1;
        }
        counts
    }

    fn tag_counts(&self) -> HashMap<u32, usize> {
        let mut counts = HashMap::new();
        for row in self.quote_tags.values() {
            *counts.entry(row.tag_id).or_insert(0) += 1;
        }
        counts
    }
}

#[async_trait]
impl QuoteStore for MemStorage {
    async fn list_quotes(&self, page: u32, limit: u32) -> Result<Vec<QuoteWithAuthor>> {
        let tables = self.tables.read().await;
        let page_quotes = tables
            .quotes
            .values()
            .skip(offset(page, limit))
            .take(limit as usize);
        Ok(tables.enrich(page_quotes))
    }

    async fn list_quotes_by_category(
        &self,
        slug: &str,
        page: u32,
        limit: u32,
    ) -> Result<Vec<QuoteWithAuthor>> {
        let tables = self.tables.read().await;
        let Some(category_id) = tables.category_id_by_slug(slug) else {
            return Ok(Vec::new());
        };

        let page_quotes = tables
            .quote_categories
            .values()
            .filter(|row| row.category_id == category_id)
            .skip(offset(page, limit))
            .take(limit as usize)
            .filter_map(|row| tables.quotes.get(&row.quote_id));
        Ok(tables.enrich(page_quotes))
    }

    async fn list_quotes_by_tag(
        &self,
        slug: &str,
        page: u32,
        limit: u32,
    ) -> Result<Vec<QuoteWithAuthor>> {
        let tables = self.tables.read().await;
        let Some(tag_id) = tables.tag_id_by_slug(slug) else {
            return Ok(Vec::new());
        };

        let page_quotes = tables
            .quote_tags
            .values()
            .filter(|row| row.tag_id == tag_id)
            .skip(offset(page, limit))
            .take(limit as usize)
            .filter_map(|row| tables.quotes.get(&row.quote_id));
        Ok(tables.enrich(page_quotes))
    }

    async fn list_quotes_by_author(
        &self,
        author_id: u32,
        page: u32,
        limit: u32,
    ) -> Result<Vec<QuoteWithAuthor>> {
        let tables = self.tables.read().await;
        let page_quotes = tables
            .quotes
            .values()
            .filter(|quote| quote.author_id == author_id)
            .skip(offset(page, limit))
            .take(limit as usize);
        Ok(tables.enrich(page_quotes))
    }

    async fn get_quote_by_id(&self, id: u32) -> Result<Option<QuoteWithAuthor>> {
        let tables = self.tables.read().await;
        Ok(tables
            .quotes
            .get(&id)
            .and_then(|quote| tables.enrich([quote]).pop()))
    }

    async fn random_quote(&self) -> Result<Option<QuoteWithAuthor>> {
        let tables = self.tables.read().await;
        Ok(tables.random_quote(&mut rand::thread_rng()))
    }

    async fn featured_quotes(&self, limit: usize) -> Result<Vec<QuoteWithAuthor>> {
        let tables = self.tables.read().await;
        let featured = tables
            .quotes
            .values()
            .filter(|quote| quote.is_featured)
            .take(limit);
        Ok(tables.enrich(featured))
    }

    async fn search_quotes(&self, params: &SearchParams) -> Result<SearchResult> {
        let tables = self.tables.read().await;
        Ok(tables.search(params))
    }

    async fn create_quote(&self, quote: NewQuote) -> Result<Quote> {
        require_non_blank("quote text", &quote.text)?;

        let mut tables = self.tables.write().await;
        let id = next_id(&mut tables.ids.quote);
        let record = Quote {
            id,
            text: quote.text,
            author_id: quote.author_id,
            source: quote.source.filter(|source| !source.is_empty()),
            is_featured: quote.is_featured,
        };
        tables.quotes.insert(id, record.clone());

        match tables.authors.get_mut(&record.author_id) {
            Some(author) => author.quote_count += 1,
            None => warn!(
                quote_id = id,
                author_id = record.author_id,
                "Quote references unknown author, quote count not updated"
            ),
        }

        debug!("Created quote {} by author {}", id, record.author_id);
        Ok(record)
    }

    async fn total_quotes(&self) -> Result<usize> {
        Ok(self.tables.read().await.quotes.len())
    }

    async fn status(&self) -> Result<StoreStatus> {
        let tables = self.tables.read().await;
        Ok(StoreStatus {
            total: tables.quotes.len(),
            authors: tables.authors.len(),
            categories: tables.categories.len(),
            tags: tables.tags.len(),
        })
    }

    async fn list_authors(&self, page: u32, limit: u32) -> Result<Vec<Author>> {
        let tables = self.tables.read().await;
        Ok(tables
            .authors
            .values()
            .skip(offset(page, limit))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn get_author_by_id(&self, id: u32) -> Result<Option<Author>> {
        Ok(self.tables.read().await.authors.get(&id).cloned())
    }

    async fn get_author_by_name(&self, name: &str) -> Result<Option<Author>> {
        let needle = name.to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .authors
            .values()
            .find(|author| author.name.to_lowercase() == needle)
            .cloned())
    }

    async fn popular_authors(&self, limit: usize) -> Result<Vec<Author>> {
        let tables = self.tables.read().await;
        let mut authors: Vec<Author> = tables.authors.values().cloned().collect();
        // Stable: ties keep insertion order
        authors.sort_by(|a, b| b.quote_count.cmp(&a.quote_count));
        authors.truncate(limit);
        Ok(authors)
    }

    async fn create_author(&self, author: NewAuthor) -> Result<Author> {
        require_non_blank("author name", &author.name)?;

        let mut tables = self.tables.write().await;
        let id = next_id(&mut tables.ids.author);
        // Quotes may have been filed under this id before the author existed
        let quote_count = tables
            .quotes
            .values()
            .filter(|quote| quote.author_id == id)
            .count() as u32;
        let record = Author {
            id,
            name: author.name,
            bio: author.bio,
            quote_count,
        };
        tables.authors.insert(id, record.clone());
        debug!("Created author {}: {}", id, record.name);
        Ok(record)
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.tables.read().await.categories.values().cloned().collect())
    }

    async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .values()
            .find(|category| category.slug == slug)
            .cloned())
    }

    async fn create_category(&self, category: NewCategory) -> Result<Category> {
        require_non_blank("category name", &category.name)?;
        require_non_blank("category slug", &category.slug)?;

        let mut tables = self.tables.write().await;
        let id = next_id(&mut tables.ids.category);
        let record = Category {
            id,
            name: category.name,
            slug: category.slug,
        };
        tables.categories.insert(id, record.clone());
        debug!("Created category {}: {}", id, record.slug);
        Ok(record)
    }

    async fn categories_with_count(&self) -> Result<Vec<CategoryWithCount>> {
        let tables = self.tables.read().await;
        let counts = tables.category_counts();
        Ok(tables
            .categories
            .values()
            .map(|category| CategoryWithCount {
                category: category.clone(),
                quote_count: counts.get(&category.id).copied().unwrap_or(0),
            })
            .collect())
    }

    async fn list_tags(&self) -> Result<Vec<Tag>> {
        Ok(self.tables.read().await.tags.values().cloned().collect())
    }

    async fn tags_with_count(&self) -> Result<Vec<TagWithCount>> {
        let tables = self.tables.read().await;
        let counts = tables.tag_counts();
        Ok(tables
            .tags
            .values()
            .map(|tag| TagWithCount {
                tag: tag.clone(),
                quote_count: counts.get(&tag.id).copied().unwrap_or(0),
            })
            .collect())
    }

    async fn popular_tags(&self, limit: usize) -> Result<Vec<Tag>> {
        let tables = self.tables.read().await;
        let counts = tables.tag_counts();
        let count_of = |tag: &Tag| counts.get(&tag.id).copied().unwrap_or(0);

        let mut tags: Vec<Tag> = tables.tags.values().cloned().collect();
        tags.sort_by(|a, b| count_of(b).cmp(&count_of(a)));
        tags.truncate(limit);
        Ok(tags)
    }

    async fn get_tag_by_slug(&self, slug: &str) -> Result<Option<Tag>> {
        let tables = self.tables.read().await;
        Ok(tables.tags.values().find(|tag| tag.slug == slug).cloned())
    }

    async fn create_tag(&self, tag: NewTag) -> Result<Tag> {
        require_non_blank("tag name", &tag.name)?;
        require_non_blank("tag slug", &tag.slug)?;

        let mut tables = self.tables.write().await;
        let id = next_id(&mut tables.ids.tag);
        let record = Tag {
            id,
            name: tag.name,
            slug: tag.slug,
        };
        tables.tags.insert(id, record.clone());
        debug!("Created tag {}: {}", id, record.slug);
        Ok(record)
    }

    async fn add_quote_category(&self, quote_id: u32, category_id: u32) -> Result<QuoteCategory> {
        let mut tables = self.tables.write().await;
        if !tables.quotes.contains_key(&quote_id) {
            return Err(QuoteError::QuoteNotFound(quote_id));
        }
        if !tables.categories.contains_key(&category_id) {
            return Err(QuoteError::CategoryNotFound(category_id));
        }

        if let Some(existing) = tables.category_pairs.get(&(quote_id, category_id)) {
            if let Some(row) = tables.quote_categories.get(existing) {
                return Ok(*row);
            }
        }

        let id = next_id(&mut tables.ids.quote_category);
        let row = QuoteCategory {
            id,
            quote_id,
            category_id,
        };
        tables.quote_categories.insert(id, row);
        tables.category_pairs.insert((quote_id, category_id), id);
        Ok(row)
    }

    async fn add_quote_tag(&self, quote_id: u32, tag_id: u32) -> Result<QuoteTag> {
        let mut tables = self.tables.write().await;
        if !tables.quotes.contains_key(&quote_id) {
            return Err(QuoteError::QuoteNotFound(quote_id));
        }
        if !tables.tags.contains_key(&tag_id) {
            return Err(QuoteError::TagNotFound(tag_id));
        }

        if let Some(existing) = tables.tag_pairs.get(&(quote_id, tag_id)) {
            if let Some(row) = tables.quote_tags.get(existing) {
                return Ok(*row);
            }
        }

        let id = next_id(&mut tables.ids.quote_tag);
        let row = QuoteTag {
            id,
            quote_id,
            tag_id,
        };
        tables.quote_tags.insert(id, row);
        tables.tag_pairs.insert((quote_id, tag_id), id);
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tokio_test::{assert_err, assert_ok};

    fn category(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            slug: name.to_lowercase(),
        }
    }

    fn tag(name: &str) -> NewTag {
        NewTag {
            name: name.to_string(),
            slug: name.to_lowercase(),
        }
    }

    async fn store_with_quotes(count: usize) -> (MemStorage, Author) {
        let store = MemStorage::new();
        let author = store.create_author(NewAuthor::new("Mark Twain")).await.unwrap();
        for i in 0..count {
            store
                .create_quote(NewQuote::new(format!("Quote number {}", i + 1), author.id))
                .await
                .unwrap();
        }
        (store, author)
    }

    fn ids(quotes: &[QuoteWithAuthor]) -> Vec<u32> {
        quotes.iter().map(|q| q.quote.id).collect()
    }

    #[tokio::test]
    async fn test_pages_are_disjoint_and_cover_everything() {
        let (store, _) = store_with_quotes(23).await;
        let total = store.total_quotes().await.unwrap();
        let limit = 5;
        let total_pages = total.div_ceil(limit as usize) as u32;

        let mut seen = Vec::new();
        for page in 1..=total_pages {
            let quotes = store.list_quotes(page, limit).await.unwrap();
            assert!(quotes.len() <= limit as usize);
            let next = store.list_quotes(page + 1, limit).await.unwrap();
            for id in ids(&next) {
                assert!(!ids(&quotes).contains(&id));
            }
            seen.extend(ids(&quotes));
        }

        assert_eq!(seen, (1..=23).collect::<Vec<u32>>());
        assert!(store.list_quotes(total_pages + 1, limit).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_page_zero_reads_as_first_page() {
        let (store, _) = store_with_quotes(3).await;
        let first = store.list_quotes(1, 2).await.unwrap();
        let zero = store.list_quotes(0, 2).await.unwrap();
        assert_eq!(ids(&first), ids(&zero));
        assert!(store.list_quotes(1, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_quote_increments_author_count() {
        let store = MemStorage::new();
        let author = store.create_author(NewAuthor::new("Albert Einstein")).await.unwrap();
        assert_eq!(author.quote_count, 0);

        store
            .create_quote(NewQuote::new("Imagination is more important than knowledge.", author.id))
            .await
            .unwrap();
        let after_one = store.get_author_by_id(author.id).await.unwrap().unwrap();
        assert_eq!(after_one.quote_count, 1);

        for i in 0..5 {
            store
                .create_quote(NewQuote::new(format!("Thought {}", i), author.id))
                .await
                .unwrap();
        }
        let after_six = store.get_author_by_id(author.id).await.unwrap().unwrap();
        assert_eq!(after_six.quote_count, 6);
    }

    #[tokio::test]
    async fn test_create_quote_with_unknown_author_still_succeeds() {
        let store = MemStorage::new();
        let quote = assert_ok!(store.create_quote(NewQuote::new("Orphaned words.", 42)).await);
        assert_eq!(quote.id, 1);

        let enriched = store.get_quote_by_id(quote.id).await.unwrap().unwrap();
        assert_eq!(enriched.author, Author::unknown());
    }

    #[tokio::test]
    async fn test_author_created_after_its_quotes_counts_them() {
        let store = MemStorage::new();
        store.create_quote(NewQuote::new("Early words.", 1)).await.unwrap();
        store.create_quote(NewQuote::new("Someone else's.", 2)).await.unwrap();

        let author = store.create_author(NewAuthor::new("Late Author")).await.unwrap();
        assert_eq!(author.id, 1);
        assert_eq!(author.quote_count, 1);

        let listed = store.list_quotes_by_author(author.id, 1, 10).await.unwrap();
        assert_eq!(listed.len(), author.quote_count as usize);

        store.create_quote(NewQuote::new("Later words.", 1)).await.unwrap();
        let author = store.get_author_by_id(1).await.unwrap().unwrap();
        assert_eq!(author.quote_count, 2);
    }

    #[tokio::test]
    async fn test_create_quote_rejects_blank_text() {
        let store = MemStorage::new();
        let err = assert_err!(store.create_quote(NewQuote::new("   ", 1)).await);
        assert!(matches!(err, QuoteError::InvalidInput(_)));
        assert_eq!(store.total_quotes().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_source_is_stored_as_none() {
        let store = MemStorage::new();
        let quote = store
            .create_quote(NewQuote::new("Stay hungry.", 1).with_source(""))
            .await
            .unwrap();
        assert!(quote.source.is_none());
    }

    #[tokio::test]
    async fn test_enrichment_joins_categories_and_tags() {
        let store = MemStorage::new();
        let author = store.create_author(NewAuthor::new("Confucius")).await.unwrap();
        let life = store.create_category(category("Life")).await.unwrap();
        let wisdom = store.create_category(category("Wisdom")).await.unwrap();
        let simplicity = store.create_tag(tag("Simplicity")).await.unwrap();
        let quote = store
            .create_quote(NewQuote::new(
                "Life is really simple, but we insist on making it complicated.",
                author.id,
            ))
            .await
            .unwrap();
        let bare = store
            .create_quote(NewQuote::new("Real knowledge is to know the extent of one's ignorance.", author.id))
            .await
            .unwrap();
        store.add_quote_category(quote.id, life.id).await.unwrap();
        store.add_quote_category(quote.id, wisdom.id).await.unwrap();
        store.add_quote_tag(quote.id, simplicity.id).await.unwrap();

        let page = store.list_quotes(1, 10).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].author.name, "Confucius");
        assert_eq!(page[0].categories, vec![life, wisdom]);
        assert_eq!(page[0].tags, vec![simplicity]);
        assert_eq!(page[1].quote.id, bare.id);
        assert!(page[1].categories.is_empty());
        assert!(page[1].tags.is_empty());
    }

    #[tokio::test]
    async fn test_associations_reject_dangling_ids() {
        let store = MemStorage::new();
        let love = store.create_category(category("Love")).await.unwrap();
        let hope = store.create_tag(tag("Hope")).await.unwrap();
        let quote = store.create_quote(NewQuote::new("Love wins.", 1)).await.unwrap();

        let err = assert_err!(store.add_quote_category(99, love.id).await);
        assert!(matches!(err, QuoteError::QuoteNotFound(99)));
        let err = assert_err!(store.add_quote_category(quote.id, 99).await);
        assert!(matches!(err, QuoteError::CategoryNotFound(99)));
        let err = assert_err!(store.add_quote_tag(quote.id, 99).await);
        assert!(matches!(err, QuoteError::TagNotFound(99)));
        let err = assert_err!(store.add_quote_tag(99, hope.id).await);
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_duplicate_association_returns_existing_row() {
        let store = MemStorage::new();
        let love = store.create_category(category("Love")).await.unwrap();
        let quote = store.create_quote(NewQuote::new("Love wins.", 1)).await.unwrap();

        let first = store.add_quote_category(quote.id, love.id).await.unwrap();
        let second = store.add_quote_category(quote.id, love.id).await.unwrap();
        assert_eq!(first, second);

        let counts = store.categories_with_count().await.unwrap();
        assert_eq!(counts[0].quote_count, 1);
    }

    #[tokio::test]
    async fn test_categories_with_count_matches_association_rows() {
        let store = MemStorage::new();
        let author = store.create_author(NewAuthor::new("Maya Angelou")).await.unwrap();
        let hope = store.create_category(category("Hope")).await.unwrap();
        let life = store.create_category(category("Life")).await.unwrap();
        let empty = store.create_category(category("Leadership")).await.unwrap();

        for i in 0..7 {
            let quote = store
                .create_quote(NewQuote::new(format!("Still I rise, verse {}", i), author.id))
                .await
                .unwrap();
            store.add_quote_category(quote.id, hope.id).await.unwrap();
            if i % 2 == 0 {
                store.add_quote_category(quote.id, life.id).await.unwrap();
            }
        }

        let counts = store.categories_with_count().await.unwrap();
        let count_for = |id: u32| {
            counts
                .iter()
                .find(|c| c.category.id == id)
                .map(|c| c.quote_count)
        };
        assert_eq!(count_for(hope.id), Some(7));
        assert_eq!(count_for(life.id), Some(4));
        assert_eq!(count_for(empty.id), Some(0));
    }

    #[tokio::test]
    async fn test_tag_listing_paginates_association_ids() {
        let store = MemStorage::new();
        let author = store.create_author(NewAuthor::new("Benjamin Franklin")).await.unwrap();
        let wisdom = store.create_tag(tag("Wisdom")).await.unwrap();
        let other = store.create_tag(tag("Humor")).await.unwrap();

        for i in 0..30 {
            let quote = store
                .create_quote(NewQuote::new(format!("Maxim {}", i), author.id))
                .await
                .unwrap();
            if i < 25 {
                store.add_quote_tag(quote.id, wisdom.id).await.unwrap();
            } else {
                store.add_quote_tag(quote.id, other.id).await.unwrap();
            }
        }

        assert_eq!(store.list_quotes_by_tag("wisdom", 1, 10).await.unwrap().len(), 10);
        let third = store.list_quotes_by_tag("wisdom", 3, 10).await.unwrap();
        assert_eq!(ids(&third), vec![21, 22, 23, 24, 25]);
        assert!(store.list_quotes_by_tag("wisdom", 4, 10).await.unwrap().is_empty());
        assert!(store.list_quotes_by_tag("missing", 1, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_category_listing_paginates_association_ids() {
        let store = MemStorage::new();
        let author = store.create_author(NewAuthor::new("Robert Frost")).await.unwrap();
        let life = store.create_category(category("Life")).await.unwrap();

        for i in 0..25 {
            let quote = store
                .create_quote(NewQuote::new(format!("Road {}", i), author.id))
                .await
                .unwrap();
            store.add_quote_category(quote.id, life.id).await.unwrap();
        }

        let third = store.list_quotes_by_category("life", 3, 10).await.unwrap();
        assert_eq!(third.len(), 5);
        assert!(third.iter().all(|q| q.categories == vec![life.clone()]));
        assert!(store.list_quotes_by_category("nope", 1, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_author_listing_filters_then_paginates() {
        let store = MemStorage::new();
        let twain = store.create_author(NewAuthor::new("Mark Twain")).await.unwrap();
        let wilde = store.create_author(NewAuthor::new("Oscar Wilde")).await.unwrap();
        for i in 0..6 {
            let author = if i % 2 == 0 { twain.id } else { wilde.id };
            store
                .create_quote(NewQuote::new(format!("Line {}", i), author))
                .await
                .unwrap();
        }

        let page = store.list_quotes_by_author(wilde.id, 2, 2).await.unwrap();
        assert_eq!(ids(&page), vec![6]);
        assert!(page.iter().all(|q| q.author.id == wilde.id));
    }

    #[tokio::test]
    async fn test_author_lookups() {
        let store = MemStorage::new();
        store
            .create_author(NewAuthor::new("Eleanor Roosevelt").with_bio("Former First Lady"))
            .await
            .unwrap();
        let mandela = store.create_author(NewAuthor::new("Nelson Mandela")).await.unwrap();

        let found = store.get_author_by_name("nelson MANDELA").await.unwrap();
        assert_eq!(found, Some(mandela));
        assert!(store.get_author_by_name("Nelson").await.unwrap().is_none());
        assert!(store.get_author_by_id(9).await.unwrap().is_none());

        let second_page = store.list_authors(2, 1).await.unwrap();
        assert_eq!(second_page[0].name, "Nelson Mandela");
    }

    #[tokio::test]
    async fn test_popular_authors_is_stable_on_ties() {
        let store = MemStorage::new();
        let a = store.create_author(NewAuthor::new("A")).await.unwrap();
        let b = store.create_author(NewAuthor::new("B")).await.unwrap();
        let c = store.create_author(NewAuthor::new("C")).await.unwrap();
        for author in [c.id, c.id, a.id, b.id] {
            store.create_quote(NewQuote::new("text", author)).await.unwrap();
        }

        let popular = store.popular_authors(3).await.unwrap();
        let names: Vec<&str> = popular.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        assert_eq!(store.popular_authors(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_popular_tags_sorted_by_usage() {
        let store = MemStorage::new();
        let rare = store.create_tag(tag("Rare")).await.unwrap();
        let common = store.create_tag(tag("Common")).await.unwrap();
        let unused = store.create_tag(tag("Unused")).await.unwrap();
        for i in 0..3 {
            let quote = store.create_quote(NewQuote::new(format!("q{}", i), 1)).await.unwrap();
            store.add_quote_tag(quote.id, common.id).await.unwrap();
            if i == 0 {
                store.add_quote_tag(quote.id, rare.id).await.unwrap();
            }
        }

        let listed: Vec<u32> = store.list_tags().await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(listed, vec![rare.id, common.id, unused.id]);

        let popular = store.popular_tags(10).await.unwrap();
        assert_eq!(popular, vec![common, rare, unused.clone()]);
        assert_eq!(store.popular_tags(2).await.unwrap().len(), 2);

        let counted = store.tags_with_count().await.unwrap();
        assert_eq!(counted[2].tag, unused);
        assert_eq!(counted[1].quote_count, 3);
    }

    #[tokio::test]
    async fn test_featured_quotes_in_order_and_truncated() {
        let store = MemStorage::new();
        for i in 0..10 {
            store
                .create_quote(NewQuote::new(format!("q{}", i), 1).featured(i % 3 == 0))
                .await
                .unwrap();
        }

        let featured = store.featured_quotes(3).await.unwrap();
        assert_eq!(ids(&featured), vec![1, 4, 7]);
        assert_eq!(store.featured_quotes(10).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_random_quote_on_empty_store() {
        let store = MemStorage::new();
        assert!(store.random_quote().await.unwrap().is_none());
        let mut rng = StdRng::seed_from_u64(1);
        assert!(store.random_quote_with(&mut rng).await.is_none());
    }

    #[tokio::test]
    async fn test_random_quote_always_hits_existing_id() {
        let (store, _) = store_with_quotes(3).await;
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let quote = store.random_quote_with(&mut rng).await.unwrap();
            assert!((1..=3).contains(&quote.quote.id));
        }
        assert!(store.random_quote().await.unwrap().is_some());
    }

    async fn lennon_and_shakespeare() -> MemStorage {
        let store = MemStorage::new();
        let lennon = store.create_author(NewAuthor::new("J. Lennon")).await.unwrap();
        let bard = store.create_author(NewAuthor::new("W. Shakespeare")).await.unwrap();
        store
            .create_quote(NewQuote::new("All you need is love", lennon.id))
            .await
            .unwrap();
        store.create_quote(NewQuote::new("To be", bard.id)).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_search_without_filters_returns_everything() {
        let (store, _) = store_with_quotes(12).await;
        let result = store.search_quotes(&SearchParams::default()).await.unwrap();
        assert_eq!(result.total, store.total_quotes().await.unwrap());
        assert_eq!(result.quotes.len(), 10);
    }

    #[tokio::test]
    async fn test_search_unknown_category_is_empty() {
        let (store, _) = store_with_quotes(4).await;
        let result = store
            .search_quotes(&SearchParams::default().with_category("unknown-slug"))
            .await
            .unwrap();
        assert_eq!(result, SearchResult::empty());
    }

    #[tokio::test]
    async fn test_search_author_filter_is_case_insensitive() {
        let store = lennon_and_shakespeare().await;
        let result = store
            .search_quotes(&SearchParams::default().with_author("shakespeare"))
            .await
            .unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.quotes[0].quote.text, "To be");

        let combined = store
            .search_quotes(&SearchParams::text("love").with_author("Shakespeare"))
            .await
            .unwrap();
        assert_eq!(combined.total, 0);
        assert!(combined.quotes.is_empty());

        let missing = store
            .search_quotes(&SearchParams::default().with_author("Tolstoy"))
            .await
            .unwrap();
        assert_eq!(missing, SearchResult::empty());
    }

    #[tokio::test]
    async fn test_search_text_matches_quote_or_author_name() {
        let store = lennon_and_shakespeare().await;
        let by_text = store.search_quotes(&SearchParams::text("LOVE")).await.unwrap();
        assert_eq!(by_text.total, 1);
        assert_eq!(by_text.quotes[0].author.name, "J. Lennon");

        let by_author = store.search_quotes(&SearchParams::text("shake")).await.unwrap();
        assert_eq!(by_author.total, 1);
        assert_eq!(by_author.quotes[0].quote.text, "To be");

        let blank = store.search_quotes(&SearchParams::text("  ")).await.unwrap();
        assert_eq!(blank.total, 2);
    }

    #[tokio::test]
    async fn test_search_intersects_category_and_tag() {
        let store = MemStorage::new();
        let author = store.create_author(NewAuthor::new("Winston Churchill")).await.unwrap();
        let success = store.create_category(category("Success")).await.unwrap();
        let courage = store.create_tag(tag("Courage")).await.unwrap();
        let lonely = store.create_tag(tag("Lonely")).await.unwrap();

        for i in 0..20 {
            let quote = store
                .create_quote(NewQuote::new(format!("Never give in, part {}", i), author.id))
                .await
                .unwrap();
            if i % 2 == 0 {
                store.add_quote_category(quote.id, success.id).await.unwrap();
            }
            if i % 4 == 0 {
                store.add_quote_tag(quote.id, courage.id).await.unwrap();
            }
        }

        let params = SearchParams::default()
            .with_category("success")
            .with_tag("courage")
            .paged(2, 3);
        let result = store.search_quotes(&params).await.unwrap();
        assert_eq!(result.total, 5);
        assert_eq!(ids(&result.quotes), vec![13, 17]);

        let unused_tag = store
            .search_quotes(&SearchParams::default().with_tag(lonely.slug.clone()))
            .await
            .unwrap();
        assert_eq!(unused_tag, SearchResult::empty());
    }

    #[tokio::test]
    async fn test_status_counts_tables() {
        let store = lennon_and_shakespeare().await;
        store.create_category(category("Love")).await.unwrap();
        let status = store.status().await.unwrap();
        assert_eq!(
            status,
            StoreStatus {
                total: 2,
                authors: 2,
                categories: 1,
                tags: 0,
            }
        );
    }
}
