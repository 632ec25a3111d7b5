//! Public quote API client
//!
//! Pulls a sample of quotes from a few free quote APIs to mix into the seeded
//! dataset. Every failure is logged and skipped; seeding never depends on it.

use anyhow::{Context, Result};
use quotes_core::seed::{categories_from_tags, RemoteQuote};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteApi {
    ZenQuotes,
    Quotable,
    TypeFit,
}

impl QuoteApi {
    pub const ALL: [QuoteApi; 3] = [QuoteApi::ZenQuotes, QuoteApi::Quotable, QuoteApi::TypeFit];

    pub fn name(self) -> &'static str {
        match self {
            QuoteApi::ZenQuotes => "ZenQuotes",
            QuoteApi::Quotable => "Quotable",
            QuoteApi::TypeFit => "Type.fit",
        }
    }

    fn url(self) -> &'static str {
        match self {
            QuoteApi::ZenQuotes => "https://zenquotes.io/api/quotes/",
            QuoteApi::Quotable => "https://api.quotable.io/quotes?limit=150",
            QuoteApi::TypeFit => "https://type.fit/api/quotes",
        }
    }

    /// Map a response body onto catalogue quotes.
    pub fn parse(self, body: &str) -> Result<Vec<RemoteQuote>> {
        let quotes = match self {
            QuoteApi::ZenQuotes => serde_json::from_str::<Vec<ZenQuote>>(body)
                .context("Malformed ZenQuotes response")?
                .into_iter()
                .map(|quote| self.quote(quote.q, quote.a, default_tags()))
                .collect(),
            QuoteApi::Quotable => serde_json::from_str::<QuotablePage>(body)
                .context("Malformed Quotable response")?
                .results
                .into_iter()
                .map(|quote| {
                    let tags = quote.tags.unwrap_or_else(|| vec!["wisdom".to_string()]);
                    self.quote(quote.content, quote.author, tags)
                })
                .collect(),
            QuoteApi::TypeFit => serde_json::from_str::<Vec<TypeFitQuote>>(body)
                .context("Malformed Type.fit response")?
                .into_iter()
                .map(|quote| {
                    let author = quote.author.unwrap_or_else(|| "Unknown".to_string());
                    self.quote(quote.text, author, default_tags())
                })
                .collect(),
        };
        Ok(quotes)
    }

    fn quote(self, text: String, author: String, tags: Vec<String>) -> RemoteQuote {
        RemoteQuote {
            text,
            author,
            source: self.name().to_string(),
            categories: categories_from_tags(&tags),
            tags,
        }
    }
}

fn default_tags() -> Vec<String> {
    vec!["inspiration".to_string(), "wisdom".to_string()]
}

#[derive(Debug, Deserialize)]
struct ZenQuote {
    q: String,
    a: String,
}

#[derive(Debug, Deserialize)]
struct QuotablePage {
    results: Vec<QuotableQuote>,
}

#[derive(Debug, Deserialize)]
struct QuotableQuote {
    content: String,
    author: String,
    tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct TypeFitQuote {
    text: String,
    author: Option<String>,
}

/// Fetch from every API, skipping the ones that fail.
pub async fn fetch_quotes() -> Vec<RemoteQuote> {
    let client = match Client::builder().timeout(REQUEST_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => {
            warn!("Failed to build HTTP client, skipping public APIs: {}", e);
            return Vec::new();
        }
    };

    let mut quotes = Vec::new();
    for api in QuoteApi::ALL {
        info!("Fetching quotes from {}...", api.name());
        match fetch(&client, api).await {
            Ok(fetched) => {
                info!("Retrieved {} quotes from {}", fetched.len(), api.name());
                quotes.extend(fetched);
            }
            Err(e) => warn!("Error fetching quotes from {}: {:#}", api.name(), e),
        }
    }
    quotes
}

async fn fetch(client: &Client, api: QuoteApi) -> Result<Vec<RemoteQuote>> {
    let body = client
        .get(api.url())
        .send()
        .await
        .context("Request failed")?
        .error_for_status()
        .context("Unexpected status")?
        .text()
        .await
        .context("Failed to read response body")?;
    api.parse(&body)
}
