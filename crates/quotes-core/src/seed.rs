//! Data bootstrap
//!
//! Fills a store with the curated starter catalogue and then generates
//! procedural quotes until the requested size is reached. Runs sequentially so
//! ids stay dense.

use crate::error::Result;
use crate::ports::QuoteStore;
use crate::slug::slugify;
use quotes_types::{NewAuthor, NewCategory, NewQuote, NewTag, StoreStatus};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Quotes generated between progress log lines
const PROGRESS_BATCH: usize = 5_000;

const FAMOUS_QUOTE_CHANCE: f64 = 0.05;
const GENERATED_FEATURED_CHANCE: f64 = 0.05;
const CURATED_FEATURED_CHANCE: f64 = 0.5;
const REMOTE_FEATURED_CHANCE: f64 = 0.1;

/// Cap on quotes taken from public APIs per seeding run
pub const MAX_REMOTE_QUOTES: usize = 100;

/// Category given to remote quotes whose tags map to none
const FALLBACK_CATEGORY: &str = "Wisdom";

// Remote tag -> category name
const TAG_CATEGORIES: &[(&str, &str)] = &[
    ("love", "Love"),
    ("inspirational", "Inspiration"),
    ("wisdom", "Wisdom"),
    ("happiness", "Happiness"),
    ("success", "Success"),
    ("motivational", "Motivation"),
    ("life", "Life"),
    ("philosophy", "Philosophy"),
    ("friendship", "Friendship"),
    ("education", "Education"),
    ("hope", "Hope"),
    ("leadership", "Leadership"),
];

const CATEGORIES: &[&str] = &[
    "Motivation",
    "Success",
    "Happiness",
    "Love",
    "Wisdom",
    "Inspiration",
    "Life",
    "Philosophy",
    "Friendship",
    "Leadership",
    "Education",
    "Hope",
];

const TAGS: &[&str] = &[
    "motivational",
    "wisdom",
    "success",
    "life",
    "inspiration",
    "love",
    "happiness",
    "philosophy",
    "courage",
    "hope",
    "attitude",
    "leadership",
    "education",
    "friendship",
];

const AUTHORS: &[(&str, &str)] = &[
    ("Albert Einstein", "Theoretical physicist who developed the theory of relativity"),
    ("Maya Angelou", "American poet, memoirist, and civil rights activist"),
    ("Oscar Wilde", "Irish poet and playwright"),
    ("Eleanor Roosevelt", "Former First Lady of the United States"),
    ("Mark Twain", "American writer, humorist, entrepreneur, publisher, and lecturer"),
    ("Nelson Mandela", "Former President of South Africa"),
    ("Steve Jobs", "Co-founder of Apple Inc."),
    ("Winston Churchill", "Former British Prime Minister"),
    ("Robert Frost", "American poet"),
    ("Mahatma Gandhi", "Indian lawyer, anti-colonial nationalist, and political ethicist"),
];

struct CuratedQuote {
    text: &'static str,
    author: &'static str,
    categories: &'static [&'static str],
    tags: &'static [&'static str],
}

// Unknown category and tag names are skipped when linking.
const CURATED: &[CuratedQuote] = &[
    CuratedQuote {
        text: "The greatest glory in living lies not in never falling, but in rising every time we fall.",
        author: "Nelson Mandela",
        categories: &["Motivation", "Life"],
        tags: &["motivational", "life", "hope"],
    },
    CuratedQuote {
        text: "The future belongs to those who believe in the beauty of their dreams.",
        author: "Eleanor Roosevelt",
        categories: &["Inspiration", "Hope"],
        tags: &["inspiration", "hope", "dreams"],
    },
    CuratedQuote {
        text: "Success is not final, failure is not fatal: It is the courage to continue that counts.",
        author: "Winston Churchill",
        categories: &["Success", "Motivation"],
        tags: &["success", "courage", "motivational"],
    },
    CuratedQuote {
        text: "Your time is limited, so don't waste it living someone else's life.",
        author: "Steve Jobs",
        categories: &["Life", "Wisdom"],
        tags: &["life", "wisdom", "inspirational"],
    },
    CuratedQuote {
        text: "The only way to do great work is to love what you do. If you haven't found it yet, keep looking. Don't settle.",
        author: "Steve Jobs",
        categories: &["Success", "Inspiration"],
        tags: &["success", "inspiration", "work"],
    },
    CuratedQuote {
        text: "In three words I can sum up everything I've learned about life: it goes on.",
        author: "Robert Frost",
        categories: &["Life", "Wisdom"],
        tags: &["life", "wisdom", "hope"],
    },
    CuratedQuote {
        text: "Life is what happens when you're busy making other plans.",
        author: "John Lennon",
        categories: &["Life", "Wisdom"],
        tags: &["life", "wisdom", "inspirational"],
    },
    CuratedQuote {
        text: "The best way to predict the future is to create it.",
        author: "Peter Drucker",
        categories: &["Success", "Motivation"],
        tags: &["success", "future", "inspirational"],
    },
    CuratedQuote {
        text: "Be yourself; everyone else is already taken.",
        author: "Oscar Wilde",
        categories: &["Life", "Wisdom"],
        tags: &["life", "wisdom", "selfhood"],
    },
    CuratedQuote {
        text: "Two things are infinite: the universe and human stupidity; and I'm not sure about the universe.",
        author: "Albert Einstein",
        categories: &["Wisdom", "Humor"],
        tags: &["wisdom", "humor", "human nature"],
    },
    CuratedQuote {
        text: "The only impossible journey is the one you never begin.",
        author: "Tony Robbins",
        categories: &["Motivation", "Inspiration"],
        tags: &["motivation", "inspiration", "journey"],
    },
    CuratedQuote {
        text: "The purpose of our lives is to be happy.",
        author: "Dalai Lama",
        categories: &["Happiness", "Life"],
        tags: &["happiness", "life", "purpose"],
    },
    CuratedQuote {
        text: "You only live once, but if you do it right, once is enough.",
        author: "Mae West",
        categories: &["Life", "Wisdom"],
        tags: &["life", "wisdom", "living"],
    },
    CuratedQuote {
        text: "Many of life's failures are people who did not realize how close they were to success when they gave up.",
        author: "Thomas Edison",
        categories: &["Success", "Perseverance"],
        tags: &["success", "perseverance", "failure"],
    },
    CuratedQuote {
        text: "Life is really simple, but we insist on making it complicated.",
        author: "Confucius",
        categories: &["Life", "Wisdom"],
        tags: &["life", "wisdom", "simplicity"],
    },
    CuratedQuote {
        text: "The way to get started is to quit talking and begin doing.",
        author: "Walt Disney",
        categories: &["Motivation", "Success"],
        tags: &["motivation", "action", "beginning"],
    },
    CuratedQuote {
        text: "Tell me and I forget. Teach me and I remember. Involve me and I learn.",
        author: "Benjamin Franklin",
        categories: &["Education", "Wisdom"],
        tags: &["education", "learning", "wisdom"],
    },
    CuratedQuote {
        text: "Don't judge each day by the harvest you reap but by the seeds that you plant.",
        author: "Robert Louis Stevenson",
        categories: &["Life", "Wisdom"],
        tags: &["life", "wisdom", "patience"],
    },
    CuratedQuote {
        text: "The real test is not whether you avoid this failure, because you won't. It's whether you let it harden or shame you into inaction, or whether you learn from it.",
        author: "Barack Obama",
        categories: &["Success", "Wisdom"],
        tags: &["success", "failure", "learning"],
    },
    CuratedQuote {
        text: "The only limit to our realization of tomorrow will be our doubts of today.",
        author: "Franklin D. Roosevelt",
        categories: &["Motivation", "Hope"],
        tags: &["motivation", "hope", "doubts"],
    },
];

const FAMOUS_QUOTES: &[(&str, &str)] = &[
    ("The only limit to our realization of tomorrow will be our doubts of today.", "Franklin D. Roosevelt"),
    ("In the end, it's not the years in your life that count. It's the life in your years.", "Abraham Lincoln"),
    ("Life is what happens when you're busy making other plans.", "John Lennon"),
    ("It is during our darkest moments that we must focus to see the light.", "Aristotle"),
    ("The way to get started is to quit talking and begin doing.", "Walt Disney"),
    ("If life were predictable it would cease to be life, and be without flavor.", "Eleanor Roosevelt"),
    ("When you reach the end of your rope, tie a knot in it and hang on.", "Franklin D. Roosevelt"),
    ("Always remember that you are absolutely unique. Just like everyone else.", "Margaret Mead"),
    ("We cannot solve our problems with the same thinking we used when we created them.", "Albert Einstein"),
    ("I have not failed. I've just found 10,000 ways that won't work.", "Thomas Edison"),
    ("It is never too late to be what you might have been.", "George Eliot"),
    ("If you want to live a happy life, tie it to a goal, not to people or things.", "Albert Einstein"),
];

const TEMPLATES: &[&str] = &[
    "The key to %s is %s.",
    "%s is the foundation of %s.",
    "Never underestimate the power of %s in achieving %s.",
    "True %s comes from %s.",
    "The secret of %s lies in %s.",
    "To master %s, you must understand %s.",
    "Only through %s can you truly find %s.",
    "When you embrace %s, you discover %s.",
    "%s is not about being perfect; it's about %s.",
    "The journey to %s begins with %s.",
    "The greatest %s comes through %s.",
    "Seek %s through %s.",
    "Let your %s guide your %s.",
    "Cultivate %s to nurture your %s.",
    "Practice %s to enhance your %s.",
    "Your %s is directly proportional to your %s.",
    "Transform your %s through consistent %s.",
    "Remarkable %s requires extraordinary %s.",
    "Sustainable %s comes from authentic %s.",
    "Meaningful %s emerges from purposeful %s.",
];

const CONCEPTS: &[&str] = &[
    "success", "happiness", "wisdom", "growth", "achievement", "excellence", "purpose",
    "creativity", "innovation", "leadership", "courage", "kindness", "resilience", "patience",
    "perseverance", "transformation", "authenticity", "mindfulness", "integrity", "passion",
    "focus", "discipline", "ambition", "gratitude", "empathy", "insight", "harmony", "balance",
    "clarity", "simplicity", "abundance", "freedom", "peace", "strength", "vitality",
    "awareness", "presence", "compassion", "generosity", "humility",
];

const QUALITIES: &[&str] = &[
    "hard work", "dedication", "commitment", "self-belief", "persistence",
    "continuous learning", "embracing failure", "taking risks", "adaptability",
    "self-discipline", "clear vision", "positive thinking", "authentic action",
    "helping others", "staying focused", "being present", "facing fears",
    "stepping outside comfort zones", "building relationships", "consistency",
    "daily practice", "reflection", "strategic planning", "emotional intelligence",
    "active listening", "regular review", "deep focus", "creative thinking",
    "critical analysis", "systematic approach", "intentional living", "mindful choices",
    "purposeful action", "genuine connection", "radical honesty", "continuous improvement",
    "embracing change", "celebrating progress", "spiritual growth", "daily rituals",
];

/// A quote fetched from a public quote API, already mapped to catalogue names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteQuote {
    pub text: String,
    pub author: String,
    /// Name of the API it came from
    pub source: String,
    /// Category names; unknown names are skipped when linking
    pub categories: Vec<String>,
    /// Tag names; missing tags are created
    pub tags: Vec<String>,
}

/// Map remote tags onto category names, deduplicated in first-seen order.
/// Falls back to a single "Wisdom" when nothing maps.
pub fn categories_from_tags(tags: &[String]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for tag in tags {
        let lowered = tag.to_lowercase();
        let mapped = TAG_CATEGORIES
            .iter()
            .find(|(name, _)| *name == lowered)
            .map(|(_, category)| category.to_string());
        if let Some(category) = mapped {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
    }
    if categories.is_empty() {
        categories.push(FALLBACK_CATEGORY.to_string());
    }
    categories
}

/// Seeding options
#[derive(Debug, Clone)]
pub struct SeedOptions {
    /// Total number of quotes the store should hold when seeding finishes
    pub target_quotes: usize,
    /// Quotes fetched from public APIs, inserted before procedural generation
    pub remote_quotes: Vec<RemoteQuote>,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            target_quotes: 100_000,
            remote_quotes: Vec::new(),
        }
    }
}

impl SeedOptions {
    pub fn with_target(target_quotes: usize) -> Self {
        Self {
            target_quotes,
            ..Self::default()
        }
    }
}

/// Name → id lookups built up while seeding
#[derive(Default)]
struct Catalogue {
    authors: HashMap<String, u32>,
    categories: HashMap<String, u32>,
    tags: HashMap<String, u32>,
}

impl Catalogue {
    async fn author_id<S>(&mut self, store: &S, name: &str) -> Result<u32>
    where
        S: QuoteStore + ?Sized,
    {
        if let Some(id) = self.authors.get(name) {
            return Ok(*id);
        }
        let author = store.create_author(NewAuthor::new(name)).await?;
        self.authors.insert(name.to_string(), author.id);
        Ok(author.id)
    }

    /// Looks a tag up by lowercased name, creating it on first use.
    /// Names without a usable slug yield `None`.
    async fn tag_id<S>(&mut self, store: &S, name: &str) -> Result<Option<u32>>
    where
        S: QuoteStore + ?Sized,
    {
        let name = name.trim().to_lowercase();
        if let Some(id) = self.tags.get(&name) {
            return Ok(Some(*id));
        }
        let slug = slugify(&name);
        if slug.is_empty() {
            return Ok(None);
        }
        let tag = store
            .create_tag(NewTag {
                name: name.clone(),
                slug,
            })
            .await?;
        debug!("Created tag '{}' for remote quote", name);
        self.tags.insert(name, tag.id);
        Ok(Some(tag.id))
    }
}

/// Seed `store` with the starter catalogue, any remote quotes, then generated
/// quotes up to the target.
pub async fn seed_store<S, R>(store: &S, options: &SeedOptions, rng: &mut R) -> Result<StoreStatus>
where
    S: QuoteStore + ?Sized,
    R: Rng,
{
    info!(
        "Seeding quote store (target: {} quotes)...",
        options.target_quotes
    );
    let mut catalogue = Catalogue::default();

    for name in CATEGORIES {
        let category = store
            .create_category(NewCategory {
                name: name.to_string(),
                slug: slugify(name),
            })
            .await?;
        catalogue.categories.insert(name.to_string(), category.id);
    }

    for name in TAGS {
        let tag = store
            .create_tag(NewTag {
                name: name.to_string(),
                slug: slugify(name),
            })
            .await?;
        catalogue.tags.insert(name.to_string(), tag.id);
    }

    for (name, bio) in AUTHORS {
        let author = store
            .create_author(NewAuthor::new(*name).with_bio(*bio))
            .await?;
        catalogue.authors.insert(name.to_string(), author.id);
    }

    let curated = seed_curated(store, &mut catalogue, rng).await?;
    info!("Added {} curated quotes", curated);

    let room = options.target_quotes.saturating_sub(curated);
    let remote = if options.remote_quotes.is_empty() || room == 0 {
        0
    } else {
        let added = seed_remote(store, &mut catalogue, &options.remote_quotes, room, rng).await?;
        info!("Added {} quotes from public APIs", added);
        added
    };

    let remaining = room.saturating_sub(remote);
    if remaining > 0 {
        info!("Generating {} procedural quotes...", remaining);
        generate_quotes(store, &mut catalogue, remaining, rng).await?;
    }

    let status = store.status().await?;
    info!(
        "Seeding complete: {} quotes, {} authors, {} categories, {} tags",
        status.total, status.authors, status.categories, status.tags
    );
    Ok(status)
}

async fn seed_curated<S, R>(store: &S, catalogue: &mut Catalogue, rng: &mut R) -> Result<usize>
where
    S: QuoteStore + ?Sized,
    R: Rng,
{
    for entry in CURATED {
        let author_id = catalogue.author_id(store, entry.author).await?;
        let quote = store
            .create_quote(
                NewQuote::new(entry.text, author_id).featured(rng.gen_bool(CURATED_FEATURED_CHANCE)),
            )
            .await?;

        for name in entry.categories {
            if let Some(category_id) = catalogue.categories.get(*name) {
                store.add_quote_category(quote.id, *category_id).await?;
            }
        }
        for name in entry.tags {
            if let Some(tag_id) = catalogue.tags.get(*name) {
                store.add_quote_tag(quote.id, *tag_id).await?;
            }
        }
    }
    Ok(CURATED.len())
}

async fn seed_remote<S, R>(
    store: &S,
    catalogue: &mut Catalogue,
    quotes: &[RemoteQuote],
    room: usize,
    rng: &mut R,
) -> Result<usize>
where
    S: QuoteStore + ?Sized,
    R: Rng,
{
    // Mix the sources before capping
    let mut picked: Vec<&RemoteQuote> = quotes
        .iter()
        .filter(|quote| !quote.text.trim().is_empty())
        .collect();
    picked.shuffle(rng);
    picked.truncate(MAX_REMOTE_QUOTES.min(room));

    for entry in &picked {
        let author = match entry.author.trim() {
            "" => "Unknown",
            name => name,
        };
        let author_id = catalogue.author_id(store, author).await?;
        let quote = store
            .create_quote(
                NewQuote::new(entry.text.trim(), author_id)
                    .with_source(entry.source.clone())
                    .featured(rng.gen_bool(REMOTE_FEATURED_CHANCE)),
            )
            .await?;

        for name in &entry.categories {
            if let Some(category_id) = catalogue.categories.get(name) {
                store.add_quote_category(quote.id, *category_id).await?;
            }
        }
        for name in &entry.tags {
            if let Some(tag_id) = catalogue.tag_id(store, name).await? {
                store.add_quote_tag(quote.id, tag_id).await?;
            }
        }
    }
    Ok(picked.len())
}

async fn generate_quotes<S, R>(
    store: &S,
    catalogue: &mut Catalogue,
    count: usize,
    rng: &mut R,
) -> Result<()>
where
    S: QuoteStore + ?Sized,
    R: Rng,
{
    let mut category_ids: Vec<u32> = catalogue.categories.values().copied().collect();
    let mut tag_ids: Vec<u32> = catalogue.tags.values().copied().collect();
    let mut author_ids: Vec<u32> = catalogue.authors.values().copied().collect();
    // Sorted so a seeded rng reproduces the same dataset
    category_ids.sort_unstable();
    tag_ids.sort_unstable();
    author_ids.sort_unstable();

    for generated in 1..=count {
        let famous = if rng.gen_bool(FAMOUS_QUOTE_CHANCE) {
            FAMOUS_QUOTES.choose(rng)
        } else {
            None
        };

        let (text, author_id) = match famous {
            Some((text, author)) => {
                let known = catalogue.authors.contains_key(*author);
                let author_id = catalogue.author_id(store, author).await?;
                if !known {
                    author_ids.push(author_id);
                }
                (text.to_string(), author_id)
            }
            None => {
                let (Some(template), Some(concept), Some(quality), Some(author_id)) = (
                    TEMPLATES.choose(rng),
                    CONCEPTS.choose(rng),
                    QUALITIES.choose(rng),
                    author_ids.choose(rng).copied(),
                ) else {
                    warn!("No authors to attribute generated quotes to, stopping generation");
                    return Ok(());
                };
                let text = template.replacen("%s", concept, 1).replacen("%s", quality, 1);
                (capitalize(&text), author_id)
            }
        };

        let quote = store
            .create_quote(
                NewQuote::new(text, author_id).featured(rng.gen_bool(GENERATED_FEATURED_CHANCE)),
            )
            .await?;

        let category_count = rng.gen_range(1..=3).min(category_ids.len());
        for category_id in category_ids.choose_multiple(rng, category_count) {
            store.add_quote_category(quote.id, *category_id).await?;
        }

        let tag_count = rng.gen_range(2..=4).min(tag_ids.len());
        for tag_id in tag_ids.choose_multiple(rng, tag_count) {
            store.add_quote_tag(quote.id, *tag_id).await?;
        }

        if generated % PROGRESS_BATCH == 0 {
            info!(
                "Generated {} of {} quotes ({:.1}%)",
                generated,
                count,
                generated as f64 / count as f64 * 100.0
            );
        } else if generated % 1_000 == 0 {
            debug!("Generated {} quotes", generated);
        }
    }
    Ok(())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
