//! Author types

use serde::{Deserialize, Serialize};

/// Quote author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: u32,
    pub name: String,
    pub bio: Option<String>,
    /// Number of quotes attributed to this author, maintained on quote creation
    pub quote_count: u32,
}

impl Author {
    /// Stand-in used when a quote references an author that does not exist
    pub fn unknown() -> Self {
        Self {
            id: 0,
            name: "Unknown".to_string(),
            bio: None,
            quote_count: 0,
        }
    }
}

/// Author creation payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewAuthor {
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
}

impl NewAuthor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bio: None,
        }
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }
}
