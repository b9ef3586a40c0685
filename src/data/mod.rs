//! Post records, account identities and loaders

pub mod json;
pub mod mentions;
pub mod parquet;
pub mod preprocessing;

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::path::Path;

/// Identity of one social-media account
///
/// Authors and mentions go through the same rule: a token that is the
/// canonical decimal form of an unsigned integer is a numeric account ID,
/// anything else (`007`, `+7`) is a handle. Handles keep their case, so
/// distinct tokens always stay distinct accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "RawAccountId")]
pub enum AccountId {
    Numeric(u64),
    Handle(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAccountId {
    Numeric(u64),
    Text(String),
}

impl From<RawAccountId> for AccountId {
    fn from(raw: RawAccountId) -> Self {
        match raw {
            RawAccountId::Numeric(id) => AccountId::Numeric(id),
            RawAccountId::Text(text) => AccountId::parse(&text),
        }
    }
}

impl AccountId {
    /// Interpret a raw token as an account identity
    pub fn parse(token: &str) -> Self {
        match canonical_number(token) {
            Some(id) => AccountId::Numeric(id),
            None => AccountId::Handle(token.to_string()),
        }
    }
}

/// `Some` only when printing the number gives back `token` unchanged
fn canonical_number(token: &str) -> Option<u64> {
    token
        .parse::<u64>()
        .ok()
        .filter(|id| id.to_string() == token)
}

impl From<&str> for AccountId {
    fn from(token: &str) -> Self {
        AccountId::parse(token)
    }
}

impl From<String> for AccountId {
    fn from(token: String) -> Self {
        match canonical_number(&token) {
            Some(id) => AccountId::Numeric(id),
            None => AccountId::Handle(token),
        }
    }
}

impl From<u64> for AccountId {
    fn from(id: u64) -> Self {
        AccountId::Numeric(id)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountId::Numeric(id) => write!(f, "{}", id),
            AccountId::Handle(handle) => f.write_str(handle),
        }
    }
}

// Numbers stay numbers and handles stay strings in exported JSON
impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AccountId::Numeric(id) => serializer.serialize_u64(*id),
            AccountId::Handle(handle) => serializer.serialize_str(handle),
        }
    }
}

/// One social-media post as supplied by the ingestion source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Account that wrote the post
    pub author: AccountId,

    /// Raw post text
    pub text: String,
}

impl Post {
    pub fn new(author: impl Into<AccountId>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
        }
    }
}

/// Load posts from a local file, picking the reader by extension
///
/// `.parquet` goes through polars, `.json` and `.jsonl`/`.ndjson` through
/// serde_json. `max_posts` keeps only the first N records.
pub fn load_posts(path: &str, max_posts: Option<usize>) -> anyhow::Result<Vec<Post>> {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let mut posts = match extension.as_str() {
        "parquet" => parquet::load_posts(path)?,
        "json" => json::load_posts_array(path)?,
        "jsonl" | "ndjson" => json::load_posts_lines(path)?,
        other => {
            return Err(anyhow::anyhow!(
                "Unsupported input format '{}' for {}",
                other,
                path
            ))
        }
    };

    if let Some(limit) = max_posts {
        if posts.len() > limit {
            log::info!("Keeping first {} of {} posts", limit, posts.len());
            posts.truncate(limit);
        }
    }

    Ok(posts)
}
