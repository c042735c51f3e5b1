use clap::ValueEnum;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

/// Collection the site reads its blacklist from.
pub const COLLECTION: &str = "blacklists";

/// Unique index left behind by an older schema that keyed entries on `word`.
pub const LEGACY_INDEX: &str = "word_1";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    Word,
    Ip,
    Email,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlacklistEntry {
    pub keyword: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime,
}

impl BlacklistEntry {
    pub fn new(keyword: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            keyword: keyword.into(),
            kind,
            created_at: DateTime::now(),
        }
    }
}
