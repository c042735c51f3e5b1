use std::fmt;
use std::path::Path;

use crate::config::Config;
use crate::error::ImportError;
use crate::input::{self, RawInput};
use crate::models::{BlacklistEntry, EntryKind, LEGACY_INDEX};
use crate::normalize::{self, Candidate};
use crate::store::{BlacklistStore, MongoStore};

#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    pub kind: EntryKind,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub added: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Import complete.")?;
        writeln!(f, "Added: {}", self.added)?;
        writeln!(f, "Skipped: {}", self.skipped)?;
        write!(f, "Errors: {}", self.errors)
    }
}

/// Reads `path`, connects to the configured database and inserts every
/// word not already blacklisted.
pub async fn run(
    config: &Config,
    path: &Path,
    options: ImportOptions,
) -> Result<ImportReport, ImportError> {
    let raw = input::read_input(path)?;
    let store = MongoStore::connect(&config.mongodb_uri).await?;

    let outcome = import_into(&store, &raw, options.kind).await;
    store.close().await;
    outcome
}

/// Parses and normalizes `path` without touching the database.
pub fn preview(path: &Path) -> Result<Vec<String>, ImportError> {
    let raw = input::read_input(path)?;
    let candidates = collect_candidates(&raw)?;
    Ok(candidates
        .iter()
        .filter_map(Candidate::as_text)
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect())
}

pub async fn import_into<S: BlacklistStore>(
    store: &S,
    raw: &RawInput,
    kind: EntryKind,
) -> Result<ImportReport, ImportError> {
    drop_legacy_index(store).await;

    let candidates = collect_candidates(raw)?;
    tracing::info!("Found {} words to process.", candidates.len());

    Ok(import_words(store, &candidates, kind).await)
}

/// Drops the old `word_1` unique index if present. Failures only warn.
pub async fn drop_legacy_index<S: BlacklistStore>(store: &S) {
    let indexes = match store.index_names().await {
        Ok(indexes) => indexes,
        Err(err) => {
            tracing::warn!("Could not check/drop indexes: {:#}", err);
            return;
        }
    };

    if !indexes.iter().any(|name| name == LEGACY_INDEX) {
        return;
    }

    tracing::info!("Found conflicting index '{}'. Dropping it...", LEGACY_INDEX);
    match store.drop_index(LEGACY_INDEX).await {
        Ok(()) => tracing::info!("Index '{}' dropped.", LEGACY_INDEX),
        Err(err) => tracing::warn!("Could not check/drop indexes: {:#}", err),
    }
}

pub async fn import_words<S: BlacklistStore>(
    store: &S,
    candidates: &[Candidate],
    kind: EntryKind,
) -> ImportReport {
    let mut report = ImportReport::default();

    for candidate in candidates {
        let Some(word) = candidate.as_text().map(str::trim) else {
            tracing::debug!("Skipping non-text entry: {:?}", candidate);
            continue;
        };
        if word.is_empty() {
            continue;
        }

        match store.keyword_exists(word).await {
            Ok(true) => {
                tracing::debug!("Skipping existing: {}", word);
                report.skipped += 1;
                continue;
            }
            Ok(false) => {}
            Err(err) => {
                tracing::error!("Error adding {}: {:#}", word, err);
                report.errors += 1;
                continue;
            }
        }

        match store.insert(&BlacklistEntry::new(word, kind)).await {
            Ok(()) => {
                tracing::debug!("Added: {}", word);
                report.added += 1;
            }
            Err(err) => {
                tracing::error!("Error adding {}: {:#}", word, err);
                report.errors += 1;
            }
        }
    }

    report
}

fn collect_candidates(raw: &RawInput) -> Result<Vec<Candidate>, ImportError> {
    let candidates = normalize::normalize(raw);
    if candidates.is_empty() {
        return Err(ImportError::NoWords {
            kind: raw.kind(),
            preview: raw.preview(),
        });
    }
    Ok(candidates)
}
