use anyhow::{Context, Result};
use async_trait::async_trait;
use mongodb::bson::{Document, doc};
use mongodb::error::ErrorKind;
use mongodb::{Client, Collection};

use crate::error::ImportError;
use crate::models::{BlacklistEntry, COLLECTION};

/// Server code for `NamespaceNotFound`, returned by `listIndexes` before the
/// collection has been created.
const NAMESPACE_NOT_FOUND: i32 = 26;

/// Operations the importer needs from the blacklist collection.
#[async_trait]
pub trait BlacklistStore: Send + Sync {
    async fn index_names(&self) -> Result<Vec<String>>;

    async fn drop_index(&self, name: &str) -> Result<()>;

    /// Exact, case-sensitive match on `keyword`.
    async fn keyword_exists(&self, keyword: &str) -> Result<bool>;

    async fn insert(&self, entry: &BlacklistEntry) -> Result<()>;

    /// Releases the underlying connection.
    async fn close(self);
}

#[derive(Debug)]
pub struct MongoStore {
    client: Client,
    entries: Collection<BlacklistEntry>,
}

impl MongoStore {
    /// Connects to the database named in `uri` and checks it answers.
    pub async fn connect(uri: &str) -> Result<Self, ImportError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(ImportError::connect)?;

        let database = client
            .default_database()
            .ok_or_else(|| ImportError::connect("connection string does not name a database"))?;

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(ImportError::connect)?;

        tracing::info!("Connected to database: {}", database.name());

        Ok(Self {
            entries: database.collection(COLLECTION),
            client,
        })
    }
}

#[async_trait]
impl BlacklistStore for MongoStore {
    async fn index_names(&self) -> Result<Vec<String>> {
        match self.entries.list_index_names().await {
            Ok(names) => Ok(names),
            Err(err) if is_missing_namespace(&err.kind) => {
                tracing::debug!("Collection {} does not exist yet", COLLECTION);
                Ok(Vec::new())
            }
            Err(err) => {
                Err(err).with_context(|| format!("failed to list indexes on {COLLECTION}"))
            }
        }
    }

    async fn drop_index(&self, name: &str) -> Result<()> {
        self.entries
            .drop_index(name)
            .await
            .with_context(|| format!("failed to drop index {name}"))
    }

    async fn keyword_exists(&self, keyword: &str) -> Result<bool> {
        let existing = self
            .entries
            .clone_with_type::<Document>()
            .find_one(doc! { "keyword": keyword })
            .await
            .with_context(|| format!("failed to look up '{keyword}'"))?;
        Ok(existing.is_some())
    }

    async fn insert(&self, entry: &BlacklistEntry) -> Result<()> {
        self.entries
            .insert_one(entry)
            .await
            .with_context(|| format!("failed to insert '{}'", entry.keyword))?;
        Ok(())
    }

    async fn close(self) {
        self.client.shutdown().await;
        tracing::debug!("MongoDB client shut down");
    }
}

fn is_missing_namespace(kind: &ErrorKind) -> bool {
    matches!(kind, ErrorKind::Command(command) if command.code == NAMESPACE_NOT_FOUND)
}


#[cfg(test)]
pub mod memory {
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Debug, Default)]
    struct State {
        entries: Vec<BlacklistEntry>,
        indexes: Vec<String>,
        rejected: HashSet<String>,
        fail_index_listing: bool,
        closed: bool,
    }

    /// In-memory stand-in for the blacklist collection. Clones share state.
    #[derive(Debug, Clone, Default)]
    pub struct MemoryStore {
        state: Arc<Mutex<State>>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            let store = Self::default();
            store.state.lock().unwrap().indexes.push("_id_".to_string());
            store
        }

        pub fn with_index(self, name: &str) -> Self {
            self.state.lock().unwrap().indexes.push(name.to_string());
            self
        }

        /// Makes every insert of `keyword` fail.
        pub fn rejecting(self, keyword: &str) -> Self {
            self.state
                .lock()
                .unwrap()
                .rejected
                .insert(keyword.to_string());
            self
        }

        pub fn failing_index_listing(self) -> Self {
            self.state.lock().unwrap().fail_index_listing = true;
            self
        }

        pub fn keywords(&self) -> Vec<String> {
            let state = self.state.lock().unwrap();
            state.entries.iter().map(|e| e.keyword.clone()).collect()
        }

        pub fn entries(&self) -> Vec<BlacklistEntry> {
            self.state.lock().unwrap().entries.clone()
        }

        pub fn indexes(&self) -> Vec<String> {
            self.state.lock().unwrap().indexes.clone()
        }

        pub fn is_closed(&self) -> bool {
            self.state.lock().unwrap().closed
        }
    }

    #[async_trait]
    impl BlacklistStore for MemoryStore {
        async fn index_names(&self) -> Result<Vec<String>> {
            let state = self.state.lock().unwrap();
            if state.fail_index_listing {
                anyhow::bail!("not authorized to list indexes");
            }
            Ok(state.indexes.clone())
        }

        async fn drop_index(&self, name: &str) -> Result<()> {
            let mut state = self.state.lock().unwrap();
            let before = state.indexes.len();
            state.indexes.retain(|index| index != name);
            if state.indexes.len() == before {
                anyhow::bail!("index not found with name [{name}]");
            }
            Ok(())
        }

        async fn keyword_exists(&self, keyword: &str) -> Result<bool> {
            let state = self.state.lock().unwrap();
            Ok(state.entries.iter().any(|e| e.keyword == keyword))
        }

        async fn insert(&self, entry: &BlacklistEntry) -> Result<()> {
            let mut state = self.state.lock().unwrap();
            if state.rejected.contains(&entry.keyword) {
                anyhow::bail!("write rejected for '{}'", entry.keyword);
            }
            state.entries.push(entry.clone());
            Ok(())
        }

        async fn close(self) {
            self.state.lock().unwrap().closed = true;
        }
    }
}
