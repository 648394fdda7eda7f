//! Dialect dispatch and the shared parse cache.
//!
//! [`QueryProvider`] maps raw query text (or a method name plus entity) to
//! its parsed [`Query`]. The map is a `DashMap`, so lookups and inserts from
//! many threads never block each other on parsing: a miss parses outside any
//! lock, then the first insert for a key wins and every caller gets the
//! stored value back.

use std::hash::Hash;
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use tracing::debug;

use crate::{
    ast::{DeleteQuery, Query, SelectQuery, Statement, UpdateQuery},
    config::ProviderConfig,
    method::{self, MethodError},
    parser::{self, ParseError},
};

static GLOBAL: LazyLock<QueryProvider> =
    LazyLock::new(|| QueryProvider::new(ProviderConfig::from_env()));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Method(#[from] MethodError),

    #[error("expected a {expected} query: {query}")]
    WrongKind {
        expected: &'static str,
        query: String,
    },
}

/// Parses queries once and hands out shared results.
#[derive(Debug)]
pub struct QueryProvider {
    textual: DashMap<String, Query>,
    derived: DashMap<(String, String), Query>,
    config: ProviderConfig,
}

impl Default for QueryProvider {
    fn default() -> Self {
        Self::new(ProviderConfig::default())
    }
}

impl QueryProvider {
    #[must_use]
    pub fn new(config: ProviderConfig) -> Self {
        QueryProvider {
            textual: DashMap::new(),
            derived: DashMap::new(),
            config,
        }
    }

    /// Process-wide provider, configured from the environment on first use.
    pub fn global() -> &'static QueryProvider {
        &GLOBAL
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Parse textual `SELECT`/`FROM`/`DELETE`/`UPDATE` queries.
    pub fn query(&self, text: &str) -> Result<Query, QueryError> {
        let query = self.cached(&self.textual, text.to_string(), || parser::parse(text))?;
        Ok(query)
    }

    pub fn select(&self, text: &str) -> Result<Arc<SelectQuery>, QueryError> {
        match self.query(text)? {
            Query::Select(q) => Ok(q),
            _ => Err(wrong_kind("SELECT", text)),
        }
    }

    pub fn delete(&self, text: &str) -> Result<Arc<DeleteQuery>, QueryError> {
        match self.query(text)? {
            Query::Delete(q) => Ok(q),
            _ => Err(wrong_kind("DELETE", text)),
        }
    }

    pub fn update(&self, text: &str) -> Result<Arc<UpdateQuery>, QueryError> {
        match self.query(text)? {
            Query::Update(q) => Ok(q),
            _ => Err(wrong_kind("UPDATE", text)),
        }
    }

    /// Build a derived query from a method name such as `findByNameAndAge`.
    pub fn derive(&self, method: &str, entity: &str) -> Result<Query, QueryError> {
        let key = (entity.to_string(), method.to_string());
        let query = self.cached(&self.derived, key, || method::build(method, entity))?;
        Ok(query)
    }

    /// Number of cached entries across both dialects.
    pub fn len(&self) -> usize {
        self.textual.len() + self.derived.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textual.is_empty() && self.derived.is_empty()
    }

    pub fn clear(&self) {
        self.textual.clear();
        self.derived.clear();
    }

    fn cached<K, E>(
        &self,
        map: &DashMap<K, Query>,
        key: K,
        parse: impl FnOnce() -> Result<Statement, E>,
    ) -> Result<Query, E>
    where
        K: Eq + Hash + std::fmt::Debug,
    {
        if let Some(hit) = map.get(&key) {
            debug!(key = ?key, "query cache hit");
            return Ok(hit.value().clone());
        }

        debug!(key = ?key, "query cache miss");
        let query = Query::from(parse()?);

        if let Some(capacity) = self.config.cache_capacity {
            if self.len() >= capacity {
                debug!(capacity, "query cache full, not caching");
                return Ok(query);
            }
        }

        Ok(map.entry(key).or_insert(query).value().clone())
    }
}

fn wrong_kind(expected: &'static str, text: &str) -> QueryError {
    QueryError::WrongKind {
        expected,
        query: text.to_string(),
    }
}
