//! Provider configuration.
//!
//! Values come from [`ProviderConfig::default`] and can be overridden from
//! environment variables with [`ProviderConfig::from_env`].

/// Settings for a [`QueryProvider`](crate::provider::QueryProvider).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Stop caching new entries once this many are stored; `None` is unbounded.
    /// Entries are never evicted either way.
    pub cache_capacity: Option<usize>,

    /// Log level filter string for the binary (e.g. `"warn"`, `"debug"`).
    pub log_level: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            cache_capacity: None,
            log_level: String::from("warn"),
        }
    }
}

impl ProviderConfig {
    /// Load overrides from the environment.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `QUERY_CACHE_CAPACITY` | unbounded |
    /// | `LOG_LEVEL` | `warn` |
    ///
    /// # Examples
    ///
    /// ```
    /// use entity_query::config::ProviderConfig;
    ///
    /// let config = ProviderConfig::from_env();
    /// assert!(!config.log_level.is_empty());
    /// ```
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("QUERY_CACHE_CAPACITY") {
            match v.parse::<usize>() {
                Ok(n) => config.cache_capacity = Some(n),
                Err(_) => tracing::warn!(value = %v, "ignoring invalid QUERY_CACHE_CAPACITY"),
            }
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }
}
