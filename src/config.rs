//! Order book configuration.
//!
//! Values come from code (`Default` plus the `with_*` setters) or from the
//! process environment:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `MATCHBOOK_ORDER_CAPACITY` | 1024 |
//! | `MATCHBOOK_REJECT_DUPLICATE_IDS` | true |
//!
//! [`BookConfig::from_env`] first loads a `.env` file from the working
//! directory when one exists; variables already set in the process win.
//! Unparsable values fall back to the default.

use std::env;

/// Default number of resting orders to pre-allocate
pub const DEFAULT_ORDER_CAPACITY: usize = 1024;

const ORDER_CAPACITY_VAR: &str = "MATCHBOOK_ORDER_CAPACITY";
const REJECT_DUPLICATES_VAR: &str = "MATCHBOOK_REJECT_DUPLICATE_IDS";

/// Tunables for an [`OrderBook`](crate::OrderBook).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookConfig {
    /// Resting order slots reserved up front (slab and id index)
    pub order_capacity: usize,

    /// Reject a submission whose id is already resting in the book
    pub reject_duplicate_ids: bool,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            order_capacity: DEFAULT_ORDER_CAPACITY,
            reject_duplicate_ids: true,
        }
    }
}

impl BookConfig {
    /// Load configuration from environment variables, reading `.env` if present
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// ```
    /// use matchbook::BookConfig;
    ///
    /// let config = BookConfig::from_lookup(|key| match key {
    ///     "MATCHBOOK_ORDER_CAPACITY" => Some("4096".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(config.order_capacity, 4096);
    /// assert!(config.reject_duplicate_ids);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let order_capacity = lookup(ORDER_CAPACITY_VAR)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.order_capacity);

        let reject_duplicate_ids = lookup(REJECT_DUPLICATES_VAR)
            .and_then(|v| parse_flag(&v))
            .unwrap_or(defaults.reject_duplicate_ids);

        Self {
            order_capacity,
            reject_duplicate_ids,
        }
    }

    pub fn with_order_capacity(mut self, order_capacity: usize) -> Self {
        self.order_capacity = order_capacity;
        self
    }

    pub fn with_reject_duplicate_ids(mut self, reject: bool) -> Self {
        self.reject_duplicate_ids = reject;
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = BookConfig::from_lookup(|_| None);
        assert_eq!(config, BookConfig::default());
        assert_eq!(config.order_capacity, DEFAULT_ORDER_CAPACITY);
        assert!(config.reject_duplicate_ids);
    }

    #[test]
    fn test_reads_values() {
        let config = BookConfig::from_lookup(lookup_from(&[
            ("MATCHBOOK_ORDER_CAPACITY", " 50000 "),
            ("MATCHBOOK_REJECT_DUPLICATE_IDS", "off"),
        ]));
        assert_eq!(config.order_capacity, 50_000);
        assert!(!config.reject_duplicate_ids);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = BookConfig::from_lookup(lookup_from(&[
            ("MATCHBOOK_ORDER_CAPACITY", "lots"),
            ("MATCHBOOK_REJECT_DUPLICATE_IDS", "maybe"),
        ]));
        assert_eq!(config, BookConfig::default());
    }

    #[test]
    fn test_from_env_reads_process_environment() {
        let config = BookConfig::from_env();
        assert_eq!(config, BookConfig::from_lookup(|key| env::var(key).ok()));
    }

    #[test]
    fn test_setters() {
        let config = BookConfig::default()
            .with_order_capacity(16)
            .with_reject_duplicate_ids(false);
        assert_eq!(config.order_capacity, 16);
        assert!(!config.reject_duplicate_ids);
    }
}
