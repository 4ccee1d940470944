//! Engine configuration.
//!
//! Read from the process environment, with a `.env` file loaded first when
//! present:
//!
//! | Variable | Default |
//! |---|---|
//! | `JSONHUB_DEFAULT_PAGE_SIZE` | 10 |
//! | `JSONHUB_MAX_PAGE_SIZE` | 100 |

use jsonhub_domain::filter::DEFAULT_LIMIT;

const DEFAULT_MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Page size for criteria built without an explicit limit.
    pub default_page_size: u32,
    /// Upper bound applied to every list query.
    pub max_page_size: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_LIMIT,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

impl EngineConfig {
    /// Load from `.env` and the environment.
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "Failed to load .env file");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Missing, unparsable or zero values
    /// fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let max_page_size = page_size(&lookup, "JSONHUB_MAX_PAGE_SIZE", defaults.max_page_size);
        let default_page_size = page_size(
            &lookup,
            "JSONHUB_DEFAULT_PAGE_SIZE",
            defaults.default_page_size,
        )
        .min(max_page_size);

        Self {
            default_page_size,
            max_page_size,
        }
    }
}

fn page_size(lookup: &impl Fn(&str) -> Option<String>, key: &str, fallback: u32) -> u32 {
    let Some(raw) = lookup(key) else {
        return fallback;
    };
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => value,
        _ => {
            tracing::warn!(key, value = %raw, fallback, "Ignoring invalid page size");
            fallback
        }
    }
}
