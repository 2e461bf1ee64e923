// src/config.rs
use crate::application::config::{DEFAULT_SEPARATOR, SlugifyConfig};
use crate::domain::errors::SlugResult;
use std::env;
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: String,
    strategy: String,
    separator: String,
    max_length: Option<usize>,
    complete_words: bool,
    allow_updates: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_database_url() -> String {
    "sqlite::memory:".into()
}

fn default_strategy() -> String {
    "dbIncrement".into()
}

fn parse_flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

impl AppConfig {
    /// Build configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Allow dotenv files to populate env vars when present.
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(default_database_url);
        let strategy = lookup("SLUGIFY_STRATEGY")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(default_strategy);

        let separator = lookup("SLUGIFY_SEPARATOR").unwrap_or_else(|| DEFAULT_SEPARATOR.into());
        if separator.is_empty() {
            return Err(ConfigError::Invalid(
                "SLUGIFY_SEPARATOR cannot be empty".into(),
            ));
        }

        let max_length = match lookup("SLUGIFY_MAX_LENGTH") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(value) if value > 0 => Some(value),
                _ => {
                    return Err(ConfigError::Invalid(format!(
                        "SLUGIFY_MAX_LENGTH must be a positive integer, got {raw:?}"
                    )));
                }
            },
            None => None,
        };

        let complete_words = lookup("SLUGIFY_COMPLETE_WORDS")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        let allow_updates = lookup("SLUGIFY_ALLOW_UPDATES")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Ok(Self {
            database_url,
            strategy,
            separator,
            max_length,
            complete_words,
            allow_updates,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn strategy(&self) -> &str {
        &self.strategy
    }

    /// Slug configuration for `fields` carrying the env-provided defaults.
    pub fn slugify_config<I, F>(&self, fields: I) -> SlugResult<SlugifyConfig>
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        let mut builder = SlugifyConfig::builder(self.strategy.as_str(), fields)
            .separator(self.separator.as_str())
            .complete_words(self.complete_words)
            .allow_updates(self.allow_updates);
        if let Some(max_length) = self.max_length {
            builder = builder.max_length(max_length);
        }
        builder.build()
    }
}
