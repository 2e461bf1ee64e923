// src/application/strategies/short_id.rs
use super::{SimpleStrategy, SlugStrategy};
use crate::application::config::SlugifyConfig;
use crate::domain::errors::SlugResult;
use crate::domain::model::ModelSchema;
use crate::domain::row::SlugRow;
use async_trait::async_trait;
use rand::Rng;

/// Length of the random token appended to every slug.
pub const SHORT_ID_LENGTH: usize = 10;

const ALPHABET: &[u8] = b"useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";

/// Appends a random URL-safe token. Collisions are unlikely enough that no
/// lookup is made.
#[derive(Debug, Clone)]
pub struct ShortIdStrategy {
    inner: SimpleStrategy,
}

impl ShortIdStrategy {
    pub fn new(config: &SlugifyConfig) -> Self {
        Self {
            // token plus its leading dash
            inner: SimpleStrategy::new(config).with_max_length_buffer(SHORT_ID_LENGTH + 1),
        }
    }
}

fn short_id() -> String {
    let mut rng = rand::thread_rng();
    (0..SHORT_ID_LENGTH)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[async_trait]
impl SlugStrategy for ShortIdStrategy {
    fn make_slug(&self, model: &ModelSchema, field: &str, value: &str) -> String {
        self.inner.make_slug(model, field, value)
    }

    async fn make_slug_unique(
        &self,
        _model: &ModelSchema,
        _field: &str,
        slug: String,
        _row: &dyn SlugRow,
    ) -> SlugResult<String> {
        Ok(format!("{slug}-{}", short_id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::row::Record;

    fn model() -> ModelSchema {
        ModelSchema::new("Post", "posts").field("title").field("slug")
    }

    fn is_token(value: &str) -> bool {
        value.len() == SHORT_ID_LENGTH
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }

    #[test]
    fn alphabet_is_url_safe() {
        assert_eq!(ALPHABET.len(), 64);
        assert!(ALPHABET.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'_' || *b == b'-'));
    }

    #[test]
    fn reserves_room_for_the_token() {
        let config = SlugifyConfig::builder("shortId", ["title"])
            .max_length(20)
            .build()
            .unwrap();
        let strategy = ShortIdStrategy::new(&config);
        let slug = strategy.make_slug(&model(), "slug", "Hello world from the moon");
        assert_eq!(slug, "hello-wor");
    }

    #[tokio::test]
    async fn appends_random_token() {
        let config = SlugifyConfig::builder("shortId", ["title"]).build().unwrap();
        let strategy = ShortIdStrategy::new(&config);
        let row = Record::new();

        let first = strategy
            .make_slug_unique(&model(), "slug", "hello-world".into(), &row)
            .await
            .unwrap();
        let second = strategy
            .make_slug_unique(&model(), "slug", "hello-world".into(), &row)
            .await
            .unwrap();

        let token = first.strip_prefix("hello-world-").unwrap();
        assert!(is_token(token), "unexpected token {token}");
        assert_ne!(first, second);
    }
}
