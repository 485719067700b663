use async_trait::async_trait;
use redis::AsyncCommands;

use crate::errors::AppError;
use crate::store::PortfolioStore;

/// Redis-backed slot: the record is a single string value under `key`.
pub struct RedisStore {
    client: redis::Client,
    key: String,
}

impl RedisStore {
    pub fn open(url: &str, key: &str) -> Result<Self, AppError> {
        Ok(RedisStore {
            client: redis::Client::open(url)?,
            key: key.to_string(),
        })
    }
}

#[async_trait]
impl PortfolioStore for RedisStore {
    async fn read_raw(&self) -> Result<Option<String>, AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(&self.key).await?;
        Ok(raw)
    }

    async fn write_raw(&self, raw: &str) -> Result<(), AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set::<_, _, ()>(&self.key, raw).await?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("redis key '{}'", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_rejects_bad_url() {
        assert!(RedisStore::open("not a url", "slot").is_err());
    }

    #[test]
    fn test_describe_names_key() {
        let store = RedisStore::open("redis://127.0.0.1/", "portfolio_builder_data").unwrap();
        assert_eq!(store.describe(), "redis key 'portfolio_builder_data'");
    }
}
