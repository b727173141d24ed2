use crate::domain::model::{NormalizedItems, Quote, QuoteId, RawRow};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn business_name(&self) -> &str;
    fn data_dir(&self) -> &str;
    fn messaging_base_url(&self) -> &str;
    fn country_code(&self) -> &str;
    fn max_attempts(&self) -> usize;
}

/// Persistence collaborator for quotes.
///
/// Implementations must reject an `insert` whose id is already stored with
/// [`crate::utils::error::QuoteError::DuplicateId`]; allocation retries rely on it.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Quote>>;
    async fn insert(&self, quote: Quote) -> Result<()>;
    async fn update(&self, quote: Quote) -> Result<()>;
    async fn delete(&self, id: &QuoteId) -> Result<()>;

    async fn existing_ids(&self) -> Result<Vec<String>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .map(|quote| quote.id.to_string())
            .collect())
    }

    async fn find(&self, id: &QuoteId) -> Result<Option<Quote>> {
        Ok(self.list().await?.into_iter().find(|quote| &quote.id == id))
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawRow>>;
    async fn transform(&self, rows: Vec<RawRow>) -> Result<NormalizedItems>;
    async fn load(&self, result: NormalizedItems) -> Result<String>;
}
