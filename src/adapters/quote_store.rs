use crate::adapters::codec::{CsvSheetCodec, JsonCodec, QuoteCodec};
use crate::core::{QuoteStore, Storage};
use crate::domain::model::{Quote, QuoteId};
use crate::utils::error::{QuoteError, Result};
use async_trait::async_trait;
use std::marker::PhantomData;
use tokio::sync::Mutex;

/// Quote list kept in a single file, rewritten on every change.
///
/// Writes go through one lock, so within a process two inserts of the same
/// id cannot both succeed.
pub struct FileQuoteStore<S: Storage, C: QuoteCodec> {
    storage: S,
    write_lock: Mutex<()>,
    _codec: PhantomData<fn() -> C>,
}

pub type JsonQuoteStore<S> = FileQuoteStore<S, JsonCodec>;
pub type CsvQuoteStore<S> = FileQuoteStore<S, CsvSheetCodec>;

impl<S: Storage, C: QuoteCodec> FileQuoteStore<S, C> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
            _codec: PhantomData,
        }
    }

    pub fn file_name(&self) -> &'static str {
        C::FILE_NAME
    }

    async fn load(&self) -> Result<Vec<Quote>> {
        if !self.storage.exists(C::FILE_NAME).await {
            return Ok(Vec::new());
        }
        let bytes = self.storage.read_file(C::FILE_NAME).await?;
        C::decode(&bytes)
    }

    async fn save(&self, quotes: &[Quote]) -> Result<()> {
        let bytes = C::encode(quotes)?;
        tracing::debug!("Writing {} quotes to {}", quotes.len(), C::FILE_NAME);
        self.storage.write_file(C::FILE_NAME, &bytes).await
    }
}

#[async_trait]
impl<S: Storage, C: QuoteCodec> QuoteStore for FileQuoteStore<S, C> {
    async fn list(&self) -> Result<Vec<Quote>> {
        self.load().await
    }

    async fn insert(&self, quote: Quote) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut quotes = self.load().await?;
        if quotes.iter().any(|existing| existing.id == quote.id) {
            return Err(QuoteError::DuplicateId {
                id: quote.id.to_string(),
            });
        }
        quotes.push(quote);
        self.save(&quotes).await
    }

    async fn update(&self, quote: Quote) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut quotes = self.load().await?;
        let slot = quotes
            .iter_mut()
            .find(|existing| existing.id == quote.id)
            .ok_or_else(|| QuoteError::NotFound {
                id: quote.id.to_string(),
            })?;
        *slot = quote;
        self.save(&quotes).await
    }

    async fn delete(&self, id: &QuoteId) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut quotes = self.load().await?;
        let before = quotes.len();
        quotes.retain(|existing| &existing.id != id);
        if quotes.len() == before {
            return Err(QuoteError::NotFound { id: id.to_string() });
        }
        self.save(&quotes).await
    }
}
