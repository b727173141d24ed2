use crate::core::document::QuoteDocument;
use crate::core::format::digits_only;
use crate::core::id_allocator::{id_sort_key, next_id};
use crate::core::messaging::{share_link, share_message};
use crate::core::normalizer::{decode_items, editable_rows, normalize};
use crate::core::report::FinancialSummary;
use crate::core::{ConfigProvider, QuoteStore, RawRow};
use crate::domain::model::{Quote, QuoteForm, QuoteId};
use crate::utils::error::{QuoteError, Result};
use chrono::NaiveDate;

/// Quote lifecycle on top of a [`QuoteStore`].
pub struct QuoteService<R: QuoteStore, C: ConfigProvider> {
    store: R,
    config: C,
}

impl<R: QuoteStore, C: ConfigProvider> QuoteService<R, C> {
    pub fn new(store: R, config: C) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &R {
        &self.store
    }

    fn build_quote(id: QuoteId, form: &QuoteForm) -> Result<Quote> {
        let customer = form.customer.trim();
        if customer.is_empty() {
            return Err(QuoteError::ValidationError {
                message: "customer name is required".to_string(),
            });
        }

        let normalized = normalize(&form.rows);
        // Stored totals must be finite; JSON has no encoding for inf or NaN.
        if !normalized.total.is_finite() {
            return Err(QuoteError::ValidationError {
                message: "quote total is too large to store".to_string(),
            });
        }
        Ok(Quote {
            id,
            date: form.date,
            customer: customer.to_string(),
            contact: digits_only(&form.contact),
            status: form.status,
            total: normalized.total,
            items_summary: normalized.summary,
            items_json: normalized.serialized,
        })
    }

    /// Allocates the next id for the form's year and stores the quote.
    ///
    /// A `DuplicateId` from the store means another writer took the id
    /// first; the id set is re-read and allocation repeated.
    pub async fn create(&self, form: &QuoteForm) -> Result<Quote> {
        let attempts = self.config.max_attempts().max(1);

        for attempt in 1..=attempts {
            let existing = self.store.existing_ids().await?;
            let quote = Self::build_quote(next_id(&existing, form.date), form)?;

            match self.store.insert(quote.clone()).await {
                Ok(()) => {
                    tracing::info!(
                        "Created quote {} for {} ({:.2})",
                        quote.id,
                        quote.customer,
                        quote.total
                    );
                    return Ok(quote);
                }
                Err(QuoteError::DuplicateId { id }) => {
                    tracing::warn!(
                        "Quote id {} was taken concurrently (attempt {}/{})",
                        id,
                        attempt,
                        attempts
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(QuoteError::AllocationExhausted { attempts })
    }

    /// Replaces the stored fields of `id`; the id itself never changes.
    pub async fn update(&self, id: &QuoteId, form: &QuoteForm) -> Result<Quote> {
        let quote = Self::build_quote(id.clone(), form)?;
        self.store.update(quote.clone()).await?;
        tracing::info!("Updated quote {}", quote.id);
        Ok(quote)
    }

    pub async fn delete(&self, id: &QuoteId) -> Result<()> {
        self.store.delete(id).await?;
        tracing::info!("Deleted quote {}", id);
        Ok(())
    }

    pub async fn get(&self, id: &QuoteId) -> Result<Quote> {
        self.store
            .find(id)
            .await?
            .ok_or_else(|| QuoteError::NotFound { id: id.to_string() })
    }

    /// Every stored quote, newest id first.
    pub async fn list(&self) -> Result<Vec<Quote>> {
        let mut quotes = self.store.list().await?;
        quotes.sort_by(|a, b| id_sort_key(b.id.as_str()).cmp(&id_sort_key(a.id.as_str())));
        Ok(quotes)
    }

    /// The id `create` would assign right now for `date`.
    pub async fn preview_next_id(&self, date: NaiveDate) -> Result<QuoteId> {
        Ok(next_id(self.store.existing_ids().await?, date))
    }

    /// Form state for editing an existing quote.
    pub async fn edit_form(&self, id: &QuoteId) -> Result<QuoteForm> {
        let quote = self.get(id).await?;
        Ok(QuoteForm {
            date: quote.date,
            customer: quote.customer,
            contact: quote.contact,
            status: quote.status,
            rows: editable_rows(&decode_items(&quote.items_json).items),
        })
    }

    pub async fn editable_rows(&self, id: &QuoteId) -> Result<Vec<RawRow>> {
        Ok(self.edit_form(id).await?.rows)
    }

    pub async fn document(&self, id: &QuoteId) -> Result<QuoteDocument> {
        let quote = self.get(id).await?;
        Ok(QuoteDocument::from_quote(&quote, self.config.business_name()))
    }

    pub async fn share_link(&self, id: &QuoteId) -> Result<String> {
        let quote = self.get(id).await?;
        let message = share_message(
            self.config.business_name(),
            &quote.customer,
            &quote.id.display_form(),
            quote.total,
        );
        Ok(share_link(
            self.config.messaging_base_url(),
            self.config.country_code(),
            &quote.contact,
            &message,
        ))
    }

    pub async fn report(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<FinancialSummary> {
        let quotes = self.store.list().await?;
        Ok(FinancialSummary::compute(&quotes, from, to))
    }
}
