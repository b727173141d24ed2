use async_trait::async_trait;
use chrono::NaiveDate;
use quote_desk::core::QuoteStore;
use quote_desk::{
    AppConfig, CsvQuoteStore, JsonQuoteStore, LocalStorage, Quote, QuoteError, QuoteForm,
    QuoteId, QuoteService, QuoteStatus, RawRow,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

fn day(year: i32, month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, d).unwrap()
}

fn form(date: NaiveDate, customer: &str, rows: Vec<RawRow>) -> QuoteForm {
    QuoteForm {
        date,
        customer: customer.to_string(),
        contact: "(11) 98765-4321".to_string(),
        status: QuoteStatus::Pending,
        rows,
    }
}

fn storage(temp_dir: &TempDir) -> LocalStorage {
    LocalStorage::new(temp_dir.path().to_str().unwrap())
}

async fn exercise_lifecycle<R: QuoteStore>(service: QuoteService<R, AppConfig>) -> anyhow::Result<()> {
    let first = service
        .create(&form(
            day(2026, 3, 5),
            "  Ana  ",
            vec![
                RawRow::new("Compressor", "2", "150.5"),
                RawRow::blank(),
                RawRow::new("Visita", 1i64, 80.0),
            ],
        ))
        .await?;
    assert_eq!(first.id.as_str(), "2026-001");
    assert_eq!(first.customer, "Ana");
    assert_eq!(first.contact, "11987654321");
    assert_eq!(first.total, 381.0);
    assert_eq!(first.items_summary, "Compressor, Visita");

    let older = service
        .create(&form(day(2025, 12, 20), "Bruno", vec![RawRow::new("Filtro", 1i64, 30.0)]))
        .await?;
    assert_eq!(older.id.as_str(), "2025-001");

    let second = service
        .create(&form(day(2026, 4, 1), "Carla", vec![RawRow::new("Gás", 1i64, 120.0)]))
        .await?;
    assert_eq!(second.id.as_str(), "2026-002");
    assert_eq!(service.preview_next_id(day(2026, 4, 2)).await?.as_str(), "2026-003");

    let ids: Vec<String> = service.list().await?.into_iter().map(|q| q.id.to_string()).collect();
    assert_eq!(ids, vec!["2026-002", "2026-001", "2025-001"]);

    // Editing keeps the id and replaces every stored field.
    let mut edit = service.edit_form(&first.id).await?;
    assert_eq!(edit.rows.len(), 3);
    assert_eq!(edit.rows.last(), Some(&RawRow::blank()));
    edit.status = QuoteStatus::Completed;
    edit.rows = vec![RawRow::new("Compressor", 1i64, 150.5)];
    let updated = service.update(&first.id, &edit).await?;
    assert_eq!(updated.id, first.id);
    assert_eq!(updated.total, 150.5);
    assert_eq!(service.list().await?.len(), 3);
    assert_eq!(service.get(&first.id).await?.status, QuoteStatus::Completed);
    assert_eq!(service.editable_rows(&first.id).await?.len(), 2);

    let document = service.document(&first.id).await?;
    assert_eq!(document.number, "001/26");
    assert_eq!(document.total_text, "R$ 150,50");
    assert_eq!(document.file_name(), "ORC_2026-001_Ana.pdf");
    assert_eq!(document.lines.len(), 1);

    let link = service.share_link(&first.id).await?;
    assert!(link.starts_with("https://wa.me/5511987654321?text="));
    assert!(link.contains("001%2F26"));

    let report = service.report(Some(day(2026, 1, 1)), None).await?;
    assert_eq!(report.count, 2);
    assert_eq!(report.revenue, 270.5);
    assert_eq!(report.by_status.get("Concluído"), Some(&150.5));
    assert_eq!(report.by_month.get("2026-04"), Some(&120.0));

    service.delete(&older.id).await?;
    let err = service.get(&older.id).await.unwrap_err();
    assert!(matches!(err, QuoteError::NotFound { .. }));
    let err = service.delete(&older.id).await.unwrap_err();
    assert!(matches!(err, QuoteError::NotFound { .. }));

    Ok(())
}

#[tokio::test]
async fn test_lifecycle_on_json_store() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let service = QuoteService::new(JsonQuoteStore::new(storage(&temp_dir)), AppConfig::default());
    exercise_lifecycle(service).await?;
    assert!(temp_dir.path().join("quotes.json").exists());
    Ok(())
}

#[tokio::test]
async fn test_lifecycle_on_sheet_store() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let service = QuoteService::new(CsvQuoteStore::new(storage(&temp_dir)), AppConfig::default());
    exercise_lifecycle(service).await?;
    assert!(temp_dir.path().join("orcamentos.csv").exists());
    Ok(())
}

#[tokio::test]
async fn test_quotes_survive_reopening_the_store() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let created = {
        let service =
            QuoteService::new(JsonQuoteStore::new(storage(&temp_dir)), AppConfig::default());
        service
            .create(&form(day(2026, 2, 1), "Ana", vec![RawRow::new("Visita", 1i64, 80.0)]))
            .await?
    };

    let service = QuoteService::new(JsonQuoteStore::new(storage(&temp_dir)), AppConfig::default());
    assert_eq!(service.get(&created.id).await?, created);
    assert_eq!(service.preview_next_id(day(2026, 9, 9)).await?.as_str(), "2026-002");
    Ok(())
}

#[tokio::test]
async fn test_customer_is_required() {
    let temp_dir = TempDir::new().unwrap();
    let service = QuoteService::new(JsonQuoteStore::new(storage(&temp_dir)), AppConfig::default());

    let err = service
        .create(&form(day(2026, 1, 1), "   ", vec![]))
        .await
        .unwrap_err();

    assert!(matches!(err, QuoteError::ValidationError { .. }));
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_overflowing_total_is_rejected_and_store_stays_readable() {
    let temp_dir = TempDir::new().unwrap();
    let service = QuoteService::new(JsonQuoteStore::new(storage(&temp_dir)), AppConfig::default());
    service
        .create(&form(day(2026, 1, 1), "Ana", vec![RawRow::new("Visita", 1i64, 80.0)]))
        .await
        .unwrap();

    let err = service
        .create(&form(day(2026, 1, 2), "Bruno", vec![RawRow::new("Big", 10i64, "1e308")]))
        .await
        .unwrap_err();
    assert!(matches!(err, QuoteError::ValidationError { .. }));

    let err = service
        .update(
            &QuoteId::from("2026-001"),
            &form(day(2026, 1, 1), "Ana", vec![RawRow::new("Big", 10i64, "1e308")]),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, QuoteError::ValidationError { .. }));

    let quotes = service.list().await.unwrap();
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].total, 80.0);
}

#[tokio::test]
async fn test_json_store_keeps_full_precision_totals() {
    let temp_dir = TempDir::new().unwrap();
    let price = 1994.1414234139934;
    let created = {
        let service =
            QuoteService::new(JsonQuoteStore::new(storage(&temp_dir)), AppConfig::default());
        service
            .create(&form(day(2026, 2, 1), "Ana", vec![RawRow::new("Compressor", 1i64, price)]))
            .await
            .unwrap()
    };

    let service = QuoteService::new(JsonQuoteStore::new(storage(&temp_dir)), AppConfig::default());
    let reloaded = service.get(&created.id).await.unwrap();
    assert_eq!(reloaded.total.to_bits(), price.to_bits());
    assert_eq!(reloaded, created);
}

#[tokio::test]
async fn test_update_of_unknown_id_fails() {
    let temp_dir = TempDir::new().unwrap();
    let service = QuoteService::new(JsonQuoteStore::new(storage(&temp_dir)), AppConfig::default());

    let err = service
        .update(&QuoteId::from("2026-404"), &form(day(2026, 1, 1), "Ana", vec![]))
        .await
        .unwrap_err();

    assert!(matches!(err, QuoteError::NotFound { .. }));
}

/// Reports an outdated id list for the first `stale_reads` reads, as if
/// another writer had inserted in between.
struct StaleReads<R> {
    inner: R,
    stale_reads: usize,
    reads: AtomicUsize,
}

#[async_trait]
impl<R: QuoteStore> QuoteStore for StaleReads<R> {
    async fn list(&self) -> quote_desk::Result<Vec<Quote>> {
        self.inner.list().await
    }

    async fn insert(&self, quote: Quote) -> quote_desk::Result<()> {
        self.inner.insert(quote).await
    }

    async fn update(&self, quote: Quote) -> quote_desk::Result<()> {
        self.inner.update(quote).await
    }

    async fn delete(&self, id: &QuoteId) -> quote_desk::Result<()> {
        self.inner.delete(id).await
    }

    async fn existing_ids(&self) -> quote_desk::Result<Vec<String>> {
        if self.reads.fetch_add(1, Ordering::SeqCst) < self.stale_reads {
            return Ok(Vec::new());
        }
        self.inner.existing_ids().await
    }
}

async fn racing_service(
    temp_dir: &TempDir,
    stale_reads: usize,
) -> QuoteService<StaleReads<JsonQuoteStore<LocalStorage>>, AppConfig> {
    let inner = JsonQuoteStore::new(storage(temp_dir));
    let seed = QuoteService::new(inner, AppConfig::default());
    seed.create(&form(day(2026, 1, 10), "Ana", vec![]))
        .await
        .unwrap();

    let store = StaleReads {
        inner: JsonQuoteStore::new(storage(temp_dir)),
        stale_reads,
        reads: AtomicUsize::new(0),
    };
    QuoteService::new(store, AppConfig::default())
}

#[tokio::test]
async fn test_create_retries_after_losing_the_race() {
    let temp_dir = TempDir::new().unwrap();
    let service = racing_service(&temp_dir, 1).await;

    let quote = service
        .create(&form(day(2026, 1, 11), "Bruno", vec![]))
        .await
        .unwrap();

    assert_eq!(quote.id.as_str(), "2026-002");
    assert_eq!(service.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_gives_up_after_max_attempts() {
    let temp_dir = TempDir::new().unwrap();
    let service = racing_service(&temp_dir, usize::MAX).await;

    let err = service
        .create(&form(day(2026, 1, 11), "Bruno", vec![]))
        .await
        .unwrap_err();

    assert!(matches!(err, QuoteError::AllocationExhausted { attempts: 3 }));
    assert_eq!(service.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let temp_dir = TempDir::new().unwrap();
    let service = QuoteService::new(JsonQuoteStore::new(storage(&temp_dir)), AppConfig::default());

    let form_a = form(day(2026, 5, 1), "Ana", vec![]);
    let form_b = form(day(2026, 5, 1), "Bruno", vec![]);
    let (a, b) = tokio::join!(service.create(&form_a), service.create(&form_b));

    let (a, b) = (a.unwrap(), b.unwrap());
    assert_ne!(a.id, b.id);
    assert_eq!(service.list().await.unwrap().len(), 2);
}
