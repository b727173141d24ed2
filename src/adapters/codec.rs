//! On-disk encodings for the quote list.

use crate::core::coerce::coerce_to_decimal;
use crate::core::format::{format_date_br, parse_date_br};
use crate::domain::model::{Quote, QuoteId, QuoteStatus, RawValue};
use crate::utils::error::{QuoteError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub trait QuoteCodec: Send + Sync + 'static {
    const FILE_NAME: &'static str;

    fn decode(bytes: &[u8]) -> Result<Vec<Quote>>;
    fn encode(quotes: &[Quote]) -> Result<Vec<u8>>;
}

/// Pretty-printed JSON array of quotes.
pub struct JsonCodec;

impl QuoteCodec for JsonCodec {
    const FILE_NAME: &'static str = "quotes.json";

    fn decode(bytes: &[u8]) -> Result<Vec<Quote>> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(bytes)?)
    }

    fn encode(quotes: &[Quote]) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(quotes)?)
    }
}

pub const SHEET_HEADERS: [&str; 8] = [
    "ID", "Data", "Cliente", "WhatsApp", "Status", "Total", "Itens", "ItensJSON",
];

/// Spreadsheet layout shared with quotes saved by earlier tools.
#[derive(Debug, Serialize, Deserialize)]
struct SheetRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Data")]
    date: String,
    #[serde(rename = "Cliente", default)]
    customer: String,
    #[serde(rename = "WhatsApp", default)]
    contact: String,
    #[serde(rename = "Status", default)]
    status: String,
    #[serde(rename = "Total", default)]
    total: String,
    #[serde(rename = "Itens", default)]
    items_summary: String,
    #[serde(rename = "ItensJSON", default)]
    items_json: String,
}

impl From<&Quote> for SheetRow {
    fn from(quote: &Quote) -> Self {
        Self {
            id: quote.id.to_string(),
            date: format_date_br(quote.date),
            customer: quote.customer.clone(),
            contact: quote.contact.clone(),
            status: quote.status.label().to_string(),
            total: quote.total.to_string(),
            items_summary: quote.items_summary.clone(),
            items_json: quote.items_json.clone(),
        }
    }
}

impl TryFrom<SheetRow> for Quote {
    type Error = QuoteError;

    fn try_from(row: SheetRow) -> Result<Self> {
        let date = parse_date_br(&row.date)
            .or_else(|| NaiveDate::parse_from_str(row.date.trim(), "%Y-%m-%d").ok())
            .ok_or_else(|| QuoteError::ProcessingError {
                message: format!("quote {} has an unreadable date '{}'", row.id, row.date),
            })?;

        let status = row.status.parse::<QuoteStatus>().unwrap_or_else(|_| {
            tracing::warn!(
                "Quote {} has unknown status '{}', reading it as {}",
                row.id,
                row.status,
                QuoteStatus::Pending
            );
            QuoteStatus::Pending
        });

        Ok(Quote {
            id: QuoteId::from(row.id),
            date,
            customer: row.customer,
            contact: row.contact,
            status,
            total: coerce_to_decimal(Some(&RawValue::Text(row.total)), 0.0),
            items_summary: row.items_summary,
            items_json: row.items_json,
        })
    }
}

/// CSV with the legacy sheet columns, dates as `dd/mm/yyyy`.
pub struct CsvSheetCodec;

impl QuoteCodec for CsvSheetCodec {
    const FILE_NAME: &'static str = "orcamentos.csv";

    fn decode(bytes: &[u8]) -> Result<Vec<Quote>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let mut quotes = Vec::new();
        for row in reader.deserialize::<SheetRow>() {
            let row = row?;
            if row.id.trim().is_empty() {
                continue;
            }
            quotes.push(Quote::try_from(row)?);
        }
        Ok(quotes)
    }

    fn encode(quotes: &[Quote]) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(SHEET_HEADERS)?;
        for quote in quotes {
            writer.serialize(SheetRow::from(quote))?;
        }
        writer
            .into_inner()
            .map_err(|e| QuoteError::IoError(e.into_error()))
    }
}
