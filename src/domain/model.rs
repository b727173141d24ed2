use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A cell value as it arrives from an editing surface or a stored row.
///
/// Variant order matters for the untagged decoding: JSON `2` must land in
/// `Integer`, `2.5` in `Decimal`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Flag(bool),
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Integer(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Decimal(value)
    }
}

/// One row of the editable item table. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(default, alias = "Item")]
    pub description: Option<RawValue>,
    #[serde(default, alias = "Qtd")]
    pub quantity: Option<RawValue>,
    #[serde(
        default,
        rename = "unitPrice",
        alias = "unit_price",
        alias = "Valor Unit."
    )]
    pub unit_price: Option<RawValue>,
}

impl RawRow {
    pub fn new(
        description: impl Into<RawValue>,
        quantity: impl Into<RawValue>,
        unit_price: impl Into<RawValue>,
    ) -> Self {
        Self {
            description: Some(description.into()),
            quantity: Some(quantity.into()),
            unit_price: Some(unit_price.into()),
        }
    }

    /// The empty entry row kept at the bottom of an editing table.
    pub fn blank() -> Self {
        Self::new("", 1i64, 0.0f64)
    }
}

impl From<&LineItem> for RawRow {
    fn from(item: &LineItem) -> Self {
        Self::new(item.description.clone(), item.quantity, item.unit_price)
    }
}

/// A cleaned line item. The subtotal is always derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: i64,
    pub unit_price: f64,
}

impl LineItem {
    pub fn subtotal(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// Output of a normalization pass.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedItems {
    pub items: Vec<LineItem>,
    pub total: f64,
    /// Trimmed descriptions joined with `", "`.
    pub summary: String,
    /// Storage encoding, see [`crate::core::normalizer::serialize_items`].
    pub serialized: String,
}

/// Year-scoped quote identifier, `"<year>-<seq>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteId(String);

impl QuoteId {
    pub fn new(year: i32, seq: u64) -> Self {
        Self(format!("{}-{:03}", year, seq))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Customer-facing number, e.g. `003/26`.
    pub fn display_form(&self) -> String {
        crate::core::id_allocator::display_form(&self.0)
    }
}

impl From<&str> for QuoteId {
    fn from(value: &str) -> Self {
        Self(value.trim().to_string())
    }
}

impl From<String> for QuoteId {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum QuoteStatus {
    #[default]
    #[serde(rename = "Pendente")]
    Pending,
    #[serde(rename = "Em Andamento")]
    InProgress,
    #[serde(rename = "Concluído")]
    Completed,
    #[serde(rename = "Cancelado")]
    Cancelled,
}

impl QuoteStatus {
    pub const ALL: [QuoteStatus; 4] = [
        QuoteStatus::Pending,
        QuoteStatus::InProgress,
        QuoteStatus::Completed,
        QuoteStatus::Cancelled,
    ];

    /// Label used in stored rows and on documents.
    pub fn label(&self) -> &'static str {
        match self {
            QuoteStatus::Pending => "Pendente",
            QuoteStatus::InProgress => "Em Andamento",
            QuoteStatus::Completed => "Concluído",
            QuoteStatus::Cancelled => "Cancelado",
        }
    }

    fn english(&self) -> &'static str {
        match self {
            QuoteStatus::Pending => "pending",
            QuoteStatus::InProgress => "in-progress",
            QuoteStatus::Completed => "completed",
            QuoteStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for QuoteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', ' '], "-");
        QuoteStatus::ALL
            .into_iter()
            .find(|status| {
                status.label().to_lowercase().replace(' ', "-") == wanted
                    || status.english() == wanted
                    || status.english().replace('-', "") == wanted
            })
            .ok_or_else(|| format!("unknown quote status: {}", s.trim()))
    }
}

/// A stored quote, as exchanged with a [`crate::domain::ports::QuoteStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub date: NaiveDate,
    pub customer: String,
    pub contact: String,
    pub status: QuoteStatus,
    pub total: f64,
    pub items_summary: String,
    pub items_json: String,
}

/// Caller-owned form state used to create or edit a quote.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteForm {
    pub date: NaiveDate,
    pub customer: String,
    pub contact: String,
    pub status: QuoteStatus,
    pub rows: Vec<RawRow>,
}
