use crate::core::coerce::{coerce_to_decimal, coerce_to_int, coerce_to_text};
use crate::domain::model::{LineItem, NormalizedItems, RawRow};
use serde_json::{json, Value};

pub const DEFAULT_QUANTITY: i64 = 1;
pub const DEFAULT_UNIT_PRICE: f64 = 0.0;

/// Stored item keys. Previously saved quotes use these names.
pub const KEY_DESCRIPTION: &str = "Item";
pub const KEY_QUANTITY: &str = "Qtd";
pub const KEY_UNIT_PRICE: &str = "Valor Unit.";

fn row_description(row: &RawRow) -> String {
    coerce_to_text(row.description.as_ref())
}

/// Drops rows without a description, coerces numbers and totals the rest.
pub fn normalize(rows: &[RawRow]) -> NormalizedItems {
    let items: Vec<LineItem> = rows
        .iter()
        .filter_map(|row| {
            let description = row_description(row).trim().to_string();
            if description.is_empty() {
                return None;
            }
            Some(LineItem {
                description,
                quantity: coerce_to_int(row.quantity.as_ref(), DEFAULT_QUANTITY),
                unit_price: coerce_to_decimal(row.unit_price.as_ref(), DEFAULT_UNIT_PRICE),
            })
        })
        .collect();

    let total = items.iter().map(LineItem::subtotal).sum();
    let summary = items
        .iter()
        .map(|item| item.description.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let serialized = serialize_items(&items);

    tracing::debug!(
        input_rows = rows.len(),
        kept_rows = items.len(),
        total,
        "normalized line items"
    );

    NormalizedItems {
        items,
        total,
        summary,
        serialized,
    }
}

/// JSON array of `{"Item", "Qtd", "Valor Unit."}` objects.
pub fn serialize_items(items: &[LineItem]) -> String {
    Value::Array(
        items
            .iter()
            .map(|item| {
                json!({
                    KEY_DESCRIPTION: item.description,
                    KEY_QUANTITY: item.quantity,
                    KEY_UNIT_PRICE: item.unit_price,
                })
            })
            .collect(),
    )
    .to_string()
}

/// Reads a serialized item list back into raw rows.
///
/// Empty text, invalid JSON and non-array documents give an empty table;
/// elements that are not objects are skipped.
pub fn parse_serialized(text: &str) -> Vec<RawRow> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let document: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Ignoring unreadable item list: {}", e);
            return Vec::new();
        }
    };
    let Value::Array(elements) = document else {
        tracing::warn!("Ignoring item list that is not a JSON array");
        return Vec::new();
    };
    elements
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|element| serde_json::from_value::<RawRow>(element).ok())
        .collect()
}

pub fn decode_items(text: &str) -> NormalizedItems {
    normalize(&parse_serialized(text))
}

/// Appends the blank entry row unless the table already ends with one.
pub fn ensure_trailing_blank_row(mut rows: Vec<RawRow>) -> Vec<RawRow> {
    let needs_blank = rows
        .last()
        .map_or(true, |last| !row_description(last).trim().is_empty());
    if needs_blank {
        rows.push(RawRow::blank());
    }
    rows
}

/// Rows for re-opening stored items in an editor, blank row included.
pub fn editable_rows(items: &[LineItem]) -> Vec<RawRow> {
    ensure_trailing_blank_row(items.iter().map(RawRow::from).collect())
}
