//! Raw item tables read from files, cleaned tables written back.

use crate::domain::model::{LineItem, RawRow, RawValue};
use crate::utils::error::{QuoteError, Result};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Json,
    Csv,
}

impl TableFormat {
    pub fn from_path(path: &str) -> Result<Self> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("json") => Ok(TableFormat::Json),
            Some("csv") => Ok(TableFormat::Csv),
            _ => Err(QuoteError::ValidationError {
                message: format!("unsupported item table '{}', expected .json or .csv", path),
            }),
        }
    }
}

#[derive(Clone, Copy)]
enum Column {
    Description,
    Quantity,
    UnitPrice,
}

fn column_for(header: &str) -> Option<Column> {
    match header.trim().to_lowercase().as_str() {
        "item" | "description" | "descrição" | "descricao" => Some(Column::Description),
        "qtd" | "qty" | "quantity" | "quantidade" => Some(Column::Quantity),
        "valor unit." | "valor unit" | "valor unitário" | "unitprice" | "unit_price"
        | "unit price" => Some(Column::UnitPrice),
        _ => None,
    }
}

pub fn read_raw_rows(bytes: &[u8], format: TableFormat) -> Result<Vec<RawRow>> {
    match format {
        TableFormat::Json => read_json_rows(bytes),
        TableFormat::Csv => read_csv_rows(bytes),
    }
}

fn read_json_rows(bytes: &[u8]) -> Result<Vec<RawRow>> {
    let document: Value = serde_json::from_slice(bytes)?;
    let Value::Array(elements) = document else {
        return Err(QuoteError::ProcessingError {
            message: "item table must be a JSON array of objects".to_string(),
        });
    };

    let mut rows = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        if !element.is_object() {
            tracing::warn!("Skipping item table entry {} that is not an object", index);
            continue;
        }
        rows.push(serde_json::from_value(element)?);
    }
    Ok(rows)
}

fn read_csv_rows(bytes: &[u8]) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let columns: Vec<Option<Column>> = reader.headers()?.iter().map(column_for).collect();
    if !columns
        .iter()
        .any(|c| matches!(c, Some(Column::Description)))
    {
        return Err(QuoteError::ProcessingError {
            message: "item table has no Item/description column".to_string(),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = RawRow::default();
        for (cell, column) in record.iter().zip(&columns) {
            let value = (!cell.is_empty()).then(|| RawValue::Text(cell.to_string()));
            match column {
                Some(Column::Description) => row.description = value,
                Some(Column::Quantity) => row.quantity = value,
                Some(Column::UnitPrice) => row.unit_price = value,
                None => {}
            }
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Cleaned items with their subtotals, amounts to two decimals.
pub fn items_to_csv(items: &[LineItem]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Item", "Qtd", "Valor Unit.", "Subtotal"])?;
    for item in items {
        writer.write_record([
            item.description.clone(),
            item.quantity.to_string(),
            format!("{:.2}", item.unit_price),
            format!("{:.2}", item.subtotal()),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| QuoteError::IoError(e.into_error()))
}
