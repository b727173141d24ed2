use crate::adapters::table::{items_to_csv, read_raw_rows, TableFormat};
use crate::core::normalizer::normalize;
use crate::core::{NormalizedItems, Pipeline, RawRow, Storage};
use crate::utils::error::Result;
use std::path::Path;

/// Imports a raw item table and writes the cleaned version next to it.
///
/// Outputs are `<stem>.items.csv` (cleaned rows with subtotals) and
/// `<stem>.items.json` (the stored item encoding).
pub struct ItemsPipeline<S: Storage, T: Storage> {
    source: S,
    target: T,
    input_path: String,
    output_dir: String,
}

impl<S: Storage, T: Storage> ItemsPipeline<S, T> {
    pub fn new(source: S, target: T, input_path: String, output_dir: String) -> Self {
        Self {
            source,
            target,
            input_path,
            output_dir,
        }
    }

    fn stem(&self) -> String {
        Path::new(&self.input_path)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("items")
            .to_string()
    }
}

#[async_trait::async_trait]
impl<S: Storage, T: Storage> Pipeline for ItemsPipeline<S, T> {
    async fn extract(&self) -> Result<Vec<RawRow>> {
        let format = TableFormat::from_path(&self.input_path)?;
        tracing::debug!("Reading {:?} item table from {}", format, self.input_path);
        let bytes = self.source.read_file(&self.input_path).await?;
        read_raw_rows(&bytes, format)
    }

    async fn transform(&self, rows: Vec<RawRow>) -> Result<NormalizedItems> {
        let dropped = rows.len();
        let normalized = normalize(&rows);
        let dropped = dropped - normalized.items.len();
        if dropped > 0 {
            tracing::info!("Dropped {} rows without a description", dropped);
        }
        Ok(normalized)
    }

    async fn load(&self, result: NormalizedItems) -> Result<String> {
        let stem = self.stem();
        let csv_name = format!("{}.items.csv", stem);
        let json_name = format!("{}.items.json", stem);

        self.target
            .write_file(&csv_name, &items_to_csv(&result.items)?)
            .await?;
        self.target
            .write_file(&json_name, result.serialized.as_bytes())
            .await?;

        tracing::debug!("Wrote {} and {}", csv_name, json_name);
        Ok(format!("{}/{}", self.output_dir.trim_end_matches('/'), json_name))
    }
}
