use crate::adapters::codec::{CsvSheetCodec, JsonCodec, QuoteCodec};
use crate::domain::model::Quote;
use crate::utils::error::Result;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const ARCHIVE_CSV: &str = "quotes.csv";
pub const ARCHIVE_JSON: &str = "quotes.json";

/// ZIP holding every quote in both the sheet and the JSON layout.
pub fn build_archive(quotes: &[Quote]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    zip.start_file::<_, ()>(ARCHIVE_CSV, FileOptions::default())?;
    zip.write_all(&CsvSheetCodec::encode(quotes)?)?;

    zip.start_file::<_, ()>(ARCHIVE_JSON, FileOptions::default())?;
    zip.write_all(&JsonCodec::encode(quotes)?)?;

    let cursor = zip.finish()?;
    tracing::debug!("Archived {} quotes", quotes.len());
    Ok(cursor.into_inner())
}
