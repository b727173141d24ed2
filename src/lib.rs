pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{CsvQuoteStore, JsonQuoteStore, LocalStorage};
pub use app::pipelines::ItemsPipeline;
pub use app::quote_service::QuoteService;
pub use config::{AppConfig, StoreBackend};
pub use crate::core::engine::QuoteEngine;
pub use crate::core::id_allocator::{display_form, next_id};
pub use crate::core::normalizer::{ensure_trailing_blank_row, normalize};
pub use domain::model::{LineItem, NormalizedItems, Quote, QuoteForm, QuoteId, QuoteStatus, RawRow, RawValue};
pub use utils::error::{QuoteError, Result};
