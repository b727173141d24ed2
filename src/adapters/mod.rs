// Adapters layer: concrete implementations for external systems (files, stores, archives).

pub mod archive;
pub mod codec;
pub mod quote_store;
pub mod storage;
pub mod table;

pub use quote_store::{CsvQuoteStore, FileQuoteStore, JsonQuoteStore};
pub use storage::LocalStorage;
