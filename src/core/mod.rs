pub mod coerce;
pub mod document;
pub mod engine;
pub mod format;
pub mod id_allocator;
pub mod messaging;
pub mod normalizer;
pub mod report;

pub use crate::domain::model::{LineItem, NormalizedItems, RawRow, RawValue};
pub use crate::domain::ports::{ConfigProvider, Pipeline, QuoteStore, Storage};
pub use crate::utils::error::Result;
