pub mod items_pipeline;

pub use items_pipeline::ItemsPipeline;
