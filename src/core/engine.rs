use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct QuoteEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> QuoteEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting item import");

        let rows = self.pipeline.extract().await?;
        tracing::info!("Extracted {} rows", rows.len());

        let normalized = self.pipeline.transform(rows).await?;
        tracing::info!(
            "Normalized {} items, total {:.2}",
            normalized.items.len(),
            normalized.total
        );

        let output_path = self.pipeline.load(normalized).await?;
        tracing::info!("Output saved to: {} ({:?})", output_path, started.elapsed());

        Ok(output_path)
    }
}
