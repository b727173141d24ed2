pub mod pipelines;
pub mod quote_service;
