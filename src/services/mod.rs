pub mod enrichment;
pub mod seed;

pub use enrichment::{EnrichmentService, MovieEnrichment};
pub use seed::seed_catalog;
