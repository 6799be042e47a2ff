//! Service layer for business logic
//!
//! Services orchestrate between the web handlers and the catalog store:
//! flattening, normalization, classification, and sampling happen here, so
//! handlers stay thin and the classifiers stay pure.

pub mod catalog;

pub use catalog::CatalogService;
