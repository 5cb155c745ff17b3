//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (PublishingApi)
//! but are themselves concrete structs, not traits.

mod taxonomy;

pub use taxonomy::TaxonomyService;
