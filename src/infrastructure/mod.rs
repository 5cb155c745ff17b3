//! Infrastructure layer: publishing service boundary
//!
//! The HTTP client lives outside this crate; it plugs in by implementing
//! [`traits::PublishingApi`].

pub mod error;
pub mod traits;

pub use error::{InfraError, InfraResult};
pub use traits::{InMemoryPublishingApi, PublishingApi};
