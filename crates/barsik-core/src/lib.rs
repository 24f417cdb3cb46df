//! barsik/crates/barsik-core/src/lib.rs
//!
//! Domain models, the upstream port, and the data-shaping layer behind the
//! Barsik moderation dashboard.

pub mod analytics;
pub mod error;
pub mod labels;
pub mod models;
pub mod panels;
pub mod timefmt;
pub mod traits;

// Re-exporting for easier access in other crates
pub use analytics::*;
pub use error::*;
pub use labels::*;
pub use models::*;
pub use panels::*;
pub use traits::*;
