//! Adapters that implement JavaTypeSystem for various data sources.

mod in_memory;
mod noop;

pub use in_memory::InMemoryTypeSystem;
pub use noop::NoOpTypeSystem;
