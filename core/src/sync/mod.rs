//! Import/export synchronization engine.
//!
//! [`import::ImportPipeline`] pulls remote resources into the local store
//! across the fixed locale order; [`export::ExportPipeline`] pushes locally
//! authored entries back with bounded concurrency and per-pair idempotency.

pub mod export;
pub mod import;

pub use export::ExportPipeline;
pub use import::ImportPipeline;
