//! Locale synchronization engine for the Locales Bridge.
//!
//! Pulls translation resources from the remote service into the local
//! multi-mode store and pushes locally authored entries back, with bounded
//! concurrency and per-pair idempotency tracking.

pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod filter;
pub mod model;
pub mod notify;
pub mod remote;
pub mod store;
pub mod sync;
