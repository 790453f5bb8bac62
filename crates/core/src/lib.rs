//! Functional core of the folio backend.
//!
//! Everything in this crate is free of I/O: domain types, request validation,
//! the gateway traits implemented by the storage layer, the generation-counted
//! read cache, and the response envelope shared by every HTTP handler.

pub mod auth;
pub mod cache;
pub mod content;
pub mod envelope;
pub mod serde;
pub mod storage;
