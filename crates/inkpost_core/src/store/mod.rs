//! Persistence layer for article records.
//!
//! # Responsibility
//! - Define the record store contract and its filesystem implementation.
//! - Keep path and encoding details inside the persistence boundary.
//!
//! # Invariants
//! - Store operations return semantic errors (`NotFound`, `Conflict`) in
//!   addition to transport errors.
//! - The store holds no in-memory state; the filesystem is authoritative.

pub mod record_store;
