//! Domain model for stored articles.
//!
//! # Responsibility
//! - Define the canonical article record and its validation rules.
//! - Derive storage keys and listing descriptions from raw input.
//!
//! # Invariants
//! - A title is valid only if it yields a non-empty storage key.
//! - Timestamps are UTC wall-clock values serialized as RFC 3339.

pub mod article;
