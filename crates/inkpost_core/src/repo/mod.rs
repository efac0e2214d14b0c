//! Repository façade combining persistence and derived views.
//!
//! # Responsibility
//! - Orchestrate store and index into use-case level operations.
//! - Keep presentation layers decoupled from storage details.
//!
//! # Invariants
//! - Repository writes validate input before anything touches the store.
//! - Every successful mutation is followed by a full index rebuild.

pub mod article_repo;
