//! Core domain logic for inkpost, a file-backed article store.
//! This crate is the single source of truth for business invariants.

pub mod index;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use index::article_index::{ArticleIndex, RebuildReport};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::article::{
    derive_description, record_key, validate_title, Article, ArticleValidationError,
};
pub use repo::article_repo::{ArticleRepository, RepoError, RepoResult};
pub use store::record_store::{FsRecordStore, RecordStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
