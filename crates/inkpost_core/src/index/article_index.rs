//! Derived in-memory article index.
//!
//! # Responsibility
//! - Maintain the ordered, body-stripped view of every stored article.
//! - Replace the view atomically so readers never observe a partial
//!   rebuild.
//!
//! # Invariants
//! - Entries are sorted by `created` ascending; ties keep key order.
//! - Every entry has an empty `text` body.
//! - The store stays authoritative; the index is rebuilt, never patched.

use crate::model::article::Article;
use crate::store::record_store::{RecordStore, StoreError, StoreResult};
use log::{info, warn};
use parking_lot::RwLock;

/// Outcome of one full rebuild.
#[derive(Debug, Default)]
pub struct RebuildReport {
    /// Number of records now in the index.
    pub indexed: usize,
    /// Records left out of the index, with the per-record reason.
    pub skipped: Vec<(String, StoreError)>,
}

/// Lock-guarded, rebuildable snapshot of all article metadata.
#[derive(Debug, Default)]
pub struct ArticleIndex {
    entries: RwLock<Vec<Article>>,
}

impl ArticleIndex {
    /// Creates an empty index; `rebuild` populates it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reloads every record from `store` and swaps the view in one step.
    ///
    /// # Contract
    /// - O(n) in the number of stored records; the only way the index
    ///   changes.
    /// - Records that fail to read or decode are skipped and reported,
    ///   not fatal; only `list_keys` failure aborts the rebuild.
    /// - Concurrent readers observe either the previous or the new view.
    pub fn rebuild<S: RecordStore>(&self, store: &S) -> StoreResult<RebuildReport> {
        let mut keys = store.list_keys()?;
        keys.sort_unstable();

        let mut entries = Vec::with_capacity(keys.len());
        let mut skipped = Vec::new();
        for key in keys {
            match store.read(&key) {
                Ok(article) => entries.push(article.without_text()),
                Err(err) => {
                    warn!("event=index_rebuild module=index status=skip key={key} error={err}");
                    skipped.push((key, err));
                }
            }
        }

        // Keys were read in sorted order; the stable sort keeps that order
        // for articles sharing a creation instant.
        entries.sort_by_key(|article| article.created);

        let indexed = entries.len();
        *self.entries.write() = entries;
        info!(
            "event=index_rebuild module=index status=ok indexed={indexed} skipped={}",
            skipped.len()
        );
        Ok(RebuildReport { indexed, skipped })
    }

    /// Returns a copy of the current ordered entries.
    ///
    /// Callers own the copy; mutating it never affects the index.
    pub fn snapshot(&self) -> Vec<Article> {
        self.entries.read().clone()
    }

    /// Number of currently indexed articles.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
