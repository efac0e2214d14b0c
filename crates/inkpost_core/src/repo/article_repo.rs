//! Article repository façade.
//!
//! # Responsibility
//! - Provide create/get/edit/delete over one store and its index.
//! - Enforce title uniqueness, input validation and timestamp discipline.
//!
//! # Invariants
//! - The index instance is owned here and guarded by its own lock; there
//!   is no process-wide state.
//! - A failed mutation leaves the previously stored record authoritative.
//! - No successful path leaves two copies of one logical article.

use crate::index::article_index::ArticleIndex;
use crate::model::article::{record_key, Article, ArticleValidationError};
use crate::store::record_store::{RecordStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error taxonomy exposed to presentation callers.
#[derive(Debug)]
pub enum RepoError {
    /// Rejected caller input.
    InvalidInput(ArticleValidationError),
    /// No article resolves from the title.
    NotFound(String),
    /// The title's storage key is already taken.
    Conflict(String),
    /// Persistence failure (decode or i/o) passed through unchanged.
    Store(StoreError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "{err}"),
            Self::NotFound(title) => write!(f, "article not found: `{title}`"),
            Self::Conflict(title) => write!(f, "article already exists: `{title}`"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NotFound(_) | Self::Conflict(_) => None,
        }
    }
}

impl From<ArticleValidationError> for RepoError {
    fn from(value: ArticleValidationError) -> Self {
        Self::InvalidInput(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(key) => Self::NotFound(key),
            StoreError::Conflict(key) => Self::Conflict(key),
            other => Self::Store(other),
        }
    }
}

/// Façade enforcing article invariants over a record store and its index.
pub struct ArticleRepository<S: RecordStore> {
    store: S,
    index: ArticleIndex,
}

impl<S: RecordStore> ArticleRepository<S> {
    /// Opens the repository and performs the startup rebuild.
    ///
    /// Unreadable records do not block opening; they are reported by the
    /// rebuild and left out of the index until repaired or deleted.
    pub fn open(store: S) -> RepoResult<Self> {
        let index = ArticleIndex::new();
        let report = index.rebuild(&store)?;
        if !report.skipped.is_empty() {
            warn!(
                "event=repo_open module=repo status=degraded indexed={} skipped={}",
                report.indexed,
                report.skipped.len()
            );
        }
        Ok(Self { store, index })
    }

    /// Creates a new article.
    ///
    /// # Contract
    /// - `InvalidInput` for an empty or unkeyable title.
    /// - `Conflict` if the title's key is already stored; the existing
    ///   record is untouched. The exclusive write closes the window
    ///   between existence check and create.
    /// - On success `created == updated` on the stored record.
    pub fn create(
        &self,
        title: &str,
        author: &str,
        text: impl Into<String>,
    ) -> RepoResult<Article> {
        let article = Article::new(title, author, text)?;
        let key = article.key();
        match self.store.write_new(&key, &article) {
            Ok(()) => {}
            Err(StoreError::Conflict(_)) => return Err(RepoError::Conflict(title.to_string())),
            Err(err) => return Err(err.into()),
        }
        self.index.rebuild(&self.store)?;
        info!("event=article_create module=repo status=ok key={key}");
        Ok(article)
    }

    /// Resolves one article by title, body included.
    pub fn get(&self, title: &str) -> RepoResult<Article> {
        match self.store.read(&record_key(title)) {
            Ok(article) => Ok(article),
            Err(StoreError::NotFound(_)) => Err(RepoError::NotFound(title.to_string())),
            Err(err) => Err(err.into()),
        }
    }

    /// Applies a full-replacement edit, relocating the record when the
    /// title changes.
    ///
    /// # Contract
    /// - `NotFound` if `original_title` does not resolve.
    /// - `created` is preserved; `updated` is refreshed.
    /// - Title change: the revised record is written exclusively under the
    ///   new key (`Conflict` on collision), then the old key is deleted.
    ///   If that delete fails the new copy is withdrawn before the error
    ///   surfaces, so the old record stays authoritative.
    pub fn edit(
        &self,
        original_title: &str,
        new_title: &str,
        author: &str,
        text: impl Into<String>,
    ) -> RepoResult<Article> {
        let current = self.get(original_title)?;
        let revised = current.revise(new_title, author, text)?;
        let old_key = record_key(original_title);
        let new_key = revised.key();

        if new_key == old_key {
            self.store.write(&old_key, &revised)?;
        } else {
            match self.store.write_new(&new_key, &revised) {
                Ok(()) => {}
                Err(StoreError::Conflict(_)) => {
                    return Err(RepoError::Conflict(new_title.to_string()));
                }
                Err(err) => return Err(err.into()),
            }
            if let Err(err) = self.store.delete(&old_key) {
                if let Err(cleanup) = self.store.delete(&new_key) {
                    warn!(
                        "event=article_edit module=repo status=error key={new_key} cleanup_error={cleanup}"
                    );
                }
                return Err(err.into());
            }
        }

        self.index.rebuild(&self.store)?;
        info!("event=article_edit module=repo status=ok key={new_key}");
        Ok(revised)
    }

    /// Deletes one article by title.
    ///
    /// Deleting an absent title fails with `NotFound`; the operation is
    /// idempotent in failure, not in success.
    pub fn delete(&self, title: &str) -> RepoResult<()> {
        let key = record_key(title);
        match self.store.delete(&key) {
            Ok(()) => {}
            Err(StoreError::NotFound(_)) => return Err(RepoError::NotFound(title.to_string())),
            Err(err) => return Err(err.into()),
        }
        self.index.rebuild(&self.store)?;
        info!("event=article_delete module=repo status=ok key={key}");
        Ok(())
    }

    /// Returns the index's current ordered, body-stripped entries.
    pub fn snapshot(&self) -> Vec<Article> {
        self.index.snapshot()
    }

    /// Read access to the owned index.
    pub fn index(&self) -> &ArticleIndex {
        &self.index
    }
}
