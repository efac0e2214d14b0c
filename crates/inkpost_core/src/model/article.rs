//! Article domain model.
//!
//! # Responsibility
//! - Define the canonical record persisted one-per-file by the store.
//! - Derive the storage key and listing description from caller input.
//! - Enforce title validity before anything reaches persistence.
//!
//! # Invariants
//! - `title` is unique across the store; `record_key(&title)` is the
//!   storage key, so a title change relocates the record.
//! - `created` is set once; `updated` never moves backwards.
//! - `description` is derived from `text`, never caller-supplied.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DESCRIPTION_MAX_CHARS: usize = 100;

static KEY_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid key separator regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[*_`#>~\[\]()!|-]+"#).expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Rejection reasons for article input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
    /// Title contains no characters usable in a storage key.
    UnkeyableTitle(String),
}

impl Display for ArticleValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::UnkeyableTitle(title) => {
                write!(f, "title `{title}` yields an empty storage key")
            }
        }
    }
}

impl Error for ArticleValidationError {}

/// Canonical content record.
///
/// Serialized field names are PascalCase and timestamps are RFC 3339, which
/// is the on-disk layout of every stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Article {
    /// Unique display title; its key identifies the stored record.
    pub title: String,
    pub author: String,
    /// Plain-text preview of `text` for listings.
    pub description: String,
    /// Full body. Blank on index entries.
    pub text: String,
    /// Set once at create time.
    pub created: DateTime<Utc>,
    /// Refreshed on every edit.
    pub updated: DateTime<Utc>,
}

impl Article {
    /// Creates a new article with freshly derived metadata.
    ///
    /// # Contract
    /// - Rejects titles that fail `validate_title`.
    /// - Sets `created == updated` to the current instant.
    /// - Derives `description` from the body text.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, ArticleValidationError> {
        let title = title.into();
        validate_title(&title)?;
        let text = text.into();
        let now = Utc::now();
        Ok(Self {
            description: derive_description(&text),
            title,
            author: author.into(),
            text,
            created: now,
            updated: now,
        })
    }

    /// Returns the storage key derived from this article's title.
    pub fn key(&self) -> String {
        record_key(&self.title)
    }

    /// Produces the edited successor of this article.
    ///
    /// # Contract
    /// - Full replacement of title, author and body.
    /// - `created` is preserved; `updated` is refreshed.
    /// - `description` is re-derived from the new body.
    pub fn revise(
        &self,
        title: impl Into<String>,
        author: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, ArticleValidationError> {
        let title = title.into();
        validate_title(&title)?;
        let text = text.into();
        Ok(Self {
            description: derive_description(&text),
            title,
            author: author.into(),
            text,
            created: self.created,
            updated: Utc::now(),
        })
    }

    /// Copy with the body stripped, as held by the index.
    pub fn without_text(&self) -> Self {
        Self {
            text: String::new(),
            ..self.clone()
        }
    }
}

/// Checks that a title is storable.
pub fn validate_title(title: &str) -> Result<(), ArticleValidationError> {
    if title.trim().is_empty() {
        return Err(ArticleValidationError::EmptyTitle);
    }
    if record_key(title).is_empty() {
        return Err(ArticleValidationError::UnkeyableTitle(title.to_string()));
    }
    Ok(())
}

/// Derives the filesystem-safe storage key for a title.
///
/// Rules: lowercase, runs of anything outside `a-z0-9` collapse to one `-`,
/// leading/trailing separators dropped. Distinct titles may share a key
/// (`"a b"` and `"a-b"`); the store treats them as one identity.
pub fn record_key(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    KEY_SEPARATOR_RE
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Derives the listing description from body text.
///
/// Rules:
/// - Markdown links keep their label, other markdown symbols become spaces.
/// - Whitespace is normalized; the first 100 characters are retained.
pub fn derive_description(text: &str) -> String {
    let without_links = MARKDOWN_LINK_RE.replace_all(text, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    normalized.trim().chars().take(DESCRIPTION_MAX_CHARS).collect()
}
