//! Derived read views over stored articles.

pub mod article_index;
