//! # Concordance - AVL-backed word-occurrence index
//!
//! Builds a back-of-book index over a text document: every distinct word maps
//! to the set of line numbers it appears on. The core is a height-balanced
//! (AVL) binary search tree kept in a slotmap arena, guaranteeing O(log n)
//! height under arbitrary insertion and deletion order.
//!
//! ## Example
//!
//! ```
//! use concordance_rs::build_index;
//! use std::io::Cursor;
//!
//! let text = "the quick brown fox\njumps over the lazy dog";
//! let (index, stats) = build_index(Cursor::new(text)).unwrap();
//!
//! assert_eq!(index.most_frequent(), Some(("the", 2)));
//! assert_eq!(index.search_by_prefix("l"), vec!["lazy"]);
//! assert_eq!(stats.total_words, 9);
//! ```
//!
//! ## Guarantees
//!
//! - Height balance: |height(left) − height(right)| ≤ 1 at every node
//! - Lookup, insert, and removal run in O(log n)
//! - Single-writer, in-memory; callers serialize concurrent access externally

mod error;
mod index;
mod ingest;
mod node;
mod query;
mod report;

#[cfg(test)]
mod tests;

pub use error::IndexError;
pub use index::WordIndex;
pub use ingest::{build_index, build_index_from_path, normalize_word, BuildStats};
pub use node::Node;
pub use query::BalanceGauge;
pub use report::{save_report, write_report};
