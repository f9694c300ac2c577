//! Bulk indexer for maildir-style email corpora backed by ZincSearch.
//!
//! A run walks `root/<name>/<category>/<file>`, parses each message with a
//! single-pass header/body scan, and submits the resulting documents to the
//! `_bulkv2` endpoint once the walk has finished.

pub mod config;
pub mod error;
pub mod ingest;
pub mod search;

pub use config::{Credentials, ZincConfig};
pub use error::IndexerError;
pub use ingest::{CorpusWalker, IngestStats};
pub use search::{BulkIndexClient, EmailDocument, FlushReport};
