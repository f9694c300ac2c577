//! ZincSearch integration: document models, buffering and bulk submission.

pub mod batch;
pub mod client;
pub mod error;
pub mod models;

pub use batch::DocumentBatch;
pub use client::{BulkIndexClient, FlushReport};
pub use error::SubmitError;
pub use models::EmailDocument;
