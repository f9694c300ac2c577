use crate::ingest::parser::ParsedMessage;
use crate::ingest::path::PathMetadata;
use serde::{Deserialize, Serialize};

/// Representation of an email document stored in ZincSearch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDocument {
    pub name: String,
    pub category: String,
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailDocument {
    /// Combine parsed message fields with the mailbox and folder names.
    pub fn assemble(message: ParsedMessage, meta: PathMetadata) -> Self {
        Self {
            name: meta.name,
            category: meta.category,
            from: message.from,
            to: message.to,
            subject: message.subject,
            body: message.body,
        }
    }
}

/// Request body for `POST /api/_bulkv2`.
#[derive(Debug, Serialize)]
pub(crate) struct BulkRequest<'a> {
    pub index: &'a str,
    pub records: &'a [EmailDocument],
}

/// Success payload returned by `/api/_bulkv2`.
#[derive(Debug, Deserialize)]
pub(crate) struct BulkResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub record_count: Option<u64>,
}
