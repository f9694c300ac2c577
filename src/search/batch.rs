use crate::search::models::EmailDocument;
use parking_lot::Mutex;

/// Insertion-ordered, unbounded document buffer shared across worker threads.
#[derive(Debug, Default)]
pub struct DocumentBatch {
    documents: Mutex<Vec<EmailDocument>>,
}

impl DocumentBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, document: EmailDocument) {
        self.documents.lock().push(document);
    }

    pub fn extend<I>(&self, documents: I)
    where
        I: IntoIterator<Item = EmailDocument>,
    {
        self.documents.lock().extend(documents);
    }

    pub fn len(&self) -> usize {
        self.documents.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.lock().is_empty()
    }

    /// Move every buffered document out, leaving the batch empty.
    pub fn take(&self) -> Vec<EmailDocument> {
        std::mem::take(&mut *self.documents.lock())
    }
}
