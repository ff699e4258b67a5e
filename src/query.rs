//! Query requests and ranked results.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RetrieveError};

/// A text query as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub text: String,
    pub topk: usize,
}

impl QueryRequest {
    /// Request for the `topk` documents closest to `text`.
    pub fn new(text: impl Into<String>, topk: usize) -> Self {
        Self {
            text: text.into(),
            topk,
        }
    }

    /// Boundary checks: non-blank text and a positive `topk`.
    ///
    /// The engine itself accepts blank text (it vectorizes to the all-zero
    /// vector); rejecting it is the caller-facing layer's job.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(RetrieveError::EmptyQuery);
        }
        check_topk(self.topk)
    }
}

pub(crate) fn check_topk(topk: usize) -> Result<()> {
    if topk == 0 {
        return Err(RetrieveError::InvalidParameter(
            "topk must be a positive integer".into(),
        ));
    }
    Ok(())
}

/// One ranked result: similarity plus the matched document.
///
/// Serializes as `{"id", "similarity", "document"}` with the document nested,
/// so plain string documents serialize as well as records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit<'a, D> {
    /// Position of the document in build order.
    pub id: u32,
    /// Weighted Jaccard similarity in `[0, 1]`.
    pub similarity: f32,
    /// The matched document, passed through untouched.
    pub document: &'a D,
}

/// Mean similarity of a result list (0.0 when empty).
pub fn mean_similarity<D>(hits: &[SearchHit<'_, D>]) -> f32 {
    if hits.is_empty() {
        return 0.0;
    }
    hits.iter().map(|h| h.similarity).sum::<f32>() / hits.len() as f32
}
