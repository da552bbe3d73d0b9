// src/handlers/mod.rs

pub mod comments;
pub mod health;
pub mod posts;
pub mod profile;
pub mod search;

use axum::extract::{Path, rejection::PathRejection};

use crate::{
    error::AppError,
    sanitizer::{PolicyKind, SafeHtml},
};

/// The `{id}` of a post route. An id that is not a number names no post.
pub(crate) fn post_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    let Path(id) = path.map_err(|_| AppError::NotFound("Post not found".to_string()))?;
    Ok(id)
}

/// Sanitizes a submitted field and leaves an audit trail when the
/// sanitizer had to change something.
pub(crate) fn clean_submission(field: &str, raw: &str, kind: PolicyKind) -> SafeHtml {
    let clean = kind.sanitize(raw);
    if clean.as_str() != raw {
        tracing::debug!(
            field,
            policy = kind.policy().name(),
            submitted_len = raw.len(),
            stored_len = clean.as_str().len(),
            "Submitted markup was sanitized"
        );
    }
    clean
}
