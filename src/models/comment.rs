use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{models::user::validate_username, sanitizer::SafeHtml};

/// A comment on a post. Comments are stored inside their post.
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub id: i64,
    pub author: String,
    /// Sanitized with the comment policy before it is stored.
    pub content: SafeHtml,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Form payload for creating a new comment.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(
        length(min = 1, max = 50, message = "Name length must be between 1 and 50 chars"),
        custom(function = validate_username)
    )]
    pub author: String,

    #[validate(length(
        min = 1,
        max = 1000,
        message = "Comment must be between 1 and 1000 characters"
    ))]
    pub content: String,
}
