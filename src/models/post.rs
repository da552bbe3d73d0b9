use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    models::{comment::Comment, user::validate_username},
    sanitizer::SafeHtml,
    store::Record,
};

/// A blog post together with its comments.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: i64,

    /// Plain text; escaped when rendered.
    pub title: String,

    /// Username of the author.
    pub author: String,

    /// Body, sanitized with the post policy before it is stored.
    pub content: SafeHtml,

    pub created_at: chrono::DateTime<chrono::Utc>,

    /// Oldest first.
    pub comments: Vec<Comment>,
}

impl Record for Post {
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }
}

/// Form payload for creating a new post.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Title length must be between 1 and 100 chars"
    ))]
    pub title: String,

    #[validate(
        length(min = 1, max = 50, message = "Name length must be between 1 and 50 chars"),
        custom(function = validate_username)
    )]
    pub author: String,

    #[validate(length(
        min = 1,
        max = 10000,
        message = "Content length must be between 1 and 10000 chars"
    ))]
    pub content: String,
}

/// Query parameters for the search page.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SearchParams {
    /// Search keyword, matched against title and content.
    #[serde(default)]
    #[validate(length(max = 200, message = "Search query must be at most 200 chars"))]
    pub q: String,
}

impl Post {
    /// Case-insensitive substring match on the title and on the content as
    /// it reads on the page, markup excluded.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.content.text_content().to_lowercase().contains(&needle)
    }
}
