// src/models/user.rs

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{sanitizer::SafeHtml, store::Record};

/// Usernames end up in URLs, so keep them to a path-safe alphabet.
static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("username pattern is valid"));

/// A blog user. Created on the fly the first time a name posts or comments.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique username, also the record key.
    pub username: String,

    /// Profile bio, sanitized with the bio policy before it is stored.
    pub bio: SafeHtml,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            bio: SafeHtml::default(),
            created_at: chrono::Utc::now(),
        }
    }
}

impl Record for User {
    type Key = String;

    fn key(&self) -> String {
        self.username.clone()
    }
}

/// Form payload for the bio editor.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBioRequest {
    #[serde(default)]
    #[validate(length(max = 5000, message = "Bio must be at most 5000 characters"))]
    pub bio: String,
}

/// Shared rule for the `author` field of post and comment forms.
pub fn validate_username(username: &str) -> Result<(), validator::ValidationError> {
    if !USERNAME_RE.is_match(username) {
        return Err(validator::ValidationError::new("invalid_username").with_message(
            "Names may only use letters, digits, '.', '_' and '-'".into(),
        ));
    }
    Ok(())
}
