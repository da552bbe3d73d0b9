//! Server-rendered pages.
//!
//! Every piece of user text goes through the sanitizer here, on read, with
//! the policy for its field. Stored rich text was already sanitized on write;
//! the second pass is a no-op unless a policy has been narrowed since.

pub mod posts;
pub mod profile;
pub mod search;

use axum::{http::StatusCode, response::Html};

use crate::{sanitizer::PolicyKind, utils::html::escape};

pub const DEFAULT_NAV: &[(&str, &str)] = &[("/", "Home"), ("/new-post", "New Post")];

/// Wraps `body` in the site chrome. `title` is plain text; `body` must
/// already be safe markup.
pub fn layout(title: &str, nav: &[(&str, &str)], body: &str) -> Html<String> {
    let links = nav
        .iter()
        .map(|(href, label)| format!(r#"<a href="{}">{}</a>"#, escape(href), label))
        .collect::<Vec<_>>()
        .join(" |\n            ");

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Bloggerish</title>
    <link rel="stylesheet" href="/style.css">
</head>
<body>
    <header>
        <div class="logo"><a href="/">Bloggerish</a></div>
        <nav>
            {links}
        </nav>
    </header>
    <main>
        <div class="container">
{body}
        </div>
    </main>
</body>
</html>
"#,
        title = PolicyKind::Plain.sanitize(title),
    ))
}

pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let reason = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        r#"            <h1>{reason}</h1>
            <p class="error">{}</p>"#,
        PolicyKind::Plain.sanitize(message)
    );
    layout(reason, DEFAULT_NAV, &body)
}

/// Date shown next to posts and comments.
fn format_date(at: &chrono::DateTime<chrono::Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}
