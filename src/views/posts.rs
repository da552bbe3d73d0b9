use axum::response::Html;

use super::{DEFAULT_NAV, format_date, layout};
use crate::{
    models::{post::Post, user::User},
    sanitizer::PolicyKind,
    utils::html::{escape, excerpt},
};

const EXCERPT_CHARS: usize = 200;

/// Home page: every post, newest first.
pub fn home(posts: &[Post]) -> Html<String> {
    let body = if posts.is_empty() {
        r#"            <p class="empty">No posts yet. <a href="/new-post">Write the first one.</a></p>"#
            .to_string()
    } else {
        posts.iter().map(summary).collect()
    };
    layout("Home", DEFAULT_NAV, &body)
}

/// Preview card used on the home and search pages.
pub fn summary(post: &Post) -> String {
    let preview = escape(&excerpt(&post.content.text_content(), EXCERPT_CHARS));
    format!(
        r#"
            <div class="post">
                <h2><a href="/post/{id}">{title}</a></h2>
                <div class="post-meta">By <a href="/profile/{author_href}">{author}</a> on {date}</div>
                <div class="post-content">{preview}</div>
                <div class="post-actions">
                    <a href="/post/{id}">Read More</a> |
                    <span>{count} comment(s)</span>
                </div>
            </div>
"#,
        id = post.id,
        title = PolicyKind::Plain.sanitize(&post.title),
        author_href = escape(&post.author),
        author = PolicyKind::Plain.sanitize(&post.author),
        date = format_date(&post.created_at),
        count = post.comments.len(),
    )
}

/// Full post with the author's bio, the comments and the comment form.
pub fn post_page(post: &Post, author: &User) -> Html<String> {
    let comments: String = post
        .comments
        .iter()
        .map(|comment| {
            format!(
                r#"
                    <div class="comment">
                        <div class="comment-author">{author}</div>
                        <div class="comment-content">{content}</div>
                        <div class="comment-date">{date}</div>
                    </div>
"#,
                author = PolicyKind::Plain.sanitize(&comment.author),
                content = PolicyKind::Comment.sanitize(comment.content.as_str()),
                date = format_date(&comment.created_at),
            )
        })
        .collect();

    let body = format!(
        r#"            <article class="post-full">
                <h1>{title}</h1>
                <div class="post-meta">By <a href="/profile/{author_href}">{author}</a> on {date}</div>
                <div class="author-bio-block"><strong>Bio:</strong><br>{bio}</div>
                <div class="post-content">{content}</div>
            </article>

            <section class="comments-section">
                <h3>Comments ({count})</h3>
                <div class="comments">
{comments}
                </div>

                <form class="comment-form" action="/post/{id}/comment" method="POST">
                    <h4>Add a Comment</h4>
                    <input type="text" name="author" placeholder="Your name" required>
                    <textarea name="content" placeholder="Your comment (b, i, em, strong, code, a allowed)" required></textarea>
                    <button type="submit">Post Comment</button>
                </form>
            </section>"#,
        id = post.id,
        title = PolicyKind::Plain.sanitize(&post.title),
        author_href = escape(&author.username),
        author = PolicyKind::Plain.sanitize(&author.username),
        date = format_date(&post.created_at),
        bio = PolicyKind::Bio.sanitize(author.bio.as_str()),
        content = PolicyKind::Post.sanitize(post.content.as_str()),
        count = post.comments.len(),
    );

    layout(&post.title, DEFAULT_NAV, &body)
}

pub fn new_post_form() -> Html<String> {
    let body = r#"            <h2>Create New Post</h2>
            <form class="post-form" action="/new-post" method="POST">
                <input type="text" name="title" placeholder="Post title" required>
                <input type="text" name="author" placeholder="Your name" required>
                <textarea name="content" placeholder="Write your post here..." required></textarea>
                <button type="submit">Publish Post</button>
            </form>"#;
    layout("New Post", DEFAULT_NAV, body)
}
