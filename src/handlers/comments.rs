use axum::{
    Form,
    extract::{Path, State, rejection::{FormRejection, PathRejection}},
    response::{IntoResponse, Redirect},
};
use validator::Validate;

use crate::{
    error::AppError,
    handlers::{clean_submission, post_id},
    models::comment::{Comment, CreateCommentRequest},
    sanitizer::PolicyKind,
    store::Store,
};

/// Add a comment to a post, then show the post again.
pub async fn create_comment(
    State(store): State<Store>,
    path: Result<Path<i64>, PathRejection>,
    form: Result<Form<CreateCommentRequest>, FormRejection>,
) -> Result<impl IntoResponse, AppError> {
    // 1. The post must exist before anything else happens
    let post_id = post_id(path)?;
    let mut post = store
        .posts
        .get(&post_id)
        .await
        .ok_or(AppError::NotFound("Post not found".to_string()))?;

    // 2. Validate payload
    let Form(payload) = form?;
    payload.validate()?;

    // 3. Append and store
    store.ensure_user(&payload.author).await;
    let comment = Comment {
        id: store.next_comment_id(),
        content: clean_submission("comment", &payload.content, PolicyKind::Comment),
        author: payload.author,
        created_at: chrono::Utc::now(),
    };
    tracing::info!(
        "Comment {} added to post {} by {}",
        comment.id,
        post_id,
        comment.author
    );
    post.comments.push(comment);
    store.posts.upsert(post).await;

    Ok(Redirect::to(&format!("/post/{}", post_id)))
}
