use axum::{
    Form,
    extract::{Path, State, rejection::{FormRejection, PathRejection}},
    response::{IntoResponse, Redirect},
};
use validator::Validate;

use crate::{
    error::AppError,
    handlers::{clean_submission, post_id},
    models::{
        post::{CreatePostRequest, Post},
        user::User,
    },
    sanitizer::PolicyKind,
    store::Store,
    views,
};

/// Home page: all posts, newest first.
pub async fn list_posts(State(store): State<Store>) -> impl IntoResponse {
    let posts = store.recent_posts().await;
    views::posts::home(&posts)
}

/// Get a single post by ID, with its author's bio and comments.
pub async fn get_post(
    State(store): State<Store>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = post_id(path)?;
    let post = store
        .posts
        .get(&id)
        .await
        .ok_or(AppError::NotFound("Post not found".to_string()))?;

    // Authors are created with their first post, but render even if the
    // profile is gone.
    let author = store
        .users
        .get(&post.author)
        .await
        .unwrap_or_else(|| User::new(post.author.clone()));

    Ok(views::posts::post_page(&post, &author))
}

pub async fn new_post_form() -> impl IntoResponse {
    views::posts::new_post_form()
}

/// Create a new post and go back to the home page.
pub async fn create_post(
    State(store): State<Store>,
    form: Result<Form<CreatePostRequest>, FormRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Form(payload) = form?;
    payload.validate()?;

    store.ensure_user(&payload.author).await;

    let post = Post {
        id: store.next_post_id(),
        title: payload.title,
        content: clean_submission("content", &payload.content, PolicyKind::Post),
        author: payload.author,
        created_at: chrono::Utc::now(),
        comments: Vec::new(),
    };
    tracing::info!("Post {} created by {}", post.id, post.author);
    store.posts.upsert(post).await;

    Ok(Redirect::to("/"))
}
