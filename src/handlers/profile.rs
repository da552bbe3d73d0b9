use axum::{
    Form,
    extract::{Path, State, rejection::FormRejection},
    response::{IntoResponse, Redirect},
};
use validator::Validate;

use crate::{
    error::AppError,
    handlers::clean_submission,
    models::user::{UpdateBioRequest, User},
    sanitizer::PolicyKind,
    store::Store,
    views,
};

async fn find_user(store: &Store, username: String) -> Result<User, AppError> {
    store
        .users
        .get(&username)
        .await
        .ok_or(AppError::NotFound("User not found".to_string()))
}

/// Public profile page.
pub async fn get_profile(
    State(store): State<Store>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = find_user(&store, username).await?;
    Ok(views::profile::profile_page(&user))
}

/// Bio editor form.
pub async fn edit_profile_form(
    State(store): State<Store>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = find_user(&store, username).await?;
    Ok(views::profile::edit_profile_page(&user))
}

/// Save a new bio. The bio is sanitized before it is stored and again
/// whenever it is rendered.
pub async fn update_bio(
    State(store): State<Store>,
    Path(username): Path<String>,
    form: Result<Form<UpdateBioRequest>, FormRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut user = find_user(&store, username).await?;
    let Form(payload) = form?;
    payload.validate()?;

    user.bio = clean_submission("bio", &payload.bio, PolicyKind::Bio);
    tracing::info!("Bio updated for {}", user.username);

    let location = format!("/profile/{}", user.username);
    store.users.upsert(user).await;

    Ok(Redirect::to(&location))
}
