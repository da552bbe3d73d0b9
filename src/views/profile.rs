use axum::response::Html;

use super::layout;
use crate::{models::user::User, sanitizer::PolicyKind, utils::html::escape};

pub fn profile_page(user: &User) -> Html<String> {
    let edit_href = format!("/edit-profile/{}", user.username);
    let bio = PolicyKind::Bio.sanitize(user.bio.as_str());
    let bio = if bio.is_empty() {
        "<i>No bio set.</i>".to_string()
    } else {
        bio.into_string()
    };

    let body = format!(
        r#"            <h2>{name}</h2>
            <div class="author-bio-block"><strong>Bio:</strong><br>{bio}</div>
            <a class="edit-profile-link" href="{edit}">Edit Bio</a>"#,
        name = PolicyKind::Plain.sanitize(&user.username),
        edit = escape(&edit_href),
    );

    let title = format!("{}'s Profile", user.username);
    layout(
        &title,
        &[("/", "Home"), (edit_href.as_str(), "Edit Profile"), ("/new-post", "New Post")],
        &body,
    )
}

/// Bio editor. The textarea shows the stored (sanitized) bio source, fully
/// escaped so the browser submits it back unchanged.
pub fn edit_profile_page(user: &User) -> Html<String> {
    let profile_href = format!("/profile/{}", user.username);
    let action = format!("/edit-profile/{}", user.username);

    let body = format!(
        r#"            <h2>Edit Bio for {name}</h2>
            <form class="bio-form" action="{action}" method="POST">
                <label for="bio">Bio (rich text allowed: b, i, em, strong, a, br, ul, ol, li, p, blockquote):</label><br>
                <textarea id="bio" name="bio" style="min-height:120px;width:100%;">{bio}</textarea><br>
                <button type="submit">Save Bio</button>
            </form>"#,
        name = PolicyKind::Plain.sanitize(&user.username),
        action = escape(&action),
        bio = escape(user.bio.as_str()),
    );

    let title = format!("Edit Profile - {}", user.username);
    layout(
        &title,
        &[("/", "Home"), (profile_href.as_str(), "View Profile"), ("/new-post", "New Post")],
        &body,
    )
}
