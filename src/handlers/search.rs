use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::IntoResponse,
};
use validator::Validate;

use crate::{error::AppError, models::post::SearchParams, store::Store, views};

/// Search posts by title and content.
pub async fn search(
    State(store): State<Store>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = query?;
    params.validate()?;

    let query = params.q.trim();
    let results = if query.is_empty() {
        Vec::new()
    } else {
        store
            .recent_posts()
            .await
            .into_iter()
            .filter(|post| post.matches(query))
            .collect()
    };
    tracing::debug!("Search {:?} matched {} post(s)", query, results.len());

    Ok(views::search::search_page(query, &results))
}
