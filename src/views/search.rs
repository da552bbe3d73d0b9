use axum::response::Html;

use super::{DEFAULT_NAV, layout, posts::summary};
use crate::{models::post::Post, sanitizer::PolicyKind, utils::html::escape};

/// Search form plus results. The query is echoed twice: as the input's
/// value (attribute-escaped) and in the headings (plain policy).
pub fn search_page(query: &str, results: &[Post]) -> Html<String> {
    let mut body = format!(
        r#"            <h2>Search Posts</h2>
            <form action="/search" method="GET">
                <input type="text" name="q" value="{value}" placeholder="Search posts...">
                <button type="submit">Search</button>
            </form>
"#,
        value = escape(query),
    );

    if !query.is_empty() {
        let echo = PolicyKind::Plain.sanitize(query);
        body.push_str(&format!("            <h3>Results for \"{echo}\":</h3>\n"));
        body.push_str("            <div class=\"search-results\">\n");
        if results.is_empty() {
            body.push_str(&format!("                <p>No posts found for \"{echo}\"</p>\n"));
        } else {
            body.extend(results.iter().map(summary));
        }
        body.push_str("            </div>");
    }

    layout("Search", DEFAULT_NAV, &body)
}
