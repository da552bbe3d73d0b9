// tests/api_tests.rs

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use bloggerish::{config::Config, routes, state::AppState};
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        rust_log: "error".to_string(),
        ..Config::default()
    }
}

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    // 1. Fresh in-memory store with the default seed
    let state = AppState::seeded(test_config()).await;

    // 2. Create the router with the app state
    let app = routes::create_router(state);

    // 3. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 4. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

/// Client that reports redirects instead of following them.
fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

fn unique_name() -> String {
    format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8])
}

async fn get_page(client: &reqwest::Client, url: String) -> (u16, String) {
    let response = client
        .get(&url)
        .send()
        .await
        .expect("Failed to execute request");
    let status = response.status().as_u16();
    (status, response.text().await.unwrap())
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_app().await;
    let client = client();

    // Act
    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = routes::create_router(AppState::seeded(test_config()).await);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "bloggerish");
}

#[tokio::test]
async fn stylesheet_is_served_from_public_dir() {
    let address = spawn_app().await;
    let (status, css) = get_page(&client(), format!("{}/style.css", address)).await;
    assert_eq!(status, 200);
    assert!(css.contains(".author-bio-block"));
}

#[tokio::test]
async fn home_lists_seeded_post() {
    let address = spawn_app().await;
    let (status, page) = get_page(&client(), format!("{}/", address)).await;

    assert_eq!(status, 200);
    assert!(page.contains(r#"<a href="/post/1">Welcome to Bloggerish!</a>"#));
    assert!(page.contains("1 comment(s)"));
}

#[tokio::test]
async fn post_page_shows_bio_and_comments() {
    let address = spawn_app().await;
    let (status, page) = get_page(&client(), format!("{}/post/1", address)).await;

    assert_eq!(status, 200);
    assert!(page.contains("<b>Welcome to Bloggerish!</b> This is the admin account."));
    assert!(page.contains("Great start! Looking forward to more posts."));
    assert!(page.contains("Comments (1)"));
}

#[tokio::test]
async fn missing_post_is_404() {
    let address = spawn_app().await;
    let (status, page) = get_page(&client(), format!("{}/post/999", address)).await;

    assert_eq!(status, 404);
    assert!(page.contains("Post not found"));
}

#[tokio::test]
async fn create_post_stores_sanitized_content() {
    // Arrange
    let address = spawn_app().await;
    let client = client();
    let author = unique_name();

    // Act
    let response = client
        .post(&format!("{}/new-post", address))
        .form(&[
            ("title", "XSS <script>alert(1)</script>"),
            ("author", author.as_str()),
            (
                "content",
                r#"<p onclick="evil()">Hello <script>alert(1)</script><a href="javascript:alert(1)">x</a></p>"#,
            ),
        ])
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers()["location"], "/");

    let (status, page) = get_page(&client, format!("{}/post/2", address)).await;
    assert_eq!(status, 200);
    assert!(page.contains(
        "<p>Hello &lt;script&gt;alert(1)&lt;/script&gt;<a>x</a></p>"
    ));
    assert!(page.contains("<h1>XSS &lt;script&gt;alert(1)&lt;/script&gt;</h1>"));
    assert!(!page.contains("<script>"));
    assert!(!page.contains("onclick"));
    assert!(!page.contains("javascript:"));

    // The author got a profile on the way
    let (status, _) = get_page(&client, format!("{}/profile/{}", address, author)).await;
    assert_eq!(status, 200);

    // And the new post is listed first
    let (_, home) = get_page(&client, format!("{}/", address)).await;
    let new_pos = home.find(r#"href="/post/2""#).unwrap();
    let old_pos = home.find(r#"href="/post/1""#).unwrap();
    assert!(new_pos < old_pos);
}

#[tokio::test]
async fn non_numeric_post_id_is_404_page() {
    let address = spawn_app().await;
    let client = client();

    let (status, page) = get_page(&client, format!("{}/post/abc", address)).await;
    assert_eq!(status, 404);
    assert!(page.contains("<h1>Not Found</h1>"));
    assert!(page.contains("Post not found"));

    let response = client
        .post(&format!("{}/post/abc/comment", address))
        .form(&[("author", "someone"), ("content", "hello")])
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 404);
    assert!(response.text().await.unwrap().contains("Post not found"));
}

#[tokio::test]
async fn incomplete_form_gets_html_400() {
    let address = spawn_app().await;

    // No content field at all
    let response = client()
        .post(&format!("{}/new-post", address))
        .form(&[("title", "Hi"), ("author", "someone")])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    let page = response.text().await.unwrap();
    assert!(page.contains("<h1>Bad Request</h1>"));
}

#[tokio::test]
async fn create_post_fails_validation() {
    let address = spawn_app().await;

    // Act: empty title and an author name with spaces
    let response = client()
        .post(&format!("{}/new-post", address))
        .form(&[("title", ""), ("author", "not a name"), ("content", "body")])
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn comment_is_sanitized_with_comment_policy() {
    let address = spawn_app().await;
    let client = client();
    let author = unique_name();

    let response = client
        .post(&format!("{}/post/1/comment", address))
        .form(&[
            ("author", author.as_str()),
            ("content", "<b>bold</b><img src=x onerror=alert(1)><p>para</p>"),
        ])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers()["location"], "/post/1");

    let (_, page) = get_page(&client, format!("{}/post/1", address)).await;
    assert!(page.contains(
        r#"<b>bold</b>&lt;img src="x" onerror="alert(1)"&gt;&lt;p&gt;para&lt;/p&gt;"#
    ));
    assert!(!page.contains("<img"));
    assert!(page.contains("Comments (2)"));
}

#[tokio::test]
async fn comment_on_missing_post_is_404() {
    let address = spawn_app().await;

    let response = client()
        .post(&format!("{}/post/42/comment", address))
        .form(&[("author", "someone"), ("content", "hello")])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn search_finds_posts_case_insensitively() {
    let address = spawn_app().await;
    let client = client();

    let response = client
        .get(&format!("{}/search", address))
        .query(&[("q", "WELCOME")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let page = response.text().await.unwrap();

    assert!(page.contains("Results for \"WELCOME\":"));
    assert!(page.contains(r#"href="/post/1""#));
}

#[tokio::test]
async fn search_matches_text_as_written() {
    let address = spawn_app().await;
    let client = client();
    let author = unique_name();

    let response = client
        .post(&format!("{}/new-post", address))
        .form(&[
            ("title", "Dinner"),
            ("author", author.as_str()),
            ("content", "<p>Fish & chips, 1 < 2</p>"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 303);

    for query in ["fish & chips", "1 < 2"] {
        let response = client
            .get(&format!("{}/search", address))
            .query(&[("q", query)])
            .send()
            .await
            .unwrap();
        let page = response.text().await.unwrap();
        assert!(page.contains(r#"href="/post/2""#), "no hit for {:?}", query);
    }

    // Markup and escapes are not searchable text
    let response = client
        .get(&format!("{}/search", address))
        .query(&[("q", "amp;")])
        .send()
        .await
        .unwrap();
    let page = response.text().await.unwrap();
    assert!(!page.contains(r#"href="/post/2""#));
}

#[tokio::test]
async fn search_echo_cannot_inject_markup() {
    let address = spawn_app().await;

    let response = client()
        .get(&format!("{}/search", address))
        .query(&[("q", r#""><script>alert(1)</script>"#)])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let page = response.text().await.unwrap();

    assert!(!page.contains("<script>"));
    assert!(page.contains(r#"value="&quot;&gt;&lt;script&gt;alert(1)&lt;/script&gt;""#));
    assert!(page.contains("No posts found for"));
}

#[tokio::test]
async fn overlong_search_is_rejected() {
    let address = spawn_app().await;
    let long_query = "a".repeat(201);

    let response = client()
        .get(&format!("{}/search", address))
        .query(&[("q", long_query.as_str())])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}
