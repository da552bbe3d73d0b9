// src/store/mod.rs

pub mod memory;

use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

use async_trait::async_trait;

pub use memory::MemoryRepository;

use crate::{
    models::{comment::Comment, post::Post, user::User},
    sanitizer::PolicyKind,
};

/// Something a [`Repository`] can hold.
pub trait Record: Clone + Send + Sync + 'static {
    type Key: Ord + Clone + Send + Sync + 'static;

    fn key(&self) -> Self::Key;
}

/// Storage seam for the handlers: `get`, `list` and `upsert` are all the
/// blog needs.
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    async fn get(&self, key: &T::Key) -> Option<T>;

    /// All records, ordered by key.
    async fn list(&self) -> Vec<T>;

    /// Inserts or replaces by key, returning the replaced record.
    async fn upsert(&self, record: T) -> Option<T>;
}

/// The collections behind the blog plus id counters.
#[derive(Clone)]
pub struct Store {
    pub posts: Arc<dyn Repository<Post>>,
    pub users: Arc<dyn Repository<User>>,
    post_ids: Arc<AtomicI64>,
    comment_ids: Arc<AtomicI64>,
}

impl Store {
    pub fn new(posts: Arc<dyn Repository<Post>>, users: Arc<dyn Repository<User>>) -> Self {
        Self {
            posts,
            users,
            post_ids: Arc::new(AtomicI64::new(1)),
            comment_ids: Arc::new(AtomicI64::new(1)),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryRepository::<Post>::new()),
            Arc::new(MemoryRepository::<User>::new()),
        )
    }

    pub fn next_post_id(&self) -> i64 {
        self.post_ids.fetch_add(1, Ordering::Relaxed)
    }

    pub fn next_comment_id(&self) -> i64 {
        self.comment_ids.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the user named `username`, creating an empty profile first if
    /// there is none.
    pub async fn ensure_user(&self, username: &str) -> User {
        if let Some(user) = self.users.get(&username.to_string()).await {
            return user;
        }

        tracing::info!("Creating profile for new author: {}", username);
        let user = User::new(username);
        self.users.upsert(user.clone()).await;
        user
    }

    /// Posts, newest first.
    pub async fn recent_posts(&self) -> Vec<Post> {
        let mut posts = self.posts.list().await;
        posts.reverse();
        posts
    }

    /// Seeds the admin account and the welcome post.
    pub async fn seed_defaults(&self) {
        let mut admin = User::new("Admin");
        admin.bio =
            PolicyKind::Bio.sanitize("<b>Welcome to Bloggerish!</b> This is the admin account.");
        self.users.upsert(admin).await;
        self.ensure_user("Guest").await;

        let now = chrono::Utc::now();
        let welcome = Post {
            id: self.next_post_id(),
            title: "Welcome to Bloggerish!".to_string(),
            author: "Admin".to_string(),
            content: PolicyKind::Post.sanitize(
                "This is your first blog post. Feel free to add more posts and comments!",
            ),
            created_at: now,
            comments: vec![Comment {
                id: self.next_comment_id(),
                author: "Guest".to_string(),
                content: PolicyKind::Comment
                    .sanitize("Great start! Looking forward to more posts."),
                created_at: now,
            }],
        };
        self.posts.upsert(welcome).await;
        tracing::info!("Seeded default user and welcome post.");
    }
}
