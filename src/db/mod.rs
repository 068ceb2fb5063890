use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::domain::{PostId, UserId};
use crate::models::{Post, User};

pub mod migrator;
pub mod repositories;

pub use repositories::post::PostRepository;
pub use repositories::user::{UserRepository, hash_password, verify_password};

/// Persistent store for users and posts.
///
/// Each operation is a single statement; the store itself provides the only
/// atomicity guarantees (notably the unique index on `users.email`).
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");
        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // an in-memory database lives only as long as its connection
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> UserRepository {
        UserRepository::new(self.conn.clone())
    }

    fn post_repo(&self) -> PostRepository {
        PostRepository::new(self.conn.clone())
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn find_user_credentials(&self, email: &str) -> Result<Option<(User, String)>> {
        self.user_repo().get_by_email_with_password(email).await
    }

    pub async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    /// Returns `None` if a user with this email already exists.
    pub async fn insert_user(
        &self,
        user_name: &str,
        email: &str,
        password_hash: String,
    ) -> Result<Option<User>> {
        self.user_repo()
            .insert(user_name, email, password_hash)
            .await
    }

    pub async fn insert_post(&self, author_id: UserId, content: &str) -> Result<Post> {
        self.post_repo().insert(author_id, content).await
    }

    pub async fn find_post_by_id(&self, id: PostId) -> Result<Option<Post>> {
        self.post_repo().get(id).await
    }

    pub async fn save_post(&self, post: &Post) -> Result<Post> {
        self.post_repo().save(post).await
    }
}
