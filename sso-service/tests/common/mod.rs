#![allow(dead_code)]

use std::sync::Arc;

use chrono::Duration;
use sqlx::SqlitePool;
use sso_service::domain::auth::service::AuthService;
use sso_service::domain::auth::service::AuthSettings;
use sso_service::inbound::grpc::AuthGrpcService;
use sso_service::outbound::repositories;
use sso_service::outbound::repositories::SqliteAppRepository;
use sso_service::outbound::repositories::SqliteUserRepository;

pub type TestAuthService =
    AuthService<SqliteUserRepository, SqliteUserRepository, SqliteAppRepository>;

/// Full service stack over a private in-memory database.
pub struct TestApp {
    pub pool: SqlitePool,
    pub service: Arc<TestAuthService>,
    pub grpc: AuthGrpcService<TestAuthService>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_min_password_length(12).await
    }

    pub async fn spawn_with_min_password_length(min_password_length: usize) -> Self {
        let pool = test_pool().await;

        let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
        let app_repository = Arc::new(SqliteAppRepository::new(pool.clone()));

        let settings = AuthSettings {
            token_ttl: Duration::hours(1),
            min_password_length,
        };
        let service = Arc::new(AuthService::new(
            tracing::Span::none(),
            settings,
            Arc::clone(&user_repository),
            user_repository,
            app_repository,
        ));

        let grpc = AuthGrpcService::new(Arc::clone(&service));

        Self {
            pool,
            service,
            grpc,
        }
    }

    /// Provision an app the way an operator would, straight into the table.
    pub async fn insert_app(&self, id: i32, name: &str, secret: &str) {
        insert_app(&self.pool, id, name, secret).await;
    }

    pub async fn grant_admin(&self, user_id: i64) {
        sqlx::query("UPDATE users SET is_admin = TRUE WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .expect("Failed to grant admin");
    }

    pub async fn user_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count users")
    }
}

/// A single connection keeps the in-memory database alive and shared.
pub async fn test_pool() -> SqlitePool {
    let pool = repositories::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory database");

    repositories::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub async fn insert_app(pool: &SqlitePool, id: i32, name: &str, secret: &str) {
    sqlx::query("INSERT INTO apps (id, name, secret) VALUES (?, ?, ?)")
        .bind(id)
        .bind(name)
        .bind(secret)
        .execute(pool)
        .await
        .expect("Failed to insert app");
}
