use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::App;
use crate::domain::auth::models::AppId;
use crate::domain::auth::ports::AppProvider;

/// Read-only access to provisioned apps.
pub struct SqliteAppRepository {
    pool: SqlitePool,
}

impl SqliteAppRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AppRow {
    id: i32,
    name: String,
    secret: String,
}

#[async_trait]
impl AppProvider for SqliteAppRepository {
    async fn app(&self, id: AppId) -> Result<Option<App>, StorageError> {
        let row = sqlx::query_as::<_, AppRow>(
            r#"
            SELECT id, name, secret
            FROM apps
            WHERE id = ?
            "#,
        )
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        Ok(row.map(|r| App {
            id: AppId(r.id),
            name: r.name,
            secret: r.secret,
        }))
    }
}
