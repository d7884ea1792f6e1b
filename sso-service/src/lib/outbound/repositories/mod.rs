use std::str::FromStr;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub mod app;
pub mod user;

pub use app::SqliteAppRepository;
pub use user::SqliteUserRepository;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open a pool on the SQLite database at `url`, creating the file if needed.
///
/// `url` is either a path or a `sqlite:` URL (`sqlite::memory:` included).
pub async fn connect(url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = if url.starts_with("sqlite:") {
        SqliteConnectOptions::from_str(url)?
    } else {
        SqliteConnectOptions::new().filename(url)
    }
    .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}
