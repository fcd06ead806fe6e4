//! データベース接続・マイグレーション・初期データ

use crate::{
    auth::password::PasswordHasher,
    config::DatabaseConfig,
    error::AppError,
    models::user::{NewUser, Role},
    repository::{group_repo::GroupRepository, user_repo::UserRepository},
};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};

/// データベース接続を作成する
/// 書き込みはSQLite側で直列化されるため、接続は1本をプロセス全体で共有する。
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, DbError> {
    tracing::debug!("Opening database...");

    let options = SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .map_err(|e| {
            tracing::error!("Failed to open database: {}", e);
            DbError::ConnectionFailed(e.to_string())
        })?;

    tracing::info!(path = %config.path, "Database opened");

    Ok(pool)
}

/// データベースマイグレーションを実行する
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
    tracing::info!("Running database migrations...");

    sqlx::migrate!("./migrations").run(pool).await.map_err(|e| {
        tracing::error!("Migration failed: {}", e);
        DbError::MigrationFailed(e.to_string())
    })?;

    tracing::info!("Migrations completed successfully");
    Ok(())
}

/// 開発用の初期データ投入。管理ユーザーが既にあれば何もしない。
pub async fn seed_initial_data(
    pool: &SqlitePool,
    hasher: &PasswordHasher,
) -> Result<(), AppError> {
    const ADMIN_EMAIL: &str = "admin@example.com";

    let user_repo = UserRepository::new(pool.clone());

    if user_repo.find_by_email(ADMIN_EMAIL).await?.is_some() {
        return Ok(());
    }

    let group_repo = GroupRepository::new(pool.clone());
    group_repo.create("第1組", Some("中央地区第1組")).await?;

    let password_hash = hasher.hash("password")?;
    user_repo
        .create(&NewUser {
            name: "管理者".to_string(),
            email: ADMIN_EMAIL.to_string(),
            address: String::new(),
            role: Role::Admin,
            password_hash,
        })
        .await?;

    tracing::info!(email = ADMIN_EMAIL, "Seeded initial admin account");

    Ok(())
}

/// データベースエラー型
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_pool() -> SqlitePool {
        let config = DatabaseConfig {
            path: ":memory:".to_string(),
        };
        let pool = create_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_seed_creates_admin_and_group() {
        let pool = memory_pool().await;
        let hasher = PasswordHasher::new(4);

        seed_initial_data(&pool, &hasher).await.unwrap();

        let admin = UserRepository::new(pool.clone())
            .find_by_email("admin@example.com")
            .await
            .unwrap()
            .expect("admin should exist after seeding");
        assert_eq!(admin.role, Role::Admin);
        assert!(hasher.verify("password", &admin.password_hash).unwrap());

        let group = GroupRepository::new(pool.clone())
            .find_by_id(1)
            .await
            .unwrap()
            .expect("initial group should exist after seeding");
        assert_eq!(group.name, "第1組");
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let pool = memory_pool().await;
        let hasher = PasswordHasher::new(4);

        seed_initial_data(&pool, &hasher).await.unwrap();
        seed_initial_data(&pool, &hasher).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
